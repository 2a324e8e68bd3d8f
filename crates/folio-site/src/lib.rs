//! Folio - content resolution for a headless CMS site
//!
//! Turns route keys (permalinks, slugs, id + version pairs) into fully
//! populated content entities read from a remote content store, and serves
//! them to page and metadata renderers over HTTP.
//!
//! # Architecture
//!
//! - **Models**: Content types (Page, Block, Post, Navigation, Globals)
//! - **Schema**: Static field selections for every entity
//! - **Store**: The content store seam, over HTTP or in memory
//! - **Resolve**: Lookup-key to entity resolution with named failure policies
//! - **Enrich**: Secondary fetches for posts blocks
//! - **Routes**: Route context derivation and the published/draft/version paths
//! - **API**: HTTP endpoints for renderers
//!
//! # Example
//!
//! ```no_run
//! use folio_site::{SiteConfig, SiteNode};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = SiteConfig::from_env()?;
//!     let node = SiteNode::new(config)?;
//!     node.run().await?;
//!     Ok(())
//! }
//! ```

pub mod api;
pub mod enrich;
pub mod error;
pub mod models;
pub mod node;
pub mod resolve;
pub mod routes;
pub mod schema;
pub mod store;

#[cfg(test)]
mod fixtures;

pub use enrich::BlockEnricher;
pub use error::{Error, Result};
pub use models::{
    Author, Block, Globals, Navigation, NavigationItem, Page, PageBlock, Post, PostPage,
    PostSummary, Redirect, SearchHit, Seo, SiteGlobals,
};
pub use node::{SiteConfig, SiteNode, SiteState};
pub use resolve::{ContentResolver, FailurePolicy, Operation, PostLookup};
pub use routes::{Metadata, Outcome, RouteContext, RouteParams};
pub use store::{ContentStore, HttpStore, MemoryStore, StoreError};
