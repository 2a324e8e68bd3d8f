//! Content store access.
//!
//! [`ContentStore`] is the seam between the resolvers and wherever content
//! lives. Every read takes an optional bearer token that grants elevated
//! visibility (drafts, versions) for that one request.
//!
//! - [`HttpStore`] talks to a remote store's REST API
//! - [`MemoryStore`] answers from JSON held in-process

mod http;
mod memory;

pub use http::HttpStore;
pub use memory::MemoryStore;

use async_trait::async_trait;
use folio_query::Query;
use serde_json::Value;
use thiserror::Error;

/// Result type for store reads.
pub type StoreResult<T> = std::result::Result<T, StoreError>;

/// Errors raised by a content store.
#[derive(Debug, Error)]
pub enum StoreError {
    /// Could not reach the store or read its response
    #[error("Transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// The store answered with a non-success status
    #[error("Store responded {status}: {message}")]
    Status { status: u16, message: String },

    /// The request token was rejected
    #[error("Token rejected by store")]
    Unauthorized,

    /// The payload was not JSON of the expected shape
    #[error("Undecodable payload: {0}")]
    Decode(#[from] serde_json::Error),

    /// The payload was JSON but not what the operation expects
    #[error("Unexpected payload: {0}")]
    Malformed(String),

    /// The configured endpoint cannot be used
    #[error("Invalid endpoint: {0}")]
    InvalidEndpoint(String),
}

/// Read access to a content store.
#[async_trait]
pub trait ContentStore: Send + Sync {
    /// Items of a collection matching the query.
    async fn read_items(
        &self,
        collection: &str,
        query: &Query,
        token: Option<&str>,
    ) -> StoreResult<Vec<Value>>;

    /// One item by id. `None` when the store has no such item.
    async fn read_item(
        &self,
        collection: &str,
        id: &str,
        query: &Query,
        token: Option<&str>,
    ) -> StoreResult<Option<Value>>;

    /// A singleton collection's only item.
    async fn read_singleton(
        &self,
        collection: &str,
        query: &Query,
        token: Option<&str>,
    ) -> StoreResult<Option<Value>>;
}
