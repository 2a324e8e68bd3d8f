//! Content models for Folio.
//!
//! Typed views of the entities the content store holds. Every model is
//! read-only here: the store owns them.
//!
//! # Core Types
//!
//! - [`Page`] - a routed page with its ordered [`PageBlock`]s
//! - [`Block`] - tagged union over the block variants
//! - [`Post`] / [`PostSummary`] - blog posts, full and listing form
//! - [`Navigation`] - header and footer menus
//! - [`Globals`] - site-wide settings
//! - [`Redirect`] - active URL redirects

mod blocks;
mod globals;
mod navigation;
mod page;
mod post;
mod redirect;
mod search;

pub use blocks::{
    Button, ButtonGroup, Form, FormBlock, FormField, GalleryBlock, GalleryItem, HeroBlock,
    PageLink, PostLink, PostsBlock, PricingBlock, PricingCard, RichTextBlock,
};
pub use globals::{Globals, SiteGlobals, SocialLink};
pub use navigation::{Navigation, NavigationItem};
pub use page::{Block, BlockError, Page, PageBlock, Seo};
pub use post::{Author, Post, PostPage, PostSummary};
pub use redirect::{RawRedirect, Redirect};
pub use search::{HitKind, SearchHit};

use serde::{Deserialize, Deserializer};

/// Publish state required for public visibility.
pub const PUBLISHED: &str = "published";

/// Store ids are strings or integers depending on the collection.
#[derive(Deserialize)]
#[serde(untagged)]
enum RawId {
    Text(String),
    Number(i64),
}

impl From<RawId> for String {
    fn from(raw: RawId) -> Self {
        match raw {
            RawId::Text(text) => text,
            RawId::Number(n) => n.to_string(),
        }
    }
}

pub(crate) fn deserialize_id<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
    RawId::deserialize(deserializer).map(String::from)
}

pub(crate) fn deserialize_optional_id<'de, D: Deserializer<'de>>(
    deserializer: D,
) -> Result<Option<String>, D::Error> {
    Ok(Option::<RawId>::deserialize(deserializer)?.map(String::from))
}

/// A value the store may send as `null` for "unset".
pub(crate) fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de> + Default,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// A list the store may send as `null`.
pub(crate) fn nullable_list<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    null_as_default(deserializer)
}

/// Id-only projection used by lookups.
#[derive(Debug, Deserialize)]
pub(crate) struct IdOnly {
    #[serde(deserialize_with = "deserialize_id")]
    pub id: String,
}
