//! Content resolvers.
//!
//! A [`ContentResolver`] turns lookup keys (permalink, slug, id + version)
//! into typed entities by issuing one or more store queries. Every
//! operation has a named [`Operation`] whose [`FailurePolicy`] decides what
//! a store failure becomes: an [`Error::Store`] for the caller, or a
//! fallback value.
//!
//! Input validation always runs before the store is contacted.

mod pages;
mod posts;
mod site;

pub use posts::PostLookup;
pub use site::MIN_SEARCH_CHARS;

use crate::enrich::BlockEnricher;
use crate::error::{Error, Result};
use crate::models::IdOnly;
use crate::store::{ContentStore, StoreError};
use folio_query::Query;
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::fmt;
use std::sync::Arc;

/// What a store failure does to an operation's result.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailurePolicy {
    /// Surface the failure as [`Error::Store`]
    Propagate,
    /// Log it and return the operation's fallback value
    Degrade,
}

/// Every store-backed operation, by name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operation {
    ResolvePageByPermalink,
    ResolvePageByIdAndVersion,
    ResolvePageMetadata,
    EnrichPostsBlock,
    ResolvePostBySlug,
    ResolvePostByIdAndVersion,
    ResolveSiteGlobals,
    ListPaginatedPosts,
    CountPublishedPosts,
    LookupPageId,
    LookupPostId,
    ListActiveRedirects,
    FindRedirect,
    ResolveAuthor,
    SearchContent,
}

impl Operation {
    pub const ALL: [Operation; 15] = [
        Operation::ResolvePageByPermalink,
        Operation::ResolvePageByIdAndVersion,
        Operation::ResolvePageMetadata,
        Operation::EnrichPostsBlock,
        Operation::ResolvePostBySlug,
        Operation::ResolvePostByIdAndVersion,
        Operation::ResolveSiteGlobals,
        Operation::ListPaginatedPosts,
        Operation::CountPublishedPosts,
        Operation::LookupPageId,
        Operation::LookupPostId,
        Operation::ListActiveRedirects,
        Operation::FindRedirect,
        Operation::ResolveAuthor,
        Operation::SearchContent,
    ];

    pub fn policy(self) -> FailurePolicy {
        match self {
            Operation::CountPublishedPosts | Operation::LookupPageId | Operation::LookupPostId => {
                FailurePolicy::Degrade
            }
            _ => FailurePolicy::Propagate,
        }
    }

    fn describe(self) -> &'static str {
        match self {
            Operation::ResolvePageByPermalink => "fetch page by permalink",
            Operation::ResolvePageByIdAndVersion => "fetch page by id and version",
            Operation::ResolvePageMetadata => "fetch page metadata",
            Operation::EnrichPostsBlock => "fetch posts for posts block",
            Operation::ResolvePostBySlug => "fetch post by slug",
            Operation::ResolvePostByIdAndVersion => "fetch post by id and version",
            Operation::ResolveSiteGlobals => "fetch site globals",
            Operation::ListPaginatedPosts => "fetch paginated posts",
            Operation::CountPublishedPosts => "count published posts",
            Operation::LookupPageId => "look up page id",
            Operation::LookupPostId => "look up post id",
            Operation::ListActiveRedirects => "fetch redirects",
            Operation::FindRedirect => "find redirect",
            Operation::ResolveAuthor => "fetch author",
            Operation::SearchContent => "search content",
        }
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.describe())
    }
}

/// Resolves route keys into content entities.
#[derive(Clone)]
pub struct ContentResolver {
    store: Arc<dyn ContentStore>,
    enricher: BlockEnricher,
}

impl ContentResolver {
    pub fn new(store: Arc<dyn ContentStore>) -> Self {
        Self {
            enricher: BlockEnricher::new(Arc::clone(&store)),
            store,
        }
    }

    async fn items(
        &self,
        operation: Operation,
        collection: &str,
        query: &Query,
        token: Option<&str>,
    ) -> Result<Vec<Value>> {
        self.store
            .read_items(collection, query, token)
            .await
            .map_err(|e| fail(operation, e))
    }

    async fn item(
        &self,
        operation: Operation,
        collection: &str,
        id: &str,
        query: &Query,
        token: Option<&str>,
    ) -> Result<Option<Value>> {
        self.store
            .read_item(collection, id, query, token)
            .await
            .map_err(|e| fail(operation, e))
    }

    async fn singleton(
        &self,
        operation: Operation,
        collection: &str,
        query: &Query,
        token: Option<&str>,
    ) -> Result<Option<Value>> {
        self.store
            .read_singleton(collection, query, token)
            .await
            .map_err(|e| fail(operation, e))
    }

    /// Id of the first row the query matches.
    async fn first_id(
        &self,
        operation: Operation,
        collection: &str,
        query: &Query,
        token: Option<&str>,
    ) -> Result<Option<String>> {
        let rows = self.items(operation, collection, query, token).await?;
        match rows.into_iter().next() {
            Some(row) => Ok(Some(decode::<IdOnly>(operation, row)?.id)),
            None => Ok(None),
        }
    }
}

/// Log a store failure at the level its policy calls for and wrap it.
pub(crate) fn fail(operation: Operation, source: StoreError) -> Error {
    match operation.policy() {
        FailurePolicy::Propagate => {
            tracing::error!(operation = %operation, error = %source, "Store operation failed");
        }
        FailurePolicy::Degrade => {
            tracing::warn!(operation = %operation, error = %source, "Store operation failed, degrading");
        }
    }
    Error::store(operation, source)
}

/// Result of a degrading operation: its value, or the fallback on failure.
fn degrade<T>(result: Result<T>, fallback: T) -> T {
    result.unwrap_or(fallback)
}

pub(crate) fn decode<T: DeserializeOwned>(operation: Operation, row: Value) -> Result<T> {
    serde_json::from_value(row).map_err(|e| fail(operation, StoreError::Decode(e)))
}

pub(crate) fn decode_all<T: DeserializeOwned>(operation: Operation, rows: Vec<Value>) -> Result<Vec<T>> {
    rows.into_iter().map(|row| decode(operation, row)).collect()
}

/// Trimmed input, or `InvalidArgument` if nothing is left.
fn require<'a>(name: &str, value: &'a str) -> Result<&'a str> {
    let value = value.trim();
    if value.is_empty() {
        return Err(Error::InvalidArgument(format!("{name} must not be empty")));
    }
    Ok(value)
}

/// A blank token is no token.
pub(crate) fn bearer(token: Option<&str>) -> Option<&str> {
    token.map(str::trim).filter(|t| !t.is_empty())
}
