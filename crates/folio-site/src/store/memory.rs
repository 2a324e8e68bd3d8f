//! In-process content store.

use super::{ContentStore, StoreError, StoreResult};
use async_trait::async_trait;
use folio_query::{eval, Query};
use serde_json::Value;
use std::collections::{HashMap, HashSet};

/// Content held as JSON rows, queried with the same semantics as the remote
/// store. Relations are stored expanded inside their parent rows.
///
/// Content versions are overlays: reading an item at a version merges the
/// overlay's top-level fields over the stored item. When tokens are
/// registered, an unknown request token is rejected and version reads
/// require a known token.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    collections: HashMap<String, Vec<Value>>,
    singletons: HashMap<String, Value>,
    versions: HashMap<(String, String, String), Value>,
    tokens: HashSet<String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder: add items to a collection.
    pub fn with_items(mut self, collection: &str, items: impl IntoIterator<Item = Value>) -> Self {
        self.collections
            .entry(collection.to_string())
            .or_default()
            .extend(items);
        self
    }

    /// Builder: set a singleton.
    pub fn with_singleton(mut self, collection: &str, value: Value) -> Self {
        self.singletons.insert(collection.to_string(), value);
        self
    }

    /// Builder: add a content version overlay for an item.
    pub fn with_version(mut self, collection: &str, id: &str, version: &str, overlay: Value) -> Self {
        self.versions.insert(
            (collection.to_string(), id.to_string(), version.to_string()),
            overlay,
        );
        self
    }

    /// Builder: accept a token.
    pub fn with_token(mut self, token: &str) -> Self {
        self.tokens.insert(token.to_string());
        self
    }

    fn authorize(&self, query: &Query, token: Option<&str>) -> StoreResult<()> {
        if self.tokens.is_empty() {
            return Ok(());
        }
        match token {
            Some(token) if !self.tokens.contains(token) => Err(StoreError::Unauthorized),
            None if query.version.is_some() => Err(StoreError::Unauthorized),
            _ => Ok(()),
        }
    }

    fn at_version(&self, collection: &str, row: &Value, version: Option<&str>) -> Option<Value> {
        let Some(version) = version else {
            return Some(row.clone());
        };
        let id = item_id(row)?;
        let overlay = self
            .versions
            .get(&(collection.to_string(), id, version.to_string()))?;

        let mut merged = row.clone();
        if let (Some(target), Some(fields)) = (merged.as_object_mut(), overlay.as_object()) {
            for (key, value) in fields {
                target.insert(key.clone(), value.clone());
            }
        }
        Some(merged)
    }
}

fn item_id(row: &Value) -> Option<String> {
    match row.get("id")? {
        Value::String(id) => Some(id.clone()),
        Value::Number(id) => Some(id.to_string()),
        _ => None,
    }
}

#[async_trait]
impl ContentStore for MemoryStore {
    async fn read_items(
        &self,
        collection: &str,
        query: &Query,
        token: Option<&str>,
    ) -> StoreResult<Vec<Value>> {
        self.authorize(query, token)?;
        let rows = self.collections.get(collection).ok_or_else(|| StoreError::Status {
            status: 404,
            message: format!("collection {collection} not found"),
        })?;

        let rows: Vec<Value> = rows
            .iter()
            .filter_map(|row| self.at_version(collection, row, query.version.as_deref()))
            .collect();
        Ok(eval::apply(&rows, query))
    }

    async fn read_item(
        &self,
        collection: &str,
        id: &str,
        query: &Query,
        token: Option<&str>,
    ) -> StoreResult<Option<Value>> {
        self.authorize(query, token)?;
        let row = self
            .collections
            .get(collection)
            .and_then(|rows| rows.iter().find(|row| item_id(row).as_deref() == Some(id)))
            .and_then(|row| self.at_version(collection, row, query.version.as_deref()));
        Ok(row.map(|row| eval::apply_one(&row, query)))
    }

    async fn read_singleton(
        &self,
        collection: &str,
        query: &Query,
        token: Option<&str>,
    ) -> StoreResult<Option<Value>> {
        self.authorize(query, token)?;
        Ok(self
            .singletons
            .get(collection)
            .map(|row| eval::apply_one(row, query)))
    }
}
