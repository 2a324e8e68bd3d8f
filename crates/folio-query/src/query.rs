//! Queries against a store collection.

use crate::fields::Selection;
use crate::filter::Filter;
use crate::sort::SortKey;
use serde_json::{Map, Value};
use std::collections::BTreeMap;
use std::sync::Arc;

/// Name of the store's published content revision.
pub const MAIN_VERSION: &str = "main";

/// The version parameter to send for a requested revision.
///
/// Blank input and [`MAIN_VERSION`] both mean "the published state", which is
/// expressed by sending no version at all.
pub fn effective_version(raw: &str) -> Option<&str> {
    let trimmed = raw.trim();
    if trimmed.is_empty() || trimmed == MAIN_VERSION {
        None
    } else {
        Some(trimmed)
    }
}

/// Aggregate functions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Aggregate {
    /// Count rows; `*` counts every matching row.
    Count(String),
}

/// Per-relation modifiers applied to nested arrays (`deep`).
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Deep {
    pub filter: Option<Filter>,
    pub sort: Vec<SortKey>,
    pub limit: Option<u32>,
    pub nested: BTreeMap<String, Deep>,
}

impl Deep {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn filter(mut self, filter: Filter) -> Self {
        self.filter = Some(filter);
        self
    }

    pub fn sort(mut self, key: SortKey) -> Self {
        self.sort.push(key);
        self
    }

    pub fn limit(mut self, limit: u32) -> Self {
        self.limit = Some(limit);
        self
    }

    /// Modifiers for a relation inside this one.
    pub fn nested(mut self, relation: impl Into<String>, deep: Deep) -> Self {
        self.nested.insert(relation.into(), deep);
        self
    }

    pub fn to_json(&self) -> Value {
        let mut map = Map::new();
        if let Some(filter) = &self.filter {
            map.insert("_filter".into(), filter.to_json());
        }
        if !self.sort.is_empty() {
            map.insert(
                "_sort".into(),
                Value::Array(self.sort.iter().map(|k| Value::String(k.to_string())).collect()),
            );
        }
        if let Some(limit) = self.limit {
            map.insert("_limit".into(), Value::from(limit));
        }
        for (relation, deep) in &self.nested {
            map.insert(relation.clone(), deep.to_json());
        }
        Value::Object(map)
    }
}

/// A read query: projection, filter, ordering, paging, nested modifiers,
/// content version, and aggregation.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Query {
    pub fields: Option<Arc<Selection>>,
    pub filter: Option<Filter>,
    pub sort: Vec<SortKey>,
    pub limit: Option<u32>,
    pub page: Option<u32>,
    pub deep: BTreeMap<String, Deep>,
    pub version: Option<String>,
    pub aggregate: Option<Aggregate>,
}

impl Query {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn fields(mut self, fields: Arc<Selection>) -> Self {
        self.fields = Some(fields);
        self
    }

    pub fn filter(mut self, filter: Filter) -> Self {
        self.filter = Some(filter);
        self
    }

    pub fn sort(mut self, key: SortKey) -> Self {
        self.sort.push(key);
        self
    }

    pub fn limit(mut self, limit: u32) -> Self {
        self.limit = Some(limit);
        self
    }

    pub fn page(mut self, page: u32) -> Self {
        self.page = Some(page);
        self
    }

    pub fn deep(mut self, relation: impl Into<String>, deep: Deep) -> Self {
        self.deep.insert(relation.into(), deep);
        self
    }

    /// Select a content revision. `main` and blank strings select nothing.
    pub fn version(mut self, version: &str) -> Self {
        self.version = effective_version(version).map(str::to_string);
        self
    }

    pub fn count(mut self, field: impl Into<String>) -> Self {
        self.aggregate = Some(Aggregate::Count(field.into()));
        self
    }

    /// Encode as URL query parameters.
    pub fn to_params(&self) -> Vec<(String, String)> {
        let mut params = Vec::new();
        if let Some(fields) = &self.fields {
            params.push(("fields".to_string(), fields.paths().join(",")));
        }
        if let Some(filter) = &self.filter {
            params.push(("filter".to_string(), filter.to_json().to_string()));
        }
        if !self.sort.is_empty() {
            let keys: Vec<String> = self.sort.iter().map(SortKey::to_string).collect();
            params.push(("sort".to_string(), keys.join(",")));
        }
        if let Some(limit) = self.limit {
            params.push(("limit".to_string(), limit.to_string()));
        }
        if let Some(page) = self.page {
            params.push(("page".to_string(), page.to_string()));
        }
        if !self.deep.is_empty() {
            let deep: Map<String, Value> = self
                .deep
                .iter()
                .map(|(relation, deep)| (relation.clone(), deep.to_json()))
                .collect();
            params.push(("deep".to_string(), Value::Object(deep).to_string()));
        }
        if let Some(version) = &self.version {
            params.push(("version".to_string(), version.clone()));
        }
        if let Some(Aggregate::Count(field)) = &self.aggregate {
            params.push(("aggregate[count]".to_string(), field.clone()));
        }
        params
    }
}
