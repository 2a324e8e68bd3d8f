//! Filter expressions over store items.
//!
//! A [`Filter`] is a tree of field/operator/value triples combined with
//! `_and` / `_or`. It serializes to the store's JSON filter syntax and can be
//! evaluated against a JSON item in-process.

use serde::{Serialize, Serializer};
use serde_json::{json, Map, Value};

/// A filter over store items.
///
/// Field paths use dots to reach into related objects (`author.id`).
/// A missing field never equals anything, so it passes `_neq` and fails
/// `_eq` / `_nnull`.
#[derive(Debug, Clone, PartialEq)]
pub enum Filter {
    /// `_eq`
    Eq(String, Value),
    /// `_neq`
    Neq(String, Value),
    /// `_nnull`
    NotNull(String),
    /// `_icontains` (case-insensitive substring)
    IContains(String, String),
    /// `_and`
    And(Vec<Filter>),
    /// `_or`
    Or(Vec<Filter>),
}

impl Filter {
    pub fn eq(field: impl Into<String>, value: impl Into<Value>) -> Self {
        Filter::Eq(field.into(), value.into())
    }

    pub fn neq(field: impl Into<String>, value: impl Into<Value>) -> Self {
        Filter::Neq(field.into(), value.into())
    }

    pub fn not_null(field: impl Into<String>) -> Self {
        Filter::NotNull(field.into())
    }

    pub fn icontains(field: impl Into<String>, needle: impl Into<String>) -> Self {
        Filter::IContains(field.into(), needle.into())
    }

    /// Conjunction of all given filters.
    pub fn all(filters: impl IntoIterator<Item = Filter>) -> Self {
        Filter::And(filters.into_iter().collect())
    }

    /// Disjunction of all given filters.
    pub fn any(filters: impl IntoIterator<Item = Filter>) -> Self {
        Filter::Or(filters.into_iter().collect())
    }

    /// Combine with another filter under `_and`, flattening an existing conjunction.
    pub fn and(self, other: Filter) -> Self {
        match self {
            Filter::And(mut filters) => {
                filters.push(other);
                Filter::And(filters)
            }
            filter => Filter::And(vec![filter, other]),
        }
    }

    /// Encode as the store's JSON filter object.
    pub fn to_json(&self) -> Value {
        match self {
            Filter::Eq(path, value) => nest(path, json!({ "_eq": value })),
            Filter::Neq(path, value) => nest(path, json!({ "_neq": value })),
            Filter::NotNull(path) => nest(path, json!({ "_nnull": true })),
            Filter::IContains(path, needle) => nest(path, json!({ "_icontains": needle })),
            Filter::And(filters) => {
                json!({ "_and": filters.iter().map(Filter::to_json).collect::<Vec<_>>() })
            }
            Filter::Or(filters) => {
                json!({ "_or": filters.iter().map(Filter::to_json).collect::<Vec<_>>() })
            }
        }
    }

    /// Evaluate against a single item.
    pub fn matches(&self, item: &Value) -> bool {
        match self {
            Filter::Eq(path, expected) => lookup(item, path).is_some_and(|v| v == expected),
            Filter::Neq(path, expected) => !lookup(item, path).is_some_and(|v| v == expected),
            Filter::NotNull(path) => lookup(item, path).is_some_and(|v| !v.is_null()),
            Filter::IContains(path, needle) => {
                let needle = needle.to_lowercase();
                lookup(item, path)
                    .and_then(Value::as_str)
                    .is_some_and(|s| s.to_lowercase().contains(&needle))
            }
            Filter::And(filters) => filters.iter().all(|f| f.matches(item)),
            Filter::Or(filters) => filters.iter().any(|f| f.matches(item)),
        }
    }
}

impl Serialize for Filter {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.to_json().serialize(serializer)
    }
}

/// Resolve a dotted path inside a JSON value.
pub(crate) fn lookup<'a>(item: &'a Value, path: &str) -> Option<&'a Value> {
    path.split('.').try_fold(item, |value, segment| value.get(segment))
}

fn nest(path: &str, leaf: Value) -> Value {
    path.rsplit('.').fold(leaf, |inner, segment| {
        let mut map = Map::new();
        map.insert(segment.to_string(), inner);
        Value::Object(map)
    })
}
