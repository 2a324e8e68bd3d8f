//! Sort keys.

use crate::filter::lookup;
use serde_json::Value;
use std::cmp::Ordering;
use std::fmt;

/// A sort key. Text form prefixes descending keys with `-`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SortKey {
    pub field: String,
    pub descending: bool,
}

impl SortKey {
    pub fn asc(field: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            descending: false,
        }
    }

    pub fn desc(field: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            descending: true,
        }
    }
}

impl fmt::Display for SortKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.descending {
            write!(f, "-{}", self.field)
        } else {
            f.write_str(&self.field)
        }
    }
}

/// Compare two items by a list of sort keys.
///
/// Missing and null values order before any present value.
pub fn compare_items(a: &Value, b: &Value, keys: &[SortKey]) -> Ordering {
    for key in keys {
        let ordering = compare_values(lookup(a, &key.field), lookup(b, &key.field));
        let ordering = if key.descending {
            ordering.reverse()
        } else {
            ordering
        };
        if ordering != Ordering::Equal {
            return ordering;
        }
    }
    Ordering::Equal
}

fn compare_values(a: Option<&Value>, b: Option<&Value>) -> Ordering {
    let a = a.filter(|v| !v.is_null());
    let b = b.filter(|v| !v.is_null());
    match (a, b) {
        (None, None) => Ordering::Equal,
        (None, Some(_)) => Ordering::Less,
        (Some(_), None) => Ordering::Greater,
        (Some(Value::Number(x)), Some(Value::Number(y))) => x
            .as_f64()
            .partial_cmp(&y.as_f64())
            .unwrap_or(Ordering::Equal),
        (Some(Value::String(x)), Some(Value::String(y))) => x.cmp(y),
        (Some(Value::Bool(x)), Some(Value::Bool(y))) => x.cmp(y),
        _ => Ordering::Equal,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn display_matches_text_form() {
        assert_eq!(SortKey::desc("published_at").to_string(), "-published_at");
        assert_eq!(SortKey::asc("sort").to_string(), "sort");
    }

    #[test]
    fn descending_dates_newest_first() {
        let mut items = vec![
            json!({ "published_at": "2024-01-01T00:00:00Z" }),
            json!({ "published_at": null }),
            json!({ "published_at": "2024-06-01T00:00:00Z" }),
        ];
        items.sort_by(|a, b| compare_items(a, b, &[SortKey::desc("published_at")]));
        assert_eq!(items[0]["published_at"], "2024-06-01T00:00:00Z");
        assert_eq!(items[1]["published_at"], "2024-01-01T00:00:00Z");
        assert!(items[2]["published_at"].is_null());
    }

    #[test]
    fn secondary_key_breaks_ties() {
        let a = json!({ "sort": 1, "id": 2 });
        let b = json!({ "sort": 1, "id": 1 });
        let keys = [SortKey::asc("sort"), SortKey::asc("id")];
        assert_eq!(compare_items(&a, &b, &keys), Ordering::Greater);
    }
}
