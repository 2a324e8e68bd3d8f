//! In-process evaluation of queries over JSON rows.
//!
//! Mirrors what the remote store does with the same parameters, so adapters
//! that hold content locally answer queries identically.

use crate::filter::Filter;
use crate::query::{Aggregate, Deep, Query};
use crate::sort::{compare_items, SortKey};
use serde_json::{json, Value};
use std::collections::BTreeMap;

/// Run a collection query: filter, sort, page, deep modifiers, projection.
/// An aggregate query returns a single row holding the aggregate.
pub fn apply(rows: &[Value], query: &Query) -> Vec<Value> {
    let matching: Vec<Value> = rows
        .iter()
        .filter(|row| query.filter.as_ref().map_or(true, |f| f.matches(row)))
        .cloned()
        .collect();

    if let Some(Aggregate::Count(field)) = &query.aggregate {
        let count = if field == "*" {
            matching.len()
        } else {
            matching
                .iter()
                .filter(|row| row.get(field).is_some_and(|v| !v.is_null()))
                .count()
        };
        let value = if field == "*" {
            json!({ "count": count })
        } else {
            let mut per_field = serde_json::Map::new();
            per_field.insert(field.clone(), Value::from(count));
            json!({ "count": per_field })
        };
        return vec![value];
    }

    select(matching, None, &query.sort, query.limit, query.page)
        .into_iter()
        .map(|row| shape(row, query))
        .collect()
}

/// Apply deep modifiers and projection to a single item.
pub fn apply_one(row: &Value, query: &Query) -> Value {
    shape(row.clone(), query)
}

fn shape(mut row: Value, query: &Query) -> Value {
    apply_deep(&mut row, &query.deep);
    match &query.fields {
        Some(fields) => fields.project(&row),
        None => row,
    }
}

fn select(
    rows: Vec<Value>,
    filter: Option<&Filter>,
    sort: &[SortKey],
    limit: Option<u32>,
    page: Option<u32>,
) -> Vec<Value> {
    let mut rows: Vec<Value> = match filter {
        Some(filter) => rows.into_iter().filter(|row| filter.matches(row)).collect(),
        None => rows,
    };
    if !sort.is_empty() {
        rows.sort_by(|a, b| compare_items(a, b, sort));
    }
    match limit {
        Some(limit) => {
            let limit = limit as usize;
            let offset = (page.unwrap_or(1).max(1) as usize - 1) * limit;
            rows.into_iter().skip(offset).take(limit).collect()
        }
        None => rows,
    }
}

fn apply_deep(row: &mut Value, deep: &BTreeMap<String, Deep>) {
    let Some(object) = row.as_object_mut() else {
        return;
    };
    for (relation, modifiers) in deep {
        match object.get_mut(relation) {
            Some(Value::Array(items)) => {
                let selected = select(
                    std::mem::take(items),
                    modifiers.filter.as_ref(),
                    &modifiers.sort,
                    modifiers.limit,
                    None,
                );
                *items = selected;
                for item in items.iter_mut() {
                    apply_deep(item, &modifiers.nested);
                }
            }
            Some(nested @ Value::Object(_)) => apply_deep(nested, &modifiers.nested),
            _ => {}
        }
    }
}
