//! Field selections.
//!
//! A [`Selection`] describes which fields to request from the store, including
//! nested relation sub-selections and many-to-any relations whose sub-selection
//! depends on the related item's collection.

use serde_json::{Map, Value};

/// One node of a field selection tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Field {
    /// A plain field. `*` selects every field at this level.
    Scalar(String),
    /// A relation with its own sub-selection.
    Relation { name: String, fields: Selection },
    /// A many-to-any relation: the sub-selection is chosen per collection,
    /// using the sibling `collection` field of the enclosing item.
    Union { name: String, variants: Vec<Variant> },
}

/// Sub-selection for one collection of a many-to-any relation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Variant {
    pub collection: String,
    pub fields: Selection,
}

/// An ordered set of fields to request.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Selection {
    fields: Vec<Field>,
}

impl Selection {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add plain fields.
    pub fn scalars(mut self, names: &[&str]) -> Self {
        self.fields
            .extend(names.iter().map(|name| Field::Scalar((*name).to_string())));
        self
    }

    /// Add a relation with a sub-selection.
    pub fn relation(mut self, name: impl Into<String>, fields: Selection) -> Self {
        self.fields.push(Field::Relation {
            name: name.into(),
            fields,
        });
        self
    }

    /// Add a many-to-any relation.
    pub fn union<I, C>(mut self, name: impl Into<String>, variants: I) -> Self
    where
        I: IntoIterator<Item = (C, Selection)>,
        C: Into<String>,
    {
        self.fields.push(Field::Union {
            name: name.into(),
            variants: variants
                .into_iter()
                .map(|(collection, fields)| Variant {
                    collection: collection.into(),
                    fields,
                })
                .collect(),
        });
        self
    }

    pub fn fields(&self) -> &[Field] {
        &self.fields
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Flatten into the store's dotted field list.
    ///
    /// Relations become `relation.field`; many-to-any variants become
    /// `relation:collection.field`.
    pub fn paths(&self) -> Vec<String> {
        let mut out = Vec::new();
        collect_paths(&self.fields, "", &mut out);
        out
    }

    /// Keep only the selected fields of an item (or of each item of an array).
    pub fn project(&self, value: &Value) -> Value {
        match value {
            Value::Array(items) => Value::Array(items.iter().map(|v| self.project(v)).collect()),
            Value::Object(object) => Value::Object(self.project_object(object)),
            other => other.clone(),
        }
    }

    fn project_object(&self, object: &Map<String, Value>) -> Map<String, Value> {
        let mut out = Map::new();
        for field in &self.fields {
            match field {
                Field::Scalar(name) if name == "*" => {
                    for (key, value) in object {
                        out.entry(key.clone()).or_insert_with(|| value.clone());
                    }
                }
                Field::Scalar(name) => {
                    if let Some(value) = object.get(name) {
                        out.insert(name.clone(), value.clone());
                    }
                }
                Field::Relation { name, fields } => {
                    if let Some(value) = object.get(name) {
                        out.insert(name.clone(), fields.project(value));
                    }
                }
                Field::Union { name, variants } => {
                    let Some(value) = object.get(name) else {
                        continue;
                    };
                    let tag = object.get("collection").and_then(Value::as_str);
                    let projected = variants
                        .iter()
                        .find(|variant| Some(variant.collection.as_str()) == tag)
                        .map(|variant| variant.fields.project(value))
                        .unwrap_or_else(|| value.clone());
                    out.insert(name.clone(), projected);
                }
            }
        }
        out
    }
}

fn collect_paths(fields: &[Field], prefix: &str, out: &mut Vec<String>) {
    for field in fields {
        match field {
            Field::Scalar(name) => out.push(format!("{prefix}{name}")),
            Field::Relation { name, fields } if fields.is_empty() => {
                out.push(format!("{prefix}{name}"));
            }
            Field::Relation { name, fields } => {
                collect_paths(&fields.fields, &format!("{prefix}{name}."), out);
            }
            Field::Union { name, variants } => {
                for variant in variants {
                    let nested = format!("{prefix}{name}:{}.", variant.collection);
                    collect_paths(&variant.fields.fields, &nested, out);
                }
            }
        }
    }
}
