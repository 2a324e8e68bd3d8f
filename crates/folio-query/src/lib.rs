//! Folio Query
//!
//! The query language spoken to a headless CMS content store.
//!
//! # Building blocks
//!
//! - [`Filter`]: field/operator/value triples (`_eq`, `_neq`, `_nnull`,
//!   `_icontains`) combined with `_and` / `_or`
//! - [`Selection`]: nested field selections, including many-to-any
//!   relations keyed by the related item's collection
//! - [`SortKey`]: `field` ascending, `-field` descending
//! - [`Deep`]: per-relation filter/sort/limit on nested arrays
//! - [`Query`]: all of the above plus paging, content version, and aggregates
//!
//! Queries encode to URL parameters with [`Query::to_params`] and can be
//! evaluated locally over JSON rows with [`eval::apply`].

pub mod eval;
mod fields;
mod filter;
mod query;
mod sort;

pub use fields::{Field, Selection, Variant};
pub use filter::Filter;
pub use query::{effective_version, Aggregate, Deep, Query, MAIN_VERSION};
pub use sort::{compare_items, SortKey};
