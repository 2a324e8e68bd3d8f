//! Search results.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HitKind {
    Page,
    Post,
}

/// One match from a site search.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchHit {
    pub id: String,
    pub kind: HitKind,
    pub title: Option<String>,
    pub description: Option<String>,
    /// Route to the hit: the page permalink or `/blog/<slug>`
    pub link: String,
}
