//! Navigation menus.

use super::blocks::PageLink;
use super::{deserialize_id, deserialize_optional_id};
use serde::{Deserialize, Serialize};

/// A named menu (`main` or `footer`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Navigation {
    #[serde(deserialize_with = "deserialize_id")]
    pub id: String,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default, deserialize_with = "crate::models::nullable_list")]
    pub items: Vec<NavigationItem>,
}

impl Navigation {
    pub const MAIN: &'static str = "main";
    pub const FOOTER: &'static str = "footer";
}

/// A menu entry. Children are one level deep.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct NavigationItem {
    #[serde(default, deserialize_with = "deserialize_optional_id")]
    pub id: Option<String>,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default)]
    pub page: Option<PageLink>,
    #[serde(default, deserialize_with = "crate::models::nullable_list")]
    pub children: Vec<NavigationItem>,
}

impl NavigationItem {
    /// The linked page's permalink, else the external URL.
    pub fn href(&self) -> Option<&str> {
        self.page
            .as_ref()
            .and_then(|page| page.permalink.as_deref())
            .or(self.url.as_deref())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn href_prefers_page_permalink() {
        let nav: Navigation = serde_json::from_value(json!({
            "id": "main",
            "items": [
                { "id": 1, "title": "About", "url": "https://old", "page": { "permalink": "/about" } },
                { "id": 2, "title": "Docs", "url": "https://docs.example.com", "page": null,
                  "children": [{ "id": 3, "title": "API", "page": { "permalink": "/api" } }] },
            ]
        }))
        .unwrap();

        assert_eq!(nav.items[0].href(), Some("/about"));
        assert_eq!(nav.items[1].href(), Some("https://docs.example.com"));
        assert_eq!(nav.items[1].children[0].href(), Some("/api"));
    }
}
