//! Blog post models.

use super::page::Seo;
use super::{deserialize_id, deserialize_optional_id};
use serde::{Deserialize, Serialize};

/// A post author (a store user).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Author {
    #[serde(default, deserialize_with = "deserialize_optional_id")]
    pub id: Option<String>,
    #[serde(default)]
    pub first_name: Option<String>,
    #[serde(default)]
    pub last_name: Option<String>,
    /// File id of the avatar image
    #[serde(default)]
    pub avatar: Option<String>,
}

impl Author {
    /// First and last name joined, skipping missing parts.
    pub fn display_name(&self) -> Option<String> {
        let parts: Vec<&str> = [self.first_name.as_deref(), self.last_name.as_deref()]
            .into_iter()
            .flatten()
            .filter(|part| !part.trim().is_empty())
            .collect();
        (!parts.is_empty()).then(|| parts.join(" "))
    }
}

/// A full blog post.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Post {
    #[serde(deserialize_with = "deserialize_id")]
    pub id: String,

    #[serde(default)]
    pub title: Option<String>,

    /// Unique, used for routing
    #[serde(default, deserialize_with = "super::null_as_default")]
    pub slug: String,

    #[serde(default)]
    pub status: Option<String>,

    /// ISO 8601 timestamp; newest first in listings
    #[serde(default)]
    pub published_at: Option<String>,

    #[serde(default)]
    pub description: Option<String>,

    #[serde(default)]
    pub content: Option<String>,

    #[serde(default)]
    pub image: Option<String>,

    #[serde(default)]
    pub author: Option<Author>,

    #[serde(default)]
    pub seo: Option<Seo>,
}

/// A post in listing form (blog index, posts blocks, related posts).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PostSummary {
    #[serde(deserialize_with = "deserialize_id")]
    pub id: String,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default, deserialize_with = "super::null_as_default")]
    pub slug: String,
    #[serde(default)]
    pub image: Option<String>,
    #[serde(default)]
    pub published_at: Option<String>,
}

/// A post together with its related posts.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PostPage {
    pub post: Post,
    pub related_posts: Vec<PostSummary>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn author_display_name() {
        let full = Author {
            first_name: Some("Ada".into()),
            last_name: Some("Lovelace".into()),
            ..Default::default()
        };
        let first_only = Author {
            first_name: Some("Ada".into()),
            last_name: Some(" ".into()),
            ..Default::default()
        };

        assert_eq!(full.display_name().as_deref(), Some("Ada Lovelace"));
        assert_eq!(first_only.display_name().as_deref(), Some("Ada"));
        assert_eq!(Author::default().display_name(), None);
    }

    #[test]
    fn post_decodes_expanded_author() {
        let post: Post = serde_json::from_value(json!({
            "id": 9,
            "title": "Launch",
            "slug": "launch",
            "status": "published",
            "published_at": "2024-05-01T09:00:00Z",
            "author": { "id": "u1", "first_name": "Grace", "last_name": "Hopper", "avatar": null },
        }))
        .unwrap();

        assert_eq!(post.id, "9");
        assert_eq!(post.author.unwrap().first_name.as_deref(), Some("Grace"));
    }
}
