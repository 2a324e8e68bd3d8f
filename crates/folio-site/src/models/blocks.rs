//! Block variant payloads.
//!
//! Each struct is the `item` of a page block for one block collection.

use super::post::PostSummary;
use serde::{Deserialize, Serialize};

/// Link target for a page reference.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PageLink {
    pub permalink: Option<String>,
}

/// Link target for a post reference.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PostLink {
    pub slug: Option<String>,
}

/// A call-to-action button.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Button {
    #[serde(default, deserialize_with = "crate::models::deserialize_optional_id")]
    pub id: Option<String>,
    #[serde(default)]
    pub label: Option<String>,
    #[serde(default)]
    pub variant: Option<String>,
    /// `page`, `post`, or `url`
    #[serde(default, rename = "type")]
    pub kind: Option<String>,
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default)]
    pub page: Option<PageLink>,
    #[serde(default)]
    pub post: Option<PostLink>,
}

impl Button {
    /// Where the button points, by link type.
    pub fn href(&self) -> Option<String> {
        match self.kind.as_deref() {
            Some("page") => self.page.as_ref().and_then(|p| p.permalink.clone()),
            Some("post") => self
                .post
                .as_ref()
                .and_then(|p| p.slug.as_ref())
                .map(|slug| format!("/blog/{slug}")),
            _ => self.url.clone(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ButtonGroup {
    #[serde(default, deserialize_with = "crate::models::deserialize_optional_id")]
    pub id: Option<String>,
    #[serde(default, deserialize_with = "crate::models::nullable_list")]
    pub buttons: Vec<Button>,
}

/// `block_richtext`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RichTextBlock {
    #[serde(default, deserialize_with = "crate::models::deserialize_optional_id")]
    pub id: Option<String>,
    #[serde(default)]
    pub tagline: Option<String>,
    #[serde(default)]
    pub headline: Option<String>,
    #[serde(default)]
    pub content: Option<String>,
    #[serde(default)]
    pub alignment: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GalleryItem {
    #[serde(default, deserialize_with = "crate::models::deserialize_optional_id")]
    pub id: Option<String>,
    /// File id of the image
    #[serde(default)]
    pub directus_file: Option<String>,
    #[serde(default)]
    pub sort: Option<i64>,
}

/// `block_gallery`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GalleryBlock {
    #[serde(default, deserialize_with = "crate::models::deserialize_optional_id")]
    pub id: Option<String>,
    #[serde(default)]
    pub tagline: Option<String>,
    #[serde(default)]
    pub headline: Option<String>,
    #[serde(default, deserialize_with = "crate::models::nullable_list")]
    pub items: Vec<GalleryItem>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PricingCard {
    #[serde(default, deserialize_with = "crate::models::deserialize_optional_id")]
    pub id: Option<String>,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub price: Option<String>,
    #[serde(default)]
    pub badge: Option<String>,
    #[serde(default, deserialize_with = "crate::models::nullable_list")]
    pub features: Vec<String>,
    #[serde(default, deserialize_with = "crate::models::null_as_default")]
    pub is_highlighted: bool,
    #[serde(default)]
    pub button: Option<Button>,
}

/// `block_pricing`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PricingBlock {
    #[serde(default, deserialize_with = "crate::models::deserialize_optional_id")]
    pub id: Option<String>,
    #[serde(default)]
    pub tagline: Option<String>,
    #[serde(default)]
    pub headline: Option<String>,
    #[serde(default, deserialize_with = "crate::models::nullable_list")]
    pub pricing_cards: Vec<PricingCard>,
}

/// `block_hero`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct HeroBlock {
    #[serde(default, deserialize_with = "crate::models::deserialize_optional_id")]
    pub id: Option<String>,
    #[serde(default)]
    pub tagline: Option<String>,
    #[serde(default)]
    pub headline: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub layout: Option<String>,
    #[serde(default)]
    pub image: Option<String>,
    #[serde(default)]
    pub button_group: Option<ButtonGroup>,
}

/// `block_posts`
///
/// `posts` is empty as stored; the block enricher fills it.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PostsBlock {
    #[serde(default, deserialize_with = "crate::models::deserialize_optional_id")]
    pub id: Option<String>,
    #[serde(default)]
    pub tagline: Option<String>,
    #[serde(default)]
    pub headline: Option<String>,
    #[serde(default)]
    pub collection: Option<String>,
    #[serde(default)]
    pub limit: Option<u32>,
    #[serde(default, deserialize_with = "crate::models::nullable_list")]
    pub posts: Vec<PostSummary>,
}

impl PostsBlock {
    pub const DEFAULT_LIMIT: u32 = 6;

    /// Posts to show per page. Unset or zero falls back to [`Self::DEFAULT_LIMIT`].
    pub fn page_size(&self) -> u32 {
        self.limit
            .filter(|limit| *limit > 0)
            .unwrap_or(Self::DEFAULT_LIMIT)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FormField {
    #[serde(default, deserialize_with = "crate::models::deserialize_optional_id")]
    pub id: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default, rename = "type")]
    pub kind: Option<String>,
    #[serde(default)]
    pub label: Option<String>,
    #[serde(default)]
    pub placeholder: Option<String>,
    #[serde(default)]
    pub help: Option<String>,
    #[serde(default)]
    pub validation: Option<String>,
    #[serde(default)]
    pub width: Option<String>,
    #[serde(default)]
    pub choices: Option<serde_json::Value>,
    #[serde(default, deserialize_with = "crate::models::null_as_default")]
    pub required: bool,
    #[serde(default)]
    pub sort: Option<i64>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Form {
    #[serde(default, deserialize_with = "crate::models::deserialize_optional_id")]
    pub id: Option<String>,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub submit_label: Option<String>,
    #[serde(default)]
    pub success_message: Option<String>,
    #[serde(default)]
    pub on_success: Option<String>,
    #[serde(default)]
    pub success_redirect_url: Option<String>,
    #[serde(default)]
    pub is_active: Option<bool>,
    #[serde(default, deserialize_with = "crate::models::nullable_list")]
    pub fields: Vec<FormField>,
}

/// `block_form`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FormBlock {
    #[serde(default, deserialize_with = "crate::models::deserialize_optional_id")]
    pub id: Option<String>,
    #[serde(default)]
    pub tagline: Option<String>,
    #[serde(default)]
    pub headline: Option<String>,
    #[serde(default)]
    pub form: Option<Form>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn button_href_follows_link_type() {
        let page: Button = serde_json::from_value(json!({
            "type": "page", "page": { "permalink": "/pricing" }, "url": "https://ignored"
        }))
        .unwrap();
        let post: Button =
            serde_json::from_value(json!({ "type": "post", "post": { "slug": "launch" } })).unwrap();
        let url: Button =
            serde_json::from_value(json!({ "type": "url", "url": "https://example.com" })).unwrap();

        assert_eq!(page.href().as_deref(), Some("/pricing"));
        assert_eq!(post.href().as_deref(), Some("/blog/launch"));
        assert_eq!(url.href().as_deref(), Some("https://example.com"));
    }

    #[test]
    fn posts_block_page_size_defaults() {
        let unset = PostsBlock::default();
        let zero = PostsBlock {
            limit: Some(0),
            ..Default::default()
        };
        let three = PostsBlock {
            limit: Some(3),
            ..Default::default()
        };

        assert_eq!(unset.page_size(), 6);
        assert_eq!(zero.page_size(), 6);
        assert_eq!(three.page_size(), 3);
    }
}
