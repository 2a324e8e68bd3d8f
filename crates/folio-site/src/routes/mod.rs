//! Route handling.
//!
//! A request becomes a [`RouteContext`]: the normalized key (permalink or
//! slug) plus the access context derived from its query parameters. The
//! handlers pick exactly one resolution path from it:
//!
//! 1. a fixed version and an id: fetch that id at that version
//! 2. a fixed version, no id: look the id up by key, then (1); no id found
//!    is not found, with no fallback
//! 3. no fixed version: fetch by key, drafts visible in draft context
//!
//! Every failure renders as [`Outcome::NotFound`].

mod pages;
mod posts;
mod redirects;

pub use pages::{page_metadata, render_page};
pub use posts::{post_metadata, render_blog_index, render_post, BlogIndex};
pub use redirects::resolve_redirect;

use crate::models::{Page, Post};
use folio_query::effective_version;
use serde::{Deserialize, Serialize};

/// Query parameters a content route accepts.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RouteParams {
    pub id: Option<String>,
    pub version: Option<String>,
    pub preview: Option<String>,
    pub token: Option<String>,
    /// Page of posts for posts blocks
    pub page: Option<u32>,
}

/// Where a route resolves from and with what visibility.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RouteContext {
    /// Normalized permalink or slug
    pub key: String,
    pub id: Option<String>,
    pub token: Option<String>,
    /// Drafts may be shown
    pub draft: bool,
    /// Version to read, never `main`
    pub fixed_version: Option<String>,
    pub post_page: u32,
}

/// Version names that mean the published content.
const PUBLISHED_VERSIONS: [&str; 2] = ["published", folio_query::MAIN_VERSION];

fn present(value: &Option<String>) -> Option<String> {
    value
        .as_deref()
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_string)
}

impl RouteContext {
    /// Context for a page at `path`.
    pub fn for_page(path: &str, params: &RouteParams) -> Self {
        Self::new(normalize_path(path), params)
    }

    /// Context for the post with `slug`.
    pub fn for_post(slug: &str, params: &RouteParams) -> Self {
        Self::new(slug.trim().trim_matches('/').to_string(), params)
    }

    fn new(key: String, params: &RouteParams) -> Self {
        let token = present(&params.token);
        let version = present(&params.version);
        let preview = params.preview.as_deref().map(str::trim) == Some("true");

        let unpublished_version = version
            .as_deref()
            .is_some_and(|v| !PUBLISHED_VERSIONS.contains(&v));
        let draft = (preview && token.is_some()) || unpublished_version || token.is_some();
        let fixed_version = version.filter(|v| effective_version(v).is_some());

        Self {
            key,
            id: present(&params.id),
            token,
            draft,
            fixed_version,
            post_page: params.page.unwrap_or(1).max(1),
        }
    }

    pub fn token(&self) -> Option<&str> {
        self.token.as_deref()
    }
}

/// `/`-rooted path without empty segments or a trailing slash.
pub fn normalize_path(path: &str) -> String {
    let segments: Vec<&str> = path.split('/').filter(|s| !s.is_empty()).collect();
    format!("/{}", segments.join("/"))
}

/// What a route renders.
#[derive(Debug, Clone, PartialEq)]
pub enum Outcome<T> {
    Found(T),
    NotFound,
}

impl<T> Outcome<T> {
    pub fn is_found(&self) -> bool {
        matches!(self, Outcome::Found(_))
    }

    pub fn into_option(self) -> Option<T> {
        match self {
            Outcome::Found(value) => Some(value),
            Outcome::NotFound => None,
        }
    }
}

/// Document metadata for a rendered route.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Metadata {
    pub title: Option<String>,
    pub description: Option<String>,
    pub og_image: Option<String>,
    pub no_index: bool,
}

impl Metadata {
    pub const PREVIEW_TITLE: &'static str = "Preview Mode";
    pub const PREVIEW_DESCRIPTION: &'static str = "Viewing draft content";

    /// Placeholder for draft and versioned views.
    pub fn preview() -> Self {
        Self {
            title: Some(Self::PREVIEW_TITLE.into()),
            description: Some(Self::PREVIEW_DESCRIPTION.into()),
            og_image: None,
            no_index: true,
        }
    }

    pub fn for_page(page: &Page) -> Self {
        let seo = page.seo.clone().unwrap_or_default();
        Self {
            title: seo.title.or_else(|| page.title.clone()),
            description: seo.meta_description,
            og_image: seo.og_image,
            no_index: seo.no_index.unwrap_or(false),
        }
    }

    pub fn for_post(post: &Post) -> Self {
        let seo = post.seo.clone().unwrap_or_default();
        Self {
            title: seo.title.or_else(|| post.title.clone()),
            description: seo.meta_description.or_else(|| post.description.clone()),
            og_image: seo.og_image.or_else(|| post.image.clone()),
            no_index: seo.no_index.unwrap_or(false),
        }
    }
}
