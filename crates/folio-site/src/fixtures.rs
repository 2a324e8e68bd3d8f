//! Shared test content and store doubles.

use crate::schema::collections;
use crate::store::{ContentStore, HttpStore, MemoryStore, StoreError, StoreResult};
use async_trait::async_trait;
use folio_query::Query;
use serde_json::{json, Value};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

fn block(id: &str, sort: i64, hide: bool, collection: &str, item: Value) -> Value {
    json!({ "id": id, "sort": sort, "hide": hide, "background": null, "collection": collection, "item": item })
}

fn pages() -> Vec<Value> {
    vec![
        json!({
            "id": "home",
            "title": "Home",
            "permalink": "/",
            "status": "published",
            "seo": { "title": "Welcome", "meta_description": "Folio home", "no_index": false },
            "blocks": [
                block("b-late", 2, false, "block_richtext",
                    json!({ "id": "rt1", "headline": "About us", "content": "<p>Hi</p>" })),
                block("b-hidden", 1, true, "block_hero",
                    json!({ "id": "h1", "headline": "Hidden hero" })),
                block("b-first", 0, false, "block_posts",
                    json!({ "id": "pb1", "headline": "Latest", "collection": "posts", "limit": 3 })),
            ]
        }),
        json!({
            "id": "about",
            "title": "About",
            "permalink": "/about",
            "status": "published",
            "seo": { "title": "About Folio", "meta_description": "Who we are" },
            "blocks": [
                block("b-about", 0, false, "block_richtext",
                    json!({ "id": "rt2", "headline": "Our story" })),
            ]
        }),
        json!({
            "id": "pricing",
            "title": "Pricing",
            "permalink": "/pricing",
            "status": "draft",
            "seo": null,
            "blocks": [
                block("b-pricing", 0, false, "block_pricing",
                    json!({ "id": "pr1", "headline": "Plans", "pricing_cards": [] })),
            ]
        }),
        json!({
            "id": "empty",
            "title": "Empty",
            "permalink": "/empty",
            "status": "published",
            "seo": null,
            "blocks": []
        }),
    ]
}

fn post(slug: &str, title: &str, status: &str, published_at: &str) -> Value {
    json!({
        "id": slug,
        "title": title,
        "slug": slug,
        "status": status,
        "published_at": published_at,
        "description": format!("About {title}"),
        "content": "<p>Body</p>",
        "image": null,
        "author": { "id": "u1", "first_name": "Ada", "last_name": "Lovelace", "avatar": null },
        "seo": { "title": null, "meta_description": null },
    })
}

fn posts() -> Vec<Value> {
    vec![
        post("abc", "Launch day", "published", "2024-05-01T09:00:00Z"),
        post("bcd", "Roadmap", "published", "2024-04-01T09:00:00Z"),
        post("cde", "Release notes", "published", "2024-03-01T09:00:00Z"),
        post("def", "Hiring", "published", "2024-02-01T09:00:00Z"),
        post("efg", "Hello world", "published", "2024-01-01T09:00:00Z"),
        post("wip", "Work in progress", "draft", "2024-06-01T09:00:00Z"),
    ]
}

fn navigation() -> Vec<Value> {
    vec![
        json!({
            "id": "main",
            "title": "Main",
            "items": [
                { "id": 2, "title": "Blog", "url": "/blog", "page": null, "sort": 2, "children": [] },
                { "id": 1, "title": "About", "url": null, "page": { "permalink": "/about" }, "sort": 1,
                  "children": [
                      { "id": 4, "title": "Team", "url": "/about/team", "page": null, "sort": 2 },
                      { "id": 3, "title": "Story", "url": null, "page": { "permalink": "/about" }, "sort": 1 },
                  ] },
            ]
        }),
        json!({
            "id": "footer",
            "title": "Footer",
            "items": [
                { "id": 9, "title": "Privacy", "url": "/privacy", "page": null, "sort": 1, "children": [] },
            ]
        }),
    ]
}

fn redirects() -> Vec<Value> {
    vec![
        json!({ "id": 1, "url_from": "/old-about", "url_to": "/about", "response_code": "301" }),
        json!({ "id": 2, "url_from": "/promo", "url_to": "/pricing", "response_code": "302" }),
        json!({ "id": 3, "url_from": "/broken", "url_to": null, "response_code": "301" }),
    ]
}

/// A small site: four pages, five published posts and a draft, menus,
/// globals, redirects and one author.
pub fn sample_store() -> MemoryStore {
    MemoryStore::new()
        .with_items(collections::PAGES, pages())
        .with_items(collections::POSTS, posts())
        .with_items(collections::NAVIGATION, navigation())
        .with_items(collections::REDIRECTS, redirects())
        .with_items(
            collections::USERS,
            [json!({ "id": "u1", "first_name": "Ada", "last_name": "Lovelace", "avatar": "f-ada" })],
        )
        .with_singleton(
            collections::GLOBALS,
            json!({
                "title": "Folio",
                "tagline": "Sites from content",
                "description": "A demo site",
                "accent_color": "#6644ff",
                "social_links": [{ "service": "github", "url": "https://github.com/folio" }],
            }),
        )
        .with_version(collections::PAGES, "about", "v2", json!({ "title": "About (v2)" }))
        .with_version(collections::POSTS, "wip", "v2", json!({ "title": "Work in progress (v2)" }))
}

/// Counts every read before delegating.
pub struct CountingStore {
    inner: MemoryStore,
    calls: AtomicUsize,
}

impl CountingStore {
    pub fn new(inner: MemoryStore) -> Arc<Self> {
        Arc::new(Self {
            inner,
            calls: AtomicUsize::new(0),
        })
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    fn hit(&self) {
        self.calls.fetch_add(1, Ordering::SeqCst);
    }
}

#[async_trait]
impl ContentStore for CountingStore {
    async fn read_items(&self, collection: &str, query: &Query, token: Option<&str>) -> StoreResult<Vec<Value>> {
        self.hit();
        self.inner.read_items(collection, query, token).await
    }

    async fn read_item(
        &self,
        collection: &str,
        id: &str,
        query: &Query,
        token: Option<&str>,
    ) -> StoreResult<Option<Value>> {
        self.hit();
        self.inner.read_item(collection, id, query, token).await
    }

    async fn read_singleton(
        &self,
        collection: &str,
        query: &Query,
        token: Option<&str>,
    ) -> StoreResult<Option<Value>> {
        self.hit();
        self.inner.read_singleton(collection, query, token).await
    }
}

/// Fails every read with a 503.
pub struct FailingStore;

fn unavailable() -> StoreError {
    StoreError::Status {
        status: 503,
        message: "store unavailable".into(),
    }
}

#[async_trait]
impl ContentStore for FailingStore {
    async fn read_items(&self, _: &str, _: &Query, _: Option<&str>) -> StoreResult<Vec<Value>> {
        Err(unavailable())
    }

    async fn read_item(&self, _: &str, _: &str, _: &Query, _: Option<&str>) -> StoreResult<Option<Value>> {
        Err(unavailable())
    }

    async fn read_singleton(&self, _: &str, _: &Query, _: Option<&str>) -> StoreResult<Option<Value>> {
        Err(unavailable())
    }
}

/// An HTTP store pointed at a port nothing listens on.
pub fn unreachable_store() -> HttpStore {
    HttpStore::new("http://127.0.0.1:1", None, Duration::from_secs(2))
        .expect("static base url parses")
}
