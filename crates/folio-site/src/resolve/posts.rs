//! Post resolution and blog listings.

use super::{bearer, decode, decode_all, degrade, fail, require, ContentResolver, Operation};
use crate::error::{Error, Result};
use crate::models::{PostPage, PostSummary, PUBLISHED};
use crate::schema::{self, collections};
use crate::store::StoreError;
use folio_query::{Filter, Query, SortKey};
use serde_json::Value;

/// How many related posts accompany a post.
const RELATED_POSTS: u32 = 2;

/// Access context for a slug lookup.
#[derive(Debug, Clone, Copy, Default)]
pub struct PostLookup<'a> {
    /// Drafts are visible (the token must grant it)
    pub draft: bool,
    pub token: Option<&'a str>,
}

fn published() -> Filter {
    Filter::eq("status", PUBLISHED)
}

/// Published posts other than `slug`.
fn related_query(slug: &str) -> Query {
    Query::new()
        .fields(schema::related_post_fields())
        .filter(Filter::neq("slug", slug).and(published()))
        .limit(RELATED_POSTS)
}

impl ContentResolver {
    /// A post and its related posts. `None` when no post matches.
    ///
    /// Without draft context only published posts match.
    pub async fn resolve_post_by_slug(
        &self,
        slug: &str,
        lookup: PostLookup<'_>,
    ) -> Result<Option<PostPage>> {
        let operation = Operation::ResolvePostBySlug;
        let slug = require("slug", slug)?;
        let token = bearer(lookup.token);

        let mut filter = Filter::eq("slug", slug);
        if !lookup.draft {
            filter = filter.and(published());
        }
        let post_query = Query::new()
            .fields(schema::post_fields())
            .filter(filter)
            .limit(1);
        let related_query = related_query(slug);

        let (posts, related) = tokio::try_join!(
            self.items(operation, collections::POSTS, &post_query, token),
            self.items(operation, collections::POSTS, &related_query, token),
        )?;

        let Some(row) = posts.into_iter().next() else {
            return Ok(None);
        };
        Ok(Some(PostPage {
            post: decode(operation, row)?,
            related_posts: decode_all(operation, related)?,
        }))
    }

    /// A post at a content version, with posts related to `slug`.
    pub async fn resolve_post_by_id_and_version(
        &self,
        id: &str,
        version: &str,
        slug: &str,
        token: Option<&str>,
    ) -> Result<PostPage> {
        let operation = Operation::ResolvePostByIdAndVersion;
        let id = require("id", id)?;
        let version = require("version", version)?;
        let slug = require("slug", slug)?;
        let token = bearer(token);

        let post_query = Query::new()
            .fields(schema::post_fields())
            .version(version);
        let related_query = related_query(slug);

        let (post, related) = tokio::try_join!(
            self.item(operation, collections::POSTS, id, &post_query, token),
            self.items(operation, collections::POSTS, &related_query, token),
        )?;

        let row = post.ok_or_else(|| Error::NotFound(format!("post {id} at version {version}")))?;
        Ok(PostPage {
            post: decode(operation, row)?,
            related_posts: decode_all(operation, related)?,
        })
    }

    /// One page of published posts, newest first.
    pub async fn list_paginated_posts(&self, limit: u32, page: u32) -> Result<Vec<PostSummary>> {
        let operation = Operation::ListPaginatedPosts;
        if limit == 0 {
            return Err(Error::InvalidArgument("limit must be positive".into()));
        }
        if page == 0 {
            return Err(Error::InvalidArgument("page must be positive".into()));
        }

        let query = Query::new()
            .fields(schema::post_summary_fields())
            .filter(published())
            .sort(SortKey::desc("published_at"))
            .limit(limit)
            .page(page);

        let rows = self.items(operation, collections::POSTS, &query, None).await?;
        decode_all(operation, rows)
    }

    /// Number of published posts. Any failure counts as zero.
    pub async fn count_published_posts(&self) -> u64 {
        let operation = Operation::CountPublishedPosts;
        let query = Query::new().filter(published()).count("*");

        let counted = match self.items(operation, collections::POSTS, &query, None).await {
            Ok(rows) => rows
                .first()
                .and_then(|row| row.get("count"))
                .and_then(parse_count)
                .ok_or_else(|| {
                    fail(operation, StoreError::Malformed("missing or unreadable count".into()))
                }),
            Err(e) => Err(e),
        };
        degrade(counted, 0)
    }

    /// Id of the post with `slug`, in any publish state.
    /// Store failures read as absence.
    pub async fn lookup_post_id_by_slug(
        &self,
        slug: &str,
        token: Option<&str>,
    ) -> Result<Option<String>> {
        let operation = Operation::LookupPostId;
        let slug = require("slug", slug)?;

        let query = Query::new()
            .fields(schema::id_fields())
            .filter(Filter::eq("slug", slug))
            .limit(1);

        let found = self
            .first_id(operation, collections::POSTS, &query, bearer(token))
            .await;
        Ok(degrade(found, None))
    }
}

/// Counts arrive as numbers, numeric strings, or `{ "<field>": n }`.
fn parse_count(value: &Value) -> Option<u64> {
    match value {
        Value::Number(n) => n.as_u64(),
        Value::String(s) => s.trim().parse().ok(),
        Value::Object(fields) => fields.values().next().and_then(parse_count),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixtures::{sample_store, unreachable_store, CountingStore, FailingStore};
    use crate::store::MemoryStore;
    use serde_json::json;
    use std::sync::Arc;

    fn resolver() -> ContentResolver {
        ContentResolver::new(Arc::new(sample_store()))
    }

    #[tokio::test]
    async fn post_comes_with_two_other_related_posts() {
        let page = resolver()
            .resolve_post_by_slug("abc", PostLookup::default())
            .await
            .unwrap()
            .unwrap();

        assert_eq!(page.post.slug, "abc");
        assert_eq!(page.post.author.unwrap().first_name.as_deref(), Some("Ada"));
        assert_eq!(page.related_posts.len(), 2);
        assert!(page.related_posts.iter().all(|p| p.slug != "abc"));
    }

    #[tokio::test]
    async fn drafts_need_draft_context() {
        let resolver = resolver();

        let public = resolver
            .resolve_post_by_slug("wip", PostLookup::default())
            .await
            .unwrap();
        assert!(public.is_none());

        let draft = resolver
            .resolve_post_by_slug("wip", PostLookup { draft: true, token: Some("editor") })
            .await
            .unwrap();
        assert_eq!(draft.unwrap().post.slug, "wip");
    }

    #[tokio::test]
    async fn related_posts_are_published() {
        let page = resolver()
            .resolve_post_by_id_and_version("wip", "v2", "wip", Some("editor"))
            .await
            .unwrap();

        assert_eq!(page.post.title.as_deref(), Some("Work in progress (v2)"));
        assert_eq!(page.related_posts.len(), 2);
        assert!(page.related_posts.iter().all(|p| p.slug != "wip"));
    }

    #[tokio::test]
    async fn missing_version_is_not_found() {
        let err = resolver()
            .resolve_post_by_id_and_version("abc", "v9", "abc", None)
            .await
            .unwrap_err();
        assert!(err.is_not_found());
    }

    #[tokio::test]
    async fn blank_keys_never_reach_the_store() {
        let store = CountingStore::new(sample_store());
        let resolver = ContentResolver::new(store.clone());

        assert!(resolver
            .resolve_post_by_id_and_version("", "v2", "abc", None)
            .await
            .unwrap_err()
            .is_invalid_argument());
        assert!(resolver
            .resolve_post_by_id_and_version("abc", "  ", "abc", None)
            .await
            .unwrap_err()
            .is_invalid_argument());
        assert!(resolver
            .resolve_post_by_slug(" ", PostLookup::default())
            .await
            .unwrap_err()
            .is_invalid_argument());
        assert!(resolver
            .lookup_post_id_by_slug("", None)
            .await
            .unwrap_err()
            .is_invalid_argument());
        assert!(resolver.list_paginated_posts(0, 1).await.unwrap_err().is_invalid_argument());
        assert_eq!(store.calls(), 0);
    }

    #[tokio::test]
    async fn pages_are_newest_first() {
        let resolver = resolver();
        let first = resolver.list_paginated_posts(2, 1).await.unwrap();
        let third = resolver.list_paginated_posts(2, 3).await.unwrap();

        let slugs: Vec<&str> = first.iter().map(|p| p.slug.as_str()).collect();
        assert_eq!(slugs, vec!["abc", "bcd"]);
        assert_eq!(third.len(), 1);
        assert_eq!(third[0].slug, "efg");
    }

    #[tokio::test]
    async fn null_slugs_do_not_break_listings() {
        let store = MemoryStore::new().with_items(
            collections::POSTS,
            [
                json!({ "id": "p1", "slug": "abc", "status": "published", "published_at": "2024-02-01" }),
                json!({ "id": "p2", "slug": null, "status": "published", "published_at": "2024-01-01" }),
            ],
        );
        let resolver = ContentResolver::new(Arc::new(store));

        let page = resolver
            .resolve_post_by_slug("abc", PostLookup::default())
            .await
            .unwrap()
            .unwrap();
        assert_eq!(page.related_posts.len(), 1);
        assert_eq!(page.related_posts[0].slug, "");

        let listed = resolver.list_paginated_posts(6, 1).await.unwrap();
        assert_eq!(listed.len(), 2);
    }

    #[tokio::test]
    async fn counts_published_posts() {
        assert_eq!(resolver().count_published_posts().await, 5);
    }

    #[tokio::test]
    async fn count_is_zero_when_store_is_unreachable() {
        let resolver = ContentResolver::new(Arc::new(unreachable_store()));
        assert_eq!(resolver.count_published_posts().await, 0);

        let failing = ContentResolver::new(Arc::new(FailingStore));
        assert_eq!(failing.count_published_posts().await, 0);
    }

    #[tokio::test]
    async fn lookup_post_id() {
        let resolver = resolver();
        assert_eq!(
            resolver.lookup_post_id_by_slug("wip", Some("editor")).await.unwrap().as_deref(),
            Some("wip")
        );
        assert_eq!(resolver.lookup_post_id_by_slug("nope", None).await.unwrap(), None);
    }

    #[test]
    fn count_shapes() {
        assert_eq!(parse_count(&json!(4)), Some(4));
        assert_eq!(parse_count(&json!("12")), Some(12));
        assert_eq!(parse_count(&json!({ "*": "3" })), Some(3));
        assert_eq!(parse_count(&json!(null)), None);
    }
}
