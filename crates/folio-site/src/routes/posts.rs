//! Blog routes.

use super::{Metadata, Outcome, RouteContext};
use crate::error::Result;
use crate::models::{PostPage, PostSummary};
use crate::resolve::{ContentResolver, PostLookup};
use serde::Serialize;

async fn resolve(resolver: &ContentResolver, ctx: &RouteContext) -> Result<Option<PostPage>> {
    let token = ctx.token();
    match (&ctx.fixed_version, &ctx.id) {
        (Some(version), Some(id)) => resolver
            .resolve_post_by_id_and_version(id, version, &ctx.key, token)
            .await
            .map(Some),
        (Some(version), None) => match resolver.lookup_post_id_by_slug(&ctx.key, token).await? {
            Some(id) => resolver
                .resolve_post_by_id_and_version(&id, version, &ctx.key, token)
                .await
                .map(Some),
            None => Ok(None),
        },
        (None, _) => {
            let lookup = PostLookup {
                draft: ctx.draft,
                token,
            };
            resolver.resolve_post_by_slug(&ctx.key, lookup).await
        }
    }
}

/// The post view for a route.
pub async fn render_post(resolver: &ContentResolver, ctx: &RouteContext) -> Outcome<PostPage> {
    match resolve(resolver, ctx).await {
        Ok(Some(page)) => Outcome::Found(page),
        Ok(None) => Outcome::NotFound,
        Err(e) if e.is_not_found() => Outcome::NotFound,
        Err(e) => {
            tracing::warn!(slug = %ctx.key, error = %e, "Post route failed");
            Outcome::NotFound
        }
    }
}

/// Metadata for a post route. `None` when the post cannot be resolved.
pub async fn post_metadata(resolver: &ContentResolver, ctx: &RouteContext) -> Option<Metadata> {
    if ctx.draft || ctx.fixed_version.is_some() {
        return Some(Metadata::preview());
    }
    match resolver.resolve_post_by_slug(&ctx.key, PostLookup::default()).await {
        Ok(Some(page)) => Some(Metadata::for_post(&page.post)),
        Ok(None) => None,
        Err(e) => {
            tracing::debug!(slug = %ctx.key, error = %e, "No post metadata");
            None
        }
    }
}

/// One page of the blog index.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BlogIndex {
    pub posts: Vec<PostSummary>,
    pub page: u32,
    pub total_pages: u64,
    pub total_posts: u64,
}

/// Page `page` (default 1) of the blog index. A page past the last one is
/// not found; an empty or uncountable blog still renders its first page.
pub async fn render_blog_index(
    resolver: &ContentResolver,
    page: Option<u32>,
    per_page: u32,
) -> Outcome<BlogIndex> {
    let page = page.unwrap_or(1);
    if page == 0 || per_page == 0 {
        return Outcome::NotFound;
    }

    let (posts, total_posts) = tokio::join!(
        resolver.list_paginated_posts(per_page, page),
        resolver.count_published_posts(),
    );
    let total_pages = total_posts.div_ceil(u64::from(per_page)).max(1);
    if total_posts > 0 && u64::from(page) > total_pages {
        return Outcome::NotFound;
    }

    match posts {
        Ok(posts) => Outcome::Found(BlogIndex {
            posts,
            page,
            total_pages,
            total_posts,
        }),
        Err(e) => {
            tracing::warn!(page, error = %e, "Blog index failed");
            Outcome::NotFound
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixtures::{sample_store, FailingStore};
    use crate::routes::RouteParams;
    use std::sync::Arc;

    fn resolver() -> ContentResolver {
        ContentResolver::new(Arc::new(sample_store()))
    }

    fn ctx(slug: &str, id: Option<&str>, version: Option<&str>, token: Option<&str>) -> RouteContext {
        RouteContext::for_post(
            slug,
            &RouteParams {
                id: id.map(str::to_string),
                version: version.map(str::to_string),
                token: token.map(str::to_string),
                ..Default::default()
            },
        )
    }

    #[tokio::test]
    async fn published_post_renders() {
        let page = render_post(&resolver(), &ctx("abc", None, None, None))
            .await
            .into_option()
            .unwrap();
        assert_eq!(page.post.title.as_deref(), Some("Launch day"));
        assert_eq!(page.related_posts.len(), 2);
    }

    #[tokio::test]
    async fn draft_post_with_token() {
        let resolver = resolver();
        assert_eq!(render_post(&resolver, &ctx("wip", None, None, None)).await, Outcome::NotFound);
        assert!(render_post(&resolver, &ctx("wip", None, None, Some("editor"))).await.is_found());
    }

    #[tokio::test]
    async fn versioned_post_by_lookup() {
        let page = render_post(&resolver(), &ctx("wip", None, Some("v2"), Some("editor")))
            .await
            .into_option()
            .unwrap();
        assert_eq!(page.post.title.as_deref(), Some("Work in progress (v2)"));

        let missing = render_post(&resolver(), &ctx("nothing", None, Some("v2"), None)).await;
        assert_eq!(missing, Outcome::NotFound);
    }

    #[tokio::test]
    async fn post_metadata_falls_back_to_post_fields() {
        let meta = post_metadata(&resolver(), &ctx("abc", None, None, None)).await.unwrap();
        assert_eq!(meta.title.as_deref(), Some("Launch day"));
        assert_eq!(meta.description.as_deref(), Some("About Launch day"));

        let draft = post_metadata(&resolver(), &ctx("abc", None, None, Some("editor"))).await;
        assert_eq!(draft, Some(Metadata::preview()));

        assert_eq!(post_metadata(&resolver(), &ctx("zzz", None, None, None)).await, None);
    }

    #[tokio::test]
    async fn blog_index_pages() {
        let resolver = resolver();

        let first = render_blog_index(&resolver, None, 2).await.into_option().unwrap();
        assert_eq!(first.page, 1);
        assert_eq!(first.total_posts, 5);
        assert_eq!(first.total_pages, 3);
        assert_eq!(first.posts.len(), 2);

        let last = render_blog_index(&resolver, Some(3), 2).await.into_option().unwrap();
        assert_eq!(last.posts.len(), 1);

        assert_eq!(render_blog_index(&resolver, Some(4), 2).await, Outcome::NotFound);
        assert_eq!(render_blog_index(&resolver, Some(0), 2).await, Outcome::NotFound);
    }

    #[tokio::test]
    async fn blog_index_store_failure_is_not_found() {
        let resolver = ContentResolver::new(Arc::new(FailingStore));
        assert_eq!(render_blog_index(&resolver, Some(1), 6).await, Outcome::NotFound);
    }
}
