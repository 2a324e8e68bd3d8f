//! Page routes.

use super::{Metadata, Outcome, RouteContext};
use crate::error::Result;
use crate::models::Page;
use crate::resolve::ContentResolver;

async fn resolve(resolver: &ContentResolver, ctx: &RouteContext) -> Result<Option<Page>> {
    let token = ctx.token();
    match (&ctx.fixed_version, &ctx.id) {
        (Some(version), Some(id)) => resolver
            .resolve_page_by_id_and_version(id, version, ctx.post_page, token)
            .await
            .map(Some),
        (Some(version), None) => match resolver.lookup_page_id_by_permalink(&ctx.key, token).await? {
            Some(id) => resolver
                .resolve_page_by_id_and_version(&id, version, ctx.post_page, token)
                .await
                .map(Some),
            None => Ok(None),
        },
        (None, _) => resolver
            .resolve_page_by_permalink(&ctx.key, ctx.post_page, token, ctx.draft)
            .await
            .map(Some),
    }
}

/// The page view for a route. Pages without blocks are not found.
pub async fn render_page(resolver: &ContentResolver, ctx: &RouteContext) -> Outcome<Page> {
    match resolve(resolver, ctx).await {
        Ok(Some(page)) if !page.blocks.is_empty() => Outcome::Found(page),
        Ok(_) => Outcome::NotFound,
        Err(e) if e.is_not_found() => Outcome::NotFound,
        Err(e) => {
            tracing::warn!(permalink = %ctx.key, error = %e, "Page route failed");
            Outcome::NotFound
        }
    }
}

/// Metadata for a page route. `None` when the page cannot be resolved.
pub async fn page_metadata(resolver: &ContentResolver, ctx: &RouteContext) -> Option<Metadata> {
    if ctx.draft || ctx.fixed_version.is_some() {
        return Some(Metadata::preview());
    }
    match resolver.resolve_page_metadata(&ctx.key).await {
        Ok(Some(page)) => Some(Metadata::for_page(&page)),
        Ok(None) => None,
        Err(e) => {
            tracing::debug!(permalink = %ctx.key, error = %e, "No page metadata");
            None
        }
    }
}
