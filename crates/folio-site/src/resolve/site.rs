//! Site-wide content: globals, menus, redirects, authors and search.

use super::{decode, decode_all, require, ContentResolver, Operation};
use crate::error::{Error, Result};
use crate::models::{
    Author, Globals, HitKind, Navigation, Page, PostSummary, RawRedirect, Redirect, SearchHit,
    SiteGlobals, PUBLISHED,
};
use crate::schema::{self, collections};
use folio_query::{Filter, Query};

/// Shortest accepted search term, in characters.
pub const MIN_SEARCH_CHARS: usize = 3;

/// Hits returned per content kind.
const SEARCH_LIMIT: u32 = 10;

impl ContentResolver {
    /// Globals plus the header and footer menus, read concurrently.
    pub async fn resolve_site_globals(&self) -> Result<SiteGlobals> {
        let operation = Operation::ResolveSiteGlobals;
        let globals_query = Query::new().fields(schema::globals_fields());

        let (globals, header_nav, footer_nav) = tokio::try_join!(
            self.singleton(operation, collections::GLOBALS, &globals_query, None),
            self.navigation(Navigation::MAIN),
            self.navigation(Navigation::FOOTER),
        )?;

        let globals = globals.ok_or_else(|| Error::NotFound("site globals".into()))?;
        Ok(SiteGlobals {
            globals: decode::<Globals>(operation, globals)?,
            header_nav,
            footer_nav,
        })
    }

    async fn navigation(&self, id: &str) -> Result<Option<Navigation>> {
        let operation = Operation::ResolveSiteGlobals;
        let query = Query::new()
            .fields(schema::navigation_fields())
            .deep("items", schema::navigation_deep());

        self.item(operation, collections::NAVIGATION, id, &query, None)
            .await?
            .map(|row| decode(operation, row))
            .transpose()
    }

    /// Redirects with both endpoints set.
    pub async fn list_active_redirects(&self) -> Result<Vec<Redirect>> {
        let operation = Operation::ListActiveRedirects;
        let query = Query::new()
            .fields(schema::redirect_fields())
            .filter(Filter::all([
                Filter::not_null("url_from"),
                Filter::not_null("url_to"),
            ]));

        let rows = self.items(operation, collections::REDIRECTS, &query, None).await?;
        let raw: Vec<RawRedirect> = decode_all(operation, rows)?;
        Ok(raw.into_iter().filter_map(RawRedirect::into_redirect).collect())
    }

    /// The active redirect whose source is exactly `path`.
    pub async fn find_redirect(&self, path: &str) -> Result<Option<Redirect>> {
        let operation = Operation::FindRedirect;
        let path = require("path", path)?;

        let query = Query::new()
            .fields(schema::redirect_fields())
            .filter(Filter::all([
                Filter::eq("url_from", path),
                Filter::not_null("url_to"),
            ]))
            .limit(1);

        let rows = self.items(operation, collections::REDIRECTS, &query, None).await?;
        let raw: Vec<RawRedirect> = decode_all(operation, rows)?;
        Ok(raw.into_iter().find_map(RawRedirect::into_redirect))
    }

    /// A post author by user id.
    pub async fn resolve_author(&self, id: &str) -> Result<Option<Author>> {
        let operation = Operation::ResolveAuthor;
        let id = require("id", id)?;
        let query = Query::new().fields(schema::author_fields());

        self.item(operation, collections::USERS, id, &query, None)
            .await?
            .map(|row| decode(operation, row))
            .transpose()
    }

    /// Published pages and posts mentioning `term`, pages first.
    pub async fn search_content(&self, term: &str) -> Result<Vec<SearchHit>> {
        let operation = Operation::SearchContent;
        let term = term.trim();
        if term.chars().count() < MIN_SEARCH_CHARS {
            return Err(Error::InvalidArgument(format!(
                "search term must be at least {MIN_SEARCH_CHARS} characters"
            )));
        }

        let published = Filter::eq("status", PUBLISHED);
        let pages_query = Query::new()
            .fields(schema::page_search_fields())
            .filter(published.clone().and(Filter::any([
                Filter::icontains("title", term),
                Filter::icontains("seo.meta_description", term),
            ])))
            .limit(SEARCH_LIMIT);
        let posts_query = Query::new()
            .fields(schema::post_search_fields())
            .filter(published.and(Filter::any([
                Filter::icontains("title", term),
                Filter::icontains("description", term),
            ])))
            .limit(SEARCH_LIMIT);

        let (pages, posts) = tokio::try_join!(
            self.items(operation, collections::PAGES, &pages_query, None),
            self.items(operation, collections::POSTS, &posts_query, None),
        )?;

        let pages: Vec<Page> = decode_all(operation, pages)?;
        let posts: Vec<PostSummary> = decode_all(operation, posts)?;

        // Content without a route has nothing to link to.
        let page_hits = pages
            .into_iter()
            .filter(|page| !page.permalink.is_empty())
            .map(|page| SearchHit {
                id: page.id,
                kind: HitKind::Page,
                title: page.title,
                description: page.seo.and_then(|seo| seo.meta_description),
                link: page.permalink,
            });
        let post_hits = posts
            .into_iter()
            .filter(|post| !post.slug.is_empty())
            .map(|post| SearchHit {
                link: format!("/blog/{}", post.slug),
                id: post.id,
                kind: HitKind::Post,
                title: post.title,
                description: post.description,
            });
        Ok(page_hits.chain(post_hits).collect())
    }
}
