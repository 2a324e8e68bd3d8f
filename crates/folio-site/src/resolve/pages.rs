//! Page resolution.

use super::{bearer, decode, degrade, require, ContentResolver, Operation};
use crate::error::{Error, Result};
use crate::models::{Page, PUBLISHED};
use crate::schema::{self, collections};
use folio_query::{Filter, Query};

impl ContentResolver {
    /// The page at `permalink`, with posts blocks enriched for `post_page`.
    ///
    /// Only published pages match unless `preview` is set and a token is
    /// present. Fails with `NotFound` when nothing matches.
    pub async fn resolve_page_by_permalink(
        &self,
        permalink: &str,
        post_page: u32,
        token: Option<&str>,
        preview: bool,
    ) -> Result<Page> {
        let operation = Operation::ResolvePageByPermalink;
        let permalink = require("permalink", permalink)?;
        let token = bearer(token);

        let mut filter = Filter::eq("permalink", permalink);
        if !(preview && token.is_some()) {
            filter = filter.and(Filter::eq("status", PUBLISHED));
        }
        let query = Query::new()
            .fields(schema::page_fields())
            .filter(filter)
            .deep("blocks", schema::blocks_deep())
            .limit(1);

        let row = self
            .items(operation, collections::PAGES, &query, token)
            .await?
            .into_iter()
            .next()
            .ok_or_else(|| Error::NotFound(format!("page {permalink}")))?;

        let mut page: Page = decode(operation, row)?;
        self.enricher.enrich(&mut page.blocks, post_page, token).await?;
        Ok(page)
    }

    /// A page at a content version, with posts blocks enriched for
    /// `post_page`. Publish state is not checked.
    pub async fn resolve_page_by_id_and_version(
        &self,
        id: &str,
        version: &str,
        post_page: u32,
        token: Option<&str>,
    ) -> Result<Page> {
        let operation = Operation::ResolvePageByIdAndVersion;
        let id = require("id", id)?;
        let version = require("version", version)?;
        let token = bearer(token);

        let query = Query::new()
            .fields(schema::page_fields())
            .deep("blocks", schema::blocks_deep())
            .version(version);

        let row = self
            .item(operation, collections::PAGES, id, &query, token)
            .await?
            .ok_or_else(|| Error::NotFound(format!("page {id} at version {version}")))?;

        let mut page: Page = decode(operation, row)?;
        self.enricher.enrich(&mut page.blocks, post_page, token).await?;
        Ok(page)
    }

    /// Title and SEO fields of the published page at `permalink`. Blocks
    /// are neither fetched nor enriched.
    pub async fn resolve_page_metadata(&self, permalink: &str) -> Result<Option<Page>> {
        let operation = Operation::ResolvePageMetadata;
        let permalink = require("permalink", permalink)?;

        let query = Query::new()
            .fields(schema::page_meta_fields())
            .filter(Filter::eq("permalink", permalink).and(Filter::eq("status", PUBLISHED)))
            .limit(1);

        match self.items(operation, collections::PAGES, &query, None).await?.into_iter().next() {
            Some(row) => decode(operation, row).map(Some),
            None => Ok(None),
        }
    }

    /// Id of the page at `permalink`, in any publish state.
    /// Store failures read as absence.
    pub async fn lookup_page_id_by_permalink(
        &self,
        permalink: &str,
        token: Option<&str>,
    ) -> Result<Option<String>> {
        let operation = Operation::LookupPageId;
        let permalink = require("permalink", permalink)?;

        let query = Query::new()
            .fields(schema::id_fields())
            .filter(Filter::eq("permalink", permalink))
            .limit(1);

        let found = self
            .first_id(operation, collections::PAGES, &query, bearer(token))
            .await;
        Ok(degrade(found, None))
    }
}

#[cfg(test)]
mod tests {
    use crate::fixtures::{sample_store, CountingStore, FailingStore};
    use crate::models::Block;
    use crate::resolve::ContentResolver;
    use crate::Error;
    use std::sync::Arc;

    fn resolver() -> ContentResolver {
        ContentResolver::new(Arc::new(sample_store()))
    }

    #[tokio::test]
    async fn blocks_are_visible_and_sorted() {
        let page = resolver()
            .resolve_page_by_permalink("/", 1, None, false)
            .await
            .unwrap();

        let ids: Vec<&str> = page.blocks.iter().map(|b| b.id.as_str()).collect();
        assert_eq!(ids, vec!["b-first", "b-late"]);
        let sorts: Vec<Option<i64>> = page.blocks.iter().map(|b| b.sort).collect();
        assert_eq!(sorts, vec![Some(0), Some(2)]);
    }

    #[tokio::test]
    async fn posts_blocks_are_enriched() {
        let page = resolver()
            .resolve_page_by_permalink("/", 2, None, false)
            .await
            .unwrap();

        let Block::Posts(posts) = &page.blocks[0].block else {
            panic!("first block should be the posts block");
        };
        let slugs: Vec<&str> = posts.posts.iter().map(|p| p.slug.as_str()).collect();
        assert_eq!(slugs, vec!["def", "efg"]);
    }

    #[tokio::test]
    async fn unpublished_page_without_token_is_not_found() {
        let resolver = resolver();

        let draft = resolver.resolve_page_by_permalink("/pricing", 1, None, false).await;
        assert!(matches!(draft, Err(Error::NotFound(_))));

        let preview_without_token = resolver.resolve_page_by_permalink("/pricing", 1, None, true).await;
        assert!(matches!(preview_without_token, Err(Error::NotFound(_))));

        let absent = resolver.resolve_page_by_permalink("/nowhere", 1, None, false).await;
        assert!(matches!(absent, Err(Error::NotFound(_))));
    }

    #[tokio::test]
    async fn preview_with_token_sees_drafts() {
        let page = resolver()
            .resolve_page_by_permalink("/pricing", 1, Some("editor"), true)
            .await
            .unwrap();
        assert_eq!(page.id, "pricing");
    }

    #[tokio::test]
    async fn version_overlay_is_read() {
        let page = resolver()
            .resolve_page_by_id_and_version("about", "v2", 1, Some("editor"))
            .await
            .unwrap();
        assert_eq!(page.title.as_deref(), Some("About (v2)"));
    }

    #[tokio::test]
    async fn main_version_is_the_published_item() {
        let resolver = resolver();
        let main = resolver
            .resolve_page_by_id_and_version("about", "main", 1, None)
            .await
            .unwrap();
        let published = resolver
            .resolve_page_by_permalink("/about", 1, None, false)
            .await
            .unwrap();
        assert_eq!(main, published);
    }

    #[tokio::test]
    async fn blank_keys_never_reach_the_store() {
        let store = CountingStore::new(sample_store());
        let resolver = ContentResolver::new(store.clone());

        let blank_id = resolver.resolve_page_by_id_and_version(" ", "v2", 1, None).await;
        let blank_version = resolver.resolve_page_by_id_and_version("about", "", 1, None).await;
        let blank_permalink = resolver.resolve_page_by_permalink("  ", 1, None, false).await;
        let blank_lookup = resolver.lookup_page_id_by_permalink("", None).await;

        assert!(blank_id.unwrap_err().is_invalid_argument());
        assert!(blank_version.unwrap_err().is_invalid_argument());
        assert!(blank_permalink.unwrap_err().is_invalid_argument());
        assert!(blank_lookup.unwrap_err().is_invalid_argument());
        assert_eq!(store.calls(), 0);
    }

    #[tokio::test]
    async fn versioned_page_keeps_post_page() {
        let page = resolver()
            .resolve_page_by_id_and_version("home", "main", 2, None)
            .await
            .unwrap();

        let Block::Posts(posts) = &page.blocks[0].block else {
            panic!("first block should be the posts block");
        };
        let slugs: Vec<&str> = posts.posts.iter().map(|p| p.slug.as_str()).collect();
        assert_eq!(slugs, vec!["def", "efg"]);
    }

    #[tokio::test]
    async fn metadata_is_one_read_without_blocks() {
        let store = CountingStore::new(sample_store());
        let resolver = ContentResolver::new(store.clone());

        let page = resolver.resolve_page_metadata("/").await.unwrap().unwrap();
        assert_eq!(page.seo.unwrap().title.as_deref(), Some("Welcome"));
        assert!(page.blocks.is_empty());
        assert_eq!(store.calls(), 1);

        assert!(resolver.resolve_page_metadata("/pricing").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn lookup_finds_drafts_and_degrades() {
        let id = resolver()
            .lookup_page_id_by_permalink("/pricing", Some("editor"))
            .await
            .unwrap();
        assert_eq!(id.as_deref(), Some("pricing"));

        let failing = ContentResolver::new(Arc::new(FailingStore));
        assert_eq!(failing.lookup_page_id_by_permalink("/pricing", None).await.unwrap(), None);
    }

    #[tokio::test]
    async fn store_failure_is_chained() {
        let failing = ContentResolver::new(Arc::new(FailingStore));
        let err = failing
            .resolve_page_by_permalink("/", 1, None, false)
            .await
            .unwrap_err();
        assert_eq!(err.to_string(), "fetch page by permalink failed");
        assert!(std::error::Error::source(&err)
            .unwrap()
            .to_string()
            .contains("store unavailable"));
    }
}
