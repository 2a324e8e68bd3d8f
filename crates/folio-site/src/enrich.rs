//! Posts-block enrichment.
//!
//! After a page is fetched, every `posts` block gets the page of published
//! posts it should display. Each block's fetch is independent; they run
//! concurrently and any failure fails the page.

use crate::error::Result;
use crate::models::{Block, PageBlock, PostsBlock, PUBLISHED};
use crate::resolve::{decode_all, fail, Operation};
use crate::schema::{self, collections};
use crate::store::ContentStore;
use folio_query::{Filter, Query, SortKey};
use futures::future::try_join_all;
use std::sync::Arc;

/// Attaches secondary query results to blocks that need them.
#[derive(Clone)]
pub struct BlockEnricher {
    store: Arc<dyn ContentStore>,
}

impl BlockEnricher {
    pub fn new(store: Arc<dyn ContentStore>) -> Self {
        Self { store }
    }

    /// Fill in the `posts` of every posts block with page `page` (at least 1)
    /// of published posts, newest first. Other blocks are left as they are.
    pub async fn enrich(&self, blocks: &mut [PageBlock], page: u32, token: Option<&str>) -> Result<()> {
        let page = page.max(1);
        let targets: Vec<&mut PostsBlock> = blocks
            .iter_mut()
            .filter_map(|placed| match &mut placed.block {
                Block::Posts(posts) => Some(posts),
                Block::RichText(_)
                | Block::Gallery(_)
                | Block::Pricing(_)
                | Block::Hero(_)
                | Block::Form(_) => None,
            })
            .collect();
        if targets.is_empty() {
            return Ok(());
        }

        tracing::debug!(blocks = targets.len(), page, "Enriching posts blocks");
        try_join_all(targets.into_iter().map(|posts| self.fill(posts, page, token))).await?;
        Ok(())
    }

    async fn fill(&self, posts: &mut PostsBlock, page: u32, token: Option<&str>) -> Result<()> {
        let operation = Operation::EnrichPostsBlock;
        let query = Query::new()
            .fields(schema::post_summary_fields())
            .filter(Filter::eq("status", PUBLISHED))
            .sort(SortKey::desc("published_at"))
            .limit(posts.page_size())
            .page(page);

        let rows = self
            .store
            .read_items(collections::POSTS, &query, token)
            .await
            .map_err(|e| fail(operation, e))?;
        posts.posts = decode_all(operation, rows)?;
        Ok(())
    }
}
