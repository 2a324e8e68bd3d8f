//! Page model and the block envelope.

use super::blocks::{FormBlock, GalleryBlock, HeroBlock, PostsBlock, PricingBlock, RichTextBlock};
use super::deserialize_id;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use thiserror::Error;

/// SEO metadata attached to pages and posts.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Seo {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub meta_description: Option<String>,
    #[serde(default)]
    pub og_image: Option<String>,
    #[serde(default)]
    pub no_index: Option<bool>,
    #[serde(default)]
    pub no_follow: Option<bool>,
}

/// A routed page.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Page {
    #[serde(deserialize_with = "deserialize_id")]
    pub id: String,

    #[serde(default)]
    pub title: Option<String>,

    /// Canonical path, e.g. `/` or `/about/team`
    #[serde(default, deserialize_with = "super::null_as_default")]
    pub permalink: String,

    #[serde(default)]
    pub status: Option<String>,

    #[serde(default)]
    pub seo: Option<Seo>,

    /// Visible blocks in `sort` order, as delivered by the store
    #[serde(default, deserialize_with = "decode_blocks")]
    pub blocks: Vec<PageBlock>,
}

/// Tagged union over the block variants, keyed by the envelope's `collection`.
#[derive(Debug, Clone, PartialEq)]
pub enum Block {
    RichText(RichTextBlock),
    Gallery(GalleryBlock),
    Pricing(PricingBlock),
    Hero(HeroBlock),
    Posts(PostsBlock),
    Form(FormBlock),
}

/// Reasons a stored block cannot become a [`Block`].
#[derive(Debug, Error)]
pub enum BlockError {
    #[error("unknown block collection {0:?}")]
    UnknownCollection(String),

    #[error("malformed {collection} item: {source}")]
    Malformed {
        collection: String,
        #[source]
        source: serde_json::Error,
    },
}

impl Block {
    pub const RICHTEXT: &'static str = "block_richtext";
    pub const GALLERY: &'static str = "block_gallery";
    pub const PRICING: &'static str = "block_pricing";
    pub const HERO: &'static str = "block_hero";
    pub const POSTS: &'static str = "block_posts";
    pub const FORM: &'static str = "block_form";

    /// Every known block collection.
    pub const COLLECTIONS: [&'static str; 6] = [
        Self::RICHTEXT,
        Self::GALLERY,
        Self::PRICING,
        Self::HERO,
        Self::POSTS,
        Self::FORM,
    ];

    /// The collection tag of this variant.
    pub fn collection(&self) -> &'static str {
        match self {
            Block::RichText(_) => Self::RICHTEXT,
            Block::Gallery(_) => Self::GALLERY,
            Block::Pricing(_) => Self::PRICING,
            Block::Hero(_) => Self::HERO,
            Block::Posts(_) => Self::POSTS,
            Block::Form(_) => Self::FORM,
        }
    }

    /// Decode a variant from its tag and item payload.
    pub fn from_parts(collection: &str, item: Value) -> Result<Self, BlockError> {
        fn decode<T: serde::de::DeserializeOwned>(
            collection: &str,
            item: Value,
        ) -> Result<T, BlockError> {
            serde_json::from_value(item).map_err(|source| BlockError::Malformed {
                collection: collection.to_string(),
                source,
            })
        }

        Ok(match collection {
            Self::RICHTEXT => Block::RichText(decode(collection, item)?),
            Self::GALLERY => Block::Gallery(decode(collection, item)?),
            Self::PRICING => Block::Pricing(decode(collection, item)?),
            Self::HERO => Block::Hero(decode(collection, item)?),
            Self::POSTS => Block::Posts(decode(collection, item)?),
            Self::FORM => Block::Form(decode(collection, item)?),
            other => return Err(BlockError::UnknownCollection(other.to_string())),
        })
    }

    /// The item payload as JSON.
    pub fn item_json(&self) -> Value {
        let item = match self {
            Block::RichText(item) => serde_json::to_value(item),
            Block::Gallery(item) => serde_json::to_value(item),
            Block::Pricing(item) => serde_json::to_value(item),
            Block::Hero(item) => serde_json::to_value(item),
            Block::Posts(item) => serde_json::to_value(item),
            Block::Form(item) => serde_json::to_value(item),
        };
        item.unwrap_or(Value::Null)
    }
}

/// A block placed on a page.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawBlock", into = "RawBlock")]
pub struct PageBlock {
    pub id: String,
    pub sort: Option<i64>,
    pub hide: bool,
    pub background: Option<String>,
    pub block: Block,
}

/// Wire form of a page block.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct RawBlock {
    #[serde(deserialize_with = "deserialize_id")]
    id: String,
    #[serde(default)]
    sort: Option<i64>,
    #[serde(default)]
    hide: Option<bool>,
    #[serde(default)]
    background: Option<String>,
    collection: String,
    #[serde(default)]
    item: Value,
}

impl TryFrom<RawBlock> for PageBlock {
    type Error = BlockError;

    fn try_from(raw: RawBlock) -> Result<Self, Self::Error> {
        Ok(Self {
            block: Block::from_parts(&raw.collection, raw.item)?,
            id: raw.id,
            sort: raw.sort,
            hide: raw.hide.unwrap_or(false),
            background: raw.background,
        })
    }
}

impl From<PageBlock> for RawBlock {
    fn from(block: PageBlock) -> Self {
        Self {
            id: block.id,
            sort: block.sort,
            hide: Some(block.hide),
            background: block.background,
            collection: block.block.collection().to_string(),
            item: block.block.item_json(),
        }
    }
}

/// Decode a page's blocks, dropping (with a warning) any block that is not
/// one of the known variants or whose payload does not have its shape.
fn decode_blocks<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Vec<PageBlock>, D::Error> {
    let raw = Option::<Vec<Value>>::deserialize(deserializer)?.unwrap_or_default();
    Ok(raw
        .into_iter()
        .filter_map(|value| {
            let id = value.get("id").cloned().unwrap_or(Value::Null);
            match serde_json::from_value::<PageBlock>(value) {
                Ok(block) => Some(block),
                Err(e) => {
                    tracing::warn!(block = %id, error = %e, "Dropping undecodable block");
                    None
                }
            }
        })
        .collect())
}
