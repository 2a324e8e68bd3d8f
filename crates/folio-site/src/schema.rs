//! Field selections and collection names for the content store.
//!
//! Every selection is built once per process and shared as an
//! `Arc<Selection>`; queries clone the `Arc`, never the tree.

use folio_query::{Deep, Filter, Selection, SortKey};
use std::sync::{Arc, OnceLock};

/// Store collection names.
pub mod collections {
    pub const PAGES: &str = "pages";
    pub const POSTS: &str = "posts";
    pub const NAVIGATION: &str = "navigation";
    pub const GLOBALS: &str = "globals";
    pub const REDIRECTS: &str = "redirects";
    pub const USERS: &str = "directus_users";
}

fn shared(cell: &'static OnceLock<Arc<Selection>>, build: fn() -> Selection) -> Arc<Selection> {
    Arc::clone(cell.get_or_init(|| Arc::new(build())))
}

fn seo() -> Selection {
    Selection::new().scalars(&["title", "meta_description", "og_image", "no_index", "no_follow"])
}

fn button() -> Selection {
    Selection::new()
        .scalars(&["id", "label", "variant", "url", "type"])
        .relation("page", Selection::new().scalars(&["permalink"]))
        .relation("post", Selection::new().scalars(&["slug"]))
}

fn richtext_item() -> Selection {
    Selection::new().scalars(&["id", "tagline", "headline", "content", "alignment"])
}

fn gallery_item() -> Selection {
    Selection::new()
        .scalars(&["id", "tagline", "headline"])
        .relation("items", Selection::new().scalars(&["id", "directus_file", "sort"]))
}

fn pricing_item() -> Selection {
    Selection::new().scalars(&["id", "tagline", "headline"]).relation(
        "pricing_cards",
        Selection::new()
            .scalars(&["id", "title", "description", "price", "badge", "features", "is_highlighted"])
            .relation("button", button()),
    )
}

fn hero_item() -> Selection {
    Selection::new()
        .scalars(&["id", "tagline", "headline", "description", "layout", "image"])
        .relation(
            "button_group",
            Selection::new().scalars(&["id"]).relation("buttons", button()),
        )
}

fn posts_item() -> Selection {
    Selection::new().scalars(&["id", "tagline", "headline", "collection", "limit"])
}

fn form_item() -> Selection {
    Selection::new().scalars(&["id", "tagline", "headline"]).relation(
        "form",
        Selection::new()
            .scalars(&[
                "id",
                "title",
                "submit_label",
                "success_message",
                "on_success",
                "success_redirect_url",
                "is_active",
            ])
            .relation(
                "fields",
                Selection::new().scalars(&[
                    "id",
                    "name",
                    "type",
                    "label",
                    "placeholder",
                    "help",
                    "validation",
                    "width",
                    "choices",
                    "required",
                    "sort",
                ]),
            ),
    )
}

fn build_page() -> Selection {
    Selection::new()
        .scalars(&["id", "title", "permalink", "status"])
        .relation("seo", seo())
        .relation(
            "blocks",
            Selection::new()
                .scalars(&["id", "background", "collection", "sort", "hide"])
                .union(
                    "item",
                    [
                        ("block_richtext", richtext_item()),
                        ("block_gallery", gallery_item()),
                        ("block_pricing", pricing_item()),
                        ("block_hero", hero_item()),
                        ("block_posts", posts_item()),
                        ("block_form", form_item()),
                    ],
                ),
        )
}

fn build_post() -> Selection {
    Selection::new()
        .scalars(&[
            "id",
            "title",
            "slug",
            "status",
            "published_at",
            "description",
            "content",
            "image",
        ])
        .relation("author", build_author())
        .relation("seo", seo())
}

fn build_post_summary() -> Selection {
    Selection::new().scalars(&["id", "title", "description", "slug", "image", "published_at"])
}

fn build_related_post() -> Selection {
    Selection::new().scalars(&["id", "title", "image", "slug"])
}

fn build_author() -> Selection {
    Selection::new().scalars(&["id", "first_name", "last_name", "avatar"])
}

fn build_navigation() -> Selection {
    let link = Selection::new()
        .scalars(&["id", "title", "url"])
        .relation("page", Selection::new().scalars(&["permalink"]));
    let item = link.clone().relation("children", link);
    Selection::new()
        .scalars(&["id", "title"])
        .relation("items", item)
}

fn build_globals() -> Selection {
    Selection::new()
        .scalars(&[
            "title",
            "tagline",
            "description",
            "logo",
            "logo_dark_mode",
            "favicon",
            "accent_color",
        ])
        .relation("social_links", Selection::new().scalars(&["service", "url"]))
}

fn build_redirect() -> Selection {
    Selection::new().scalars(&["url_from", "url_to", "response_code"])
}

fn build_id() -> Selection {
    Selection::new().scalars(&["id"])
}

fn build_page_search() -> Selection {
    Selection::new()
        .scalars(&["id", "title", "permalink"])
        .relation("seo", Selection::new().scalars(&["meta_description"]))
}

fn build_page_meta() -> Selection {
    Selection::new()
        .scalars(&["id", "title", "permalink"])
        .relation("seo", seo())
}

fn build_post_search() -> Selection {
    Selection::new().scalars(&["id", "title", "description", "slug"])
}

/// A page with every block variant's fields.
pub fn page_fields() -> Arc<Selection> {
    static CELL: OnceLock<Arc<Selection>> = OnceLock::new();
    shared(&CELL, build_page)
}

pub fn post_fields() -> Arc<Selection> {
    static CELL: OnceLock<Arc<Selection>> = OnceLock::new();
    shared(&CELL, build_post)
}

/// Listing fields: id, title, description, slug, image, published_at.
pub fn post_summary_fields() -> Arc<Selection> {
    static CELL: OnceLock<Arc<Selection>> = OnceLock::new();
    shared(&CELL, build_post_summary)
}

pub fn related_post_fields() -> Arc<Selection> {
    static CELL: OnceLock<Arc<Selection>> = OnceLock::new();
    shared(&CELL, build_related_post)
}

pub fn author_fields() -> Arc<Selection> {
    static CELL: OnceLock<Arc<Selection>> = OnceLock::new();
    shared(&CELL, build_author)
}

pub fn navigation_fields() -> Arc<Selection> {
    static CELL: OnceLock<Arc<Selection>> = OnceLock::new();
    shared(&CELL, build_navigation)
}

pub fn globals_fields() -> Arc<Selection> {
    static CELL: OnceLock<Arc<Selection>> = OnceLock::new();
    shared(&CELL, build_globals)
}

pub fn redirect_fields() -> Arc<Selection> {
    static CELL: OnceLock<Arc<Selection>> = OnceLock::new();
    shared(&CELL, build_redirect)
}

pub fn id_fields() -> Arc<Selection> {
    static CELL: OnceLock<Arc<Selection>> = OnceLock::new();
    shared(&CELL, build_id)
}

/// Page title and SEO fields, no blocks.
pub fn page_meta_fields() -> Arc<Selection> {
    static CELL: OnceLock<Arc<Selection>> = OnceLock::new();
    shared(&CELL, build_page_meta)
}

pub fn page_search_fields() -> Arc<Selection> {
    static CELL: OnceLock<Arc<Selection>> = OnceLock::new();
    shared(&CELL, build_page_search)
}

pub fn post_search_fields() -> Arc<Selection> {
    static CELL: OnceLock<Arc<Selection>> = OnceLock::new();
    shared(&CELL, build_post_search)
}

/// Visible blocks only, in `sort` order.
pub fn blocks_deep() -> Deep {
    Deep::new()
        .filter(Filter::neq("hide", true))
        .sort(SortKey::asc("sort"))
}

/// Menu items and their children in `sort` order.
pub fn navigation_deep() -> Deep {
    Deep::new()
        .sort(SortKey::asc("sort"))
        .nested("children", Deep::new().sort(SortKey::asc("sort")))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Block;

    #[test]
    fn page_fields_are_built_once() {
        assert!(Arc::ptr_eq(&page_fields(), &page_fields()));
    }

    #[test]
    fn page_fields_cover_every_block_variant() {
        let paths = page_fields().paths();
        for collection in Block::COLLECTIONS {
            let prefix = format!("blocks.item:{collection}.");
            assert!(
                paths.iter().any(|p| p.starts_with(&prefix)),
                "no fields selected for {collection}"
            );
        }
        assert!(paths.contains(&"blocks.item:block_posts.limit".to_string()));
        assert!(paths.contains(&"blocks.item:block_hero.button_group.buttons.page.permalink".to_string()));
        assert!(paths.contains(&"seo.meta_description".to_string()));
    }

    #[test]
    fn page_meta_fields_skip_blocks() {
        let paths = page_meta_fields().paths();
        assert!(paths.contains(&"seo.og_image".to_string()));
        assert!(!paths.iter().any(|p| p.starts_with("blocks")));
    }

    #[test]
    fn navigation_children_one_level() {
        let paths = navigation_fields().paths();
        assert!(paths.contains(&"items.children.page.permalink".to_string()));
        assert!(!paths.iter().any(|p| p.starts_with("items.children.children")));
    }

    #[test]
    fn summary_fields_match_listing_shape() {
        assert_eq!(
            post_summary_fields().paths(),
            vec!["id", "title", "description", "slug", "image", "published_at"]
        );
    }
}
