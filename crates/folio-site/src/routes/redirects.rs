//! Redirect routes.

use super::normalize_path;
use crate::error::Result;
use crate::models::Redirect;
use crate::resolve::ContentResolver;

/// The redirect for a requested path, matched after normalization.
pub async fn resolve_redirect(resolver: &ContentResolver, path: &str) -> Result<Option<Redirect>> {
    resolver.find_redirect(&normalize_path(path)).await
}
