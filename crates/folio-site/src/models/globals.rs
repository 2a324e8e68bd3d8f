//! Site-wide settings.

use super::navigation::Navigation;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SocialLink {
    #[serde(default)]
    pub service: Option<String>,
    #[serde(default)]
    pub url: Option<String>,
}

/// The `globals` singleton.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Globals {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub tagline: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub logo: Option<String>,
    #[serde(default)]
    pub logo_dark_mode: Option<String>,
    #[serde(default)]
    pub favicon: Option<String>,
    #[serde(default)]
    pub accent_color: Option<String>,
    #[serde(default, deserialize_with = "crate::models::nullable_list")]
    pub social_links: Vec<SocialLink>,
}

/// Everything the site layout needs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SiteGlobals {
    pub globals: Globals,
    pub header_nav: Option<Navigation>,
    pub footer_nav: Option<Navigation>,
}
