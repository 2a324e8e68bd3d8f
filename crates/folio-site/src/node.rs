//! Folio node - configuration, shared state and the server lifecycle.
//!
//! Architecture:
//! - One content resolver shared by every request
//! - Content read from the remote store over HTTP, per-request tokens passed through
//! - HTTP API for page, post and metadata renderers

use crate::api;
use crate::error::{Error, Result};
use crate::resolve::ContentResolver;
use crate::store::{ContentStore, HttpStore};
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

/// Configuration for a Folio node.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SiteConfig {
    /// Base URL of the content store
    pub cms_url: String,
    /// Server token used when a request carries none
    pub cms_token: Option<String>,
    /// HTTP API listen address
    pub api_addr: SocketAddr,
    /// Blog index page size
    pub posts_per_page: u32,
    /// Timeout for each store request
    pub request_timeout: Duration,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            cms_url: "http://localhost:8055".to_string(),
            cms_token: None,
            api_addr: SocketAddr::from(([0, 0, 0, 0], 8080)),
            posts_per_page: 6,
            request_timeout: Duration::from_secs(30),
        }
    }
}

impl SiteConfig {
    /// Create config from environment variables, defaulting what is unset.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(get: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let defaults = Self::default();
        let var = |key: &str| get(key).map(|v| v.trim().to_string()).filter(|v| !v.is_empty());

        let cms_url = var("FOLIO_CMS_URL").unwrap_or(defaults.cms_url);
        let cms_token = var("FOLIO_CMS_TOKEN");

        let api_addr = match var("FOLIO_API_ADDR") {
            Some(addr) => addr
                .parse()
                .map_err(|_| Error::Config(format!("Invalid FOLIO_API_ADDR: {addr}")))?,
            None => defaults.api_addr,
        };

        let posts_per_page = match var("FOLIO_POSTS_PER_PAGE") {
            Some(n) => n
                .parse()
                .ok()
                .filter(|n: &u32| *n > 0)
                .ok_or_else(|| Error::Config(format!("Invalid FOLIO_POSTS_PER_PAGE: {n}")))?,
            None => defaults.posts_per_page,
        };

        let request_timeout = match var("FOLIO_REQUEST_TIMEOUT_SECS") {
            Some(secs) => secs
                .parse()
                .ok()
                .filter(|s: &u64| *s > 0)
                .map(Duration::from_secs)
                .ok_or_else(|| Error::Config(format!("Invalid FOLIO_REQUEST_TIMEOUT_SECS: {secs}")))?,
            None => defaults.request_timeout,
        };

        Ok(Self {
            cms_url,
            cms_token,
            api_addr,
            posts_per_page,
            request_timeout,
        })
    }
}

/// Shared state for the API handlers.
pub struct SiteState {
    pub resolver: ContentResolver,
    pub config: SiteConfig,
}

impl SiteState {
    pub fn new(config: SiteConfig, store: Arc<dyn ContentStore>) -> Self {
        Self {
            resolver: ContentResolver::new(store),
            config,
        }
    }
}

/// A Folio node instance.
pub struct SiteNode {
    state: Arc<SiteState>,
    config: SiteConfig,
}

impl SiteNode {
    /// Create a node reading from the configured content store.
    pub fn new(config: SiteConfig) -> Result<Self> {
        let store = HttpStore::new(
            &config.cms_url,
            config.cms_token.clone(),
            config.request_timeout,
        )
        .map_err(|e| Error::Config(format!("Content store {}: {e}", config.cms_url)))?;
        Ok(Self::with_store(config, Arc::new(store)))
    }

    /// Create a node over any content store.
    pub fn with_store(config: SiteConfig, store: Arc<dyn ContentStore>) -> Self {
        let state = Arc::new(SiteState::new(config.clone(), store));
        Self { state, config }
    }

    /// Get the shared state (for API handlers).
    pub fn state(&self) -> Arc<SiteState> {
        Arc::clone(&self.state)
    }

    /// Run the node until the HTTP server stops.
    pub async fn run(self) -> Result<()> {
        tracing::info!("Folio node starting");
        tracing::info!("  API: http://{}", self.config.api_addr);
        tracing::info!("  CMS: {}", self.config.cms_url);
        if self.config.cms_token.is_none() {
            tracing::info!("  No server token, anonymous store access");
        }

        let app = api::build_router(self.state());

        let listener = tokio::net::TcpListener::bind(self.config.api_addr).await?;
        tracing::info!("HTTP server listening on {}", self.config.api_addr);
        axum::serve(listener, app).await?;

        Ok(())
    }
}
