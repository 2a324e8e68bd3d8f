//! Folio binary
//!
//! Serves resolved CMS content to site renderers.

use folio_site::{SiteConfig, SiteNode};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "folio_site=info,folio_query=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("Starting Folio");

    let config = SiteConfig::from_env()?;

    // Create and run node
    let node = SiteNode::new(config)?;
    node.run().await?;

    Ok(())
}
