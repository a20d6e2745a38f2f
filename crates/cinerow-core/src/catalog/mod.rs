//! Page data sources
//!
//! The carousel never fetches anything itself; the landing page asks a
//! [`CatalogSource`] for a finished [`PagePayload`] and hands it over as-is.

mod file;
mod mock;

pub use file::FileCatalog;
pub use mock::MockCatalog;

use std::sync::Arc;

use crate::config::{AppConfig, CatalogKind};
use crate::model::PagePayload;
use crate::{Error, Result};

/// Trait for page payload providers
#[async_trait::async_trait]
pub trait CatalogSource: Send + Sync {
    /// Short name for logs and the status bar
    fn name(&self) -> &str;

    /// Fetch the hero promotion and the ordered row list
    async fn fetch_page(&self) -> Result<PagePayload>;
}

/// Build the source selected in the configuration
pub fn from_config(config: &AppConfig) -> Result<Arc<dyn CatalogSource>> {
    match config.catalog.source {
        CatalogKind::Mock => Ok(Arc::new(MockCatalog::new(
            config.catalog.seed,
            std::time::Duration::from_millis(config.catalog.latency_ms),
        ))),
        CatalogKind::File => {
            let path = config.catalog_path().ok_or_else(|| {
                Error::Config("catalog.source = \"file\" requires catalog.path".to_string())
            })?;
            Ok(Arc::new(FileCatalog::new(path)))
        }
    }
}
