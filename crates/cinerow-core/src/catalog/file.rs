use std::path::PathBuf;

use tracing::debug;

use super::CatalogSource;
use crate::model::PagePayload;
use crate::{Error, Result};

/// Catalog backed by a JSON payload on disk
#[derive(Debug, Clone)]
pub struct FileCatalog {
    path: PathBuf,
}

impl FileCatalog {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &PathBuf {
        &self.path
    }
}

#[async_trait::async_trait]
impl CatalogSource for FileCatalog {
    fn name(&self) -> &str {
        "file"
    }

    async fn fetch_page(&self) -> Result<PagePayload> {
        debug!("Reading catalog from {}", self.path.display());

        let content = tokio::fs::read_to_string(&self.path)
            .await
            .map_err(|e| Error::Catalog(format!("{}: {}", self.path.display(), e)))?;

        let payload: PagePayload = serde_json::from_str(&content)
            .map_err(|e| Error::Catalog(format!("{}: {}", self.path.display(), e)))?;

        payload.validate()
    }
}
