//! Catalog read from a local JSON file.

use std::path::{Path, PathBuf};

use routinely_core::catalog::store::CatalogSource;
use routinely_types::error::CatalogError;
use routinely_types::product::Product;

use super::parse_catalog;

pub struct FileCatalogSource {
    path: PathBuf,
    display: String,
}

impl FileCatalogSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let display = path.display().to_string();
        Self { path, display }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl CatalogSource for FileCatalogSource {
    fn location(&self) -> &str {
        &self.display
    }

    async fn fetch(&self) -> Result<Vec<Product>, CatalogError> {
        let content = tokio::fs::read_to_string(&self.path)
            .await
            .map_err(|e| CatalogError::Io(format!("{}: {e}", self.display)))?;
        parse_catalog(&content)
    }
}
