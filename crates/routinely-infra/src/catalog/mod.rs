//! Catalog sources: local JSON file or remote URL.
//!
//! Both parse the same document shape (`{"products": [...]}`) through
//! [`parse_catalog`]. [`AnyCatalogSource`] picks one from the configured
//! location string so callers can hold a single concrete type.

pub mod file;
pub mod http;

use std::path::Path;

use routinely_core::catalog::store::CatalogSource;
use routinely_types::error::CatalogError;
use routinely_types::product::{CatalogDocument, Product};

pub use self::file::FileCatalogSource;
pub use self::http::HttpCatalogSource;

/// Parse a catalog document. A document without `products` is empty.
pub fn parse_catalog(content: &str) -> Result<Vec<Product>, CatalogError> {
    let document: CatalogDocument =
        serde_json::from_str(content).map_err(|e| CatalogError::Parse(e.to_string()))?;
    Ok(document.products)
}

/// The configured catalog source.
pub enum AnyCatalogSource {
    File(FileCatalogSource),
    Http(HttpCatalogSource),
}

impl AnyCatalogSource {
    /// Resolve `location` from config or the command line.
    ///
    /// `http://` and `https://` locations are fetched remotely. Anything else
    /// is a file path; relative paths resolve against `data_dir`.
    pub fn from_location(location: &str, data_dir: &Path) -> Result<Self, CatalogError> {
        let trimmed = location.trim();
        if trimmed.starts_with("http://") || trimmed.starts_with("https://") {
            return Ok(Self::Http(HttpCatalogSource::new(trimmed)?));
        }
        Ok(Self::File(FileCatalogSource::new(data_dir.join(trimmed))))
    }
}

impl CatalogSource for AnyCatalogSource {
    fn location(&self) -> &str {
        match self {
            Self::File(source) => source.location(),
            Self::Http(source) => source.location(),
        }
    }

    async fn fetch(&self) -> Result<Vec<Product>, CatalogError> {
        match self {
            Self::File(source) => source.fetch().await,
            Self::Http(source) => source.fetch().await,
        }
    }
}
