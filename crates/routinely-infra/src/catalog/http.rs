//! Catalog fetched from an HTTP(S) URL.

use routinely_core::catalog::store::CatalogSource;
use routinely_types::error::CatalogError;
use routinely_types::product::Product;

use super::parse_catalog;

pub struct HttpCatalogSource {
    client: reqwest::Client,
    url: String,
}

impl HttpCatalogSource {
    pub fn new(url: impl Into<String>) -> Result<Self, CatalogError> {
        let client = reqwest::Client::builder()
            .build()
            .map_err(|e| CatalogError::Http(format!("failed to create HTTP client: {e}")))?;
        Ok(Self {
            client,
            url: url.into(),
        })
    }
}

impl CatalogSource for HttpCatalogSource {
    fn location(&self) -> &str {
        &self.url
    }

    async fn fetch(&self) -> Result<Vec<Product>, CatalogError> {
        let response = self
            .client
            .get(&self.url)
            .send()
            .await
            .map_err(|e| CatalogError::Http(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(CatalogError::Http(format!("{} returned {status}", self.url)));
        }

        let body = response
            .text()
            .await
            .map_err(|e| CatalogError::Http(e.to_string()))?;
        parse_catalog(&body)
    }
}
