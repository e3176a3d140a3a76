//! Catalog store and the source trait it loads from.

use routinely_types::error::CatalogError;
use routinely_types::product::{Product, ProductId};

/// Where the static product collection comes from.
///
/// Implementations live in routinely-infra (local file, HTTP URL).
pub trait CatalogSource: Send + Sync {
    /// Human-readable location, for logs and messages.
    fn location(&self) -> &str;

    /// Fetch and parse the product collection.
    fn fetch(
        &self,
    ) -> impl std::future::Future<Output = Result<Vec<Product>, CatalogError>> + Send;
}

/// The in-memory product list. Read-only between loads.
#[derive(Debug, Default)]
pub struct CatalogStore {
    products: Vec<Product>,
}

impl CatalogStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a store from an already-loaded product list.
    pub fn from_products(products: Vec<Product>) -> Self {
        Self { products }
    }

    /// Fetch the catalog from `source`, replacing the current list.
    ///
    /// On failure the list is left empty and the error is returned for the
    /// view to report. There is no retry.
    pub async fn load<C: CatalogSource>(&mut self, source: &C) -> Result<usize, CatalogError> {
        match source.fetch().await {
            Ok(products) => {
                tracing::debug!(
                    location = source.location(),
                    count = products.len(),
                    "Catalog loaded"
                );
                self.products = products;
                Ok(self.products.len())
            }
            Err(e) => {
                tracing::error!(location = source.location(), error = %e, "Failed to load catalog");
                self.products.clear();
                Err(e)
            }
        }
    }

    pub fn products(&self) -> &[Product] {
        &self.products
    }

    pub fn get(&self, id: &ProductId) -> Option<&Product> {
        self.products.iter().find(|p| &p.id == id)
    }

    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }

    pub fn len(&self) -> usize {
        self.products.len()
    }

    /// Distinct non-empty categories in first-seen order.
    pub fn categories(&self) -> Vec<String> {
        let mut seen = std::collections::HashSet::new();
        self.products
            .iter()
            .filter(|p| !p.category.is_empty())
            .filter(|p| seen.insert(p.category.as_str()))
            .map(|p| p.category.clone())
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct StaticSource(Result<Vec<Product>, &'static str>);

    impl CatalogSource for StaticSource {
        fn location(&self) -> &str {
            "static"
        }

        async fn fetch(&self) -> Result<Vec<Product>, CatalogError> {
            self.0
                .clone()
                .map_err(|e| CatalogError::Parse(e.to_string()))
        }
    }

    fn product(id: &str, category: &str) -> Product {
        Product {
            id: ProductId::from(id),
            name: format!("Product {id}"),
            brand: "Brand".to_string(),
            category: category.to_string(),
            description: String::new(),
            image: String::new(),
        }
    }

    #[tokio::test]
    async fn test_load_populates_products() {
        let mut store = CatalogStore::new();
        let source = StaticSource(Ok(vec![product("1", "cleanser"), product("2", "toner")]));
        assert_eq!(store.load(&source).await.unwrap(), 2);
        assert_eq!(store.len(), 2);
        assert!(store.get(&ProductId::from("2")).is_some());
    }

    #[tokio::test]
    async fn test_failed_load_leaves_catalog_empty() {
        let mut store = CatalogStore::from_products(vec![product("1", "cleanser")]);
        let source = StaticSource(Err("unexpected end of input"));
        assert!(store.load(&source).await.is_err());
        assert!(store.is_empty());
    }

    #[tokio::test]
    async fn test_reload_replaces_list() {
        let mut store = CatalogStore::from_products(vec![product("1", "cleanser")]);
        let source = StaticSource(Ok(vec![product("9", "serum")]));
        store.load(&source).await.unwrap();
        assert!(store.get(&ProductId::from("1")).is_none());
        assert!(store.get(&ProductId::from("9")).is_some());
    }

    #[test]
    fn test_categories_distinct_in_first_seen_order() {
        let store = CatalogStore::from_products(vec![
            product("1", "toner"),
            product("2", "cleanser"),
            product("3", "toner"),
            product("4", ""),
        ]);
        assert_eq!(store.categories(), vec!["toner", "cleanser"]);
    }
}
