//! Product catalog types for Routinely.
//!
//! A `Product` is one entry of the static catalog document. Identifiers
//! arrive as either JSON strings or numbers and are normalized into
//! [`ProductId`] so that `1` and `"1"` name the same product.

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

/// Canonical string form of a product identifier.
///
/// Numbers are stored as their decimal text, so ids read from the catalog
/// compare equal to ids typed on the command line or restored from storage.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ProductId(String);

impl ProductId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ProductId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for ProductId {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self(s.trim().to_string()))
    }
}

impl From<&str> for ProductId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl From<u64> for ProductId {
    fn from(n: u64) -> Self {
        Self(n.to_string())
    }
}

impl Serialize for ProductId {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.0)
    }
}

impl<'de> Deserialize<'de> for ProductId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum RawId {
            Text(String),
            Unsigned(u64),
            Signed(i64),
            Float(f64),
        }

        Ok(match RawId::deserialize(deserializer)? {
            RawId::Text(s) => Self(s),
            RawId::Unsigned(n) => Self(n.to_string()),
            RawId::Signed(n) => Self(n.to_string()),
            RawId::Float(n) => Self(n.to_string()),
        })
    }
}

/// A single catalog entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    pub id: ProductId,
    pub name: String,
    #[serde(default)]
    pub brand: String,
    #[serde(default)]
    pub category: String,
    #[serde(default)]
    pub description: String,
    /// Image reference as given by the catalog (URL or relative path).
    #[serde(default)]
    pub image: String,
}

impl Product {
    /// Text searched by the free-text filter, lowercased.
    pub fn search_text(&self) -> String {
        format!("{} {} {}", self.name, self.brand, self.description).to_lowercase()
    }

    /// The projection sent to the assistant when building a routine.
    pub fn summary(&self) -> ProductSummary {
        ProductSummary {
            name: self.name.clone(),
            brand: self.brand.clone(),
            category: self.category.clone(),
            description: self.description.clone(),
        }
    }
}

/// The fields of a product that are embedded in a routine request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductSummary {
    pub name: String,
    pub brand: String,
    pub category: String,
    pub description: String,
}

/// The static catalog document: `{ "products": [...] }`.
///
/// A document without a `products` array is an empty catalog.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CatalogDocument {
    #[serde(default)]
    pub products: Vec<Product>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_product_id_from_number_and_string_are_equal() {
        let from_num: ProductId = serde_json::from_str("1").unwrap();
        let from_str: ProductId = serde_json::from_str("\"1\"").unwrap();
        assert_eq!(from_num, from_str);
        assert_eq!(from_num.as_str(), "1");
    }

    #[test]
    fn test_product_id_serializes_as_string() {
        let id = ProductId::from(42u64);
        assert_eq!(serde_json::to_string(&id).unwrap(), "\"42\"");
    }

    #[test]
    fn test_product_id_parse_trims() {
        let id: ProductId = " 7 ".parse().unwrap();
        assert_eq!(id, ProductId::from("7"));
    }

    #[test]
    fn test_product_defaults_optional_fields() {
        let product: Product = serde_json::from_str(r#"{"id": 3, "name": "Toner"}"#).unwrap();
        assert_eq!(product.id.as_str(), "3");
        assert!(product.brand.is_empty());
        assert!(product.description.is_empty());
        assert!(product.image.is_empty());
    }

    #[test]
    fn test_search_text_concatenates_and_lowercases() {
        let product = Product {
            id: ProductId::from("1"),
            name: "Hydra Cream".to_string(),
            brand: "CeraVe".to_string(),
            category: "moisturizer".to_string(),
            description: "For DRY skin".to_string(),
            image: String::new(),
        };
        assert_eq!(product.search_text(), "hydra cream cerave for dry skin");
    }

    #[test]
    fn test_catalog_document_without_products_is_empty() {
        let doc: CatalogDocument = serde_json::from_str("{}").unwrap();
        assert!(doc.products.is_empty());
    }

    #[test]
    fn test_summary_field_order() {
        let product = Product {
            id: ProductId::from("1"),
            name: "Cleanser".to_string(),
            brand: "A".to_string(),
            category: "cleanser".to_string(),
            description: "gentle".to_string(),
            image: "img.png".to_string(),
        };
        let json = serde_json::to_string(&product.summary()).unwrap();
        assert_eq!(
            json,
            r#"{"name":"Cleanser","brand":"A","category":"cleanser","description":"gentle"}"#
        );
    }
}
