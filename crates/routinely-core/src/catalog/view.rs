//! Catalog filtering and the view model the terminal front ends draw.
//!
//! Rendering is a pure function of the product list, the filter inputs and
//! the current selection. It is recomputed from scratch on every call.

use std::fmt;

use routinely_types::product::{Product, ProductId};

/// Filter inputs: the category selector and the search box.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CatalogFilter {
    /// Exact category to show. `None` or an empty string means all.
    pub category: Option<String>,
    /// Free text matched case-insensitively against name, brand and description.
    pub search: String,
}

impl CatalogFilter {
    pub fn new(category: Option<String>, search: impl Into<String>) -> Self {
        Self {
            category,
            search: search.into(),
        }
    }

    /// Whether `product` passes both the category and the search filter.
    pub fn matches(&self, product: &Product) -> bool {
        let category_match = match self.category.as_deref() {
            None | Some("") => true,
            Some(category) => product.category == category,
        };

        let needle = self.search.trim().to_lowercase();
        let search_match = needle.is_empty() || product.search_text().contains(&needle);

        category_match && search_match
    }
}

/// One product card, marked when its id is in the selection.
#[derive(Debug, Clone, PartialEq)]
pub struct ProductCard<'a> {
    pub product: &'a Product,
    pub selected: bool,
}

/// Message shown in place of an empty product list.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Placeholder {
    /// The filters matched nothing.
    NoMatch,
    /// The selected-items list is empty.
    NothingSelected,
}

impl fmt::Display for Placeholder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Placeholder::NoMatch => write!(f, "No products match your filters"),
            Placeholder::NothingSelected => write!(f, "No products selected"),
        }
    }
}

/// Either a non-empty list of cards or a placeholder message.
#[derive(Debug, Clone, PartialEq)]
pub enum CatalogView<'a> {
    Cards(Vec<ProductCard<'a>>),
    Placeholder(Placeholder),
}

impl<'a> CatalogView<'a> {
    fn from_cards(cards: Vec<ProductCard<'a>>, empty: Placeholder) -> Self {
        if cards.is_empty() {
            CatalogView::Placeholder(empty)
        } else {
            CatalogView::Cards(cards)
        }
    }

    pub fn cards(&self) -> &[ProductCard<'a>] {
        match self {
            CatalogView::Cards(cards) => cards,
            CatalogView::Placeholder(_) => &[],
        }
    }
}

/// Render the product grid for the given filter and selection.
pub fn render<'a>(
    products: &'a [Product],
    filter: &CatalogFilter,
    is_selected: impl Fn(&ProductId) -> bool,
) -> CatalogView<'a> {
    let cards = products
        .iter()
        .filter(|p| filter.matches(p))
        .map(|product| ProductCard {
            product,
            selected: is_selected(&product.id),
        })
        .collect();
    CatalogView::from_cards(cards, Placeholder::NoMatch)
}

/// Render the selected-items list: selected catalog products in catalog order.
///
/// Selected ids with no matching product are skipped.
pub fn render_selected<'a>(
    products: &'a [Product],
    is_selected: impl Fn(&ProductId) -> bool,
) -> CatalogView<'a> {
    let cards = products
        .iter()
        .filter(|p| is_selected(&p.id))
        .map(|product| ProductCard {
            product,
            selected: true,
        })
        .collect();
    CatalogView::from_cards(cards, Placeholder::NothingSelected)
}
