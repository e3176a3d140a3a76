//! Catalog commands: products, categories, show.

use anyhow::Result;
use comfy_table::{Cell, CellAlignment, Color, ContentArrangement, Table, presets};
use console::style;

use routinely_core::catalog::view::{CatalogFilter, CatalogView, ProductCard};
use routinely_types::preferences::TextDirection;
use routinely_types::product::{Product, ProductId};

use crate::state::AppState;

use super::{require_catalog, truncate};

/// JSON form of a card: the product fields plus `selected`.
pub fn card_json(product: &Product, selected: bool) -> serde_json::Value {
    let mut value = serde_json::to_value(product).unwrap_or(serde_json::Value::Null);
    if let Some(object) = value.as_object_mut() {
        object.insert("selected".to_string(), serde_json::Value::Bool(selected));
    }
    value
}

/// Build the product table for a list of cards.
pub fn cards_table(cards: &[ProductCard<'_>], direction: TextDirection) -> Table {
    let align = if direction.is_rtl() {
        CellAlignment::Right
    } else {
        CellAlignment::Left
    };

    let mut table = Table::new();
    table.load_preset(presets::UTF8_FULL_CONDENSED);
    table.set_content_arrangement(ContentArrangement::Dynamic);

    table.set_header(vec![
        Cell::new("").fg(Color::White),
        Cell::new("ID").fg(Color::White),
        Cell::new("Name").fg(Color::White).set_alignment(align),
        Cell::new("Brand").fg(Color::White).set_alignment(align),
        Cell::new("Category").fg(Color::White).set_alignment(align),
        Cell::new("Description").fg(Color::White).set_alignment(align),
    ]);

    for card in cards {
        let marker = if card.selected {
            Cell::new("●").fg(Color::Green)
        } else {
            Cell::new("○").fg(Color::DarkGrey)
        };
        let product = card.product;
        table.add_row(vec![
            marker,
            Cell::new(product.id.as_str()).fg(Color::DarkGrey),
            Cell::new(&product.name).fg(Color::Cyan).set_alignment(align),
            Cell::new(&product.brand).set_alignment(align),
            Cell::new(&product.category).fg(Color::DarkGrey).set_alignment(align),
            Cell::new(truncate(&product.description, 50)).set_alignment(align),
        ]);
    }

    table
}

/// `rtn products [--category C] [--search S]`
pub async fn list_products(
    state: &mut AppState,
    category: Option<String>,
    search: Option<String>,
    json: bool,
) -> Result<()> {
    if !require_catalog(state, json).await {
        return Ok(());
    }

    let filter = CatalogFilter::new(category, search.unwrap_or_default());
    let view = state.app.render(&filter);

    if json {
        let cards: Vec<serde_json::Value> = view
            .cards()
            .iter()
            .map(|card| card_json(card.product, card.selected))
            .collect();
        println!("{}", serde_json::to_string_pretty(&cards)?);
        return Ok(());
    }

    match view {
        CatalogView::Placeholder(placeholder) => {
            println!();
            println!("  {} {placeholder}", style("i").blue().bold());
            println!();
        }
        CatalogView::Cards(cards) => {
            let table = cards_table(&cards, state.app.direction());
            let selected = cards.iter().filter(|c| c.selected).count();
            println!();
            println!("{table}");
            println!();
            println!(
                "  {} product{}, {} selected. Toggle with {}",
                style(cards.len()).bold(),
                if cards.len() == 1 { "" } else { "s" },
                style(selected).bold(),
                style("rtn select <id>").yellow()
            );
            println!();
        }
    }

    Ok(())
}

/// `rtn categories`
pub async fn list_categories(state: &mut AppState, json: bool) -> Result<()> {
    if !require_catalog(state, json).await {
        return Ok(());
    }

    let categories = state.app.catalog().categories();

    if json {
        println!("{}", serde_json::to_string_pretty(&categories)?);
        return Ok(());
    }

    println!();
    println!("  {}", style("All categories").bold());
    for category in &categories {
        let count = state
            .app
            .catalog()
            .products()
            .iter()
            .filter(|p| &p.category == category)
            .count();
        println!(
            "  {} {} {}",
            style("•").dim(),
            style(category).cyan(),
            style(format!("({count})")).dim()
        );
    }
    println!();

    Ok(())
}

/// `rtn show <id>`: the expanded card with the full description.
pub async fn show_product(state: &mut AppState, id: &ProductId, json: bool) -> Result<()> {
    if !require_catalog(state, json).await {
        return Ok(());
    }

    let product = state
        .app
        .catalog()
        .get(id)
        .ok_or_else(|| anyhow::anyhow!("No product with id '{id}'"))?;
    let selected = state.app.selection().contains(id);

    if json {
        println!("{}", serde_json::to_string_pretty(&card_json(product, selected))?);
        return Ok(());
    }

    println!();
    println!("  {}", style(&product.name).cyan().bold());
    if !product.brand.is_empty() {
        println!("  {}", style(&product.brand).dim());
    }
    println!();
    println!("  {}", style("── Details ──").dim());
    println!("  {}       {}", style("ID:").bold(), product.id);
    println!("  {} {}", style("Category:").bold(), product.category);
    println!(
        "  {} {}",
        style("Selected:").bold(),
        if selected {
            style("yes").green()
        } else {
            style("no").dim()
        }
    );
    if !product.image.is_empty() {
        println!("  {}    {}", style("Image:").bold(), style(&product.image).dim());
    }
    println!();
    println!("  {}", style("── Description ──").dim());
    if product.description.is_empty() {
        println!("  {}", style("(none)").dim());
    } else {
        for line in product.description.lines() {
            println!("  {line}");
        }
    }
    println!();

    Ok(())
}
