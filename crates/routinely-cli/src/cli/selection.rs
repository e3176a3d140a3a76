//! Selection commands: select (toggle), remove, clear, selected.

use anyhow::Result;
use console::style;
use dialoguer::Confirm;

use routinely_core::catalog::view::CatalogView;
use routinely_types::preferences::TextDirection;
use routinely_types::product::ProductId;

use crate::state::{AppState, ConcreteApp};

use super::products::{card_json, cards_table};
use super::require_catalog;

/// Print the selected-items list (or its placeholder).
pub fn print_selected_list(app: &ConcreteApp, direction: TextDirection) {
    match app.render_selected() {
        CatalogView::Placeholder(placeholder) => {
            println!();
            println!("  {} {placeholder}", style("i").blue().bold());
            println!();
        }
        CatalogView::Cards(cards) => {
            println!();
            println!("{}", cards_table(&cards, direction));
            println!();
            println!(
                "  {} selected. Generate a routine with {}",
                style(cards.len()).bold(),
                style("rtn routine").yellow()
            );
            println!();
        }
    }
}

/// `rtn select <id>...`
pub async fn toggle(state: &mut AppState, ids: Vec<ProductId>, json: bool) -> Result<()> {
    if !require_catalog(state, json).await {
        return Ok(());
    }

    if let Some(unknown) = ids.iter().find(|id| state.app.catalog().get(id).is_none()) {
        anyhow::bail!("No product with id '{unknown}'");
    }

    let mut results = Vec::with_capacity(ids.len());
    for id in ids {
        let selected = state.app.toggle(id.clone()).await?;
        results.push((id, selected));
    }

    if json {
        let entries: Vec<serde_json::Value> = results
            .iter()
            .map(|(id, selected)| serde_json::json!({"id": id, "selected": selected}))
            .collect();
        println!("{}", serde_json::to_string_pretty(&entries)?);
        return Ok(());
    }

    for (id, selected) in &results {
        let name = state
            .app
            .catalog()
            .get(id)
            .map(|p| p.name.as_str())
            .unwrap_or_default();
        if *selected {
            println!("  {} Selected {} {}", style("✓").green().bold(), name, style(id).dim());
        } else {
            println!("  {} Unselected {} {}", style("○").dim(), name, style(id).dim());
        }
    }
    Ok(())
}

/// `rtn remove <id>...`
///
/// Ids need not be in the catalog, so stale selections can be dropped.
pub async fn remove(state: &mut AppState, ids: Vec<ProductId>, json: bool) -> Result<()> {
    let mut removed = Vec::new();
    for id in ids {
        let was_selected = state.app.selection().contains(&id);
        state.app.remove(&id).await?;
        if was_selected {
            removed.push(id);
        }
    }

    if json {
        println!("{}", serde_json::json!({"removed": removed}));
        return Ok(());
    }

    if removed.is_empty() {
        println!("  {} Nothing to remove.", style("i").blue().bold());
    } else {
        for id in &removed {
            println!("  {} Removed {}", style("✓").red().bold(), id);
        }
    }
    Ok(())
}

/// `rtn clear [--yes]`
pub async fn clear(state: &mut AppState, yes: bool, json: bool) -> Result<()> {
    let count = state.app.selection().len();
    if count == 0 {
        if json {
            println!("{}", serde_json::json!({"cleared": 0}));
        } else {
            println!("  {} Selection is already empty.", style("i").blue().bold());
        }
        return Ok(());
    }

    if !yes && !json {
        let confirmed = Confirm::new()
            .with_prompt(format!(
                "Clear all {} selected product{}?",
                style(count).red().bold(),
                if count == 1 { "" } else { "s" }
            ))
            .default(false)
            .interact()?;

        if !confirmed {
            println!("  Cancelled.");
            return Ok(());
        }
    }

    state.app.clear_selection().await?;

    if json {
        println!("{}", serde_json::json!({"cleared": count}));
    } else {
        println!("  {} Selection cleared.", style("✓").red().bold());
    }
    Ok(())
}

/// `rtn selected`
pub async fn show_selected(state: &mut AppState, json: bool) -> Result<()> {
    if !require_catalog(state, json).await {
        return Ok(());
    }

    if json {
        let cards: Vec<serde_json::Value> = state
            .app
            .render_selected()
            .cards()
            .iter()
            .map(|card| card_json(card.product, true))
            .collect();
        println!("{}", serde_json::to_string_pretty(&cards)?);
        return Ok(());
    }

    print_selected_list(&state.app, state.app.direction());
    Ok(())
}
