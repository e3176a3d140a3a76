//! CLI command definitions and dispatch for the `rtn` binary.
//!
//! Uses clap derive macros for argument parsing. Product commands mirror
//! the catalog widget (`products`, `select`, `selected`), conversation
//! commands drive the assistant (`routine`, `ask`, `chat`).

pub mod browser;
pub mod chat;
pub mod direction;
pub mod products;
pub mod routine;
pub mod selection;
pub mod view;

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use clap_complete::Shell;
use console::style;

use routinely_types::product::ProductId;

use crate::state::{AppState, CatalogStatus, StateOptions};

/// Build a personalized beauty routine from a product catalog.
#[derive(Parser)]
#[command(name = "rtn", version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Output machine-readable JSON instead of styled text.
    #[arg(long, global = true)]
    pub json: bool,

    /// Suppress all output except errors.
    #[arg(long, global = true)]
    pub quiet: bool,

    /// Detailed output (-v for verbose, -vv for debug/trace).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Data directory (defaults to $ROUTINELY_DATA_DIR or ~/.routinely).
    #[arg(long, global = true, value_name = "DIR")]
    pub data_dir: Option<PathBuf>,

    /// Assistant endpoint URL, overriding config.toml.
    #[arg(long, global = true, value_name = "URL")]
    pub endpoint: Option<String>,

    /// Catalog file path or URL, overriding config.toml.
    #[arg(long, global = true, value_name = "PATH|URL")]
    pub catalog: Option<String>,

    /// Write log lines to stderr as JSON.
    #[arg(long, global = true)]
    pub log_json: bool,

    /// Export tracing spans through OpenTelemetry (stdout exporter).
    #[arg(long, global = true)]
    pub otel: bool,

    #[command(subcommand)]
    pub command: Commands,
}

impl Cli {
    pub fn state_options(&self) -> StateOptions {
        StateOptions {
            data_dir: self.data_dir.clone(),
            endpoint: self.endpoint.clone(),
            catalog: self.catalog.clone(),
        }
    }
}

#[derive(Subcommand)]
pub enum Commands {
    /// List catalog products, optionally filtered.
    #[command(alias = "ls")]
    Products {
        /// Show only this category.
        #[arg(short, long)]
        category: Option<String>,

        /// Case-insensitive text matched against name, brand and description.
        #[arg(short, long)]
        search: Option<String>,
    },

    /// List the categories present in the catalog.
    Categories,

    /// Show one product with its full description.
    Show {
        /// Product id.
        id: ProductId,
    },

    /// Toggle products in or out of the selection.
    #[command(alias = "toggle")]
    Select {
        /// Product ids to toggle.
        #[arg(required = true)]
        ids: Vec<ProductId>,
    },

    /// Remove products from the selection.
    #[command(alias = "rm")]
    Remove {
        /// Product ids to remove.
        #[arg(required = true)]
        ids: Vec<ProductId>,
    },

    /// Clear the whole selection.
    Clear {
        /// Skip the confirmation prompt.
        #[arg(short, long)]
        yes: bool,
    },

    /// List the selected products.
    Selected,

    /// Ask the assistant for a routine built from the selected products.
    Routine,

    /// Send one follow-up question to the assistant.
    Ask {
        /// The question (words are joined with spaces).
        #[arg(required = true, trailing_var_arg = true)]
        text: Vec<String>,
    },

    /// Print the conversation history.
    History,

    /// Interactive chat with the assistant.
    Chat,

    /// Full-screen product browser.
    Browse,

    /// Show or change the text direction.
    Dir {
        #[command(subcommand)]
        action: Option<DirAction>,
    },

    /// Generate shell completions.
    Completions {
        /// Shell to generate completions for.
        shell: Shell,
    },
}

#[derive(Subcommand, Debug, Clone, Copy, PartialEq, Eq)]
pub enum DirAction {
    /// Print the current direction.
    Show,
    /// Flip between ltr and rtl.
    Toggle,
    /// Left-to-right.
    Ltr,
    /// Right-to-left.
    Rtl,
}

/// Load the catalog, printing the failure placeholder when it is unavailable.
///
/// Returns `false` when the caller should stop.
pub async fn require_catalog(state: &mut AppState, json: bool) -> bool {
    if state.ensure_catalog().await {
        return true;
    }

    let reason = match state.catalog_status() {
        CatalogStatus::Failed(reason) => reason.clone(),
        _ => String::new(),
    };

    if json {
        println!(
            "{}",
            serde_json::json!({"error": "Failed to load products", "reason": reason})
        );
    } else {
        println!();
        println!("  {} Failed to load products", style("!").red().bold());
        println!(
            "  {}",
            style(format!("{} ({reason})", state.catalog_location())).dim()
        );
        println!();
    }
    false
}

/// Truncate to `max` characters, appending an ellipsis when cut.
pub fn truncate(text: &str, max: usize) -> String {
    if text.chars().count() <= max {
        return text.to_string();
    }
    let kept: String = text.chars().take(max.saturating_sub(3)).collect();
    format!("{kept}...")
}
