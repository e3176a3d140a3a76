//! Routinely terminal entry point.
//!
//! Binary name: `rtn`
//!
//! Parses CLI arguments, sets up tracing, restores persisted state, then
//! dispatches to the command handler. Runs on a single-threaded runtime:
//! one request is in flight at a time.

mod cli;
mod state;

use clap::Parser;
use clap_complete::generate;

use routinely_observe::tracing_setup::{TracingOptions, init_tracing, shutdown_tracing};

use cli::browser::BrowserExit;
use cli::{Cli, Commands};
use state::AppState;

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Set up tracing based on verbosity
    let options = TracingOptions::from_verbosity(cli.verbose, cli.quiet)
        .with_json(cli.log_json)
        .with_otel(cli.otel);
    init_tracing(&options).map_err(|e| anyhow::anyhow!("Failed to initialize tracing: {e}"))?;

    // Shell completions don't need app state
    if let Commands::Completions { shell } = &cli.command {
        let mut cmd = <Cli as clap::CommandFactory>::command();
        generate(*shell, &mut cmd, "rtn", &mut std::io::stdout());
        return Ok(());
    }

    let result = run(cli).await;
    shutdown_tracing();
    result
}

async fn run(cli: Cli) -> anyhow::Result<()> {
    let mut state = AppState::init(cli.state_options()).await?;
    let json = cli.json;
    let quiet = cli.quiet;

    match cli.command {
        Commands::Products { category, search } => {
            cli::products::list_products(&mut state, category, search, json).await?;
        }

        Commands::Categories => {
            cli::products::list_categories(&mut state, json).await?;
        }

        Commands::Show { id } => {
            cli::products::show_product(&mut state, &id, json).await?;
        }

        Commands::Select { ids } => {
            cli::selection::toggle(&mut state, ids, json).await?;
        }

        Commands::Remove { ids } => {
            cli::selection::remove(&mut state, ids, json).await?;
        }

        Commands::Clear { yes } => {
            cli::selection::clear(&mut state, yes, json).await?;
        }

        Commands::Selected => {
            cli::selection::show_selected(&mut state, json).await?;
        }

        Commands::Routine => {
            cli::routine::generate_routine(&mut state, json, quiet).await?;
        }

        Commands::Ask { text } => {
            cli::routine::ask(&mut state, &text.join(" "), json, quiet).await?;
        }

        Commands::History => {
            cli::routine::show_history(&state, json)?;
        }

        Commands::Chat => {
            cli::chat::loop_runner::run_chat_loop(&mut state).await?;
        }

        Commands::Browse => {
            if cli::browser::run_browser(&mut state).await? == BrowserExit::Generate {
                cli::routine::generate_routine(&mut state, false, quiet).await?;
            }
        }

        Commands::Dir { action } => {
            cli::direction::run(&mut state, action, json).await?;
        }

        // Handled before state initialization
        Commands::Completions { .. } => {}
    }

    Ok(())
}
