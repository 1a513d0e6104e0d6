//! Parley CLI entry point.
//!
//! Binary name: `parley`
//!
//! Parses CLI arguments, initializes tracing and configuration, then
//! dispatches to the chat loop or a one-shot command.

mod cli;
mod state;

use clap::Parser;
use clap_complete::generate;

use cli::{Cli, Commands};
use parley_observe::tracing_setup::{init_tracing, shutdown_tracing};
use state::AppState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let filter = match cli.verbose {
        0 if cli.quiet => "error",
        0 => "warn",
        1 => "info,parley_core=debug,parley_infra=debug",
        _ => "trace",
    };

    init_tracing(filter, cli.otel)
        .map_err(|e| anyhow::anyhow!("Failed to initialize tracing: {e}"))?;

    // Shell completions don't need app state
    if let Some(Commands::Completions { shell }) = &cli.command {
        let mut cmd = <Cli as clap::CommandFactory>::command();
        generate(*shell, &mut cmd, "parley", &mut std::io::stdout());
        return Ok(());
    }

    let state = AppState::init(cli.overrides()).await?;
    let api_key = cli.api_key.as_deref();

    let result = match cli.command {
        None | Some(Commands::Chat) => {
            cli::chat::loop_runner::run_chat_loop(&state, api_key, cli.quiet).await
        }
        Some(Commands::Ask { prompt }) => {
            cli::ask::ask(&state, api_key, prompt.join(" "), cli.json, cli.quiet).await
        }
        Some(Commands::Config) => cli::config::show_config(&state, api_key, cli.json),
        Some(Commands::Completions { .. }) => Ok(()),
    };

    shutdown_tracing();
    result
}
