//! CLI command definitions for the `parley` binary.
//!
//! Uses clap derive macros for argument parsing. Running `parley` with no
//! subcommand starts an interactive chat.

pub mod ask;
pub mod chat;
pub mod config;

use clap::{Parser, Subcommand};
use clap_complete::Shell;

use parley_types::config::snap_temperature;

use crate::state::ConfigOverrides;

/// Chat with an OpenAI-compatible model from your terminal.
#[derive(Parser)]
#[command(name = "parley", version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Output machine-readable JSON instead of styled text.
    #[arg(long, global = true)]
    pub json: bool,

    /// Only log errors, and drop the banner and stats footer; replies are
    /// still printed.
    #[arg(long, global = true)]
    pub quiet: bool,

    /// Detailed output (-v for verbose, -vv for debug/trace).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Export tracing spans via OpenTelemetry. Spans are printed to stdout,
    /// so this cannot be combined with --json.
    #[arg(long, global = true, conflicts_with = "json")]
    pub otel: bool,

    /// API key for the completion endpoint (overrides the environment).
    #[arg(long, global = true)]
    pub api_key: Option<String>,

    /// Model to chat with.
    #[arg(long, global = true)]
    pub model: Option<String>,

    /// Sampling temperature, 0.0 to 1.0 in steps of 0.1.
    #[arg(long, global = true, value_parser = parse_temperature)]
    pub temperature: Option<f64>,

    /// Base URL of an OpenAI-compatible endpoint.
    #[arg(long, global = true)]
    pub base_url: Option<String>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

impl Cli {
    /// Config values given on the command line.
    pub fn overrides(&self) -> ConfigOverrides {
        ConfigOverrides {
            model: self.model.clone(),
            temperature: self.temperature,
            base_url: self.base_url.clone(),
        }
    }
}

#[derive(Subcommand)]
pub enum Commands {
    /// Start an interactive chat session (default).
    Chat,

    /// Ask a single question and print the answer.
    Ask {
        /// The question to ask.
        #[arg(required = true, num_args = 1..)]
        prompt: Vec<String>,
    },

    /// Show the effective configuration.
    Config,

    /// Generate shell completions.
    Completions {
        /// Shell to generate completions for.
        shell: Shell,
    },
}

/// Parse a temperature the way the temperature control accepts it.
pub fn parse_temperature(raw: &str) -> Result<f64, String> {
    let value: f64 = raw
        .trim()
        .parse()
        .map_err(|_| format!("'{raw}' is not a number"))?;
    snap_temperature(value).ok_or_else(|| format!("temperature must be between 0.0 and 1.0, got {value}"))
}
