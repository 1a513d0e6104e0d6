//! Main chat loop orchestration.
//!
//! Starts a session, prints the welcome banner, then reads lines until the
//! user exits. Each non-command line becomes the pending prompt and is
//! submitted through the session manager while a spinner runs.

use std::time::Duration;

use console::style;
use indicatif::{ProgressBar, ProgressStyle};
use secrecy::SecretString;
use tracing::info;

use parley_core::chat::session::{SessionManager, SubmitOutcome};
use parley_types::error::SubmitError;

use crate::state::AppState;

use super::banner::{print_about, print_welcome_banner};
use super::commands::{self, ChatCommand};
use super::input::{ChatInput, InputEvent};
use super::renderer::ChatRenderer;

/// Run the interactive chat loop.
///
/// With `quiet`, the welcome banner and the per-reply stats footer are
/// skipped; replies, command output and errors are still shown.
pub async fn run_chat_loop(
    state: &AppState,
    explicit_key: Option<&str>,
    quiet: bool,
) -> anyhow::Result<()> {
    let mut manager = state.new_session(explicit_key);
    let conversation_id = manager.ensure_conversation().id();

    if !quiet {
        print_welcome_banner(
            manager.model(),
            manager.context().temperature(),
            conversation_id,
            manager.provider_name(),
            &state.config.api_key_env,
        );
    }

    let renderer = ChatRenderer::default();
    let prompt = format!("  {} ", style("You >").green().bold());
    let (mut chat_input, _writer) = ChatInput::new(prompt)
        .map_err(|e| anyhow::anyhow!("Failed to initialize input: {e}"))?;

    loop {
        match chat_input.read_line().await {
            InputEvent::Eof => {
                println!("\n  {}", style("Session ended.").dim());
                break;
            }
            InputEvent::Interrupted => {
                println!("\n  {}", style("Press Ctrl+D to exit, or keep chatting.").dim());
                continue;
            }
            InputEvent::Message(text) => {
                if let Some(cmd) = commands::parse(&text) {
                    match cmd {
                        ChatCommand::Help => commands::print_help(),
                        ChatCommand::History => print_history(&manager, &renderer),
                        ChatCommand::Temperature(None) => {
                            println!(
                                "\n  {} {:.1}\n",
                                style("Temperature:").bold(),
                                manager.context().temperature()
                            );
                        }
                        ChatCommand::Temperature(Some(value)) => {
                            manager.context_mut().set_temperature(value);
                            println!(
                                "\n  {} Temperature set to {value:.1}\n",
                                style("*").cyan().bold()
                            );
                        }
                        ChatCommand::Key(key) => set_key(state, &mut manager, key),
                        ChatCommand::About => print_about(),
                        ChatCommand::Clear => chat_input.clear(),
                        ChatCommand::Exit => {
                            println!("\n  {}", style("Session ended.").dim());
                            break;
                        }
                        ChatCommand::Invalid(message) => {
                            println!("\n  {} {message}\n", style("!").yellow().bold());
                        }
                        ChatCommand::Unknown(cmd_name) => {
                            println!(
                                "\n  {} Unknown command: {}. Type /help for available commands.\n",
                                style("?").yellow().bold(),
                                style(cmd_name).dim()
                            );
                        }
                    }
                    continue;
                }

                manager.context_mut().set_pending_prompt(text);

                let spinner = thinking_spinner();
                let result = manager.submit_pending().await;
                spinner.finish_and_clear();

                match result {
                    Ok(SubmitOutcome::Replied(reply)) => {
                        renderer.print_reply(&reply.content);
                        renderer.print_stop_notice(reply.stop_reason);
                        if !quiet {
                            renderer.print_stats_footer(
                                reply.usage.output_tokens,
                                reply.elapsed,
                                &reply.model,
                            );
                        }
                        println!();
                    }
                    Ok(SubmitOutcome::NoReply) => {
                        println!("\n  {}\n", style("(no reply)").dim());
                    }
                    Err(e) => print_submit_error(&e, &state.config.api_key_env),
                }
            }
        }
    }

    chat_input.flush();
    manager.end_session();
    Ok(())
}

/// Spinner shown while the completion call is outstanding.
fn thinking_spinner() -> ProgressBar {
    let spinner = ProgressBar::new_spinner();
    if let Ok(template) = ProgressStyle::default_spinner().template("{spinner:.cyan} {msg}") {
        spinner.set_style(template);
    }
    spinner.set_message("thinking...");
    spinner.enable_steady_tick(Duration::from_millis(80));
    spinner
}

fn print_history(manager: &SessionManager, renderer: &ChatRenderer) {
    let turns = manager.list_displayable_turns();
    if turns.is_empty() {
        println!("\n  {}\n", style("No messages yet.").dim());
        return;
    }

    println!();
    for turn in turns {
        renderer.print_turn(turn);
        println!();
    }
}

fn set_key(state: &AppState, manager: &mut SessionManager, key: String) {
    match state.build_provider(SecretString::from(key)) {
        Ok(provider) => {
            manager.configure_provider(provider);
            info!("API key configured from chat");
            println!("\n  {} API key set.\n", style("*").cyan().bold());
        }
        Err(e) => {
            manager.clear_provider();
            println!("\n  {} Could not use that key: {e}\n", style("!").red().bold());
        }
    }
}

/// Report a submission failure next to the prompt.
fn print_submit_error(err: &SubmitError, api_key_env: &str) {
    match err {
        SubmitError::MissingCredential => {
            eprintln!("\n  {} {err}", style("!").red().bold());
            eprintln!(
                "  {}\n",
                style(format!("Use /key <value> or set {api_key_env}.")).dim()
            );
        }
        SubmitError::EmptyPrompt => {
            eprintln!("\n  {} {err}\n", style("!").yellow().bold());
        }
        SubmitError::Collaborator(e) => {
            eprintln!("\n  {} LLM error: {e}", style("!").red().bold());
            eprintln!(
                "  {}\n",
                style("Type a message to retry, /exit to quit.").dim()
            );
        }
    }
}
