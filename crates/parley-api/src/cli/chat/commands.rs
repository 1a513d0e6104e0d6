//! Slash command parsing for the chat loop.
//!
//! Commands start with `/` and provide in-chat controls for the credential,
//! the temperature, history and help.

use console::style;

use crate::cli::parse_temperature;

/// Closing line of the help text. Ctrl+C discards the line being typed.
pub const EXIT_HINT: &str = "Ctrl+D or /exit to leave, Ctrl+C discards the current line";

/// Available slash commands in the chat loop.
#[derive(Debug, PartialEq)]
pub enum ChatCommand {
    /// Show available commands.
    Help,
    /// Re-render the conversation so far.
    History,
    /// Show the temperature, or set it when a value is given.
    Temperature(Option<f64>),
    /// Configure the API key.
    Key(String),
    /// Show what Parley is.
    About,
    /// Clear the terminal screen.
    Clear,
    /// Exit the chat session.
    Exit,
    /// A known command with a bad or missing argument.
    Invalid(String),
    /// Unknown command.
    Unknown(String),
}

/// Parse user input as a slash command.
///
/// Returns `None` if the input doesn't start with `/`.
pub fn parse(input: &str) -> Option<ChatCommand> {
    let trimmed = input.trim();
    if !trimmed.starts_with('/') {
        return None;
    }

    let parts: Vec<&str> = trimmed.splitn(2, ' ').collect();
    let cmd = parts[0].to_lowercase();
    let arg = parts
        .get(1)
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty());

    let command = match cmd.as_str() {
        "/help" | "/h" | "/?" => ChatCommand::Help,
        "/history" => ChatCommand::History,
        "/temperature" | "/temp" | "/t" => match arg {
            None => ChatCommand::Temperature(None),
            Some(raw) => match parse_temperature(&raw) {
                Ok(value) => ChatCommand::Temperature(Some(value)),
                Err(e) => ChatCommand::Invalid(e),
            },
        },
        "/key" => match arg {
            Some(key) => ChatCommand::Key(key),
            None => ChatCommand::Invalid("/key requires a value".to_string()),
        },
        "/about" => ChatCommand::About,
        "/clear" | "/cls" => ChatCommand::Clear,
        "/exit" | "/quit" | "/q" => ChatCommand::Exit,
        other => ChatCommand::Unknown(other.to_string()),
    };

    Some(command)
}

/// Print the help text listing all available commands.
pub fn print_help() {
    println!();
    println!("  {}", style("Available commands:").bold());
    println!();
    println!("  {}          {}", style("/help").cyan(), "Show this help message");
    println!("  {}       {}", style("/history").cyan(), "Show the conversation so far");
    println!(
        "  {} {}",
        style("/temperature [v]").cyan(),
        "Show or set the temperature (0.0-1.0, step 0.1)"
    );
    println!("  {}     {}", style("/key <value>").cyan(), "Set your OpenAI API key");
    println!("  {}         {}", style("/about").cyan(), "About Parley");
    println!("  {}         {}", style("/clear").cyan(), "Clear the screen");
    println!("  {}          {}", style("/exit").cyan(), "End the chat session");
    println!();
    println!("  {}", style(EXIT_HINT).dim());
    println!();
}
