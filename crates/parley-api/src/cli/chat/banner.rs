//! Welcome banner and about text for chat sessions.

use console::style;
use uuid::Uuid;

/// Print the welcome banner at the start of a chat session.
///
/// Shows the model, temperature and conversation id, followed by a short
/// "get started" hint. When no credential is configured the hint explains
/// how to provide one.
pub fn print_welcome_banner(
    model: &str,
    temperature: f64,
    conversation_id: Uuid,
    provider: Option<&str>,
    api_key_env: &str,
) {
    let id = conversation_id.to_string();

    println!();
    println!("  {} {}", style("*").cyan().bold(), style("Parley").cyan().bold());
    println!("  {}", style("Chat with a language model from your terminal").dim());
    println!();
    println!("  {}        {}", style("Model:").bold(), style(model).dim());
    println!(
        "  {}  {}",
        style("Temperature:").bold(),
        style(format!("{temperature:.1}")).dim()
    );
    println!("  {} {}", style("Conversation:").bold(), style(&id[..8]).dim());
    match provider {
        Some(name) => println!("  {}     {}", style("Provider:").bold(), style(name).dim()),
        None => println!(
            "  {}     {}",
            style("Provider:").bold(),
            style("not configured").yellow()
        ),
    }
    println!();
    println!("  {}", style("Get started").bold());
    if provider.is_none() {
        println!(
            "  {}",
            style(format!(
                "1. Set your OpenAI API key with /key <value> (or export {api_key_env})"
            ))
            .dim()
        );
    } else {
        println!("  {}", style("1. Your OpenAI API key is set").dim());
    }
    println!("  {}", style("2. Pick a temperature with /temperature <0.0-1.0>").dim());
    println!("  {}", style("3. Type your question and press Enter").dim());
    println!();
    println!("  {}", style("Type /help for commands, Ctrl+D to exit").dim());
    println!("  {}", style("---").dim());
    println!();
}

/// Print the about text.
pub fn print_about() {
    println!();
    println!(
        "  {} {}",
        style("Parley").cyan().bold(),
        style(env!("CARGO_PKG_VERSION")).dim()
    );
    println!();
    println!("  A small chat front-end for OpenAI-compatible completion APIs.");
    println!("  Every question is sent together with the whole conversation so");
    println!("  far, so follow-up questions keep their context. Conversations");
    println!("  live only as long as the session; nothing is saved to disk.");
    println!();
    println!("  {}", style("Temperature").bold());
    println!(
        "  {}",
        style("Lower values give focused, repeatable answers; higher values more varied ones.")
            .dim()
    );
    println!();
}
