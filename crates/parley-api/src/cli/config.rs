//! Effective configuration display.

use anyhow::Result;
use console::style;

use parley_infra::secret::resolve_api_key;

use crate::state::AppState;

/// Print the configuration after `config.toml` and flag overrides.
///
/// The API key itself is never printed, only whether one resolves.
pub fn show_config(state: &AppState, explicit_key: Option<&str>, json: bool) -> Result<()> {
    let config = &state.config;
    let has_key = resolve_api_key(explicit_key, &config.api_key_env).is_some();

    if json {
        let body = serde_json::json!({
            "version": env!("CARGO_PKG_VERSION"),
            "data_dir": state.data_dir.display().to_string(),
            "config": config,
            "api_key_configured": has_key,
        });
        println!("{}", serde_json::to_string_pretty(&body)?);
        return Ok(());
    }

    let key_status = if has_key {
        style("configured".to_string()).green()
    } else {
        style(format!("missing (set {})", config.api_key_env)).yellow()
    };

    println!();
    println!("  {} Parley v{}", style("*").cyan().bold(), env!("CARGO_PKG_VERSION"));
    println!();
    println!("  {}", style("── Config ──").dim());
    println!("  Data dir:    {}", style(state.data_dir.display()).dim());
    println!("  Provider:    {}", config.provider_name);
    println!(
        "  Base URL:    {}",
        config.base_url.as_deref().unwrap_or("https://api.openai.com/v1")
    );
    println!("  Model:       {}", style(&config.model).bold());
    println!("  Temperature: {:.1}", config.temperature);
    println!("  Max tokens:  {}", config.max_tokens);
    println!("  API key:     {key_status}");
    println!();

    Ok(())
}
