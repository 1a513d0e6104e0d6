//! Configuration types for Parley.
//!
//! `ChatConfig` represents the top-level `config.toml` that selects the
//! completion endpoint, model, and sampling defaults.

use serde::{Deserialize, Serialize};

/// Lower bound of the temperature control.
pub const TEMPERATURE_MIN: f64 = 0.0;
/// Upper bound of the temperature control.
pub const TEMPERATURE_MAX: f64 = 1.0;
/// Increment of the temperature control.
pub const TEMPERATURE_STEP: f64 = 0.1;

/// Top-level configuration for a chat session.
///
/// Loaded from `~/.parley/config.toml`. All fields have sensible defaults.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatConfig {
    /// Provider name used for logging and preset selection (e.g., "openai").
    #[serde(default = "default_provider_name")]
    pub provider_name: String,

    /// Override the provider's default base URL.
    #[serde(default)]
    pub base_url: Option<String>,

    /// Model identifier sent with every completion request.
    #[serde(default = "default_model")]
    pub model: String,

    /// Name of the environment variable holding the API key.
    #[serde(default = "default_api_key_env")]
    pub api_key_env: String,

    /// Initial value of the temperature control.
    #[serde(default = "default_temperature")]
    pub temperature: f64,

    /// Maximum tokens the provider may generate per reply.
    #[serde(default = "default_max_tokens")]
    pub max_tokens: u32,
}

fn default_provider_name() -> String {
    "openai".to_string()
}

fn default_model() -> String {
    "gpt-3.5-turbo".to_string()
}

fn default_api_key_env() -> String {
    "OPENAI_API_KEY".to_string()
}

fn default_temperature() -> f64 {
    0.5
}

fn default_max_tokens() -> u32 {
    1024
}

impl Default for ChatConfig {
    fn default() -> Self {
        Self {
            provider_name: default_provider_name(),
            base_url: None,
            model: default_model(),
            api_key_env: default_api_key_env(),
            temperature: default_temperature(),
            max_tokens: default_max_tokens(),
        }
    }
}

/// Snap a value onto the temperature control's grid, or `None` if it lies
/// outside `[TEMPERATURE_MIN, TEMPERATURE_MAX]`.
///
/// This is a UI-control concern; the session manager itself forwards any
/// temperature unchanged.
pub fn snap_temperature(value: f64) -> Option<f64> {
    if !value.is_finite() || !(TEMPERATURE_MIN..=TEMPERATURE_MAX).contains(&value) {
        return None;
    }
    // Scale by whole steps per unit so results like 0.3 come out exact.
    let steps = (1.0 / TEMPERATURE_STEP).round();
    Some((value * steps).round() / steps)
}
