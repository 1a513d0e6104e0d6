//! Application state wiring configuration and services together.
//!
//! AppState holds the resolved configuration. Each chat or `ask` invocation
//! gets its own `SessionManager` from [`AppState::new_session`].

use std::path::PathBuf;

use secrecy::SecretString;
use tracing::warn;

use parley_core::chat::context::SessionContext;
use parley_core::chat::session::SessionManager;
use parley_core::llm::box_provider::BoxLlmProvider;
use parley_infra::config::{load_chat_config, resolve_data_dir};
use parley_infra::llm::create_provider;
use parley_infra::secret::resolve_api_key;
use parley_types::config::ChatConfig;
use parley_types::llm::LlmError;

/// Config values supplied on the command line; they win over `config.toml`.
#[derive(Debug, Default, Clone)]
pub struct ConfigOverrides {
    pub model: Option<String>,
    pub temperature: Option<f64>,
    pub base_url: Option<String>,
}

impl ConfigOverrides {
    /// Apply the overrides on top of `config`.
    pub fn apply(self, mut config: ChatConfig) -> ChatConfig {
        if let Some(model) = self.model {
            config.model = model;
        }
        if let Some(temperature) = self.temperature {
            config.temperature = temperature;
        }
        if let Some(base_url) = self.base_url {
            config.base_url = Some(base_url);
        }
        config
    }
}

/// Shared application state.
#[derive(Debug, Clone)]
pub struct AppState {
    pub config: ChatConfig,
    pub data_dir: PathBuf,
}

impl AppState {
    /// Load configuration and apply command-line overrides.
    pub async fn init(overrides: ConfigOverrides) -> anyhow::Result<Self> {
        let data_dir = resolve_data_dir();
        let config = overrides.apply(load_chat_config(&data_dir).await);
        Ok(Self { config, data_dir })
    }

    /// Build a completion provider from an API key.
    pub fn build_provider(&self, api_key: SecretString) -> Result<BoxLlmProvider, LlmError> {
        create_provider(&self.config, Some(api_key))
    }

    /// Start a new session.
    ///
    /// The provider is configured when a key resolves from `explicit_key` or
    /// the environment; otherwise the session starts without a credential.
    pub fn new_session(&self, explicit_key: Option<&str>) -> SessionManager {
        let context = SessionContext::new(self.config.temperature);
        let mut manager = SessionManager::new(context, &self.config.model, self.config.max_tokens);

        if let Some(key) = resolve_api_key(explicit_key, &self.config.api_key_env) {
            match self.build_provider(key) {
                Ok(provider) => manager.configure_provider(provider),
                Err(e) => warn!(error = %e, "Could not configure completion provider"),
            }
        }

        manager
    }
}
