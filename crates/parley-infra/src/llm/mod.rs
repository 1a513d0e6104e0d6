//! LLM provider implementations.
//!
//! Contains the concrete implementation of the [`LlmProvider`] trait defined
//! in `parley-core`, and a provider factory ([`create_provider`]) that builds
//! it from a [`ChatConfig`] and a resolved API key.
//!
//! [`LlmProvider`]: parley_core::llm::provider::LlmProvider

pub mod openai_compat;

use secrecy::{ExposeSecret, SecretString};

use parley_core::llm::box_provider::BoxLlmProvider;
use parley_types::config::ChatConfig;
use parley_types::llm::LlmError;

use self::openai_compat::OpenAiCompatibleProvider;
use self::openai_compat::config::{self as oai_config, OPENAI_BASE_URL};

/// Create a [`BoxLlmProvider`] from a [`ChatConfig`].
///
/// # Errors
///
/// Returns [`LlmError::AuthenticationFailed`] if the API key is absent or
/// blank; no provider is built without a credential.
pub fn create_provider(
    config: &ChatConfig,
    api_key: Option<SecretString>,
) -> Result<BoxLlmProvider, LlmError> {
    let key = api_key
        .filter(|k| !k.expose_secret().trim().is_empty())
        .ok_or(LlmError::AuthenticationFailed)?;

    let provider = match config.base_url.as_deref() {
        Some(base_url) if base_url.trim_end_matches('/') != OPENAI_BASE_URL => {
            OpenAiCompatibleProvider::new(oai_config::custom(
                &config.provider_name,
                base_url,
                key,
                &config.model,
            ))
        }
        _ => OpenAiCompatibleProvider::openai(key, &config.model),
    };

    tracing::debug!(
        provider = %config.provider_name,
        model = %config.model,
        "Completion provider created"
    );

    Ok(BoxLlmProvider::new(provider))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_provider_without_key_fails() {
        let config = ChatConfig::default();
        let err = create_provider(&config, None).unwrap_err();
        assert!(matches!(err, LlmError::AuthenticationFailed));
    }

    #[test]
    fn test_create_provider_blank_key_fails() {
        let config = ChatConfig::default();
        let err = create_provider(&config, Some(SecretString::from("   ".to_string()))).unwrap_err();
        assert!(matches!(err, LlmError::AuthenticationFailed));
    }

    #[test]
    fn test_create_provider_default_is_openai() {
        let config = ChatConfig::default();
        let provider = create_provider(&config, Some(SecretString::from("sk-test".to_string()))).unwrap();
        assert_eq!(provider.name(), "openai");
    }

    #[test]
    fn test_create_provider_custom_base_url() {
        let config = ChatConfig {
            provider_name: "local".to_string(),
            base_url: Some("http://localhost:8080/v1".to_string()),
            ..ChatConfig::default()
        };
        let provider = create_provider(&config, Some(SecretString::from("key".to_string()))).unwrap();
        assert_eq!(provider.name(), "local");
    }
}
