//! Environment variable secret provider.
//!
//! A read-only provider that looks a key up as an environment variable name
//! (e.g., "OPENAI_API_KEY").

/// Environment variable secret provider.
pub struct EnvSecretProvider;

impl EnvSecretProvider {
    /// Create a new environment variable secret provider.
    pub fn new() -> Self {
        Self
    }

    /// Look up `key` as an environment variable.
    ///
    /// Unset, non-Unicode and blank values are all reported as `None`.
    pub fn get(&self, key: &str) -> Option<String> {
        match std::env::var(key) {
            Ok(val) if !val.trim().is_empty() => Some(val),
            Ok(_) => None,
            Err(std::env::VarError::NotPresent) => None,
            // Secrets must be valid strings; treat invalid Unicode as not found.
            Err(std::env::VarError::NotUnicode(_)) => None,
        }
    }
}

impl Default for EnvSecretProvider {
    fn default() -> Self {
        Self::new()
    }
}
