//! API key resolution.
//!
//! - `env`: Environment variable provider (read-only)
//! - [`resolve_api_key`]: picks the first non-blank key from the explicit
//!   value and the environment, in that order

pub mod env;

use secrecy::SecretString;

use self::env::EnvSecretProvider;

/// Resolve the API key for the completion provider.
///
/// Precedence (first non-blank value wins):
/// 1. `explicit` (e.g., the `--api-key` flag or a `/key` command)
/// 2. the environment variable named `env_key`
///
/// Blank values count as absent.
pub fn resolve_api_key(explicit: Option<&str>, env_key: &str) -> Option<SecretString> {
    explicit
        .map(str::to_string)
        .filter(|key| !key.trim().is_empty())
        .or_else(|| EnvSecretProvider::new().get(env_key))
        .map(|key| SecretString::from(key.trim().to_string()))
}
