//! Infrastructure layer for Parley.
//!
//! Contains implementations of the ports defined in `parley-core`:
//! the OpenAI-compatible completion provider, the `config.toml` loader,
//! and API key resolution from the environment.

pub mod config;
pub mod llm;
pub mod secret;
