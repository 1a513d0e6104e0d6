//! Session management and provider trait definitions for Parley.
//!
//! This crate defines the "port" (the `LlmProvider` trait) that the
//! infrastructure layer implements, plus the conversation session manager.
//! It depends only on `parley-types` -- never on `parley-infra` or any
//! network crate.

pub mod chat;
pub mod llm;
