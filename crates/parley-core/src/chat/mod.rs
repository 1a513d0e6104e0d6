//! Conversation session lifecycle for Parley.
//!
//! `SessionContext` holds the per-session state a UI would otherwise keep in
//! a global store; `SessionManager` mediates turn submission against it.

pub mod context;
pub mod session;
