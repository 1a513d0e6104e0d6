use thiserror::Error;

use crate::llm::LlmError;

/// Errors from submitting a prompt to the session manager.
///
/// `MissingCredential` and `EmptyPrompt` are validation failures: the
/// conversation is untouched and no provider call is made.
#[derive(Debug, Error)]
pub enum SubmitError {
    #[error("Please set your OpenAI API key.")]
    MissingCredential,

    #[error("Please enter your question.")]
    EmptyPrompt,

    #[error("completion failed: {0}")]
    Collaborator(#[from] LlmError),
}

/// Errors loading configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read {path}: {message}")]
    Read { path: String, message: String },

    #[error("failed to parse {path}: {message}")]
    Parse { path: String, message: String },
}
