//! Per-session state for a chat front-end.
//!
//! Holds what a UI would keep between interactions: the conversation (created
//! lazily), the pending prompt input, and the temperature control.

use chrono::{DateTime, Utc};
use tracing::info;
use uuid::Uuid;

use parley_types::chat::Conversation;

/// State owned by one interactive session.
///
/// The conversation does not exist until [`SessionContext::ensure_conversation`]
/// is first called, and it is dropped together with the context.
#[derive(Debug)]
pub struct SessionContext {
    id: Uuid,
    started_at: DateTime<Utc>,
    conversation: Option<Conversation>,
    pending_prompt: String,
    temperature: f64,
}

impl SessionContext {
    /// Start a new session with the temperature control at `temperature`.
    pub fn new(temperature: f64) -> Self {
        Self {
            id: Uuid::now_v7(),
            started_at: Utc::now(),
            conversation: None,
            pending_prompt: String::new(),
            temperature,
        }
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn started_at(&self) -> DateTime<Utc> {
        self.started_at
    }

    /// The conversation, if one has been created in this session.
    pub fn conversation(&self) -> Option<&Conversation> {
        self.conversation.as_ref()
    }

    /// Return the session's conversation, seeding it on first access.
    pub fn ensure_conversation(&mut self) -> &mut Conversation {
        let session_id = self.id;
        self.conversation.get_or_insert_with(|| {
            let conversation = Conversation::new();
            info!(
                session_id = %session_id,
                conversation_id = %conversation.id(),
                "Conversation created"
            );
            conversation
        })
    }

    /// Current content of the prompt input.
    pub fn pending_prompt(&self) -> &str {
        &self.pending_prompt
    }

    pub fn set_pending_prompt(&mut self, prompt: impl Into<String>) {
        self.pending_prompt = prompt.into();
    }

    pub fn clear_pending_prompt(&mut self) {
        self.pending_prompt.clear();
    }

    /// Current value of the temperature control.
    pub fn temperature(&self) -> f64 {
        self.temperature
    }

    pub fn set_temperature(&mut self, temperature: f64) {
        self.temperature = temperature;
    }
}
