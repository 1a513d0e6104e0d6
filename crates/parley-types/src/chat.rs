//! Conversation and turn types for Parley.
//!
//! A [`Conversation`] is the ordered turn history of one session. It is
//! seeded with a hidden system instruction and only ever grows: turns are
//! appended, never removed, edited or reordered.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

// Re-export MessageRole from llm module (turns and provider messages share it).
pub use crate::llm::MessageRole;

use crate::llm::Message;

/// Instruction seeded as the first turn of every conversation.
pub const SEED_SYSTEM_PROMPT: &str = "You are a helpful assistant.";

/// One message in a conversation, tagged with a role and text content.
///
/// Fields are private so a turn cannot change after it is created.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Turn {
    role: MessageRole,
    content: String,
}

impl Turn {
    pub fn system(content: impl Into<String>) -> Self {
        Self {
            role: MessageRole::System,
            content: content.into(),
        }
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: MessageRole::User,
            content: content.into(),
        }
    }

    pub fn assistant(content: impl Into<String>) -> Self {
        Self {
            role: MessageRole::Assistant,
            content: content.into(),
        }
    }

    pub fn role(&self) -> MessageRole {
        self.role
    }

    pub fn content(&self) -> &str {
        &self.content
    }

    /// Whether this turn should be shown to the user.
    pub fn is_displayable(&self) -> bool {
        self.role != MessageRole::System
    }
}

impl From<&Turn> for Message {
    fn from(turn: &Turn) -> Self {
        Message {
            role: turn.role,
            content: turn.content.clone(),
        }
    }
}

/// The full ordered turn history for one session.
///
/// Invariant: `turns[0]` is the system seed. Only user and assistant turns
/// can be appended afterwards.
#[derive(Debug, Clone, Serialize)]
pub struct Conversation {
    id: Uuid,
    created_at: DateTime<Utc>,
    turns: Vec<Turn>,
}

impl Conversation {
    /// Create a conversation seeded with [`SEED_SYSTEM_PROMPT`].
    pub fn new() -> Self {
        Self {
            id: Uuid::now_v7(),
            created_at: Utc::now(),
            turns: vec![Turn::system(SEED_SYSTEM_PROMPT)],
        }
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// All turns in insertion order, system seed included.
    pub fn turns(&self) -> &[Turn] {
        &self.turns
    }

    /// Number of turns, system seed included.
    pub fn len(&self) -> usize {
        self.turns.len()
    }

    /// Always false: a conversation holds at least its seed turn.
    pub fn is_empty(&self) -> bool {
        self.turns.is_empty()
    }

    /// Turns that may be rendered to the user (everything but `system`).
    pub fn displayable_turns(&self) -> impl Iterator<Item = &Turn> {
        self.turns.iter().filter(|t| t.is_displayable())
    }

    /// Append a user turn and return a reference to it.
    pub fn push_user(&mut self, content: impl Into<String>) -> &Turn {
        self.push(Turn::user(content))
    }

    /// Append an assistant turn and return a reference to it.
    pub fn push_assistant(&mut self, content: impl Into<String>) -> &Turn {
        self.push(Turn::assistant(content))
    }

    /// The transcript in provider message form.
    pub fn to_messages(&self) -> Vec<Message> {
        self.turns.iter().map(Message::from).collect()
    }

    fn push(&mut self, turn: Turn) -> &Turn {
        self.turns.push(turn);
        // Just pushed, so the vec is non-empty.
        &self.turns[self.turns.len() - 1]
    }
}

impl Default for Conversation {
    fn default() -> Self {
        Self::new()
    }
}
