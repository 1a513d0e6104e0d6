//! Session manager for chat sessions.
//!
//! Owns the [`SessionContext`] and the completion provider, and mediates
//! turn submission: validate, append the user turn, call the provider with
//! the full transcript, append the assistant turn.

use std::time::{Duration, Instant};

use chrono::Utc;
use tracing::{Instrument, debug, info, info_span, warn};
use uuid::Uuid;

use parley_types::chat::{Conversation, Turn};
use parley_types::error::SubmitError;
use parley_types::llm::{CompletionRequest, StopReason, Usage};

use crate::llm::box_provider::BoxLlmProvider;

use super::context::SessionContext;

/// An assistant reply appended to the conversation.
#[derive(Debug, Clone)]
pub struct Reply {
    /// Provider-assigned response id.
    pub id: String,
    pub content: String,
    pub model: String,
    pub stop_reason: StopReason,
    pub usage: Usage,
    pub elapsed: Duration,
}

/// Result of a submission that passed validation and reached the provider.
#[derive(Debug, Clone)]
pub enum SubmitOutcome {
    /// The provider returned text; an assistant turn was appended.
    Replied(Reply),
    /// The provider returned no text; only the user turn was appended.
    NoReply,
}

/// Manages the conversation of a single interactive session.
///
/// A configured provider stands for a configured credential: without one,
/// every submission fails with [`SubmitError::MissingCredential`].
pub struct SessionManager {
    context: SessionContext,
    provider: Option<BoxLlmProvider>,
    model: String,
    max_tokens: u32,
}

impl SessionManager {
    /// Create a session manager with no provider configured yet.
    pub fn new(context: SessionContext, model: impl Into<String>, max_tokens: u32) -> Self {
        Self {
            context,
            provider: None,
            model: model.into(),
            max_tokens,
        }
    }

    /// Builder-style variant of [`SessionManager::configure_provider`].
    pub fn with_provider(mut self, provider: BoxLlmProvider) -> Self {
        self.configure_provider(provider);
        self
    }

    pub fn context(&self) -> &SessionContext {
        &self.context
    }

    pub fn context_mut(&mut self) -> &mut SessionContext {
        &mut self.context
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    /// Install the completion provider, replacing any previous one.
    pub fn configure_provider(&mut self, provider: BoxLlmProvider) {
        info!(
            session_id = %self.context.id(),
            provider = provider.name(),
            "Completion provider configured"
        );
        self.provider = Some(provider);
    }

    /// Remove the completion provider; later submissions are rejected.
    pub fn clear_provider(&mut self) {
        self.provider = None;
    }

    /// Whether a provider (and thus a credential) is configured.
    pub fn has_credential(&self) -> bool {
        self.provider.is_some()
    }

    pub fn provider_name(&self) -> Option<&str> {
        self.provider.as_ref().map(|p| p.name())
    }

    /// Return the session's conversation, seeding it on first access.
    pub fn ensure_conversation(&mut self) -> &Conversation {
        self.context.ensure_conversation()
    }

    /// All non-system turns in insertion order.
    ///
    /// Empty when no conversation has been created yet.
    pub fn list_displayable_turns(&self) -> Vec<&Turn> {
        self.context
            .conversation()
            .map(|c| c.displayable_turns().collect())
            .unwrap_or_default()
    }

    /// Submit a prompt with an explicit temperature.
    ///
    /// The credential check runs before the prompt check. Validation failures
    /// leave the conversation untouched. Once validation passes the user turn
    /// is appended and stays, even if the provider call fails.
    pub async fn submit_prompt(
        &mut self,
        prompt: &str,
        temperature: f64,
    ) -> Result<SubmitOutcome, SubmitError> {
        let Some(provider) = self.provider.as_ref() else {
            debug!(session_id = %self.context.id(), "Submission rejected: no credential");
            return Err(SubmitError::MissingCredential);
        };

        if prompt.trim().is_empty() {
            debug!(session_id = %self.context.id(), "Submission rejected: empty prompt");
            return Err(SubmitError::EmptyPrompt);
        }

        let conversation = self.context.ensure_conversation();
        conversation.push_user(prompt);
        let conversation_id = conversation.id();

        let request = CompletionRequest {
            model: self.model.clone(),
            messages: conversation.to_messages(),
            max_tokens: self.max_tokens,
            temperature: Some(temperature),
        };

        let span = info_span!(
            "gen_ai.complete",
            gen_ai.system = provider.name(),
            gen_ai.request.model = %request.model,
            gen_ai.request.max_tokens = request.max_tokens,
            gen_ai.request.temperature = temperature,
            conversation_id = %conversation_id,
            turns = request.messages.len(),
        );

        let start = Instant::now();
        let result = provider.complete(&request).instrument(span).await;
        let elapsed = start.elapsed();

        let response = match result {
            Ok(response) => response,
            Err(err) => {
                warn!(
                    conversation_id = %conversation_id,
                    error = %err,
                    "Completion failed; user turn kept"
                );
                return Err(SubmitError::Collaborator(err));
            }
        };

        if response.content.is_empty() {
            debug!(conversation_id = %conversation_id, "Provider returned no text");
            return Ok(SubmitOutcome::NoReply);
        }

        self.context
            .ensure_conversation()
            .push_assistant(response.content.clone());

        info!(
            conversation_id = %conversation_id,
            response_id = %response.id,
            stop_reason = %response.stop_reason,
            input_tokens = response.usage.input_tokens,
            output_tokens = response.usage.output_tokens,
            elapsed_ms = elapsed.as_millis() as u64,
            "Assistant turn appended"
        );

        Ok(SubmitOutcome::Replied(Reply {
            id: response.id,
            content: response.content,
            model: response.model,
            stop_reason: response.stop_reason,
            usage: response.usage,
            elapsed,
        }))
    }

    /// Submit whatever is in the prompt input, at the control's temperature.
    ///
    /// The prompt input is cleared afterwards on every outcome.
    pub async fn submit_pending(&mut self) -> Result<SubmitOutcome, SubmitError> {
        let prompt = self.context.pending_prompt().to_string();
        let temperature = self.context.temperature();

        let result = self.submit_prompt(&prompt, temperature).await;
        self.context.clear_pending_prompt();
        result
    }

    /// End the session, discarding its conversation.
    pub fn end_session(self) -> Option<Uuid> {
        let conversation_id = self.context.conversation().map(Conversation::id);
        let duration = Utc::now() - self.context.started_at();
        info!(
            session_id = %self.context.id(),
            turns = self.context.conversation().map_or(0, Conversation::len),
            duration_secs = duration.num_seconds(),
            "Session ended"
        );
        conversation_id
    }
}

#[cfg(test)]
mod tests {
    use std::sync::{Arc, Mutex};

    use parley_types::chat::MessageRole;
    use parley_types::llm::{CompletionResponse, LlmError, StopReason};

    use crate::llm::provider::LlmProvider;

    use super::*;

    #[derive(Clone)]
    enum MockResult {
        Text(String),
        Truncated(String),
        Fail,
    }

    /// Provider that records every request and answers with a fixed result.
    struct MockProvider {
        result: MockResult,
        calls: Arc<Mutex<Vec<CompletionRequest>>>,
    }

    impl MockProvider {
        fn new(result: MockResult) -> (Self, Arc<Mutex<Vec<CompletionRequest>>>) {
            let calls = Arc::new(Mutex::new(Vec::new()));
            (
                Self {
                    result,
                    calls: Arc::clone(&calls),
                },
                calls,
            )
        }
    }

    impl LlmProvider for MockProvider {
        fn name(&self) -> &str {
            "mock"
        }

        async fn complete(
            &self,
            request: &CompletionRequest,
        ) -> Result<CompletionResponse, LlmError> {
            self.calls.lock().unwrap().push(request.clone());
            let (text, stop_reason) = match &self.result {
                MockResult::Text(text) => (text, StopReason::EndTurn),
                MockResult::Truncated(text) => (text, StopReason::MaxTokens),
                MockResult::Fail => {
                    return Err(LlmError::Provider {
                        message: "connection reset".to_string(),
                    });
                }
            };
            Ok(CompletionResponse {
                id: "resp-1".to_string(),
                content: text.clone(),
                model: "mock-model".to_string(),
                stop_reason,
                usage: Usage {
                    input_tokens: 12,
                    output_tokens: 5,
                },
            })
        }
    }

    fn manager_with(result: MockResult) -> (SessionManager, Arc<Mutex<Vec<CompletionRequest>>>) {
        let (provider, calls) = MockProvider::new(result);
        let manager = SessionManager::new(SessionContext::new(0.5), "gpt-3.5-turbo", 256)
            .with_provider(BoxLlmProvider::new(provider));
        (manager, calls)
    }

    fn turn_pairs(manager: &mut SessionManager) -> Vec<(MessageRole, String)> {
        manager
            .ensure_conversation()
            .turns()
            .iter()
            .map(|t| (t.role(), t.content().to_string()))
            .collect()
    }

    #[test]
    fn test_ensure_conversation_same_identity_single_seed() {
        let mut manager = SessionManager::new(SessionContext::new(0.5), "m", 16);
        let first = manager.ensure_conversation().id();
        let second = manager.ensure_conversation().id();
        assert_eq!(first, second);

        let conversation = manager.ensure_conversation();
        let system_turns = conversation
            .turns()
            .iter()
            .filter(|t| t.role() == MessageRole::System)
            .count();
        assert_eq!(system_turns, 1);
        assert_eq!(conversation.turns()[0].role(), MessageRole::System);
    }

    #[test]
    fn test_list_displayable_turns_before_conversation_exists() {
        let manager = SessionManager::new(SessionContext::new(0.5), "m", 16);
        assert!(manager.list_displayable_turns().is_empty());
    }

    #[tokio::test]
    async fn test_successful_submission_appends_two_turns() {
        let (mut manager, calls) =
            manager_with(MockResult::Text("Gravity pulls masses together.".to_string()));
        manager.ensure_conversation();
        let before = manager.ensure_conversation().len();

        let outcome = manager.submit_prompt("Explain gravity", 0.5).await.unwrap();
        match outcome {
            SubmitOutcome::Replied(reply) => {
                assert_eq!(reply.content, "Gravity pulls masses together.");
                assert_eq!(reply.id, "resp-1");
                assert_eq!(reply.model, "mock-model");
                assert_eq!(reply.stop_reason, StopReason::EndTurn);
                assert_eq!(reply.usage.output_tokens, 5);
            }
            SubmitOutcome::NoReply => panic!("expected a reply"),
        }

        let turns = turn_pairs(&mut manager);
        assert_eq!(turns.len(), before + 2);
        assert_eq!(
            turns[before..].to_vec(),
            vec![
                (MessageRole::User, "Explain gravity".to_string()),
                (
                    MessageRole::Assistant,
                    "Gravity pulls masses together.".to_string()
                ),
            ]
        );
        assert_eq!(calls.lock().unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_provider_receives_full_transcript_and_raw_temperature() {
        let (mut manager, calls) = manager_with(MockResult::Text("ok".to_string()));
        manager.submit_prompt("first", 0.3).await.unwrap();
        manager.submit_prompt("second", 1.7).await.unwrap();

        let calls = calls.lock().unwrap();
        assert_eq!(calls.len(), 2);

        let last = &calls[1];
        assert_eq!(last.temperature, Some(1.7));
        assert_eq!(last.model, "gpt-3.5-turbo");
        assert_eq!(last.max_tokens, 256);
        let roles: Vec<MessageRole> = last.messages.iter().map(|m| m.role).collect();
        assert_eq!(
            roles,
            vec![
                MessageRole::System,
                MessageRole::User,
                MessageRole::Assistant,
                MessageRole::User,
            ]
        );
        assert_eq!(last.messages[0].content, "You are a helpful assistant.");
        assert_eq!(last.messages[3].content, "second");
    }

    #[tokio::test]
    async fn test_empty_prompt_is_rejected_without_call() {
        let (mut manager, calls) = manager_with(MockResult::Text("unused".to_string()));
        let before = manager.ensure_conversation().len();

        for prompt in ["", "   ", "\n\t"] {
            let err = manager.submit_prompt(prompt, 0.5).await.unwrap_err();
            assert!(matches!(err, SubmitError::EmptyPrompt));
        }

        assert_eq!(manager.ensure_conversation().len(), before);
        assert!(calls.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_missing_credential_rejected_regardless_of_prompt() {
        let mut manager = SessionManager::new(SessionContext::new(0.5), "m", 16);
        assert!(!manager.has_credential());

        for prompt in ["Explain gravity", ""] {
            let err = manager.submit_prompt(prompt, 0.5).await.unwrap_err();
            assert!(matches!(err, SubmitError::MissingCredential));
        }
        assert!(manager.list_displayable_turns().is_empty());
    }

    #[tokio::test]
    async fn test_cleared_provider_blocks_submission() {
        let (mut manager, calls) = manager_with(MockResult::Text("ok".to_string()));
        manager.clear_provider();

        let err = manager.submit_prompt("hello", 0.5).await.unwrap_err();
        assert!(matches!(err, SubmitError::MissingCredential));
        assert!(calls.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_empty_reply_appends_only_user_turn() {
        let (mut manager, _calls) = manager_with(MockResult::Text(String::new()));
        let outcome = manager.submit_prompt("Say nothing", 0.5).await.unwrap();
        assert!(matches!(outcome, SubmitOutcome::NoReply));

        let shown = manager.list_displayable_turns();
        assert_eq!(shown.len(), 1);
        assert_eq!(shown[0], &Turn::user("Say nothing"));
    }

    #[tokio::test]
    async fn test_provider_failure_keeps_user_turn() {
        let (mut manager, calls) = manager_with(MockResult::Fail);
        let err = manager.submit_prompt("Explain gravity", 0.5).await.unwrap_err();
        assert!(matches!(err, SubmitError::Collaborator(LlmError::Provider { .. })));
        assert_eq!(calls.lock().unwrap().len(), 1);

        let shown = manager.list_displayable_turns();
        assert_eq!(shown, vec![&Turn::user("Explain gravity")]);
    }

    #[tokio::test]
    async fn test_submit_pending_clears_prompt_on_success() {
        let (mut manager, calls) = manager_with(MockResult::Text("hi".to_string()));
        manager.context_mut().set_pending_prompt("hello");
        manager.context_mut().set_temperature(0.8);

        manager.submit_pending().await.unwrap();

        assert!(manager.context().pending_prompt().is_empty());
        assert_eq!(calls.lock().unwrap()[0].temperature, Some(0.8));
    }

    #[tokio::test]
    async fn test_submit_pending_clears_prompt_on_validation_failure() {
        let mut manager = SessionManager::new(SessionContext::new(0.5), "m", 16);
        manager.context_mut().set_pending_prompt("no key yet");

        let err = manager.submit_pending().await.unwrap_err();
        assert!(matches!(err, SubmitError::MissingCredential));
        assert!(manager.context().pending_prompt().is_empty());
    }

    #[tokio::test]
    async fn test_submit_pending_clears_blank_prompt() {
        let (mut manager, calls) = manager_with(MockResult::Text("unused".to_string()));
        manager.context_mut().set_pending_prompt("   ");

        let err = manager.submit_pending().await.unwrap_err();
        assert!(matches!(err, SubmitError::EmptyPrompt));
        assert!(manager.context().pending_prompt().is_empty());
        assert!(calls.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_submit_pending_clears_prompt_on_provider_failure() {
        let (mut manager, calls) = manager_with(MockResult::Fail);
        manager.context_mut().set_pending_prompt("Explain gravity");

        let err = manager.submit_pending().await.unwrap_err();
        assert!(matches!(err, SubmitError::Collaborator(_)));
        assert!(manager.context().pending_prompt().is_empty());
        assert_eq!(calls.lock().unwrap().len(), 1);
        assert_eq!(
            manager.list_displayable_turns(),
            vec![&Turn::user("Explain gravity")]
        );
    }

    #[tokio::test]
    async fn test_truncated_reply_keeps_stop_reason() {
        let (mut manager, _calls) = manager_with(MockResult::Truncated("Once upon a".to_string()));

        match manager.submit_prompt("Tell me a story", 0.5).await.unwrap() {
            SubmitOutcome::Replied(reply) => {
                assert_eq!(reply.stop_reason, StopReason::MaxTokens);
                assert_eq!(reply.content, "Once upon a");
            }
            SubmitOutcome::NoReply => panic!("expected a reply"),
        }
        assert_eq!(manager.list_displayable_turns().len(), 2);
    }

    #[tokio::test]
    async fn test_displayable_turns_never_include_system() {
        let (mut manager, _calls) = manager_with(MockResult::Text("answer".to_string()));
        for prompt in ["a", "b", "c"] {
            manager.submit_prompt(prompt, 0.5).await.unwrap();
        }

        let shown = manager.list_displayable_turns();
        assert_eq!(shown.len(), 6);
        assert!(shown.iter().all(|t| t.role() != MessageRole::System));
        let contents: Vec<&str> = shown.iter().map(|t| t.content()).collect();
        assert_eq!(contents, vec!["a", "answer", "b", "answer", "c", "answer"]);
    }

    #[tokio::test]
    async fn test_end_session_returns_conversation_id() {
        let (mut manager, _calls) = manager_with(MockResult::Text("x".to_string()));
        assert!(
            SessionManager::new(SessionContext::new(0.5), "m", 16)
                .end_session()
                .is_none()
        );

        let id = manager.ensure_conversation().id();
        assert_eq!(manager.end_session(), Some(id));
    }
}
