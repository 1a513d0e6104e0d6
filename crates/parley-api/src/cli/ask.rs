//! One-shot question command.

use anyhow::Result;
use console::style;

use parley_core::chat::session::SubmitOutcome;
use parley_types::error::SubmitError;

use crate::state::AppState;

use super::chat::renderer::ChatRenderer;

/// Ask a single question in a fresh session and print the answer.
///
/// Validation and provider failures end the command with an error, so the
/// process exits non-zero.
pub async fn ask(
    state: &AppState,
    explicit_key: Option<&str>,
    prompt: String,
    json: bool,
    quiet: bool,
) -> Result<()> {
    let mut manager = state.new_session(explicit_key);
    let conversation = manager.ensure_conversation();
    let (conversation_id, created_at) = (conversation.id(), conversation.created_at());
    manager.context_mut().set_pending_prompt(prompt);

    let result = manager.submit_pending().await;
    manager.end_session();

    let outcome = match result {
        Ok(outcome) => outcome,
        Err(SubmitError::MissingCredential) => anyhow::bail!(
            "{} Set {} or pass --api-key.",
            SubmitError::MissingCredential,
            state.config.api_key_env
        ),
        Err(e) => return Err(e.into()),
    };

    if json {
        let body = match &outcome {
            SubmitOutcome::Replied(reply) => serde_json::json!({
                "conversation_id": conversation_id.to_string(),
                "created_at": created_at.to_rfc3339(),
                "id": reply.id,
                "role": "assistant",
                "content": reply.content,
                "model": reply.model,
                "stop_reason": reply.stop_reason,
                "input_tokens": reply.usage.input_tokens,
                "output_tokens": reply.usage.output_tokens,
                "elapsed_ms": reply.elapsed.as_millis() as u64,
            }),
            SubmitOutcome::NoReply => serde_json::json!({
                "conversation_id": conversation_id.to_string(),
                "created_at": created_at.to_rfc3339(),
                "role": "assistant",
                "content": null,
            }),
        };
        println!("{}", serde_json::to_string_pretty(&body)?);
        return Ok(());
    }

    match outcome {
        SubmitOutcome::Replied(reply) => {
            let renderer = ChatRenderer::default();
            if quiet {
                println!("{}", reply.content);
            } else {
                renderer.print_reply(&reply.content);
                renderer.print_stop_notice(reply.stop_reason);
                renderer.print_stats_footer(reply.usage.output_tokens, reply.elapsed, &reply.model);
                println!();
            }
        }
        SubmitOutcome::NoReply => {
            if !quiet {
                println!("\n  {}\n", style("(no reply)").dim());
            }
        }
    }

    Ok(())
}
