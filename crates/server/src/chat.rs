//! Assistant chat endpoint

use api_types::chat::{ChatAsk, ChatReply};
use assistant::Conversation;
use axum::{Json, extract::State};

use crate::{ServerError, server::ServerState};

/// Forward one message to the assistant and return its reply.
///
/// Each request is its own single-shot exchange; the transcript lives on the
/// caller's side.
pub async fn ask(
    State(state): State<ServerState>,
    Json(payload): Json<ChatAsk>,
) -> Result<Json<ChatReply>, ServerError> {
    let Some(assistant) = state.assistant.as_ref() else {
        return Err(ServerError::Generic(
            "assistant is not configured".to_string(),
        ));
    };
    if payload.message.trim().is_empty() {
        return Err(ServerError::Generic("message required".to_string()));
    }

    let mut conversation = Conversation::default();
    assistant.ask(&mut conversation, &payload.message).await;
    let reply = conversation
        .messages()
        .last()
        .map(|message| message.text.clone())
        .unwrap_or_default();

    Ok(Json(ChatReply { reply }))
}
