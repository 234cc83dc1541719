use api_types::chat::{ChatMessage, ChatReply};
use axum::{Extension, Json, extract::State};
use baas::Session;

use crate::{Payload, ServerError, server::ServerState};

pub async fn ask(
    Extension(session): Extension<Session>,
    State(state): State<ServerState>,
    Payload(payload): Payload<ChatMessage>,
) -> Result<Json<ChatReply>, ServerError> {
    let message = payload.message.trim();
    if message.is_empty() {
        return Err(ServerError::Generic("message must not be empty".to_string()));
    }

    tracing::debug!(user_id = %session.user_id, "chat request");
    let reply = advisor::reply_to_chat(state.assistant.as_ref(), message).await;

    Ok(Json(ChatReply { reply }))
}
