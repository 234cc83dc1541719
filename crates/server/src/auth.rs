//! Auth API endpoints

use api_types::auth::{Login, SessionView, Signup, SignupCreated};
use axum::{Extension, Json, extract::State, http::StatusCode};
use baas::Session;
use engine::SignupForm;

use crate::{Payload, ServerError, server::ServerState};

pub async fn login(
    State(state): State<ServerState>,
    Payload(payload): Payload<Login>,
) -> Result<Json<SessionView>, ServerError> {
    if payload.email.trim().is_empty() || payload.password.is_empty() {
        return Err(ServerError::Generic("email and password are required".to_string()));
    }

    let session = state
        .store
        .sign_in(&payload.email.trim().to_lowercase(), &payload.password)
        .await?;
    tracing::info!(user_id = %session.user_id, "user signed in");

    Ok(Json(SessionView {
        access_token: session.access_token,
        user_id: session.user_id,
        email: session.email,
    }))
}

pub async fn signup(
    State(state): State<ServerState>,
    Payload(payload): Payload<Signup>,
) -> Result<(StatusCode, Json<SignupCreated>), ServerError> {
    let form = SignupForm::new(&payload.full_name, &payload.email, &payload.password)
        .inspect_err(|err| tracing::warn!("rejected sign-up: {err}"))?;
    let registered = state.store.sign_up(&form).await?;

    Ok((
        StatusCode::CREATED,
        Json(SignupCreated {
            user_id: registered.user_id,
            email: registered.email,
        }),
    ))
}

pub async fn logout(
    Extension(session): Extension<Session>,
    State(state): State<ServerState>,
) -> Result<StatusCode, ServerError> {
    state.store.sign_out(&session).await?;
    Ok(StatusCode::NO_CONTENT)
}
