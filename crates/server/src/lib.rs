use axum::{
    Json,
    extract::{FromRequest, Request, rejection::JsonRejection},
    http::StatusCode,
    response::IntoResponse,
};
use baas::BaasError;
use engine::EngineError;

use serde::{Serialize, de::DeserializeOwned};
pub use server::{ServerState, router, run, run_with_listener, spawn_with_listener};

mod analytics;
mod assets;
mod auth;
mod budgets;
mod categories;
mod chat;
mod dashboard;
mod expenses;
mod income;
mod insights;
mod profile;
mod server;

pub enum ServerError {
    Engine(EngineError),
    Baas(BaasError),
    /// Request body that is missing or not valid JSON for the endpoint.
    Body(JsonRejection),
    Generic(String),
}

/// JSON request body whose rejection answers with the usual error shape.
pub(crate) struct Payload<T>(pub T);

impl<S, T> FromRequest<S> for Payload<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = ServerError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<T>::from_request(req, state).await?;
        Ok(Self(value))
    }
}

#[derive(Serialize)]
struct Error {
    error: String,
}

fn status_for_engine_error(err: &EngineError) -> StatusCode {
    match err {
        EngineError::KeyNotFound(_) => StatusCode::NOT_FOUND,
        EngineError::Export(_) => StatusCode::INTERNAL_SERVER_ERROR,
        EngineError::IncomeNotSet
        | EngineError::InvalidAmount(_)
        | EngineError::InvalidName(_)
        | EngineError::InvalidDate(_)
        | EngineError::InvalidSignup(_) => StatusCode::UNPROCESSABLE_ENTITY,
    }
}

fn message_for_engine_error(err: EngineError) -> String {
    match err {
        EngineError::Export(csv_err) => {
            tracing::error!("export error: {csv_err}");
            "internal server error".to_string()
        }
        other => other.to_string(),
    }
}

fn status_for_baas_error(err: &BaasError) -> StatusCode {
    match err {
        BaasError::Unauthorized(_) => StatusCode::UNAUTHORIZED,
        BaasError::NotFound(_) => StatusCode::NOT_FOUND,
        BaasError::Conflict(_) => StatusCode::CONFLICT,
        BaasError::Domain(err) => status_for_engine_error(err),
        BaasError::Config(_) => StatusCode::INTERNAL_SERVER_ERROR,
        BaasError::Query { .. } | BaasError::Transport(_) | BaasError::Decode(_) => {
            StatusCode::BAD_GATEWAY
        }
    }
}

fn message_for_baas_error(err: BaasError) -> String {
    match err {
        BaasError::Domain(err) => message_for_engine_error(err),
        BaasError::Unauthorized(_) => "unauthorized".to_string(),
        BaasError::NotFound(what) => format!("{what} not found"),
        BaasError::Conflict(msg) => msg,
        BaasError::Config(msg) => {
            tracing::error!("backend misconfigured: {msg}");
            "internal server error".to_string()
        }
        other => {
            tracing::error!("backend error: {other}");
            "backend unavailable".to_string()
        }
    }
}

impl IntoResponse for ServerError {
    fn into_response(self) -> axum::response::Response {
        let (status, error) = match self {
            ServerError::Engine(err) => (status_for_engine_error(&err), message_for_engine_error(err)),
            ServerError::Baas(err) => (status_for_baas_error(&err), message_for_baas_error(err)),
            ServerError::Body(rejection) => (rejection.status(), rejection.body_text()),
            ServerError::Generic(err) => (StatusCode::BAD_REQUEST, err),
        };

        (status, Json(Error { error })).into_response()
    }
}

impl std::fmt::Display for ServerError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ServerError::Engine(err) => write!(f, "{err}"),
            ServerError::Baas(err) => write!(f, "{err}"),
            ServerError::Body(rejection) => write!(f, "{}", rejection.body_text()),
            ServerError::Generic(err) => f.write_str(err),
        }
    }
}

impl From<EngineError> for ServerError {
    fn from(value: EngineError) -> Self {
        Self::Engine(value)
    }
}

impl From<JsonRejection> for ServerError {
    fn from(value: JsonRejection) -> Self {
        Self::Body(value)
    }
}

impl From<BaasError> for ServerError {
    fn from(value: BaasError) -> Self {
        Self::Baas(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn income_not_set_maps_to_422() {
        let res = ServerError::from(EngineError::IncomeNotSet).into_response();
        assert_eq!(res.status(), StatusCode::UNPROCESSABLE_ENTITY);
    }

    #[test]
    fn engine_not_found_maps_to_404() {
        let res = ServerError::from(EngineError::KeyNotFound("x".to_string())).into_response();
        assert_eq!(res.status(), StatusCode::NOT_FOUND);
    }

    #[test]
    fn engine_validation_maps_to_422() {
        let res = ServerError::from(EngineError::InvalidAmount("x".to_string())).into_response();
        assert_eq!(res.status(), StatusCode::UNPROCESSABLE_ENTITY);
    }

    #[test]
    fn baas_unauthorized_maps_to_401() {
        let res = ServerError::from(BaasError::Unauthorized("bad token".to_string())).into_response();
        assert_eq!(res.status(), StatusCode::UNAUTHORIZED);
    }

    #[test]
    fn baas_conflict_maps_to_409() {
        let res = ServerError::from(BaasError::Conflict("exists".to_string())).into_response();
        assert_eq!(res.status(), StatusCode::CONFLICT);
    }

    #[test]
    fn baas_query_failure_maps_to_502() {
        let res = ServerError::from(BaasError::Query {
            status: StatusCode::INTERNAL_SERVER_ERROR,
            code: "XX000".to_string(),
            message: "boom".to_string(),
        })
        .into_response();
        assert_eq!(res.status(), StatusCode::BAD_GATEWAY);
    }

    #[test]
    fn baas_domain_error_uses_engine_mapping() {
        let res = ServerError::from(BaasError::Domain(EngineError::InvalidName("x".to_string())))
            .into_response();
        assert_eq!(res.status(), StatusCode::UNPROCESSABLE_ENTITY);
    }

    #[test]
    fn generic_maps_to_400() {
        let res = ServerError::Generic("bad".to_string()).into_response();
        assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    }
}
