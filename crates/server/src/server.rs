use axum::{
    Router,
    extract::{Request, State},
    middleware::{self, Next},
    response::Response,
    routing::{get, post},
};
use axum_extra::{
    TypedHeader,
    headers::{Authorization, authorization::Bearer},
    typed_header::TypedHeaderRejection,
};
use chrono_tz::Tz;

use std::{net::SocketAddr, sync::Arc};

use advisor::Assistant;
use baas::{BaasError, Session, Store};
use engine::CategoryResolver;

use crate::{
    ServerError, analytics, assets, auth, budgets, categories, chat, dashboard, expenses, income,
    insights, profile,
};

#[derive(Clone)]
pub struct ServerState {
    pub store: Arc<dyn Store>,
    pub assistant: Arc<dyn Assistant>,
    /// Timezone used for calendar days and months.
    pub timezone: Tz,
}

impl ServerState {
    pub fn new(store: Arc<dyn Store>, assistant: Arc<dyn Assistant>, timezone: Tz) -> Self {
        Self {
            store,
            assistant,
            timezone,
        }
    }

    /// Category resolver over the current reference table.
    pub(crate) async fn resolver(&self, session: &Session) -> Result<CategoryResolver, ServerError> {
        let categories = self.store.categories(session).await?;
        Ok(CategoryResolver::new(categories))
    }
}

/// Resolves the bearer token into a [`Session`] for the handlers.
async fn authenticate(
    auth_header: Result<TypedHeader<Authorization<Bearer>>, TypedHeaderRejection>,
    State(state): State<ServerState>,
    mut request: Request,
    next: Next,
) -> Result<Response, ServerError> {
    let missing = || ServerError::Baas(BaasError::Unauthorized("missing bearer token".to_string()));
    let Ok(TypedHeader(header)) = auth_header else {
        return Err(missing());
    };
    let token = header.token();
    if token.is_empty() {
        return Err(missing());
    }

    let session = state.store.authenticate(token).await.map_err(|err| {
        tracing::warn!("rejected access token: {err}");
        ServerError::Baas(BaasError::Unauthorized(err.to_string()))
    })?;

    request.extensions_mut().insert(session);
    Ok(next.run(request).await)
}

pub fn router(state: ServerState) -> Router {
    let protected = Router::new()
        .route("/auth/logout", post(auth::logout))
        .route("/categories", get(categories::list))
        .route("/categories/classify", post(categories::classify))
        .route("/expenses", get(expenses::list).post(expenses::create))
        .route("/expenses/export", get(expenses::export))
        .route("/income", get(income::list).post(income::create))
        .route("/assets", get(assets::list).post(assets::create))
        .route("/budgets", get(budgets::list).post(budgets::upsert))
        .route("/profile", get(profile::get))
        .route("/profile/income", get(profile::get).put(profile::set_income))
        .route("/dashboard/summary", get(dashboard::summary))
        .route("/dashboard/series", get(dashboard::series))
        .route("/dashboard/activity", get(dashboard::activity))
        .route("/insights/categories", get(insights::categories))
        .route("/insights/classification", get(insights::classification))
        .route("/insights/unnecessary", get(insights::unnecessary))
        .route("/insights/projection", get(insights::projection))
        .route("/insights/budgets", get(insights::budgets))
        .route("/insights/analysis", post(insights::analysis))
        .route("/chat", post(chat::ask))
        .route("/analytics/refresh", post(analytics::refresh))
        .route_layer(middleware::from_fn_with_state(state.clone(), authenticate));

    Router::new()
        .route("/auth/login", post(auth::login))
        .route("/auth/signup", post(auth::signup))
        .merge(protected)
        .with_state(state)
}

pub async fn run(state: ServerState, addr: SocketAddr) {
    let listener = match tokio::net::TcpListener::bind(addr).await {
        Ok(listener) => listener,
        Err(err) => {
            tracing::error!("failed to bind server listener on {addr}: {err}");
            return;
        }
    };
    if let Err(err) = run_with_listener(state, listener).await {
        tracing::error!("server failed: {err}");
    }
}

pub async fn run_with_listener(
    state: ServerState,
    listener: tokio::net::TcpListener,
) -> Result<(), std::io::Error> {
    let addr = listener.local_addr()?;
    tracing::info!("Server listening on {}", addr);

    axum::serve(listener, router(state)).await
}

pub fn spawn_with_listener(
    state: ServerState,
    listener: tokio::net::TcpListener,
) -> Result<SocketAddr, std::io::Error> {
    let addr = listener.local_addr()?;

    tokio::spawn(async move {
        if let Err(err) = run_with_listener(state, listener).await {
            tracing::error!("server failed: {err}");
        }
    });

    Ok(addr)
}
