//! Budget API endpoints

use api_types::budget::{BudgetListResponse, BudgetUpsert, BudgetView};
use axum::{Extension, Json, extract::State};
use baas::Session;
use engine::{Budget, EngineError, MoneyCents};

use crate::{Payload, ServerError, server::ServerState};

pub async fn list(
    Extension(session): Extension<Session>,
    State(state): State<ServerState>,
) -> Result<Json<BudgetListResponse>, ServerError> {
    let resolver = state.resolver(&session).await?;
    let budgets = state
        .store
        .budgets(&session)
        .await?
        .into_iter()
        .map(|budget| BudgetView {
            category_id: budget.category_id,
            category: resolver.resolve(&budget.category_id).to_string(),
            amount_minor: budget.amount.cents(),
        })
        .collect();

    Ok(Json(BudgetListResponse { budgets }))
}

/// Sets the planned amount for a category, replacing any previous one.
pub async fn upsert(
    Extension(session): Extension<Session>,
    State(state): State<ServerState>,
    Payload(payload): Payload<BudgetUpsert>,
) -> Result<Json<BudgetView>, ServerError> {
    let resolver = state.resolver(&session).await?;
    if !resolver.contains(&payload.category_id) {
        return Err(EngineError::KeyNotFound(format!("category {}", payload.category_id)).into());
    }

    let budget = Budget::new(
        session.user_id,
        payload.category_id,
        MoneyCents::new(payload.amount_minor),
    )?;
    state.store.upsert_budget(&session, &budget).await?;

    Ok(Json(BudgetView {
        category_id: budget.category_id,
        category: resolver.resolve(&budget.category_id).to_string(),
        amount_minor: budget.amount.cents(),
    }))
}
