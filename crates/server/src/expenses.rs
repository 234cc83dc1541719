//! Expense API endpoints

use api_types::{
    Created,
    expense::{ExpenseListResponse, ExpenseNew, ExpenseView},
};
use axum::{
    Extension, Json,
    extract::State,
    http::{StatusCode, header},
    response::IntoResponse,
};
use baas::Session;
use chrono::Utc;
use engine::{
    DEFAULT_EXPENSE_CATEGORY_ID, EngineError, MoneyCents, NewExpense, YearMonth,
    write_expenses_csv,
};

use crate::{
    Payload, ServerError,
    analytics::refresh_after_write,
    server::ServerState,
};

pub async fn list(
    Extension(session): Extension<Session>,
    State(state): State<ServerState>,
) -> Result<Json<ExpenseListResponse>, ServerError> {
    let resolver = state.resolver(&session).await?;
    let expenses = state
        .store
        .transactions(&session)
        .await?
        .into_iter()
        .filter(|tx| !tx.is_income)
        .map(|tx| ExpenseView {
            id: tx.id,
            amount_minor: tx.amount.cents(),
            category: resolver.resolve(&tx.category_id).to_string(),
            category_id: tx.category_id,
            merchant_name: tx.merchant_name,
            upi_id: tx.upi_id,
            occurred_at: tx.timestamp,
        })
        .collect();

    Ok(Json(ExpenseListResponse { expenses }))
}

/// Records an expense. Without a category the merchant name picks one.
pub async fn create(
    Extension(session): Extension<Session>,
    State(state): State<ServerState>,
    Payload(payload): Payload<ExpenseNew>,
) -> Result<(StatusCode, Json<Created>), ServerError> {
    let resolver = state.resolver(&session).await?;
    let category_id = match payload.category_id {
        Some(id) if resolver.contains(&id) => id,
        Some(id) => return Err(EngineError::KeyNotFound(format!("category {id}")).into()),
        None => resolver.classify_merchant_or(&payload.merchant_name, DEFAULT_EXPENSE_CATEGORY_ID),
    };
    let timestamp = payload
        .occurred_at
        .map(|at| at.with_timezone(&Utc))
        .unwrap_or_else(Utc::now);

    let expense = NewExpense::new(
        MoneyCents::new(payload.amount_minor),
        &payload.merchant_name,
        category_id,
        timestamp,
        payload.upi_id.as_deref(),
    )?;
    let id = state.store.insert_expense(&session, &expense).await?;
    tracing::debug!(user_id = %session.user_id, %id, "expense recorded");

    refresh_after_write(&state, &session, YearMonth::of(&timestamp, &state.timezone)).await;

    Ok((StatusCode::CREATED, Json(Created { id })))
}

/// Expenses as a CSV attachment.
pub async fn export(
    Extension(session): Extension<Session>,
    State(state): State<ServerState>,
) -> Result<impl IntoResponse, ServerError> {
    let resolver = state.resolver(&session).await?;
    let transactions = state.store.transactions(&session).await?;

    let mut body = Vec::new();
    write_expenses_csv(&mut body, &transactions, &resolver)?;

    Ok((
        [
            (header::CONTENT_TYPE, "text/csv; charset=utf-8"),
            (
                header::CONTENT_DISPOSITION,
                "attachment; filename=\"expenses.csv\"",
            ),
        ],
        body,
    ))
}
