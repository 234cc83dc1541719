//! Income API endpoints

use api_types::{
    Created,
    income::{IncomeListResponse, IncomeNew, IncomeView, SourceTotal},
};
use axum::{Extension, Json, extract::State, http::StatusCode};
use baas::Session;
use chrono::Utc;
use engine::{MoneyCents, NewIncome, YearMonth, income_by_source};

use crate::{Payload, ServerError, analytics::refresh_after_write, server::ServerState};

pub async fn list(
    Extension(session): Extension<Session>,
    State(state): State<ServerState>,
) -> Result<Json<IncomeListResponse>, ServerError> {
    let entries = state.store.income(&session).await?;
    let summary = income_by_source(&entries);

    Ok(Json(IncomeListResponse {
        income: entries
            .into_iter()
            .map(|entry| IncomeView {
                id: entry.id,
                source: entry.source,
                amount_minor: entry.amount.cents(),
                received_at: entry.created_at,
            })
            .collect(),
        total_minor: summary.total.cents(),
        by_source: summary
            .by_source
            .into_iter()
            .map(|(source, amount)| SourceTotal {
                source,
                amount_minor: amount.cents(),
            })
            .collect(),
    }))
}

pub async fn create(
    Extension(session): Extension<Session>,
    State(state): State<ServerState>,
    Payload(payload): Payload<IncomeNew>,
) -> Result<(StatusCode, Json<Created>), ServerError> {
    let received_at = payload
        .received_at
        .map(|at| at.with_timezone(&Utc))
        .unwrap_or_else(Utc::now);
    let income = NewIncome::new(
        &payload.source,
        MoneyCents::new(payload.amount_minor),
        received_at,
    )?;

    let id = state.store.insert_income(&session, &income).await?;
    refresh_after_write(&state, &session, YearMonth::of(&received_at, &state.timezone)).await;

    Ok((StatusCode::CREATED, Json(Created { id })))
}
