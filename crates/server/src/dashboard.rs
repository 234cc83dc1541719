//! Dashboard API endpoints

use api_types::dashboard::{
    ActivityKind, ActivityQuery, ActivityResponse, ActivityView, SeriesPointView, SeriesResponse,
    Summary,
};
use axum::{
    Extension, Json,
    extract::{Query, State},
};
use baas::Session;
use chrono::Utc;
use engine::{MoneyCents, MonthlySnapshot, YearMonth, balance, merge_time_series, recent_activity};

use crate::{ServerError, analytics::snapshot_view, server::ServerState};

pub async fn summary(
    Extension(session): Extension<Session>,
    State(state): State<ServerState>,
) -> Result<Json<Summary>, ServerError> {
    let resolver = state.resolver(&session).await?;
    let profile = state.store.profile(&session).await?;
    let transactions = state.store.transactions(&session).await?;
    let income = state.store.income(&session).await?;

    let total_income: MoneyCents = income.iter().map(|e| e.amount).sum::<MoneyCents>()
        + transactions
            .iter()
            .filter(|tx| tx.is_income)
            .map(|tx| tx.amount)
            .sum::<MoneyCents>();
    let total_expenses: MoneyCents = transactions
        .iter()
        .filter(|tx| !tx.is_income)
        .map(|tx| tx.amount)
        .sum();
    let current = MonthlySnapshot::compute(
        session.user_id,
        YearMonth::of(&Utc::now(), &state.timezone),
        &transactions,
        &income,
        &state.timezone,
    );

    Ok(Json(Summary {
        total_income_minor: total_income.cents(),
        total_expenses_minor: total_expenses.cents(),
        balance_minor: balance(&income, &transactions).cents(),
        monthly_income_minor: profile.monthly_income.map(MoneyCents::cents),
        current_month: snapshot_view(&current, &resolver),
    }))
}

/// Daily income and expense totals, bucketed by local calendar day.
pub async fn series(
    Extension(session): Extension<Session>,
    State(state): State<ServerState>,
) -> Result<Json<SeriesResponse>, ServerError> {
    let transactions = state.store.transactions(&session).await?;
    let income = state.store.income(&session).await?;

    let points = merge_time_series(&income, &transactions, &state.timezone)
        .into_iter()
        .map(|point| SeriesPointView {
            date: point.date,
            income_minor: point.income.cents(),
            expense_minor: point.expense.cents(),
        })
        .collect();

    Ok(Json(SeriesResponse {
        timezone: state.timezone.name().to_string(),
        points,
    }))
}

pub async fn activity(
    Extension(session): Extension<Session>,
    State(state): State<ServerState>,
    Query(query): Query<ActivityQuery>,
) -> Result<Json<ActivityResponse>, ServerError> {
    let resolver = state.resolver(&session).await?;
    let transactions = state.store.transactions(&session).await?;
    let income = state.store.income(&session).await?;

    let entries = recent_activity(&income, &transactions, &resolver, query.limit)
        .into_iter()
        .map(|entry| ActivityView {
            kind: match entry.kind {
                engine::ActivityKind::Income => ActivityKind::Income,
                engine::ActivityKind::Expense => ActivityKind::Expense,
            },
            label: entry.label,
            amount_minor: entry.amount.cents(),
            at: entry.at,
        })
        .collect();

    Ok(Json(ActivityResponse { entries }))
}
