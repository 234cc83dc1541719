//! Monthly analytics endpoints

use api_types::{analytics::Refresh, dashboard::SnapshotView};
use axum::{Extension, Json, extract::State};
use baas::{ProfileUpdate, Session};
use chrono::Utc;
use engine::{CategoryResolver, MonthlySnapshot, YearMonth, balance};

use crate::{Payload, ServerError, server::ServerState};

/// Recomputes the snapshot for `period` from the stored rows, upserts it and
/// writes the recomputed balance back to the profile.
pub(crate) async fn refresh_month(
    state: &ServerState,
    session: &Session,
    period: YearMonth,
) -> Result<MonthlySnapshot, ServerError> {
    let transactions = state.store.transactions(session).await?;
    let income = state.store.income(session).await?;

    let snapshot = MonthlySnapshot::compute(
        session.user_id,
        period,
        &transactions,
        &income,
        &state.timezone,
    );
    state.store.upsert_snapshot(session, &snapshot).await?;
    state
        .store
        .update_profile(
            session,
            ProfileUpdate {
                total_balance: Some(balance(&income, &transactions)),
                ..ProfileUpdate::default()
            },
        )
        .await?;

    Ok(snapshot)
}

/// Refresh after a write. The write itself already succeeded, so a failure
/// here is only logged.
pub(crate) async fn refresh_after_write(state: &ServerState, session: &Session, period: YearMonth) {
    if let Err(err) = refresh_month(state, session, period).await {
        tracing::warn!(user_id = %session.user_id, "monthly snapshot refresh failed: {err}");
    }
}

pub(crate) fn snapshot_view(snapshot: &MonthlySnapshot, resolver: &CategoryResolver) -> SnapshotView {
    SnapshotView {
        year: snapshot.period.year,
        month: snapshot.period.month,
        total_spent_minor: snapshot.total_spent.cents(),
        top_category: snapshot
            .top_category
            .map(|id| resolver.resolve(&id).to_string()),
        savings_minor: snapshot.savings.cents(),
    }
}

pub async fn refresh(
    Extension(session): Extension<Session>,
    State(state): State<ServerState>,
    Payload(payload): Payload<Refresh>,
) -> Result<Json<SnapshotView>, ServerError> {
    let current = YearMonth::of(&Utc::now(), &state.timezone);
    let period = YearMonth::new(
        payload.year.unwrap_or(current.year),
        payload.month.unwrap_or(current.month),
    )?;

    let snapshot = refresh_month(&state, &session, period).await?;
    let resolver = state.resolver(&session).await?;

    Ok(Json(snapshot_view(&snapshot, &resolver)))
}
