use api_types::profile::{MonthlyIncomeUpdate, ProfileView};
use axum::{Extension, Json, extract::State};
use baas::{ProfileUpdate, Session};
use engine::{MoneyCents, UserProfile};

use crate::{Payload, ServerError, server::ServerState};

fn view(profile: UserProfile) -> ProfileView {
    ProfileView {
        id: profile.id,
        email: profile.email,
        name: profile.name,
        monthly_income_minor: profile.monthly_income.map(MoneyCents::cents),
        total_balance_minor: profile.total_balance.cents(),
    }
}

pub async fn get(
    Extension(session): Extension<Session>,
    State(state): State<ServerState>,
) -> Result<Json<ProfileView>, ServerError> {
    let profile = state.store.profile(&session).await?;
    Ok(Json(view(profile)))
}

pub async fn set_income(
    Extension(session): Extension<Session>,
    State(state): State<ServerState>,
    Payload(payload): Payload<MonthlyIncomeUpdate>,
) -> Result<Json<ProfileView>, ServerError> {
    let income = MoneyCents::new(payload.monthly_income_minor).ensure_positive("monthly income")?;
    state
        .store
        .update_profile(
            &session,
            ProfileUpdate {
                monthly_income: Some(income),
                ..ProfileUpdate::default()
            },
        )
        .await?;

    let profile = state.store.profile(&session).await?;
    Ok(Json(view(profile)))
}
