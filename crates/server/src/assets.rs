//! Asset API endpoints

use api_types::{
    Created,
    asset::{AssetListResponse, AssetNew, AssetShareView, AssetView},
};
use axum::{Extension, Json, extract::State, http::StatusCode};
use baas::Session;
use engine::{AssetCategory, MoneyCents, asset_distribution};

use crate::{Payload, ServerError, server::ServerState};

pub async fn list(
    Extension(session): Extension<Session>,
    State(state): State<ServerState>,
) -> Result<Json<AssetListResponse>, ServerError> {
    let assets = state.store.assets(&session).await?;
    let distribution = asset_distribution(&assets)
        .into_iter()
        .map(|share| AssetShareView {
            category: share.category.to_string(),
            value_minor: share.value.cents(),
            share: share.share.to_string(),
        })
        .collect();
    let total: MoneyCents = assets.iter().map(|asset| asset.value).sum();

    Ok(Json(AssetListResponse {
        assets: assets
            .into_iter()
            .map(|asset| AssetView {
                id: asset.id,
                category: asset.category.to_string(),
                value_minor: asset.value.cents(),
                created_at: asset.created_at,
            })
            .collect(),
        total_minor: total.cents(),
        distribution,
    }))
}

pub async fn create(
    Extension(session): Extension<Session>,
    State(state): State<ServerState>,
    Payload(payload): Payload<AssetNew>,
) -> Result<(StatusCode, Json<Created>), ServerError> {
    let category: AssetCategory = payload.category.parse()?;
    let value = MoneyCents::new(payload.value_minor).ensure_positive("asset value")?;

    let id = state.store.insert_asset(&session, category, value).await?;
    Ok((StatusCode::CREATED, Json(Created { id })))
}
