//! Category API endpoints

use api_types::category::{CategoriesResponse, CategoryView, Classify, ClassifyResponse};
use axum::{Extension, Json, extract::State};
use baas::Session;
use engine::DEFAULT_EXPENSE_CATEGORY_ID;

use crate::{Payload, ServerError, server::ServerState};

pub async fn list(
    Extension(session): Extension<Session>,
    State(state): State<ServerState>,
) -> Result<Json<CategoriesResponse>, ServerError> {
    let categories = state
        .store
        .categories(&session)
        .await?
        .into_iter()
        .map(|c| CategoryView {
            id: c.id,
            name: c.name,
        })
        .collect();

    Ok(Json(CategoriesResponse { categories }))
}

/// Suggests a category for a merchant name using the keyword table.
pub async fn classify(
    Extension(session): Extension<Session>,
    State(state): State<ServerState>,
    Payload(payload): Payload<Classify>,
) -> Result<Json<ClassifyResponse>, ServerError> {
    let resolver = state.resolver(&session).await?;
    let matched = resolver.classify_merchant(&payload.merchant_name);
    let category_id = matched.unwrap_or(DEFAULT_EXPENSE_CATEGORY_ID);

    // Keyword ids are fixed, so name them from the rule when the reference
    // table does not carry that id.
    let category = if resolver.contains(&category_id) {
        resolver.resolve(&category_id).to_string()
    } else {
        resolver
            .rules()
            .iter()
            .find(|rule| rule.category_id == category_id)
            .map(|rule| rule.name.clone())
            .unwrap_or_else(|| resolver.fallback().to_string())
    };

    Ok(Json(ClassifyResponse {
        category_id,
        category,
        matched: matched.is_some(),
    }))
}
