use axum::{
    Extension, Json,
    extract::{Path, State},
};
use std::sync::Arc;

use super::auth::CurrentUser;
use super::{ApiError, AppState};
use crate::models::{SavedTierlist, Tierlist};

/// POST /tierlist
/// Validate the payload shape and persist it under the caller's
/// identity. The body is taken as raw JSON so a malformed tierlist
/// (including a tier whose nested list mixes characters and weapons)
/// answers with the uniform validation status instead of being
/// persisted.
pub async fn save(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<CurrentUser>,
    Json(payload): Json<serde_json::Value>,
) -> Result<Json<SavedTierlist>, ApiError> {
    let tierlist: Tierlist =
        serde_json::from_value(payload).map_err(|_| ApiError::validation("Tierlist is invalid"))?;

    let saved = state.tierlist_service().save(&user.id, tierlist).await?;

    Ok(Json(saved))
}

/// GET /tierlist
/// Every tierlist owned by the caller.
pub async fn list(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<CurrentUser>,
) -> Result<Json<Vec<SavedTierlist>>, ApiError> {
    let tierlists = state.tierlist_service().list_for_user(&user.id).await?;
    Ok(Json(tierlists))
}

/// GET /tierlist/{id}
/// Public fetch by id (the access gate still applies).
pub async fn get_by_id(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<SavedTierlist>, ApiError> {
    let tierlist = state.tierlist_service().get(&id).await?;
    Ok(Json(tierlist))
}
