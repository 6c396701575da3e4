use axum::{
    Extension, Json,
    extract::State,
    http::header,
    response::IntoResponse,
};
use std::sync::Arc;

use super::auth::{self, CurrentUser};
use super::{ApiError, AppState, StatusMessage, validation};
use crate::models::{LoginUser, NewUser, UpdateUser, UserProfile};

/// POST /user/register
/// Create an account; the response never carries the password hash.
pub async fn register(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<NewUser>,
) -> Result<Json<UserProfile>, ApiError> {
    validation::validate_new_user(&payload)?;

    let profile = state.user_service().register(payload).await?;

    tracing::info!("User registered: {}", profile.username);

    Ok(Json(profile))
}

/// POST /user/login
/// Verify credentials, set the session cookie, and return the token.
pub async fn login(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<LoginUser>,
) -> Result<impl IntoResponse, ApiError> {
    let session = state.user_service().login(payload).await?;

    let (secure, max_age) = {
        let config = state.config().read().await;
        (config.server.secure_cookies, config.token_ttl_seconds())
    };

    let cookie = auth::session_cookie(&session.token, max_age, secure);

    Ok(([(header::SET_COOKIE, cookie)], Json(session)))
}

/// GET|POST /user/logout
/// Sessions are stateless, so logout just expires the client cookie.
pub async fn logout(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    let secure = state.config().read().await.server.secure_cookies;

    (
        [(header::SET_COOKIE, auth::clear_session_cookie(secure))],
        Json(StatusMessage::ok("Logout successful")),
    )
}

/// GET /user/me
pub async fn me(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<CurrentUser>,
) -> Result<Json<UserProfile>, ApiError> {
    let profile = state.user_service().profile(&user.id).await?;
    Ok(Json(profile))
}

/// PATCH /user/me
/// Partial profile update; a new password is re-hashed before storage.
pub async fn update_me(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<CurrentUser>,
    Json(payload): Json<UpdateUser>,
) -> Result<Json<UserProfile>, ApiError> {
    validation::validate_update_user(&payload)?;

    let profile = state.user_service().update(&user.id, payload).await?;

    Ok(Json(profile))
}
