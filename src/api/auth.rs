use axum::{
    extract::{Request, State},
    http::{HeaderMap, header},
    middleware::Next,
    response::{IntoResponse, Response},
};
use std::sync::Arc;

use super::{ApiError, AppState};
use crate::auth::token;

/// Name of the session cookie set on login and cleared on logout.
pub const SESSION_COOKIE: &str = "access_token";

/// Identity decoded from a verified session token, inserted into
/// request extensions for handlers behind `require_session`.
#[derive(Debug, Clone)]
pub struct CurrentUser {
    pub id: String,
    pub username: String,
}

// ============================================================================
// Middleware
// ============================================================================

/// Coarse API-key gate applied to every route, the fallback included.
/// Orthogonal to per-user sessions: it guards the API surface as a
/// whole and runs before any other processing.
pub async fn require_access_key(
    State(state): State<Arc<AppState>>,
    request: Request,
    next: Next,
) -> Response {
    let expected = state.config().read().await.auth.access_key.clone();

    let provided = request
        .headers()
        .get("x-access-key")
        .and_then(|v| v.to_str().ok());

    if provided != Some(expected.as_str()) {
        return ApiError::Forbidden("API access denied".to_string()).into_response();
    }

    next.run(request).await
}

/// Session middleware for protected routes. A missing, tampered,
/// expired, or otherwise malformed token gets the same generic 401 so
/// the response never reveals which check failed.
pub async fn require_session(
    State(state): State<Arc<AppState>>,
    mut request: Request,
    next: Next,
) -> Response {
    let secret = state.config().read().await.auth.jwt_secret.clone();

    let claims = extract_token(request.headers())
        .and_then(|raw| token::verify(&secret, &raw));

    match claims {
        Some(claims) => {
            tracing::Span::current().record("user_id", claims.sub.as_str());
            request.extensions_mut().insert(CurrentUser {
                id: claims.sub,
                username: claims.username,
            });
            next.run(request).await
        }
        None => {
            ApiError::Unauthorized("You have to login before doing that".to_string())
                .into_response()
        }
    }
}

/// Extract the session token from the cookie or, failing that, an
/// `Authorization: Bearer` header.
fn extract_token(headers: &HeaderMap) -> Option<String> {
    if let Some(cookies) = headers.get(header::COOKIE)
        && let Ok(cookies) = cookies.to_str()
    {
        for pair in cookies.split(';') {
            if let Some(value) = pair.trim().strip_prefix("access_token=")
                && !value.is_empty()
            {
                return Some(value.to_string());
            }
        }
    }

    if let Some(auth_header) = headers.get(header::AUTHORIZATION)
        && let Ok(auth_str) = auth_header.to_str()
        && let Some(bearer) = auth_str.strip_prefix("Bearer ")
    {
        return Some(bearer.trim().to_string());
    }

    None
}

// ============================================================================
// Cookie building
// ============================================================================

/// Build the Set-Cookie value for a fresh session. Secure deployments
/// get `Secure; SameSite=None` so a frontend on another origin can use
/// the cookie; otherwise SameSite=Lax keeps local development working
/// over plain HTTP.
#[must_use]
pub fn session_cookie(token: &str, max_age_seconds: i64, secure: bool) -> String {
    let mut cookie = format!("{SESSION_COOKIE}={token}; Path=/; HttpOnly; Max-Age={max_age_seconds}");
    if secure {
        cookie.push_str("; Secure; SameSite=None");
    } else {
        cookie.push_str("; SameSite=Lax");
    }
    cookie
}

/// Build the Set-Cookie value that expires the session cookie.
#[must_use]
pub fn clear_session_cookie(secure: bool) -> String {
    session_cookie("", 0, secure)
}
