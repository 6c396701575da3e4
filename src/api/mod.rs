use axum::{
    Json, Router,
    http::{HeaderName, HeaderValue, Method, StatusCode, header},
    middleware,
    routing::{get, post},
};
use std::sync::Arc;
use tokio::sync::RwLock;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::config::Config;
use crate::db::Store;
use crate::services::{TierlistService, UserService};
use crate::state::SharedState;

pub mod auth;
mod error;
mod observability;
mod tierlists;
mod types;
mod users;
mod validation;

pub use error::ApiError;
pub use types::StatusMessage;

#[derive(Clone)]
pub struct AppState {
    pub shared: Arc<SharedState>,
}

impl AppState {
    #[must_use]
    pub fn config(&self) -> &Arc<RwLock<Config>> {
        &self.shared.config
    }

    #[must_use]
    pub fn store(&self) -> &Store {
        &self.shared.store
    }

    #[must_use]
    pub fn user_service(&self) -> &Arc<dyn UserService> {
        &self.shared.user_service
    }

    #[must_use]
    pub fn tierlist_service(&self) -> &Arc<dyn TierlistService> {
        &self.shared.tierlist_service
    }
}

#[must_use]
pub fn create_app_state(shared: Arc<SharedState>) -> Arc<AppState> {
    Arc::new(AppState { shared })
}

pub async fn create_app_state_from_config(config: Config) -> anyhow::Result<Arc<AppState>> {
    let shared = Arc::new(SharedState::new(config).await?);
    Ok(create_app_state(shared))
}

pub async fn router(state: Arc<AppState>) -> Router {
    let cors_origins = {
        let config = state.config().read().await;
        config.server.cors_allowed_origins.clone()
    };

    let protected_routes = Router::new()
        .route("/user/me", get(users::me).patch(users::update_me))
        .route("/tierlist", get(tierlists::list).post(tierlists::save))
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            auth::require_session,
        ));

    let api_router = Router::new()
        .merge(protected_routes)
        .route("/", get(home))
        .route("/user/register", post(users::register))
        .route("/user/login", post(users::login))
        .route("/user/logout", get(users::logout).post(users::logout))
        .route("/tierlist/{id}", get(tierlists::get_by_id))
        .fallback(not_found)
        .layer(middleware::from_fn_with_state(
            state.clone(),
            auth::require_access_key,
        ))
        .with_state(state);

    // Cookie-credentialed CORS needs explicit origins; the wildcard
    // branch exists for keyless local tinkering only.
    let cors_layer = if cors_origins.contains(&"*".to_string()) {
        CorsLayer::new()
            .allow_origin(Any)
            .allow_methods(Any)
            .allow_headers(Any)
    } else {
        let origins: Vec<HeaderValue> =
            cors_origins.iter().filter_map(|s| s.parse().ok()).collect();
        CorsLayer::new()
            .allow_origin(origins)
            .allow_credentials(true)
            .allow_methods([
                Method::GET,
                Method::HEAD,
                Method::PUT,
                Method::PATCH,
                Method::POST,
                Method::DELETE,
            ])
            .allow_headers([
                header::CONTENT_TYPE,
                header::AUTHORIZATION,
                HeaderName::from_static("x-access-key"),
            ])
    };

    api_router
        .layer(cors_layer)
        .layer(TraceLayer::new_for_http())
        .layer(middleware::from_fn(observability::logging_middleware))
}

async fn home() -> Json<serde_json::Value> {
    Json(serde_json::json!({
        "message": "Tierarr API: register at /user/register, then login at /user/login to get a session token"
    }))
}

async fn not_found() -> (StatusCode, Json<StatusMessage>) {
    (
        StatusCode::NOT_FOUND,
        Json(StatusMessage::failure("This page doesn't exist")),
    )
}
