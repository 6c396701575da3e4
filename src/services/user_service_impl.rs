//! `SeaORM` implementation of the `UserService` trait.

use async_trait::async_trait;
use sea_orm::SqlErr;
use std::sync::Arc;
use tokio::sync::RwLock;
use tokio::task;
use uuid::Uuid;

use crate::auth::{password, token};
use crate::config::Config;
use crate::db::{Store, UserChanges};
use crate::entities::users;
use crate::models::{LoginUser, NewUser, SessionInfo, UpdateUser, UserProfile};
use crate::services::user_service::{UserError, UserService};

pub struct SeaOrmUserService {
    store: Store,
    config: Arc<RwLock<Config>>,
}

impl SeaOrmUserService {
    #[must_use]
    pub const fn new(store: Store, config: Arc<RwLock<Config>>) -> Self {
        Self { store, config }
    }

    /// Bcrypt is CPU-intensive and would stall the async runtime if run
    /// inline, so hashing runs in a blocking task.
    async fn hash_password(&self, plaintext: String) -> Result<String, UserError> {
        let cost = self.config.read().await.auth.bcrypt_cost;

        let hash = task::spawn_blocking(move || password::hash(&plaintext, cost))
            .await
            .map_err(|_| UserError::Internal("Password hashing task panicked".to_string()))??;

        Ok(hash)
    }
}

#[async_trait]
impl UserService for SeaOrmUserService {
    async fn register(&self, new_user: NewUser) -> Result<UserProfile, UserError> {
        // Friendlier message for the common case; the unique constraint
        // below still decides races.
        if self
            .store
            .find_user_by_username(&new_user.username)
            .await?
            .is_some()
        {
            return Err(UserError::UsernameTaken);
        }

        let password_hash = self.hash_password(new_user.password).await?;
        let now = chrono::Utc::now().to_rfc3339();

        let model = users::Model {
            id: Uuid::new_v4().to_string(),
            username: new_user.username,
            email: new_user.email,
            password_hash,
            role: "user".to_string(),
            created_at: now.clone(),
            updated_at: now,
        };

        match self.store.insert_user(model).await {
            Ok(created) => Ok(UserProfile::from(created)),
            Err(err) => match err.sql_err() {
                Some(SqlErr::UniqueConstraintViolation(_)) => Err(UserError::UsernameTaken),
                _ => Err(err.into()),
            },
        }
    }

    async fn login(&self, credentials: LoginUser) -> Result<SessionInfo, UserError> {
        let user = self
            .store
            .find_user_by_username(&credentials.username)
            .await?
            .ok_or(UserError::InvalidCredentials)?;

        let stored_hash = user.password_hash.clone();
        let plaintext = credentials.password;
        let is_valid = task::spawn_blocking(move || password::verify(&plaintext, &stored_hash))
            .await
            .map_err(|_| {
                UserError::Internal("Password verification task panicked".to_string())
            })?;

        if !is_valid {
            return Err(UserError::InvalidCredentials);
        }

        let (secret, ttl) = {
            let config = self.config.read().await;
            (config.auth.jwt_secret.clone(), config.token_ttl_seconds())
        };

        let token = token::issue(&secret, &user.id, &user.username, ttl)
            .map_err(|e| UserError::Internal(format!("Failed to sign session token: {e}")))?;

        Ok(SessionInfo {
            id: user.id,
            username: user.username,
            token,
        })
    }

    async fn profile(&self, id: &str) -> Result<UserProfile, UserError> {
        let user = self
            .store
            .find_user_by_id(id)
            .await?
            .ok_or(UserError::NotFound)?;

        Ok(UserProfile::from(user))
    }

    async fn update(&self, id: &str, changes: UpdateUser) -> Result<UserProfile, UserError> {
        let password_hash = match changes.password {
            Some(plaintext) => Some(self.hash_password(plaintext).await?),
            None => None,
        };

        let changes = UserChanges {
            username: changes.username,
            email: changes.email,
            password_hash,
        };

        match self.store.update_user(id, changes).await {
            Ok(Some(updated)) => Ok(UserProfile::from(updated)),
            Ok(None) => Err(UserError::NotFound),
            Err(err) => match err.sql_err() {
                Some(SqlErr::UniqueConstraintViolation(_)) => Err(UserError::UsernameTaken),
                _ => Err(err.into()),
            },
        }
    }
}
