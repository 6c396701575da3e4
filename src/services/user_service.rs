//! Domain service for user accounts.
//!
//! Handles registration, login, profile retrieval, and partial updates.
//! Input is validated at the API boundary before it reaches this layer;
//! the store's unique constraint on usernames is the final arbiter of
//! duplicates.

use thiserror::Error;

use crate::models::{LoginUser, NewUser, SessionInfo, UpdateUser, UserProfile};

/// Errors specific to user operations.
#[derive(Debug, Error)]
pub enum UserError {
    /// Uniform failure for a bad username or password; callers must not
    /// be able to tell which one was wrong.
    #[error("Username or Password is invalid")]
    InvalidCredentials,

    #[error("The Username is already taken")]
    UsernameTaken,

    #[error("User not found")]
    NotFound,

    #[error("Database error: {0}")]
    Database(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl From<sea_orm::DbErr> for UserError {
    fn from(err: sea_orm::DbErr) -> Self {
        Self::Database(err.to_string())
    }
}

impl From<anyhow::Error> for UserError {
    fn from(err: anyhow::Error) -> Self {
        Self::Internal(err.to_string())
    }
}

/// Domain service trait for user accounts.
#[async_trait::async_trait]
pub trait UserService: Send + Sync {
    /// Creates an account and returns the no-sensitive view.
    ///
    /// # Errors
    ///
    /// Returns [`UserError::UsernameTaken`] when the username exists.
    async fn register(&self, new_user: NewUser) -> Result<UserProfile, UserError>;

    /// Verifies credentials and issues a session token.
    ///
    /// # Errors
    ///
    /// Returns [`UserError::InvalidCredentials`] for an unknown username
    /// or a wrong password alike.
    async fn login(&self, credentials: LoginUser) -> Result<SessionInfo, UserError>;

    /// Fetches the no-sensitive view of a user by id.
    async fn profile(&self, id: &str) -> Result<UserProfile, UserError>;

    /// Applies a partial update; a new password is re-hashed before it
    /// is persisted.
    async fn update(&self, id: &str, changes: UpdateUser) -> Result<UserProfile, UserError>;
}
