//! Domain service for tierlists.
//!
//! Tierlists are owned by the user whose session saved them; reads by
//! id are public. Payload shape is validated at the API boundary before
//! a save reaches this layer.

use thiserror::Error;

use crate::models::{SavedTierlist, Tierlist};

/// Errors specific to tierlist operations.
#[derive(Debug, Error)]
pub enum TierlistError {
    #[error("Tierlist doesn't exist")]
    NotFound,

    #[error("Database error: {0}")]
    Database(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl From<sea_orm::DbErr> for TierlistError {
    fn from(err: sea_orm::DbErr) -> Self {
        Self::Database(err.to_string())
    }
}

/// Domain service trait for tierlists.
#[async_trait::async_trait]
pub trait TierlistService: Send + Sync {
    /// Persists a tierlist under the given owner and returns it with
    /// its generated id.
    async fn save(&self, user_id: &str, tierlist: Tierlist)
    -> Result<SavedTierlist, TierlistError>;

    /// Lists every tierlist owned by the given user.
    async fn list_for_user(&self, user_id: &str) -> Result<Vec<SavedTierlist>, TierlistError>;

    /// Fetches a single tierlist by id.
    ///
    /// # Errors
    ///
    /// Returns [`TierlistError::NotFound`] for an unknown id.
    async fn get(&self, id: &str) -> Result<SavedTierlist, TierlistError>;
}
