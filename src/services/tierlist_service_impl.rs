//! `SeaORM` implementation of the `TierlistService` trait.

use async_trait::async_trait;
use uuid::Uuid;

use crate::db::Store;
use crate::entities::tierlists;
use crate::models::{SavedTierlist, Tierlist};
use crate::services::tierlist_service::{TierlistError, TierlistService};

pub struct SeaOrmTierlistService {
    store: Store,
}

impl SeaOrmTierlistService {
    #[must_use]
    pub const fn new(store: Store) -> Self {
        Self { store }
    }
}

fn from_model(model: tierlists::Model) -> Result<SavedTierlist, TierlistError> {
    SavedTierlist::try_from(model)
        .map_err(|e| TierlistError::Internal(format!("Stored tierlist is unreadable: {e}")))
}

#[async_trait]
impl TierlistService for SeaOrmTierlistService {
    async fn save(
        &self,
        user_id: &str,
        tierlist: Tierlist,
    ) -> Result<SavedTierlist, TierlistError> {
        let tiers = serde_json::to_value(&tierlist.tiers)
            .map_err(|e| TierlistError::Internal(format!("Failed to encode tiers: {e}")))?;

        let model = tierlists::Model {
            id: Uuid::new_v4().to_string(),
            user_id: user_id.to_string(),
            tiers,
            created_at: chrono::Utc::now().to_rfc3339(),
        };

        let saved = self.store.insert_tierlist(model).await?;
        from_model(saved)
    }

    async fn list_for_user(&self, user_id: &str) -> Result<Vec<SavedTierlist>, TierlistError> {
        let models = self.store.list_tierlists_for_user(user_id).await?;
        models.into_iter().map(from_model).collect()
    }

    async fn get(&self, id: &str) -> Result<SavedTierlist, TierlistError> {
        let model = self
            .store
            .find_tierlist_by_id(id)
            .await?
            .ok_or(TierlistError::NotFound)?;

        from_model(model)
    }
}
