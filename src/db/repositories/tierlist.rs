use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, DbErr, EntityTrait, QueryFilter, Set,
};

use crate::entities::tierlists;

pub struct TierlistRepository {
    conn: DatabaseConnection,
}

impl TierlistRepository {
    #[must_use]
    pub const fn new(conn: DatabaseConnection) -> Self {
        Self { conn }
    }

    pub async fn insert(&self, model: tierlists::Model) -> Result<tierlists::Model, DbErr> {
        let active = tierlists::ActiveModel {
            id: Set(model.id),
            user_id: Set(model.user_id),
            tiers: Set(model.tiers),
            created_at: Set(model.created_at),
        };
        active.insert(&self.conn).await
    }

    pub async fn find_by_id(&self, id: &str) -> Result<Option<tierlists::Model>, DbErr> {
        tierlists::Entity::find_by_id(id).one(&self.conn).await
    }

    pub async fn list_by_user(&self, user_id: &str) -> Result<Vec<tierlists::Model>, DbErr> {
        tierlists::Entity::find()
            .filter(tierlists::Column::UserId.eq(user_id))
            .all(&self.conn)
            .await
    }
}
