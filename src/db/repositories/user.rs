use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, DbErr, EntityTrait, QueryFilter, Set,
};

use crate::entities::users;

/// Fields of a user record that a partial update may touch. The
/// password arrives here already hashed; plaintext never reaches the
/// store.
#[derive(Debug, Default)]
pub struct UserChanges {
    pub username: Option<String>,
    pub email: Option<String>,
    pub password_hash: Option<String>,
}

pub struct UserRepository {
    conn: DatabaseConnection,
}

impl UserRepository {
    #[must_use]
    pub const fn new(conn: DatabaseConnection) -> Self {
        Self { conn }
    }

    /// Insert a new user record. A duplicate username surfaces as a
    /// unique-constraint violation from the store, not as a pre-check.
    pub async fn insert(&self, model: users::Model) -> Result<users::Model, DbErr> {
        let active = users::ActiveModel {
            id: Set(model.id),
            username: Set(model.username),
            email: Set(model.email),
            password_hash: Set(model.password_hash),
            role: Set(model.role),
            created_at: Set(model.created_at),
            updated_at: Set(model.updated_at),
        };
        active.insert(&self.conn).await
    }

    pub async fn find_by_username(&self, username: &str) -> Result<Option<users::Model>, DbErr> {
        users::Entity::find()
            .filter(users::Column::Username.eq(username))
            .one(&self.conn)
            .await
    }

    pub async fn find_by_id(&self, id: &str) -> Result<Option<users::Model>, DbErr> {
        users::Entity::find_by_id(id).one(&self.conn).await
    }

    /// Apply a partial update to a user record, returning the updated
    /// row, or `None` when the id is unknown.
    pub async fn update_partial(
        &self,
        id: &str,
        changes: UserChanges,
    ) -> Result<Option<users::Model>, DbErr> {
        let Some(user) = users::Entity::find_by_id(id).one(&self.conn).await? else {
            return Ok(None);
        };

        let mut active: users::ActiveModel = user.into();
        if let Some(username) = changes.username {
            active.username = Set(username);
        }
        if let Some(email) = changes.email {
            active.email = Set(email);
        }
        if let Some(password_hash) = changes.password_hash {
            active.password_hash = Set(password_hash);
        }
        active.updated_at = Set(chrono::Utc::now().to_rfc3339());

        let updated = active.update(&self.conn).await?;
        Ok(Some(updated))
    }
}
