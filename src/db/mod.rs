//! Persistence layer: a pooled `SeaORM` connection behind a `Store`
//! facade. The pool is acquired once at startup and shared; nothing
//! reconnects per operation.

use anyhow::Result;
use sea_orm::{ConnectOptions, ConnectionTrait, Database, DatabaseConnection, DbErr, Statement};
use std::path::Path;
use std::time::Duration;
use tracing::info;

use crate::entities::{tierlists, users};

pub mod migrator;
pub mod repositories;

pub use repositories::user::UserChanges;

#[derive(Clone)]
pub struct Store {
    pub conn: DatabaseConnection,
}

impl Store {
    pub async fn new(db_url: &str) -> Result<Self> {
        Self::with_pool_options(db_url, 5, 1).await
    }

    pub async fn with_pool_options(
        db_url: &str,
        max_connections: u32,
        min_connections: u32,
    ) -> Result<Self> {
        use sea_orm_migration::MigratorTrait;

        if !db_url.contains(":memory:") {
            let path_str = db_url.trim_start_matches("sqlite:");
            if let Some(parent) = Path::new(path_str).parent() {
                tokio::fs::create_dir_all(parent).await.ok();
            }
            if !Path::new(path_str).exists() {
                std::fs::File::create(path_str)?;
            }
        }

        let mut opt = ConnectOptions::new(db_url.to_string());
        opt.max_connections(max_connections)
            .min_connections(min_connections)
            .connect_timeout(Duration::from_secs(10))
            .acquire_timeout(Duration::from_secs(10))
            .idle_timeout(Duration::from_secs(300))
            .max_lifetime(Duration::from_secs(600))
            .sqlx_logging(false);

        let conn = Database::connect(opt).await?;

        migrator::Migrator::up(&conn, None).await?;

        info!(
            "Database connected & migrations applied (pool: {}-{})",
            min_connections, max_connections
        );

        Ok(Self { conn })
    }

    pub async fn ping(&self) -> Result<()> {
        let backend = self.conn.get_database_backend();
        self.conn
            .query_one(Statement::from_string(backend, "SELECT 1".to_string()))
            .await?;
        Ok(())
    }

    fn user_repo(&self) -> repositories::user::UserRepository {
        repositories::user::UserRepository::new(self.conn.clone())
    }

    fn tierlist_repo(&self) -> repositories::tierlist::TierlistRepository {
        repositories::tierlist::TierlistRepository::new(self.conn.clone())
    }

    pub async fn insert_user(&self, user: users::Model) -> Result<users::Model, DbErr> {
        self.user_repo().insert(user).await
    }

    pub async fn find_user_by_username(
        &self,
        username: &str,
    ) -> Result<Option<users::Model>, DbErr> {
        self.user_repo().find_by_username(username).await
    }

    pub async fn find_user_by_id(&self, id: &str) -> Result<Option<users::Model>, DbErr> {
        self.user_repo().find_by_id(id).await
    }

    pub async fn update_user(
        &self,
        id: &str,
        changes: UserChanges,
    ) -> Result<Option<users::Model>, DbErr> {
        self.user_repo().update_partial(id, changes).await
    }

    pub async fn insert_tierlist(
        &self,
        tierlist: tierlists::Model,
    ) -> Result<tierlists::Model, DbErr> {
        self.tierlist_repo().insert(tierlist).await
    }

    pub async fn find_tierlist_by_id(&self, id: &str) -> Result<Option<tierlists::Model>, DbErr> {
        self.tierlist_repo().find_by_id(id).await
    }

    pub async fn list_tierlists_for_user(
        &self,
        user_id: &str,
    ) -> Result<Vec<tierlists::Model>, DbErr> {
        self.tierlist_repo().list_by_user(user_id).await
    }
}
