use std::sync::Arc;
use tokio::sync::RwLock;

use crate::config::Config;
use crate::db::Store;
use crate::services::{
    SeaOrmTierlistService, SeaOrmUserService, TierlistService, UserService,
};

/// Process-wide shared state: the pooled store, the live config, and
/// the domain services built on top of them. Constructed once at
/// startup and handed to the API layer behind an `Arc`.
#[derive(Clone)]
pub struct SharedState {
    pub config: Arc<RwLock<Config>>,

    pub store: Store,

    pub user_service: Arc<dyn UserService>,

    pub tierlist_service: Arc<dyn TierlistService>,
}

impl SharedState {
    pub async fn new(config: Config) -> anyhow::Result<Self> {
        let store = Store::with_pool_options(
            &config.general.database_url,
            config.general.max_db_connections,
            config.general.min_db_connections,
        )
        .await?;

        let config_arc = Arc::new(RwLock::new(config));

        let user_service = Arc::new(SeaOrmUserService::new(store.clone(), config_arc.clone()))
            as Arc<dyn UserService + Send + Sync + 'static>;

        let tierlist_service = Arc::new(SeaOrmTierlistService::new(store.clone()))
            as Arc<dyn TierlistService + Send + Sync + 'static>;

        Ok(Self {
            config: config_arc,
            store,
            user_service,
            tierlist_service,
        })
    }

    pub async fn config(&self) -> Config {
        self.config.read().await.clone()
    }
}
