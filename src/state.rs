use std::sync::Arc;

use crate::config::Config;
use crate::db::Store;
use crate::domain::{Clock, SystemClock};
use crate::services::{
    ActivityService, AdvisorService, SeaOrmActivityService, SeaOrmAdvisorService,
};

#[derive(Clone)]
pub struct SharedState {
    pub config: Arc<Config>,

    pub store: Store,

    pub clock: Arc<dyn Clock>,

    pub advisor_service: Arc<dyn AdvisorService>,

    pub activity_service: Arc<dyn ActivityService>,
}

impl SharedState {
    pub async fn new(config: Config) -> anyhow::Result<Self> {
        Self::with_clock(config, Arc::new(SystemClock)).await
    }

    /// Builds the state around an explicit clock so expiry can be driven from tests.
    pub async fn with_clock(config: Config, clock: Arc<dyn Clock>) -> anyhow::Result<Self> {
        let store = Store::with_pool_options(
            &config.general.database_path,
            config.general.max_db_connections,
            config.general.min_db_connections,
        )
        .await?;

        let advisor_service = Arc::new(SeaOrmAdvisorService::new(store.clone(), clock.clone()))
            as Arc<dyn AdvisorService + Send + Sync + 'static>;

        let activity_service = Arc::new(SeaOrmActivityService::new(store.clone(), clock.clone()))
            as Arc<dyn ActivityService + Send + Sync + 'static>;

        Ok(Self {
            config: Arc::new(config),
            store,
            clock,
            advisor_service,
            activity_service,
        })
    }

    /// Closes the connection pool. Call once, after the server has stopped.
    pub async fn shutdown(&self) -> anyhow::Result<()> {
        self.store.clone().close().await
    }
}
