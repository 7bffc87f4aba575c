use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::{Instant, SystemTime};

use crate::catalog::Catalog;
use crate::config::Config;
use crate::db::{HanziStore, StoreResult};
use crate::services::learning::LearningService;

#[derive(Clone)]
pub struct AppState {
    started_at: Instant,
    started_at_system: SystemTime,
    learning: LearningService,
    static_dir: Arc<PathBuf>,
}

impl AppState {
    pub fn new(learning: LearningService, static_dir: impl Into<PathBuf>) -> Self {
        Self {
            started_at: Instant::now(),
            started_at_system: SystemTime::now(),
            learning,
            static_dir: Arc::new(static_dir.into()),
        }
    }

    /// Opens the store described by `config` and wires the services around it.
    pub async fn from_config(config: &Config) -> StoreResult<Self> {
        let store = HanziStore::open(&config.store).await?;
        Ok(Self::with_store(config, store))
    }

    pub fn with_store(config: &Config, store: HanziStore) -> Self {
        let catalog = Arc::new(Catalog::new(config.data_dir.clone()));
        let learning = LearningService::new(store, catalog, config.scheduler.clone());
        Self::new(learning, config.static_dir.clone())
    }

    pub fn uptime_seconds(&self) -> u64 {
        self.started_at.elapsed().as_secs()
    }

    pub fn started_at_system(&self) -> SystemTime {
        self.started_at_system
    }

    pub fn learning(&self) -> &LearningService {
        &self.learning
    }

    pub fn store(&self) -> &HanziStore {
        self.learning.store()
    }

    pub fn catalog(&self) -> &Catalog {
        self.learning.catalog()
    }

    pub fn static_dir(&self) -> &Path {
        &self.static_dir
    }
}
