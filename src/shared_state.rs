use std::path::PathBuf;
use std::sync::Arc;

use solar_yield_estimator::models::estimate::SystemParameters;
use solar_yield_estimator::services::radiation_table::RadiationTable;
use solar_yield_estimator::services::table_cache::{CacheOutcome, TableCache};
use tracing::{debug, info};

use crate::config::Config;
use crate::controllers::api_error::ApiError;

/// State shared by every request. Only the table cache is shared between sessions;
/// parameters and results stay request-local.
#[derive(Clone, Debug)]
pub struct AppState {
    pub dataset_path: PathBuf,
    pub defaults: SystemParameters,
    pub cache: Arc<TableCache>,
}

impl AppState {
    pub fn new(config: &Config) -> Self {
        Self {
            dataset_path: config.dataset.path.clone(),
            defaults: config.defaults,
            cache: Arc::new(TableCache::new()),
        }
    }

    pub fn source_name(&self) -> String {
        self.dataset_path.display().to_string()
    }

    /// Current radiation table. File access runs on the blocking pool.
    pub async fn table(&self) -> Result<Arc<RadiationTable>, ApiError> {
        let cache = Arc::clone(&self.cache);
        let path = self.dataset_path.clone();
        let (table, outcome) = tokio::task::spawn_blocking(move || cache.get_or_load_with_outcome(&path))
            .await
            .map_err(|e| ApiError::Internal(format!("dataset load task failed: {e}")))??;

        match outcome {
            CacheOutcome::Hit => debug!(source = %self.source_name(), "radiation table served from cache"),
            CacheOutcome::Loaded => info!(
                source = %self.source_name(),
                rows = table.len(),
                missing_cells = table.missing_cells(),
                "radiation table loaded"
            ),
        }
        Ok(table)
    }

    /// Drops the cached table and loads the source again.
    pub async fn reload(&self) -> Result<Arc<RadiationTable>, ApiError> {
        if self.cache.invalidate(&self.dataset_path) {
            debug!(source = %self.source_name(), "radiation table cache entry dropped");
        }
        self.table().await
    }
}
