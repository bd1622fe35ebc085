use std::path::PathBuf;
use std::sync::Arc;

use tokio::sync::{Mutex, RwLock};

use crate::{
    config::Config,
    error::{AppError, AppResult},
    models::SnapshotStatus,
    services::PosterProvider,
    store::RecommenderContext,
};

/// Where the two snapshot files live
#[derive(Debug, Clone)]
pub struct SnapshotPaths {
    pub catalog: PathBuf,
    pub similarity: PathBuf,
}

impl From<&Config> for SnapshotPaths {
    fn from(config: &Config) -> Self {
        Self {
            catalog: config.catalog_path.clone(),
            similarity: config.similarity_path.clone(),
        }
    }
}

/// Either a fully loaded context or the reason there isn't one
#[derive(Debug, Clone)]
pub enum SnapshotState {
    Ready(Arc<RecommenderContext>),
    Unavailable(String),
}

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    snapshots: Arc<RwLock<SnapshotState>>,
    reload_lock: Arc<Mutex<()>>,
    paths: SnapshotPaths,
    pub posters: Arc<dyn PosterProvider>,
    pub recommendation_count: usize,
}

impl AppState {
    /// Creates state with no snapshots loaded yet; call [`AppState::reload`]
    pub fn new(
        paths: SnapshotPaths,
        posters: Arc<dyn PosterProvider>,
        recommendation_count: usize,
    ) -> Self {
        Self {
            snapshots: Arc::new(RwLock::new(SnapshotState::Unavailable(
                "Recommendation data has not been loaded yet".to_string(),
            ))),
            reload_lock: Arc::new(Mutex::new(())),
            paths,
            posters,
            recommendation_count,
        }
    }

    /// Current context, or `DataUnavailable` if the snapshots aren't loaded
    pub async fn context(&self) -> AppResult<Arc<RecommenderContext>> {
        match &*self.snapshots.read().await {
            SnapshotState::Ready(context) => Ok(Arc::clone(context)),
            SnapshotState::Unavailable(reason) => Err(AppError::DataUnavailable(reason.clone())),
        }
    }

    pub async fn status(&self) -> SnapshotStatus {
        match &*self.snapshots.read().await {
            SnapshotState::Ready(context) => SnapshotStatus {
                ready: true,
                movies: Some(context.catalog().len()),
                loaded_at: Some(context.loaded_at()),
                reason: None,
            },
            SnapshotState::Unavailable(reason) => SnapshotStatus {
                ready: false,
                movies: None,
                loaded_at: None,
                reason: Some(reason.clone()),
            },
        }
    }

    /// Re-reads both snapshots and swaps them in as one unit
    ///
    /// Readers keep the previous view until the new one is complete. A failed
    /// load leaves the feature disabled until the next successful reload.
    pub async fn reload(&self) -> AppResult<Arc<RecommenderContext>> {
        let _guard = self.reload_lock.lock().await;

        let paths = self.paths.clone();
        let loaded = tokio::task::spawn_blocking(move || {
            RecommenderContext::load(&paths.catalog, &paths.similarity)
        })
        .await
        .map_err(|e| AppError::Internal(format!("Snapshot load task failed: {}", e)))?;

        let mut snapshots = self.snapshots.write().await;

        match loaded {
            Ok(context) => {
                let context = Arc::new(context);
                *snapshots = SnapshotState::Ready(Arc::clone(&context));
                Ok(context)
            }
            Err(e) => {
                tracing::error!(
                    error = %e,
                    catalog = %self.paths.catalog.display(),
                    similarity = %self.paths.similarity.display(),
                    "Failed to load recommendation snapshots"
                );
                *snapshots = SnapshotState::Unavailable(e.to_string());
                Err(AppError::Snapshot(e))
            }
        }
    }
}
