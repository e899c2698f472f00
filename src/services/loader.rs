//! Dataset loading with a single-flight memoizing cache.
//!
//! The dataset is produced offline and shipped as one JSON file. A failed
//! read or parse degrades to an empty store — the view layer renders an
//! empty state, it never sees an error.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use tokio::sync::OnceCell;

use crate::models::store::DataStore;

/// Read and parse the dataset, substituting an empty store on any failure.
pub async fn load(path: &Path) -> DataStore {
    let bytes = match tokio::fs::read(path).await {
        Ok(bytes) => bytes,
        Err(e) => {
            tracing::warn!(path = %path.display(), error = %e, "Dataset read failed, serving empty store");
            return DataStore::empty();
        }
    };
    match serde_json::from_slice::<DataStore>(&bytes) {
        Ok(store) => {
            tracing::info!(
                threats = store.threats.len(),
                measures = store.protection_measures.len(),
                tasks = store.tactical_tasks.len(),
                generated_at = %store.metadata.generated_at,
                "Dataset loaded"
            );
            store
        }
        Err(e) => {
            tracing::warn!(path = %path.display(), error = %e, "Dataset parse failed, serving empty store");
            DataStore::empty()
        }
    }
}

/// Memoizing dataset cache owned by the composition root.
///
/// The first call performs the load; concurrent callers during the in-flight
/// load await the same future instead of triggering duplicate reads, and
/// every later call returns the cached store. A reload requires a process
/// restart.
#[derive(Debug)]
pub struct DatasetCache {
    path: PathBuf,
    cell: OnceCell<Arc<DataStore>>,
}

impl DatasetCache {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            cell: OnceCell::new(),
        }
    }

    /// The cached store, loading it on first use. First successful
    /// initialization wins; `load` itself never fails.
    pub async fn get_or_load(&self) -> Arc<DataStore> {
        self.cell
            .get_or_init(|| async { Arc::new(load(&self.path).await) })
            .await
            .clone()
    }
}
