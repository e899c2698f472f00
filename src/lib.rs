pub mod config;
pub mod errors;
pub mod models;
pub mod routes;
pub mod services;

use std::sync::Arc;

use crate::models::store::DataStore;
use crate::services::crossref::CrossRefIndex;

/// Shared application state passed to all Axum handlers.
///
/// The store is loaded once at startup and immutable afterwards; the
/// cross-reference index is built from it at the same time. No locking is
/// needed anywhere.
#[derive(Debug, Clone)]
pub struct AppState {
    pub store: Arc<DataStore>,
    pub index: Arc<CrossRefIndex>,
    pub config: config::AppConfig,
}

impl AppState {
    /// Build state from a loaded dataset, resolving all cross-reference
    /// labels up front.
    pub fn new(store: Arc<DataStore>, config: config::AppConfig) -> Self {
        let index = Arc::new(CrossRefIndex::build(&store));
        Self {
            store,
            index,
            config,
        }
    }
}
