use std::sync::Arc;

use crate::store::JobStore;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    /// Handle to the single store instance; handlers never touch the data file.
    pub store: Arc<JobStore>,
}
