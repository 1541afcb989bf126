//! Application state for the API server

use crate::{AssetSync, Config};
use std::sync::Arc;

/// Shared application state accessible to all route handlers
///
/// Cloned for each request (cheap Arc clone).
#[derive(Clone)]
pub struct AppState {
    /// The synchronizer runs are triggered on
    pub sync: Arc<AssetSync>,

    /// Configuration (read-only)
    pub config: Arc<Config>,
}

impl AppState {
    /// Create a new AppState
    pub fn new(sync: Arc<AssetSync>, config: Arc<Config>) -> Self {
        Self { sync, config }
    }
}
