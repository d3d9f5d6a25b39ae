use std::sync::Arc;

use shipwatch_core::tracking::TrackingClient;
use shipwatch_sync::SyncEngine;

#[derive(Clone)]
pub struct AppState {
    pub tracker: TrackingClient,
    pub engine: Arc<SyncEngine>,
    /// Shared secret the scheduler presents as a bearer token
    pub sync_secret: String,
}
