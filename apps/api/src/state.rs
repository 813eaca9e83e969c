use std::sync::Arc;

use crate::accounts::AccountStore;
use crate::config::Config;
use crate::jobs::{JobCache, JobSource};
use crate::saved_jobs::SavedJobStore;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    /// Upstream listings. `JobsClient` in production.
    pub jobs: Arc<dyn JobSource>,
    pub cache: JobCache,
    pub accounts: Arc<dyn AccountStore>,
    pub saved_jobs: Arc<dyn SavedJobStore>,
}
