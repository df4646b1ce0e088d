use std::sync::Arc;

use crate::config::ServerConfig;
use crate::dashboard::Dashboard;

/// Handler state, cloned per request.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<ServerConfig>,
    /// Current absences and the aggregator that refreshes them.
    pub dashboard: Arc<Dashboard>,
}
