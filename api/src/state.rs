use prometheus::Registry;
use std::sync::Arc;
use std::time::Instant;

use crate::config::AppConfig;

/// Application state shared across handlers. Read-only after startup.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    pub started_at: Instant,
    pub registry: Registry,
}

impl AppState {
    pub fn new(config: AppConfig, registry: Registry) -> Self {
        Self {
            config: Arc::new(config),
            started_at: Instant::now(),
            registry,
        }
    }
}
