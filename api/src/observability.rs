use anyhow::Result;
use prometheus::Registry;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::config::AppConfig;
use crate::metrics;

const METRICS_NAMESPACE: &str = "person_api";

pub struct Observability {
    pub registry: Registry,
}

impl Observability {
    /// Install the global tracing subscriber and build the metrics registry.
    /// Call once, from `main`.
    pub fn init(config: &AppConfig) -> Result<Self> {
        let registry = build_registry()?;

        let env_filter = tracing_subscriber::EnvFilter::try_new(&config.log_filter)
            .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));

        tracing_subscriber::registry()
            .with(env_filter)
            .with(tracing_subscriber::fmt::layer())
            .try_init()?;

        tracing::info!(filter = %config.log_filter, "Observability stack initialized");
        Ok(Self { registry })
    }
}

/// A fresh registry with every API metric registered under `person_api_`
pub fn build_registry() -> prometheus::Result<Registry> {
    let registry = Registry::new_custom(Some(METRICS_NAMESPACE.into()), None)?;
    metrics::register_all(&registry)?;
    Ok(registry)
}
