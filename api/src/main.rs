use anyhow::Result;
use dotenv::dotenv;

use api::config::AppConfig;
use api::observability::Observability;
use api::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    // Load environment variables
    dotenv().ok();

    let config = AppConfig::from_env()?;
    let obs = Observability::init(&config)?;

    let addr = config.socket_addr();
    let app = api::app(AppState::new(config, obs.registry));

    tracing::info!("API server listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
