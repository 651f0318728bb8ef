use anyhow::Context;
use scouting_roster::{create_router, initialize_backend, RosterConfig};
use tracing::info;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize logging; RUST_LOG overrides the default level
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let config = RosterConfig::from_env().context("Failed to load configuration")?;

    let app_state = initialize_backend(&config)
        .await
        .context("Failed to initialize roster storage")?;
    let app = create_router(app_state);

    info!("Starting server on {}", config.bind_address);
    let listener = tokio::net::TcpListener::bind(config.bind_address)
        .await
        .with_context(|| format!("Failed to bind {}", config.bind_address))?;
    info!("Listening on {}", config.bind_address);

    axum::serve(listener, app).await?;

    Ok(())
}
