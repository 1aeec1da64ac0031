//! Meteo Rain & Precipitation Prediction - Backend Server

use std::{net::SocketAddr, sync::Arc};

use meteo_server::{
    config::Config, create_app, external::ArchiveClient, inference::Models,
    services::PredictionService, AppState,
};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load configuration
    dotenvy::dotenv().ok();
    let config = Config::load()?;

    // Initialize tracing
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "meteo_server=debug,tower_http=debug".into());
    if config.logging.json {
        tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer().json())
            .init();
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer())
            .init();
    }

    tracing::info!("Starting Meteo Prediction Server");
    tracing::info!("Environment: {}", config.environment);

    // Models are loaded once and shared read-only by every request
    tracing::info!("Loading models...");
    let models = Models::load(&config.models)?;

    let archive = ArchiveClient::new(&config.weather)?;
    tracing::info!(
        "Weather archive: {} at ({}, {})",
        config.weather.archive_url,
        config.weather.latitude,
        config.weather.longitude
    );

    // Create application state
    let state = AppState {
        config: Arc::new(config.clone()),
        prediction: PredictionService::new(archive, models),
    };

    // Build application
    let app = create_app(state);

    // Start server
    let addr: SocketAddr = format!("{}:{}", config.server.host, config.server.port).parse()?;
    tracing::info!("Listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
