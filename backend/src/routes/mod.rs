//! Route definitions for the Meteo Prediction service

use axum::{
    routing::{get, post},
    Router,
};

use crate::{handlers, AppState};

/// Create API routes
pub fn api_routes() -> Router<AppState> {
    Router::new()
        // Overview and health check
        .route("/", get(handlers::overview))
        .route("/health", get(handlers::health_check))
        // Prediction routes
        .nest("/predict", prediction_routes())
}

/// Prediction routes: archive-backed GETs and manual-input POSTs
fn prediction_routes() -> Router<AppState> {
    Router::new()
        .route("/rain", get(handlers::predict_rain))
        .route("/rain/manual", post(handlers::predict_rain_manual))
        .route("/precipitation/fall", get(handlers::predict_precipitation))
        .route(
            "/precipitation/manual",
            post(handlers::predict_precipitation_manual),
        )
}
