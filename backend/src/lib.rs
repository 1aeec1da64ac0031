//! Meteo Rain & Precipitation Prediction service
//!
//! Serves two pretrained models (a rain / no-rain classifier and a
//! precipitation regressor) over HTTP. Inputs come either from the Open-Meteo
//! historical archive or directly from the caller.

use std::sync::Arc;

use axum::Router;
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

pub mod config;
pub mod error;
pub mod external;
pub mod handlers;
pub mod inference;
pub mod routes;
pub mod services;

pub use config::Config;

use services::PredictionService;

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub prediction: PredictionService,
}

/// Create the application router with all routes and middleware
pub fn create_app(state: AppState) -> Router {
    // CORS configuration
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    routes::api_routes()
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}
