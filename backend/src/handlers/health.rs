//! Health check and overview handlers

use axum::{extract::State, Json};
use serde::Serialize;

use crate::AppState;

const PROJECT_NAME: &str = "Meteo Rain & Precipitation Prediction API";

#[derive(Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
}

#[derive(Serialize)]
pub struct OverviewResponse {
    pub project: String,
    pub description: String,
    pub endpoints: Vec<String>,
    pub github: String,
}

/// Health check endpoint handler
pub async fn health_check() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "API is healthy and ready.".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}

/// Project overview endpoint handler
pub async fn overview(State(state): State<AppState>) -> Json<OverviewResponse> {
    let github = tokio::fs::read_to_string(&state.config.project.github_link_file)
        .await
        .map(|link| link.trim().to_string())
        .unwrap_or_else(|_| "Not available".to_string());

    Json(OverviewResponse {
        project: PROJECT_NAME.to_string(),
        description: "API to predict rain in 7 days and precipitation in next 3 days.".to_string(),
        endpoints: [
            "/health",
            "/predict/rain?date=YYYY-MM-DD",
            "/predict/precipitation/fall?date=YYYY-MM-DD",
            "/predict/rain/manual",
            "/predict/precipitation/manual",
        ]
        .iter()
        .map(|endpoint| endpoint.to_string())
        .collect(),
        github,
    })
}
