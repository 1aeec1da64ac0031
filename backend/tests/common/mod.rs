//! Shared fixtures for backend integration tests

#![allow(dead_code)]

use std::sync::{Arc, Mutex};

use meteo_server::{
    config::WeatherConfig,
    external::ArchiveClient,
    inference::{Classifier, ModelError, Models, Regressor},
    services::PredictionService,
};
use wiremock::MockServer;

pub const ARCHIVE_PATH: &str = "/v1/archive";

/// Archive response for 2024-06-15 as returned by Open-Meteo
pub fn sample_archive_response() -> serde_json::Value {
    serde_json::json!({
        "latitude": -33.87,
        "longitude": 151.21,
        "generationtime_ms": 0.2,
        "utc_offset_seconds": 36000,
        "timezone": "Australia/Sydney",
        "timezone_abbreviation": "AEST",
        "elevation": 39.0,
        "daily_units": {
            "time": "iso8601",
            "temperature_2m_min": "°C",
            "temperature_2m_max": "°C"
        },
        "daily": {
            "time": ["2024-06-15"],
            "temperature_2m_min": [15.0],
            "temperature_2m_max": [25.0],
            "precipitation_sum": [0.0],
            "weathercode": [3],
            "daylight_duration": [36000.0],
            "sunshine_duration": [30000.0],
            "et0_fao_evapotranspiration": [3.5],
            "precipitation_hours": [0.0],
            "wind_direction_10m_dominant": [180],
            "wind_gusts_10m_max": [10.0]
        }
    })
}

/// The same values as [`sample_archive_response`], as manual input
pub fn sample_manual_features() -> serde_json::Value {
    serde_json::json!({
        "weathercode": 3,
        "temperature_2m_min": 15.0,
        "temperature_2m_max": 25.0,
        "daylight_duration": 36000,
        "sunshine_duration": 30000,
        "precipitation_hours": 0,
        "et0_fao_evapotranspiration": 3.5,
        "wind_direction_10m_dominant": 180,
        "wind_gusts_10m_max": 10.0
    })
}

/// Classifier that records every row it sees
#[derive(Default)]
pub struct RecordingClassifier {
    pub rows: Mutex<Vec<Vec<f64>>>,
    pub probability: Option<f64>,
    pub fail_with: Option<String>,
}

impl Classifier for RecordingClassifier {
    fn predict(&self, row: &[f64]) -> Result<bool, ModelError> {
        if let Some(message) = &self.fail_with {
            return Err(ModelError::Evaluation(message.clone()));
        }
        self.rows.lock().unwrap().push(row.to_vec());
        Ok(self.probability.unwrap_or(0.0) >= 0.5)
    }

    fn predict_probability(&self, _row: &[f64]) -> Result<Option<f64>, ModelError> {
        Ok(self.probability)
    }
}

/// Regressor that records every row it sees and returns a fixed value
#[derive(Default)]
pub struct RecordingRegressor {
    pub rows: Mutex<Vec<Vec<f64>>>,
    pub value: f64,
}

impl Regressor for RecordingRegressor {
    fn predict(&self, row: &[f64]) -> Result<f64, ModelError> {
        self.rows.lock().unwrap().push(row.to_vec());
        Ok(self.value)
    }
}

pub struct Fixture {
    pub server: MockServer,
    pub service: PredictionService,
    pub classifier: Arc<RecordingClassifier>,
    pub regressor: Arc<RecordingRegressor>,
}

pub fn archive_client(server: &MockServer) -> ArchiveClient {
    ArchiveClient::new(&WeatherConfig {
        archive_url: format!("{}{}", server.uri(), ARCHIVE_PATH),
        ..WeatherConfig::default()
    })
    .unwrap()
}

pub async fn fixture_with(classifier: RecordingClassifier, regressor: RecordingRegressor) -> Fixture {
    let server = MockServer::start().await;
    let classifier = Arc::new(classifier);
    let regressor = Arc::new(regressor);
    let models = Models::new(classifier.clone(), regressor.clone());
    let service = PredictionService::new(archive_client(&server), models);

    Fixture {
        server,
        service,
        classifier,
        regressor,
    }
}

pub async fn fixture() -> Fixture {
    fixture_with(
        RecordingClassifier {
            probability: Some(0.8),
            ..Default::default()
        },
        RecordingRegressor {
            value: 4.2,
            ..Default::default()
        },
    )
    .await
}
