//! Historical weather archive client
//!
//! Integrates with the Open-Meteo archive API to fetch the daily aggregates
//! of a single past day at the configured location.

use std::time::Duration;

use reqwest::Client;
use serde::Deserialize;
use shared::{fields::ARCHIVE_DAILY_FIELDS, GeoLocation, RawWeatherObservation, TargetDate};

use crate::config::WeatherConfig;
use crate::error::{AppError, AppResult};

/// Weather archive client
#[derive(Debug, Clone)]
pub struct ArchiveClient {
    client: Client,
    base_url: String,
    location: GeoLocation,
    timezone: String,
}

/// Archive API response; only the daily section is consumed
#[derive(Debug, Deserialize)]
struct ArchiveResponse {
    #[serde(default)]
    daily: Option<RawWeatherObservation>,
}

impl ArchiveClient {
    /// Create a new ArchiveClient from configuration
    pub fn new(config: &WeatherConfig) -> AppResult<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| AppError::Configuration(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self {
            client,
            base_url: config.archive_url.clone(),
            location: config.location(),
            timezone: config.timezone.clone(),
        })
    }

    /// Create a new ArchiveClient with custom base URL (for testing)
    pub fn with_base_url(base_url: String) -> AppResult<Self> {
        Self::new(&WeatherConfig {
            archive_url: base_url,
            ..WeatherConfig::default()
        })
    }

    /// Query string for a single-day request
    pub fn query_params(&self, date: &TargetDate) -> Vec<(&'static str, String)> {
        let day = date.to_string();
        vec![
            ("latitude", self.location.latitude.to_string()),
            ("longitude", self.location.longitude.to_string()),
            ("start_date", day.clone()),
            ("end_date", day),
            ("daily", ARCHIVE_DAILY_FIELDS.join(",")),
            ("timezone", self.timezone.clone()),
        ]
    }

    /// Fetch the raw daily observation for `date`
    pub async fn fetch_weather(&self, date: &TargetDate) -> AppResult<RawWeatherObservation> {
        tracing::debug!("Fetching archive weather for {}", date);

        let response = self
            .client
            .get(&self.base_url)
            .query(&self.query_params(date))
            .send()
            .await
            .map_err(|e| AppError::Upstream(e.to_string()))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = match response.text().await {
                Ok(body) if !body.trim().is_empty() => body,
                Ok(_) => format!("status {}", status),
                Err(e) => format!("status {} ({})", status, e),
            };
            tracing::warn!("Weather archive returned {} for {}", status, date);
            return Err(AppError::Upstream(body));
        }

        let data: ArchiveResponse = response
            .json()
            .await
            .map_err(|e| AppError::Upstream(format!("Failed to parse weather response: {}", e)))?;

        data.daily.filter(|daily| !daily.is_empty()).ok_or_else(|| {
            AppError::DataUnavailable(format!("No weather data available for {}", date))
        })
    }
}
