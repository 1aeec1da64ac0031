//! Prediction service
//!
//! Orchestrates a single prediction: validate the date, obtain the raw
//! observation (from the archive or from the caller), engineer the feature
//! row, run the model and shape the response. Nothing is retried.

use chrono::Utc;
use shared::{
    archive_availability, engineer_precip_features, engineer_rain_features, FeatureVector,
    PrecipitationPrediction, PredictionResponse, RainPrediction, RawWeatherObservation,
    TargetDate,
};

use crate::error::{AppError, AppResult};
use crate::external::ArchiveClient;
use crate::inference::Models;

/// Prediction service shared by all request handlers
#[derive(Clone)]
pub struct PredictionService {
    archive: ArchiveClient,
    models: Models,
}

impl PredictionService {
    /// Create a new PredictionService instance
    pub fn new(archive: ArchiveClient, models: Models) -> Self {
        Self { archive, models }
    }

    /// Predict rain seven days after `input_date` from archived weather
    pub async fn predict_rain(&self, input_date: &str) -> AppResult<PredictionResponse<RainPrediction>> {
        let date = TargetDate::parse(input_date)?;
        let observation = self.fetch_observation(&date).await?;
        self.rain_from_observation(input_date, &date, &observation)
    }

    /// Predict rain seven days after `input_date` from caller-supplied weather
    pub fn predict_rain_manual(
        &self,
        input_date: &str,
        observation: &RawWeatherObservation,
    ) -> AppResult<PredictionResponse<RainPrediction>> {
        let date = TargetDate::parse(input_date)?;
        self.rain_from_observation(input_date, &date, observation)
    }

    /// Predict total precipitation over the three days after `input_date`
    /// from archived weather
    pub async fn predict_precipitation(
        &self,
        input_date: &str,
    ) -> AppResult<PredictionResponse<PrecipitationPrediction>> {
        let date = TargetDate::parse(input_date)?;
        let observation = self.fetch_observation(&date).await?;
        self.precipitation_from_observation(input_date, &date, &observation)
    }

    /// Predict total precipitation over the three days after `input_date`
    /// from caller-supplied weather
    pub fn predict_precipitation_manual(
        &self,
        input_date: &str,
        observation: &RawWeatherObservation,
    ) -> AppResult<PredictionResponse<PrecipitationPrediction>> {
        let date = TargetDate::parse(input_date)?;
        self.precipitation_from_observation(input_date, &date, observation)
    }

    async fn fetch_observation(&self, date: &TargetDate) -> AppResult<RawWeatherObservation> {
        self.archive.fetch_weather(date).await.map_err(|err| match err {
            AppError::DataUnavailable(message) => {
                let today = Utc::now().date_naive();
                match archive_availability(date.date(), today).hint() {
                    Some(hint) => AppError::DataUnavailable(format!("{} ({})", message, hint)),
                    None => AppError::DataUnavailable(message),
                }
            }
            other => other,
        })
    }

    fn rain_from_observation(
        &self,
        input_date: &str,
        date: &TargetDate,
        observation: &RawWeatherObservation,
    ) -> AppResult<PredictionResponse<RainPrediction>> {
        let target_date = date.rain_target_date()?;
        let row = engineer_rain_features(observation, date).to_row();
        let will_rain = self.models.rain.predict(&row)?;
        let probability_of_rain = self.models.rain.predict_probability(&row)?;

        tracing::info!(
            "Rain prediction for {}: will_rain={} probability={:?}",
            date,
            will_rain,
            probability_of_rain
        );

        Ok(PredictionResponse {
            input_date: input_date.to_string(),
            prediction: RainPrediction {
                date: target_date,
                will_rain,
                probability_of_rain,
            },
        })
    }

    fn precipitation_from_observation(
        &self,
        input_date: &str,
        date: &TargetDate,
        observation: &RawWeatherObservation,
    ) -> AppResult<PredictionResponse<PrecipitationPrediction>> {
        let window = date.precipitation_window()?;
        let row = engineer_precip_features(observation, date).to_row();
        let precipitation_fall = self.models.precipitation.predict(&row)?;

        tracing::info!(
            "Precipitation prediction for {}: {:.2} mm",
            date,
            precipitation_fall
        );

        Ok(PredictionResponse {
            input_date: input_date.to_string(),
            prediction: PrecipitationPrediction {
                start_date: window.start,
                end_date: window.end,
                precipitation_fall,
            },
        })
    }
}
