//! Prediction request and response shapes

use std::collections::BTreeMap;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::observation::RawWeatherObservation;

/// Outcome of the rain classifier for the date seven days ahead
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RainPrediction {
    pub date: NaiveDate,
    pub will_rain: bool,
    /// Only present when the loaded model exposes class probabilities
    pub probability_of_rain: Option<f64>,
}

/// Outcome of the precipitation regressor for the next three days
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PrecipitationPrediction {
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    /// Millimetres
    pub precipitation_fall: f64,
}

/// Response envelope shared by every prediction endpoint
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PredictionResponse<T> {
    /// The date exactly as the caller sent it
    pub input_date: String,
    pub prediction: T,
}

/// Body of the manual-input prediction endpoints
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ManualPredictionRequest {
    pub date: String,
    #[serde(default)]
    pub features: BTreeMap<String, f64>,
}

impl ManualPredictionRequest {
    /// Reshape the scalar inputs into the archive's observation layout
    pub fn observation(&self) -> RawWeatherObservation {
        RawWeatherObservation::from_scalars(
            self.features
                .iter()
                .map(|(name, value)| (name.as_str(), *value)),
        )
    }
}
