//! HTTP handlers for prediction endpoints

use axum::{
    extract::{rejection::JsonRejection, Query, State},
    Json,
};
use serde::Deserialize;
use shared::{ManualPredictionRequest, PrecipitationPrediction, PredictionResponse, RainPrediction};

use crate::error::{AppError, AppResult};
use crate::AppState;

/// Query parameters for archive-backed predictions
#[derive(Debug, Deserialize)]
pub struct DateQuery {
    pub date: Option<String>,
}

impl DateQuery {
    fn require_date(self) -> AppResult<String> {
        self.date.ok_or_else(|| {
            AppError::InvalidDate("Missing 'date' query parameter. Use YYYY-MM-DD.".to_string())
        })
    }
}

fn manual_body(
    body: Result<Json<ManualPredictionRequest>, JsonRejection>,
) -> AppResult<ManualPredictionRequest> {
    body.map(|Json(request)| request)
        .map_err(|rejection| AppError::InvalidRequest(rejection.body_text()))
}

/// Predict rain in seven days from archived weather
pub async fn predict_rain(
    State(state): State<AppState>,
    Query(query): Query<DateQuery>,
) -> AppResult<Json<PredictionResponse<RainPrediction>>> {
    let date = query.require_date()?;
    let response = state.prediction.predict_rain(&date).await?;
    Ok(Json(response))
}

/// Predict precipitation over the next three days from archived weather
pub async fn predict_precipitation(
    State(state): State<AppState>,
    Query(query): Query<DateQuery>,
) -> AppResult<Json<PredictionResponse<PrecipitationPrediction>>> {
    let date = query.require_date()?;
    let response = state.prediction.predict_precipitation(&date).await?;
    Ok(Json(response))
}

/// Predict rain in seven days from user-entered weather
pub async fn predict_rain_manual(
    State(state): State<AppState>,
    body: Result<Json<ManualPredictionRequest>, JsonRejection>,
) -> AppResult<Json<PredictionResponse<RainPrediction>>> {
    let request = manual_body(body)?;
    let response = state
        .prediction
        .predict_rain_manual(&request.date, &request.observation())?;
    Ok(Json(response))
}

/// Predict precipitation over the next three days from user-entered weather
pub async fn predict_precipitation_manual(
    State(state): State<AppState>,
    body: Result<Json<ManualPredictionRequest>, JsonRejection>,
) -> AppResult<Json<PredictionResponse<PrecipitationPrediction>>> {
    let request = manual_body(body)?;
    let response = state
        .prediction
        .predict_precipitation_manual(&request.date, &request.observation())?;
    Ok(Json(response))
}
