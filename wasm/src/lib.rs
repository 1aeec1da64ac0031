//! WebAssembly module for the Meteo Prediction client
//!
//! Provides client-side computation for:
//! - Deciding whether the archive can serve a date, or manual input is needed
//! - Previewing the exact feature rows the server will feed the models

use std::collections::BTreeMap;

use chrono::NaiveDate;
use wasm_bindgen::prelude::*;

// Re-export shared types for use in JavaScript
pub use shared::encoding::*;
pub use shared::models::*;
pub use shared::types::*;
pub use shared::validation::*;

fn parse_date(date: &str) -> Result<NaiveDate, String> {
    TargetDate::parse(date)
        .map(|target| target.date())
        .map_err(|e| e.to_string())
}

fn observation_from_json(features_json: &str) -> Result<RawWeatherObservation, String> {
    let values: BTreeMap<String, f64> = serde_json::from_str(features_json)
        .map_err(|e| format!("Invalid features JSON: {}", e))?;
    Ok(RawWeatherObservation::from_scalars(values))
}

fn availability(date: &str, today: &str) -> Result<ArchiveAvailability, String> {
    Ok(archive_availability(parse_date(date)?, parse_date(today)?))
}

fn rain_preview(date: &str, features_json: &str) -> Result<String, String> {
    let target = TargetDate::parse(date).map_err(|e| e.to_string())?;
    let features = engineer_rain_features(&observation_from_json(features_json)?, &target);
    serde_json::to_string(&features).map_err(|e| e.to_string())
}

fn precipitation_preview(date: &str, features_json: &str) -> Result<String, String> {
    let target = TargetDate::parse(date).map_err(|e| e.to_string())?;
    let features = engineer_precip_features(&observation_from_json(features_json)?, &target);
    serde_json::to_string(&features).map_err(|e| e.to_string())
}

fn browser_today() -> Result<String, String> {
    let now = js_sys::Date::new_0();
    NaiveDate::from_ymd_opt(
        now.get_full_year() as i32,
        now.get_month() + 1,
        now.get_date(),
    )
    .map(|today| today.format(DATE_FORMAT).to_string())
    .ok_or_else(|| "Browser clock returned an invalid date".to_string())
}

/// Whether the historical archive can serve `date`, as seen on `today`
#[wasm_bindgen]
pub fn is_archive_date_available(date: &str, today: &str) -> Result<bool, JsValue> {
    availability(date, today)
        .map(|a| a.is_available())
        .map_err(|e| JsValue::from_str(&e))
}

/// Same as `is_archive_date_available`, using the browser's local date
#[wasm_bindgen]
pub fn is_archive_date_available_today(date: &str) -> Result<bool, JsValue> {
    let today = browser_today().map_err(|e| JsValue::from_str(&e))?;
    is_archive_date_available(date, &today)
}

/// Message to show when the archive cannot serve `date`
#[wasm_bindgen]
pub fn archive_hint(date: &str, today: &str) -> Result<Option<String>, JsValue> {
    availability(date, today)
        .map(|a| a.hint().map(str::to_string))
        .map_err(|e| JsValue::from_str(&e))
}

/// Rain feature row (JSON object) for manual inputs
#[wasm_bindgen]
pub fn preview_rain_features(date: &str, features_json: &str) -> Result<String, JsValue> {
    rain_preview(date, features_json).map_err(|e| JsValue::from_str(&e))
}

/// Precipitation feature row (JSON object) for manual inputs
#[wasm_bindgen]
pub fn preview_precipitation_features(date: &str, features_json: &str) -> Result<String, JsValue> {
    precipitation_preview(date, features_json).map_err(|e| JsValue::from_str(&e))
}
