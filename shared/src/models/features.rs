//! Feature engineering for the rain classifier and precipitation regressor
//!
//! Each trained model consumes a fixed, named feature schema. The field names
//! and their order below are the schema the models were fit on and must not
//! change.

use serde::{Deserialize, Serialize};

use super::observation::{fields, RawWeatherObservation};
use crate::encoding::{
    encode_cyclic, encode_degrees, DAY_OF_WEEK_PERIOD, DAY_OF_YEAR_PERIOD, MONTH_PERIOD,
};
use crate::types::TargetDate;

/// A fixed-schema feature vector consumed by a trained model
pub trait FeatureVector {
    /// Feature names in model column order
    const FEATURE_NAMES: &'static [&'static str];

    /// Feature values in the same order as [`FeatureVector::FEATURE_NAMES`]
    fn to_row(&self) -> Vec<f64>;

    fn named_values(&self) -> Vec<(&'static str, f64)> {
        Self::FEATURE_NAMES
            .iter()
            .copied()
            .zip(self.to_row())
            .collect()
    }
}

/// Cyclic encodings of the target date's calendar position
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CalendarFeatures {
    pub month_sin: f64,
    pub month_cos: f64,
    pub dayofyear_sin: f64,
    pub dayofyear_cos: f64,
    pub dayofweek_sin: f64,
    pub dayofweek_cos: f64,
}

impl CalendarFeatures {
    pub fn for_date(date: &TargetDate) -> Self {
        let (month_sin, month_cos) = encode_cyclic(f64::from(date.month()), MONTH_PERIOD);
        let (dayofyear_sin, dayofyear_cos) =
            encode_cyclic(f64::from(date.day_of_year()), DAY_OF_YEAR_PERIOD);
        let (dayofweek_sin, dayofweek_cos) =
            encode_cyclic(f64::from(date.day_of_week()), DAY_OF_WEEK_PERIOD);

        Self {
            month_sin,
            month_cos,
            dayofyear_sin,
            dayofyear_cos,
            dayofweek_sin,
            dayofweek_cos,
        }
    }
}

/// Input row for the rain / no-rain classifier
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RainFeatureVector {
    pub weather_code: f64,
    pub temperature_2m_min: f64,
    pub temperature_2m_max: f64,
    pub daylight_duration: f64,
    pub sunshine_duration: f64,
    pub precipitation_hours: f64,
    pub et0_fao_evapotranspiration: f64,
    pub wind_direction_10m_dominant: f64,
    pub wind_gusts_10m_max: f64,
    pub temp_range: f64,
    pub sunshine_ratio: f64,
    pub month_sin: f64,
    pub month_cos: f64,
    pub dayofyear_sin: f64,
    pub dayofyear_cos: f64,
    pub dayofweek_sin: f64,
    pub dayofweek_cos: f64,
}

impl FeatureVector for RainFeatureVector {
    const FEATURE_NAMES: &'static [&'static str] = &[
        "weather_code",
        "temperature_2m_min",
        "temperature_2m_max",
        "daylight_duration",
        "sunshine_duration",
        "precipitation_hours",
        "et0_fao_evapotranspiration",
        "wind_direction_10m_dominant",
        "wind_gusts_10m_max",
        "temp_range",
        "sunshine_ratio",
        "month_sin",
        "month_cos",
        "dayofyear_sin",
        "dayofyear_cos",
        "dayofweek_sin",
        "dayofweek_cos",
    ];

    fn to_row(&self) -> Vec<f64> {
        vec![
            self.weather_code,
            self.temperature_2m_min,
            self.temperature_2m_max,
            self.daylight_duration,
            self.sunshine_duration,
            self.precipitation_hours,
            self.et0_fao_evapotranspiration,
            self.wind_direction_10m_dominant,
            self.wind_gusts_10m_max,
            self.temp_range,
            self.sunshine_ratio,
            self.month_sin,
            self.month_cos,
            self.dayofyear_sin,
            self.dayofyear_cos,
            self.dayofweek_sin,
            self.dayofweek_cos,
        ]
    }
}

/// Input row for the three-day precipitation regressor
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PrecipFeatureVector {
    pub temperature_2m_min: f64,
    pub temperature_2m_max: f64,
    pub daylight_duration: f64,
    pub sunshine_duration: f64,
    pub et0_fao_evapotranspiration: f64,
    pub wind_gusts_10m_max: f64,
    pub temp_range: f64,
    pub wind_dir_sin: f64,
    pub wind_dir_cos: f64,
    pub month_sin: f64,
    pub month_cos: f64,
    pub dayofyear_sin: f64,
    pub dayofyear_cos: f64,
    pub dayofweek_sin: f64,
    pub dayofweek_cos: f64,
}

impl FeatureVector for PrecipFeatureVector {
    const FEATURE_NAMES: &'static [&'static str] = &[
        "temperature_2m_min",
        "temperature_2m_max",
        "daylight_duration",
        "sunshine_duration",
        "et0_fao_evapotranspiration",
        "wind_gusts_10m_max",
        "temp_range",
        "wind_dir_sin",
        "wind_dir_cos",
        "month_sin",
        "month_cos",
        "dayofyear_sin",
        "dayofyear_cos",
        "dayofweek_sin",
        "dayofweek_cos",
    ];

    fn to_row(&self) -> Vec<f64> {
        vec![
            self.temperature_2m_min,
            self.temperature_2m_max,
            self.daylight_duration,
            self.sunshine_duration,
            self.et0_fao_evapotranspiration,
            self.wind_gusts_10m_max,
            self.temp_range,
            self.wind_dir_sin,
            self.wind_dir_cos,
            self.month_sin,
            self.month_cos,
            self.dayofyear_sin,
            self.dayofyear_cos,
            self.dayofweek_sin,
            self.dayofweek_cos,
        ]
    }
}

/// Sunshine as a fraction of daylight; `0.0` when there was no daylight
pub fn sunshine_ratio(sunshine_duration: f64, daylight_duration: f64) -> f64 {
    if daylight_duration > 0.0 {
        sunshine_duration / daylight_duration
    } else {
        0.0
    }
}

/// Build the rain classifier's input row
pub fn engineer_rain_features(obs: &RawWeatherObservation, date: &TargetDate) -> RainFeatureVector {
    let min = obs.value(fields::TEMPERATURE_MIN);
    let max = obs.value(fields::TEMPERATURE_MAX);
    let daylight = obs.value(fields::DAYLIGHT_DURATION);
    let sunshine = obs.value(fields::SUNSHINE_DURATION);
    let calendar = CalendarFeatures::for_date(date);

    RainFeatureVector {
        weather_code: obs.value(fields::WEATHER_CODE),
        temperature_2m_min: min,
        temperature_2m_max: max,
        daylight_duration: daylight,
        sunshine_duration: sunshine,
        precipitation_hours: obs.value(fields::PRECIPITATION_HOURS),
        et0_fao_evapotranspiration: obs.value(fields::EVAPOTRANSPIRATION),
        wind_direction_10m_dominant: obs.value(fields::WIND_DIRECTION_DOMINANT),
        wind_gusts_10m_max: obs.value(fields::WIND_GUSTS_MAX),
        temp_range: max - min,
        sunshine_ratio: sunshine_ratio(sunshine, daylight),
        month_sin: calendar.month_sin,
        month_cos: calendar.month_cos,
        dayofyear_sin: calendar.dayofyear_sin,
        dayofyear_cos: calendar.dayofyear_cos,
        dayofweek_sin: calendar.dayofweek_sin,
        dayofweek_cos: calendar.dayofweek_cos,
    }
}

/// Build the precipitation regressor's input row
pub fn engineer_precip_features(
    obs: &RawWeatherObservation,
    date: &TargetDate,
) -> PrecipFeatureVector {
    let min = obs.value(fields::TEMPERATURE_MIN);
    let max = obs.value(fields::TEMPERATURE_MAX);
    let (wind_dir_sin, wind_dir_cos) = encode_degrees(obs.value(fields::WIND_DIRECTION_DOMINANT));
    let calendar = CalendarFeatures::for_date(date);

    PrecipFeatureVector {
        temperature_2m_min: min,
        temperature_2m_max: max,
        daylight_duration: obs.value(fields::DAYLIGHT_DURATION),
        sunshine_duration: obs.value(fields::SUNSHINE_DURATION),
        et0_fao_evapotranspiration: obs.value(fields::EVAPOTRANSPIRATION),
        wind_gusts_10m_max: obs.value(fields::WIND_GUSTS_MAX),
        temp_range: max - min,
        wind_dir_sin,
        wind_dir_cos,
        month_sin: calendar.month_sin,
        month_cos: calendar.month_cos,
        dayofyear_sin: calendar.dayofyear_sin,
        dayofyear_cos: calendar.dayofyear_cos,
        dayofweek_sin: calendar.dayofweek_sin,
        dayofweek_cos: calendar.dayofweek_cos,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeSet;
    use std::f64::consts::PI;

    const EPSILON: f64 = 1e-12;

    fn date(s: &str) -> TargetDate {
        TargetDate::parse(s).unwrap()
    }

    fn sample_observation() -> RawWeatherObservation {
        RawWeatherObservation::from_scalars([
            (fields::WEATHER_CODE, 3.0),
            (fields::TEMPERATURE_MIN, 15.0),
            (fields::TEMPERATURE_MAX, 25.0),
            (fields::DAYLIGHT_DURATION, 36000.0),
            (fields::SUNSHINE_DURATION, 30000.0),
            (fields::PRECIPITATION_HOURS, 2.0),
            (fields::EVAPOTRANSPIRATION, 3.5),
            (fields::WIND_DIRECTION_DOMINANT, 180.0),
            (fields::WIND_GUSTS_MAX, 10.0),
        ])
    }

    fn json_keys<T: Serialize>(value: &T) -> BTreeSet<String> {
        match serde_json::to_value(value).unwrap() {
            serde_json::Value::Object(map) => map.keys().cloned().collect(),
            _ => panic!("expected a JSON object"),
        }
    }

    #[test]
    fn test_rain_features_end_to_end() {
        let features = engineer_rain_features(&sample_observation(), &date("2024-06-15"));

        assert_eq!(features.weather_code, 3.0);
        assert_eq!(features.temp_range, 10.0);
        assert!((features.sunshine_ratio - 30000.0 / 36000.0).abs() < EPSILON);
        assert!((features.month_sin - (2.0 * PI * 6.0 / 12.0).sin()).abs() < EPSILON);
        assert!((features.month_cos - (2.0 * PI * 6.0 / 12.0).cos()).abs() < EPSILON);
        assert!((features.dayofyear_sin - (2.0 * PI * 167.0 / 365.0).sin()).abs() < EPSILON);
        assert!((features.dayofyear_cos - (2.0 * PI * 167.0 / 365.0).cos()).abs() < EPSILON);
        assert!((features.dayofweek_sin - (2.0 * PI * 5.0 / 7.0).sin()).abs() < EPSILON);
        assert!((features.dayofweek_cos - (2.0 * PI * 5.0 / 7.0).cos()).abs() < EPSILON);
    }

    #[test]
    fn test_precip_features_end_to_end() {
        let features = engineer_precip_features(&sample_observation(), &date("2024-06-15"));

        assert_eq!(features.temp_range, 10.0);
        assert_eq!(features.wind_gusts_10m_max, 10.0);
        assert!(features.wind_dir_sin.abs() < EPSILON);
        assert!((features.wind_dir_cos + 1.0).abs() < EPSILON);
    }

    #[test]
    fn test_sunshine_ratio_zero_daylight() {
        assert_eq!(sunshine_ratio(30000.0, 0.0), 0.0);
        assert_eq!(sunshine_ratio(0.0, 0.0), 0.0);
        assert_eq!(sunshine_ratio(30000.0, -5.0), 0.0);
    }

    #[test]
    fn test_negative_temp_range_is_not_clamped() {
        let obs = RawWeatherObservation::from_scalars([
            (fields::TEMPERATURE_MIN, 20.0),
            (fields::TEMPERATURE_MAX, 12.5),
        ]);
        let rain = engineer_rain_features(&obs, &date("2024-06-15"));
        let precip = engineer_precip_features(&obs, &date("2024-06-15"));
        assert_eq!(rain.temp_range, -7.5);
        assert_eq!(precip.temp_range, -7.5);
    }

    #[test]
    fn test_empty_observation_yields_full_schema() {
        let obs = RawWeatherObservation::default();
        let rain = engineer_rain_features(&obs, &date("2024-01-01"));
        let precip = engineer_precip_features(&obs, &date("2024-01-01"));

        assert_eq!(rain.to_row().len(), 17);
        assert_eq!(precip.to_row().len(), 15);
        assert_eq!(rain.sunshine_ratio, 0.0);
        assert_eq!(rain.weather_code, 0.0);
        // cos(0) for a calm wind direction of 0 degrees
        assert_eq!(precip.wind_dir_cos, 1.0);
    }

    #[test]
    fn test_rain_schema_names_match_serialized_fields() {
        let rain = engineer_rain_features(&sample_observation(), &date("2024-06-15"));
        let expected: BTreeSet<String> = RainFeatureVector::FEATURE_NAMES
            .iter()
            .map(|name| name.to_string())
            .collect();

        assert_eq!(RainFeatureVector::FEATURE_NAMES.len(), 17);
        assert_eq!(json_keys(&rain), expected);
    }

    #[test]
    fn test_precip_schema_names_match_serialized_fields() {
        let precip = engineer_precip_features(&sample_observation(), &date("2024-06-15"));
        let expected: BTreeSet<String> = PrecipFeatureVector::FEATURE_NAMES
            .iter()
            .map(|name| name.to_string())
            .collect();

        assert_eq!(json_keys(&precip), expected);
    }

    #[test]
    fn test_named_values_follow_schema_order() {
        let rain = engineer_rain_features(&sample_observation(), &date("2024-06-15"));
        let named = rain.named_values();

        assert_eq!(named[0], ("weather_code", 3.0));
        assert_eq!(named[9], ("temp_range", 10.0));
        assert_eq!(named[16].0, "dayofweek_cos");
    }

    #[test]
    fn test_day_of_year_uses_fixed_period() {
        // Day 366 of a leap year wraps past the 365-day period
        let features = engineer_rain_features(&RawWeatherObservation::default(), &date("2024-12-31"));
        let (expected_sin, expected_cos) = encode_cyclic(366.0, 365.0);
        assert_eq!(features.dayofyear_sin, expected_sin);
        assert_eq!(features.dayofyear_cos, expected_cos);
    }
}
