//! Raw daily weather observations
//!
//! Observations arrive in two shapes: the archive API's `daily` section, where
//! every field is a sequence with one entry per requested day, and manual
//! input, where every field is a plain number. Both are normalised into the
//! sequence form so the feature engineers only ever read one layout.

use std::collections::BTreeMap;

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};

/// Archive field names
pub mod fields {
    pub const WEATHER_CODE: &str = "weathercode";
    pub const TEMPERATURE_MIN: &str = "temperature_2m_min";
    pub const TEMPERATURE_MAX: &str = "temperature_2m_max";
    pub const PRECIPITATION_SUM: &str = "precipitation_sum";
    pub const DAYLIGHT_DURATION: &str = "daylight_duration";
    pub const SUNSHINE_DURATION: &str = "sunshine_duration";
    pub const EVAPOTRANSPIRATION: &str = "et0_fao_evapotranspiration";
    pub const PRECIPITATION_HOURS: &str = "precipitation_hours";
    pub const WIND_DIRECTION_DOMINANT: &str = "wind_direction_10m_dominant";
    pub const WIND_GUSTS_MAX: &str = "wind_gusts_10m_max";

    /// Daily fields requested from the archive, in request order
    pub const ARCHIVE_DAILY_FIELDS: [&str; 10] = [
        TEMPERATURE_MIN,
        TEMPERATURE_MAX,
        PRECIPITATION_SUM,
        WEATHER_CODE,
        DAYLIGHT_DURATION,
        SUNSHINE_DURATION,
        EVAPOTRANSPIRATION,
        PRECIPITATION_HOURS,
        WIND_DIRECTION_DOMINANT,
        WIND_GUSTS_MAX,
    ];
}

/// Raw weather fields for a single calendar day.
///
/// Values that are missing, `null`, or not numeric read as zero.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct RawWeatherObservation {
    fields: BTreeMap<String, Vec<Option<f64>>>,
}

impl RawWeatherObservation {
    /// Build an observation from the archive's `daily` section.
    ///
    /// Arrays are kept as-is; a bare scalar is treated as a one-element
    /// sequence.
    pub fn from_daily(daily: Map<String, Value>) -> Self {
        let fields = daily
            .into_iter()
            .map(|(name, value)| {
                let series = match value {
                    Value::Array(items) => items.iter().map(Value::as_f64).collect(),
                    other => vec![other.as_f64()],
                };
                (name, series)
            })
            .collect();

        Self { fields }
    }

    /// Build an observation from caller-supplied scalar values
    pub fn from_scalars<I, K>(values: I) -> Self
    where
        I: IntoIterator<Item = (K, f64)>,
        K: Into<String>,
    {
        let fields = values
            .into_iter()
            .map(|(name, value)| (name.into(), vec![Some(value)]))
            .collect();

        Self { fields }
    }

    /// First value of the named field, or `0.0` when absent
    pub fn value(&self, field: &str) -> f64 {
        self.fields
            .get(field)
            .and_then(|series| series.first().copied().flatten())
            .unwrap_or(0.0)
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

impl<'de> Deserialize<'de> for RawWeatherObservation {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let daily = Map::<String, Value>::deserialize(deserializer)?;
        Ok(Self::from_daily(daily))
    }
}
