//! Common types used across the service

use std::fmt;
use std::str::FromStr;

use chrono::{Datelike, Duration, NaiveDate};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Wire format for every date the service accepts or returns
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Days between the observation date and the rain prediction date
pub const RAIN_HORIZON_DAYS: i64 = 7;

/// First day of the precipitation window, relative to the observation date
pub const PRECIPITATION_WINDOW_START_DAYS: i64 = 1;

/// Last day of the precipitation window, relative to the observation date
pub const PRECIPITATION_WINDOW_END_DAYS: i64 = 3;

/// A date string that could not be parsed
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Invalid date format '{input}'. Use YYYY-MM-DD.")]
pub struct DateError {
    pub input: String,
}

/// GPS coordinates
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct GeoLocation {
    pub latitude: f64,
    pub longitude: f64,
}

impl GeoLocation {
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
        }
    }
}

/// Inclusive date range
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct DateRange {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

/// The calendar date a prediction is anchored on.
///
/// Both the observation that is fed to the models and the cyclic calendar
/// features derive from this date. Result dates are fixed offsets from it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TargetDate(NaiveDate);

impl TargetDate {
    pub fn new(date: NaiveDate) -> Self {
        Self(date)
    }

    /// Parse a `YYYY-MM-DD` date, ignoring surrounding whitespace.
    ///
    /// Dates whose result dates fall outside the calendar are rejected too.
    pub fn parse(input: &str) -> Result<Self, DateError> {
        let invalid = || DateError {
            input: input.to_string(),
        };
        let target = NaiveDate::parse_from_str(input.trim(), DATE_FORMAT)
            .map(Self)
            .map_err(|_| invalid())?;

        target
            .offset(RAIN_HORIZON_DAYS.max(PRECIPITATION_WINDOW_END_DAYS))
            .map_err(|_| invalid())?;
        Ok(target)
    }

    pub fn date(&self) -> NaiveDate {
        self.0
    }

    /// Month of the year, 1-12
    pub fn month(&self) -> u32 {
        self.0.month()
    }

    /// Day of the year, 1-366
    pub fn day_of_year(&self) -> u32 {
        self.0.ordinal()
    }

    /// Day of the week with Monday = 0 and Sunday = 6
    pub fn day_of_week(&self) -> u32 {
        self.0.weekday().num_days_from_monday()
    }

    fn offset(&self, days: i64) -> Result<NaiveDate, DateError> {
        self.0
            .checked_add_signed(Duration::days(days))
            .ok_or_else(|| DateError {
                input: self.to_string(),
            })
    }

    /// Date the rain classifier predicts for
    pub fn rain_target_date(&self) -> Result<NaiveDate, DateError> {
        self.offset(RAIN_HORIZON_DAYS)
    }

    /// Window the precipitation regressor predicts the total for
    pub fn precipitation_window(&self) -> Result<DateRange, DateError> {
        Ok(DateRange {
            start: self.offset(PRECIPITATION_WINDOW_START_DAYS)?,
            end: self.offset(PRECIPITATION_WINDOW_END_DAYS)?,
        })
    }
}

impl FromStr for TargetDate {
    type Err = DateError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl From<NaiveDate> for TargetDate {
    fn from(date: NaiveDate) -> Self {
        Self(date)
    }
}

impl fmt::Display for TargetDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.format(DATE_FORMAT))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, DATE_FORMAT).unwrap()
    }

    #[test]
    fn test_parse_valid_date() {
        let target = TargetDate::parse("2024-06-15").unwrap();
        assert_eq!(target.date(), date("2024-06-15"));
        assert_eq!(target.to_string(), "2024-06-15");
    }

    #[test]
    fn test_parse_trims_whitespace() {
        assert!(TargetDate::parse(" 2024-06-15\n").is_ok());
    }

    #[test]
    fn test_parse_invalid_dates() {
        for input in ["not-a-date", "", "2024-13-01", "2023-02-29", "15/06/2024"] {
            let err = TargetDate::parse(input).unwrap_err();
            assert_eq!(err.input, input);
        }
    }

    #[test]
    fn test_calendar_fields() {
        let target = TargetDate::parse("2024-06-15").unwrap();
        assert_eq!(target.month(), 6);
        assert_eq!(target.day_of_year(), 167);
        // Saturday
        assert_eq!(target.day_of_week(), 5);

        let monday = TargetDate::parse("2024-06-17").unwrap();
        assert_eq!(monday.day_of_week(), 0);
    }

    #[test]
    fn test_leap_year_last_day() {
        let target = TargetDate::parse("2024-12-31").unwrap();
        assert_eq!(target.day_of_year(), 366);
    }

    #[test]
    fn test_rain_target_date_crosses_month() {
        let target = TargetDate::parse("2024-02-25").unwrap();
        assert_eq!(target.rain_target_date().unwrap(), date("2024-03-03"));
    }

    #[test]
    fn test_precipitation_window_crosses_year() {
        let target = TargetDate::parse("2024-12-30").unwrap();
        let window = target.precipitation_window().unwrap();
        assert_eq!(window.start, date("2024-12-31"));
        assert_eq!(window.end, date("2025-01-02"));
    }

    #[test]
    fn test_parse_rejects_dates_at_the_calendar_edge() {
        for input in ["+262142-12-31", "+262142-12-30"] {
            let err = TargetDate::parse(input).unwrap_err();
            assert_eq!(err.input, input);
        }
    }

    #[test]
    fn test_offsets_past_calendar_end_are_errors() {
        let last = TargetDate::new(NaiveDate::MAX);
        assert!(last.rain_target_date().is_err());
        assert!(last.precipitation_window().is_err());
    }

    #[test]
    fn test_serializes_as_iso_date() {
        let target = TargetDate::parse("2024-01-05").unwrap();
        assert_eq!(serde_json::to_string(&target).unwrap(), "\"2024-01-05\"");
    }
}
