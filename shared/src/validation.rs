//! Validation utilities for the Meteo Prediction service
//!
//! The historical archive only holds finalised days. Anything from yesterday
//! onwards has no data yet, and nothing exists before the reanalysis
//! coverage starts. Clients use this check to switch to manual input.

use chrono::{Duration, NaiveDate};
use serde::{Deserialize, Serialize};

/// First day covered by the historical archive
pub const ARCHIVE_COVERAGE_START: (i32, u32, u32) = (1940, 1, 1);

/// Whether the archive can be expected to hold data for a date
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ArchiveAvailability {
    Available,
    TooRecent,
    BeforeCoverage,
}

impl ArchiveAvailability {
    pub fn is_available(&self) -> bool {
        matches!(self, ArchiveAvailability::Available)
    }

    /// Hint shown to users when the archive cannot be used
    pub fn hint(&self) -> Option<&'static str> {
        match self {
            ArchiveAvailability::Available => None,
            ArchiveAvailability::TooRecent => Some(
                "the selected date is too recent for the historical archive; enter the weather details manually",
            ),
            ArchiveAvailability::BeforeCoverage => Some(
                "the selected date is before the historical archive begins; enter the weather details manually",
            ),
        }
    }
}

pub fn archive_coverage_start() -> NaiveDate {
    let (year, month, day) = ARCHIVE_COVERAGE_START;
    NaiveDate::from_ymd_opt(year, month, day).unwrap_or(NaiveDate::MIN)
}

/// Classify `date` against the archive window as seen on `today`
pub fn archive_availability(date: NaiveDate, today: NaiveDate) -> ArchiveAvailability {
    let yesterday = today - Duration::days(1);

    if date >= yesterday {
        ArchiveAvailability::TooRecent
    } else if date < archive_coverage_start() {
        ArchiveAvailability::BeforeCoverage
    } else {
        ArchiveAvailability::Available
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_two_days_ago_is_available() {
        let today = date(2026, 10, 19);
        assert_eq!(
            archive_availability(date(2026, 10, 17), today),
            ArchiveAvailability::Available
        );
    }

    #[test]
    fn test_yesterday_and_later_are_too_recent() {
        let today = date(2026, 10, 19);
        for d in [date(2026, 10, 18), today, date(2026, 11, 1)] {
            let availability = archive_availability(d, today);
            assert_eq!(availability, ArchiveAvailability::TooRecent);
            assert!(!availability.is_available());
            assert!(availability.hint().is_some());
        }
    }

    #[test]
    fn test_coverage_start_boundary() {
        let today = date(2026, 10, 19);
        assert_eq!(
            archive_availability(date(1940, 1, 1), today),
            ArchiveAvailability::Available
        );
        assert_eq!(
            archive_availability(date(1939, 12, 31), today),
            ArchiveAvailability::BeforeCoverage
        );
    }

    #[test]
    fn test_available_has_no_hint() {
        assert!(ArchiveAvailability::Available.hint().is_none());
    }
}
