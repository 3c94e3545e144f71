//! Work-shift record model and its classification types.
//!
//! A [`WorkShiftRecord`] is one day's clock-in/clock-out entry. The day type
//! and overnight flag together form a [`ShiftKind`], the closed set of four
//! classifications the decomposer distinguishes.

use std::fmt;
use std::str::FromStr;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::calculation::normalize_time;
use crate::error::EngineError;

/// Whether a shift was worked on an ordinary day or on a holiday/special day.
///
/// # Example
///
/// ```
/// use kr_payroll::models::DayType;
///
/// assert_eq!(DayType::HolidaySpecial.to_string(), "holiday_special");
/// assert_eq!("ordinary".parse::<DayType>().unwrap(), DayType::Ordinary);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DayType {
    /// An ordinary working day; worked time goes to the normal bucket.
    #[default]
    Ordinary,
    /// A holiday or special day; worked time goes to the holiday bucket.
    HolidaySpecial,
}

impl DayType {
    /// Returns the storage representation of the day type.
    pub fn as_str(&self) -> &'static str {
        match self {
            DayType::Ordinary => "ordinary",
            DayType::HolidaySpecial => "holiday_special",
        }
    }
}

impl fmt::Display for DayType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DayType {
    type Err = EngineError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "ordinary" => Ok(DayType::Ordinary),
            "holiday_special" => Ok(DayType::HolidaySpecial),
            other => Err(EngineError::InvalidConfiguration {
                field: "day_type".to_string(),
                message: format!("unknown day type '{}'", other),
            }),
        }
    }
}

/// The classification of a shift: day type crossed with the overnight flag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct ShiftKind {
    /// Ordinary or holiday/special day.
    pub day_type: DayType,
    /// Whether the end time falls on the calendar day after the start time.
    pub spans_midnight: bool,
}

impl ShiftKind {
    /// Every shift classification.
    pub const ALL: [ShiftKind; 4] = [
        ShiftKind::new(DayType::Ordinary, false),
        ShiftKind::new(DayType::Ordinary, true),
        ShiftKind::new(DayType::HolidaySpecial, false),
        ShiftKind::new(DayType::HolidaySpecial, true),
    ];

    /// Creates a shift kind.
    pub const fn new(day_type: DayType, spans_midnight: bool) -> Self {
        Self {
            day_type,
            spans_midnight,
        }
    }

    /// A same-day shift on an ordinary day.
    pub const fn ordinary() -> Self {
        Self::new(DayType::Ordinary, false)
    }

    /// A same-day shift on a holiday/special day.
    pub const fn holiday() -> Self {
        Self::new(DayType::HolidaySpecial, false)
    }

    /// Returns this kind with the overnight flag set.
    pub const fn overnight(self) -> Self {
        Self::new(self.day_type, true)
    }
}

/// A single day's work record, keyed by date.
///
/// Times are kept as text in canonical `HH:MM` form where possible. Text
/// that cannot be normalized is stored as entered and reported as a parse
/// failure when the record is decomposed.
///
/// # Example
///
/// ```
/// use kr_payroll::models::{ShiftKind, WorkShiftRecord};
/// use chrono::NaiveDate;
///
/// let record = WorkShiftRecord::new(
///     NaiveDate::from_ymd_opt(2025, 1, 15).unwrap(),
///     "0900",
///     "1800",
///     ShiftKind::ordinary(),
/// );
/// assert_eq!(record.start_time, "09:00");
/// assert_eq!(record.end_time, "18:00");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorkShiftRecord {
    /// The calendar day of the shift; unique within a store.
    pub date: NaiveDate,
    /// Clock-in time of day.
    pub start_time: String,
    /// Clock-out time of day.
    pub end_time: String,
    /// Ordinary or holiday/special day.
    pub day_type: DayType,
    /// Whether the shift ends on the following calendar day.
    pub spans_midnight: bool,
}

impl WorkShiftRecord {
    /// Creates a record, normalizing both times through
    /// [`normalize_time`](crate::calculation::normalize_time).
    pub fn new(date: NaiveDate, start_time: &str, end_time: &str, kind: ShiftKind) -> Self {
        Self {
            date,
            start_time: normalize_time(start_time),
            end_time: normalize_time(end_time),
            day_type: kind.day_type,
            spans_midnight: kind.spans_midnight,
        }
    }

    /// Returns the shift classification of this record.
    pub fn kind(&self) -> ShiftKind {
        ShiftKind::new(self.day_type, self.spans_midnight)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_date(date_str: &str) -> NaiveDate {
        NaiveDate::parse_from_str(date_str, "%Y-%m-%d").unwrap()
    }

    #[test]
    fn test_new_normalizes_four_digit_times() {
        let record = WorkShiftRecord::new(
            make_date("2025-01-15"),
            "2200",
            "0600",
            ShiftKind::ordinary().overnight(),
        );
        assert_eq!(record.start_time, "22:00");
        assert_eq!(record.end_time, "06:00");
        assert!(record.spans_midnight);
        assert_eq!(record.day_type, DayType::Ordinary);
    }

    #[test]
    fn test_new_keeps_unparseable_text() {
        let record = WorkShiftRecord::new(
            make_date("2025-01-15"),
            "nine",
            "18:00",
            ShiftKind::ordinary(),
        );
        assert_eq!(record.start_time, "nine");
    }

    #[test]
    fn test_kind_round_trips_fields() {
        for kind in ShiftKind::ALL {
            let record = WorkShiftRecord::new(make_date("2025-01-15"), "09:00", "18:00", kind);
            assert_eq!(record.kind(), kind);
        }
    }

    #[test]
    fn test_all_kinds_are_distinct() {
        let kinds: std::collections::HashSet<_> = ShiftKind::ALL.iter().collect();
        assert_eq!(kinds.len(), 4);
    }

    #[test]
    fn test_day_type_parse_rejects_unknown() {
        let result = "weekend".parse::<DayType>();
        assert!(matches!(
            result,
            Err(EngineError::InvalidConfiguration { .. })
        ));
    }

    #[test]
    fn test_record_serialization() {
        let record = WorkShiftRecord::new(
            make_date("2025-01-01"),
            "09:00",
            "18:00",
            ShiftKind::holiday(),
        );
        let json = serde_json::to_value(&record).unwrap();
        assert_eq!(json["date"], "2025-01-01");
        assert_eq!(json["day_type"], "holiday_special");
        assert_eq!(json["spans_midnight"], false);

        let back: WorkShiftRecord = serde_json::from_value(json).unwrap();
        assert_eq!(back, record);
    }
}
