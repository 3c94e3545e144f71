//! Shift decomposition into hour buckets.
//!
//! This module turns one clock-in/clock-out pair into normal, night and
//! holiday hours. The steps are:
//! 1. Parse both times and compute elapsed minutes, adding a day for
//!    overnight shifts
//! 2. Deduct the statutory unpaid break for the elapsed length
//! 3. Count minutes falling in the 22:00-06:00 night window, capped at the
//!    effective (post-break) time
//! 4. Assign the effective time to the normal or holiday bucket by day type

use chrono::{NaiveTime, Timelike};
use serde::{Deserialize, Serialize};

use crate::error::EngineResult;
use crate::models::{BucketSeconds, DayType, HourBuckets, ShiftKind, WorkShiftRecord};

use super::time_parser::parse_time;

/// Elapsed minutes from which a 30-minute break applies (4.5 hours).
pub const SHORT_BREAK_THRESHOLD_MINUTES: i64 = 270;

/// Elapsed minutes from which a 60-minute break applies (9 hours).
pub const LONG_BREAK_THRESHOLD_MINUTES: i64 = 540;

/// Each further complete block of this length beyond the long threshold adds
/// [`SHORT_BREAK_MINUTES`].
pub const BREAK_BLOCK_MINUTES: i64 = 270;

/// Break granted for shifts between the two thresholds.
pub const SHORT_BREAK_MINUTES: i64 = 30;

/// Break granted at the long threshold.
pub const LONG_BREAK_MINUTES: i64 = 60;

/// First hour of the night window.
pub const NIGHT_START_HOUR: u32 = 22;

/// Hour at which the night window ends (exclusive).
pub const NIGHT_END_HOUR: u32 = 6;

const MINUTES_PER_DAY: i64 = 24 * 60;

/// The full result of decomposing one shift.
///
/// # Example
///
/// ```
/// use kr_payroll::calculation::decompose_shift;
/// use kr_payroll::models::ShiftKind;
/// use rust_decimal::Decimal;
///
/// let result = decompose_shift("22:00", "06:00", ShiftKind::ordinary().overnight()).unwrap();
/// assert_eq!(result.elapsed_minutes, 480);
/// assert_eq!(result.break_minutes, 30);
/// assert_eq!(result.buckets.night, Decimal::new(75, 1));
/// assert_eq!(result.buckets.normal, Decimal::ZERO);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShiftDecomposition {
    /// Minutes from clock-in to clock-out. Negative when the end precedes
    /// the start on a shift not flagged as overnight.
    pub elapsed_minutes: i64,
    /// Unpaid break minutes deducted.
    pub break_minutes: i64,
    /// Worked seconds after the break, never negative.
    pub effective_seconds: i64,
    /// Night-window seconds, capped at `effective_seconds`.
    pub night_seconds: i64,
    /// Bucketed whole seconds, the form monthly totals are summed in.
    pub seconds: BucketSeconds,
    /// The same buckets in hours.
    pub buckets: HourBuckets,
}

/// Returns the unpaid break for a shift of `elapsed_minutes`.
///
/// - under 270 minutes: no break
/// - 270 to 539 minutes: 30 minutes
/// - 540 minutes and over: 60 minutes, plus 30 for every further complete
///   270-minute block
///
/// # Examples
///
/// ```
/// use kr_payroll::calculation::break_minutes;
///
/// assert_eq!(break_minutes(269), 0);
/// assert_eq!(break_minutes(270), 30);
/// assert_eq!(break_minutes(540), 60);
/// assert_eq!(break_minutes(810), 90);
/// ```
pub fn break_minutes(elapsed_minutes: i64) -> i64 {
    if elapsed_minutes >= LONG_BREAK_THRESHOLD_MINUTES {
        let extra_blocks =
            (elapsed_minutes - LONG_BREAK_THRESHOLD_MINUTES) / BREAK_BLOCK_MINUTES;
        LONG_BREAK_MINUTES + SHORT_BREAK_MINUTES * extra_blocks
    } else if elapsed_minutes >= SHORT_BREAK_THRESHOLD_MINUTES {
        SHORT_BREAK_MINUTES
    } else {
        0
    }
}

/// Checks whether an hour of the day lies in the night window.
pub fn is_night_hour(hour: u32) -> bool {
    hour >= NIGHT_START_HOUR || hour < NIGHT_END_HOUR
}

/// Counts the whole minutes of `[start, start + elapsed)` that fall in the
/// night window. Non-positive `elapsed_minutes` yields zero.
pub fn night_minutes(start: NaiveTime, elapsed_minutes: i64) -> i64 {
    let start_minute = i64::from(start.hour() * 60 + start.minute());

    (0..elapsed_minutes.max(0))
        .filter(|offset| {
            let minute_of_day = (start_minute + offset).rem_euclid(MINUTES_PER_DAY);
            is_night_hour((minute_of_day / 60) as u32)
        })
        .count() as i64
}

/// Decomposes a shift and returns every intermediate figure.
///
/// # Arguments
///
/// * `start` - Clock-in time as `HH:MM`
/// * `end` - Clock-out time as `HH:MM`
/// * `kind` - Day type and overnight flag
///
/// # Errors
///
/// Returns [`EngineError::InvalidTime`](crate::error::EngineError::InvalidTime)
/// when either time does not parse.
pub fn decompose_shift(
    start: &str,
    end: &str,
    kind: ShiftKind,
) -> EngineResult<ShiftDecomposition> {
    let start_time = parse_time(start)?;
    let end_time = parse_time(end)?;

    let mut elapsed_minutes = (end_time - start_time).num_minutes();
    if kind.spans_midnight {
        elapsed_minutes += MINUTES_PER_DAY;
    }

    let unpaid_break = break_minutes(elapsed_minutes);
    let effective_seconds = ((elapsed_minutes - unpaid_break) * 60).max(0);

    // The break is taken out of day time first, so night time only shrinks
    // once it would exceed the whole effective time.
    let night_seconds =
        (night_minutes(start_time, elapsed_minutes) * 60).min(effective_seconds);

    let (normal_seconds, holiday_seconds) = match kind.day_type {
        DayType::HolidaySpecial => (0, effective_seconds),
        DayType::Ordinary => ((effective_seconds - night_seconds).max(0), 0),
    };

    let seconds = BucketSeconds::new(normal_seconds, night_seconds, holiday_seconds);

    Ok(ShiftDecomposition {
        elapsed_minutes,
        break_minutes: unpaid_break,
        effective_seconds,
        night_seconds,
        seconds,
        buckets: seconds.to_hours(),
    })
}

/// Decomposes a shift into hour buckets.
///
/// # Examples
///
/// ```
/// use kr_payroll::calculation::decompose;
/// use kr_payroll::models::ShiftKind;
/// use rust_decimal::Decimal;
///
/// // 9 hours on a holiday: 60 minute break, 8 holiday hours
/// let buckets = decompose("09:00", "18:00", ShiftKind::holiday()).unwrap();
/// assert_eq!(buckets.holiday, Decimal::from(8));
/// assert_eq!(buckets.normal, Decimal::ZERO);
/// assert_eq!(buckets.night, Decimal::ZERO);
/// ```
pub fn decompose(start: &str, end: &str, kind: ShiftKind) -> EngineResult<HourBuckets> {
    decompose_shift(start, end, kind).map(|d| d.buckets)
}

/// Decomposes a stored work record.
pub fn decompose_record(record: &WorkShiftRecord) -> EngineResult<ShiftDecomposition> {
    decompose_shift(&record.start_time, &record.end_time, record.kind())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::EngineError;
    use proptest::prelude::*;
    use rust_decimal::Decimal;
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    fn hm(minutes: u32) -> String {
        format!("{:02}:{:02}", minutes / 60, minutes % 60)
    }

    fn time(s: &str) -> NaiveTime {
        NaiveTime::parse_from_str(s, "%H:%M").unwrap()
    }

    #[test]
    fn test_break_thresholds() {
        assert_eq!(break_minutes(0), 0);
        assert_eq!(break_minutes(269), 0);
        assert_eq!(break_minutes(270), 30);
        assert_eq!(break_minutes(539), 30);
        assert_eq!(break_minutes(540), 60);
        assert_eq!(break_minutes(809), 60);
        assert_eq!(break_minutes(810), 90);
        assert_eq!(break_minutes(1079), 90);
        assert_eq!(break_minutes(1080), 120);
    }

    #[test]
    fn test_break_is_zero_for_negative_elapsed() {
        assert_eq!(break_minutes(-540), 0);
    }

    #[test]
    fn test_night_window_boundaries() {
        assert!(is_night_hour(22));
        assert!(is_night_hour(23));
        assert!(is_night_hour(0));
        assert!(is_night_hour(5));
        assert!(!is_night_hour(6));
        assert!(!is_night_hour(21));
        assert!(!is_night_hour(12));
    }

    #[test]
    fn test_night_minutes_wraps_past_midnight() {
        // 21:30 for 9 hours -> 22:00-06:00 is night = 480 minutes
        assert_eq!(night_minutes(time("21:30"), 540), 480);
        // 05:30 for 1 hour -> 30 minutes before 06:00
        assert_eq!(night_minutes(time("05:30"), 60), 30);
        assert_eq!(night_minutes(time("22:00"), 0), 0);
        assert_eq!(night_minutes(time("22:00"), -60), 0);
    }

    /// Day shift 09:00-18:00 on an ordinary day.
    #[test]
    fn test_ordinary_day_shift_has_no_night_hours() {
        let result = decompose_shift("09:00", "18:00", ShiftKind::ordinary()).unwrap();

        assert_eq!(result.elapsed_minutes, 540);
        assert_eq!(result.break_minutes, 60);
        assert_eq!(result.effective_seconds, 480 * 60);
        assert_eq!(result.buckets.normal, dec("8"));
        assert_eq!(result.buckets.night, dec("0"));
        assert_eq!(result.buckets.holiday, dec("0"));
    }

    /// 22:00 to 06:00 next day: every minute is night.
    #[test]
    fn test_full_night_shift_clamps_night_to_effective() {
        let result =
            decompose_shift("22:00", "06:00", ShiftKind::ordinary().overnight()).unwrap();

        assert_eq!(result.elapsed_minutes, 480);
        assert_eq!(result.break_minutes, 30);
        assert_eq!(result.effective_seconds, 450 * 60);
        assert_eq!(result.night_seconds, 450 * 60);
        assert_eq!(result.buckets.night, dec("7.5"));
        assert_eq!(result.buckets.normal, dec("0"));
        assert_eq!(result.buckets.holiday, dec("0"));
    }

    #[test]
    fn test_twenty_night_minutes_kept_as_whole_seconds() {
        // 21:40-22:20: 40 minutes, no break, 20 of them at night
        let result = decompose_shift("21:40", "22:20", ShiftKind::ordinary()).unwrap();

        assert_eq!(result.seconds, BucketSeconds::new(20 * 60, 20 * 60, 0));
        assert_eq!(result.effective_seconds, 40 * 60);
    }

    #[test]
    fn test_holiday_day_shift_goes_to_holiday_bucket() {
        let buckets = decompose("09:00", "18:00", ShiftKind::holiday()).unwrap();

        assert_eq!(buckets.holiday, dec("8"));
        assert_eq!(buckets.normal, dec("0"));
        assert_eq!(buckets.night, dec("0"));
    }

    #[test]
    fn test_holiday_night_shift_fills_holiday_and_night() {
        let buckets = decompose("22:00", "06:00", ShiftKind::holiday().overnight()).unwrap();

        assert_eq!(buckets.holiday, dec("7.5"));
        assert_eq!(buckets.night, dec("7.5"));
        assert_eq!(buckets.normal, dec("0"));
    }

    #[test]
    fn test_evening_shift_splits_normal_and_night() {
        // 18:00-23:00: 300 min, 30 min break, 270 effective, 60 night
        let buckets = decompose("18:00", "23:00", ShiftKind::ordinary()).unwrap();

        assert_eq!(buckets.night, dec("1"));
        assert_eq!(buckets.normal, dec("3.5"));
    }

    #[test]
    fn test_every_kind_of_late_shift() {
        // 21:00-23:30. Same day: 150 min, no break, 90 night minutes.
        // Overnight: 1590 min, 150 break, 1440 effective, 570 night minutes.
        let cases = [
            (ShiftKind::ordinary(), "1", "1.5", "0"),
            (ShiftKind::ordinary().overnight(), "14.5", "9.5", "0"),
            (ShiftKind::holiday(), "0", "1.5", "2.5"),
            (ShiftKind::holiday().overnight(), "0", "9.5", "24"),
        ];
        assert_eq!(cases.len(), ShiftKind::ALL.len());

        for (kind, normal, night, holiday) in cases {
            let buckets = decompose("21:00", "23:30", kind).unwrap();
            assert_eq!(buckets.normal, dec(normal), "normal for {:?}", kind);
            assert_eq!(buckets.night, dec(night), "night for {:?}", kind);
            assert_eq!(buckets.holiday, dec(holiday), "holiday for {:?}", kind);
        }
    }

    #[test]
    fn test_break_ignores_midday_overlap_on_overnight_shift() {
        // 20:00 to 14:00 next day covers the 12:00-13:00 lunch window.
        let result =
            decompose_shift("20:00", "14:00", ShiftKind::ordinary().overnight()).unwrap();

        assert_eq!(result.elapsed_minutes, 1080);
        assert_eq!(result.break_minutes, break_minutes(1080));
        assert_eq!(result.break_minutes, 120);

        // Same length, starting after the lunch window closes
        let after_lunch =
            decompose_shift("13:00", "07:00", ShiftKind::ordinary().overnight()).unwrap();
        assert_eq!(after_lunch.elapsed_minutes, 1080);
        assert_eq!(after_lunch.break_minutes, result.break_minutes);
    }

    #[test]
    fn test_overnight_flag_with_later_end_adds_a_full_day() {
        // 09:00 to 10:00 the next day: 25 hours
        let result =
            decompose_shift("09:00", "10:00", ShiftKind::ordinary().overnight()).unwrap();

        assert_eq!(result.elapsed_minutes, 1500);
        assert_eq!(result.break_minutes, 150);
        assert_eq!(result.buckets.night, dec("8"));
        assert_eq!(result.buckets.normal, dec("14.5"));
    }

    #[test]
    fn test_end_before_start_without_overnight_flag_is_zero() {
        let result = decompose_shift("18:00", "09:00", ShiftKind::ordinary()).unwrap();

        assert_eq!(result.elapsed_minutes, -540);
        assert_eq!(result.break_minutes, 0);
        assert_eq!(result.effective_seconds, 0);
        assert_eq!(result.buckets, HourBuckets::zero());
    }

    #[test]
    fn test_zero_length_shift() {
        let buckets = decompose("09:00", "09:00", ShiftKind::ordinary()).unwrap();
        assert_eq!(buckets, HourBuckets::zero());
    }

    #[test]
    fn test_invalid_time_is_parse_failure() {
        let result = decompose("9시", "18:00", ShiftKind::ordinary());
        match result {
            Err(EngineError::InvalidTime { value }) => assert_eq!(value, "9시"),
            other => panic!("Expected InvalidTime, got {:?}", other),
        }

        assert!(decompose("09:00", "", ShiftKind::ordinary()).is_err());
    }

    #[test]
    fn test_decompose_record_uses_record_kind() {
        let record = WorkShiftRecord::new(
            chrono::NaiveDate::from_ymd_opt(2025, 1, 1).unwrap(),
            "0900",
            "1800",
            ShiftKind::holiday(),
        );
        let result = decompose_record(&record).unwrap();
        assert_eq!(result.buckets.holiday, dec("8"));
    }

    proptest! {
        #[test]
        fn prop_break_never_decreases(elapsed in 0i64..4000) {
            prop_assert!(break_minutes(elapsed) <= break_minutes(elapsed + 1));
        }

        #[test]
        fn prop_buckets_respect_effective_time(
            start in 0u32..1440,
            end in 0u32..1440,
            kind_index in 0usize..4,
        ) {
            let kind = ShiftKind::ALL[kind_index];
            let result = decompose_shift(&hm(start), &hm(end), kind).unwrap();
            let effective = result.effective_seconds;
            let seconds = result.seconds;

            prop_assert!(seconds.normal >= 0);
            prop_assert!(seconds.night >= 0);
            prop_assert!(seconds.holiday >= 0);
            prop_assert!(seconds.night <= effective);
            prop_assert!(seconds.normal == 0 || seconds.holiday == 0);
            prop_assert_eq!(result.buckets, seconds.to_hours());

            match kind.day_type {
                DayType::Ordinary => prop_assert_eq!(seconds.normal + seconds.night, effective),
                DayType::HolidaySpecial => prop_assert_eq!(seconds.holiday, effective),
            }
        }
    }
}
