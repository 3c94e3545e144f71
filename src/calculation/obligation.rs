//! Statutory working-hour obligation.
//!
//! The obligation for a month is every Monday-to-Friday day that is not a
//! public holiday, at eight hours a day.

use chrono::{Datelike, Weekday};
use tracing::debug;

use crate::calendar::HolidayCalendar;
use crate::error::EngineResult;
use crate::models::PayrollMonth;

/// Statutory working hours per working day.
pub const OBLIGATED_HOURS_PER_DAY: u32 = 8;

/// Counts the statutory working days of `month`.
///
/// # Example
///
/// ```
/// use kr_payroll::calculation::statutory_working_days;
/// use kr_payroll::calendar::StaticHolidayCalendar;
/// use kr_payroll::models::PayrollMonth;
///
/// // January 2025 has 23 weekdays
/// let month = PayrollMonth::new(2025, 1).unwrap();
/// assert_eq!(statutory_working_days(&month, &StaticHolidayCalendar::default()), 23);
/// ```
pub fn statutory_working_days<C: HolidayCalendar + ?Sized>(
    month: &PayrollMonth,
    calendar: &C,
) -> u32 {
    let holidays = calendar.public_holidays(month.year());

    month
        .days()
        .filter(|day| !matches!(day.weekday(), Weekday::Sat | Weekday::Sun))
        .filter(|day| !holidays.contains(day))
        .count() as u32
}

/// Computes the obligated working hours for `year`/`month`.
///
/// # Errors
///
/// Returns [`EngineError::InvalidPeriod`](crate::error::EngineError::InvalidPeriod)
/// when the month is outside 1-12 or the year is not representable.
///
/// # Example
///
/// ```
/// use kr_payroll::calculation::obligated_hours;
/// use kr_payroll::calendar::StaticHolidayCalendar;
///
/// let hours = obligated_hours(2025, 1, &StaticHolidayCalendar::default()).unwrap();
/// assert_eq!(hours, 23 * 8);
///
/// assert!(obligated_hours(2025, 13, &StaticHolidayCalendar::default()).is_err());
/// ```
pub fn obligated_hours<C: HolidayCalendar + ?Sized>(
    year: i32,
    month: u32,
    calendar: &C,
) -> EngineResult<u32> {
    let month = PayrollMonth::new(year, month)?;
    Ok(obligated_hours_for(&month, calendar))
}

/// Computes the obligated working hours for an already validated month.
pub fn obligated_hours_for<C: HolidayCalendar + ?Sized>(
    month: &PayrollMonth,
    calendar: &C,
) -> u32 {
    let working_days = statutory_working_days(month, calendar);
    let hours = working_days * OBLIGATED_HOURS_PER_DAY;

    debug!(
        period = %month,
        working_days,
        obligated_hours = hours,
        "Computed working-hour obligation"
    );

    hours
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calendar::StaticHolidayCalendar;
    use crate::error::EngineError;
    use crate::models::PublicHoliday;
    use chrono::NaiveDate;

    fn make_date(date_str: &str) -> NaiveDate {
        NaiveDate::parse_from_str(date_str, "%Y-%m-%d").unwrap()
    }

    fn calendar(dates: &[&str]) -> StaticHolidayCalendar {
        StaticHolidayCalendar::new(
            dates
                .iter()
                .map(|d| PublicHoliday {
                    date: make_date(d),
                    name: "holiday".to_string(),
                })
                .collect(),
        )
    }

    #[test]
    fn test_january_2025_with_new_year_and_seollal() {
        let cal = calendar(&["2025-01-01", "2025-01-28", "2025-01-29", "2025-01-30"]);
        // 23 weekdays - 4 holidays = 19 days
        assert_eq!(obligated_hours(2025, 1, &cal).unwrap(), 152);
    }

    #[test]
    fn test_weekend_holiday_does_not_change_obligation() {
        // 2025-03-01 is a Saturday
        let without = obligated_hours(2025, 3, &StaticHolidayCalendar::default()).unwrap();
        let with = obligated_hours(2025, 3, &calendar(&["2025-03-01"])).unwrap();
        assert_eq!(without, with);
        assert_eq!(without, 21 * 8);
    }

    #[test]
    fn test_weekday_holiday_reduces_obligation_by_eight() {
        let base = calendar(&["2025-10-03"]);
        let more = calendar(&["2025-10-03", "2025-10-15"]);

        let before = obligated_hours(2025, 10, &base).unwrap();
        let after = obligated_hours(2025, 10, &more).unwrap();
        assert_eq!(before - after, OBLIGATED_HOURS_PER_DAY);
    }

    #[test]
    fn test_holidays_in_other_months_are_ignored() {
        let cal = calendar(&["2026-02-17", "2025-01-15"]);
        // January 2026 has 22 weekdays
        assert_eq!(obligated_hours(2026, 1, &cal).unwrap(), 22 * 8);
    }

    #[test]
    fn test_invalid_month_is_configuration_error() {
        let result = obligated_hours(2025, 0, &StaticHolidayCalendar::default());
        match result {
            Err(err @ EngineError::InvalidPeriod { .. }) => {
                assert!(err.is_configuration_error());
            }
            other => panic!("Expected InvalidPeriod, got {:?}", other),
        }
    }
}
