//! Payroll month and public holiday models.
//!
//! This module contains the [`PayrollMonth`] and [`PublicHoliday`] types used
//! to define the calculation context for a monthly payroll run.

use chrono::{Datelike, Days, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::error::{EngineError, EngineResult};

/// Years a payroll month may fall in. Four digits keep `YYYY-MM-DD` text
/// dates in calendar order.
pub const SUPPORTED_YEARS: std::ops::RangeInclusive<i32> = 1..=9999;

/// Represents a public holiday.
///
/// # Example
///
/// ```
/// use kr_payroll::models::PublicHoliday;
/// use chrono::NaiveDate;
///
/// let holiday = PublicHoliday {
///     date: NaiveDate::from_ymd_opt(2025, 8, 15).unwrap(),
///     name: "광복절".to_string(),
/// };
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PublicHoliday {
    /// The date of the public holiday.
    pub date: NaiveDate,
    /// The name of the public holiday.
    pub name: String,
}

/// A validated calendar month that a payroll run targets.
///
/// # Example
///
/// ```
/// use kr_payroll::models::PayrollMonth;
/// use chrono::NaiveDate;
///
/// let month = PayrollMonth::new(2025, 2).unwrap();
/// assert_eq!(month.last_day(), NaiveDate::from_ymd_opt(2025, 2, 28).unwrap());
/// assert!(month.contains(NaiveDate::from_ymd_opt(2025, 2, 14).unwrap()));
/// assert!(!month.contains(NaiveDate::from_ymd_opt(2025, 3, 1).unwrap()));
///
/// assert!(PayrollMonth::new(2025, 13).is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct PayrollMonth {
    year: i32,
    month: u32,
}

impl PayrollMonth {
    /// Creates a payroll month.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::InvalidPeriod`] when `month` is outside 1-12 or
    /// `year` is outside [`SUPPORTED_YEARS`].
    pub fn new(year: i32, month: u32) -> EngineResult<Self> {
        if !(1..=12).contains(&month) || !SUPPORTED_YEARS.contains(&year) {
            return Err(EngineError::InvalidPeriod { year, month });
        }

        Ok(Self { year, month })
    }

    /// The payroll year.
    pub fn year(&self) -> i32 {
        self.year
    }

    /// The payroll month (1-12).
    pub fn month(&self) -> u32 {
        self.month
    }

    /// The first calendar day of the month.
    pub fn first_day(&self) -> NaiveDate {
        NaiveDate::from_ymd_opt(self.year, self.month, 1).unwrap_or(NaiveDate::MIN)
    }

    /// The last calendar day of the month.
    pub fn last_day(&self) -> NaiveDate {
        self.first_day()
            .checked_add_months(chrono::Months::new(1))
            .and_then(|next| next.checked_sub_days(Days::new(1)))
            .unwrap_or(NaiveDate::MAX)
    }

    /// Checks if a given date falls within this month.
    pub fn contains(&self, date: NaiveDate) -> bool {
        date.year() == self.year && date.month() == self.month
    }

    /// Iterates every calendar day of the month in order.
    pub fn days(&self) -> impl Iterator<Item = NaiveDate> + use<> {
        let month = self.month;
        self.first_day()
            .iter_days()
            .take_while(move |d| d.month() == month)
    }
}

impl std::fmt::Display for PayrollMonth {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:04}-{:02}", self.year, self.month)
    }
}
