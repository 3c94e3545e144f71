//! Public holiday calendars.
//!
//! The obligation calculator only needs to know which dates are public
//! holidays. [`HolidayCalendar`] is that seam; [`StaticHolidayCalendar`] is a
//! table-backed implementation filled from configuration.

use std::collections::{BTreeMap, BTreeSet};

use chrono::{Datelike, NaiveDate};

use crate::models::PublicHoliday;

/// A source of public holidays for one country.
pub trait HolidayCalendar {
    /// Returns every public holiday in `year`.
    fn public_holidays(&self, year: i32) -> BTreeSet<NaiveDate>;

    /// Checks whether `date` is a public holiday.
    fn is_public_holiday(&self, date: NaiveDate) -> bool {
        self.public_holidays(date.year()).contains(&date)
    }
}

/// A holiday calendar backed by an explicit table of dates.
///
/// # Example
///
/// ```
/// use kr_payroll::calendar::{HolidayCalendar, StaticHolidayCalendar};
/// use kr_payroll::models::PublicHoliday;
/// use chrono::NaiveDate;
///
/// let calendar = StaticHolidayCalendar::new(vec![PublicHoliday {
///     date: NaiveDate::from_ymd_opt(2025, 10, 9).unwrap(),
///     name: "한글날".to_string(),
/// }]);
///
/// assert!(calendar.is_public_holiday(NaiveDate::from_ymd_opt(2025, 10, 9).unwrap()));
/// assert!(!calendar.is_public_holiday(NaiveDate::from_ymd_opt(2025, 10, 10).unwrap()));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StaticHolidayCalendar {
    holidays: BTreeMap<NaiveDate, String>,
}

impl StaticHolidayCalendar {
    /// Creates a calendar from a list of holidays.
    ///
    /// When two entries share a date their names are joined, as with Korean
    /// holidays that coincide (e.g. Children's Day and Buddha's Birthday).
    pub fn new(holidays: Vec<PublicHoliday>) -> Self {
        let mut calendar = Self::default();
        for holiday in holidays {
            calendar.insert(holiday);
        }
        calendar
    }

    /// Adds a holiday to the table.
    pub fn insert(&mut self, holiday: PublicHoliday) {
        self.holidays
            .entry(holiday.date)
            .and_modify(|name| {
                name.push_str(" / ");
                name.push_str(&holiday.name);
            })
            .or_insert(holiday.name);
    }

    /// Returns the name of the holiday on `date`, if any.
    pub fn name_of(&self, date: NaiveDate) -> Option<&str> {
        self.holidays.get(&date).map(String::as_str)
    }

    /// Returns the holidays of `year` in date order.
    pub fn holidays_in(&self, year: i32) -> Vec<PublicHoliday> {
        self.year_range(year)
            .map(|(date, name)| PublicHoliday {
                date: *date,
                name: name.clone(),
            })
            .collect()
    }

    /// Number of distinct holiday dates in the table.
    pub fn len(&self) -> usize {
        self.holidays.len()
    }

    /// Returns `true` if the table holds no holidays.
    pub fn is_empty(&self) -> bool {
        self.holidays.is_empty()
    }

    fn year_range(&self, year: i32) -> impl Iterator<Item = (&NaiveDate, &String)> {
        let start = NaiveDate::from_ymd_opt(year, 1, 1);
        let end = NaiveDate::from_ymd_opt(year, 12, 31);
        let range = match (start, end) {
            (Some(start), Some(end)) => Some(self.holidays.range(start..=end)),
            _ => None,
        };
        range.into_iter().flatten()
    }
}

impl HolidayCalendar for StaticHolidayCalendar {
    fn public_holidays(&self, year: i32) -> BTreeSet<NaiveDate> {
        self.year_range(year).map(|(date, _)| *date).collect()
    }

    fn is_public_holiday(&self, date: NaiveDate) -> bool {
        self.holidays.contains_key(&date)
    }
}

impl<C: HolidayCalendar + ?Sized> HolidayCalendar for &C {
    fn public_holidays(&self, year: i32) -> BTreeSet<NaiveDate> {
        (**self).public_holidays(year)
    }

    fn is_public_holiday(&self, date: NaiveDate) -> bool {
        (**self).is_public_holiday(date)
    }
}
