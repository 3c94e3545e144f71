//! Hour bucket models.
//!
//! Worked time is carried as whole seconds ([`BucketSeconds`]) while it is
//! summed and only turned into [`HourBuckets`] once, for presentation.

use std::iter::Sum;
use std::ops::{Add, AddAssign};

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Worked hours split into normal, night and holiday categories.
///
/// Night hours are a premium category: they overlap the normal or holiday
/// hours of the same shift rather than replacing the holiday bucket.
///
/// # Example
///
/// ```
/// use kr_payroll::models::HourBuckets;
/// use rust_decimal::Decimal;
///
/// let a = HourBuckets::new(Decimal::new(8, 0), Decimal::ZERO, Decimal::ZERO);
/// let b = HourBuckets::new(Decimal::ZERO, Decimal::new(75, 1), Decimal::ZERO);
/// let total: HourBuckets = [a, b].into_iter().sum();
/// assert_eq!(total.total(), Decimal::new(155, 1));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct HourBuckets {
    /// Hours worked on an ordinary day outside the night window.
    pub normal: Decimal,
    /// Hours worked inside the 22:00-06:00 night window.
    pub night: Decimal,
    /// Hours worked on a holiday/special day.
    pub holiday: Decimal,
}

impl HourBuckets {
    /// Creates a set of buckets.
    pub fn new(normal: Decimal, night: Decimal, holiday: Decimal) -> Self {
        Self {
            normal,
            night,
            holiday,
        }
    }

    /// Empty buckets.
    pub fn zero() -> Self {
        Self::default()
    }

    /// Sum of all three buckets.
    pub fn total(&self) -> Decimal {
        self.normal + self.night + self.holiday
    }
}

impl Add for HourBuckets {
    type Output = HourBuckets;

    fn add(self, rhs: HourBuckets) -> HourBuckets {
        HourBuckets {
            normal: self.normal + rhs.normal,
            night: self.night + rhs.night,
            holiday: self.holiday + rhs.holiday,
        }
    }
}

impl AddAssign for HourBuckets {
    fn add_assign(&mut self, rhs: HourBuckets) {
        *self = *self + rhs;
    }
}

impl Sum for HourBuckets {
    fn sum<I: Iterator<Item = HourBuckets>>(iter: I) -> Self {
        iter.fold(HourBuckets::zero(), Add::add)
    }
}

const SECONDS_PER_HOUR: i64 = 3600;

/// Worked seconds split into normal, night and holiday categories.
///
/// Summing whole seconds keeps a month of shifts exact. Convert with
/// [`BucketSeconds::to_hours`] after the last addition.
///
/// # Example
///
/// ```
/// use kr_payroll::models::BucketSeconds;
/// use rust_decimal::Decimal;
///
/// let shift = BucketSeconds::new(0, 20 * 60, 0);
/// let month: BucketSeconds = [shift, shift, shift].into_iter().sum();
/// assert_eq!(month.to_hours().night, Decimal::ONE);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct BucketSeconds {
    /// Seconds worked on an ordinary day outside the night window.
    pub normal: i64,
    /// Seconds worked inside the night window.
    pub night: i64,
    /// Seconds worked on a holiday/special day.
    pub holiday: i64,
}

impl BucketSeconds {
    /// Creates a set of second buckets.
    pub fn new(normal: i64, night: i64, holiday: i64) -> Self {
        Self {
            normal,
            night,
            holiday,
        }
    }

    /// Empty buckets.
    pub fn zero() -> Self {
        Self::default()
    }

    /// Sum of all three buckets.
    pub fn total(&self) -> i64 {
        self.normal + self.night + self.holiday
    }

    /// Converts each bucket to hours with a single division.
    pub fn to_hours(&self) -> HourBuckets {
        HourBuckets::new(
            seconds_to_hours(self.normal),
            seconds_to_hours(self.night),
            seconds_to_hours(self.holiday),
        )
    }
}

/// Converts whole seconds to decimal hours.
pub fn seconds_to_hours(seconds: i64) -> Decimal {
    Decimal::from(seconds) / Decimal::from(SECONDS_PER_HOUR)
}

impl Add for BucketSeconds {
    type Output = BucketSeconds;

    fn add(self, rhs: BucketSeconds) -> BucketSeconds {
        BucketSeconds {
            normal: self.normal + rhs.normal,
            night: self.night + rhs.night,
            holiday: self.holiday + rhs.holiday,
        }
    }
}

impl AddAssign for BucketSeconds {
    fn add_assign(&mut self, rhs: BucketSeconds) {
        *self = *self + rhs;
    }
}

impl Sum for BucketSeconds {
    fn sum<I: Iterator<Item = BucketSeconds>>(iter: I) -> Self {
        iter.fold(BucketSeconds::zero(), Add::add)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    #[test]
    fn test_zero_is_empty() {
        let zero = HourBuckets::zero();
        assert_eq!(zero.total(), Decimal::ZERO);
    }

    #[test]
    fn test_add_assign_accumulates_each_bucket() {
        let mut totals = HourBuckets::zero();
        totals += HourBuckets::new(dec("8"), dec("0"), dec("0"));
        totals += HourBuckets::new(dec("0"), dec("7.5"), dec("0"));
        totals += HourBuckets::new(dec("0"), dec("1"), dec("8"));

        assert_eq!(totals.normal, dec("8"));
        assert_eq!(totals.night, dec("8.5"));
        assert_eq!(totals.holiday, dec("8"));
        assert_eq!(totals.total(), dec("24.5"));
    }

    #[test]
    fn test_sum_of_empty_iterator_is_zero() {
        let total: HourBuckets = std::iter::empty().sum();
        assert_eq!(total, HourBuckets::zero());
    }

    #[test]
    fn test_seconds_convert_to_exact_hours() {
        let seconds = BucketSeconds::new(8 * 3600, 450 * 60, 0);
        let hours = seconds.to_hours();

        assert_eq!(hours.normal, dec("8"));
        assert_eq!(hours.night, dec("7.5"));
        assert_eq!(hours.holiday, dec("0"));
    }

    /// Twenty minutes is 0.333... h; three of them must add up to one hour.
    #[test]
    fn test_summed_thirds_of_an_hour_stay_exact() {
        let mut totals = BucketSeconds::zero();
        for _ in 0..3 {
            totals += BucketSeconds::new(0, 20 * 60, 0);
        }

        assert_eq!(totals.night, 3600);
        assert_eq!(totals.to_hours().night, dec("1"));
        assert_eq!(totals.to_hours().total(), dec("1"));
    }
}
