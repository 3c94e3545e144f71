//! Configuration types for payroll computation.
//!
//! This module contains the strongly-typed configuration structures that
//! are deserialized from YAML configuration files.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::calendar::StaticHolidayCalendar;
use crate::error::{EngineError, EngineResult};
use crate::models::PublicHoliday;

/// Locale metadata for a configuration set.
#[derive(Debug, Clone, Deserialize)]
pub struct LocaleMetadata {
    /// ISO country code of the holiday calendar (e.g., "KR").
    pub country: String,
    /// ISO currency code of all monetary values (e.g., "KRW").
    pub currency: String,
    /// Human-readable name of the configuration set.
    pub name: String,
}

/// Wage parameters for a monthly payroll run.
///
/// All amounts are in won.
///
/// # Example
///
/// ```
/// use kr_payroll::config::PayrollConfiguration;
/// use rust_decimal::Decimal;
///
/// let config = PayrollConfiguration {
///     base_salary: Decimal::from(2_096_270),
///     hourly_wage: Decimal::from(10_030),
///     fixed_deduction: Decimal::ZERO,
/// };
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct PayrollConfiguration {
    /// Fixed monthly base salary.
    pub base_salary: Decimal,
    /// Hourly wage used for every allowance.
    pub hourly_wage: Decimal,
    /// Flat amount withheld from gross pay.
    pub fixed_deduction: Decimal,
}

impl PayrollConfiguration {
    /// Checks that every amount is non-negative.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::InvalidConfiguration`] naming the first
    /// negative field.
    pub fn validate(&self) -> EngineResult<()> {
        let fields = [
            ("base_salary", self.base_salary),
            ("hourly_wage", self.hourly_wage),
            ("fixed_deduction", self.fixed_deduction),
        ];
        for (field, value) in fields {
            if value < Decimal::ZERO {
                return Err(EngineError::InvalidConfiguration {
                    field: field.to_string(),
                    message: format!("must not be negative (got {})", value),
                });
            }
        }
        Ok(())
    }
}

/// Structure of `payroll.yaml`.
#[derive(Debug, Clone, Deserialize)]
pub struct PayrollSettingsFile {
    /// Locale metadata.
    pub locale: LocaleMetadata,
    /// Default wage parameters.
    pub payroll: PayrollConfiguration,
}

/// Structure of a `holidays/<year>.yaml` file.
#[derive(Debug, Clone, Deserialize)]
pub struct HolidayFile {
    /// The year every listed holiday belongs to.
    pub year: i32,
    /// The holidays of that year.
    pub holidays: Vec<PublicHoliday>,
}

/// The complete configuration loaded from YAML files.
#[derive(Debug, Clone)]
pub struct EngineConfig {
    locale: LocaleMetadata,
    payroll: PayrollConfiguration,
    calendar: StaticHolidayCalendar,
}

impl EngineConfig {
    /// Creates a new EngineConfig from its component parts.
    pub fn new(
        locale: LocaleMetadata,
        payroll: PayrollConfiguration,
        calendar: StaticHolidayCalendar,
    ) -> Self {
        Self {
            locale,
            payroll,
            calendar,
        }
    }

    /// Returns the locale metadata.
    pub fn locale(&self) -> &LocaleMetadata {
        &self.locale
    }

    /// Returns the default wage parameters.
    pub fn payroll(&self) -> &PayrollConfiguration {
        &self.payroll
    }

    /// Returns the holiday calendar.
    pub fn calendar(&self) -> &StaticHolidayCalendar {
        &self.calendar
    }
}
