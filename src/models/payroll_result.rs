//! Monthly payroll result models.
//!
//! This module contains the [`MonthlyPayrollReport`] type and its associated
//! structures that capture all outputs from a monthly payroll run: the pay
//! figures, the per-record breakdown, and the per-record warnings.

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::config::PayrollConfiguration;

use super::{DayType, HourBuckets, PayrollMonth};

/// Warning code for a record whose times could not be parsed.
pub const WARNING_INVALID_TIME: &str = "INVALID_TIME";

/// Warning code for a record that ends before it starts without the
/// overnight flag.
pub const WARNING_NEGATIVE_DURATION: &str = "NEGATIVE_DURATION";

/// The pay figures of a monthly payroll run.
///
/// Values are kept at full precision; call [`MonthlyPayrollResult::truncated`]
/// to obtain the whole-won presentation form.
///
/// # Example
///
/// ```
/// use kr_payroll::models::MonthlyPayrollResult;
/// use rust_decimal::Decimal;
/// use std::str::FromStr;
///
/// let result = MonthlyPayrollResult {
///     obligated_hours: 160,
///     total_effective_hours: Decimal::from(170),
///     overtime_hours: Decimal::from(10),
///     overtime_pay: Decimal::from_str("150450.75").unwrap(),
///     night_pay: Decimal::ZERO,
///     holiday_pay: Decimal::ZERO,
///     gross_pay: Decimal::from_str("2250450.75").unwrap(),
///     net_pay: Decimal::from_str("2150450.75").unwrap(),
/// };
/// assert_eq!(result.truncated().net_pay, Decimal::from(2150450));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MonthlyPayrollResult {
    /// Statutory working hours for the month.
    pub obligated_hours: u32,
    /// Sum of the normal, night and holiday buckets.
    pub total_effective_hours: Decimal,
    /// Hours beyond the obligation.
    pub overtime_hours: Decimal,
    /// Overtime allowance.
    pub overtime_pay: Decimal,
    /// Night premium.
    pub night_pay: Decimal,
    /// Holiday allowance.
    pub holiday_pay: Decimal,
    /// Base salary plus all allowances.
    pub gross_pay: Decimal,
    /// Gross pay less the fixed deduction.
    pub net_pay: Decimal,
}

impl MonthlyPayrollResult {
    /// Returns a copy with every pay figure truncated to whole won.
    pub fn truncated(&self) -> Self {
        Self {
            obligated_hours: self.obligated_hours,
            total_effective_hours: self.total_effective_hours,
            overtime_hours: self.overtime_hours,
            overtime_pay: self.overtime_pay.trunc(),
            night_pay: self.night_pay.trunc(),
            holiday_pay: self.holiday_pay.trunc(),
            gross_pay: self.gross_pay.trunc(),
            net_pay: self.net_pay.trunc(),
        }
    }
}

/// How a single record contributed to the month.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecordBreakdown {
    /// The date of the record.
    pub date: NaiveDate,
    /// The record's day type.
    pub day_type: DayType,
    /// Whether the record spans midnight.
    pub spans_midnight: bool,
    /// Minutes between clock-in and clock-out.
    pub elapsed_minutes: i64,
    /// Unpaid break minutes deducted.
    pub break_minutes: i64,
    /// The hour buckets derived from the record.
    pub buckets: HourBuckets,
}

/// A per-record diagnostic raised during aggregation.
///
/// Warnings indicate records that were skipped or that contributed
/// suspicious values without failing the whole run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecordWarning {
    /// The date of the offending record.
    pub date: NaiveDate,
    /// A code identifying the type of warning.
    pub code: String,
    /// A human-readable description of the warning.
    pub message: String,
}

/// The complete output of a monthly payroll run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MonthlyPayrollReport {
    /// Unique identifier for this calculation.
    pub calculation_id: Uuid,
    /// When the calculation was performed.
    pub timestamp: DateTime<Utc>,
    /// The month the run covers.
    pub period: PayrollMonth,
    /// The wage parameters used.
    pub configuration: PayrollConfiguration,
    /// Bucketed hours summed over every valid record.
    pub totals: HourBuckets,
    /// The pay figures.
    pub result: MonthlyPayrollResult,
    /// One entry per record that was decomposed.
    pub entries: Vec<RecordBreakdown>,
    /// Diagnostics for skipped or suspicious records.
    pub warnings: Vec<RecordWarning>,
}

impl MonthlyPayrollReport {
    /// Returns `true` if any record was skipped.
    pub fn has_skipped_records(&self) -> bool {
        self.warnings.iter().any(|w| w.code == WARNING_INVALID_TIME)
    }

    /// Returns the report with its pay figures truncated to whole won.
    pub fn into_presentation(mut self) -> Self {
        self.result = self.result.truncated();
        self
    }
}
