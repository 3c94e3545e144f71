//! Core data models for the payroll engine.
//!
//! This module contains all the domain models used throughout the engine.

mod deduction;
mod hour_buckets;
mod pay_period;
mod payroll_result;
mod shift_record;

pub use deduction::{DeductionLine, DeductionResult};
pub use hour_buckets::{BucketSeconds, HourBuckets, seconds_to_hours};
pub use pay_period::{PayrollMonth, PublicHoliday, SUPPORTED_YEARS};
pub use payroll_result::{
    MonthlyPayrollReport, MonthlyPayrollResult, RecordBreakdown, RecordWarning,
    WARNING_INVALID_TIME, WARNING_NEGATIVE_DURATION,
};
pub use shift_record::{DayType, ShiftKind, WorkShiftRecord};
