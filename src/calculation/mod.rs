//! Calculation logic for the payroll engine.
//!
//! This module contains the time-of-day parser, the per-shift decomposition
//! into normal/night/holiday hours, the monthly working-hour obligation,
//! monthly aggregation into pay figures, and the standalone salary
//! deduction estimate.

mod obligation;
mod payroll_aggregator;
mod salary_deduction;
mod shift_decomposer;
mod time_parser;

pub use obligation::{
    OBLIGATED_HOURS_PER_DAY, obligated_hours, obligated_hours_for, statutory_working_days,
};
pub use payroll_aggregator::{
    HOLIDAY_MULTIPLIER, NIGHT_PREMIUM_MULTIPLIER, OVERTIME_MULTIPLIER, aggregate,
    aggregate_month, compute_pay,
};
pub use salary_deduction::{
    EMPLOYMENT_INSURANCE_RATE, HEALTH_INSURANCE_RATE, INCOME_TAX_RATE, LOCAL_INCOME_TAX_RATE,
    LONG_TERM_CARE_RATE, NATIONAL_PENSION_RATE, REDUCED_INCOME_TAX_RATE,
    REDUCED_RATE_DEPENDENTS, compute_deductions, income_tax_rate,
};
pub use shift_decomposer::{
    BREAK_BLOCK_MINUTES, LONG_BREAK_MINUTES, LONG_BREAK_THRESHOLD_MINUTES, NIGHT_END_HOUR,
    NIGHT_START_HOUR, SHORT_BREAK_MINUTES, SHORT_BREAK_THRESHOLD_MINUTES, ShiftDecomposition,
    break_minutes, decompose, decompose_record, decompose_shift, is_night_hour, night_minutes,
};
pub use time_parser::{normalize_time, parse_time};
