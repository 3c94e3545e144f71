//! Monthly payroll aggregation.
//!
//! This module sums the worked seconds of every record in a month, compares
//! the total against the statutory obligation, and derives gross and net pay.
//! Seconds are converted to hours once, when pay is computed, so a month of
//! short shifts adds up to whole hours exactly.
//! Records whose times cannot be parsed are skipped with a warning rather
//! than failing the whole run.

use chrono::Utc;
use rust_decimal::Decimal;
use tracing::{info, warn};
use uuid::Uuid;

use crate::calendar::HolidayCalendar;
use crate::config::PayrollConfiguration;
use crate::error::EngineResult;
use crate::models::{
    BucketSeconds, MonthlyPayrollReport, MonthlyPayrollResult, PayrollMonth, RecordBreakdown,
    RecordWarning, WARNING_INVALID_TIME, WARNING_NEGATIVE_DURATION, WorkShiftRecord,
    seconds_to_hours,
};

use super::obligation::obligated_hours_for;
use super::shift_decomposer::decompose_record;

/// Multiplier applied to overtime hours (150%).
pub const OVERTIME_MULTIPLIER: Decimal = Decimal::from_parts(15, 0, 0, false, 1);

/// Premium applied to night hours on top of their base pay (50%).
pub const NIGHT_PREMIUM_MULTIPLIER: Decimal = Decimal::from_parts(5, 0, 0, false, 1);

/// Multiplier applied to holiday hours (150%).
pub const HOLIDAY_MULTIPLIER: Decimal = Decimal::from_parts(15, 0, 0, false, 1);

const SECONDS_PER_HOUR: i64 = 3600;

/// Pay for `seconds` at `rate` per hour, dividing by 3600 last.
fn seconds_pay(seconds: i64, rate: Decimal) -> Decimal {
    Decimal::from(seconds) * rate / Decimal::from(SECONDS_PER_HOUR)
}

/// Derives the pay figures from bucketed seconds and the obligation.
///
/// Overtime is measured against the sum of all three buckets, so night and
/// holiday hours count toward the obligation too.
///
/// # Example
///
/// ```
/// use kr_payroll::calculation::compute_pay;
/// use kr_payroll::config::PayrollConfiguration;
/// use kr_payroll::models::BucketSeconds;
/// use rust_decimal::Decimal;
///
/// let config = PayrollConfiguration {
///     base_salary: Decimal::from(2_000_000),
///     hourly_wage: Decimal::from(10_000),
///     fixed_deduction: Decimal::from(100_000),
/// };
/// let totals = BucketSeconds::new(170 * 3600, 0, 0);
///
/// let result = compute_pay(&totals, 160, &config);
/// assert_eq!(result.overtime_hours, Decimal::from(10));
/// assert_eq!(result.overtime_pay, Decimal::from(150_000));
/// assert_eq!(result.net_pay, Decimal::from(2_050_000));
/// ```
pub fn compute_pay(
    totals: &BucketSeconds,
    obligated_hours: u32,
    config: &PayrollConfiguration,
) -> MonthlyPayrollResult {
    let total_seconds = totals.total();
    let overtime_seconds =
        (total_seconds - i64::from(obligated_hours) * SECONDS_PER_HOUR).max(0);

    let overtime_pay = seconds_pay(overtime_seconds, config.hourly_wage * OVERTIME_MULTIPLIER);
    let night_pay = seconds_pay(totals.night, config.hourly_wage * NIGHT_PREMIUM_MULTIPLIER);
    let holiday_pay = seconds_pay(totals.holiday, config.hourly_wage * HOLIDAY_MULTIPLIER);

    let gross_pay = config.base_salary + overtime_pay + night_pay + holiday_pay;
    let net_pay = gross_pay - config.fixed_deduction;

    MonthlyPayrollResult {
        obligated_hours,
        total_effective_hours: seconds_to_hours(total_seconds),
        overtime_hours: seconds_to_hours(overtime_seconds),
        overtime_pay,
        night_pay,
        holiday_pay,
        gross_pay,
        net_pay,
    }
}

/// Aggregates the records of `period` into a payroll report.
///
/// Records outside `period` are ignored. A record with unparseable times is
/// skipped and reported with an [`WARNING_INVALID_TIME`] warning; a record
/// ending before it starts without the overnight flag contributes zero hours
/// and is reported with [`WARNING_NEGATIVE_DURATION`].
///
/// # Errors
///
/// Returns [`EngineError::InvalidConfiguration`](crate::error::EngineError::InvalidConfiguration)
/// when a wage parameter is negative.
pub fn aggregate<C: HolidayCalendar + ?Sized>(
    period: PayrollMonth,
    records: &[WorkShiftRecord],
    config: &PayrollConfiguration,
    calendar: &C,
) -> EngineResult<MonthlyPayrollReport> {
    config.validate()?;

    let mut totals = BucketSeconds::zero();
    let mut entries = Vec::new();
    let mut warnings = Vec::new();

    for record in records.iter().filter(|r| period.contains(r.date)) {
        let decomposition = match decompose_record(record) {
            Ok(decomposition) => decomposition,
            Err(err) if err.is_parse_failure() => {
                warn!(
                    date = %record.date,
                    start_time = %record.start_time,
                    end_time = %record.end_time,
                    error = %err,
                    "Skipping record with unparseable times"
                );
                warnings.push(RecordWarning {
                    date: record.date,
                    code: WARNING_INVALID_TIME.to_string(),
                    message: err.to_string(),
                });
                continue;
            }
            Err(err) => return Err(err),
        };

        if decomposition.elapsed_minutes < 0 {
            warnings.push(RecordWarning {
                date: record.date,
                code: WARNING_NEGATIVE_DURATION.to_string(),
                message: format!(
                    "Shift ends at {} before it starts at {} but is not marked overnight",
                    record.end_time, record.start_time
                ),
            });
        }

        totals += decomposition.seconds;
        entries.push(RecordBreakdown {
            date: record.date,
            day_type: record.day_type,
            spans_midnight: record.spans_midnight,
            elapsed_minutes: decomposition.elapsed_minutes,
            break_minutes: decomposition.break_minutes,
            buckets: decomposition.buckets,
        });
    }

    let obligated = obligated_hours_for(&period, calendar);
    let result = compute_pay(&totals, obligated, config);

    info!(
        period = %period,
        records = entries.len(),
        skipped = warnings.iter().filter(|w| w.code == WARNING_INVALID_TIME).count(),
        total_effective_hours = %result.total_effective_hours,
        obligated_hours = obligated,
        gross_pay = %result.gross_pay,
        "Monthly payroll aggregated"
    );

    Ok(MonthlyPayrollReport {
        calculation_id: Uuid::new_v4(),
        timestamp: Utc::now(),
        period,
        configuration: *config,
        totals: totals.to_hours(),
        result,
        entries,
        warnings,
    })
}

/// Validates `year`/`month` and aggregates the records of that month.
///
/// # Errors
///
/// Returns [`EngineError::InvalidPeriod`](crate::error::EngineError::InvalidPeriod)
/// for an out-of-range month, or any error of [`aggregate`].
pub fn aggregate_month<C: HolidayCalendar + ?Sized>(
    year: i32,
    month: u32,
    records: &[WorkShiftRecord],
    config: &PayrollConfiguration,
    calendar: &C,
) -> EngineResult<MonthlyPayrollReport> {
    let period = PayrollMonth::new(year, month)?;
    aggregate(period, records, config, calendar)
}
