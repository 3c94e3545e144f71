//! Single-paycheck deduction estimate.
//!
//! Applies flat social-insurance and income-tax rates to the taxable part of
//! a monthly salary. The rates are an illustrative approximation and do not
//! follow the progressive withholding tables.

use rust_decimal::Decimal;
use tracing::debug;

use crate::models::DeductionResult;

/// 국민연금 rate on taxable income (4.5%).
pub const NATIONAL_PENSION_RATE: Decimal = Decimal::from_parts(45, 0, 0, false, 3);

/// 건강보험 rate on taxable income (3.545%).
pub const HEALTH_INSURANCE_RATE: Decimal = Decimal::from_parts(3545, 0, 0, false, 5);

/// 장기요양 rate on the health insurance amount (12.95%).
pub const LONG_TERM_CARE_RATE: Decimal = Decimal::from_parts(1295, 0, 0, false, 4);

/// 고용보험 rate on taxable income (0.9%).
pub const EMPLOYMENT_INSURANCE_RATE: Decimal = Decimal::from_parts(9, 0, 0, false, 3);

/// Income tax rate for fewer than three dependents (3%).
pub const INCOME_TAX_RATE: Decimal = Decimal::from_parts(3, 0, 0, false, 2);

/// Income tax rate for three or more dependents (2%).
pub const REDUCED_INCOME_TAX_RATE: Decimal = Decimal::from_parts(2, 0, 0, false, 2);

/// Dependent count at which the reduced income tax rate applies.
pub const REDUCED_RATE_DEPENDENTS: u32 = 3;

/// 지방소득세 rate on the income tax amount (10%).
pub const LOCAL_INCOME_TAX_RATE: Decimal = Decimal::from_parts(1, 0, 0, false, 1);

/// Returns the income tax rate for a dependent count.
pub fn income_tax_rate(dependent_count: u32) -> Decimal {
    if dependent_count >= REDUCED_RATE_DEPENDENTS {
        REDUCED_INCOME_TAX_RATE
    } else {
        INCOME_TAX_RATE
    }
}

/// Computes the deduction breakdown for one paycheck.
///
/// Each item is truncated to whole won on its own; the total is the sum of
/// the truncated items. Long-term care is levied on the truncated health
/// insurance amount and local tax on the truncated income tax.
///
/// # Example
///
/// ```
/// use kr_payroll::calculation::compute_deductions;
/// use rust_decimal::Decimal;
///
/// let result = compute_deductions(Decimal::from(3_000_000), Decimal::from(200_000), 1);
/// assert_eq!(result.taxable_income, Decimal::from(2_800_000));
/// assert_eq!(result.national_pension, Decimal::from(126_000));
/// assert_eq!(result.net_pay, Decimal::from(2_644_286));
/// ```
pub fn compute_deductions(
    salary: Decimal,
    non_taxable_amount: Decimal,
    dependent_count: u32,
) -> DeductionResult {
    let taxable_income = salary - non_taxable_amount;

    let national_pension = (taxable_income * NATIONAL_PENSION_RATE).trunc();
    let health_insurance = (taxable_income * HEALTH_INSURANCE_RATE).trunc();
    let long_term_care = (health_insurance * LONG_TERM_CARE_RATE).trunc();
    let employment_insurance = (taxable_income * EMPLOYMENT_INSURANCE_RATE).trunc();
    let income_tax = (taxable_income * income_tax_rate(dependent_count)).trunc();
    let local_income_tax = (income_tax * LOCAL_INCOME_TAX_RATE).trunc();

    let total_deduction = national_pension
        + health_insurance
        + long_term_care
        + employment_insurance
        + income_tax
        + local_income_tax;

    debug!(
        salary = %salary,
        taxable_income = %taxable_income,
        dependent_count,
        total_deduction = %total_deduction,
        "Computed salary deductions"
    );

    DeductionResult {
        salary,
        non_taxable_amount,
        taxable_income,
        national_pension,
        health_insurance,
        long_term_care,
        employment_insurance,
        income_tax,
        local_income_tax,
        total_deduction,
        net_pay: salary - total_deduction,
    }
}
