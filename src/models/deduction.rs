//! Salary deduction result model.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// One labelled line of a deduction breakdown.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeductionLine {
    /// Display label of the deduction item.
    pub label: String,
    /// Amount withheld, in whole won.
    pub amount: Decimal,
}

/// The breakdown of a single paycheck's withholdings.
///
/// Every item is truncated to whole won independently before summing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeductionResult {
    /// Gross monthly salary.
    pub salary: Decimal,
    /// Non-taxable portion (meal allowance and similar).
    pub non_taxable_amount: Decimal,
    /// Salary less the non-taxable portion.
    pub taxable_income: Decimal,
    /// 국민연금.
    pub national_pension: Decimal,
    /// 건강보험.
    pub health_insurance: Decimal,
    /// 장기요양, levied on the health insurance amount.
    pub long_term_care: Decimal,
    /// 고용보험.
    pub employment_insurance: Decimal,
    /// 소득세.
    pub income_tax: Decimal,
    /// 지방소득세, levied on the income tax amount.
    pub local_income_tax: Decimal,
    /// Sum of the six items.
    pub total_deduction: Decimal,
    /// Salary less the total deduction.
    pub net_pay: Decimal,
}

impl DeductionResult {
    /// Returns the six deduction items in display order.
    pub fn details(&self) -> Vec<DeductionLine> {
        [
            ("국민연금", self.national_pension),
            ("건강보험", self.health_insurance),
            ("장기요양", self.long_term_care),
            ("고용보험", self.employment_insurance),
            ("소득세", self.income_tax),
            ("지방소득세", self.local_income_tax),
        ]
        .into_iter()
        .map(|(label, amount)| DeductionLine {
            label: label.to_string(),
            amount,
        })
        .collect()
    }

    /// Total deduction as a percentage of salary, rounded to one decimal.
    ///
    /// Zero when the salary is zero.
    pub fn deduction_rate(&self) -> Decimal {
        if self.salary.is_zero() {
            return Decimal::ZERO;
        }
        (self.total_deduction / self.salary * Decimal::ONE_HUNDRED).round_dp(1)
    }
}
