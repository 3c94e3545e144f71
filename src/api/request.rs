//! Request types for the payroll API.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::config::PayrollConfiguration;
use crate::error::{EngineError, EngineResult};
use crate::models::{DayType, ShiftKind, WorkShiftRecord};

/// Request body for `POST /deductions`.
///
/// Omitted fields take the values of [`DeductionRequest::default`].
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DeductionRequest {
    /// Gross monthly salary.
    pub salary: Decimal,
    /// Non-taxable portion of the salary.
    pub non_taxable_amount: Decimal,
    /// Number of dependents, the employee included.
    pub dependent_count: u32,
}

impl Default for DeductionRequest {
    fn default() -> Self {
        Self {
            salary: Decimal::from(3_000_000),
            non_taxable_amount: Decimal::from(200_000),
            dependent_count: 1,
        }
    }
}

impl DeductionRequest {
    /// Rejects negative amounts and a dependent count below one.
    pub fn validate(&self) -> EngineResult<()> {
        for (field, value) in [
            ("salary", self.salary),
            ("non_taxable_amount", self.non_taxable_amount),
        ] {
            if value < Decimal::ZERO {
                return Err(EngineError::InvalidConfiguration {
                    field: field.to_string(),
                    message: format!("must not be negative (got {})", value),
                });
            }
        }
        if self.dependent_count < 1 {
            return Err(EngineError::InvalidConfiguration {
                field: "dependent_count".to_string(),
                message: "must be at least 1".to_string(),
            });
        }
        Ok(())
    }
}

/// Request body for `PUT /records/{date}`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecordRequest {
    /// Clock-in time, `HH:MM` or `HHMM`.
    pub start_time: String,
    /// Clock-out time, `HH:MM` or `HHMM`.
    pub end_time: String,
    /// Ordinary or holiday/special day.
    #[serde(default)]
    pub day_type: DayType,
    /// Whether the shift ends on the next calendar day.
    #[serde(default)]
    pub spans_midnight: bool,
}

impl RecordRequest {
    /// Builds the record to store for `date`.
    pub fn into_record(self, date: NaiveDate) -> WorkShiftRecord {
        WorkShiftRecord::new(
            date,
            &self.start_time,
            &self.end_time,
            ShiftKind::new(self.day_type, self.spans_midnight),
        )
    }
}

/// Query string of `GET /records`.
///
/// Both fields must be given to narrow the listing to one month.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RecordsQuery {
    /// Calendar year.
    pub year: Option<i32>,
    /// Calendar month, 1-12.
    pub month: Option<u32>,
}

/// Request body for `POST /payroll`.
///
/// Wage fields left out fall back to the configured defaults.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PayrollRequest {
    /// Calendar year of the payroll month.
    pub year: i32,
    /// Calendar month, 1-12.
    pub month: u32,
    /// Overrides the configured base salary.
    #[serde(default)]
    pub base_salary: Option<Decimal>,
    /// Overrides the configured hourly wage.
    #[serde(default)]
    pub hourly_wage: Option<Decimal>,
    /// Overrides the configured fixed deduction.
    #[serde(default)]
    pub fixed_deduction: Option<Decimal>,
}

impl PayrollRequest {
    /// Merges the overrides of this request onto `defaults`.
    pub fn configuration(&self, defaults: &PayrollConfiguration) -> PayrollConfiguration {
        PayrollConfiguration {
            base_salary: self.base_salary.unwrap_or(defaults.base_salary),
            hourly_wage: self.hourly_wage.unwrap_or(defaults.hourly_wage),
            fixed_deduction: self.fixed_deduction.unwrap_or(defaults.fixed_deduction),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deduction_request_defaults_missing_fields() {
        let request: DeductionRequest = serde_json::from_str(r#"{"dependent_count": 3}"#).unwrap();

        assert_eq!(request.salary, Decimal::from(3_000_000));
        assert_eq!(request.non_taxable_amount, Decimal::from(200_000));
        assert_eq!(request.dependent_count, 3);
    }

    #[test]
    fn test_deduction_request_rejects_zero_dependents() {
        let request = DeductionRequest {
            dependent_count: 0,
            ..DeductionRequest::default()
        };

        match request.validate() {
            Err(EngineError::InvalidConfiguration { field, .. }) => {
                assert_eq!(field, "dependent_count");
            }
            other => panic!("Expected InvalidConfiguration, got {:?}", other),
        }
    }

    #[test]
    fn test_record_request_normalizes_times() {
        let request: RecordRequest = serde_json::from_str(
            r#"{"start_time": "2200", "end_time": "0600", "spans_midnight": true}"#,
        )
        .unwrap();
        let date = NaiveDate::from_ymd_opt(2025, 1, 3).unwrap();

        let record = request.into_record(date);
        assert_eq!(record.start_time, "22:00");
        assert_eq!(record.end_time, "06:00");
        assert_eq!(record.kind(), ShiftKind::ordinary().overnight());
    }

    #[test]
    fn test_payroll_request_overrides_only_given_fields() {
        let request: PayrollRequest =
            serde_json::from_str(r#"{"year": 2025, "month": 1, "hourly_wage": "12000"}"#).unwrap();
        let defaults = PayrollConfiguration {
            base_salary: Decimal::from(2_096_270),
            hourly_wage: Decimal::from(10_030),
            fixed_deduction: Decimal::from(50_000),
        };

        let config = request.configuration(&defaults);
        assert_eq!(config.base_salary, Decimal::from(2_096_270));
        assert_eq!(config.hourly_wage, Decimal::from(12_000));
        assert_eq!(config.fixed_deduction, Decimal::from(50_000));
    }
}
