//! Persistence of daily work records.
//!
//! Records are keyed by date: saving a record for a date that already has
//! one replaces it.

mod memory;
mod sqlite;

pub use memory::InMemoryRecordStore;
pub use sqlite::SqliteRecordStore;

use chrono::NaiveDate;

use crate::error::EngineResult;
use crate::models::{PayrollMonth, WorkShiftRecord};

/// A date-keyed store of work records.
pub trait RecordStore {
    /// Inserts the record, replacing any existing record for its date.
    fn upsert(&mut self, record: WorkShiftRecord) -> EngineResult<()>;

    /// Removes the record for `date`. Returns `false` if none existed.
    fn delete(&mut self, date: NaiveDate) -> EngineResult<bool>;

    /// Returns the record for `date`, if any.
    fn get(&self, date: NaiveDate) -> EngineResult<Option<WorkShiftRecord>>;

    /// Returns every record ordered by date.
    fn load_all(&self) -> EngineResult<Vec<WorkShiftRecord>>;

    /// Returns the records of one month ordered by date.
    fn load_month(&self, period: &PayrollMonth) -> EngineResult<Vec<WorkShiftRecord>> {
        Ok(self
            .load_all()?
            .into_iter()
            .filter(|record| period.contains(record.date))
            .collect())
    }
}
