//! In-memory record store, used by tests and benchmarks.

use std::collections::BTreeMap;

use chrono::NaiveDate;

use crate::error::EngineResult;
use crate::models::WorkShiftRecord;

use super::RecordStore;

/// A [`RecordStore`] held entirely in memory.
#[derive(Debug, Clone, Default)]
pub struct InMemoryRecordStore {
    records: BTreeMap<NaiveDate, WorkShiftRecord>,
}

impl InMemoryRecordStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored records.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Returns `true` if no records are stored.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

impl FromIterator<WorkShiftRecord> for InMemoryRecordStore {
    fn from_iter<I: IntoIterator<Item = WorkShiftRecord>>(iter: I) -> Self {
        Self {
            records: iter.into_iter().map(|r| (r.date, r)).collect(),
        }
    }
}

impl RecordStore for InMemoryRecordStore {
    fn upsert(&mut self, record: WorkShiftRecord) -> EngineResult<()> {
        self.records.insert(record.date, record);
        Ok(())
    }

    fn delete(&mut self, date: NaiveDate) -> EngineResult<bool> {
        Ok(self.records.remove(&date).is_some())
    }

    fn get(&self, date: NaiveDate) -> EngineResult<Option<WorkShiftRecord>> {
        Ok(self.records.get(&date).cloned())
    }

    fn load_all(&self) -> EngineResult<Vec<WorkShiftRecord>> {
        Ok(self.records.values().cloned().collect())
    }
}
