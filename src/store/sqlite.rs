//! SQLite-backed record store.
//!
//! Dates are stored as `YYYY-MM-DD` text, so range queries rely on the text
//! ordering of four-digit years.

use std::path::Path;

use chrono::NaiveDate;
use rusqlite::types::Type;
use rusqlite::{Connection, OptionalExtension, Row, ToSql, named_params};
use tracing::{debug, info};

use crate::error::{EngineError, EngineResult};
use crate::models::{DayType, PayrollMonth, WorkShiftRecord};

use super::RecordStore;

// Sorts lexicographically only for four-digit years, see `SUPPORTED_YEARS`.
const DATE_FORMAT: &str = "%Y-%m-%d";

const CREATE_TABLE: &str = r#"
    CREATE TABLE IF NOT EXISTS work_records (
        date           TEXT PRIMARY KEY,
        start_time     TEXT NOT NULL,
        end_time       TEXT NOT NULL,
        day_type       TEXT NOT NULL DEFAULT 'ordinary',
        spans_midnight INTEGER NOT NULL DEFAULT 0
    )
"#;

const SELECT_COLUMNS: &str =
    "SELECT date, start_time, end_time, day_type, spans_midnight FROM work_records";

fn conversion_failure(column: usize, error: EngineError) -> rusqlite::Error {
    rusqlite::Error::FromSqlConversionFailure(column, Type::Text, Box::new(error))
}

struct RecordRow(WorkShiftRecord);

impl TryFrom<&Row<'_>> for RecordRow {
    type Error = rusqlite::Error;

    fn try_from(row: &Row<'_>) -> Result<Self, Self::Error> {
        let date_str: String = row.get("date")?;
        let date = NaiveDate::parse_from_str(&date_str, DATE_FORMAT).map_err(|_| {
            conversion_failure(0, EngineError::InvalidDate { value: date_str.clone() })
        })?;

        let day_type_str: String = row.get("day_type")?;
        let day_type = day_type_str
            .parse::<DayType>()
            .map_err(|err| conversion_failure(3, err))?;

        Ok(RecordRow(WorkShiftRecord {
            date,
            start_time: row.get("start_time")?,
            end_time: row.get("end_time")?,
            day_type,
            spans_midnight: row.get::<_, i64>("spans_midnight")? != 0,
        }))
    }
}

/// A [`RecordStore`] backed by a SQLite database with one row per date.
#[derive(Debug)]
pub struct SqliteRecordStore {
    conn: Connection,
}

impl SqliteRecordStore {
    /// Opens (or creates) the database at `path` and ensures the schema exists.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::Storage`] if the file cannot be opened or the
    /// schema cannot be created.
    pub fn open<P: AsRef<Path>>(path: P) -> EngineResult<Self> {
        let path = path.as_ref();
        let conn = Connection::open(path)?;
        info!(path = %path.display(), "Opened record database");
        Self::with_connection(conn)
    }

    /// Opens a private in-memory database.
    pub fn open_in_memory() -> EngineResult<Self> {
        Self::with_connection(Connection::open_in_memory()?)
    }

    fn with_connection(conn: Connection) -> EngineResult<Self> {
        conn.execute_batch(CREATE_TABLE)?;
        Ok(Self { conn })
    }

    fn query(
        &self,
        sql: &str,
        params: &[(&str, &dyn ToSql)],
    ) -> EngineResult<Vec<WorkShiftRecord>> {
        let mut stmt = self.conn.prepare(sql)?;
        let rows = stmt
            .query_map(params, |row| RecordRow::try_from(row).map(|r| r.0))?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(rows)
    }
}

impl RecordStore for SqliteRecordStore {
    fn upsert(&mut self, record: WorkShiftRecord) -> EngineResult<()> {
        self.conn.execute(
            r#"
                INSERT INTO work_records (date, start_time, end_time, day_type, spans_midnight)
                VALUES (:date, :start_time, :end_time, :day_type, :spans_midnight)
                ON CONFLICT(date) DO UPDATE SET
                    start_time = excluded.start_time,
                    end_time = excluded.end_time,
                    day_type = excluded.day_type,
                    spans_midnight = excluded.spans_midnight
            "#,
            named_params! {
                ":date": record.date.format(DATE_FORMAT).to_string(),
                ":start_time": record.start_time,
                ":end_time": record.end_time,
                ":day_type": record.day_type.as_str(),
                ":spans_midnight": i64::from(record.spans_midnight),
            },
        )?;

        debug!(date = %record.date, "Saved work record");
        Ok(())
    }

    fn delete(&mut self, date: NaiveDate) -> EngineResult<bool> {
        let removed = self.conn.execute(
            "DELETE FROM work_records WHERE date = ?1",
            [date.format(DATE_FORMAT).to_string()],
        )?;

        debug!(date = %date, removed, "Deleted work record");
        Ok(removed > 0)
    }

    fn get(&self, date: NaiveDate) -> EngineResult<Option<WorkShiftRecord>> {
        let mut stmt = self
            .conn
            .prepare(&format!("{} WHERE date = ?1", SELECT_COLUMNS))?;

        let record = stmt
            .query_row([date.format(DATE_FORMAT).to_string()], |row| {
                RecordRow::try_from(row).map(|r| r.0)
            })
            .optional()?;

        Ok(record)
    }

    fn load_all(&self) -> EngineResult<Vec<WorkShiftRecord>> {
        self.query(&format!("{} ORDER BY date ASC", SELECT_COLUMNS), &[])
    }

    fn load_month(&self, period: &PayrollMonth) -> EngineResult<Vec<WorkShiftRecord>> {
        let first = period.first_day().format(DATE_FORMAT).to_string();
        let last = period.last_day().format(DATE_FORMAT).to_string();

        self.query(
            &format!(
                "{} WHERE date BETWEEN :first AND :last ORDER BY date ASC",
                SELECT_COLUMNS
            ),
            named_params! {":first": first, ":last": last},
        )
    }
}
