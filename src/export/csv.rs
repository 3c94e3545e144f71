//! BOM-prefixed CSV dump of work records, and the matching reader.

use std::io::{Read, Write};

use csv::{Reader, Writer};
use tracing::debug;

use crate::calculation::normalize_time;
use crate::error::{EngineError, EngineResult};
use crate::models::WorkShiftRecord;

/// UTF-8 byte order mark written ahead of the header so spreadsheet
/// applications pick the right encoding.
pub const UTF8_BOM: &[u8] = b"\xEF\xBB\xBF";

fn io_failure(error: std::io::Error) -> EngineError {
    EngineError::Export {
        message: error.to_string(),
    }
}

/// Writes `records` as BOM-prefixed CSV, one row per record.
///
/// Columns are `date,start_time,end_time,day_type,spans_midnight`. Rows are
/// written in the order given.
pub fn export_records<W: Write>(mut out: W, records: &[WorkShiftRecord]) -> EngineResult<()> {
    out.write_all(UTF8_BOM).map_err(io_failure)?;

    let mut wtr = Writer::from_writer(out);
    for record in records {
        wtr.serialize(record)?;
    }
    wtr.flush().map_err(io_failure)?;

    debug!(rows = records.len(), "Exported work records");
    Ok(())
}

/// Exports `records` into an in-memory buffer.
///
/// # Example
///
/// ```
/// use kr_payroll::export::export_to_bytes;
/// use kr_payroll::models::{ShiftKind, WorkShiftRecord};
/// use chrono::NaiveDate;
///
/// let record = WorkShiftRecord::new(
///     NaiveDate::from_ymd_opt(2025, 1, 2).unwrap(),
///     "09:00",
///     "18:00",
///     ShiftKind::ordinary(),
/// );
/// let bytes = export_to_bytes(&[record]).unwrap();
/// let text = String::from_utf8(bytes[3..].to_vec()).unwrap();
/// assert_eq!(
///     text,
///     "date,start_time,end_time,day_type,spans_midnight\n2025-01-02,09:00,18:00,ordinary,false\n"
/// );
/// ```
pub fn export_to_bytes(records: &[WorkShiftRecord]) -> EngineResult<Vec<u8>> {
    let mut buf = Vec::new();
    export_records(&mut buf, records)?;
    Ok(buf)
}

/// Reads records from CSV produced by [`export_records`].
///
/// A leading byte order mark is optional. Time fields are normalized the
/// same way as entered records.
///
/// # Errors
///
/// Returns [`EngineError::Export`] for unreadable input or rows that do not
/// match the column layout.
pub fn import_records<R: Read>(mut input: R) -> EngineResult<Vec<WorkShiftRecord>> {
    let mut bytes = Vec::new();
    input.read_to_end(&mut bytes).map_err(io_failure)?;
    let body = bytes.strip_prefix(UTF8_BOM).unwrap_or(&bytes[..]);

    let mut rdr = Reader::from_reader(body);
    let mut records = Vec::new();
    for row in rdr.deserialize() {
        let mut record: WorkShiftRecord = row?;
        record.start_time = normalize_time(&record.start_time);
        record.end_time = normalize_time(&record.end_time);
        records.push(record);
    }

    debug!(rows = records.len(), "Imported work records");
    Ok(records)
}
