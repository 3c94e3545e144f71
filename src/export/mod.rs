//! CSV export and import of work records.

mod csv;

pub use self::csv::{UTF8_BOM, export_records, export_to_bytes, import_records};
