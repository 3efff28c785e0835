//! CSV import and export for the collection catalog.
//!
//! This crate owns the tabular interchange format: serializing records to the
//! fixed 14-column schema, parsing that schema back into creation requests,
//! and feeding those requests into the store one at a time.

pub mod csv_codec;
pub mod csv_import;
pub mod progress;

pub use csv_codec::{CSV_HEADER, CsvError, export_csv, parse_csv};
pub use csv_import::{ImportSummary, import_csv, import_records};
pub use progress::{ImportProgress, LogProgress, SilentProgress};
