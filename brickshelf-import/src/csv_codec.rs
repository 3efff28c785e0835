//! Fixed-schema CSV serialization for catalog records.
//!
//! The column layout is positional and shared by export and import. Import
//! is lenient about cell contents (unparseable numbers and dates degrade to
//! defaults) but strict about structure: a bad header or a row with the wrong
//! number of cells aborts the whole parse.

use std::io::{Read, Write};

use brickshelf_catalog::types::{CatalogRecord, NewRecord};
use chrono::NaiveDate;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum CsvError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
    #[error("Invalid CSV format: expected {expected} columns, found {found}")]
    InvalidHeader { expected: usize, found: usize },
    #[error("Error reading CSV line {line}: {message}")]
    MalformedRow { line: u64, message: String },
}

/// Column titles, in order.
pub const CSV_HEADER: [&str; 14] = [
    "Set Number",
    "Alternate Set Number",
    "Title",
    "Owned",
    "Quantity Owned",
    "Release Year",
    "Description",
    "Series",
    "Number of Parts",
    "Number of Minifigs",
    "Bricklink URL",
    "Approximate Value",
    "Value Last Updated",
    "Notes",
];

const DATE_FORMAT: &str = "%Y-%m-%d";

// ── Export ──────────────────────────────────────────────────────────────────

/// Write the header followed by one row per record.
///
/// Values are written with two decimals and dates at day granularity.
pub fn export_csv<W: Write>(records: &[CatalogRecord], writer: W) -> Result<(), CsvError> {
    let mut out = csv::Writer::from_writer(writer);
    out.write_record(CSV_HEADER)?;

    for record in records {
        out.write_record([
            record.set_number.clone(),
            opt_string(&record.alternate_set_number),
            record.title.clone(),
            record.owned.to_string(),
            record.quantity_owned.to_string(),
            record.release_year.map(|y| y.to_string()).unwrap_or_default(),
            opt_string(&record.description),
            opt_string(&record.series),
            record.num_parts.to_string(),
            record.num_minifigs.to_string(),
            opt_string(&record.bricklink_url),
            record
                .approximate_value
                .map(|v| format!("{v:.2}"))
                .unwrap_or_default(),
            record
                .value_last_updated
                .map(|d| d.format(DATE_FORMAT).to_string())
                .unwrap_or_default(),
            opt_string(&record.notes),
        ])?;
    }

    out.flush()?;
    Ok(())
}

fn opt_string(value: &Option<String>) -> String {
    value.clone().unwrap_or_default()
}

// ── Import ──────────────────────────────────────────────────────────────────

/// Parse CSV text into creation requests.
///
/// The header is only checked for its column count. Rows whose first cell is
/// empty are skipped. Required-field validation is left to the caller so a
/// single bad row does not abort the batch.
pub fn parse_csv<R: Read>(reader: R) -> Result<Vec<NewRecord>, CsvError> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_reader(reader);
    let mut rows = csv_reader.records();

    let header = match rows.next() {
        Some(Ok(header)) => header,
        Some(Err(e)) => return Err(row_error(e, 1)),
        None => {
            return Err(CsvError::InvalidHeader {
                expected: CSV_HEADER.len(),
                found: 0,
            });
        }
    };
    if header.len() != CSV_HEADER.len() {
        return Err(CsvError::InvalidHeader {
            expected: CSV_HEADER.len(),
            found: header.len(),
        });
    }

    let mut records = Vec::new();
    let mut line = 1;

    for result in rows {
        line += 1;
        let row = result.map_err(|e| row_error(e, line))?;
        if let Some(pos) = row.position() {
            line = pos.line();
        }

        if row.len() != CSV_HEADER.len() {
            return Err(CsvError::MalformedRow {
                line,
                message: format!("expected {} fields, found {}", CSV_HEADER.len(), row.len()),
            });
        }

        let cell = |i: usize| row.get(i).unwrap_or_default();
        if cell(0).is_empty() {
            continue;
        }

        records.push(NewRecord {
            set_number: cell(0).to_string(),
            alternate_set_number: non_empty(cell(1)),
            title: cell(2).to_string(),
            owned: parse_owned(cell(3)),
            quantity_owned: parse_count(cell(4)),
            release_year: parse_optional_int(cell(5)),
            description: non_empty(cell(6)),
            series: non_empty(cell(7)),
            num_parts: parse_count(cell(8)),
            num_minifigs: parse_count(cell(9)),
            bricklink_url: non_empty(cell(10)),
            rebrickable_url: None,
            approximate_value: parse_optional_float(cell(11)),
            value_last_updated: parse_optional_date(cell(12)),
            condition_description: None,
            image_filename: None,
            notes: non_empty(cell(13)),
        });
    }

    Ok(records)
}

/// Decode failures carry their own position when the reader knows it.
fn row_error(err: csv::Error, fallback_line: u64) -> CsvError {
    if err.is_io_error() {
        return CsvError::Csv(err);
    }
    let line = err.position().map(|p| p.line()).unwrap_or(fallback_line);
    CsvError::MalformedRow {
        line,
        message: err.to_string(),
    }
}

// ── Cell Coercion ───────────────────────────────────────────────────────────

fn non_empty(cell: &str) -> Option<String> {
    if cell.is_empty() {
        None
    } else {
        Some(cell.to_string())
    }
}

fn parse_owned(cell: &str) -> bool {
    matches!(cell, "true" | "True" | "TRUE" | "1")
}

/// Required counts degrade to 0.
fn parse_count(cell: &str) -> i32 {
    cell.trim().parse().unwrap_or(0)
}

fn parse_optional_int(cell: &str) -> Option<i32> {
    cell.trim().parse().ok()
}

fn parse_optional_float(cell: &str) -> Option<f64> {
    cell.trim().parse::<f64>().ok().filter(|v| v.is_finite())
}

fn parse_optional_date(cell: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(cell.trim(), DATE_FORMAT).ok()
}

#[cfg(test)]
#[path = "tests/csv_codec_tests.rs"]
mod tests;
