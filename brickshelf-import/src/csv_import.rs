//! Bulk import of creation requests into the catalog database.
//!
//! Rows are handled one at a time with no enclosing transaction: a failure on
//! one row is recorded and the loop moves on, so earlier rows stay committed.

use std::io::Read;

use brickshelf_catalog::types::NewRecord;
use brickshelf_db::operations::{self, OperationError};
use rusqlite::Connection;

use crate::csv_codec::{CsvError, parse_csv};
use crate::progress::ImportProgress;

/// Outcome of a bulk import.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct ImportSummary {
    pub imported: u64,
    /// Rows whose set number was already present.
    pub skipped: u64,
    /// One message per row that could not be stored.
    pub errors: Vec<String>,
}

impl ImportSummary {
    pub fn total(&self) -> u64 {
        self.imported + self.skipped + self.errors.len() as u64
    }
}

/// Parse CSV text and import every row.
///
/// A structural CSV problem fails before anything is stored.
pub fn import_csv<R: Read>(
    conn: &Connection,
    reader: R,
    progress: Option<&dyn ImportProgress>,
) -> Result<ImportSummary, CsvError> {
    let requests = parse_csv(reader)?;
    Ok(import_records(conn, &requests, progress))
}

/// Insert each request in order, skipping set numbers already present.
pub fn import_records(
    conn: &Connection,
    requests: &[NewRecord],
    progress: Option<&dyn ImportProgress>,
) -> ImportSummary {
    let mut summary = ImportSummary::default();

    if let Some(p) = progress {
        p.on_phase(&format!("Importing {} records", requests.len()));
    }

    for (i, request) in requests.iter().enumerate() {
        import_one(conn, request, &mut summary);

        if let Some(p) = progress {
            p.on_record(i + 1, requests.len(), &request.set_number);
        }
    }

    if let Some(p) = progress {
        p.on_complete(&format!(
            "Import complete: {} imported, {} skipped, {} errors",
            summary.imported,
            summary.skipped,
            summary.errors.len()
        ));
    }

    summary
}

fn import_one(conn: &Connection, request: &NewRecord, summary: &mut ImportSummary) {
    if let Err(e) = request.validate() {
        summary
            .errors
            .push(format!("Invalid set {}: {}", request.set_number, e));
        return;
    }

    match operations::find_record_by_set_number(conn, &request.set_number) {
        Ok(Some(_)) => {
            summary.skipped += 1;
            return;
        }
        Ok(None) => {}
        Err(e) => {
            summary
                .errors
                .push(format!("Error checking set {}: {}", request.set_number, e));
            return;
        }
    }

    match operations::insert_record(conn, request) {
        Ok(_) => summary.imported += 1,
        // Lost a race with a concurrent writer after the existence check
        Err(OperationError::DuplicateSetNumber(set_number)) => {
            log::debug!("Set {} appeared during import, skipping", set_number);
            summary.skipped += 1;
        }
        Err(e) => {
            log::warn!("Failed to import set {}: {}", request.set_number, e);
            summary
                .errors
                .push(format!("Error importing set {}: {}", request.set_number, e));
        }
    }
}
