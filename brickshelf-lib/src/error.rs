use brickshelf_catalog::ValidationError;
use brickshelf_db::{OperationError, SchemaError};
use brickshelf_import::CsvError;
use thiserror::Error;

use crate::images::ImageError;

/// Errors surfaced by [`Collection`](crate::Collection) operations.
#[derive(Debug, Error)]
pub enum CatalogError {
    /// A required field was missing or a search term was empty
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// Another record already uses this set number
    #[error("Set number '{0}' already exists")]
    Conflict(String),

    /// No record with this identifier
    #[error("Record not found: {0}")]
    NotFound(String),

    /// The database failed; not retried
    #[error("Storage error: {0}")]
    Storage(#[from] rusqlite::Error),

    /// The database could not be opened or migrated
    #[error("Database schema error: {0}")]
    Schema(#[from] SchemaError),

    /// CSV input was structurally unreadable
    #[error("CSV format error: {0}")]
    Format(#[from] CsvError),

    #[error(transparent)]
    Image(#[from] ImageError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<OperationError> for CatalogError {
    fn from(err: OperationError) -> Self {
        match err {
            OperationError::Sqlite(e) => Self::Storage(e),
            OperationError::NotFound { id, .. } => Self::NotFound(id),
            OperationError::DuplicateSetNumber(set_number) => Self::Conflict(set_number),
        }
    }
}

impl CatalogError {
    pub fn not_found(id: impl Into<String>) -> Self {
        Self::NotFound(id.into())
    }
}
