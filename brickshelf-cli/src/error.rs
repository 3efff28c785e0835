use brickshelf_lib::{CatalogError, SettingsError};
use thiserror::Error;

/// Errors that can occur during CLI command execution.
#[derive(Debug, Error)]
pub(crate) enum CliError {
    /// I/O error
    #[error("{0}")]
    Io(#[from] std::io::Error),

    /// Catalog operation failed
    #[error(transparent)]
    Catalog(#[from] CatalogError),

    /// Settings could not be loaded
    #[error("Settings error: {0}")]
    Settings(#[from] SettingsError),

    /// JSON output failed
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// No record matched the given id or set number
    #[error("No record matches '{0}'")]
    NotFound(String),

    /// Catch-all for other errors
    #[error("{0}")]
    Other(String),
}

impl CliError {
    pub(crate) fn not_found(key: impl Into<String>) -> Self {
        Self::NotFound(key.into())
    }

    pub(crate) fn other(msg: impl Into<String>) -> Self {
        Self::Other(msg.into())
    }
}
