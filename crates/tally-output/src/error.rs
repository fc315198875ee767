//! Error types for report output.

use std::io;
use std::path::PathBuf;

use rust_xlsxwriter::XlsxError;
use thiserror::Error;

/// Errors that can occur while writing report files.
#[derive(Debug, Error)]
pub enum OutputError {
    /// Nothing to write.
    #[error("no sheet reports to write")]
    NoReports,

    /// Workbook construction failed (invalid sheet name, merge, ...).
    #[error("xlsx error: {0}")]
    Xlsx(#[from] XlsxError),

    /// CSV serialization failed.
    #[error("failed to write CSV for sheet '{sheet}': {source}")]
    Csv {
        sheet: String,
        #[source]
        source: csv::Error,
    },

    /// A file-system operation failed.
    #[error("failed to {operation} {path}: {source}")]
    Io {
        operation: &'static str,
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// Moving the finished temp file into place failed.
    #[error("failed to move {temp_path} to {target_path}: {source}")]
    AtomicWriteFailed {
        temp_path: PathBuf,
        target_path: PathBuf,
        #[source]
        source: io::Error,
    },
}

/// Result type for output operations.
pub type Result<T> = std::result::Result<T, OutputError>;
