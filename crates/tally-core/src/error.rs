//! Error types for report generation.

use thiserror::Error;

use tally_map::MapError;
use tally_model::ModelError;

/// Errors that stop a report run.
///
/// Blank station cells, unmapped stations, empty divisions and case-variant
/// duplicates are data conditions with defined outcomes, not errors.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum CoreError {
    /// No station column in a sheet.
    #[error("sheet '{sheet}' has no '{column}' column")]
    MissingColumn { sheet: String, column: String },

    /// Nothing to process.
    #[error("no input sheets to process")]
    EmptyInput,

    #[error(transparent)]
    Mapping(#[from] MapError),

    #[error(transparent)]
    Model(#[from] ModelError),
}

/// Result type for report generation.
pub type Result<T> = std::result::Result<T, CoreError>;
