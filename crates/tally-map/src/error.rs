//! Error types for mapping operations.

use std::path::PathBuf;

use thiserror::Error;

/// Errors from parsing, storing or persisting a mapping table.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum MapError {
    /// Mapping text does not describe an object of division -> member arrays.
    #[error("invalid mapping format: {reason}")]
    InvalidMappingFormat { reason: String },

    /// File system failure in the mapping repository.
    #[error("failed to {operation} {path}: {source}")]
    Io {
        operation: &'static str,
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Atomic rename of a freshly written mapping file failed.
    #[error("failed to move {temp_path} into place at {target_path}: {source}")]
    AtomicWriteFailed {
        temp_path: PathBuf,
        target_path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A stored mapping file could not be encoded.
    #[error("failed to serialize mapping: {0}")]
    Serialize(#[source] serde_json::Error),
}

impl MapError {
    pub fn invalid(reason: impl Into<String>) -> Self {
        Self::InvalidMappingFormat {
            reason: reason.into(),
        }
    }

    pub fn is_invalid_format(&self) -> bool {
        matches!(self, Self::InvalidMappingFormat { .. })
    }
}

/// Result type for mapping operations.
pub type Result<T> = std::result::Result<T, MapError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = MapError::invalid("expected value at line 1 column 1");
        assert_eq!(
            err.to_string(),
            "invalid mapping format: expected value at line 1 column 1"
        );
        assert!(err.is_invalid_format());
    }
}
