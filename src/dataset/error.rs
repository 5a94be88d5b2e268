//! Dataset error types
//!
//! Defines all errors that can occur while loading the input CSV files.

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while loading a dataset
#[derive(Error, Debug)]
pub enum DatasetError {
    /// Input file does not exist
    #[error("File not found: {}", path.display())]
    MissingFile { path: PathBuf },

    /// I/O operation failed
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Malformed CSV
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// Required column absent from the header row
    #[error("Missing column '{column}' in {}", path.display())]
    MissingColumn { path: PathBuf, column: String },

    /// Cell could not be parsed as the column's type
    #[error("Invalid value '{value}' for column '{column}' at line {line} of {}", path.display())]
    InvalidValue {
        path: PathBuf,
        line: usize,
        column: String,
        value: String,
    },
}

impl DatasetError {
    pub fn is_missing_file(&self) -> bool {
        matches!(self, DatasetError::MissingFile { .. })
    }
}

/// Result type alias for dataset operations
pub type DatasetResult<T> = Result<T, DatasetError>;

/// Fail fast with `MissingFile` before handing the path to the CSV reader
pub(crate) fn ensure_exists(path: &std::path::Path) -> DatasetResult<()> {
    if path.is_file() {
        Ok(())
    } else {
        Err(DatasetError::MissingFile {
            path: path.to_path_buf(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = DatasetError::MissingFile {
            path: PathBuf::from("state_wise_silver_purchased_kg.csv"),
        };
        assert_eq!(
            err.to_string(),
            "File not found: state_wise_silver_purchased_kg.csv"
        );
        assert!(err.is_missing_file());

        let err = DatasetError::MissingColumn {
            path: PathBuf::from("states.csv"),
            column: "State".to_string(),
        };
        assert_eq!(err.to_string(), "Missing column 'State' in states.csv");
    }

    #[test]
    fn test_io_error_conversion() {
        let io_err = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied");
        let err: DatasetError = io_err.into();
        assert!(matches!(err, DatasetError::Io(_)));
        assert!(!err.is_missing_file());
    }
}
