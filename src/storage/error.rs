//! Journal storage error types

use thiserror::Error;

/// Errors that can occur in the journal store
#[derive(Error, Debug)]
pub enum StoreError {
    /// I/O operation failed
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Stored JSON could not be read or written
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// CSV input could not be read
    #[error("CSV error: {0}")]
    Csv(String),
}

impl From<serde_json::Error> for StoreError {
    fn from(err: serde_json::Error) -> Self {
        StoreError::Serialization(err.to_string())
    }
}

impl From<csv::Error> for StoreError {
    fn from(err: csv::Error) -> Self {
        StoreError::Csv(err.to_string())
    }
}

/// Result type alias for storage operations
pub type StoreResult<T> = Result<T, StoreError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = StoreError::Serialization("expected value at line 1".to_string());
        assert_eq!(err.to_string(), "Serialization error: expected value at line 1");
    }

    #[test]
    fn test_conversions() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        assert!(matches!(StoreError::from(io_err), StoreError::Io(_)));

        let json_err = serde_json::from_str::<Vec<u8>>("{").unwrap_err();
        assert!(matches!(StoreError::from(json_err), StoreError::Serialization(_)));
    }
}
