//! @ai:module:intent Define error types for the report pipeline
//! @ai:module:layer domain
//! @ai:module:public_api Error, Result
//! @ai:module:stateless true

use std::path::PathBuf;
use thiserror::Error;

/// @ai:intent Unified error type for all report pipeline operations
#[derive(Error, Debug)]
pub enum Error {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to read report request {}: {source}", path.display())]
    RequestRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid report request {}: {source}", path.display())]
    RequestParse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("Access denied: {0}")]
    AccessDenied(String),

    #[error("Invalid color '{0}': expected #RRGGBB")]
    InvalidColor(String),

    #[error("Export failed ({format}): {message}")]
    Export { format: &'static str, message: String },

    #[error("JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),
}

impl Error {
    /// @ai:intent Whether regenerating the report may succeed
    /// @ai:effects pure
    pub fn is_recoverable(&self) -> bool {
        matches!(self, Error::Export { .. } | Error::Io(_))
    }
}

pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_export_errors_are_recoverable() {
        let err = Error::Export {
            format: "svg",
            message: "backend closed".to_string(),
        };
        assert!(err.is_recoverable());
        assert_eq!(err.to_string(), "Export failed (svg): backend closed");
    }

    #[test]
    fn test_access_denied_is_not_recoverable() {
        assert!(!Error::AccessDenied("no assignment".to_string()).is_recoverable());
    }
}
