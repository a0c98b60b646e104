//! Error types for the symptom cache
//!
//! Every failure the orchestrator can surface is a distinct variant so that
//! callers can match on the kind instead of string-inspecting a generic error.

use crate::schema::ValidationReport;
use thiserror::Error;

/// Main error type for cache operations
#[derive(Error, Debug)]
pub enum CacheError {
    /// Generated artifact failed schema validation; carries the full
    /// path-qualified violation list. Nothing is cached, nothing is retried.
    #[error("schema validation failed:\n{0}")]
    Validation(ValidationReport),

    /// Generator output could not be parsed as structured data
    #[error("generator output is not valid JSON: {0}")]
    GenerationFormat(String),

    /// Generator call failed at the transport layer
    #[error("generator transport error: {0}")]
    Transport(String),

    /// Persistence layer failed on read or write. The duplicate-hash
    /// condition is not an error and never maps here.
    #[error("store unavailable: {0}")]
    StoreUnavailable(String),

    /// Configuration error
    #[error("configuration error: {0}")]
    Config(String),
}

/// Result type alias for cache operations
pub type Result<T> = std::result::Result<T, CacheError>;

impl From<rusqlite::Error> for CacheError {
    fn from(e: rusqlite::Error) -> Self {
        CacheError::StoreUnavailable(e.to_string())
    }
}

impl From<reqwest::Error> for CacheError {
    fn from(e: reqwest::Error) -> Self {
        CacheError::Transport(e.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let error = CacheError::GenerationFormat("expected value at line 1".to_string());
        assert!(error.to_string().contains("not valid JSON"));

        let error = CacheError::StoreUnavailable("disk I/O error".to_string());
        assert_eq!(error.to_string(), "store unavailable: disk I/O error");
    }

    #[test]
    fn test_validation_error_carries_all_messages() {
        let report = ValidationReport::from_errors(vec![
            "root.a is required".to_string(),
            "root.b is required".to_string(),
        ]);
        let error = CacheError::Validation(report);
        let text = error.to_string();
        assert!(text.contains("root.a is required"));
        assert!(text.contains("root.b is required"));
    }
}
