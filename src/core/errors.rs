//! Shared error types for the scoring engine

use thiserror::Error;

/// Main error type for assemblyscore operations
#[derive(Debug, Error)]
pub enum Error {
    /// Malformed or out-of-range weight configuration. Raised before any writes.
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Upstream fact records that violate the identifier relationships
    #[error("Ingestion error: {0}")]
    Ingestion(String),

    /// Storage failures. `failed_rows` counts the upserts that did not commit.
    #[error("Persistence error: {message} ({failed_rows} row(s) failed)")]
    Persistence { message: String, failed_rows: usize },

    /// A requested lawmaker or party has no stored record
    #[error("Not found: {0}")]
    NotFound(String),

    /// Invalid query or command input
    #[error("Validation error: {0}")]
    Validation(String),

    /// Generic errors with context
    #[error("{context}: {message}")]
    WithContext { context: String, message: String },

    /// IO errors
    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// JSON errors
    #[error(transparent)]
    Json(#[from] serde_json::Error),

    /// TOML errors
    #[error(transparent)]
    Toml(#[from] toml::de::Error),
}

impl Error {
    /// Create a configuration error
    pub fn configuration(message: impl Into<String>) -> Self {
        Self::Configuration(message.into())
    }

    /// Create an ingestion error
    pub fn ingestion(message: impl Into<String>) -> Self {
        Self::Ingestion(message.into())
    }

    /// Create a persistence error for a single failed row
    pub fn persistence(message: impl Into<String>) -> Self {
        Self::Persistence {
            message: message.into(),
            failed_rows: 1,
        }
    }

    /// Add context to an error
    pub fn with_context(self, context: impl Into<String>) -> Self {
        Self::WithContext {
            context: context.into(),
            message: self.to_string(),
        }
    }

    /// Whether rerunning the same operation may succeed.
    ///
    /// Recomputation is a full overwrite, so storage failures are always safe to retry.
    pub fn is_retryable(&self) -> bool {
        matches!(self, Self::Persistence { .. } | Self::Io(_))
    }

    /// Whether the caller can fix the problem by changing their input.
    pub fn is_user_fixable(&self) -> bool {
        matches!(
            self,
            Self::Configuration(_)
                | Self::Ingestion(_)
                | Self::Validation(_)
                | Self::NotFound(_)
                | Self::Json(_)
                | Self::Toml(_)
        )
    }
}

/// Result type alias using our error type
pub type Result<T> = std::result::Result<T, Error>;

/// Extension trait for adding context to Results
pub trait ResultExt<T> {
    /// Add context to an error
    fn context(self, context: impl Into<String>) -> Result<T>;
}

impl<T> ResultExt<T> for Result<T> {
    fn context(self, context: impl Into<String>) -> Result<T> {
        self.map_err(|e| e.with_context(context))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_persistence_is_retryable() {
        let err = Error::persistence("store unavailable");
        assert!(err.is_retryable());
        assert!(!err.is_user_fixable());
    }

    #[test]
    fn test_configuration_is_user_fixable() {
        let err = Error::configuration("attendance_weight must be finite");
        assert!(err.is_user_fixable());
        assert!(!err.is_retryable());
    }

    #[test]
    fn test_context_wraps_message() {
        let result: Result<()> = Err(Error::NotFound("lawmaker M001".into()));
        let err = result.context("loading comparison").unwrap_err();
        assert_eq!(
            err.to_string(),
            "loading comparison: Not found: lawmaker M001"
        );
    }

    #[test]
    fn test_persistence_display_includes_row_count() {
        let err = Error::Persistence {
            message: "disk full".into(),
            failed_rows: 3,
        };
        assert_eq!(
            err.to_string(),
            "Persistence error: disk full (3 row(s) failed)"
        );
    }
}
