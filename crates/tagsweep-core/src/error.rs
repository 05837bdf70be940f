//! Error types for the pruning pipeline.
//!
//! Only configuration problems and a failed tag listing are errors here.
//! Per-candidate digest and deletion failures are recorded in the
//! [`DeletionReport`](crate::DeletionReport) instead, so one bad tag never
//! aborts the batch.

use thiserror::Error;

/// Result type alias using [`PruneError`] as the error type.
pub type Result<T> = std::result::Result<T, PruneError>;

/// Boxed error produced by a registry collaborator.
pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Errors that stop a pruning run.
#[derive(Error, Debug)]
pub enum PruneError {
    /// The registry path could not be turned into a registry target.
    #[error("Invalid registry path '{input}': {reason}")]
    Configuration {
        /// Raw path as supplied by the user.
        input: String,
        /// Reason the path was rejected.
        reason: String,
    },

    /// The version pattern is not a valid regular expression.
    #[error("Invalid version pattern '{pattern}': {source}")]
    InvalidPattern {
        /// Pattern as supplied by the user.
        pattern: String,
        /// Underlying regex compilation error.
        #[source]
        source: regex::Error,
    },

    /// The registry could not list the tags of the repository.
    #[error("Failed to list tags for {repository}: {source}")]
    RegistryQuery {
        /// Repository whose tags were requested.
        repository: String,
        /// Error reported by the registry collaborator.
        #[source]
        source: BoxError,
    },
}

impl PruneError {
    /// Creates a configuration error for the given raw input.
    #[must_use]
    pub fn configuration(input: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::Configuration {
            input: input.into(),
            reason: reason.into(),
        }
    }

    /// Returns true if this error was caused by user-supplied configuration.
    ///
    /// Configuration errors are raised before any registry call is made.
    #[must_use]
    pub const fn is_configuration(&self) -> bool {
        matches!(self, Self::Configuration { .. } | Self::InvalidPattern { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display_configuration() {
        let err = PruneError::configuration("example.com", "image name is empty");
        assert_eq!(
            err.to_string(),
            "Invalid registry path 'example.com': image name is empty"
        );
        assert!(err.is_configuration());
    }

    #[test]
    fn test_error_display_registry_query() {
        let err = PruneError::RegistryQuery {
            repository: "myorg/app".to_string(),
            source: "connection refused".into(),
        };
        assert_eq!(
            err.to_string(),
            "Failed to list tags for myorg/app: connection refused"
        );
        assert!(!err.is_configuration());
    }

    #[test]
    fn test_invalid_pattern_is_configuration() {
        let source = regex::Regex::new("(").unwrap_err();
        let err = PruneError::InvalidPattern {
            pattern: "(".to_string(),
            source,
        };
        assert!(err.is_configuration());
        assert!(err.to_string().starts_with("Invalid version pattern '('"));
    }
}
