//! HVCS error types.

use thiserror::Error;

/// Errors from the hosted VCS capability.
#[derive(Debug, Error)]
pub enum HvcsError {
    /// The operation is not available for this service.
    ///
    /// This is a graceful signal, not a failure: callers log it and move
    /// on.
    #[error("{operation} is not supported by {service}")]
    NotSupported {
        service: &'static str,
        operation: &'static str,
    },

    /// The remote URL does not look like a repository URL.
    #[error("malformed remote URL: {0:?}")]
    MalformedRemoteUrl(String),

    /// No client exists for the configured service name.
    #[error("unknown hosting service: {0:?}")]
    UnknownService(String),
}

impl HvcsError {
    /// Builds the not-supported signal for an operation.
    #[must_use]
    pub fn not_supported(service: &'static str, operation: &'static str) -> Self {
        Self::NotSupported { service, operation }
    }
}

/// Result type for HVCS operations.
pub type HvcsResult<T> = Result<T, HvcsError>;
