//! Version error types.

use thiserror::Error;

/// Version-related errors.
#[derive(Debug, Error)]
pub enum VersionError {
    /// A string does not parse as a semantic version.
    #[error("invalid semantic version: {0:?}")]
    Parse(String),

    /// A prerelease revision below 1.
    #[error("prerelease revision must be >= 1 in {0:?}")]
    InvalidRevision(String),

    /// A tag format without exactly one `{version}` placeholder.
    #[error("tag format {0:?} must contain exactly one {{version}} placeholder")]
    TagFormat(String),
}

/// Result type for version operations.
pub type VersionResult<T> = Result<T, VersionError>;
