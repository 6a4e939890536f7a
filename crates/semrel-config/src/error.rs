//! Configuration error types.

use thiserror::Error;

/// Configuration-related errors.
///
/// Everything here is fatal except [`ConfigError::NotAReleaseBranch`],
/// which callers treat as a successful "no release" outcome.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Configuration file missing.
    #[error("configuration file not found: {0}")]
    NotFound(String),

    /// Failed to read the configuration file.
    #[error("failed to read {path}: {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// Configuration file is not valid TOML or violates the schema.
    #[error("failed to parse {path}: {reason}")]
    Parse { path: String, reason: String },

    /// A branch group's match pattern is not a valid regex.
    #[error("invalid match pattern for branch group {group:?}: {reason}")]
    InvalidBranchPattern { group: String, reason: String },

    /// The active branch matches no configured release group.
    ///
    /// Non-fatal: the run short-circuits with "no release".
    #[error("branch {0:?} isn't in any release group; no release will be made")]
    NotAReleaseBranch(String),

    /// A `version_toml` / `version_variables` entry is not `path:key`.
    #[error("invalid version declaration {0:?}, expected \"path:key\"")]
    InvalidDeclaration(String),
}

/// Result type for configuration operations.
pub type ConfigResult<T> = Result<T, ConfigError>;
