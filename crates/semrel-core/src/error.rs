//! Core error types.

use thiserror::Error;

/// Core-related errors.
#[derive(Debug, Error)]
pub enum CoreError {
    /// Git error.
    #[error("git error: {0}")]
    Git(#[from] semrel_git::GitError),

    /// Version handling error.
    #[error("version error: {0}")]
    Version(#[from] semrel_version::VersionError),

    /// No common ancestor between the release tag and the active branch.
    #[error("no merge base found between {tag} and {branch}")]
    MergeBaseNotFound { tag: String, branch: String },

    /// The branch topology is ambiguous.
    #[error("{tag} and {branch} have {count} merge bases; only a single merge base is supported")]
    MultipleMergeBases {
        tag: String,
        branch: String,
        count: usize,
    },

    /// Changelog template failure.
    #[error("template error: {0}")]
    Template(#[from] minijinja::Error),
}

/// Result type for core operations.
pub type CoreResult<T> = Result<T, CoreError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_merge_base_not_found_display() {
        let err = CoreError::MergeBaseNotFound {
            tag: "v1.0.0".to_string(),
            branch: "main".to_string(),
        };
        assert_eq!(err.to_string(), "no merge base found between v1.0.0 and main");
    }

    #[test]
    fn test_multiple_merge_bases_display() {
        let err = CoreError::MultipleMergeBases {
            tag: "v1.0.0".to_string(),
            branch: "main".to_string(),
            count: 2,
        };
        assert_eq!(
            err.to_string(),
            "v1.0.0 and main have 2 merge bases; only a single merge base is supported"
        );
    }
}
