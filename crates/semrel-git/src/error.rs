//! Git error types.

use thiserror::Error;

/// Git-related errors.
#[derive(Debug, Error)]
pub enum GitError {
    /// Not a git repository.
    #[error("not a git repository: {0}")]
    NotARepo(std::path::PathBuf),

    /// A revision could not be resolved.
    #[error("revision not found: {0}")]
    RevisionNotFound(String),

    /// Repository has no named remote by that name.
    #[error("remote not found: {0}")]
    RemoteNotFound(String),

    /// HEAD is detached or otherwise not a named branch.
    #[error("no active branch")]
    NoActiveBranch,

    /// Git2 error.
    #[error("git error: {0}")]
    Git2(#[from] git2::Error),

    /// IO error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for git operations.
pub type GitResult<T> = Result<T, GitError>;

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn test_not_a_repo_display() {
        let err = GitError::NotARepo(PathBuf::from("/tmp/not-git"));
        assert_eq!(err.to_string(), "not a git repository: /tmp/not-git");
    }

    #[test]
    fn test_revision_not_found_display() {
        let err = GitError::RevisionNotFound("v1.0.0".to_string());
        assert_eq!(err.to_string(), "revision not found: v1.0.0");
    }

    #[test]
    fn test_no_active_branch_display() {
        assert_eq!(GitError::NoActiveBranch.to_string(), "no active branch");
    }
}
