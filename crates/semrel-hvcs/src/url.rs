//! Remote URL parsing.

use std::sync::LazyLock;

use regex::Regex;

use crate::{HvcsError, HvcsResult};

// https://example.com/owner/repo.git, ssh://git@example.com:2222/owner/repo
static FULL_URL_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"^(?:https?|git|ssh)://(?:[^@/]+@)?(?P<domain>[^/:]+)(?::\d+)?/(?P<path>.+?)(?:\.git)?/?$",
    )
    .expect("invalid regex")
});

// git@example.com:owner/repo.git
static SCP_URL_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(?:[^@/]+@)?(?P<domain>[^/:]+):(?P<path>[^/].*?)(?:\.git)?/?$")
        .expect("invalid regex")
});

/// The identity a remote URL encodes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GitUrl {
    /// The host the repository lives on.
    pub domain: String,

    /// The owner: user, organisation, or a nested namespace for GitLab
    /// subgroups.
    pub owner: String,

    /// The repository name.
    pub repo_name: String,
}

/// Parses a Git remote URL in https, `ssh://` or scp-like form.
///
/// # Errors
///
/// Returns [`HvcsError::MalformedRemoteUrl`] when the URL does not contain
/// a domain plus an `owner/name` path.
pub fn parse_git_url(url: &str) -> HvcsResult<GitUrl> {
    let captures = FULL_URL_RE
        .captures(url)
        .or_else(|| SCP_URL_RE.captures(url))
        .ok_or_else(|| HvcsError::MalformedRemoteUrl(url.to_string()))?;

    let path = &captures["path"];
    let (owner, repo_name) = path
        .rsplit_once('/')
        .ok_or_else(|| HvcsError::MalformedRemoteUrl(url.to_string()))?;
    if owner.is_empty() || repo_name.is_empty() {
        return Err(HvcsError::MalformedRemoteUrl(url.to_string()));
    }

    Ok(GitUrl {
        domain: captures["domain"].to_string(),
        owner: owner.to_string(),
        repo_name: repo_name.to_string(),
    })
}
