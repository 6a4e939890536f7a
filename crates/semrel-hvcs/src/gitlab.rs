//! GitLab client.

use crate::url::parse_git_url;
use crate::{HvcsResult, RemoteVcs};

/// GitLab (gitlab.com or self-managed).
pub struct Gitlab {
    domain: String,
    owner: String,
    repo_name: String,
    token: Option<String>,
}

impl Gitlab {
    /// The domain of the hosted service.
    pub const DEFAULT_DOMAIN: &'static str = "gitlab.com";

    /// Creates a client from the repository's remote URL.
    ///
    /// # Errors
    ///
    /// Returns [`crate::HvcsError::MalformedRemoteUrl`] when the remote URL
    /// cannot be parsed.
    pub fn new(
        remote_url: &str,
        domain: Option<String>,
        token_var: Option<&str>,
    ) -> HvcsResult<Self> {
        let parsed = parse_git_url(remote_url)?;
        Ok(Self {
            domain: domain.unwrap_or(parsed.domain),
            owner: parsed.owner,
            repo_name: parsed.repo_name,
            token: token_var.and_then(|var| std::env::var(var).ok()),
        })
    }
}

impl RemoteVcs for Gitlab {
    fn service_name(&self) -> &'static str {
        "gitlab"
    }

    fn owner(&self) -> &str {
        &self.owner
    }

    fn repo_name(&self) -> &str {
        &self.repo_name
    }

    fn commit_hash_url(&self, hash: &str) -> String {
        format!(
            "https://{}/{}/{}/-/commit/{hash}",
            self.domain, self.owner, self.repo_name
        )
    }

    fn pull_request_url(&self, number: u64) -> String {
        format!(
            "https://{}/{}/{}/-/merge_requests/{number}",
            self.domain, self.owner, self.repo_name
        )
    }

    fn compare_url(&self, from: &str, to: &str) -> HvcsResult<String> {
        Ok(format!(
            "https://{}/{}/{}/-/compare/{from}...{to}",
            self.domain, self.owner, self.repo_name
        ))
    }

    fn masked_values(&self) -> Vec<String> {
        self.token
            .iter()
            .flat_map(|token| [token.clone(), format!("{token:?}")])
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn client() -> Gitlab {
        Gitlab::new("git@gitlab.com:group/subgroup/widget.git", None, None).unwrap()
    }

    #[test]
    fn test_subgroup_owner() {
        let gitlab = client();
        assert_eq!(gitlab.owner(), "group/subgroup");
        assert_eq!(gitlab.repo_name(), "widget");
    }

    #[test]
    fn test_commit_hash_url() {
        assert_eq!(
            client().commit_hash_url("abc123"),
            "https://gitlab.com/group/subgroup/widget/-/commit/abc123"
        );
    }

    #[test]
    fn test_merge_request_url() {
        assert_eq!(
            client().pull_request_url(7),
            "https://gitlab.com/group/subgroup/widget/-/merge_requests/7"
        );
    }

    #[test]
    fn test_compare_url() {
        assert_eq!(
            client().compare_url("v1.0.0", "v2.0.0").unwrap(),
            "https://gitlab.com/group/subgroup/widget/-/compare/v1.0.0...v2.0.0"
        );
    }
}
