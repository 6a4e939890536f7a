//! GitHub client.

use tracing::debug;

use crate::url::parse_git_url;
use crate::{HvcsResult, RemoteVcs};

/// GitHub (github.com or GitHub Enterprise).
pub struct Github {
    domain: String,
    owner: String,
    repo_name: String,
    token: Option<String>,
}

impl Github {
    /// The domain of the hosted service.
    pub const DEFAULT_DOMAIN: &'static str = "github.com";

    /// Creates a client from the repository's remote URL.
    ///
    /// `domain` overrides the URL's host for GitHub Enterprise installs
    /// reached through ssh aliases; `token_var` names the environment
    /// variable holding the API token.
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
        let token = token_var.and_then(|var| std::env::var(var).ok());
        if token.is_some() {
            debug!("loaded github token from environment");
        }
        Ok(Self {
            domain: domain.unwrap_or(parsed.domain),
            owner: parsed.owner,
            repo_name: parsed.repo_name,
            token,
        })
    }
}

impl RemoteVcs for Github {
    fn service_name(&self) -> &'static str {
        "github"
    }

    fn owner(&self) -> &str {
        &self.owner
    }

    fn repo_name(&self) -> &str {
        &self.repo_name
    }

    fn commit_hash_url(&self, hash: &str) -> String {
        format!(
            "https://{}/{}/{}/commit/{hash}",
            self.domain, self.owner, self.repo_name
        )
    }

    fn pull_request_url(&self, number: u64) -> String {
        format!(
            "https://{}/{}/{}/pull/{number}",
            self.domain, self.owner, self.repo_name
        )
    }

    fn compare_url(&self, from: &str, to: &str) -> HvcsResult<String> {
        Ok(format!(
            "https://{}/{}/{}/compare/{from}...{to}",
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

    fn client() -> Github {
        Github::new("https://github.com/acme/widget.git", None, None).unwrap()
    }

    #[test]
    fn test_owner_and_repo_name() {
        let github = client();
        assert_eq!(github.owner(), "acme");
        assert_eq!(github.repo_name(), "widget");
    }

    #[test]
    fn test_commit_hash_url() {
        assert_eq!(
            client().commit_hash_url("abc123"),
            "https://github.com/acme/widget/commit/abc123"
        );
    }

    #[test]
    fn test_pull_request_url() {
        assert_eq!(
            client().pull_request_url(42),
            "https://github.com/acme/widget/pull/42"
        );
    }

    #[test]
    fn test_compare_url() {
        assert_eq!(
            client().compare_url("v1.0.0", "v1.1.0").unwrap(),
            "https://github.com/acme/widget/compare/v1.0.0...v1.1.0"
        );
    }

    #[test]
    fn test_custom_domain_overrides_url_host() {
        let github = Github::new(
            "git@gh-alias:acme/widget.git",
            Some("github.example.com".to_string()),
            None,
        )
        .unwrap();
        assert_eq!(
            github.commit_hash_url("abc"),
            "https://github.example.com/acme/widget/commit/abc"
        );
    }

    #[test]
    fn test_masked_values_without_token() {
        assert!(client().masked_values().is_empty());
    }
}
