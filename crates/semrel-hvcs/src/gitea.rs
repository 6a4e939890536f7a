//! Gitea client.

use crate::url::parse_git_url;
use crate::{HvcsResult, RemoteVcs};

/// Gitea (self-hosted or gitea.com).
pub struct Gitea {
    domain: String,
    owner: String,
    repo_name: String,
    token: Option<String>,
}

impl Gitea {
    /// The domain of the hosted service.
    pub const DEFAULT_DOMAIN: &'static str = "gitea.com";

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

impl RemoteVcs for Gitea {
    fn service_name(&self) -> &'static str {
        "gitea"
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
            "https://{}/{}/{}/pulls/{number}",
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
