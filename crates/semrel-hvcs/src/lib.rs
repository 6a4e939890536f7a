//! Hosted VCS capability for semrel.
//!
//! The release core needs a handful of facts about the hosting service:
//! the repository's owner and name (derived from the remote URL) and how
//! to build web URLs for commits, pull requests and version comparisons.
//! Operations a service (or this build) does not support answer with
//! [`HvcsError::NotSupported`] instead of aborting, so callers can degrade
//! gracefully.

mod error;
mod gitea;
mod github;
mod gitlab;
mod url;

pub use error::{HvcsError, HvcsResult};
pub use gitea::Gitea;
pub use github::Github;
pub use gitlab::Gitlab;
pub use url::{GitUrl, parse_git_url};

/// The remote hosting service capability.
///
/// `commit_hash_url` and `pull_request_url` are pure string construction
/// and always available; everything else defaults to a not-supported
/// signal.
pub trait RemoteVcs: Send + Sync {
    /// Short service identifier (e.g. `"github"`), used in diagnostics.
    fn service_name(&self) -> &'static str;

    /// The repository owner (user or organisation/namespace).
    fn owner(&self) -> &str;

    /// The repository name.
    fn repo_name(&self) -> &str;

    /// Web URL of a commit.
    fn commit_hash_url(&self, hash: &str) -> String;

    /// Web URL of a pull/merge request.
    fn pull_request_url(&self, number: u64) -> String;

    /// Web URL comparing two revisions.
    ///
    /// # Errors
    ///
    /// Returns [`HvcsError::NotSupported`] unless the service overrides it.
    fn compare_url(&self, _from: &str, _to: &str) -> HvcsResult<String> {
        Err(HvcsError::not_supported(self.service_name(), "compare_url"))
    }

    /// Publishes a release for the given tag.
    ///
    /// # Errors
    ///
    /// Returns [`HvcsError::NotSupported`] unless the service overrides it.
    fn create_release(&self, _tag: &str, _changelog: &str, _prerelease: bool) -> HvcsResult<()> {
        Err(HvcsError::not_supported(self.service_name(), "create_release"))
    }

    /// Checks the build status reported for a ref.
    ///
    /// # Errors
    ///
    /// Returns [`HvcsError::NotSupported`] unless the service overrides it.
    fn check_build_status(&self, _ref: &str) -> HvcsResult<bool> {
        Err(HvcsError::not_supported(self.service_name(), "check_build_status"))
    }

    /// Uploads an asset to the release for the given tag.
    ///
    /// # Errors
    ///
    /// Returns [`HvcsError::NotSupported`] unless the service overrides it.
    fn upload_asset(&self, _tag: &str, _path: &std::path::Path) -> HvcsResult<()> {
        Err(HvcsError::not_supported(self.service_name(), "upload_asset"))
    }

    /// Secret values the logging layer must redact.
    fn masked_values(&self) -> Vec<String> {
        Vec::new()
    }
}

/// Builds the client for a configured service name.
///
/// # Errors
///
/// Returns [`HvcsError::UnknownService`] for unrecognised names and
/// [`HvcsError::MalformedRemoteUrl`] when the remote URL cannot be parsed.
pub fn client_for(
    service: &str,
    remote_url: &str,
    domain: Option<String>,
    token_var: Option<&str>,
) -> HvcsResult<Box<dyn RemoteVcs>> {
    match service {
        "github" => Ok(Box::new(Github::new(remote_url, domain, token_var)?)),
        "gitlab" => Ok(Box::new(Gitlab::new(remote_url, domain, token_var)?)),
        "gitea" => Ok(Box::new(Gitea::new(remote_url, domain, token_var)?)),
        other => Err(HvcsError::UnknownService(other.to_string())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_client_for_known_services() {
        for service in ["github", "gitlab", "gitea"] {
            let client =
                client_for(service, "https://example.com/acme/widget.git", None, None).unwrap();
            assert_eq!(client.service_name(), service);
            assert_eq!(client.owner(), "acme");
            assert_eq!(client.repo_name(), "widget");
        }
    }

    #[test]
    fn test_client_for_unknown_service() {
        let result = client_for("sourcehut", "https://example.com/a/b", None, None);
        assert!(matches!(result, Err(HvcsError::UnknownService(_))));
    }

    #[test]
    fn test_unsupported_operations_signal_not_supported() {
        let client = client_for("github", "https://github.com/acme/widget", None, None).unwrap();
        assert!(matches!(
            client.create_release("v1.0.0", "notes", false),
            Err(HvcsError::NotSupported { .. })
        ));
        assert!(matches!(
            client.check_build_status("main"),
            Err(HvcsError::NotSupported { .. })
        ));
        assert!(matches!(
            client.upload_asset("v1.0.0", std::path::Path::new("dist/pkg.tar.gz")),
            Err(HvcsError::NotSupported { .. })
        ));
    }
}
