//! Configuration schema.

use indexmap::IndexMap;
use regex::Regex;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::{ConfigError, ConfigResult, MaybeFromEnv};

/// Main configuration structure.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// Tag format; must contain exactly one `{version}` placeholder.
    pub tag_format: String,

    /// Commit parser name (`angular`, `emoji`, `scipy`, `tag`, or a
    /// registered extension).
    pub commit_parser: String,

    /// Options table handed to the selected parser.
    pub commit_parser_options: toml::Table,

    /// Whether breaking changes bump the major version while it is 0.
    pub major_on_zero: bool,

    /// Message template for the release commit; `{version}` is substituted.
    pub commit_message: String,

    /// Whether secrets are redacted from log output.
    pub mask_secrets: bool,

    /// TOML version declarations as `path:dotted.key` entries.
    pub version_toml: Vec<String>,

    /// Pattern version declarations as `path:VARIABLE` entries.
    pub version_variables: Vec<String>,

    /// Release branch groups, matched in declaration order.
    pub branches: IndexMap<String, BranchConfig>,

    /// Changelog rendering configuration.
    pub changelog: ChangelogConfig,

    /// Remote / hosting service configuration.
    pub remote: RemoteConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            tag_format: default_tag_format(),
            commit_parser: default_commit_parser(),
            commit_parser_options: toml::Table::new(),
            major_on_zero: true,
            commit_message: default_commit_message(),
            mask_secrets: true,
            version_toml: Vec::new(),
            version_variables: Vec::new(),
            branches: default_branches(),
            changelog: ChangelogConfig::default(),
            remote: RemoteConfig::default(),
        }
    }
}

fn default_tag_format() -> String {
    "v{version}".to_string()
}

fn default_commit_parser() -> String {
    "angular".to_string()
}

fn default_commit_message() -> String {
    "chore(release): {version}".to_string()
}

fn default_branches() -> IndexMap<String, BranchConfig> {
    let mut branches = IndexMap::new();
    branches.insert("main".to_string(), BranchConfig::default());
    branches
}

impl Config {
    /// Selects the first branch group whose pattern matches the active
    /// branch.
    ///
    /// Patterns are anchored at the start of the branch name, and groups
    /// are tried in the order they were declared.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidBranchPattern`] for a broken pattern
    /// and the non-fatal [`ConfigError::NotAReleaseBranch`] when nothing
    /// matches.
    pub fn select_branch(&self, active_branch: &str) -> ConfigResult<(&str, &BranchConfig)> {
        for (group, options) in &self.branches {
            let re = Regex::new(&format!("^(?:{})", options.match_)).map_err(|err| {
                ConfigError::InvalidBranchPattern {
                    group: group.clone(),
                    reason: err.to_string(),
                }
            })?;
            if re.is_match(active_branch) {
                debug!(%group, pattern = %options.match_, branch = active_branch, "matched branch group");
                return Ok((group, options));
            }
            debug!(%group, pattern = %options.match_, branch = active_branch, "branch group rejected");
        }
        Err(ConfigError::NotAReleaseBranch(active_branch.to_string()))
    }
}

/// One release branch group.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct BranchConfig {
    /// Regex the active branch name must match (anchored at the start).
    #[serde(rename = "match")]
    pub match_: String,

    /// Prerelease channel token used on this branch.
    pub prerelease_token: String,

    /// Whether this branch produces prereleases.
    pub prerelease: bool,
}

impl Default for BranchConfig {
    fn default() -> Self {
        Self {
            match_: "(main|master)".to_string(),
            prerelease_token: "rc".to_string(),
            prerelease: false,
        }
    }
}

/// Changelog configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ChangelogConfig {
    /// Optional custom minijinja template file; the built-in template is
    /// used when unset.
    pub template_file: Option<String>,

    /// Output file path.
    pub output_file: String,
}

impl Default for ChangelogConfig {
    fn default() -> Self {
        Self {
            template_file: None,
            output_file: "CHANGELOG.md".to_string(),
        }
    }
}

/// Remote / hosting service configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RemoteConfig {
    /// Git remote name.
    pub name: String,

    /// Hosting service kind: `github`, `gitlab` or `gitea`.
    #[serde(rename = "type")]
    pub type_: String,

    /// Remote URL override; defaults to the named remote's URL.
    pub url: Option<MaybeFromEnv>,

    /// Web domain override for self-hosted installs.
    pub domain: Option<MaybeFromEnv>,

    /// Environment variable holding the service API token.
    pub token_var: Option<String>,
}

impl Default for RemoteConfig {
    fn default() -> Self {
        Self {
            name: "origin".to_string(),
            type_: "github".to_string(),
            url: None,
            domain: None,
            token_var: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.tag_format, "v{version}");
        assert_eq!(config.commit_parser, "angular");
        assert!(config.major_on_zero);
        assert_eq!(config.commit_message, "chore(release): {version}");
        assert_eq!(config.changelog.output_file, "CHANGELOG.md");
        assert_eq!(config.remote.name, "origin");
        assert_eq!(config.branches.len(), 1);
    }

    #[test]
    fn test_deserialize_empty() {
        let config: Config = toml::from_str("").unwrap();
        assert_eq!(config.commit_parser, "angular");
    }

    #[test]
    fn test_deserialize_full() {
        let toml = r#"
            tag_format = "release/{version}"
            commit_parser = "emoji"
            major_on_zero = false
            commit_message = "release: {version}"
            version_toml = ["Cargo.toml:package.version"]
            version_variables = ["src/version.py:__version__"]

            [commit_parser_options]
            major_tags = [":boom:"]

            [branches.main]
            match = "(main|master)"

            [branches.beta]
            match = "beta/.*"
            prerelease_token = "beta"
            prerelease = true

            [changelog]
            template_file = "templates/CHANGELOG.md.j2"
            output_file = "HISTORY.md"

            [remote]
            name = "upstream"
            type = "gitlab"
            token_var = "GITLAB_TOKEN"
        "#;

        let config: Config = toml::from_str(toml).unwrap();
        assert_eq!(config.tag_format, "release/{version}");
        assert_eq!(config.commit_parser, "emoji");
        assert!(!config.major_on_zero);
        assert!(config.commit_parser_options.contains_key("major_tags"));
        assert_eq!(config.version_toml, vec!["Cargo.toml:package.version"]);
        assert_eq!(config.changelog.output_file, "HISTORY.md");
        assert_eq!(config.remote.type_, "gitlab");
        assert_eq!(config.remote.token_var.as_deref(), Some("GITLAB_TOKEN"));
    }

    #[test]
    fn test_branches_preserve_declaration_order() {
        let toml = r#"
            [branches.beta]
            match = "beta/.*"
            prerelease = true

            [branches.catchall]
            match = ".*"

            [branches.main]
            match = "(main|master)"
        "#;

        let config: Config = toml::from_str(toml).unwrap();
        let groups: Vec<&String> = config.branches.keys().collect();
        assert_eq!(groups, vec!["beta", "catchall", "main"]);
    }

    #[test]
    fn test_select_branch_first_match_wins() {
        let toml = r#"
            [branches.catchall]
            match = ".*"
            prerelease_token = "alpha"
            prerelease = true

            [branches.main]
            match = "(main|master)"
        "#;

        let config: Config = toml::from_str(toml).unwrap();
        let (group, options) = config.select_branch("main").unwrap();
        assert_eq!(group, "catchall");
        assert!(options.prerelease);
    }

    #[test]
    fn test_select_branch_is_anchored() {
        let toml = r#"
            [branches.main]
            match = "main"
        "#;

        let config: Config = toml::from_str(toml).unwrap();
        assert!(config.select_branch("main").is_ok());
        // "main" must match at the start of the branch name.
        assert!(matches!(
            config.select_branch("not-main"),
            Err(ConfigError::NotAReleaseBranch(_))
        ));
    }

    #[test]
    fn test_select_branch_no_match() {
        let config = Config::default();
        let result = config.select_branch("feature/shiny");
        assert!(matches!(result, Err(ConfigError::NotAReleaseBranch(_))));
    }

    #[test]
    fn test_select_branch_invalid_pattern() {
        let toml = r#"
            [branches.broken]
            match = "("
        "#;

        let config: Config = toml::from_str(toml).unwrap();
        assert!(matches!(
            config.select_branch("main"),
            Err(ConfigError::InvalidBranchPattern { .. })
        ));
    }

    #[test]
    fn test_unknown_keys_rejected() {
        let result: Result<Config, _> = toml::from_str("no_such_key = true");
        assert!(result.is_err());
    }
}
