//! Runtime binding of configuration, repository and collaborators.

use std::sync::Arc;

use anyhow::{Context as _, Result};
use semrel_config::{Config, ConfigError, MaybeFromEnv};
use semrel_core::{ChangelogContext, CoreResult, ReleaseHistory, next_version, release_history};
use semrel_git::Repository;
use semrel_hvcs::RemoteVcs;
use semrel_parser::{CommitParser, ParserRegistry};
use semrel_version::{
    Declaration, PatternDeclaration, TomlDeclaration, Version, VersionTranslator,
};
use tracing::info;

use crate::commands::GlobalOptions;
use crate::masking;

/// Everything a command needs, resolved from configuration once per run.
pub struct RuntimeContext {
    /// The repository the run operates on.
    pub repo: Repository,

    /// The configured commit parser.
    pub parser: Box<dyn CommitParser>,

    /// Tag/version translation for the active branch.
    pub translator: VersionTranslator,

    /// Whether the active branch produces prereleases.
    pub prerelease: bool,

    /// Whether breaking changes bump the major version while it is 0.
    pub major_on_zero: bool,

    /// Release commit message template.
    pub commit_message: String,

    /// Version-bearing files to rewrite on release.
    pub declarations: Vec<Declaration>,

    /// The hosting-service client.
    pub hvcs: Arc<dyn RemoteVcs>,

    /// Optional custom changelog template file.
    pub changelog_template: Option<String>,

    /// Changelog output path.
    pub changelog_output: String,

    /// Git remote to push to.
    pub remote_name: String,

    /// Whether writes are suppressed.
    pub noop: bool,
}

impl RuntimeContext {
    /// Discovers the repository, loads configuration and binds the
    /// collaborators the active branch calls for.
    ///
    /// Returns `Ok(None)` when the active branch is not a release branch:
    /// the caller should exit successfully without doing anything.
    ///
    /// # Errors
    ///
    /// Returns an error on any invalid configuration, an unreadable
    /// repository, or an unresolvable remote.
    pub fn load(opts: &GlobalOptions) -> Result<Option<Self>> {
        let repo = Repository::discover().context("failed to locate a git repository")?;
        let config = match &opts.config {
            Some(path) => Config::load(path)?,
            None => Config::load_or_default(repo.path())?,
        };

        let active_branch = repo.active_branch_name()?;
        let branch = match config.select_branch(&active_branch) {
            Ok((group, branch)) => {
                info!(group, branch = %active_branch, "matched release branch group");
                branch.clone()
            }
            Err(ConfigError::NotAReleaseBranch(branch)) => {
                info!(%branch, "branch isn't in any release group; no release will be made");
                return Ok(None);
            }
            Err(err) => return Err(err.into()),
        };

        let registry = ParserRegistry::with_builtins();
        let parser = registry.resolve(&config.commit_parser, &config.commit_parser_options)?;

        let translator = VersionTranslator::new(&config.tag_format, &branch.prerelease_token)?;

        let remote_url = match config.remote.url.as_ref().and_then(MaybeFromEnv::resolve) {
            Some(url) => url,
            None => repo.remote_url(&config.remote.name)?,
        };
        let domain = config.remote.domain.as_ref().and_then(MaybeFromEnv::resolve);
        let hvcs: Arc<dyn RemoteVcs> = semrel_hvcs::client_for(
            &config.remote.type_,
            &remote_url,
            domain,
            config.remote.token_var.as_deref(),
        )?
        .into();

        if config.mask_secrets {
            masking::add_masks(hvcs.masked_values());
        }

        let mut declarations = Vec::new();
        for entry in &config.version_toml {
            let (path, key) = entry
                .split_once(':')
                .ok_or_else(|| ConfigError::InvalidDeclaration(entry.clone()))?;
            declarations.push(Declaration::Toml(TomlDeclaration::new(path, key)));
        }
        for entry in &config.version_variables {
            let (path, variable) = entry
                .split_once(':')
                .ok_or_else(|| ConfigError::InvalidDeclaration(entry.clone()))?;
            declarations.push(Declaration::Pattern(PatternDeclaration::from_variable(
                path, variable,
            )?));
        }

        Ok(Some(Self {
            repo,
            parser,
            translator,
            prerelease: branch.prerelease,
            major_on_zero: config.major_on_zero,
            commit_message: config.commit_message,
            declarations,
            hvcs,
            changelog_template: config.changelog.template_file,
            changelog_output: config.changelog.output_file,
            remote_name: config.remote.name,
            noop: opts.noop,
        }))
    }

    /// Computes the next version for the active branch.
    ///
    /// # Errors
    ///
    /// Propagates failures from the version algorithm.
    pub fn next_version(&self) -> CoreResult<Version> {
        next_version(
            &self.repo,
            &self.translator,
            self.parser.as_ref(),
            self.prerelease,
            self.major_on_zero,
        )
    }

    /// Builds the grouped release history of the repository.
    ///
    /// # Errors
    ///
    /// Propagates failures from the history walk.
    pub fn release_history(&self) -> CoreResult<ReleaseHistory> {
        release_history(&self.repo, &self.translator, self.parser.as_ref())
    }

    /// Binds a history to the template context.
    #[must_use]
    pub fn changelog_context(&self, history: ReleaseHistory) -> ChangelogContext {
        ChangelogContext::new(Arc::clone(&self.hvcs), history)
    }

    /// Renders a changelog: the configured template file when present, the
    /// built-in template otherwise.
    ///
    /// # Errors
    ///
    /// Returns an error when the template file is unreadable or fails to
    /// render.
    pub fn render_changelog(&self, history: ReleaseHistory) -> Result<String> {
        let context = self.changelog_context(history);
        match &self.changelog_template {
            Some(path) => {
                let source = std::fs::read_to_string(self.repo.path().join(path))
                    .with_context(|| format!("failed to read changelog template {path}"))?;
                Ok(context.render(&source)?)
            }
            None => Ok(context.render_default()?),
        }
    }

    /// Whether `version` names an already-released version, i.e. a tag for
    /// it exists.
    ///
    /// # Errors
    ///
    /// Returns an error if the repository's tags cannot be read.
    pub fn is_released(&self, version: &Version) -> Result<bool> {
        let tag = self.translator.str_to_tag(version);
        Ok(self.repo.tags()?.iter().any(|t| t.name == tag))
    }
}
