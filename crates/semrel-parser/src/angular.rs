//! Angular-style Conventional Commits parser.
//!
//! <https://github.com/angular/angular/blob/main/contributing-docs/commit-message-guidelines.md>

use regex::Regex;
use semrel_commit::{LevelBump, ParseError, ParseResult, ParsedCommit, RawCommit};
use serde::Deserialize;
use tracing::debug;

use crate::util::{breaking_descriptions, parse_paragraphs};
use crate::{CommitParser, ParserError, ParserResult};

/// Options for [`AngularParser`].
#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct AngularOptions {
    /// Commit types the parser accepts at all.
    pub allowed_tags: Vec<String>,

    /// Types that trigger a minor release.
    pub minor_tags: Vec<String>,

    /// Types that trigger a patch release.
    pub patch_tags: Vec<String>,

    /// Level for accepted types in neither list.
    pub default_bump_level: LevelBump,
}

impl Default for AngularOptions {
    fn default() -> Self {
        Self {
            allowed_tags: [
                "build", "chore", "ci", "docs", "feat", "fix", "perf", "style", "refactor", "test",
            ]
            .map(String::from)
            .to_vec(),
            minor_tags: vec!["feat".to_string()],
            patch_tags: vec!["fix".to_string(), "perf".to_string()],
            default_bump_level: LevelBump::NoRelease,
        }
    }
}

/// Changelog display names for types whose short form reads poorly.
fn long_type_name(type_: &str) -> &str {
    match type_ {
        "feat" => "feature",
        "docs" => "documentation",
        "perf" => "performance",
        other => other,
    }
}

/// Parses Angular-style conventional commit messages.
pub struct AngularParser {
    options: AngularOptions,
    re: Regex,
}

impl AngularParser {
    /// Creates a parser from the given options.
    ///
    /// # Errors
    ///
    /// Returns [`ParserError::InvalidOptions`] when `allowed_tags` is empty.
    pub fn new(options: AngularOptions) -> ParserResult<Self> {
        if options.allowed_tags.is_empty() {
            return Err(ParserError::InvalidOptions {
                name: "angular".to_string(),
                reason: "allowed_tags must not be empty".to_string(),
            });
        }

        let tags = options
            .allowed_tags
            .iter()
            .map(|tag| regex::escape(tag))
            .collect::<Vec<_>>()
            .join("|");
        let pattern = format!(
            r"(?x)
            ^(?P<type>{tags})                 # e.g. feat
            (?:\((?P<scope>[^\n]+)\))?        # or feat(parser)
            (?P<break>!)?:\s+                 # breaking if feat!:
            (?P<subject>[^\n]+)               # commit subject
            (?:\n\n(?P<text>(?s:.+)))?        # commit body
            "
        );
        let re = Regex::new(&pattern).map_err(|err| ParserError::InvalidOptions {
            name: "angular".to_string(),
            reason: err.to_string(),
        })?;

        Ok(Self { options, re })
    }

    /// Creates a parser with the default Angular convention.
    ///
    /// # Errors
    ///
    /// Never fails in practice; kept fallible for uniformity with
    /// [`AngularParser::new`].
    pub fn with_defaults() -> ParserResult<Self> {
        Self::new(AngularOptions::default())
    }
}

impl CommitParser for AngularParser {
    fn parse(&self, commit: &RawCommit) -> ParseResult {
        let Some(captures) = self.re.captures(&commit.message) else {
            debug!(hash = commit.short_hash(), "unable to parse commit message");
            return ParseError::new(commit.clone(), "Unable to parse commit message").into();
        };

        let type_ = &captures["type"];
        let scope = captures.name("scope").map(|m| m.as_str().to_string());
        let subject = captures["subject"].to_string();

        let mut descriptions = vec![subject];
        if let Some(text) = captures.name("text") {
            descriptions.extend(parse_paragraphs(text.as_str()));
        }
        let breaking = breaking_descriptions(&descriptions);

        let bump = if captures.name("break").is_some() || !breaking.is_empty() {
            LevelBump::Major
        } else if self.options.minor_tags.iter().any(|t| t == type_) {
            LevelBump::Minor
        } else if self.options.patch_tags.iter().any(|t| t == type_) {
            LevelBump::Patch
        } else {
            self.options.default_bump_level
        };

        ParsedCommit {
            bump,
            type_: long_type_name(type_).to_string(),
            scope,
            descriptions,
            breaking_descriptions: breaking,
            commit: commit.clone(),
        }
        .into()
    }
}
