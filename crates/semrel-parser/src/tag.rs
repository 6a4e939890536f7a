//! Legacy tag-token commit parser.

use std::sync::LazyLock;

use regex::Regex;
use semrel_commit::{LevelBump, ParseError, ParseResult, ParsedCommit, RawCommit};
use serde::Deserialize;

use crate::CommitParser;
use crate::util::{breaking_descriptions, parse_paragraphs};

static SUBJECT_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(?P<subject>[^\n]+)(?:\n\n(?P<text>(?s:.+)))?").expect("invalid regex")
});

/// Options for [`TagParser`].
#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct TagOptions {
    /// Token marking a feature (minor) commit.
    pub minor_tag: String,

    /// Token marking a fix (patch) commit.
    pub patch_tag: String,
}

impl Default for TagOptions {
    fn default() -> Self {
        Self {
            minor_tag: ":sparkles:".to_string(),
            patch_tag: ":nut_and_bolt:".to_string(),
        }
    }
}

/// Parses the legacy convention: a `:sparkles:` or `:nut_and_bolt:` token
/// anywhere in the message, with the rest of the first line as changelog
/// content.
pub struct TagParser {
    options: TagOptions,
}

impl TagParser {
    /// Creates a parser from the given options.
    #[must_use]
    pub fn new(options: TagOptions) -> Self {
        Self { options }
    }
}

impl Default for TagParser {
    fn default() -> Self {
        Self::new(TagOptions::default())
    }
}

impl CommitParser for TagParser {
    fn parse(&self, commit: &RawCommit) -> ParseResult {
        let message = &commit.message;
        let Some(captures) = SUBJECT_RE.captures(message) else {
            return ParseError::new(
                commit.clone(),
                format!("Unable to parse the given commit message: {message:?}"),
            )
            .into();
        };

        let subject = &captures["subject"];
        let (mut type_, mut bump, subject) = if message.contains(&self.options.minor_tag) {
            (
                "feature",
                LevelBump::Minor,
                subject.replace(&self.options.minor_tag, ""),
            )
        } else if message.contains(&self.options.patch_tag) {
            (
                "fix",
                LevelBump::Patch,
                subject.replace(&self.options.patch_tag, ""),
            )
        } else {
            return ParseError::new(
                commit.clone(),
                format!("Unable to parse the given commit message: {message:?}"),
            )
            .into();
        };

        let mut descriptions = vec![subject.trim().to_string()];
        if let Some(text) = captures.name("text") {
            descriptions.extend(parse_paragraphs(text.as_str()));
        }

        let breaking = breaking_descriptions(&descriptions);
        if !breaking.is_empty() {
            type_ = "breaking";
            bump = LevelBump::Major;
        }

        ParsedCommit {
            bump,
            type_: type_.to_string(),
            scope: None,
            descriptions,
            breaking_descriptions: breaking,
            commit: commit.clone(),
        }
        .into()
    }
}
