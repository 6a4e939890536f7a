//! Scipy-style commit parser.
//!
//! Scipy commits prefix the subject with an upper-case tag such as `ENH:`
//! or `BUG:`; most tags describe maintenance work and trigger no release.

use regex::Regex;
use semrel_commit::{LevelBump, ParseError, ParseResult, ParsedCommit, RawCommit};
use serde::Deserialize;

use crate::util::{breaking_descriptions, parse_paragraphs};
use crate::{CommitParser, ParserError, ParserResult};

/// Options for [`ScipyParser`].
#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ScipyOptions {
    /// Tags the parser accepts at all.
    pub allowed_tags: Vec<String>,

    /// Tags that trigger a major release.
    pub major_tags: Vec<String>,

    /// Tags that trigger a minor release.
    pub minor_tags: Vec<String>,

    /// Tags that trigger a patch release.
    pub patch_tags: Vec<String>,

    /// Level for accepted tags in none of the lists.
    pub default_bump_level: LevelBump,
}

impl Default for ScipyOptions {
    fn default() -> Self {
        Self {
            allowed_tags: [
                "API", "BENCH", "BLD", "BUG", "DEP", "DEV", "DOC", "ENH", "FEAT", "MAINT", "REL",
                "REV", "STY", "TEST", "TST", "WIP",
            ]
            .map(String::from)
            .to_vec(),
            major_tags: vec!["API".to_string()],
            minor_tags: ["DEP", "ENH", "FEAT", "REV"].map(String::from).to_vec(),
            patch_tags: ["BUG", "MAINT"].map(String::from).to_vec(),
            default_bump_level: LevelBump::NoRelease,
        }
    }
}

/// Changelog display names for the scipy tag vocabulary.
fn display_type(tag: &str) -> &str {
    match tag {
        "API" => "breaking",
        "BENCH" => "benchmark",
        "BLD" => "build",
        "BUG" => "fix",
        "DEP" => "deprecation",
        "DEV" => "development",
        "DOC" => "documentation",
        "ENH" => "enhancement",
        "FEAT" => "feature",
        "MAINT" => "maintenance",
        "REL" => "release",
        "REV" => "revert",
        "STY" => "style",
        "TEST" | "TST" => "test",
        other => other,
    }
}

/// Parses scipy-style commit messages.
pub struct ScipyParser {
    options: ScipyOptions,
    re: Regex,
}

impl ScipyParser {
    /// Creates a parser from the given options.
    ///
    /// # Errors
    ///
    /// Returns [`ParserError::InvalidOptions`] when `allowed_tags` is empty.
    pub fn new(options: ScipyOptions) -> ParserResult<Self> {
        if options.allowed_tags.is_empty() {
            return Err(ParserError::InvalidOptions {
                name: "scipy".to_string(),
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
            ^(?P<tag>{tags})
            (?:\((?P<scope>[^\n]+)\))?:\s+
            (?P<subject>[^\n]+)
            (?:\n\n(?P<text>(?s:.+)))?
            "
        );
        let re = Regex::new(&pattern).map_err(|err| ParserError::InvalidOptions {
            name: "scipy".to_string(),
            reason: err.to_string(),
        })?;

        Ok(Self { options, re })
    }

    /// Creates a parser with the default scipy vocabulary.
    ///
    /// # Errors
    ///
    /// Never fails in practice; kept fallible for uniformity with
    /// [`ScipyParser::new`].
    pub fn with_defaults() -> ParserResult<Self> {
        Self::new(ScipyOptions::default())
    }
}

impl CommitParser for ScipyParser {
    fn parse(&self, commit: &RawCommit) -> ParseResult {
        let Some(captures) = self.re.captures(&commit.message) else {
            return ParseError::new(commit.clone(), "Unable to parse commit message").into();
        };

        let tag = &captures["tag"];
        let scope = captures.name("scope").map(|m| m.as_str().to_string());

        let mut descriptions = vec![captures["subject"].to_string()];
        if let Some(text) = captures.name("text") {
            descriptions.extend(parse_paragraphs(text.as_str()));
        }
        let breaking = breaking_descriptions(&descriptions);

        let bump = if !breaking.is_empty() || self.options.major_tags.iter().any(|t| t == tag) {
            LevelBump::Major
        } else if self.options.minor_tags.iter().any(|t| t == tag) {
            LevelBump::Minor
        } else if self.options.patch_tags.iter().any(|t| t == tag) {
            LevelBump::Patch
        } else {
            self.options.default_bump_level
        };

        ParsedCommit {
            bump,
            type_: display_type(tag).to_string(),
            scope,
            descriptions,
            breaking_descriptions: breaking,
            commit: commit.clone(),
        }
        .into()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{FixedOffset, TimeZone};
    use semrel_commit::Actor;

    fn make_raw(message: &str) -> RawCommit {
        RawCommit::new(
            "abc1234567890",
            message,
            Actor::new("Test", "test@example.com"),
            FixedOffset::east_opt(0)
                .unwrap()
                .with_ymd_and_hms(2024, 3, 10, 8, 0, 0)
                .unwrap(),
            vec![],
        )
    }

    fn parse(message: &str) -> ParseResult {
        ScipyParser::with_defaults().unwrap().parse(&make_raw(message))
    }

    #[test]
    fn test_enh_is_minor() {
        let parsed = parse("ENH: speed up the solver").into_result().unwrap();
        assert_eq!(parsed.bump, LevelBump::Minor);
        assert_eq!(parsed.type_, "enhancement");
    }

    #[test]
    fn test_bug_is_patch() {
        let parsed = parse("BUG: clamp negative weights").into_result().unwrap();
        assert_eq!(parsed.bump, LevelBump::Patch);
        assert_eq!(parsed.type_, "fix");
    }

    #[test]
    fn test_api_is_major() {
        let parsed = parse("API: rename the solver entry point").into_result().unwrap();
        assert_eq!(parsed.bump, LevelBump::Major);
        assert_eq!(parsed.type_, "breaking");
    }

    #[test]
    fn test_maintenance_tags_default_to_no_release() {
        for message in ["DOC: clarify usage", "STY: reformat", "TST: cover edge case"] {
            let parsed = parse(message).into_result().unwrap();
            assert_eq!(parsed.bump, LevelBump::NoRelease, "{message}");
        }
    }

    #[test]
    fn test_breaking_trailer_upgrades() {
        let parsed = parse("MAINT: drop python 2 shims\n\nBREAKING CHANGE: python 2 is gone")
            .into_result()
            .unwrap();
        assert_eq!(parsed.bump, LevelBump::Major);
        assert_eq!(parsed.breaking_descriptions, vec!["python 2 is gone"]);
    }

    #[test]
    fn test_scope_is_captured() {
        let parsed = parse("ENH(linalg): faster decomposition").into_result().unwrap();
        assert_eq!(parsed.scope.as_deref(), Some("linalg"));
    }

    #[test]
    fn test_lowercase_tag_is_parse_error() {
        assert!(matches!(parse("enh: lower case"), ParseResult::Error(_)));
    }

    #[test]
    fn test_unknown_tag_is_parse_error() {
        assert!(matches!(parse("NOPE: what"), ParseResult::Error(_)));
    }
}
