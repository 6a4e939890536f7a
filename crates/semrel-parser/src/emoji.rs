//! Emoji (gitmoji-style) commit parser.

use semrel_commit::{LevelBump, ParseResult, ParsedCommit, RawCommit};
use serde::Deserialize;

use crate::CommitParser;
use crate::util::parse_paragraphs;

/// Options for [`EmojiParser`].
#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct EmojiOptions {
    /// Emoji tokens that trigger a major release.
    pub major_tags: Vec<String>,

    /// Emoji tokens that trigger a minor release.
    pub minor_tags: Vec<String>,

    /// Emoji tokens that trigger a patch release.
    pub patch_tags: Vec<String>,

    /// Level for commits carrying none of the configured tokens.
    pub default_bump_level: LevelBump,
}

impl Default for EmojiOptions {
    fn default() -> Self {
        Self {
            major_tags: vec![":boom:".to_string()],
            minor_tags: [
                ":sparkles:",
                ":children_crossing:",
                ":lipstick:",
                ":iphone:",
                ":egg:",
                ":chart_with_upwards_trend:",
            ]
            .map(String::from)
            .to_vec(),
            patch_tags: [
                ":ambulance:",
                ":lock:",
                ":bug:",
                ":zap:",
                ":goal_net:",
                ":alien:",
                ":wheelchair:",
                ":speech_balloon:",
                ":mag:",
                ":apple:",
                ":penguin:",
                ":checkered_flag:",
                ":robot:",
                ":green_apple:",
            ]
            .map(String::from)
            .to_vec(),
            default_bump_level: LevelBump::NoRelease,
        }
    }
}

/// Parses commits by the emoji tokens they carry.
///
/// The highest bucket with a matching token wins, and the matched token
/// becomes the changelog type. This parser never produces a parse error:
/// token-less commits fall back to the default level under the `"other"`
/// type.
pub struct EmojiParser {
    options: EmojiOptions,
}

impl EmojiParser {
    /// Creates a parser from the given options.
    #[must_use]
    pub fn new(options: EmojiOptions) -> Self {
        Self { options }
    }

    fn find_token<'a>(&'a self, message: &str) -> Option<(&'a str, LevelBump)> {
        let buckets = [
            (&self.options.major_tags, LevelBump::Major),
            (&self.options.minor_tags, LevelBump::Minor),
            (&self.options.patch_tags, LevelBump::Patch),
        ];
        for (tags, level) in buckets {
            if let Some(tag) = tags.iter().find(|tag| message.contains(tag.as_str())) {
                return Some((tag.as_str(), level));
            }
        }
        None
    }
}

impl Default for EmojiParser {
    fn default() -> Self {
        Self::new(EmojiOptions::default())
    }
}

impl CommitParser for EmojiParser {
    fn parse(&self, commit: &RawCommit) -> ParseResult {
        let (type_, bump) = match self.find_token(&commit.message) {
            Some((tag, level)) => (tag.to_string(), level),
            None => ("other".to_string(), self.options.default_bump_level),
        };

        let mut descriptions = parse_paragraphs(&commit.message);
        if descriptions.is_empty() {
            descriptions.push(String::new());
        }

        ParsedCommit {
            bump,
            type_,
            scope: None,
            descriptions,
            breaking_descriptions: vec![],
            commit: commit.clone(),
        }
        .into()
    }
}
