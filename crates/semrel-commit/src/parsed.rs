//! Parse results produced by commit parsers.

use serde::Serialize;
use thiserror::Error;

use crate::{LevelBump, RawCommit};

/// Raised when a caller explicitly surfaces a [`ParseError`].
///
/// Parsers themselves never return this; they carry failures inside
/// [`ParseResult`] so that a single malformed message does not abort a
/// history walk.
#[derive(Debug, Error)]
#[error("{0}")]
pub struct CommitParseError(pub String);

/// A commit successfully parsed by a commit parser.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ParsedCommit {
    /// The release level this commit triggers.
    pub bump: LevelBump,

    /// The canonical commit type used for changelog grouping
    /// (e.g. "feature", "fix", "documentation").
    #[serde(rename = "type")]
    pub type_: String,

    /// The optional scope.
    pub scope: Option<String>,

    /// The subject followed by the body paragraphs.
    pub descriptions: Vec<String>,

    /// Text captured from BREAKING CHANGE trailers.
    pub breaking_descriptions: Vec<String>,

    /// The underlying commit.
    pub commit: RawCommit,
}

/// A commit a parser could not make sense of.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ParseError {
    /// The underlying commit.
    pub commit: RawCommit,

    /// Why parsing failed.
    pub error: String,
}

impl ParseError {
    /// Creates a new parse error for the given commit.
    #[must_use]
    pub fn new(commit: RawCommit, error: impl Into<String>) -> Self {
        Self {
            commit,
            error: error.into(),
        }
    }
}

/// The outcome of parsing a single commit.
///
/// Failures are values, not errors: both variants are carried through the
/// history walk and surface in the changelog (errors under the `"unknown"`
/// type). Callers that do want a hard failure go through
/// [`ParseResult::into_result`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum ParseResult {
    /// The commit parsed cleanly.
    Commit(ParsedCommit),
    /// The commit did not match the parser's convention.
    Error(ParseError),
}

impl ParseResult {
    /// The changelog grouping type for this result: the parsed commit's
    /// canonical type, or `"unknown"` for errors.
    #[must_use]
    pub fn type_(&self) -> &str {
        match self {
            Self::Commit(parsed) => &parsed.type_,
            Self::Error(_) => "unknown",
        }
    }

    /// The underlying commit, whichever way parsing went.
    #[must_use]
    pub fn commit(&self) -> &RawCommit {
        match self {
            Self::Commit(parsed) => &parsed.commit,
            Self::Error(err) => &err.commit,
        }
    }

    /// Returns the parsed commit, surfacing a parse failure as
    /// [`CommitParseError`].
    ///
    /// # Errors
    ///
    /// Returns [`CommitParseError`] if this result is the error variant.
    pub fn into_result(self) -> Result<ParsedCommit, CommitParseError> {
        match self {
            Self::Commit(parsed) => Ok(parsed),
            Self::Error(err) => Err(CommitParseError(err.error)),
        }
    }

    /// Returns the parsed commit if there is one.
    #[must_use]
    pub fn as_parsed(&self) -> Option<&ParsedCommit> {
        match self {
            Self::Commit(parsed) => Some(parsed),
            Self::Error(_) => None,
        }
    }
}

impl From<ParsedCommit> for ParseResult {
    fn from(parsed: ParsedCommit) -> Self {
        Self::Commit(parsed)
    }
}

impl From<ParseError> for ParseResult {
    fn from(err: ParseError) -> Self {
        Self::Error(err)
    }
}
