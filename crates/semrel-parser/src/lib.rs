//! Commit message parsers for semrel.
//!
//! A parser maps a raw commit message to a [`ParseResult`] carrying a
//! release level and a changelog classification. Four conventions ship
//! built in:
//! - [`AngularParser`]: Conventional Commits in the Angular style
//! - [`EmojiParser`]: gitmoji-style emoji tokens
//! - [`ScipyParser`]: scipy-style `TAG:` prefixes
//! - [`TagParser`]: the legacy `:sparkles:` / `:nut_and_bolt:` convention
//!
//! Additional conventions register by name in the [`ParserRegistry`].

mod angular;
mod emoji;
mod error;
mod registry;
mod scipy;
mod tag;
mod util;

pub use angular::{AngularOptions, AngularParser};
pub use emoji::{EmojiOptions, EmojiParser};
pub use error::{ParserError, ParserResult};
pub use registry::{ParserFactory, ParserRegistry};
pub use scipy::{ScipyOptions, ScipyParser};
pub use tag::{TagOptions, TagParser};

use semrel_commit::{ParseResult, RawCommit};

/// Parses raw commit messages into structured release information.
///
/// Parsers never fail the walk: a message that does not follow the
/// convention is returned as the error variant of [`ParseResult`].
pub trait CommitParser {
    /// Parses a raw commit.
    fn parse(&self, commit: &RawCommit) -> ParseResult;
}
