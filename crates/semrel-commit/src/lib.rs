//! Commit types for semrel.
//!
//! This crate provides the types shared by the parsers and the version
//! algorithm:
//! - [`RawCommit`]: a commit as retrieved from Git
//! - [`ParsedCommit`] / [`ParseError`] / [`ParseResult`]: the outcome of
//!   running a commit parser
//! - [`LevelBump`]: the magnitude of a version change

mod level;
mod parsed;
mod raw;

pub use level::LevelBump;
pub use parsed::{CommitParseError, ParseError, ParseResult, ParsedCommit};
pub use raw::{Actor, RawCommit};
