//! Raw commit type as retrieved from Git.

use chrono::{DateTime, FixedOffset};
use serde::{Deserialize, Serialize};

/// A commit author or tagger.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Actor {
    /// The actor name.
    pub name: String,

    /// The actor email.
    pub email: String,
}

impl Actor {
    /// Creates a new actor.
    #[must_use]
    pub fn new(name: impl Into<String>, email: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            email: email.into(),
        }
    }
}

/// A commit as retrieved from Git, before parsing.
///
/// The date carries the author's UTC offset so that changelog timestamps
/// match what `git log` shows.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawCommit {
    /// The commit hash (SHA).
    pub hash: String,

    /// The full commit message (subject + body).
    pub message: String,

    /// The commit author.
    pub author: Actor,

    /// The commit date in the author's timezone.
    pub date: DateTime<FixedOffset>,

    /// Hashes of the parent commits.
    pub parents: Vec<String>,
}

impl RawCommit {
    /// Creates a new raw commit.
    #[must_use]
    pub fn new(
        hash: impl Into<String>,
        message: impl Into<String>,
        author: Actor,
        date: DateTime<FixedOffset>,
        parents: Vec<String>,
    ) -> Self {
        Self {
            hash: hash.into(),
            message: message.into(),
            author,
            date,
            parents,
        }
    }

    /// Returns the first line of the commit message (the subject).
    #[must_use]
    pub fn subject(&self) -> &str {
        self.message.lines().next().unwrap_or("")
    }

    /// Returns the short hash (first 7 characters).
    #[must_use]
    pub fn short_hash(&self) -> &str {
        &self.hash[..7.min(self.hash.len())]
    }
}
