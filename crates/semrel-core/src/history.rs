//! Release history construction.

use chrono::{DateTime, FixedOffset};
use indexmap::IndexMap;
use semrel_commit::{Actor, ParseResult};
use semrel_git::Repository;
use semrel_parser::CommitParser;
use semrel_version::{Version, VersionTranslator};
use serde::Serialize;
use tracing::debug;

use crate::CoreResult;
use crate::algorithm::tags_and_versions;

/// One released version's changelog bucket.
#[derive(Debug, Clone, Serialize)]
pub struct Release {
    /// Who created the release tag.
    pub tagger: Actor,

    /// Who committed the release. Annotated tags carry only a tagger, so
    /// this mirrors it; lightweight tags fall back to the commit author.
    pub committer: Actor,

    /// When the release was tagged, in the tagger's timezone.
    pub tagged_date: DateTime<FixedOffset>,

    /// Parse results grouped by commit type.
    pub elements: IndexMap<String, Vec<ParseResult>>,
}

/// Every commit of the repository, grouped per release.
///
/// `released` keys appear in the order the versions are discovered walking
/// from the tip backwards; `unreleased` holds only commits newer than any
/// tag reachable from `HEAD`.
#[derive(Debug, Clone, Default, Serialize)]
pub struct ReleaseHistory {
    /// Commits not yet part of any release, grouped by commit type.
    pub unreleased: IndexMap<String, Vec<ParseResult>>,

    /// Released versions with their commits.
    pub released: IndexMap<Version, Release>,
}

impl ReleaseHistory {
    /// Moves the unreleased bucket into a new release entry at the front,
    /// for rendering a changelog before the release tag exists.
    #[must_use]
    pub fn with_pending_release(
        mut self,
        version: Version,
        tagger: Actor,
        tagged_date: DateTime<FixedOffset>,
    ) -> Self {
        let elements = std::mem::take(&mut self.unreleased);
        let release = Release {
            tagger: tagger.clone(),
            committer: tagger,
            tagged_date,
            elements,
        };

        let mut released = IndexMap::new();
        released.insert(version, release);
        released.extend(self.released.drain(..));
        self.released = released;
        self
    }

    /// Total number of parse results across all buckets.
    #[must_use]
    pub fn commit_count(&self) -> usize {
        let unreleased: usize = self.unreleased.values().map(Vec::len).sum();
        let released: usize = self
            .released
            .values()
            .flat_map(|release| release.elements.values())
            .map(Vec::len)
            .sum();
        unreleased + released
    }
}

/// Walks the repository's full history, parsing every commit and bucketing
/// it into the release introduced by the nearest tag at or after it.
///
/// Each commit lands in exactly one bucket: commits ahead of every tag go
/// to `unreleased`, a tagged commit opens its release's bucket and is the
/// first entry in it, and parse failures group under the `"unknown"` type.
///
/// # Errors
///
/// Returns an error if the repository cannot be read.
pub fn release_history(
    repo: &Repository,
    translator: &VersionTranslator,
    parser: &dyn CommitParser,
) -> CoreResult<ReleaseHistory> {
    let all_tags = tags_and_versions(&repo.tags()?, translator);

    let mut history = ReleaseHistory::default();
    let mut current_version: Option<Version> = None;

    for commit in repo.commits_since(None)? {
        let parse_result = parser.parse(&commit);
        let commit_type = parse_result.type_().to_string();

        // A matching tag means this commit is the latest one introduced by
        // that release; everything from here back belongs to it (until an
        // older tag takes over). The highest version wins when several
        // tags point at one commit.
        if let Some((tag, version)) = all_tags.iter().find(|(tag, _)| tag.points_at(&commit.hash))
        {
            debug!(tag = %tag.name, commit = commit.short_hash(), "opening release bucket");
            current_version = Some(version.clone());

            let release = match &tag.annotation {
                Some(annotation) => Release {
                    tagger: annotation.tagger.clone(),
                    committer: annotation.tagger.clone(),
                    tagged_date: annotation.tagged_date,
                    elements: IndexMap::new(),
                },
                None => Release {
                    tagger: commit.author.clone(),
                    committer: commit.author.clone(),
                    tagged_date: commit.date,
                    elements: IndexMap::new(),
                },
            };
            history.released.entry(version.clone()).or_insert(release);
        }

        match &current_version {
            None => history
                .unreleased
                .entry(commit_type)
                .or_default()
                .push(parse_result),
            Some(version) => {
                if let Some(release) = history.released.get_mut(version) {
                    release.elements.entry(commit_type).or_default().push(parse_result);
                }
            }
        }
    }

    Ok(history)
}
