//! Tag reference types.

use chrono::{DateTime, FixedOffset};
use semrel_commit::Actor;

/// Metadata only annotated tags carry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TagAnnotation {
    /// Who created the tag.
    pub tagger: Actor,

    /// When the tag was created, in the tagger's timezone.
    pub tagged_date: DateTime<FixedOffset>,
}

/// A tag in the repository, pointing at a commit.
///
/// `target` is always the peeled commit hash; for annotated tags the tag
/// object's own metadata is carried in `annotation`, for lightweight tags
/// callers fall back to the target commit's author information.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TagRef {
    /// The tag name without the `refs/tags/` prefix.
    pub name: String,

    /// The hash of the commit this tag (after peeling) points at.
    pub target: String,

    /// Tagger metadata, present only for annotated tags.
    pub annotation: Option<TagAnnotation>,
}

impl TagRef {
    /// Returns true if this tag points at the given commit.
    #[must_use]
    pub fn points_at(&self, commit_hash: &str) -> bool {
        self.target == commit_hash
    }
}
