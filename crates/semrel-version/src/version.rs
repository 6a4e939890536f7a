//! The semantic version value object.

use std::cmp::Ordering;
use std::hash::{Hash, Hasher};
use std::str::FromStr;
use std::sync::LazyLock;

use regex::Regex;
use semrel_commit::LevelBump;
use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::{VersionError, VersionResult};

// https://semver.org/#is-there-a-suggested-regular-expression-regex-to-check-a-semver-string
static SEMVER_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?x)
        ^(?P<major>0|[1-9]\d*)
        \.(?P<minor>0|[1-9]\d*)
        \.(?P<patch>0|[1-9]\d*)
        (?:-(?P<prerelease>
            (?:0|[1-9]\d*|\d*[a-zA-Z-][0-9a-zA-Z-]*)
            (?:\.(?:0|[1-9]\d*|\d*[a-zA-Z-][0-9a-zA-Z-]*))*
        ))?
        (?:\+(?P<build>[0-9a-zA-Z-]+(?:\.[0-9a-zA-Z-]+)*))?$",
    )
    .expect("invalid semver regex")
});

/// An immutable SemVer 2.0.0 version.
///
/// Prereleases are modelled as a token plus an optional numeric revision
/// (`1.2.3-rc.4` has token `rc` and revision `4`), which is the shape the
/// release algorithm reasons about. Build metadata is carried for display
/// but ignored by equality and ordering, per SemVer precedence rules.
///
/// All transitions (`bump`, `to_prerelease`, `finalize_version`) return new
/// values.
#[derive(Debug, Clone)]
pub struct Version {
    /// Major version number.
    pub major: u64,
    /// Minor version number.
    pub minor: u64,
    /// Patch version number.
    pub patch: u64,
    /// Prerelease channel identifier (e.g. `rc`, `beta`).
    pub prerelease_token: Option<String>,
    /// Numeric revision within the prerelease channel, always `>= 1`.
    pub prerelease_revision: Option<u64>,
    /// Build metadata, excluded from precedence.
    pub build: Option<String>,
}

impl Version {
    /// Creates a new full-release version.
    #[must_use]
    pub fn new(major: u64, minor: u64, patch: u64) -> Self {
        Self {
            major,
            minor,
            patch,
            prerelease_token: None,
            prerelease_revision: None,
            build: None,
        }
    }

    /// Returns true if this version carries a prerelease suffix.
    #[must_use]
    pub fn is_prerelease(&self) -> bool {
        self.prerelease_token.is_some()
    }

    /// Increments the version at the given level, zeroing the lower fields
    /// and clearing any prerelease suffix and build metadata.
    ///
    /// `LevelBump::NoRelease` returns an unchanged clone.
    #[must_use]
    pub fn bump(&self, level: LevelBump) -> Self {
        match level {
            LevelBump::NoRelease => self.clone(),
            LevelBump::Patch => Self::new(self.major, self.minor, self.patch + 1),
            LevelBump::Minor => Self::new(self.major, self.minor + 1, 0),
            LevelBump::Major => Self::new(self.major + 1, 0, 0),
        }
    }

    /// Attaches or replaces the prerelease suffix.
    ///
    /// When `revision` is `None` the revision starts at 1.
    #[must_use]
    pub fn to_prerelease(&self, token: impl Into<String>, revision: Option<u64>) -> Self {
        Self {
            major: self.major,
            minor: self.minor,
            patch: self.patch,
            prerelease_token: Some(token.into()),
            prerelease_revision: Some(revision.unwrap_or(1).max(1)),
            build: self.build.clone(),
        }
    }

    /// Drops the prerelease suffix and build metadata, keeping the core
    /// triple.
    #[must_use]
    pub fn finalize_version(&self) -> Self {
        Self::new(self.major, self.minor, self.patch)
    }

    /// The coarsest level at which the core triples of `self` and `other`
    /// differ, regardless of which one is larger.
    ///
    /// Used to compare prerelease progress against the last full release:
    /// `1.3.0-rc.2.diff(1.2.3) == LevelBump::Minor`.
    #[must_use]
    pub fn diff(&self, other: &Self) -> LevelBump {
        if self.major != other.major {
            LevelBump::Major
        } else if self.minor != other.minor {
            LevelBump::Minor
        } else if self.patch != other.patch {
            LevelBump::Patch
        } else {
            LevelBump::NoRelease
        }
    }

    fn core_and_prerelease(&self) -> (u64, u64, u64, Option<(&str, Option<u64>)>) {
        (
            self.major,
            self.minor,
            self.patch,
            self.prerelease_token
                .as_deref()
                .map(|t| (t, self.prerelease_revision)),
        )
    }
}

impl std::ops::Sub for &Version {
    type Output = LevelBump;

    fn sub(self, other: &Version) -> LevelBump {
        self.diff(other)
    }
}

impl PartialEq for Version {
    fn eq(&self, other: &Self) -> bool {
        self.core_and_prerelease() == other.core_and_prerelease()
    }
}

impl Eq for Version {}

impl Hash for Version {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.core_and_prerelease().hash(state);
    }
}

impl PartialOrd for Version {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Version {
    fn cmp(&self, other: &Self) -> Ordering {
        (self.major, self.minor, self.patch)
            .cmp(&(other.major, other.minor, other.patch))
            .then_with(|| {
                match (self.prerelease_token.as_deref(), other.prerelease_token.as_deref()) {
                    // A full release has higher precedence than any prerelease
                    // of the same core triple.
                    (None, None) => Ordering::Equal,
                    (None, Some(_)) => Ordering::Greater,
                    (Some(_), None) => Ordering::Less,
                    (Some(a), Some(b)) => a
                        .cmp(b)
                        .then_with(|| self.prerelease_revision.cmp(&other.prerelease_revision)),
                }
            })
    }
}

impl std::fmt::Display for Version {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}.{}.{}", self.major, self.minor, self.patch)?;
        if let Some(token) = &self.prerelease_token {
            write!(f, "-{token}")?;
            if let Some(revision) = self.prerelease_revision {
                write!(f, ".{revision}")?;
            }
        }
        if let Some(build) = &self.build {
            write!(f, "+{build}")?;
        }
        Ok(())
    }
}

impl FromStr for Version {
    type Err = VersionError;

    fn from_str(s: &str) -> VersionResult<Self> {
        let captures = SEMVER_RE
            .captures(s)
            .ok_or_else(|| VersionError::Parse(s.to_string()))?;

        let number = |name: &str| -> VersionResult<u64> {
            captures
                .name(name)
                .and_then(|m| m.as_str().parse().ok())
                .ok_or_else(|| VersionError::Parse(s.to_string()))
        };

        let (prerelease_token, prerelease_revision) = match captures.name("prerelease") {
            None => (None, None),
            Some(pre) => split_prerelease(pre.as_str(), s)?,
        };

        Ok(Self {
            major: number("major")?,
            minor: number("minor")?,
            patch: number("patch")?,
            prerelease_token,
            prerelease_revision,
            build: captures.name("build").map(|m| m.as_str().to_string()),
        })
    }
}

/// Splits a raw prerelease string into (token, revision): a trailing
/// all-numeric identifier becomes the revision, everything before it the
/// token.
fn split_prerelease(
    prerelease: &str,
    original: &str,
) -> VersionResult<(Option<String>, Option<u64>)> {
    match prerelease.rsplit_once('.') {
        Some((token, last)) if last.bytes().all(|b| b.is_ascii_digit()) => {
            let revision: u64 = last
                .parse()
                .map_err(|_| VersionError::Parse(original.to_string()))?;
            if revision == 0 {
                return Err(VersionError::InvalidRevision(original.to_string()));
            }
            Ok((Some(token.to_string()), Some(revision)))
        }
        _ => Ok((Some(prerelease.to_string()), None)),
    }
}

impl Serialize for Version {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_string())
    }
}

impl<'de> Deserialize<'de> for Version {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(D::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn v(s: &str) -> Version {
        s.parse().unwrap()
    }

    #[test]
    fn test_parse_full_release() {
        let version = v("1.2.3");
        assert_eq!(version.major, 1);
        assert_eq!(version.minor, 2);
        assert_eq!(version.patch, 3);
        assert!(!version.is_prerelease());
    }

    #[test]
    fn test_parse_prerelease() {
        let version = v("1.2.3-rc.4");
        assert_eq!(version.prerelease_token.as_deref(), Some("rc"));
        assert_eq!(version.prerelease_revision, Some(4));
        assert!(version.is_prerelease());
    }

    #[test]
    fn test_parse_prerelease_without_revision() {
        let version = v("1.2.3-beta");
        assert_eq!(version.prerelease_token.as_deref(), Some("beta"));
        assert_eq!(version.prerelease_revision, None);
    }

    #[test]
    fn test_parse_build_metadata() {
        let version = v("1.2.3-rc.1+build.5");
        assert_eq!(version.build.as_deref(), Some("build.5"));
        assert_eq!(version.to_string(), "1.2.3-rc.1+build.5");
    }

    #[test]
    fn test_parse_invalid() {
        assert!("not-a-version".parse::<Version>().is_err());
        assert!("1.2".parse::<Version>().is_err());
        assert!("01.2.3".parse::<Version>().is_err());
        assert!("1.2.3.4".parse::<Version>().is_err());
    }

    #[test]
    fn test_parse_zero_revision_rejected() {
        assert!(matches!(
            "1.2.3-rc.0".parse::<Version>(),
            Err(VersionError::InvalidRevision(_))
        ));
    }

    #[test]
    fn test_display_roundtrip() {
        for s in ["0.0.0", "1.2.3", "1.2.3-rc.1", "10.20.30-beta.2", "1.0.0-alpha"] {
            assert_eq!(v(s).to_string(), s);
        }
    }

    #[test]
    fn test_bump_major() {
        assert_eq!(v("1.2.3").bump(LevelBump::Major), v("2.0.0"));
    }

    #[test]
    fn test_bump_minor() {
        assert_eq!(v("1.2.3").bump(LevelBump::Minor), v("1.3.0"));
    }

    #[test]
    fn test_bump_patch() {
        assert_eq!(v("1.2.3").bump(LevelBump::Patch), v("1.2.4"));
    }

    #[test]
    fn test_bump_no_release_is_identity() {
        assert_eq!(v("1.2.3-rc.1").bump(LevelBump::NoRelease), v("1.2.3-rc.1"));
    }

    #[test]
    fn test_bump_clears_prerelease() {
        assert_eq!(v("1.2.3-rc.1").bump(LevelBump::Patch), v("1.2.4"));
        assert_eq!(v("1.2.3-rc.1").bump(LevelBump::Minor), v("1.3.0"));
    }

    #[test]
    fn test_bump_is_greater() {
        for level in [LevelBump::Patch, LevelBump::Minor, LevelBump::Major] {
            assert!(v("1.2.3").bump(level) > v("1.2.3"));
        }
    }

    #[test]
    fn test_to_prerelease_defaults_to_revision_1() {
        let version = v("1.3.0").to_prerelease("rc", None);
        assert_eq!(version.to_string(), "1.3.0-rc.1");
    }

    #[test]
    fn test_to_prerelease_replaces_token() {
        let version = v("1.3.0-alpha.2").to_prerelease("rc", Some(1));
        assert_eq!(version.to_string(), "1.3.0-rc.1");
    }

    #[test]
    fn test_finalize_preserves_core_triple() {
        assert_eq!(v("1.3.0-rc.2").finalize_version(), v("1.3.0"));
        assert_eq!(v("1.3.0").finalize_version(), v("1.3.0"));
    }

    #[test]
    fn test_finalize_after_to_prerelease_is_identity_on_core() {
        let version = v("2.4.6");
        assert_eq!(version.to_prerelease("rc", None).finalize_version(), version);
    }

    #[test]
    fn test_diff() {
        assert_eq!(v("2.0.0").diff(&v("1.9.9")), LevelBump::Major);
        assert_eq!(v("1.3.0-rc.2").diff(&v("1.2.3")), LevelBump::Minor);
        assert_eq!(v("1.2.4-rc.1").diff(&v("1.2.3")), LevelBump::Patch);
        assert_eq!(v("1.2.3-rc.1").diff(&v("1.2.3")), LevelBump::NoRelease);
    }

    #[test]
    fn test_sub_operator() {
        assert_eq!(&v("1.3.0-rc.1") - &v("1.2.3"), LevelBump::Minor);
    }

    #[test]
    fn test_ordering_core_triples() {
        assert!(v("2.0.0") > v("1.9.9"));
        assert!(v("1.3.0") > v("1.2.9"));
        assert!(v("1.2.10") > v("1.2.9"));
    }

    #[test]
    fn test_ordering_full_release_beats_prerelease() {
        assert!(v("1.2.3") > v("1.2.3-rc.9"));
        assert!(v("1.2.3-rc.9") < v("1.2.3"));
    }

    #[test]
    fn test_ordering_prerelease_revisions() {
        assert!(v("1.2.3-rc.2") > v("1.2.3-rc.1"));
        assert!(v("1.2.3-rc.10") > v("1.2.3-rc.2"));
    }

    #[test]
    fn test_ordering_prerelease_tokens() {
        assert!(v("1.2.3-rc.1") > v("1.2.3-beta.1"));
        assert!(v("1.2.3-beta.1") > v("1.2.3-alpha.9"));
    }

    #[test]
    fn test_ordering_revisionless_below_revision_1() {
        assert!(v("1.2.3-rc") < v("1.2.3-rc.1"));
    }

    #[test]
    fn test_build_metadata_ignored_in_ordering_and_equality() {
        assert_eq!(v("1.2.3+build.1"), v("1.2.3+build.2"));
        assert_eq!(v("1.2.3+build.1").cmp(&v("1.2.3")), Ordering::Equal);
    }

    #[test]
    fn test_hash_consistent_with_eq() {
        use std::collections::HashSet;
        let mut set = HashSet::new();
        set.insert(v("1.2.3+build.1"));
        assert!(set.contains(&v("1.2.3")));
    }

    #[test]
    fn test_serialize_as_string() {
        let json = serde_json::to_string(&v("1.2.3-rc.1")).unwrap();
        assert_eq!(json, "\"1.2.3-rc.1\"");
    }

    #[test]
    fn test_deserialize_from_string() {
        let version: Version = serde_json::from_str("\"1.2.3-rc.1\"").unwrap();
        assert_eq!(version, v("1.2.3-rc.1"));
    }
}
