//! Release level bump.

use serde::{Deserialize, Serialize};

/// The magnitude of a version change triggered by a commit or a set of
/// commits.
///
/// Levels are totally ordered: `NoRelease < Patch < Minor < Major`, so the
/// overall bump of a commit range is simply the maximum of the individual
/// levels.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, Default,
)]
#[serde(rename_all = "snake_case")]
pub enum LevelBump {
    /// No release is warranted.
    #[default]
    NoRelease,
    /// Patch version bump (bug fixes).
    Patch,
    /// Minor version bump (new features).
    Minor,
    /// Major version bump (breaking changes).
    Major,
}

impl std::fmt::Display for LevelBump {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NoRelease => write!(f, "no_release"),
            Self::Patch => write!(f, "patch"),
            Self::Minor => write!(f, "minor"),
            Self::Major => write!(f, "major"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ordering() {
        assert!(LevelBump::NoRelease < LevelBump::Patch);
        assert!(LevelBump::Patch < LevelBump::Minor);
        assert!(LevelBump::Minor < LevelBump::Major);
    }

    #[test]
    fn test_max_of_levels() {
        let levels = [LevelBump::Patch, LevelBump::Minor, LevelBump::Patch];
        assert_eq!(
            levels.iter().copied().max().unwrap_or_default(),
            LevelBump::Minor
        );
    }

    #[test]
    fn test_max_of_empty_defaults_to_no_release() {
        let levels: [LevelBump; 0] = [];
        assert_eq!(
            levels.iter().copied().max().unwrap_or_default(),
            LevelBump::NoRelease
        );
    }

    #[test]
    fn test_display() {
        assert_eq!(LevelBump::NoRelease.to_string(), "no_release");
        assert_eq!(LevelBump::Patch.to_string(), "patch");
        assert_eq!(LevelBump::Minor.to_string(), "minor");
        assert_eq!(LevelBump::Major.to_string(), "major");
    }

    #[test]
    fn test_serialize() {
        let json = serde_json::to_string(&LevelBump::Major).unwrap();
        assert_eq!(json, "\"major\"");
    }

    #[test]
    fn test_deserialize() {
        let level: LevelBump = serde_json::from_str("\"no_release\"").unwrap();
        assert_eq!(level, LevelBump::NoRelease);
    }
}
