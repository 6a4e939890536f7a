//! Tag name to version translation.

use tracing::debug;

use crate::{Version, VersionError, VersionResult};

/// Translates between Git tag names and [`Version`] values through a format
/// string containing a single `{version}` placeholder.
///
/// The translator also carries the prerelease token configured for the
/// active branch, which the release algorithm consults when it has to mint
/// new prerelease versions.
#[derive(Debug, Clone)]
pub struct VersionTranslator {
    tag_format: String,
    prerelease_token: String,
}

const PLACEHOLDER: &str = "{version}";

impl VersionTranslator {
    /// Creates a translator, validating the tag format.
    ///
    /// # Errors
    ///
    /// Returns [`VersionError::TagFormat`] unless `tag_format` contains
    /// exactly one `{version}` placeholder.
    pub fn new(
        tag_format: impl Into<String>,
        prerelease_token: impl Into<String>,
    ) -> VersionResult<Self> {
        let tag_format = tag_format.into();
        if tag_format.matches(PLACEHOLDER).count() != 1 {
            return Err(VersionError::TagFormat(tag_format));
        }
        Ok(Self {
            tag_format,
            prerelease_token: prerelease_token.into(),
        })
    }

    /// The prerelease token configured for the active branch.
    #[must_use]
    pub fn prerelease_token(&self) -> &str {
        &self.prerelease_token
    }

    /// Parses a raw version string.
    ///
    /// # Errors
    ///
    /// Returns [`VersionError::Parse`] if the string is not valid semver.
    pub fn from_string(&self, s: &str) -> VersionResult<Version> {
        s.parse()
    }

    /// Translates a tag name into a version.
    ///
    /// Returns `None` when the tag does not follow the configured format or
    /// its version part does not parse; such tags are not version tags and
    /// are skipped by the callers.
    #[must_use]
    pub fn from_tag(&self, tag: &str) -> Option<Version> {
        let (prefix, suffix) = self
            .tag_format
            .split_once(PLACEHOLDER)
            .expect("validated at construction");

        let inner = tag.strip_prefix(prefix)?.strip_suffix(suffix)?;
        match inner.parse() {
            Ok(version) => Some(version),
            Err(_) => {
                debug!(tag, "tag does not carry a semantic version, skipping");
                None
            }
        }
    }

    /// Renders a version as a tag name.
    #[must_use]
    pub fn str_to_tag(&self, version: &Version) -> String {
        self.tag_format.replace(PLACEHOLDER, &version.to_string())
    }
}

impl Default for VersionTranslator {
    fn default() -> Self {
        Self {
            tag_format: "v{version}".to_string(),
            prerelease_token: "rc".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default() {
        let translator = VersionTranslator::default();
        assert_eq!(translator.prerelease_token(), "rc");
        assert_eq!(
            translator.str_to_tag(&Version::new(1, 2, 3)),
            "v1.2.3"
        );
    }

    #[test]
    fn test_new_rejects_missing_placeholder() {
        assert!(matches!(
            VersionTranslator::new("release", "rc"),
            Err(VersionError::TagFormat(_))
        ));
    }

    #[test]
    fn test_new_rejects_duplicate_placeholder() {
        assert!(matches!(
            VersionTranslator::new("{version}-{version}", "rc"),
            Err(VersionError::TagFormat(_))
        ));
    }

    #[test]
    fn test_from_tag() {
        let translator = VersionTranslator::new("v{version}", "rc").unwrap();
        assert_eq!(translator.from_tag("v1.2.3"), Some(Version::new(1, 2, 3)));
    }

    #[test]
    fn test_from_tag_wrong_prefix() {
        let translator = VersionTranslator::new("v{version}", "rc").unwrap();
        assert_eq!(translator.from_tag("release-1.2.3"), None);
    }

    #[test]
    fn test_from_tag_not_semver() {
        let translator = VersionTranslator::new("v{version}", "rc").unwrap();
        assert_eq!(translator.from_tag("vnot-a-version"), None);
    }

    #[test]
    fn test_from_tag_with_suffix_format() {
        let translator = VersionTranslator::new("release/{version}/final", "rc").unwrap();
        assert_eq!(
            translator.from_tag("release/2.0.1/final"),
            Some(Version::new(2, 0, 1))
        );
        assert_eq!(translator.from_tag("release/2.0.1"), None);
    }

    #[test]
    fn test_roundtrip() {
        let translator = VersionTranslator::new("v{version}", "rc").unwrap();
        for s in ["1.2.3", "1.2.3-rc.1", "0.1.0-beta.7"] {
            let version: Version = s.parse().unwrap();
            let tag = translator.str_to_tag(&version);
            assert_eq!(translator.from_tag(&tag), Some(version));
        }
    }

    #[test]
    fn test_from_string() {
        let translator = VersionTranslator::default();
        assert!(translator.from_string("1.2.3").is_ok());
        assert!(translator.from_string("nope").is_err());
    }
}
