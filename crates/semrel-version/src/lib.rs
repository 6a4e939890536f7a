//! Semantic version handling for semrel.
//!
//! This crate provides:
//! - [`Version`]: an immutable SemVer 2.0.0 value object with the bump and
//!   prerelease transitions the release algorithm needs
//! - [`VersionTranslator`]: the bidirectional mapping between Git tag names
//!   and versions via a `{version}` format string
//! - [`Declaration`] and friends: writers that persist a new version into
//!   project files

mod declaration;
mod error;
mod translator;
mod version;

pub use declaration::{
    Declaration, DeclarationError, DeclarationResult, PatternDeclaration, TomlDeclaration,
};
pub use error::{VersionError, VersionResult};
pub use translator::VersionTranslator;
pub use version::Version;
