//! Version declaration file writers.
//!
//! A declaration names a location in the working tree where the project
//! version is spelled out and must be rewritten on release:
//! - [`PatternDeclaration`]: a regex assignment match in an arbitrary file
//! - [`TomlDeclaration`]: a dotted key in a TOML document, rewritten with
//!   `toml_edit` so the surrounding formatting survives

use std::fs;
use std::path::{Path, PathBuf};

use regex::Regex;
use thiserror::Error;
use toml_edit::DocumentMut;
use tracing::debug;

use crate::Version;

/// Errors that can occur when rewriting version declarations.
///
/// All of these indicate a broken configuration and are fatal for the run.
#[derive(Debug, Error)]
pub enum DeclarationError {
    /// Declared file does not exist.
    #[error("version declaration file not found: {0}")]
    NotFound(String),

    /// Failed to read or write the file.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Pattern is not a valid regex or lacks a `version` capture group.
    #[error("invalid version pattern: {0}")]
    InvalidPattern(String),

    /// No version assignment matched in the file.
    #[error("no version declaration matched in {0}")]
    NoMatch(String),

    /// TOML file failed to parse.
    #[error("failed to parse {file}: {reason}")]
    TomlParse { file: String, reason: String },

    /// Dotted key missing from the TOML document.
    #[error("key {key:?} not found in {file}")]
    KeyNotFound { file: String, key: String },
}

/// Result type for declaration operations.
pub type DeclarationResult<T> = Result<T, DeclarationError>;

// Version string shape accepted inside declarations; intentionally looser
// than full semver validation since the replacement is what matters.
const VERSION_PATTERN: &str = r"\d+\.\d+\.\d+(?:-[0-9a-zA-Z.-]+)?(?:\+[0-9a-zA-Z.-]+)?";

/// A version spelled out as an assignment matched by a regex.
#[derive(Debug)]
pub struct PatternDeclaration {
    path: PathBuf,
    re: Regex,
}

impl PatternDeclaration {
    /// Creates a declaration from an explicit pattern.
    ///
    /// # Errors
    ///
    /// Returns [`DeclarationError::InvalidPattern`] if the pattern does not
    /// compile or lacks a `version` capture group.
    pub fn new(path: impl Into<PathBuf>, pattern: &str) -> DeclarationResult<Self> {
        let re = Regex::new(pattern)
            .map_err(|err| DeclarationError::InvalidPattern(err.to_string()))?;
        if !re.capture_names().flatten().any(|name| name == "version") {
            return Err(DeclarationError::InvalidPattern(format!(
                "{pattern:?} has no `version` capture group"
            )));
        }
        Ok(Self {
            path: path.into(),
            re,
        })
    }

    /// Creates a declaration matching `VARIABLE = "x.y.z"` style
    /// assignments (also `:` and `:=` separators, single or double quotes).
    ///
    /// # Errors
    ///
    /// Returns [`DeclarationError::InvalidPattern`] if the variable name
    /// produces an invalid pattern.
    pub fn from_variable(path: impl Into<PathBuf>, variable: &str) -> DeclarationResult<Self> {
        let pattern = format!(
            r#"(?m)^\s*{var}\s*(?::=|[:=])\s*["'](?P<version>{VERSION_PATTERN})["']"#,
            var = regex::escape(variable),
        );
        Self::new(path, &pattern)
    }

    /// The file this declaration rewrites.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Substitutes the first match's `version` group with the new version.
    ///
    /// # Errors
    ///
    /// Returns an error if the file is missing, unreadable, or contains no
    /// match.
    pub fn replace(&self, new_version: &Version) -> DeclarationResult<()> {
        if !self.path.exists() {
            return Err(DeclarationError::NotFound(self.path.display().to_string()));
        }
        let content = fs::read_to_string(&self.path)?;

        let span = self
            .re
            .captures(&content)
            .and_then(|caps| caps.name("version"))
            .map(|m| m.range())
            .ok_or_else(|| DeclarationError::NoMatch(self.path.display().to_string()))?;

        let mut updated = String::with_capacity(content.len());
        updated.push_str(&content[..span.start]);
        updated.push_str(&new_version.to_string());
        updated.push_str(&content[span.end..]);

        debug!(path = %self.path.display(), version = %new_version, "rewrote version declaration");
        fs::write(&self.path, updated)?;
        Ok(())
    }
}

/// A version stored under a dotted key of a TOML document.
#[derive(Debug)]
pub struct TomlDeclaration {
    path: PathBuf,
    key: String,
}

impl TomlDeclaration {
    /// Creates a declaration for the given dotted key
    /// (e.g. `package.version`).
    #[must_use]
    pub fn new(path: impl Into<PathBuf>, key: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            key: key.into(),
        }
    }

    /// The file this declaration rewrites.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Updates the key in place, preserving the document's formatting.
    ///
    /// # Errors
    ///
    /// Returns an error if the file is missing, does not parse as TOML, or
    /// the key is absent.
    pub fn replace(&self, new_version: &Version) -> DeclarationResult<()> {
        if !self.path.exists() {
            return Err(DeclarationError::NotFound(self.path.display().to_string()));
        }
        let content = fs::read_to_string(&self.path)?;
        let mut doc: DocumentMut =
            content
                .parse()
                .map_err(|err: toml_edit::TomlError| DeclarationError::TomlParse {
                    file: self.path.display().to_string(),
                    reason: err.to_string(),
                })?;

        let missing_key = || DeclarationError::KeyNotFound {
            file: self.path.display().to_string(),
            key: self.key.clone(),
        };

        let mut item = doc.as_item_mut();
        for segment in self.key.split('.') {
            item = item
                .as_table_like_mut()
                .and_then(|table| table.get_mut(segment))
                .ok_or_else(missing_key)?;
        }
        *item = toml_edit::value(new_version.to_string());

        debug!(path = %self.path.display(), key = %self.key, version = %new_version, "rewrote TOML version declaration");
        fs::write(&self.path, doc.to_string())?;
        Ok(())
    }
}

/// Any of the supported version declaration flavours.
#[derive(Debug)]
pub enum Declaration {
    /// Regex assignment substitution.
    Pattern(PatternDeclaration),
    /// Format-preserving TOML key update.
    Toml(TomlDeclaration),
}

impl Declaration {
    /// The file this declaration rewrites.
    #[must_use]
    pub fn path(&self) -> &Path {
        match self {
            Self::Pattern(decl) => decl.path(),
            Self::Toml(decl) => decl.path(),
        }
    }

    /// Persists the new version into the declared location.
    ///
    /// # Errors
    ///
    /// Propagates the underlying declaration error.
    pub fn replace(&self, new_version: &Version) -> DeclarationResult<()> {
        match self {
            Self::Pattern(decl) => decl.replace(new_version),
            Self::Toml(decl) => decl.replace(new_version),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn version(s: &str) -> Version {
        s.parse().unwrap()
    }

    #[test]
    fn test_pattern_replace_double_quotes() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "__version__ = \"1.0.0\"").unwrap();

        let decl = PatternDeclaration::from_variable(file.path(), "__version__").unwrap();
        decl.replace(&version("2.0.0")).unwrap();

        let content = fs::read_to_string(file.path()).unwrap();
        assert_eq!(content, "__version__ = \"2.0.0\"\n");
    }

    #[test]
    fn test_pattern_replace_single_quotes_and_colon() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "version: '0.5.1-rc.2'").unwrap();

        let decl = PatternDeclaration::from_variable(file.path(), "version").unwrap();
        decl.replace(&version("0.5.1")).unwrap();

        let content = fs::read_to_string(file.path()).unwrap();
        assert_eq!(content, "version: '0.5.1'\n");
    }

    #[test]
    fn test_pattern_replaces_only_first_match() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "version = \"1.0.0\"\nversion = \"1.0.0\"").unwrap();

        let decl = PatternDeclaration::from_variable(file.path(), "version").unwrap();
        decl.replace(&version("1.1.0")).unwrap();

        let content = fs::read_to_string(file.path()).unwrap();
        assert_eq!(content, "version = \"1.1.0\"\nversion = \"1.0.0\"\n");
    }

    #[test]
    fn test_pattern_no_match() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "nothing here").unwrap();

        let decl = PatternDeclaration::from_variable(file.path(), "version").unwrap();
        let result = decl.replace(&version("1.0.0"));
        assert!(matches!(result, Err(DeclarationError::NoMatch(_))));
    }

    #[test]
    fn test_pattern_missing_file() {
        let decl =
            PatternDeclaration::from_variable("/nonexistent/version.py", "__version__").unwrap();
        let result = decl.replace(&version("1.0.0"));
        assert!(matches!(result, Err(DeclarationError::NotFound(_))));
    }

    #[test]
    fn test_pattern_rejects_missing_version_group() {
        let result = PatternDeclaration::new("x.txt", r"version = .+");
        assert!(matches!(result, Err(DeclarationError::InvalidPattern(_))));
    }

    #[test]
    fn test_toml_replace_preserves_formatting() {
        let mut file = NamedTempFile::new().unwrap();
        write!(
            file,
            "# package manifest\n[package]\nname = \"demo\"   # inline comment\nversion = \"1.0.0\"\n"
        )
        .unwrap();

        let decl = TomlDeclaration::new(file.path(), "package.version");
        decl.replace(&version("1.1.0")).unwrap();

        let content = fs::read_to_string(file.path()).unwrap();
        assert!(content.contains("# package manifest"));
        assert!(content.contains("# inline comment"));
        assert!(content.contains("version = \"1.1.0\""));
    }

    #[test]
    fn test_toml_key_not_found() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "[package]\nname = \"demo\"").unwrap();

        let decl = TomlDeclaration::new(file.path(), "package.version");
        let result = decl.replace(&version("1.0.0"));
        assert!(matches!(result, Err(DeclarationError::KeyNotFound { .. })));
    }

    #[test]
    fn test_toml_parse_error() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "not [ valid toml").unwrap();

        let decl = TomlDeclaration::new(file.path(), "package.version");
        let result = decl.replace(&version("1.0.0"));
        assert!(matches!(result, Err(DeclarationError::TomlParse { .. })));
    }

    #[test]
    fn test_declaration_enum_dispatch() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "[package]\nversion = \"0.1.0\"").unwrap();

        let decl = Declaration::Toml(TomlDeclaration::new(file.path(), "package.version"));
        assert_eq!(decl.path(), file.path());
        decl.replace(&version("0.2.0")).unwrap();

        let content = fs::read_to_string(file.path()).unwrap();
        assert!(content.contains("version = \"0.2.0\""));
    }
}
