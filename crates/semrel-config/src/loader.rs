//! Configuration loading.

use std::fs;
use std::path::Path;

use tracing::{debug, info};

use crate::{Config, ConfigError, ConfigResult};

/// Default configuration file name, looked up at the repository root.
pub const DEFAULT_CONFIG_FILE: &str = "semrel.toml";

impl Config {
    /// Loads configuration from an explicit file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file is missing, unreadable, or invalid.
    pub fn load(path: impl AsRef<Path>) -> ConfigResult<Self> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(ConfigError::NotFound(path.display().to_string()));
        }

        let content = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.display().to_string(),
            source,
        })?;

        let config = toml::from_str(&content).map_err(|err| ConfigError::Parse {
            path: path.display().to_string(),
            reason: err.to_string(),
        })?;

        debug!(path = %path.display(), "loaded configuration");
        Ok(config)
    }

    /// Loads `semrel.toml` from the given directory, falling back to the
    /// built-in defaults when the file does not exist.
    ///
    /// # Errors
    ///
    /// Returns an error if the file exists but is unreadable or invalid.
    pub fn load_or_default(dir: impl AsRef<Path>) -> ConfigResult<Self> {
        let path = dir.as_ref().join(DEFAULT_CONFIG_FILE);
        if path.exists() {
            Self::load(path)
        } else {
            info!("no configuration file found, using defaults");
            Ok(Self::default())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::TempDir;

    #[test]
    fn test_load_missing_file() {
        let result = Config::load("/nonexistent/semrel.toml");
        assert!(matches!(result, Err(ConfigError::NotFound(_))));
    }

    #[test]
    fn test_load_valid_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join(DEFAULT_CONFIG_FILE);
        let mut file = fs::File::create(&path).unwrap();
        writeln!(file, "commit_parser = \"tag\"").unwrap();

        let config = Config::load(&path).unwrap();
        assert_eq!(config.commit_parser, "tag");
    }

    #[test]
    fn test_load_invalid_toml() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join(DEFAULT_CONFIG_FILE);
        let mut file = fs::File::create(&path).unwrap();
        writeln!(file, "this is not toml [").unwrap();

        let result = Config::load(&path);
        assert!(matches!(result, Err(ConfigError::Parse { .. })));
    }

    #[test]
    fn test_load_or_default_without_file() {
        let dir = TempDir::new().unwrap();
        let config = Config::load_or_default(dir.path()).unwrap();
        assert_eq!(config.commit_parser, "angular");
    }

    #[test]
    fn test_load_or_default_with_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join(DEFAULT_CONFIG_FILE);
        let mut file = fs::File::create(&path).unwrap();
        writeln!(file, "tag_format = \"release-{{version}}\"").unwrap();

        let config = Config::load_or_default(dir.path()).unwrap();
        assert_eq!(config.tag_format, "release-{version}");
    }
}
