//! Configuration management for semrel.
//!
//! Configuration is a TOML file (`semrel.toml` by default). String values
//! that tend to carry secrets or deployment-specific data can be written
//! as environment descriptors and are resolved at runtime with the
//! precedence `env` → `default_env` → `default`.

mod env;
mod error;
mod loader;
mod schema;

pub use env::{EnvConfigVar, MaybeFromEnv};
pub use error::{ConfigError, ConfigResult};
pub use loader::DEFAULT_CONFIG_FILE;
pub use schema::{BranchConfig, ChangelogConfig, Config, RemoteConfig};
