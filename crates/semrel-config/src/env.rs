//! Environment-backed configuration values.

use serde::{Deserialize, Serialize};

/// A value read from the environment at runtime.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct EnvConfigVar {
    /// The primary environment variable.
    pub env: String,

    /// A fallback variable consulted when `env` is unset.
    #[serde(default)]
    pub default_env: Option<String>,

    /// A literal fallback when neither variable is set.
    #[serde(default)]
    pub default: Option<String>,
}

impl EnvConfigVar {
    /// Resolves the value with precedence `env` → `default_env` →
    /// `default`.
    #[must_use]
    pub fn get(&self) -> Option<String> {
        std::env::var(&self.env)
            .ok()
            .or_else(|| {
                self.default_env
                    .as_deref()
                    .and_then(|var| std::env::var(var).ok())
            })
            .or_else(|| self.default.clone())
    }
}

/// A configuration value that is either a literal string or an environment
/// descriptor.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum MaybeFromEnv {
    /// A literal string.
    Literal(String),
    /// Resolved from the environment at runtime.
    Env(EnvConfigVar),
}

impl MaybeFromEnv {
    /// Resolves the value: literals are returned as-is, descriptors go
    /// through [`EnvConfigVar::get`].
    #[must_use]
    pub fn resolve(&self) -> Option<String> {
        match self {
            Self::Literal(value) => Some(value.clone()),
            Self::Env(var) => var.get(),
        }
    }
}
