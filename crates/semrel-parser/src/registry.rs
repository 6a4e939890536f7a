//! Parser resolution by name.

use std::collections::HashMap;

use tracing::debug;

use crate::{
    AngularParser, CommitParser, EmojiParser, ParserError, ParserResult, ScipyParser, TagParser,
};

/// Builds a parser from its configuration options table.
pub type ParserFactory =
    Box<dyn Fn(&toml::Table) -> ParserResult<Box<dyn CommitParser>> + Send + Sync>;

/// Resolves commit parsers by name.
///
/// The built-in names are `angular`, `emoji`, `scipy` and `tag`; embedders
/// extend the convention set by registering further factories. Resolving an
/// unregistered name is a configuration error.
pub struct ParserRegistry {
    factories: HashMap<String, ParserFactory>,
}

fn options_from<T: serde::de::DeserializeOwned>(name: &str, table: &toml::Table) -> ParserResult<T> {
    toml::Value::Table(table.clone())
        .try_into()
        .map_err(|err| ParserError::InvalidOptions {
            name: name.to_string(),
            reason: err.to_string(),
        })
}

impl ParserRegistry {
    /// Creates a registry with the built-in parsers registered.
    #[must_use]
    pub fn with_builtins() -> Self {
        let mut registry = Self {
            factories: HashMap::new(),
        };

        registry.register("angular", |table| {
            let parser = AngularParser::new(options_from("angular", table)?)?;
            Ok(Box::new(parser) as Box<dyn CommitParser>)
        });
        registry.register("emoji", |table| {
            let parser = EmojiParser::new(options_from("emoji", table)?);
            Ok(Box::new(parser) as Box<dyn CommitParser>)
        });
        registry.register("scipy", |table| {
            let parser = ScipyParser::new(options_from("scipy", table)?)?;
            Ok(Box::new(parser) as Box<dyn CommitParser>)
        });
        registry.register("tag", |table| {
            let parser = TagParser::new(options_from("tag", table)?);
            Ok(Box::new(parser) as Box<dyn CommitParser>)
        });

        registry
    }

    /// Registers a parser factory under a name, replacing any previous one.
    pub fn register<F>(&mut self, name: impl Into<String>, factory: F)
    where
        F: Fn(&toml::Table) -> ParserResult<Box<dyn CommitParser>> + Send + Sync + 'static,
    {
        self.factories.insert(name.into(), Box::new(factory));
    }

    /// Builds the named parser with the given options table.
    ///
    /// # Errors
    ///
    /// Returns [`ParserError::UnknownParser`] for unregistered names and
    /// [`ParserError::InvalidOptions`] when the options don't fit.
    pub fn resolve(
        &self,
        name: &str,
        options: &toml::Table,
    ) -> ParserResult<Box<dyn CommitParser>> {
        let factory = self
            .factories
            .get(name)
            .ok_or_else(|| ParserError::UnknownParser(name.to_string()))?;
        debug!(parser = name, "building commit parser");
        factory(options)
    }

    /// The registered parser names, sorted.
    #[must_use]
    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.factories.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }
}

impl Default for ParserRegistry {
    fn default() -> Self {
        Self::with_builtins()
    }
}
