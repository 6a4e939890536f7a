//! Parser construction errors.

use thiserror::Error;

/// Errors raised while building a parser from configuration.
///
/// These are configuration failures and fatal; parse failures of individual
/// commits are carried inside [`semrel_commit::ParseResult`] instead.
#[derive(Debug, Error)]
pub enum ParserError {
    /// No parser registered under the requested name.
    #[error("unknown commit parser: {0:?}")]
    UnknownParser(String),

    /// The options table does not fit the parser.
    #[error("invalid options for parser {name:?}: {reason}")]
    InvalidOptions { name: String, reason: String },
}

/// Result type for parser construction.
pub type ParserResult<T> = Result<T, ParserError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unknown_parser_display() {
        let err = ParserError::UnknownParser("custom".to_string());
        assert_eq!(err.to_string(), "unknown commit parser: \"custom\"");
    }

    #[test]
    fn test_invalid_options_display() {
        let err = ParserError::InvalidOptions {
            name: "angular".to_string(),
            reason: "allowed_tags must not be empty".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "invalid options for parser \"angular\": allowed_tags must not be empty"
        );
    }
}
