//! Query parsing errors.

use thiserror::Error;

/// A raw query string that is not well-formed `key=value&...` syntax.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum QueryError {
    #[error("invalid URL escape {0:?}")]
    InvalidEscape(String),

    #[error("invalid semicolon separator in query")]
    InvalidSemicolon,
}
