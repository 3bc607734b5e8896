//! Error types for castgender-core.

use thiserror::Error;

/// Result type for castgender-core operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Error type for castgender-core operations.
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum Error {
    /// Invalid input provided.
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Parse error.
    #[error("Parse error: {0}")]
    Parse(String),

    /// Name score table construction error.
    #[error("Table error: {0}")]
    Table(String),
}

impl Error {
    /// Create an invalid input error.
    #[must_use]
    pub fn invalid_input(msg: impl Into<String>) -> Self {
        Self::InvalidInput(msg.into())
    }

    /// Create a parse error.
    #[must_use]
    pub fn parse(msg: impl Into<String>) -> Self {
        Self::Parse(msg.into())
    }

    /// Create a table error.
    #[must_use]
    pub fn table(msg: impl Into<String>) -> Self {
        Self::Table(msg.into())
    }
}
