//! Error types for orm-truncate

use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Database error: {0}")]
    Database(#[from] rusqlite::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Regex error: {0}")]
    Regex(#[from] regex::Error),

    #[error("Invalid target: provide an entity name or request all tables")]
    InvalidTarget,

    #[error("Not an entity: {0}")]
    NotAnEntity(String),

    /// Raised by host-supplied `EntityDiscovery` implementations
    #[error("Discovery error: {0}")]
    Discovery(String),

    /// Raised by host-supplied `SqlConnection` implementations
    #[error("SQL execution error: {0}")]
    Execution(String),
}

pub type Result<T> = std::result::Result<T, Error>;
