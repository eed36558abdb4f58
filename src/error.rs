//! Error type shared by the index, the readers and the configuration.

use thiserror::Error;

/// Errors that can occur while building or configuring a database
#[derive(Error, Debug)]
pub enum Error {
    /// The underlying reader failed
    #[error("failed to read database: {0}")]
    Io(#[from] std::io::Error),

    /// A search configuration value is out of range
    #[error("invalid search configuration: {0}")]
    InvalidConfig(String),
}

pub type Result<T> = std::result::Result<T, Error>;
