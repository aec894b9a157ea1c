//! Error types for Gati

use thiserror::Error;

/// Gati error type
#[derive(Error, Debug)]
pub enum Error {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse configuration: {0}")]
    ConfigParse(String),

    #[error("Failed to write configuration: {0}")]
    ConfigWrite(String),

    #[error("Invalid scan: {0}")]
    InvalidScan(&'static str),
}

impl From<toml::de::Error> for Error {
    fn from(e: toml::de::Error) -> Self {
        Error::ConfigParse(e.to_string())
    }
}

impl From<toml::ser::Error> for Error {
    fn from(e: toml::ser::Error) -> Self {
        Error::ConfigWrite(e.to_string())
    }
}

pub type Result<T> = std::result::Result<T, Error>;
