//! Error types and result aliases.

use std::path::PathBuf;

use thiserror::Error;

/// Failures at the I/O and parsing edges of the profiler.
///
/// Recording and calculation never fail; only loading and saving of
/// timing files, graph definitions and configuration do.
#[derive(Error, Debug)]
pub enum Error {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error in {context}: {error}")]
    Json {
        error: serde_json::Error,
        context: String,
    },

    #[error("TOML parse error in {context}: {error}")]
    Toml {
        error: toml::de::Error,
        context: String,
    },

    #[error("File not found: {0}")]
    FileNotFound(PathBuf),

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
}

impl From<serde_json::Error> for Error {
    fn from(error: serde_json::Error) -> Self {
        Error::Json {
            error,
            context: "build times".to_string(),
        }
    }
}

impl From<toml::de::Error> for Error {
    fn from(error: toml::de::Error) -> Self {
        Error::Toml {
            error,
            context: "buildprof.toml".to_string(),
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;
