//! Error types for the forager crate

use thiserror::Error;

/// Main error type for the forager crate
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum Error {
    #[error("invalid variant '{input}'. Expected one of: {expected}")]
    ParseVariant { input: String, expected: String },

    #[error("invalid movement intent '{input}' (expected one of: w, a, s, d, l, r, u, ., q)")]
    ParseIntent { input: String },

    #[error("invalid configuration: {message}")]
    InvalidConfiguration { message: String },

    #[error("failed to {operation}: {source}")]
    Io {
        operation: String,
        #[source]
        source: std::io::Error,
    },

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("progress bar template error: {message}")]
    ProgressBarTemplate { message: String },
}

/// Convenience type alias for Results using the crate's Error type
pub type Result<T> = std::result::Result<T, Error>;

impl From<std::io::Error> for Error {
    fn from(source: std::io::Error) -> Self {
        Error::Io {
            operation: "IO operation".to_string(),
            source,
        }
    }
}
