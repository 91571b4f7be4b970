//! Error type for the value layer.
//!
//! `city-sim` wraps `CoreError` as one variant of its own `SimError`; output
//! and CLI code convert it through `From`.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum CoreError {
    #[error("configuration error: {0}")]
    Config(String),

    #[error("parse error: {0}")]
    Parse(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[cfg(feature = "serde")]
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Shorthand result type for `city-core`.
pub type CoreResult<T> = Result<T, CoreError>;
