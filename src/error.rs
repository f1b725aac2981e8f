//! Centralized error types for mailquery.

use std::path::PathBuf;
use thiserror::Error;

use crate::i18n;

/// All errors produced by the mailquery library.
#[derive(Error, Debug)]
pub enum MailError {
    /// The request never produced a usable envelope: connection failure,
    /// timeout, or a body that is not the expected JSON.
    #[error("Network error: {0}")]
    Network(String),

    /// The backend answered with `success: false`.
    #[error("{0}")]
    Rejected(String),

    /// I/O error on a local file, with its path.
    #[error("I/O error on '{path}': {source}")]
    Storage {
        path: PathBuf,
        source: std::io::Error,
    },

    /// Persisted data could not be decoded.
    #[error("Corrupt stored data: {0}")]
    Corrupt(String),

    /// Invalid configuration value.
    #[error("Configuration error: {0}")]
    Config(String),
}

/// Convenience alias for `Result<T, MailError>`.
pub type Result<T> = std::result::Result<T, MailError>;

impl MailError {
    /// Create a `Storage` variant from a path and an `io::Error`.
    pub fn storage(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Storage {
            path: path.into(),
            source,
        }
    }

    /// Text suitable for the error banner.
    ///
    /// Transport failures collapse into the generic localized message, so
    /// the user never sees reqwest internals. Rejections keep the server text.
    pub fn user_message(&self) -> String {
        match self {
            Self::Rejected(msg) => msg.clone(),
            Self::Network(_) => i18n::err_network().to_string(),
            other => other.to_string(),
        }
    }
}

impl From<reqwest::Error> for MailError {
    fn from(e: reqwest::Error) -> Self {
        Self::Network(e.to_string())
    }
}
