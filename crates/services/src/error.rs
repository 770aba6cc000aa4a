//! Shared error types for the services crate.

use thiserror::Error;

use quiz_core::session::SessionError;
use storage::DatasetError;

/// Errors emitted while resolving the remote data source configuration.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ConfigError {
    #[error("QUIZ_SHEET_ID is not set")]
    MissingSheetId,
    #[error("invalid sheets base url: {0}")]
    InvalidBaseUrl(#[from] url::ParseError),
    #[error("sheets base url cannot carry a path: {0}")]
    CannotBeABase(String),
}

/// Errors emitted by `QuizService`.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum QuizError {
    #[error(transparent)]
    Dataset(#[from] DatasetError),
    #[error(transparent)]
    Session(#[from] SessionError),
}

impl QuizError {
    /// True when a newer selection replaced the one that produced this error.
    #[must_use]
    pub fn is_superseded(&self) -> bool {
        matches!(
            self,
            QuizError::Session(SessionError::StaleSelection { .. })
        )
    }
}
