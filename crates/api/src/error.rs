use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use quiz_core::model::UserIdError;
use quiz_core::session::SessionError;
use services::QuizError;
use storage::DatasetError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorCode {
    InvalidUser,
    DataUnavailable,
    Schema,
    Superseded,
    NoUserSelected,
    Internal,
}

impl ErrorCode {
    #[must_use]
    pub fn status(self) -> StatusCode {
        match self {
            ErrorCode::InvalidUser => StatusCode::BAD_REQUEST,
            ErrorCode::DataUnavailable => StatusCode::BAD_GATEWAY,
            ErrorCode::Schema => StatusCode::UNPROCESSABLE_ENTITY,
            ErrorCode::Superseded | ErrorCode::NoUserSelected => StatusCode::CONFLICT,
            ErrorCode::Internal => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

/// JSON error body returned by every failing route.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Error)]
#[error("{code:?}: {message}")]
pub struct ApiError {
    pub code: ErrorCode,
    pub message: String,
}

impl ApiError {
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
        }
    }
}

impl From<UserIdError> for ApiError {
    fn from(value: UserIdError) -> Self {
        Self::new(ErrorCode::InvalidUser, value.to_string())
    }
}

impl From<QuizError> for ApiError {
    fn from(value: QuizError) -> Self {
        let code = match &value {
            QuizError::Dataset(DatasetError::Unavailable(_)) => ErrorCode::DataUnavailable,
            QuizError::Dataset(_) => ErrorCode::Schema,
            QuizError::Session(SessionError::StaleSelection { .. }) => ErrorCode::Superseded,
            QuizError::Session(SessionError::NoUserSelected) => ErrorCode::NoUserSelected,
            _ => ErrorCode::Internal,
        };
        Self::new(code, value.to_string())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.code.status(), Json(self)).into_response()
    }
}
