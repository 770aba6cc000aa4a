//! HTTP surface of the quiz session.
//!
//! Every route answers with the current `SessionSnapshot`, or an `ApiError`
//! body carrying a `{code, message}` pair.

#![forbid(unsafe_code)]

pub mod error;

use axum::extract::State;
use axum::routing::{get, post};
use axum::{Json, Router};
use serde::{Deserialize, Serialize};
use tracing::warn;

use quiz_core::model::UserId;
use quiz_core::session::SessionSnapshot;
use services::QuizService;

pub use error::{ApiError, ErrorCode};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SelectUserRequest {
    pub user: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InputRequest {
    pub text: String,
}

pub fn state_route() -> &'static str {
    "/api/state"
}

pub fn select_user_route() -> &'static str {
    "/api/select-user"
}

pub fn confirm_route() -> &'static str {
    "/api/confirm"
}

pub fn input_route() -> &'static str {
    "/api/input"
}

pub fn router(quiz: QuizService) -> Router {
    Router::new()
        .route(state_route(), get(http_state))
        .route(select_user_route(), post(http_select_user))
        .route(confirm_route(), post(http_confirm))
        .route(input_route(), post(http_input))
        .with_state(quiz)
}

async fn http_state(State(quiz): State<QuizService>) -> Json<SessionSnapshot> {
    Json(quiz.snapshot())
}

async fn http_select_user(
    State(quiz): State<QuizService>,
    Json(req): Json<SelectUserRequest>,
) -> Result<Json<SessionSnapshot>, ApiError> {
    let user = UserId::new(req.user)?;
    match quiz.select_user(user.clone()).await {
        Ok(snapshot) => Ok(Json(snapshot)),
        Err(err) => {
            let err = ApiError::from(err);
            warn!(%user, code = ?err.code, message = %err.message, "select-user failed");
            Err(err)
        }
    }
}

async fn http_confirm(State(quiz): State<QuizService>) -> Result<Json<SessionSnapshot>, ApiError> {
    Ok(Json(quiz.confirm()?))
}

async fn http_input(
    State(quiz): State<QuizService>,
    Json(req): Json<InputRequest>,
) -> Json<SessionSnapshot> {
    Json(quiz.set_input_text(req.text))
}

#[cfg(test)]
#[path = "tests/router_tests.rs"]
mod tests;
