use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use thiserror::Error;
use tracing::warn;

use crate::views::{ErrorPage, NotFoundPage};

#[derive(Error, Debug, PartialEq, Eq)]
pub enum AppError {
    #[error("User already exists")]
    DuplicateUser,

    #[error("Invalid username or password")]
    InvalidCredentials,

    #[error("Promo code not found")]
    NotFound,

    #[error("You do not have permission to modify this promo code")]
    Forbidden,

    #[error("Internal error: {0}")]
    Internal(String),
}

impl AppError {
    pub fn internal<E: std::fmt::Display>(error: E) -> AppError {
        warn!("internal error: {}", error);
        AppError::Internal(error.to_string())
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        match self {
            AppError::NotFound => {
                (StatusCode::NOT_FOUND, NotFoundPage { username: None }).into_response()
            }
            AppError::Internal(msg) => (StatusCode::INTERNAL_SERVER_ERROR, msg).into_response(),
            // Ownership violations keep the original behavior: a plain error
            // page with a 200 status, not a 403.
            other => ErrorPage {
                username: None,
                message: other.to_string(),
            }
            .into_response(),
        }
    }
}
