use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use thiserror::Error;

use crate::model::api::ErrorDto;

/// Expected failures of business operations.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum DomainError {
    /// The named resource does not exist, e.g. `NotFound("course")`
    #[error("{0} not found")]
    NotFound(&'static str),
    #[error("{0}")]
    InvalidArgument(String),
    #[error("{0}")]
    InvalidState(String),
    #[error("{0}")]
    Conflict(String),
    /// A unique field is already taken, e.g. `AlreadyExists("username")`
    #[error("{0} already exists")]
    AlreadyExists(String),
}

impl DomainError {
    pub fn invalid_argument(msg: impl Into<String>) -> Self {
        Self::InvalidArgument(msg.into())
    }

    pub fn invalid_state(msg: impl Into<String>) -> Self {
        Self::InvalidState(msg.into())
    }

    pub fn conflict(msg: impl Into<String>) -> Self {
        Self::Conflict(msg.into())
    }

    pub fn already_exists(field: impl Into<String>) -> Self {
        Self::AlreadyExists(field.into())
    }

    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::InvalidArgument(_) => StatusCode::BAD_REQUEST,
            Self::InvalidState(_) | Self::Conflict(_) | Self::AlreadyExists(_) => {
                StatusCode::CONFLICT
            }
        }
    }
}

impl IntoResponse for DomainError {
    fn into_response(self) -> Response {
        tracing::debug!("{}", self);

        (
            self.status_code(),
            Json(ErrorDto {
                error: self.to_string(),
            }),
        )
            .into_response()
    }
}
