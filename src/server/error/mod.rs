//! Error types for the registrar server.
//!
//! Each concern gets its own `thiserror` enum (authentication, configuration, domain rules)
//! which is aggregated into [`Error`]. Every error implements `IntoResponse` so handlers can
//! return `Result<impl IntoResponse, Error>` and propagate with `?`.

pub mod auth;
pub mod config;
pub mod domain;

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use thiserror::Error;

use crate::{
    model::api::ErrorDto,
    server::error::{auth::AuthError, config::ConfigError, domain::DomainError},
};

/// Main error type for the registrar server.
///
/// Domain and authentication failures carry their own HTTP mapping; everything else is
/// treated as an internal failure and rendered as a generic 500 response.
#[derive(Error, Debug)]
pub enum Error {
    /// Configuration error (missing or invalid environment variables).
    #[error(transparent)]
    ConfigError(#[from] ConfigError),
    /// Authentication or authorization failure.
    #[error(transparent)]
    AuthError(#[from] AuthError),
    /// Expected business failure (not found, invalid input, conflicts).
    #[error(transparent)]
    DomainError(#[from] DomainError),
    /// Internal error indicating a bug or an unexpected state.
    #[error("Internal error: {0}")]
    InternalError(String),
    /// Database error (query failures, connection issues, constraint violations).
    #[error(transparent)]
    DbErr(#[from] sea_orm::DbErr),
    /// JSON (de)serialization of a stored document failed.
    #[error(transparent)]
    JsonError(#[from] serde_json::Error),
    /// I/O error while binding, serving or storing uploaded files.
    #[error(transparent)]
    IoError(#[from] std::io::Error),
}

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        match self {
            Self::ConfigError(err) => err.into_response(),
            Self::AuthError(err) => err.into_response(),
            Self::DomainError(err) => err.into_response(),
            err => InternalServerError(err).into_response(),
        }
    }
}

/// Wrapper type for converting any displayable error into a 500 Internal Server Error response.
///
/// Logs the error message and returns a generic body so that implementation details are not
/// leaked to the client.
pub struct InternalServerError<E>(pub E);

impl<E: std::fmt::Display> IntoResponse for InternalServerError<E> {
    fn into_response(self) -> Response {
        tracing::error!("{}", self.0);

        (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(ErrorDto {
                error: "Internal server error".to_string(),
            }),
        )
            .into_response()
    }
}
