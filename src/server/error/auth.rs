use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use entity::user::UserRole;
use thiserror::Error;

use crate::model::api::ErrorDto;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum AuthError {
    #[error("Missing or malformed bearer token")]
    MissingCredentials,
    #[error("Bearer token does not match any user")]
    InvalidToken,
    #[error("Incorrect username or password")]
    InvalidCredentials,
    #[error("User ID {0} is inactive")]
    InactiveUser(i32),
    #[error("Role {role:?} lacks the required privileges")]
    InsufficientRole { role: UserRole },
    #[error("Student ID {student_id} is not enrolled in course ID {course_id}")]
    NotEnrolled { student_id: i32, course_id: i32 },
}

impl AuthError {
    fn response(status: StatusCode, message: &str) -> Response {
        (
            status,
            Json(ErrorDto {
                error: message.to_string(),
            }),
        )
            .into_response()
    }
}

impl IntoResponse for AuthError {
    fn into_response(self) -> Response {
        tracing::debug!("{}", self);

        match self {
            Self::MissingCredentials => Self::response(StatusCode::UNAUTHORIZED, "Not authenticated"),
            Self::InvalidToken => Self::response(
                StatusCode::UNAUTHORIZED,
                "Invalid authentication credentials",
            ),
            Self::InvalidCredentials => {
                Self::response(StatusCode::UNAUTHORIZED, "Incorrect username or password")
            }
            Self::InactiveUser(_) => {
                Self::response(StatusCode::FORBIDDEN, "User account is inactive")
            }
            Self::InsufficientRole { .. } => {
                Self::response(StatusCode::FORBIDDEN, "Insufficient privileges")
            }
            Self::NotEnrolled { .. } => Self::response(
                StatusCode::FORBIDDEN,
                "You must be enrolled in the course to access this material",
            ),
        }
    }
}
