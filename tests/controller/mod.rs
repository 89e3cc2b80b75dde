//! Tests for HTTP controller endpoints.
//!
//! Handlers are called directly with extracted arguments, so these tests cover role checks and
//! the mapping of outcomes onto status codes. Bearer token resolution and the assembled router
//! are exercised separately.

mod auth;
mod course;
mod enrollment;
mod material;
mod router;

use axum::{http::StatusCode, response::IntoResponse};
use registrar::server::{error::Error, model::principal::Principal};
use registrar_test_utils::prelude::*;

/// Status code a handler outcome renders to
fn status<T: IntoResponse>(result: Result<T, Error>) -> StatusCode {
    match result {
        Ok(response) => response.into_response().status(),
        Err(e) => e.into_response().status(),
    }
}

fn principal(user: &entity::user::Model) -> Principal {
    Principal::new(user)
}
