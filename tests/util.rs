//! Assertion helpers shared by the integration tests.

use registrar::server::error::{auth::AuthError, domain::DomainError, Error};

/// Unwraps the domain failure of an operation, panicking on any other outcome
pub fn domain_error<T: std::fmt::Debug>(result: Result<T, Error>) -> DomainError {
    match result {
        Err(Error::DomainError(e)) => e,
        other => panic!("expected a domain error, got {:?}", other),
    }
}

/// Unwraps the authentication failure of an operation, panicking on any other outcome
pub fn auth_error<T: std::fmt::Debug>(result: Result<T, Error>) -> AuthError {
    match result {
        Err(Error::AuthError(e)) => e,
        other => panic!("expected an auth error, got {:?}", other),
    }
}
