use axum::{
    extract::FromRequestParts,
    http::{header::AUTHORIZATION, request::Parts, HeaderMap},
};

use crate::server::{
    data::user::UserRepository,
    error::{auth::AuthError, Error},
    model::{app::AppState, principal::Principal},
};

/// Resolves the caller from the `Authorization: Bearer <username>:<id>` header
///
/// # Returns
/// - `Ok(Principal)` - Token names an existing, active user
/// - `Err(AuthError::MissingCredentials)` - Header missing, not a bearer token, or malformed
/// - `Err(AuthError::InvalidToken)` - No user with that ID, or the username does not match
/// - `Err(AuthError::InactiveUser)` - The user is frozen
pub async fn resolve_principal(state: &AppState, headers: &HeaderMap) -> Result<Principal, Error> {
    let token = headers
        .get(AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.strip_prefix("Bearer "))
        .ok_or(AuthError::MissingCredentials)?;

    let (username, user_id) =
        Principal::parse_token(token.trim()).ok_or(AuthError::MissingCredentials)?;

    let user = UserRepository::new(&state.db)
        .get(user_id)
        .await?
        .filter(|user| user.username == username)
        .ok_or(AuthError::InvalidToken)?;

    if !user.is_active {
        return Err(AuthError::InactiveUser(user.id).into());
    }

    Ok(Principal::new(&user))
}

impl FromRequestParts<AppState> for Principal {
    type Rejection = Error;

    async fn from_request_parts(parts: &mut Parts, state: &AppState) -> Result<Self, Self::Rejection> {
        resolve_principal(state, &parts.headers).await
    }
}
