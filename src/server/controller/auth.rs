use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};

use crate::{
    model::{
        api::{ErrorDto, MessageDto},
        auth::{ChangePasswordDto, LoginDto, LoginResponseDto},
        user::UserDto,
    },
    server::{
        error::Error,
        model::{app::AppState, principal::Principal},
        service::user::UserService,
    },
};

pub static AUTH_TAG: &str = "auth";

/// Exchange username and password for a bearer token
///
/// The token has the form `<username>:<user id>` and goes in `Authorization: Bearer <token>`.
#[utoipa::path(
    post,
    path = "/api/auth/login",
    tag = AUTH_TAG,
    request_body = LoginDto,
    responses(
        (status = 200, description = "Logged in", body = LoginResponseDto),
        (status = 401, description = "Incorrect username or password, or inactive account", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn login(
    State(state): State<AppState>,
    Json(credentials): Json<LoginDto>,
) -> Result<impl IntoResponse, Error> {
    let response = UserService::new(&state.db).login(credentials).await?;

    Ok((StatusCode::OK, Json(response)))
}

/// Log out
///
/// Tokens are stateless, so this only acknowledges the request.
#[utoipa::path(
    post,
    path = "/api/auth/logout",
    tag = AUTH_TAG,
    responses(
        (status = 200, description = "Logged out", body = MessageDto),
        (status = 401, description = "Not authenticated", body = ErrorDto)
    ),
)]
pub async fn logout(principal: Principal) -> Result<impl IntoResponse, Error> {
    tracing::debug!("User ID {} logged out", principal.user_id);

    Ok((StatusCode::OK, Json(MessageDto::new("Successfully logged out"))))
}

/// Get the authenticated user
#[utoipa::path(
    get,
    path = "/api/auth/me",
    tag = AUTH_TAG,
    responses(
        (status = 200, description = "Authenticated user", body = UserDto),
        (status = 401, description = "Not authenticated", body = ErrorDto),
        (status = 403, description = "Account inactive", body = ErrorDto)
    ),
)]
pub async fn me(
    State(state): State<AppState>,
    principal: Principal,
) -> Result<impl IntoResponse, Error> {
    let user = UserService::new(&state.db).get(principal.user_id).await?;

    Ok((StatusCode::OK, Json(user)))
}

/// Change the authenticated user's password
#[utoipa::path(
    put,
    path = "/api/auth/password",
    tag = AUTH_TAG,
    request_body = ChangePasswordDto,
    responses(
        (status = 200, description = "Password changed", body = MessageDto),
        (status = 400, description = "Old password incorrect or new password empty", body = ErrorDto),
        (status = 401, description = "Not authenticated", body = ErrorDto)
    ),
)]
pub async fn change_password(
    State(state): State<AppState>,
    principal: Principal,
    Json(body): Json<ChangePasswordDto>,
) -> Result<impl IntoResponse, Error> {
    UserService::new(&state.db)
        .change_password(principal.user_id, &body.old_password, &body.new_password)
        .await?;

    Ok((StatusCode::OK, Json(MessageDto::new("Password changed"))))
}
