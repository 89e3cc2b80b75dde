use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};

use crate::{
    model::{
        api::{ErrorDto, ImportResultDto},
        user::{CreateUserDto, UpdateUserDto, UserDto, UserListParams},
    },
    server::{
        error::Error,
        model::{app::AppState, principal::Principal},
        service::{import::ImportService, user::UserService},
    },
};

pub static USER_TAG: &str = "user";

/// List users
#[utoipa::path(
    get,
    path = "/api/admin/users",
    tag = USER_TAG,
    params(UserListParams),
    responses(
        (status = 200, description = "Users ordered by ID", body = Vec<UserDto>),
        (status = 401, description = "Not authenticated", body = ErrorDto),
        (status = 403, description = "Admin only", body = ErrorDto)
    ),
)]
pub async fn list_users(
    State(state): State<AppState>,
    principal: Principal,
    Query(params): Query<UserListParams>,
) -> Result<impl IntoResponse, Error> {
    principal.require_admin()?;

    let users = UserService::new(&state.db).list(params).await?;

    Ok((StatusCode::OK, Json(users)))
}

/// Create a user
#[utoipa::path(
    post,
    path = "/api/admin/users",
    tag = USER_TAG,
    request_body = CreateUserDto,
    responses(
        (status = 201, description = "User created", body = UserDto),
        (status = 400, description = "Empty username, email or password", body = ErrorDto),
        (status = 403, description = "Admin only", body = ErrorDto),
        (status = 409, description = "Username or email already exists", body = ErrorDto)
    ),
)]
pub async fn create_user(
    State(state): State<AppState>,
    principal: Principal,
    Json(body): Json<CreateUserDto>,
) -> Result<impl IntoResponse, Error> {
    principal.require_admin()?;

    let user = UserService::new(&state.db).create(body).await?;

    Ok((StatusCode::CREATED, Json(user)))
}

/// Update a user
#[utoipa::path(
    put,
    path = "/api/admin/users/{user_id}",
    tag = USER_TAG,
    params(("user_id" = i32, Path, description = "User ID")),
    request_body = UpdateUserDto,
    responses(
        (status = 200, description = "User updated", body = UserDto),
        (status = 403, description = "Admin only", body = ErrorDto),
        (status = 404, description = "User not found", body = ErrorDto),
        (status = 409, description = "Username or email already exists", body = ErrorDto)
    ),
)]
pub async fn update_user(
    State(state): State<AppState>,
    principal: Principal,
    Path(user_id): Path<i32>,
    Json(body): Json<UpdateUserDto>,
) -> Result<impl IntoResponse, Error> {
    principal.require_admin()?;

    let user = UserService::new(&state.db).update(user_id, body).await?;

    Ok((StatusCode::OK, Json(user)))
}

/// Freeze a user account
#[utoipa::path(
    post,
    path = "/api/admin/users/{user_id}/freeze",
    tag = USER_TAG,
    params(("user_id" = i32, Path, description = "User ID")),
    responses(
        (status = 200, description = "User frozen", body = UserDto),
        (status = 403, description = "Admin only", body = ErrorDto),
        (status = 404, description = "User not found", body = ErrorDto)
    ),
)]
pub async fn freeze_user(
    State(state): State<AppState>,
    principal: Principal,
    Path(user_id): Path<i32>,
) -> Result<impl IntoResponse, Error> {
    principal.require_admin()?;

    let user = UserService::new(&state.db).set_active(user_id, false).await?;

    Ok((StatusCode::OK, Json(user)))
}

/// Unfreeze a user account
#[utoipa::path(
    post,
    path = "/api/admin/users/{user_id}/unfreeze",
    tag = USER_TAG,
    params(("user_id" = i32, Path, description = "User ID")),
    responses(
        (status = 200, description = "User unfrozen", body = UserDto),
        (status = 403, description = "Admin only", body = ErrorDto),
        (status = 404, description = "User not found", body = ErrorDto)
    ),
)]
pub async fn unfreeze_user(
    State(state): State<AppState>,
    principal: Principal,
    Path(user_id): Path<i32>,
) -> Result<impl IntoResponse, Error> {
    principal.require_admin()?;

    let user = UserService::new(&state.db).set_active(user_id, true).await?;

    Ok((StatusCode::OK, Json(user)))
}

/// Import users from CSV
///
/// Columns: `username, email, password, full_name, role`, preceded by a header row.
#[utoipa::path(
    post,
    path = "/api/admin/users/batch",
    tag = USER_TAG,
    request_body(content = String, content_type = "text/csv"),
    responses(
        (status = 200, description = "Per-row import outcome", body = ImportResultDto),
        (status = 403, description = "Admin only", body = ErrorDto)
    ),
)]
pub async fn import_users(
    State(state): State<AppState>,
    principal: Principal,
    body: String,
) -> Result<impl IntoResponse, Error> {
    principal.require_admin()?;

    let result = ImportService::new(&state.db).import_users(&body).await?;

    Ok((StatusCode::OK, Json(result)))
}
