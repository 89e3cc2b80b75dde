use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};

use crate::{
    model::{
        api::{ErrorDto, MessageDto},
        course::CourseDto,
        teacher::{CreateTeacherDto, TeacherDto, TeacherListParams, UpdateTeacherDto},
    },
    server::{
        error::Error,
        model::{app::AppState, principal::Principal},
        service::teacher::TeacherService,
    },
};

pub static TEACHER_TAG: &str = "teacher";

/// Create a teacher together with their user account
#[utoipa::path(
    post,
    path = "/api/teachers",
    tag = TEACHER_TAG,
    request_body = CreateTeacherDto,
    responses(
        (status = 201, description = "Teacher created", body = TeacherDto),
        (status = 403, description = "Admin only", body = ErrorDto),
        (status = 409, description = "Username, email or employee number already exists", body = ErrorDto)
    ),
)]
pub async fn create_teacher(
    State(state): State<AppState>,
    principal: Principal,
    Json(body): Json<CreateTeacherDto>,
) -> Result<impl IntoResponse, Error> {
    principal.require_admin()?;

    let teacher = TeacherService::new(&state.db).create(body).await?;

    Ok((StatusCode::CREATED, Json(teacher)))
}

/// List teachers
#[utoipa::path(
    get,
    path = "/api/teachers",
    tag = TEACHER_TAG,
    params(TeacherListParams),
    responses(
        (status = 200, description = "Teachers ordered by ID", body = Vec<TeacherDto>),
        (status = 401, description = "Not authenticated", body = ErrorDto)
    ),
)]
pub async fn list_teachers(
    State(state): State<AppState>,
    _principal: Principal,
    Query(params): Query<TeacherListParams>,
) -> Result<impl IntoResponse, Error> {
    let teachers = TeacherService::new(&state.db).list(params).await?;

    Ok((StatusCode::OK, Json(teachers)))
}

/// Get the teacher profile of the authenticated user
#[utoipa::path(
    get,
    path = "/api/teachers/me",
    tag = TEACHER_TAG,
    responses(
        (status = 200, description = "Own teacher profile", body = TeacherDto),
        (status = 404, description = "Authenticated user has no teacher profile", body = ErrorDto)
    ),
)]
pub async fn get_own_teacher(
    State(state): State<AppState>,
    principal: Principal,
) -> Result<impl IntoResponse, Error> {
    let teacher = TeacherService::new(&state.db)
        .get_by_user(principal.user_id)
        .await?;

    Ok((StatusCode::OK, Json(teacher)))
}

/// Get a teacher
#[utoipa::path(
    get,
    path = "/api/teachers/{teacher_id}",
    tag = TEACHER_TAG,
    params(("teacher_id" = i32, Path, description = "Teacher ID")),
    responses(
        (status = 200, description = "Teacher found", body = TeacherDto),
        (status = 404, description = "Teacher not found", body = ErrorDto)
    ),
)]
pub async fn get_teacher(
    State(state): State<AppState>,
    _principal: Principal,
    Path(teacher_id): Path<i32>,
) -> Result<impl IntoResponse, Error> {
    let teacher = TeacherService::new(&state.db).get(teacher_id).await?;

    Ok((StatusCode::OK, Json(teacher)))
}

/// Get a teacher by employee number
#[utoipa::path(
    get,
    path = "/api/teachers/number/{employee_number}",
    tag = TEACHER_TAG,
    params(("employee_number" = String, Path, description = "Employee number")),
    responses(
        (status = 200, description = "Teacher found", body = TeacherDto),
        (status = 404, description = "Teacher not found", body = ErrorDto)
    ),
)]
pub async fn get_teacher_by_employee_number(
    State(state): State<AppState>,
    _principal: Principal,
    Path(employee_number): Path<String>,
) -> Result<impl IntoResponse, Error> {
    let teacher = TeacherService::new(&state.db)
        .get_by_employee_number(&employee_number)
        .await?;

    Ok((StatusCode::OK, Json(teacher)))
}

/// Update a teacher
#[utoipa::path(
    put,
    path = "/api/teachers/{teacher_id}",
    tag = TEACHER_TAG,
    params(("teacher_id" = i32, Path, description = "Teacher ID")),
    request_body = UpdateTeacherDto,
    responses(
        (status = 200, description = "Teacher updated", body = TeacherDto),
        (status = 403, description = "Admin only", body = ErrorDto),
        (status = 404, description = "Teacher not found", body = ErrorDto)
    ),
)]
pub async fn update_teacher(
    State(state): State<AppState>,
    principal: Principal,
    Path(teacher_id): Path<i32>,
    Json(body): Json<UpdateTeacherDto>,
) -> Result<impl IntoResponse, Error> {
    principal.require_admin()?;

    let teacher = TeacherService::new(&state.db).update(teacher_id, body).await?;

    Ok((StatusCode::OK, Json(teacher)))
}

/// Delete a teacher with their courses and user
#[utoipa::path(
    delete,
    path = "/api/teachers/{teacher_id}",
    tag = TEACHER_TAG,
    params(("teacher_id" = i32, Path, description = "Teacher ID")),
    responses(
        (status = 200, description = "Teacher deleted", body = MessageDto),
        (status = 403, description = "Admin only", body = ErrorDto),
        (status = 404, description = "Teacher not found", body = ErrorDto)
    ),
)]
pub async fn delete_teacher(
    State(state): State<AppState>,
    principal: Principal,
    Path(teacher_id): Path<i32>,
) -> Result<impl IntoResponse, Error> {
    principal.require_admin()?;

    TeacherService::new(&state.db).delete(teacher_id).await?;

    Ok((StatusCode::OK, Json(MessageDto::new("Teacher deleted"))))
}

/// Courses taught by a teacher
#[utoipa::path(
    get,
    path = "/api/teachers/{teacher_id}/courses",
    tag = TEACHER_TAG,
    params(("teacher_id" = i32, Path, description = "Teacher ID")),
    responses(
        (status = 200, description = "Courses of the teacher", body = Vec<CourseDto>),
        (status = 404, description = "Teacher not found", body = ErrorDto)
    ),
)]
pub async fn get_teacher_courses(
    State(state): State<AppState>,
    _principal: Principal,
    Path(teacher_id): Path<i32>,
) -> Result<impl IntoResponse, Error> {
    let courses = TeacherService::new(&state.db).courses(teacher_id).await?;

    Ok((StatusCode::OK, Json(courses)))
}
