use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};

use crate::{
    model::{
        api::{ErrorDto, ImportResultDto},
        course::{CourseDto, CourseListParams},
        system::{
            SetSemesterDto, SystemConfigDto, SystemStatsDto, ToggleEnrollmentDto, UpdateConfigDto,
        },
    },
    server::{
        error::Error,
        model::{app::AppState, principal::Principal},
        service::{course::CourseService, import::ImportService, system::SystemService},
    },
};

pub static ADMIN_TAG: &str = "admin";

/// System-wide counts and the current semester
#[utoipa::path(
    get,
    path = "/api/admin/stats",
    tag = ADMIN_TAG,
    responses(
        (status = 200, description = "System statistics", body = SystemStatsDto),
        (status = 403, description = "Admin only", body = ErrorDto)
    ),
)]
pub async fn get_stats(
    State(state): State<AppState>,
    principal: Principal,
) -> Result<impl IntoResponse, Error> {
    principal.require_admin()?;

    let stats = SystemService::new(&state.db).stats().await?;

    Ok((StatusCode::OK, Json(stats)))
}

/// Runtime settings document and its version
#[utoipa::path(
    get,
    path = "/api/admin/config",
    tag = ADMIN_TAG,
    responses(
        (status = 200, description = "Settings, version 0 until first written", body = SystemConfigDto),
        (status = 403, description = "Admin only", body = ErrorDto)
    ),
)]
pub async fn get_config(
    State(state): State<AppState>,
    principal: Principal,
) -> Result<impl IntoResponse, Error> {
    principal.require_admin()?;

    let config = SystemService::new(&state.db).get_config().await?;

    Ok((StatusCode::OK, Json(config)))
}

/// Merge settings into the runtime document
///
/// Pass `expected_version` to reject the write when someone else changed the document first.
#[utoipa::path(
    put,
    path = "/api/admin/config",
    tag = ADMIN_TAG,
    request_body = UpdateConfigDto,
    responses(
        (status = 200, description = "Settings updated", body = SystemConfigDto),
        (status = 400, description = "Setting has the wrong type", body = ErrorDto),
        (status = 403, description = "Admin only", body = ErrorDto),
        (status = 409, description = "Stored version differs from expected_version", body = ErrorDto)
    ),
)]
pub async fn update_config(
    State(state): State<AppState>,
    principal: Principal,
    Json(body): Json<UpdateConfigDto>,
) -> Result<impl IntoResponse, Error> {
    principal.require_admin()?;

    let config = SystemService::new(&state.db)
        .update_config(body.settings, body.expected_version)
        .await?;

    Ok((StatusCode::OK, Json(config)))
}

#[utoipa::path(
    post,
    path = "/api/admin/semester",
    tag = ADMIN_TAG,
    request_body = SetSemesterDto,
    responses(
        (status = 200, description = "Current semester changed", body = SystemConfigDto),
        (status = 400, description = "Empty semester", body = ErrorDto),
        (status = 403, description = "Admin only", body = ErrorDto)
    ),
)]
pub async fn set_semester(
    State(state): State<AppState>,
    principal: Principal,
    Json(body): Json<SetSemesterDto>,
) -> Result<impl IntoResponse, Error> {
    principal.require_admin()?;

    let config = SystemService::new(&state.db)
        .set_semester(&body.semester)
        .await?;

    Ok((StatusCode::OK, Json(config)))
}

#[utoipa::path(
    post,
    path = "/api/admin/enrollment/toggle",
    tag = ADMIN_TAG,
    request_body = ToggleEnrollmentDto,
    responses(
        (status = 200, description = "Enrollment flag changed", body = SystemConfigDto),
        (status = 403, description = "Admin only", body = ErrorDto)
    ),
)]
pub async fn toggle_enrollment(
    State(state): State<AppState>,
    principal: Principal,
    Json(body): Json<ToggleEnrollmentDto>,
) -> Result<impl IntoResponse, Error> {
    principal.require_admin()?;

    let config = SystemService::new(&state.db)
        .toggle_enrollment(body.open)
        .await?;

    Ok((StatusCode::OK, Json(config)))
}

/// All courses, active or not
#[utoipa::path(
    get,
    path = "/api/admin/courses",
    tag = ADMIN_TAG,
    params(CourseListParams),
    responses(
        (status = 200, description = "Courses ordered by ID", body = Vec<CourseDto>),
        (status = 403, description = "Admin only", body = ErrorDto)
    ),
)]
pub async fn list_all_courses(
    State(state): State<AppState>,
    principal: Principal,
    Query(params): Query<CourseListParams>,
) -> Result<impl IntoResponse, Error> {
    principal.require_admin()?;

    let courses = CourseService::new(&state.db).list(params).await?;

    Ok((StatusCode::OK, Json(courses)))
}

/// Import courses from CSV
///
/// Columns: `code, name, credits, description, semester, teacher_username`, preceded by a
/// header row.
#[utoipa::path(
    post,
    path = "/api/admin/courses/batch",
    tag = ADMIN_TAG,
    request_body(content = String, content_type = "text/csv"),
    responses(
        (status = 200, description = "Per-row import outcome", body = ImportResultDto),
        (status = 403, description = "Admin only", body = ErrorDto)
    ),
)]
pub async fn import_courses(
    State(state): State<AppState>,
    principal: Principal,
    body: String,
) -> Result<impl IntoResponse, Error> {
    principal.require_admin()?;

    let result = ImportService::new(&state.db).import_courses(&body).await?;

    Ok((StatusCode::OK, Json(result)))
}
