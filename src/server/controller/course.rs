use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};

use crate::{
    model::{
        api::{ErrorDto, MessageDto},
        course::{CapacityDto, CourseDto, CourseListParams, CreateCourseDto, UpdateCourseDto},
        student::StudentDto,
    },
    server::{
        error::Error,
        model::{app::AppState, principal::Principal},
        service::{course::CourseService, enrollment::EnrollmentService},
    },
};

pub static COURSE_TAG: &str = "course";

/// Create a course
#[utoipa::path(
    post,
    path = "/api/courses",
    tag = COURSE_TAG,
    request_body = CreateCourseDto,
    responses(
        (status = 201, description = "Course created", body = CourseDto),
        (status = 400, description = "Credits or capacity not positive", body = ErrorDto),
        (status = 403, description = "Teacher or admin only", body = ErrorDto),
        (status = 404, description = "Teacher not found", body = ErrorDto),
        (status = 409, description = "Course code already exists", body = ErrorDto)
    ),
)]
pub async fn create_course(
    State(state): State<AppState>,
    principal: Principal,
    Json(body): Json<CreateCourseDto>,
) -> Result<impl IntoResponse, Error> {
    principal.require_teacher()?;

    let course = CourseService::new(&state.db).create(body).await?;

    Ok((StatusCode::CREATED, Json(course)))
}

/// List courses
#[utoipa::path(
    get,
    path = "/api/courses",
    tag = COURSE_TAG,
    params(CourseListParams),
    responses(
        (status = 200, description = "Courses ordered by ID", body = Vec<CourseDto>),
        (status = 401, description = "Not authenticated", body = ErrorDto)
    ),
)]
pub async fn list_courses(
    State(state): State<AppState>,
    _principal: Principal,
    Query(params): Query<CourseListParams>,
) -> Result<impl IntoResponse, Error> {
    let courses = CourseService::new(&state.db).list(params).await?;

    Ok((StatusCode::OK, Json(courses)))
}

/// Get a course
#[utoipa::path(
    get,
    path = "/api/courses/{course_id}",
    tag = COURSE_TAG,
    params(("course_id" = i32, Path, description = "Course ID")),
    responses(
        (status = 200, description = "Course found", body = CourseDto),
        (status = 404, description = "Course not found", body = ErrorDto)
    ),
)]
pub async fn get_course(
    State(state): State<AppState>,
    _principal: Principal,
    Path(course_id): Path<i32>,
) -> Result<impl IntoResponse, Error> {
    let course = CourseService::new(&state.db).get(course_id).await?;

    Ok((StatusCode::OK, Json(course)))
}

/// Get a course by its code
#[utoipa::path(
    get,
    path = "/api/courses/code/{course_code}",
    tag = COURSE_TAG,
    params(("course_code" = String, Path, description = "Course code")),
    responses(
        (status = 200, description = "Course found", body = CourseDto),
        (status = 404, description = "Course not found", body = ErrorDto)
    ),
)]
pub async fn get_course_by_code(
    State(state): State<AppState>,
    _principal: Principal,
    Path(course_code): Path<String>,
) -> Result<impl IntoResponse, Error> {
    let course = CourseService::new(&state.db)
        .get_by_code(&course_code)
        .await?;

    Ok((StatusCode::OK, Json(course)))
}

/// Update a course
#[utoipa::path(
    put,
    path = "/api/courses/{course_id}",
    tag = COURSE_TAG,
    params(("course_id" = i32, Path, description = "Course ID")),
    request_body = UpdateCourseDto,
    responses(
        (status = 200, description = "Course updated", body = CourseDto),
        (status = 400, description = "Credits or capacity not positive", body = ErrorDto),
        (status = 403, description = "Teacher or admin only", body = ErrorDto),
        (status = 404, description = "Course or teacher not found", body = ErrorDto)
    ),
)]
pub async fn update_course(
    State(state): State<AppState>,
    principal: Principal,
    Path(course_id): Path<i32>,
    Json(body): Json<UpdateCourseDto>,
) -> Result<impl IntoResponse, Error> {
    principal.require_teacher()?;

    let course = CourseService::new(&state.db).update(course_id, body).await?;

    Ok((StatusCode::OK, Json(course)))
}

/// Reopen a course for enrollment
#[utoipa::path(
    post,
    path = "/api/courses/{course_id}/activate",
    tag = COURSE_TAG,
    params(("course_id" = i32, Path, description = "Course ID")),
    responses(
        (status = 200, description = "Course activated", body = CourseDto),
        (status = 403, description = "Teacher or admin only", body = ErrorDto),
        (status = 404, description = "Course not found", body = ErrorDto)
    ),
)]
pub async fn activate_course(
    State(state): State<AppState>,
    principal: Principal,
    Path(course_id): Path<i32>,
) -> Result<impl IntoResponse, Error> {
    principal.require_teacher()?;

    let course = CourseService::new(&state.db)
        .set_active(course_id, true)
        .await?;

    Ok((StatusCode::OK, Json(course)))
}

/// Close a course to new enrollments
#[utoipa::path(
    post,
    path = "/api/courses/{course_id}/deactivate",
    tag = COURSE_TAG,
    params(("course_id" = i32, Path, description = "Course ID")),
    responses(
        (status = 200, description = "Course deactivated", body = CourseDto),
        (status = 403, description = "Teacher or admin only", body = ErrorDto),
        (status = 404, description = "Course not found", body = ErrorDto)
    ),
)]
pub async fn deactivate_course(
    State(state): State<AppState>,
    principal: Principal,
    Path(course_id): Path<i32>,
) -> Result<impl IntoResponse, Error> {
    principal.require_teacher()?;

    let course = CourseService::new(&state.db)
        .set_active(course_id, false)
        .await?;

    Ok((StatusCode::OK, Json(course)))
}

/// Delete a course with its enrollments, grades, assignments and submissions
#[utoipa::path(
    delete,
    path = "/api/courses/{course_id}",
    tag = COURSE_TAG,
    params(("course_id" = i32, Path, description = "Course ID")),
    responses(
        (status = 200, description = "Course deleted", body = MessageDto),
        (status = 403, description = "Teacher or admin only", body = ErrorDto),
        (status = 404, description = "Course not found", body = ErrorDto)
    ),
)]
pub async fn delete_course(
    State(state): State<AppState>,
    principal: Principal,
    Path(course_id): Path<i32>,
) -> Result<impl IntoResponse, Error> {
    principal.require_teacher()?;

    CourseService::new(&state.db).delete(course_id).await?;

    Ok((StatusCode::OK, Json(MessageDto::new("Course deleted"))))
}

/// Seats taken and left in a course
#[utoipa::path(
    get,
    path = "/api/courses/{course_id}/capacity",
    tag = COURSE_TAG,
    params(("course_id" = i32, Path, description = "Course ID")),
    responses(
        (status = 200, description = "Capacity summary", body = CapacityDto),
        (status = 404, description = "Course not found", body = ErrorDto)
    ),
)]
pub async fn get_course_capacity(
    State(state): State<AppState>,
    _principal: Principal,
    Path(course_id): Path<i32>,
) -> Result<impl IntoResponse, Error> {
    let capacity = EnrollmentService::new(&state.db).capacity(course_id).await?;

    Ok((StatusCode::OK, Json(capacity)))
}

/// Students enrolled in a course
#[utoipa::path(
    get,
    path = "/api/courses/{course_id}/students",
    tag = COURSE_TAG,
    params(("course_id" = i32, Path, description = "Course ID")),
    responses(
        (status = 200, description = "Students in enrollment order", body = Vec<StudentDto>),
        (status = 404, description = "Course not found", body = ErrorDto)
    ),
)]
pub async fn get_course_students(
    State(state): State<AppState>,
    _principal: Principal,
    Path(course_id): Path<i32>,
) -> Result<impl IntoResponse, Error> {
    let students = CourseService::new(&state.db)
        .enrolled_students(course_id)
        .await?;

    Ok((StatusCode::OK, Json(students)))
}
