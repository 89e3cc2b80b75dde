use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};

use crate::{
    model::{
        api::{ErrorDto, MessageDto},
        enrollment::{CreateEnrollmentDto, EnrollmentDto},
    },
    server::{
        error::Error,
        model::{app::AppState, principal::Principal},
        service::enrollment::EnrollmentService,
    },
};

pub static ENROLLMENT_TAG: &str = "enrollment";

/// Enroll a student in a course
///
/// Checks run in order and the first failure is returned: student exists, course exists,
/// course active, not already enrolled, seat available, no weekday overlap with the student's
/// other courses.
#[utoipa::path(
    post,
    path = "/api/enrollments",
    tag = ENROLLMENT_TAG,
    request_body = CreateEnrollmentDto,
    responses(
        (status = 201, description = "Enrolled", body = EnrollmentDto),
        (status = 401, description = "Not authenticated", body = ErrorDto),
        (status = 404, description = "Student or course not found", body = ErrorDto),
        (status = 409, description = "Course inactive, already enrolled, course full or schedule conflict", body = ErrorDto)
    ),
)]
pub async fn enroll(
    State(state): State<AppState>,
    _principal: Principal,
    Json(body): Json<CreateEnrollmentDto>,
) -> Result<impl IntoResponse, Error> {
    let enrollment = EnrollmentService::new(&state.db)
        .enroll(body.student_id, body.course_id)
        .await?;

    Ok((StatusCode::CREATED, Json(enrollment)))
}

/// Withdraw from a course
#[utoipa::path(
    delete,
    path = "/api/enrollments/{enrollment_id}",
    tag = ENROLLMENT_TAG,
    params(("enrollment_id" = i32, Path, description = "Enrollment ID")),
    responses(
        (status = 200, description = "Withdrawn", body = MessageDto),
        (status = 404, description = "Enrollment not found", body = ErrorDto)
    ),
)]
pub async fn withdraw(
    State(state): State<AppState>,
    _principal: Principal,
    Path(enrollment_id): Path<i32>,
) -> Result<impl IntoResponse, Error> {
    EnrollmentService::new(&state.db)
        .withdraw_by_id(enrollment_id)
        .await?;

    Ok((StatusCode::OK, Json(MessageDto::new("Successfully withdrawn"))))
}

/// Enrollments of a student
#[utoipa::path(
    get,
    path = "/api/enrollments/student/{student_id}",
    tag = ENROLLMENT_TAG,
    params(("student_id" = i32, Path, description = "Student ID")),
    responses(
        (status = 200, description = "Enrollments in enrollment order", body = Vec<EnrollmentDto>),
        (status = 401, description = "Not authenticated", body = ErrorDto)
    ),
)]
pub async fn get_student_enrollments(
    State(state): State<AppState>,
    _principal: Principal,
    Path(student_id): Path<i32>,
) -> Result<impl IntoResponse, Error> {
    let enrollments = EnrollmentService::new(&state.db)
        .list_for_student(student_id)
        .await?;

    Ok((StatusCode::OK, Json(enrollments)))
}

/// Enrollments of a course
#[utoipa::path(
    get,
    path = "/api/enrollments/course/{course_id}",
    tag = ENROLLMENT_TAG,
    params(("course_id" = i32, Path, description = "Course ID")),
    responses(
        (status = 200, description = "Enrollments in enrollment order", body = Vec<EnrollmentDto>),
        (status = 401, description = "Not authenticated", body = ErrorDto)
    ),
)]
pub async fn get_course_enrollments(
    State(state): State<AppState>,
    _principal: Principal,
    Path(course_id): Path<i32>,
) -> Result<impl IntoResponse, Error> {
    let enrollments = EnrollmentService::new(&state.db)
        .list_for_course(course_id)
        .await?;

    Ok((StatusCode::OK, Json(enrollments)))
}
