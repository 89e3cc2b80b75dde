use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};

use crate::{
    model::{
        api::{ErrorDto, ImportResultDto, MessageDto},
        grade::{CourseStatisticsDto, GradeDto, RecordGradeDto, UpdateGradeDto},
    },
    server::{
        error::Error,
        model::{app::AppState, principal::Principal},
        service::grade::GradeService,
    },
};

pub static GRADE_TAG: &str = "grade";

/// Record or overwrite a student's grade in a course
#[utoipa::path(
    post,
    path = "/api/grades",
    tag = GRADE_TAG,
    request_body = RecordGradeDto,
    responses(
        (status = 200, description = "Grade recorded", body = GradeDto),
        (status = 400, description = "Score out of range", body = ErrorDto),
        (status = 403, description = "Teacher or admin only", body = ErrorDto),
        (status = 404, description = "Student or course not found", body = ErrorDto)
    ),
)]
pub async fn record_grade(
    State(state): State<AppState>,
    principal: Principal,
    Json(body): Json<RecordGradeDto>,
) -> Result<impl IntoResponse, Error> {
    principal.require_teacher()?;

    let grade = GradeService::new(&state.db).record_grade(body).await?;

    Ok((StatusCode::OK, Json(grade)))
}

/// Update a grade
#[utoipa::path(
    put,
    path = "/api/grades/{grade_id}",
    tag = GRADE_TAG,
    params(("grade_id" = i32, Path, description = "Grade ID")),
    request_body = UpdateGradeDto,
    responses(
        (status = 200, description = "Grade updated", body = GradeDto),
        (status = 400, description = "Score out of range", body = ErrorDto),
        (status = 403, description = "Teacher or admin only", body = ErrorDto),
        (status = 404, description = "Grade not found", body = ErrorDto)
    ),
)]
pub async fn update_grade(
    State(state): State<AppState>,
    principal: Principal,
    Path(grade_id): Path<i32>,
    Json(body): Json<UpdateGradeDto>,
) -> Result<impl IntoResponse, Error> {
    principal.require_teacher()?;

    let grade = GradeService::new(&state.db)
        .update_grade(grade_id, body)
        .await?;

    Ok((StatusCode::OK, Json(grade)))
}

/// Delete a grade
#[utoipa::path(
    delete,
    path = "/api/grades/{grade_id}",
    tag = GRADE_TAG,
    params(("grade_id" = i32, Path, description = "Grade ID")),
    responses(
        (status = 200, description = "Grade deleted", body = MessageDto),
        (status = 403, description = "Teacher or admin only", body = ErrorDto),
        (status = 404, description = "Grade not found", body = ErrorDto)
    ),
)]
pub async fn delete_grade(
    State(state): State<AppState>,
    principal: Principal,
    Path(grade_id): Path<i32>,
) -> Result<impl IntoResponse, Error> {
    principal.require_teacher()?;

    GradeService::new(&state.db).delete_grade(grade_id).await?;

    Ok((StatusCode::OK, Json(MessageDto::new("Grade deleted"))))
}

/// Grades of a student
#[utoipa::path(
    get,
    path = "/api/grades/student/{student_id}",
    tag = GRADE_TAG,
    params(("student_id" = i32, Path, description = "Student ID")),
    responses(
        (status = 200, description = "Grades of the student", body = Vec<GradeDto>),
        (status = 401, description = "Not authenticated", body = ErrorDto)
    ),
)]
pub async fn get_student_grades(
    State(state): State<AppState>,
    _principal: Principal,
    Path(student_id): Path<i32>,
) -> Result<impl IntoResponse, Error> {
    let grades = GradeService::new(&state.db)
        .grades_for_student(student_id)
        .await?;

    Ok((StatusCode::OK, Json(grades)))
}

/// Grades of a course
#[utoipa::path(
    get,
    path = "/api/grades/course/{course_id}",
    tag = GRADE_TAG,
    params(("course_id" = i32, Path, description = "Course ID")),
    responses(
        (status = 200, description = "Grades of the course", body = Vec<GradeDto>),
        (status = 401, description = "Not authenticated", body = ErrorDto)
    ),
)]
pub async fn get_course_grades(
    State(state): State<AppState>,
    _principal: Principal,
    Path(course_id): Path<i32>,
) -> Result<impl IntoResponse, Error> {
    let grades = GradeService::new(&state.db)
        .grades_for_course(course_id)
        .await?;

    Ok((StatusCode::OK, Json(grades)))
}

/// Average, extremes and pass rate of a course
#[utoipa::path(
    get,
    path = "/api/grades/course/{course_id}/statistics",
    tag = GRADE_TAG,
    params(("course_id" = i32, Path, description = "Course ID")),
    responses(
        (status = 200, description = "Statistics, all zero without grades", body = CourseStatisticsDto),
        (status = 401, description = "Not authenticated", body = ErrorDto)
    ),
)]
pub async fn get_course_statistics(
    State(state): State<AppState>,
    _principal: Principal,
    Path(course_id): Path<i32>,
) -> Result<impl IntoResponse, Error> {
    let statistics = GradeService::new(&state.db)
        .course_statistics(course_id)
        .await?;

    Ok((StatusCode::OK, Json(statistics)))
}

/// Import grades for a course from CSV
///
/// Columns: `student_number, student_name, score, comments`, preceded by a header row.
#[utoipa::path(
    post,
    path = "/api/grades/batch/{course_id}",
    tag = GRADE_TAG,
    params(("course_id" = i32, Path, description = "Course ID")),
    request_body(content = String, content_type = "text/csv"),
    responses(
        (status = 200, description = "Per-row import outcome", body = ImportResultDto),
        (status = 403, description = "Teacher or admin only", body = ErrorDto),
        (status = 404, description = "Course not found", body = ErrorDto)
    ),
)]
pub async fn import_grades(
    State(state): State<AppState>,
    principal: Principal,
    Path(course_id): Path<i32>,
    body: String,
) -> Result<impl IntoResponse, Error> {
    principal.require_teacher()?;

    let result = GradeService::new(&state.db)
        .import_grades(course_id, &body)
        .await?;

    Ok((StatusCode::OK, Json(result)))
}
