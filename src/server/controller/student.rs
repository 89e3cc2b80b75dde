use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};

use crate::{
    model::{
        api::{ErrorDto, MessageDto},
        assignment::SubmissionDto,
        course::CourseDto,
        grade::GpaDto,
        student::{
            ChangeStudentStatusDto, CreateStudentDto, StudentDto, StudentListParams,
            UpdateStudentDto,
        },
    },
    server::{
        error::Error,
        model::{app::AppState, principal::Principal},
        service::{
            assignment::AssignmentService, enrollment::EnrollmentService, grade::GradeService,
            student::StudentService,
        },
    },
};

pub static STUDENT_TAG: &str = "student";

/// Create a student together with their user account
#[utoipa::path(
    post,
    path = "/api/students",
    tag = STUDENT_TAG,
    request_body = CreateStudentDto,
    responses(
        (status = 201, description = "Student created", body = StudentDto),
        (status = 403, description = "Admin only", body = ErrorDto),
        (status = 409, description = "Username, email or student number already exists", body = ErrorDto)
    ),
)]
pub async fn create_student(
    State(state): State<AppState>,
    principal: Principal,
    Json(body): Json<CreateStudentDto>,
) -> Result<impl IntoResponse, Error> {
    principal.require_admin()?;

    let student = StudentService::new(&state.db).create(body).await?;

    Ok((StatusCode::CREATED, Json(student)))
}

/// List students
#[utoipa::path(
    get,
    path = "/api/students",
    tag = STUDENT_TAG,
    params(StudentListParams),
    responses(
        (status = 200, description = "Students ordered by ID", body = Vec<StudentDto>),
        (status = 401, description = "Not authenticated", body = ErrorDto)
    ),
)]
pub async fn list_students(
    State(state): State<AppState>,
    _principal: Principal,
    Query(params): Query<StudentListParams>,
) -> Result<impl IntoResponse, Error> {
    let students = StudentService::new(&state.db).list(params).await?;

    Ok((StatusCode::OK, Json(students)))
}

/// Get the student profile of the authenticated user
#[utoipa::path(
    get,
    path = "/api/students/me",
    tag = STUDENT_TAG,
    responses(
        (status = 200, description = "Own student profile", body = StudentDto),
        (status = 404, description = "Authenticated user has no student profile", body = ErrorDto)
    ),
)]
pub async fn get_own_student(
    State(state): State<AppState>,
    principal: Principal,
) -> Result<impl IntoResponse, Error> {
    let student = StudentService::new(&state.db)
        .get_by_user(principal.user_id)
        .await?;

    Ok((StatusCode::OK, Json(student)))
}

/// Get a student
#[utoipa::path(
    get,
    path = "/api/students/{student_id}",
    tag = STUDENT_TAG,
    params(("student_id" = i32, Path, description = "Student ID")),
    responses(
        (status = 200, description = "Student found", body = StudentDto),
        (status = 404, description = "Student not found", body = ErrorDto)
    ),
)]
pub async fn get_student(
    State(state): State<AppState>,
    _principal: Principal,
    Path(student_id): Path<i32>,
) -> Result<impl IntoResponse, Error> {
    let student = StudentService::new(&state.db).get(student_id).await?;

    Ok((StatusCode::OK, Json(student)))
}

/// Get a student by student number
#[utoipa::path(
    get,
    path = "/api/students/number/{student_number}",
    tag = STUDENT_TAG,
    params(("student_number" = String, Path, description = "Student number")),
    responses(
        (status = 200, description = "Student found", body = StudentDto),
        (status = 404, description = "Student not found", body = ErrorDto)
    ),
)]
pub async fn get_student_by_number(
    State(state): State<AppState>,
    _principal: Principal,
    Path(student_number): Path<String>,
) -> Result<impl IntoResponse, Error> {
    let student = StudentService::new(&state.db)
        .get_by_number(&student_number)
        .await?;

    Ok((StatusCode::OK, Json(student)))
}

/// Update a student
#[utoipa::path(
    put,
    path = "/api/students/{student_id}",
    tag = STUDENT_TAG,
    params(("student_id" = i32, Path, description = "Student ID")),
    request_body = UpdateStudentDto,
    responses(
        (status = 200, description = "Student updated", body = StudentDto),
        (status = 403, description = "Admin only", body = ErrorDto),
        (status = 404, description = "Student not found", body = ErrorDto),
        (status = 409, description = "Email already exists", body = ErrorDto)
    ),
)]
pub async fn update_student(
    State(state): State<AppState>,
    principal: Principal,
    Path(student_id): Path<i32>,
    Json(body): Json<UpdateStudentDto>,
) -> Result<impl IntoResponse, Error> {
    principal.require_admin()?;

    let student = StudentService::new(&state.db).update(student_id, body).await?;

    Ok((StatusCode::OK, Json(student)))
}

/// Change a student's status (active, on leave, graduated)
#[utoipa::path(
    put,
    path = "/api/students/{student_id}/status",
    tag = STUDENT_TAG,
    params(("student_id" = i32, Path, description = "Student ID")),
    request_body = ChangeStudentStatusDto,
    responses(
        (status = 200, description = "Status changed", body = StudentDto),
        (status = 403, description = "Admin only", body = ErrorDto),
        (status = 404, description = "Student not found", body = ErrorDto)
    ),
)]
pub async fn change_student_status(
    State(state): State<AppState>,
    principal: Principal,
    Path(student_id): Path<i32>,
    Json(body): Json<ChangeStudentStatusDto>,
) -> Result<impl IntoResponse, Error> {
    principal.require_admin()?;

    let student = StudentService::new(&state.db)
        .change_status(student_id, body)
        .await?;

    Ok((StatusCode::OK, Json(student)))
}

/// Delete a student, their user and everything they own
#[utoipa::path(
    delete,
    path = "/api/students/{student_id}",
    tag = STUDENT_TAG,
    params(("student_id" = i32, Path, description = "Student ID")),
    responses(
        (status = 200, description = "Student deleted", body = MessageDto),
        (status = 403, description = "Admin only", body = ErrorDto),
        (status = 404, description = "Student not found", body = ErrorDto)
    ),
)]
pub async fn delete_student(
    State(state): State<AppState>,
    principal: Principal,
    Path(student_id): Path<i32>,
) -> Result<impl IntoResponse, Error> {
    principal.require_admin()?;

    StudentService::new(&state.db).delete(student_id).await?;

    Ok((StatusCode::OK, Json(MessageDto::new("Student deleted"))))
}

/// Courses the student is enrolled in
#[utoipa::path(
    get,
    path = "/api/students/{student_id}/courses",
    tag = STUDENT_TAG,
    params(("student_id" = i32, Path, description = "Student ID")),
    responses(
        (status = 200, description = "Courses in enrollment order", body = Vec<CourseDto>),
        (status = 401, description = "Not authenticated", body = ErrorDto)
    ),
)]
pub async fn get_student_courses(
    State(state): State<AppState>,
    _principal: Principal,
    Path(student_id): Path<i32>,
) -> Result<impl IntoResponse, Error> {
    let courses = EnrollmentService::new(&state.db)
        .courses_for_student(student_id)
        .await?;

    Ok((StatusCode::OK, Json(courses)))
}

/// Mean of the student's raw course scores
#[utoipa::path(
    get,
    path = "/api/students/{student_id}/gpa",
    tag = STUDENT_TAG,
    params(("student_id" = i32, Path, description = "Student ID")),
    responses(
        (status = 200, description = "Mean score, 0 without grades", body = GpaDto),
        (status = 401, description = "Not authenticated", body = ErrorDto)
    ),
)]
pub async fn get_student_gpa(
    State(state): State<AppState>,
    _principal: Principal,
    Path(student_id): Path<i32>,
) -> Result<impl IntoResponse, Error> {
    let gpa = GradeService::new(&state.db).student_gpa(student_id).await?;

    Ok((StatusCode::OK, Json(gpa)))
}

/// Assignment submissions of a student
#[utoipa::path(
    get,
    path = "/api/students/{student_id}/submissions",
    tag = STUDENT_TAG,
    params(("student_id" = i32, Path, description = "Student ID")),
    responses(
        (status = 200, description = "Submissions with lateness", body = Vec<SubmissionDto>),
        (status = 401, description = "Not authenticated", body = ErrorDto)
    ),
)]
pub async fn get_student_submissions(
    State(state): State<AppState>,
    _principal: Principal,
    Path(student_id): Path<i32>,
) -> Result<impl IntoResponse, Error> {
    let submissions = AssignmentService::new(&state.db)
        .submissions_for_student(student_id)
        .await?;

    Ok((StatusCode::OK, Json(submissions)))
}
