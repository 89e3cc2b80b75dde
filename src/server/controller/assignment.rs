use axum::{
    extract::{Multipart, Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};

use crate::{
    model::{
        api::{ErrorDto, MessageDto},
        assignment::{
            AssignmentDto, CreateAssignmentDto, GradeSubmissionDto, NewFileSubmission,
            SubmissionDto, SubmissionListParams, SubmitAssignmentDto, SubmitFileForm,
            UpdateAssignmentDto,
        },
    },
    server::{
        controller::util::form::UploadForm,
        error::{domain::DomainError, Error},
        model::{app::AppState, principal::Principal},
        service::{assignment::AssignmentService, student::StudentService},
    },
};

pub static ASSIGNMENT_TAG: &str = "assignment";

/// Post an assignment to a course
///
/// Every student enrolled in the course is notified.
#[utoipa::path(
    post,
    path = "/api/assignments",
    tag = ASSIGNMENT_TAG,
    request_body = CreateAssignmentDto,
    responses(
        (status = 201, description = "Assignment created", body = AssignmentDto),
        (status = 403, description = "Teacher or admin only", body = ErrorDto),
        (status = 404, description = "Course not found", body = ErrorDto)
    ),
)]
pub async fn create_assignment(
    State(state): State<AppState>,
    principal: Principal,
    Json(body): Json<CreateAssignmentDto>,
) -> Result<impl IntoResponse, Error> {
    principal.require_teacher()?;

    let assignment = AssignmentService::new(&state.db).create(body).await?;

    Ok((StatusCode::CREATED, Json(assignment)))
}

/// Assignments of a course
#[utoipa::path(
    get,
    path = "/api/assignments/course/{course_id}",
    tag = ASSIGNMENT_TAG,
    params(("course_id" = i32, Path, description = "Course ID")),
    responses(
        (status = 200, description = "Assignments, earliest due first", body = Vec<AssignmentDto>),
        (status = 401, description = "Not authenticated", body = ErrorDto)
    ),
)]
pub async fn get_course_assignments(
    State(state): State<AppState>,
    _principal: Principal,
    Path(course_id): Path<i32>,
) -> Result<impl IntoResponse, Error> {
    let assignments = AssignmentService::new(&state.db)
        .list_for_course(course_id)
        .await?;

    Ok((StatusCode::OK, Json(assignments)))
}

/// Get an assignment
#[utoipa::path(
    get,
    path = "/api/assignments/{assignment_id}",
    tag = ASSIGNMENT_TAG,
    params(("assignment_id" = i32, Path, description = "Assignment ID")),
    responses(
        (status = 200, description = "Assignment found", body = AssignmentDto),
        (status = 404, description = "Assignment not found", body = ErrorDto)
    ),
)]
pub async fn get_assignment(
    State(state): State<AppState>,
    _principal: Principal,
    Path(assignment_id): Path<i32>,
) -> Result<impl IntoResponse, Error> {
    let assignment = AssignmentService::new(&state.db).get(assignment_id).await?;

    Ok((StatusCode::OK, Json(assignment)))
}

/// Update an assignment
#[utoipa::path(
    put,
    path = "/api/assignments/{assignment_id}",
    tag = ASSIGNMENT_TAG,
    params(("assignment_id" = i32, Path, description = "Assignment ID")),
    request_body = UpdateAssignmentDto,
    responses(
        (status = 200, description = "Assignment updated", body = AssignmentDto),
        (status = 403, description = "Teacher or admin only", body = ErrorDto),
        (status = 404, description = "Assignment not found", body = ErrorDto)
    ),
)]
pub async fn update_assignment(
    State(state): State<AppState>,
    principal: Principal,
    Path(assignment_id): Path<i32>,
    Json(body): Json<UpdateAssignmentDto>,
) -> Result<impl IntoResponse, Error> {
    principal.require_teacher()?;

    let assignment = AssignmentService::new(&state.db)
        .update(assignment_id, body)
        .await?;

    Ok((StatusCode::OK, Json(assignment)))
}

/// Delete an assignment and its submissions
#[utoipa::path(
    delete,
    path = "/api/assignments/{assignment_id}",
    tag = ASSIGNMENT_TAG,
    params(("assignment_id" = i32, Path, description = "Assignment ID")),
    responses(
        (status = 200, description = "Assignment deleted", body = MessageDto),
        (status = 403, description = "Teacher or admin only", body = ErrorDto),
        (status = 404, description = "Assignment not found", body = ErrorDto)
    ),
)]
pub async fn delete_assignment(
    State(state): State<AppState>,
    principal: Principal,
    Path(assignment_id): Path<i32>,
) -> Result<impl IntoResponse, Error> {
    principal.require_teacher()?;

    AssignmentService::new(&state.db)
        .delete(assignment_id)
        .await?;

    Ok((StatusCode::OK, Json(MessageDto::new("Assignment deleted"))))
}

/// Submit work for an assignment
///
/// Students submit as themselves; admins must name the student in `student_id`. Submitting
/// again replaces the earlier submission.
#[utoipa::path(
    post,
    path = "/api/assignments/{assignment_id}/submit",
    tag = ASSIGNMENT_TAG,
    params(("assignment_id" = i32, Path, description = "Assignment ID")),
    request_body = SubmitAssignmentDto,
    responses(
        (status = 200, description = "Submission stored", body = SubmissionDto),
        (status = 400, description = "Admin submission without student_id", body = ErrorDto),
        (status = 403, description = "Student or admin only", body = ErrorDto),
        (status = 404, description = "Assignment or student not found", body = ErrorDto)
    ),
)]
pub async fn submit_assignment(
    State(state): State<AppState>,
    principal: Principal,
    Path(assignment_id): Path<i32>,
    Json(body): Json<SubmitAssignmentDto>,
) -> Result<impl IntoResponse, Error> {
    principal.require_student()?;

    let student_id = submitting_student(&state, &principal, body.student_id).await?;

    let submission = AssignmentService::new(&state.db)
        .submit(assignment_id, student_id, body.content)
        .await?;

    Ok((StatusCode::OK, Json(submission)))
}

/// Submit work with an attached file
///
/// Same rules as a plain submission. A file attached to an earlier submission is replaced.
#[utoipa::path(
    post,
    path = "/api/assignments/{assignment_id}/submit/file",
    tag = ASSIGNMENT_TAG,
    params(("assignment_id" = i32, Path, description = "Assignment ID")),
    request_body(content = SubmitFileForm, content_type = "multipart/form-data"),
    responses(
        (status = 200, description = "Submission stored", body = SubmissionDto),
        (status = 400, description = "Missing file, file over the upload limit, or admin submission without student_id", body = ErrorDto),
        (status = 403, description = "Student or admin only", body = ErrorDto),
        (status = 404, description = "Assignment or student not found", body = ErrorDto)
    ),
)]
pub async fn submit_assignment_file(
    State(state): State<AppState>,
    principal: Principal,
    Path(assignment_id): Path<i32>,
    multipart: Multipart,
) -> Result<impl IntoResponse, Error> {
    principal.require_student()?;

    let mut form = UploadForm::read(multipart).await?;
    let student_id = submitting_student(&state, &principal, form.integer("student_id")?).await?;
    let (file_name, content) = form.take_file()?;

    let submission = NewFileSubmission {
        assignment_id,
        student_id,
        content: form.text("content"),
        file_name,
    };

    let submission = AssignmentService::new(&state.db)
        .submit_file(&state.files, submission, &content[..])
        .await?;

    Ok((StatusCode::OK, Json(submission)))
}

/// Students submit as themselves; admins name the student
async fn submitting_student(
    state: &AppState,
    principal: &Principal,
    student_id: Option<i32>,
) -> Result<i32, Error> {
    if principal.is_admin() {
        Ok(student_id.ok_or_else(|| DomainError::invalid_argument("student_id is required"))?)
    } else {
        Ok(StudentService::new(&state.db)
            .get_by_user(principal.user_id)
            .await?
            .id)
    }
}

/// Submissions for an assignment
#[utoipa::path(
    get,
    path = "/api/assignments/{assignment_id}/submissions",
    tag = ASSIGNMENT_TAG,
    params(
        ("assignment_id" = i32, Path, description = "Assignment ID"),
        SubmissionListParams
    ),
    responses(
        (status = 200, description = "Submissions with lateness", body = Vec<SubmissionDto>),
        (status = 403, description = "Teacher or admin only", body = ErrorDto),
        (status = 404, description = "Assignment not found", body = ErrorDto)
    ),
)]
pub async fn get_assignment_submissions(
    State(state): State<AppState>,
    principal: Principal,
    Path(assignment_id): Path<i32>,
    Query(params): Query<SubmissionListParams>,
) -> Result<impl IntoResponse, Error> {
    principal.require_teacher()?;

    let submissions = AssignmentService::new(&state.db)
        .submissions_for_assignment(assignment_id, params.ungraded_only.unwrap_or(false))
        .await?;

    Ok((StatusCode::OK, Json(submissions)))
}

/// Grade a submission
#[utoipa::path(
    put,
    path = "/api/assignments/submissions/{submission_id}/grade",
    tag = ASSIGNMENT_TAG,
    params(("submission_id" = i32, Path, description = "Submission ID")),
    request_body = GradeSubmissionDto,
    responses(
        (status = 200, description = "Submission graded", body = SubmissionDto),
        (status = 400, description = "Score outside 0 to the assignment's total points", body = ErrorDto),
        (status = 403, description = "Teacher or admin only", body = ErrorDto),
        (status = 404, description = "Submission not found", body = ErrorDto)
    ),
)]
pub async fn grade_submission(
    State(state): State<AppState>,
    principal: Principal,
    Path(submission_id): Path<i32>,
    Json(body): Json<GradeSubmissionDto>,
) -> Result<impl IntoResponse, Error> {
    principal.require_teacher()?;

    let submission = AssignmentService::new(&state.db)
        .grade_submission(submission_id, body.score, body.feedback)
        .await?;

    Ok((StatusCode::OK, Json(submission)))
}
