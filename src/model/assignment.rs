use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

#[derive(Clone, Debug, Serialize, Deserialize, ToSchema)]
pub struct AssignmentDto {
    pub id: i32,
    pub course_id: i32,
    pub title: String,
    pub description: Option<String>,
    pub due_date: NaiveDateTime,
    pub total_points: f64,
    pub created_at: NaiveDateTime,
}

impl From<entity::assignment::Model> for AssignmentDto {
    fn from(assignment: entity::assignment::Model) -> Self {
        Self {
            id: assignment.id,
            course_id: assignment.course_id,
            title: assignment.title,
            description: assignment.description,
            due_date: assignment.due_date,
            total_points: assignment.total_points,
            created_at: assignment.created_at,
        }
    }
}

#[derive(Clone, Debug, Deserialize, ToSchema)]
pub struct CreateAssignmentDto {
    pub course_id: i32,
    pub title: String,
    pub description: Option<String>,
    pub due_date: NaiveDateTime,
    /// Defaults to 100
    pub total_points: Option<f64>,
}

#[derive(Clone, Debug, Default, Deserialize, ToSchema)]
pub struct UpdateAssignmentDto {
    pub title: Option<String>,
    pub description: Option<String>,
    pub due_date: Option<NaiveDateTime>,
    pub total_points: Option<f64>,
}

#[derive(Clone, Debug, Serialize, Deserialize, ToSchema)]
pub struct SubmissionDto {
    pub id: i32,
    pub assignment_id: i32,
    pub student_id: i32,
    pub content: Option<String>,
    /// Whether a file is attached, see the submission file endpoint
    pub has_attachment: bool,
    pub submitted_at: NaiveDateTime,
    pub score: Option<f64>,
    pub feedback: Option<String>,
    pub graded_at: Option<NaiveDateTime>,
    pub is_late: bool,
}

impl SubmissionDto {
    pub fn new(submission: entity::submission::Model, is_late: bool) -> Self {
        Self {
            id: submission.id,
            assignment_id: submission.assignment_id,
            student_id: submission.student_id,
            content: submission.content,
            has_attachment: submission.file_path.is_some(),
            submitted_at: submission.submitted_at,
            score: submission.score,
            feedback: submission.feedback,
            graded_at: submission.graded_at,
            is_late,
        }
    }
}

#[derive(Clone, Debug, Deserialize, ToSchema)]
pub struct SubmitAssignmentDto {
    /// Required when an admin submits on a student's behalf; students submit as themselves
    pub student_id: Option<i32>,
    pub content: Option<String>,
}

/// Multipart form of a submission with an attached file
#[derive(ToSchema)]
pub struct SubmitFileForm {
    /// Required when an admin submits on a student's behalf
    pub student_id: Option<i32>,
    pub content: Option<String>,
    #[schema(value_type = String, format = Binary)]
    pub file: Vec<u8>,
}

/// Fields of a file submission besides the file content
#[derive(Clone, Debug)]
pub struct NewFileSubmission {
    pub assignment_id: i32,
    pub student_id: i32,
    pub content: Option<String>,
    pub file_name: String,
}

#[derive(Clone, Debug, Deserialize, ToSchema)]
pub struct GradeSubmissionDto {
    pub score: f64,
    pub feedback: Option<String>,
}

#[derive(Clone, Debug, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct SubmissionListParams {
    pub ungraded_only: Option<bool>,
}
