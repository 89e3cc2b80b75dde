use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Clone, Debug, Serialize, Deserialize, ToSchema)]
pub struct GradeDto {
    pub id: i32,
    pub student_id: i32,
    pub course_id: i32,
    pub score: f64,
    pub letter_grade: Option<String>,
    pub comments: Option<String>,
    pub recorded_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

impl From<entity::grade::Model> for GradeDto {
    fn from(grade: entity::grade::Model) -> Self {
        Self {
            id: grade.id,
            student_id: grade.student_id,
            course_id: grade.course_id,
            score: grade.score,
            letter_grade: grade.letter_grade,
            comments: grade.comments,
            recorded_at: grade.recorded_at,
            updated_at: grade.updated_at,
        }
    }
}

#[derive(Clone, Debug, Deserialize, ToSchema)]
pub struct RecordGradeDto {
    pub student_id: i32,
    pub course_id: i32,
    pub score: f64,
    /// Derived from the score when omitted
    pub letter_grade: Option<String>,
    pub comments: Option<String>,
}

#[derive(Clone, Debug, Default, Deserialize, ToSchema)]
pub struct UpdateGradeDto {
    pub score: Option<f64>,
    pub letter_grade: Option<String>,
    /// Omit to keep the comments, `null` to clear them
    #[serde(default, deserialize_with = "crate::model::api::nullable")]
    #[schema(value_type = Option<String>)]
    pub comments: Option<Option<String>>,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct CourseStatisticsDto {
    pub average: f64,
    pub maximum: f64,
    pub minimum: f64,
    /// Percentage of grades at or above 60
    pub pass_rate: f64,
    pub total_students: u64,
}

#[derive(Clone, Debug, Serialize, Deserialize, ToSchema)]
pub struct GpaDto {
    pub student_id: i32,
    /// Unweighted mean of raw scores on the 0-100 scale
    pub gpa: f64,
}
