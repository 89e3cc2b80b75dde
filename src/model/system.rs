use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Typed view of the runtime settings document.
///
/// The stored document may carry extra keys; only these are validated.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct SystemSettings {
    pub current_semester: String,
    pub enrollment_open: bool,
    pub max_enrollments_per_student: u32,
    pub grade_release_enabled: bool,
    pub maintenance_mode: bool,
    pub allow_late_submissions: bool,
    pub late_penalty_percent: f64,
}

impl Default for SystemSettings {
    fn default() -> Self {
        Self {
            current_semester: "2024 Spring".to_string(),
            enrollment_open: true,
            max_enrollments_per_student: 10,
            grade_release_enabled: true,
            maintenance_mode: false,
            allow_late_submissions: true,
            late_penalty_percent: 10.0,
        }
    }
}

#[derive(Clone, Debug, Serialize, Deserialize, ToSchema)]
pub struct SystemConfigDto {
    /// 0 until the document is first written
    pub version: i32,
    #[schema(value_type = Object)]
    pub settings: serde_json::Value,
}

#[derive(Clone, Debug, Deserialize, ToSchema)]
pub struct UpdateConfigDto {
    /// Keys to merge into the stored document
    #[schema(value_type = Object)]
    pub settings: serde_json::Value,
    /// When given, the write fails with 409 if the stored version differs
    pub expected_version: Option<i32>,
}

#[derive(Clone, Debug, Deserialize, ToSchema)]
pub struct SetSemesterDto {
    pub semester: String,
}

#[derive(Clone, Debug, Deserialize, ToSchema)]
pub struct ToggleEnrollmentDto {
    pub open: bool,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct SystemStatsDto {
    pub total_users: u64,
    pub total_students: u64,
    pub total_teachers: u64,
    pub total_courses: u64,
    pub total_enrollments: u64,
    pub active_users: u64,
    pub current_semester: String,
}
