use chrono::NaiveDateTime;
use entity::student::StudentStatus;
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

/// Student profile joined with the owning user's identity
#[derive(Clone, Debug, Serialize, Deserialize, ToSchema)]
pub struct StudentDto {
    pub id: i32,
    pub user_id: i32,
    pub student_number: String,
    pub full_name: String,
    pub email: String,
    pub grade_level: Option<String>,
    pub major: Option<String>,
    pub phone: Option<String>,
    #[schema(value_type = String, example = "active")]
    pub status: StudentStatus,
    pub enrollment_date: NaiveDateTime,
}

impl StudentDto {
    pub fn new(student: entity::student::Model, user: entity::user::Model) -> Self {
        Self {
            id: student.id,
            user_id: student.user_id,
            student_number: student.student_number,
            full_name: user.full_name,
            email: user.email,
            grade_level: student.grade_level,
            major: student.major,
            phone: student.phone,
            status: student.status,
            enrollment_date: student.enrollment_date,
        }
    }
}

#[derive(Clone, Debug, Deserialize, ToSchema)]
pub struct CreateStudentDto {
    pub username: String,
    pub email: String,
    pub password: String,
    pub full_name: String,
    pub student_number: String,
    pub grade_level: Option<String>,
    pub major: Option<String>,
    pub phone: Option<String>,
}

#[derive(Clone, Debug, Default, Deserialize, ToSchema)]
pub struct UpdateStudentDto {
    pub full_name: Option<String>,
    pub email: Option<String>,
    pub grade_level: Option<String>,
    pub major: Option<String>,
    pub phone: Option<String>,
}

#[derive(Clone, Debug, Deserialize, ToSchema)]
pub struct ChangeStudentStatusDto {
    #[schema(value_type = String, example = "on_leave")]
    pub status: StudentStatus,
}

#[derive(Clone, Debug, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct StudentListParams {
    #[param(value_type = Option<String>)]
    pub status: Option<StudentStatus>,
    pub skip: Option<u64>,
    pub limit: Option<u64>,
}
