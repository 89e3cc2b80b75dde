use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

/// Teacher profile joined with the owning user's identity
#[derive(Clone, Debug, Serialize, Deserialize, ToSchema)]
pub struct TeacherDto {
    pub id: i32,
    pub user_id: i32,
    pub employee_number: String,
    pub full_name: String,
    pub email: String,
    pub department: Option<String>,
    pub title: Option<String>,
    pub phone: Option<String>,
    pub office: Option<String>,
}

impl TeacherDto {
    pub fn new(teacher: entity::teacher::Model, user: entity::user::Model) -> Self {
        Self {
            id: teacher.id,
            user_id: teacher.user_id,
            employee_number: teacher.employee_number,
            full_name: user.full_name,
            email: user.email,
            department: teacher.department,
            title: teacher.title,
            phone: teacher.phone,
            office: teacher.office,
        }
    }
}

#[derive(Clone, Debug, Deserialize, ToSchema)]
pub struct CreateTeacherDto {
    pub username: String,
    pub email: String,
    pub password: String,
    pub full_name: String,
    pub employee_number: String,
    pub department: Option<String>,
    pub title: Option<String>,
    pub phone: Option<String>,
    pub office: Option<String>,
}

#[derive(Clone, Debug, Default, Deserialize, ToSchema)]
pub struct UpdateTeacherDto {
    pub full_name: Option<String>,
    pub email: Option<String>,
    pub department: Option<String>,
    pub title: Option<String>,
    pub phone: Option<String>,
    pub office: Option<String>,
}

#[derive(Clone, Debug, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct TeacherListParams {
    pub department: Option<String>,
    pub skip: Option<u64>,
    pub limit: Option<u64>,
}
