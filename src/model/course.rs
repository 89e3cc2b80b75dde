use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

#[derive(Clone, Debug, Serialize, Deserialize, ToSchema)]
pub struct CourseDto {
    pub id: i32,
    pub course_code: String,
    pub name: String,
    pub description: Option<String>,
    pub teacher_id: i32,
    pub credits: f64,
    pub capacity: i32,
    pub schedule: Option<String>,
    pub location: Option<String>,
    pub semester: String,
    pub is_active: bool,
    pub created_at: NaiveDateTime,
}

impl From<entity::course::Model> for CourseDto {
    fn from(course: entity::course::Model) -> Self {
        Self {
            id: course.id,
            course_code: course.course_code,
            name: course.name,
            description: course.description,
            teacher_id: course.teacher_id,
            credits: course.credits,
            capacity: course.capacity,
            schedule: course.schedule,
            location: course.location,
            semester: course.semester,
            is_active: course.is_active,
            created_at: course.created_at,
        }
    }
}

#[derive(Clone, Debug, Deserialize, ToSchema)]
pub struct CreateCourseDto {
    pub course_code: String,
    pub name: String,
    pub description: Option<String>,
    pub teacher_id: i32,
    pub credits: f64,
    pub capacity: i32,
    /// Free text such as `Mon/Wed 10:00-11:30`; only weekday names are interpreted
    pub schedule: Option<String>,
    pub location: Option<String>,
    pub semester: String,
}

#[derive(Clone, Debug, Default, Deserialize, ToSchema)]
pub struct UpdateCourseDto {
    pub name: Option<String>,
    pub description: Option<String>,
    pub teacher_id: Option<i32>,
    pub credits: Option<f64>,
    pub capacity: Option<i32>,
    pub schedule: Option<String>,
    pub location: Option<String>,
    pub semester: Option<String>,
}

#[derive(Clone, Debug, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct CourseListParams {
    pub teacher_id: Option<i32>,
    pub semester: Option<String>,
    pub active_only: Option<bool>,
    /// Substring of the course name
    pub search: Option<String>,
    pub skip: Option<u64>,
    pub limit: Option<u64>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct CapacityDto {
    pub capacity: i32,
    pub current_enrollment: u64,
    pub available_slots: u64,
    pub is_full: bool,
}
