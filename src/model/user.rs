use chrono::NaiveDateTime;
use entity::user::UserRole;
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

#[derive(Clone, Debug, Serialize, Deserialize, ToSchema)]
pub struct UserDto {
    pub id: i32,
    pub username: String,
    pub email: String,
    pub full_name: String,
    #[schema(value_type = String, example = "student")]
    pub role: UserRole,
    pub is_active: bool,
    pub created_at: NaiveDateTime,
}

impl From<entity::user::Model> for UserDto {
    fn from(user: entity::user::Model) -> Self {
        Self {
            id: user.id,
            username: user.username,
            email: user.email,
            full_name: user.full_name,
            role: user.role,
            is_active: user.is_active,
            created_at: user.created_at,
        }
    }
}

#[derive(Clone, Debug, Deserialize, ToSchema)]
pub struct CreateUserDto {
    pub username: String,
    pub email: String,
    pub password: String,
    pub full_name: String,
    #[schema(value_type = String, example = "student")]
    pub role: UserRole,
}

#[derive(Clone, Debug, Default, Deserialize, ToSchema)]
pub struct UpdateUserDto {
    pub username: Option<String>,
    pub email: Option<String>,
    pub password: Option<String>,
    pub full_name: Option<String>,
    #[schema(value_type = Option<String>)]
    pub role: Option<UserRole>,
    pub is_active: Option<bool>,
}

#[derive(Clone, Debug, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct UserListParams {
    #[param(value_type = Option<String>)]
    pub role: Option<UserRole>,
    pub active_only: Option<bool>,
    pub skip: Option<u64>,
    pub limit: Option<u64>,
}
