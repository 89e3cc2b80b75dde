use entity::user::UserRole;

use crate::server::error::{auth::AuthError, Error};

/// The authenticated caller of a request.
///
/// Resolved from an `Authorization: Bearer <username>:<id>` header against the users table;
/// see the extractor in `controller::util::principal`.
#[derive(Clone, Debug, PartialEq)]
pub struct Principal {
    pub user_id: i32,
    pub username: String,
    pub role: UserRole,
}

impl Principal {
    pub fn new(user: &entity::user::Model) -> Self {
        Self {
            user_id: user.id,
            username: user.username.clone(),
            role: user.role,
        }
    }

    /// Token issued on login, `<username>:<id>`
    pub fn token(&self) -> String {
        format!("{}:{}", self.username, self.user_id)
    }

    /// Splits a bearer token into username and user ID
    pub fn parse_token(token: &str) -> Option<(&str, i32)> {
        let (username, id) = token.rsplit_once(':')?;
        if username.is_empty() {
            return None;
        }

        Some((username, id.parse().ok()?))
    }

    pub fn is_admin(&self) -> bool {
        self.role == UserRole::Admin
    }

    pub fn require_admin(&self) -> Result<(), Error> {
        self.require_any(&[UserRole::Admin])
    }

    /// Teacher or admin
    pub fn require_teacher(&self) -> Result<(), Error> {
        self.require_any(&[UserRole::Teacher, UserRole::Admin])
    }

    /// Student or admin
    pub fn require_student(&self) -> Result<(), Error> {
        self.require_any(&[UserRole::Student, UserRole::Admin])
    }

    fn require_any(&self, roles: &[UserRole]) -> Result<(), Error> {
        if roles.contains(&self.role) {
            return Ok(());
        }

        tracing::debug!(
            "User ID {} with role {:?} denied access",
            self.user_id,
            self.role
        );

        Err(AuthError::InsufficientRole { role: self.role }.into())
    }
}
