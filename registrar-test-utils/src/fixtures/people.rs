use chrono::Utc;
use entity::{student::StudentStatus, user::UserRole};
use sea_orm::{ActiveValue, EntityTrait};

use crate::{error::TestError, TestContext};

/// Placeholder stored in `password_hash` for fixture users; it never verifies.
pub static FIXTURE_PASSWORD_HASH: &str = "fixture-without-password";

impl TestContext {
    pub fn people(&self) -> PeopleFixtures<'_> {
        PeopleFixtures { context: self }
    }
}

pub struct PeopleFixtures<'a> {
    context: &'a TestContext,
}

impl<'a> PeopleFixtures<'a> {
    /// Inserts an active user with email `<username>@example.com`
    pub async fn insert_user(
        &self,
        username: &str,
        role: UserRole,
    ) -> Result<entity::user::Model, TestError> {
        let now = Utc::now().naive_utc();

        Ok(entity::prelude::User::insert(entity::user::ActiveModel {
            username: ActiveValue::Set(username.to_string()),
            email: ActiveValue::Set(format!("{}@example.com", username)),
            password_hash: ActiveValue::Set(FIXTURE_PASSWORD_HASH.to_string()),
            full_name: ActiveValue::Set(username.to_string()),
            role: ActiveValue::Set(role),
            is_active: ActiveValue::Set(true),
            created_at: ActiveValue::Set(now),
            updated_at: ActiveValue::Set(now),
            ..Default::default()
        })
        .exec_with_returning(&self.context.db)
        .await?)
    }

    pub async fn insert_admin(&self, username: &str) -> Result<entity::user::Model, TestError> {
        self.insert_user(username, UserRole::Admin).await
    }

    /// Inserts a student user together with an active student profile
    pub async fn insert_student(
        &self,
        username: &str,
        student_number: &str,
    ) -> Result<(entity::user::Model, entity::student::Model), TestError> {
        let user = self.insert_user(username, UserRole::Student).await?;

        let student = entity::prelude::Student::insert(entity::student::ActiveModel {
            user_id: ActiveValue::Set(user.id),
            student_number: ActiveValue::Set(student_number.to_string()),
            grade_level: ActiveValue::Set(None),
            major: ActiveValue::Set(None),
            phone: ActiveValue::Set(None),
            status: ActiveValue::Set(StudentStatus::Active),
            enrollment_date: ActiveValue::Set(Utc::now().naive_utc()),
            ..Default::default()
        })
        .exec_with_returning(&self.context.db)
        .await?;

        Ok((user, student))
    }

    /// Inserts a teacher user together with a teacher profile
    pub async fn insert_teacher(
        &self,
        username: &str,
        employee_number: &str,
    ) -> Result<(entity::user::Model, entity::teacher::Model), TestError> {
        let user = self.insert_user(username, UserRole::Teacher).await?;

        let teacher = entity::prelude::Teacher::insert(entity::teacher::ActiveModel {
            user_id: ActiveValue::Set(user.id),
            employee_number: ActiveValue::Set(employee_number.to_string()),
            department: ActiveValue::Set(None),
            title: ActiveValue::Set(None),
            phone: ActiveValue::Set(None),
            office: ActiveValue::Set(None),
            ..Default::default()
        })
        .exec_with_returning(&self.context.db)
        .await?;

        Ok((user, teacher))
    }

    /// Marks an existing user inactive
    pub async fn deactivate_user(&self, user_id: i32) -> Result<(), TestError> {
        entity::prelude::User::update(entity::user::ActiveModel {
            id: ActiveValue::Unchanged(user_id),
            is_active: ActiveValue::Set(false),
            ..Default::default()
        })
        .exec(&self.context.db)
        .await?;

        Ok(())
    }
}
