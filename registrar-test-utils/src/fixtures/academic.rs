use chrono::{Duration, NaiveDateTime, Utc};
use sea_orm::{ActiveValue, EntityTrait};

use crate::{error::TestError, TestContext};

impl TestContext {
    pub fn academic(&self) -> AcademicFixtures<'_> {
        AcademicFixtures { context: self }
    }
}

pub struct AcademicFixtures<'a> {
    context: &'a TestContext,
}

impl<'a> AcademicFixtures<'a> {
    /// Inserts an active 3 credit course named `Course <code>` in semester `2024 Spring`
    pub async fn insert_course(
        &self,
        course_code: &str,
        teacher_id: i32,
        capacity: i32,
        schedule: Option<&str>,
    ) -> Result<entity::course::Model, TestError> {
        Ok(entity::prelude::Course::insert(entity::course::ActiveModel {
            course_code: ActiveValue::Set(course_code.to_string()),
            name: ActiveValue::Set(format!("Course {}", course_code)),
            description: ActiveValue::Set(None),
            teacher_id: ActiveValue::Set(teacher_id),
            credits: ActiveValue::Set(3.0),
            capacity: ActiveValue::Set(capacity),
            schedule: ActiveValue::Set(schedule.map(str::to_string)),
            location: ActiveValue::Set(None),
            semester: ActiveValue::Set("2024 Spring".to_string()),
            is_active: ActiveValue::Set(true),
            created_at: ActiveValue::Set(Utc::now().naive_utc()),
            ..Default::default()
        })
        .exec_with_returning(&self.context.db)
        .await?)
    }

    pub async fn insert_inactive_course(
        &self,
        course_code: &str,
        teacher_id: i32,
    ) -> Result<entity::course::Model, TestError> {
        let course = self.insert_course(course_code, teacher_id, 30, None).await?;

        Ok(entity::prelude::Course::update(entity::course::ActiveModel {
            id: ActiveValue::Unchanged(course.id),
            is_active: ActiveValue::Set(false),
            ..Default::default()
        })
        .exec(&self.context.db)
        .await?)
    }

    pub async fn insert_enrollment(
        &self,
        student_id: i32,
        course_id: i32,
    ) -> Result<entity::enrollment::Model, TestError> {
        Ok(
            entity::prelude::Enrollment::insert(entity::enrollment::ActiveModel {
                student_id: ActiveValue::Set(student_id),
                course_id: ActiveValue::Set(course_id),
                enrolled_at: ActiveValue::Set(Utc::now().naive_utc()),
                ..Default::default()
            })
            .exec_with_returning(&self.context.db)
            .await?,
        )
    }

    /// Inserts a grade row as-is; no range check or letter derivation
    pub async fn insert_grade(
        &self,
        student_id: i32,
        course_id: i32,
        score: f64,
    ) -> Result<entity::grade::Model, TestError> {
        let now = Utc::now().naive_utc();

        Ok(entity::prelude::Grade::insert(entity::grade::ActiveModel {
            student_id: ActiveValue::Set(student_id),
            course_id: ActiveValue::Set(course_id),
            score: ActiveValue::Set(score),
            letter_grade: ActiveValue::Set(None),
            comments: ActiveValue::Set(None),
            recorded_at: ActiveValue::Set(now),
            updated_at: ActiveValue::Set(now),
            ..Default::default()
        })
        .exec_with_returning(&self.context.db)
        .await?)
    }

    /// Inserts an assignment due one week from now
    pub async fn insert_assignment(
        &self,
        course_id: i32,
        title: &str,
        total_points: f64,
    ) -> Result<entity::assignment::Model, TestError> {
        let now = Utc::now().naive_utc();

        self.insert_assignment_due(course_id, title, total_points, now + Duration::days(7))
            .await
    }

    pub async fn insert_assignment_due(
        &self,
        course_id: i32,
        title: &str,
        total_points: f64,
        due_date: NaiveDateTime,
    ) -> Result<entity::assignment::Model, TestError> {
        Ok(
            entity::prelude::Assignment::insert(entity::assignment::ActiveModel {
                course_id: ActiveValue::Set(course_id),
                title: ActiveValue::Set(title.to_string()),
                description: ActiveValue::Set(None),
                due_date: ActiveValue::Set(due_date),
                total_points: ActiveValue::Set(total_points),
                created_at: ActiveValue::Set(Utc::now().naive_utc()),
                ..Default::default()
            })
            .exec_with_returning(&self.context.db)
            .await?,
        )
    }

    pub async fn insert_submission(
        &self,
        assignment_id: i32,
        student_id: i32,
        content: &str,
    ) -> Result<entity::submission::Model, TestError> {
        Ok(
            entity::prelude::Submission::insert(entity::submission::ActiveModel {
                assignment_id: ActiveValue::Set(assignment_id),
                student_id: ActiveValue::Set(student_id),
                content: ActiveValue::Set(Some(content.to_string())),
                file_path: ActiveValue::Set(None),
                submitted_at: ActiveValue::Set(Utc::now().naive_utc()),
                score: ActiveValue::Set(None),
                feedback: ActiveValue::Set(None),
                graded_at: ActiveValue::Set(None),
                ..Default::default()
            })
            .exec_with_returning(&self.context.db)
            .await?,
        )
    }

    /// Inserts a material whose type is derived from the extension of `file_path`
    pub async fn insert_material(
        &self,
        course_id: i32,
        title: &str,
        file_path: &str,
    ) -> Result<entity::material::Model, TestError> {
        let file_type = match file_path.rsplit_once('.').map(|(_, ext)| ext) {
            Some("pdf") => "pdf",
            Some("pptx") => "presentation",
            _ => "other",
        };

        Ok(
            entity::prelude::Material::insert(entity::material::ActiveModel {
                course_id: ActiveValue::Set(course_id),
                title: ActiveValue::Set(title.to_string()),
                description: ActiveValue::Set(None),
                file_path: ActiveValue::Set(file_path.to_string()),
                file_type: ActiveValue::Set(file_type.to_string()),
                file_size: ActiveValue::Set(0),
                uploaded_at: ActiveValue::Set(Utc::now().naive_utc()),
                ..Default::default()
            })
            .exec_with_returning(&self.context.db)
            .await?,
        )
    }

    pub async fn insert_notification(
        &self,
        user_id: i32,
        title: &str,
    ) -> Result<entity::notification::Model, TestError> {
        Ok(
            entity::prelude::Notification::insert(entity::notification::ActiveModel {
                user_id: ActiveValue::Set(user_id),
                title: ActiveValue::Set(title.to_string()),
                message: ActiveValue::Set(format!("{} message", title)),
                category: ActiveValue::Set(None),
                is_read: ActiveValue::Set(false),
                created_at: ActiveValue::Set(Utc::now().naive_utc()),
                ..Default::default()
            })
            .exec_with_returning(&self.context.db)
            .await?,
        )
    }

    /// Stores a settings document as the singleton config row
    pub async fn insert_system_config(
        &self,
        settings: serde_json::Value,
        version: i32,
    ) -> Result<entity::system_config::Model, TestError> {
        Ok(
            entity::prelude::SystemConfig::insert(entity::system_config::ActiveModel {
                id: ActiveValue::Set(1),
                settings: ActiveValue::Set(settings),
                version: ActiveValue::Set(version),
                updated_at: ActiveValue::Set(Utc::now().naive_utc()),
            })
            .exec_with_returning(&self.context.db)
            .await?,
        )
    }
}
