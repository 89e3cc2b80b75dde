//! Teacher profiles.

use entity::user::UserRole;
use sea_orm::{DatabaseConnection, TransactionTrait};

use crate::{
    model::{
        api::DEFAULT_PAGE_LIMIT,
        course::CourseDto,
        teacher::{CreateTeacherDto, TeacherDto, TeacherListParams, UpdateTeacherDto},
    },
    server::{
        data::{
            course::CourseRepository,
            is_unique_violation,
            notification::NotificationRepository,
            teacher::{NewTeacher, TeacherChanges, TeacherRepository},
            user::{UserChanges, UserRepository},
        },
        error::{domain::DomainError, Error},
        service::{course::delete_course_cascade, user::insert_user},
        util::storage,
    },
};

fn missing_user(teacher: &entity::teacher::Model) -> Error {
    Error::InternalError(format!(
        "Teacher ID {} references missing user ID {}",
        teacher.id, teacher.user_id
    ))
}

pub struct TeacherService<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> TeacherService<'a> {
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    /// Creates the teacher's user and profile in one transaction
    pub async fn create(&self, teacher: CreateTeacherDto) -> Result<TeacherDto, Error> {
        let employee_number = teacher.employee_number.trim().to_string();
        if employee_number.is_empty() {
            return Err(
                DomainError::invalid_argument("employee number must not be empty").into(),
            );
        }

        let txn = self.db.begin().await?;

        let teacher_repo = TeacherRepository::new(&txn);
        if teacher_repo
            .find_by_employee_number(&employee_number)
            .await?
            .is_some()
        {
            return Err(DomainError::already_exists("employee number").into());
        }

        let user = insert_user(
            &txn,
            teacher.username,
            teacher.email,
            &teacher.password,
            teacher.full_name,
            UserRole::Teacher,
        )
        .await?;

        let new_teacher = NewTeacher {
            user_id: user.id,
            employee_number,
            department: teacher.department,
            title: teacher.title,
            phone: teacher.phone,
            office: teacher.office,
        };

        let profile = match teacher_repo.create(new_teacher).await {
            Ok(profile) => profile,
            Err(e) if is_unique_violation(&e) => {
                return Err(DomainError::already_exists("employee number").into())
            }
            Err(e) => return Err(e.into()),
        };

        txn.commit().await?;

        tracing::info!(
            "Created teacher {} (ID {})",
            profile.employee_number,
            profile.id
        );

        Ok(TeacherDto::new(profile, user))
    }

    pub async fn get(&self, teacher_id: i32) -> Result<TeacherDto, Error> {
        let (teacher, user) = TeacherRepository::new(self.db)
            .get_with_user(teacher_id)
            .await?
            .ok_or(DomainError::NotFound("teacher"))?;

        let user = user.ok_or_else(|| missing_user(&teacher))?;

        Ok(TeacherDto::new(teacher, user))
    }

    pub async fn get_by_employee_number(&self, employee_number: &str) -> Result<TeacherDto, Error> {
        let teacher = TeacherRepository::new(self.db)
            .find_by_employee_number(employee_number)
            .await?
            .ok_or(DomainError::NotFound("teacher"))?;

        self.with_user(teacher).await
    }

    pub async fn get_by_user(&self, user_id: i32) -> Result<TeacherDto, Error> {
        let teacher = TeacherRepository::new(self.db)
            .find_by_user_id(user_id)
            .await?
            .ok_or(DomainError::NotFound("teacher"))?;

        self.with_user(teacher).await
    }

    async fn with_user(&self, teacher: entity::teacher::Model) -> Result<TeacherDto, Error> {
        let user = UserRepository::new(self.db)
            .get(teacher.user_id)
            .await?
            .ok_or_else(|| missing_user(&teacher))?;

        Ok(TeacherDto::new(teacher, user))
    }

    pub async fn list(&self, params: TeacherListParams) -> Result<Vec<TeacherDto>, Error> {
        let rows = TeacherRepository::new(self.db)
            .list(
                params.department.as_deref(),
                params.skip.unwrap_or(0),
                params.limit.unwrap_or(DEFAULT_PAGE_LIMIT),
            )
            .await?;

        rows.into_iter()
            .map(|(teacher, user)| {
                let user = user.ok_or_else(|| missing_user(&teacher))?;
                Ok(TeacherDto::new(teacher, user))
            })
            .collect()
    }

    pub async fn update(
        &self,
        teacher_id: i32,
        changes: UpdateTeacherDto,
    ) -> Result<TeacherDto, Error> {
        let txn = self.db.begin().await?;

        let teacher_repo = TeacherRepository::new(&txn);
        let user_repo = UserRepository::new(&txn);

        let teacher = teacher_repo
            .get(teacher_id)
            .await?
            .ok_or(DomainError::NotFound("teacher"))?;

        if let Some(email) = changes.email.as_deref() {
            if let Some(owner) = user_repo.find_by_email(email).await? {
                if owner.id != teacher.user_id {
                    return Err(DomainError::already_exists("email").into());
                }
            }
        }

        let user_changes = UserChanges {
            email: changes.email,
            full_name: changes.full_name,
            ..Default::default()
        };
        let user = user_repo
            .update(teacher.user_id, user_changes)
            .await?
            .ok_or_else(|| missing_user(&teacher))?;

        let teacher_changes = TeacherChanges {
            department: changes.department,
            title: changes.title,
            phone: changes.phone,
            office: changes.office,
        };
        let teacher = teacher_repo
            .update(teacher_id, teacher_changes)
            .await?
            .ok_or(DomainError::NotFound("teacher"))?;

        txn.commit().await?;

        Ok(TeacherDto::new(teacher, user))
    }

    /// Deletes the teacher, every course they teach (with its dependents) and their user
    pub async fn delete(&self, teacher_id: i32) -> Result<(), Error> {
        let txn = self.db.begin().await?;

        let teacher_repo = TeacherRepository::new(&txn);
        let teacher = teacher_repo
            .get(teacher_id)
            .await?
            .ok_or(DomainError::NotFound("teacher"))?;

        let courses = CourseRepository::new(&txn)
            .list_by_teacher(teacher_id)
            .await?;
        let mut file_paths = Vec::new();
        for course in &courses {
            if let Some(paths) = delete_course_cascade(&txn, course.id).await? {
                file_paths.extend(paths);
            }
        }

        teacher_repo.delete(teacher_id).await?;
        NotificationRepository::new(&txn)
            .delete_for_user(teacher.user_id)
            .await?;
        UserRepository::new(&txn).delete(teacher.user_id).await?;

        txn.commit().await?;

        storage::discard_all(file_paths).await;

        tracing::info!(
            "Deleted teacher ID {} with {} courses",
            teacher_id,
            courses.len()
        );

        Ok(())
    }

    /// Courses taught by the teacher
    pub async fn courses(&self, teacher_id: i32) -> Result<Vec<CourseDto>, Error> {
        TeacherRepository::new(self.db)
            .get(teacher_id)
            .await?
            .ok_or(DomainError::NotFound("teacher"))?;

        let courses = CourseRepository::new(self.db)
            .list_by_teacher(teacher_id)
            .await?;

        Ok(courses.into_iter().map(CourseDto::from).collect())
    }
}
