//! Student profiles.
//!
//! A student is a user with the `student` role plus a profile row; both are created and
//! deleted together.

use entity::user::UserRole;
use sea_orm::{DatabaseConnection, TransactionTrait};

use crate::{
    model::{
        api::DEFAULT_PAGE_LIMIT,
        student::{
            ChangeStudentStatusDto, CreateStudentDto, StudentDto, StudentListParams,
            UpdateStudentDto,
        },
    },
    server::{
        data::{
            enrollment::EnrollmentRepository,
            grade::GradeRepository,
            is_unique_violation,
            notification::NotificationRepository,
            student::{NewStudent, StudentChanges, StudentRepository},
            submission::SubmissionRepository,
            user::{UserChanges, UserRepository},
        },
        error::{domain::DomainError, Error},
        service::user::insert_user,
        util::storage,
    },
};

fn missing_user(student: &entity::student::Model) -> Error {
    Error::InternalError(format!(
        "Student ID {} references missing user ID {}",
        student.id, student.user_id
    ))
}

pub struct StudentService<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> StudentService<'a> {
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    /// Creates the student's user and profile in one transaction
    ///
    /// # Returns
    /// - `Ok(StudentDto)` - The new student
    /// - `Err(DomainError::AlreadyExists)` - Username, email or student number is taken
    pub async fn create(&self, student: CreateStudentDto) -> Result<StudentDto, Error> {
        let student_number = student.student_number.trim().to_string();
        if student_number.is_empty() {
            return Err(DomainError::invalid_argument("student number must not be empty").into());
        }

        let txn = self.db.begin().await?;

        let student_repo = StudentRepository::new(&txn);
        if student_repo
            .find_by_number(&student_number)
            .await?
            .is_some()
        {
            return Err(DomainError::already_exists("student number").into());
        }

        let user = insert_user(
            &txn,
            student.username,
            student.email,
            &student.password,
            student.full_name,
            UserRole::Student,
        )
        .await?;

        let new_student = NewStudent {
            user_id: user.id,
            student_number,
            grade_level: student.grade_level,
            major: student.major,
            phone: student.phone,
        };

        let profile = match student_repo.create(new_student).await {
            Ok(profile) => profile,
            Err(e) if is_unique_violation(&e) => {
                return Err(DomainError::already_exists("student number").into())
            }
            Err(e) => return Err(e.into()),
        };

        txn.commit().await?;

        tracing::info!(
            "Created student {} (ID {})",
            profile.student_number,
            profile.id
        );

        Ok(StudentDto::new(profile, user))
    }

    pub async fn get(&self, student_id: i32) -> Result<StudentDto, Error> {
        let (student, user) = StudentRepository::new(self.db)
            .get_with_user(student_id)
            .await?
            .ok_or(DomainError::NotFound("student"))?;

        let user = user.ok_or_else(|| missing_user(&student))?;

        Ok(StudentDto::new(student, user))
    }

    pub async fn get_by_number(&self, student_number: &str) -> Result<StudentDto, Error> {
        let student = StudentRepository::new(self.db)
            .find_by_number(student_number)
            .await?
            .ok_or(DomainError::NotFound("student"))?;

        self.with_user(student).await
    }

    pub async fn get_by_user(&self, user_id: i32) -> Result<StudentDto, Error> {
        let student = StudentRepository::new(self.db)
            .find_by_user_id(user_id)
            .await?
            .ok_or(DomainError::NotFound("student"))?;

        self.with_user(student).await
    }

    async fn with_user(&self, student: entity::student::Model) -> Result<StudentDto, Error> {
        let user = UserRepository::new(self.db)
            .get(student.user_id)
            .await?
            .ok_or_else(|| missing_user(&student))?;

        Ok(StudentDto::new(student, user))
    }

    pub async fn list(&self, params: StudentListParams) -> Result<Vec<StudentDto>, Error> {
        let rows = StudentRepository::new(self.db)
            .list(
                params.status,
                params.skip.unwrap_or(0),
                params.limit.unwrap_or(DEFAULT_PAGE_LIMIT),
            )
            .await?;

        rows.into_iter()
            .map(|(student, user)| {
                let user = user.ok_or_else(|| missing_user(&student))?;
                Ok(StudentDto::new(student, user))
            })
            .collect()
    }

    /// Updates profile fields and the owning user's name and email
    pub async fn update(
        &self,
        student_id: i32,
        changes: UpdateStudentDto,
    ) -> Result<StudentDto, Error> {
        let txn = self.db.begin().await?;

        let student_repo = StudentRepository::new(&txn);
        let user_repo = UserRepository::new(&txn);

        let student = student_repo
            .get(student_id)
            .await?
            .ok_or(DomainError::NotFound("student"))?;

        if let Some(email) = changes.email.as_deref() {
            if let Some(owner) = user_repo.find_by_email(email).await? {
                if owner.id != student.user_id {
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
            .update(student.user_id, user_changes)
            .await?
            .ok_or_else(|| missing_user(&student))?;

        let student_changes = StudentChanges {
            grade_level: changes.grade_level,
            major: changes.major,
            phone: changes.phone,
        };
        let student = student_repo
            .update(student_id, student_changes)
            .await?
            .ok_or(DomainError::NotFound("student"))?;

        txn.commit().await?;

        Ok(StudentDto::new(student, user))
    }

    pub async fn change_status(
        &self,
        student_id: i32,
        change: ChangeStudentStatusDto,
    ) -> Result<StudentDto, Error> {
        let student = StudentRepository::new(self.db)
            .set_status(student_id, change.status)
            .await?
            .ok_or(DomainError::NotFound("student"))?;

        tracing::info!(
            "Changed status of student ID {} to {:?}",
            student_id,
            student.status
        );

        self.with_user(student).await
    }

    /// Deletes the student and their user along with submissions, grades, enrollments and
    /// notifications
    pub async fn delete(&self, student_id: i32) -> Result<(), Error> {
        let txn = self.db.begin().await?;

        let student_repo = StudentRepository::new(&txn);
        let student = student_repo
            .get(student_id)
            .await?
            .ok_or(DomainError::NotFound("student"))?;

        let submission_repo = SubmissionRepository::new(&txn);
        let file_paths = submission_repo.file_paths_for_student(student_id).await?;
        submission_repo.delete_for_student(student_id).await?;
        GradeRepository::new(&txn)
            .delete_for_student(student_id)
            .await?;
        EnrollmentRepository::new(&txn)
            .delete_for_student(student_id)
            .await?;
        student_repo.delete(student_id).await?;
        NotificationRepository::new(&txn)
            .delete_for_user(student.user_id)
            .await?;
        UserRepository::new(&txn).delete(student.user_id).await?;

        txn.commit().await?;

        storage::discard_all(file_paths).await;

        tracing::info!(
            "Deleted student ID {} and user ID {}",
            student_id,
            student.user_id
        );

        Ok(())
    }
}
