//! Course catalogue.

use sea_orm::{ConnectionTrait, DatabaseConnection, TransactionTrait};

use crate::{
    model::{
        api::DEFAULT_PAGE_LIMIT,
        course::{CourseDto, CourseListParams, CreateCourseDto, UpdateCourseDto},
        student::StudentDto,
    },
    server::{
        data::{
            assignment::AssignmentRepository,
            course::{CourseChanges, CourseFilter, CourseRepository, NewCourse},
            enrollment::EnrollmentRepository,
            grade::GradeRepository,
            is_unique_violation,
            material::MaterialRepository,
            submission::SubmissionRepository,
            teacher::TeacherRepository,
            user::UserRepository,
        },
        error::{domain::DomainError, Error},
        util::storage,
    },
};

fn validate_credits(credits: f64) -> Result<(), DomainError> {
    if credits > 0.0 {
        Ok(())
    } else {
        Err(DomainError::invalid_argument("credits must be positive"))
    }
}

fn validate_capacity(capacity: i32) -> Result<(), DomainError> {
    if capacity > 0 {
        Ok(())
    } else {
        Err(DomainError::invalid_argument("capacity must be positive"))
    }
}

/// Deletes a course and everything hanging off it, children first.
///
/// Returns the paths of the uploaded files that belonged to the deleted rows, for removal
/// once the transaction commits, or `None` when the course did not exist.
pub(crate) async fn delete_course_cascade<C: ConnectionTrait>(
    db: &C,
    course_id: i32,
) -> Result<Option<Vec<String>>, Error> {
    let assignment_repo = AssignmentRepository::new(db);
    let submission_repo = SubmissionRepository::new(db);
    let material_repo = MaterialRepository::new(db);

    let assignment_ids = assignment_repo.ids_for_course(course_id).await?;
    let mut file_paths = submission_repo
        .file_paths_for_assignments(assignment_ids.clone())
        .await?;
    file_paths.extend(material_repo.file_paths_for_course(course_id).await?);

    submission_repo
        .delete_for_assignments(assignment_ids)
        .await?;
    assignment_repo.delete_for_course(course_id).await?;
    material_repo.delete_for_course(course_id).await?;
    GradeRepository::new(db).delete_for_course(course_id).await?;
    EnrollmentRepository::new(db)
        .delete_for_course(course_id)
        .await?;

    let result = CourseRepository::new(db).delete(course_id).await?;

    Ok((result.rows_affected > 0).then_some(file_paths))
}

pub struct CourseService<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> CourseService<'a> {
    /// Creates a new instance of [`CourseService`]
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    /// Creates an active course
    ///
    /// # Returns
    /// - `Ok(CourseDto)` - The created course
    /// - `Err(DomainError::AlreadyExists)` - Course code is taken
    /// - `Err(DomainError::NotFound)` - Teacher does not exist
    /// - `Err(DomainError::InvalidArgument)` - Credits or capacity not positive
    pub async fn create(&self, course: CreateCourseDto) -> Result<CourseDto, Error> {
        let course_repo = CourseRepository::new(self.db);

        let course_code = course.course_code.trim().to_string();
        if course_code.is_empty() {
            return Err(DomainError::invalid_argument("course code must not be empty").into());
        }

        if course_repo.find_by_code(&course_code).await?.is_some() {
            return Err(DomainError::already_exists("course code").into());
        }

        TeacherRepository::new(self.db)
            .get(course.teacher_id)
            .await?
            .ok_or(DomainError::NotFound("teacher"))?;

        validate_credits(course.credits)?;
        validate_capacity(course.capacity)?;

        let new_course = NewCourse {
            course_code,
            name: course.name,
            description: course.description,
            teacher_id: course.teacher_id,
            credits: course.credits,
            capacity: course.capacity,
            schedule: course.schedule,
            location: course.location,
            semester: course.semester,
        };

        let course = match course_repo.create(new_course).await {
            Ok(course) => course,
            Err(e) if is_unique_violation(&e) => {
                return Err(DomainError::already_exists("course code").into())
            }
            Err(e) => return Err(e.into()),
        };

        tracing::info!("Created course {} (ID {})", course.course_code, course.id);

        Ok(course.into())
    }

    pub async fn get(&self, course_id: i32) -> Result<CourseDto, Error> {
        let course = CourseRepository::new(self.db)
            .get(course_id)
            .await?
            .ok_or(DomainError::NotFound("course"))?;

        Ok(course.into())
    }

    pub async fn get_by_code(&self, course_code: &str) -> Result<CourseDto, Error> {
        let course = CourseRepository::new(self.db)
            .find_by_code(course_code)
            .await?
            .ok_or(DomainError::NotFound("course"))?;

        Ok(course.into())
    }

    pub async fn list(&self, params: CourseListParams) -> Result<Vec<CourseDto>, Error> {
        let filter = CourseFilter {
            teacher_id: params.teacher_id,
            semester: params.semester,
            active_only: params.active_only.unwrap_or(false),
            name_contains: params.search.filter(|s| !s.is_empty()),
        };

        let courses = CourseRepository::new(self.db)
            .list(filter, params.skip.unwrap_or(0), params.limit.unwrap_or(DEFAULT_PAGE_LIMIT))
            .await?;

        Ok(courses.into_iter().map(CourseDto::from).collect())
    }

    /// Field-level update; a new teacher must exist
    pub async fn update(
        &self,
        course_id: i32,
        changes: UpdateCourseDto,
    ) -> Result<CourseDto, Error> {
        let course_repo = CourseRepository::new(self.db);

        course_repo
            .get(course_id)
            .await?
            .ok_or(DomainError::NotFound("course"))?;

        if let Some(teacher_id) = changes.teacher_id {
            TeacherRepository::new(self.db)
                .get(teacher_id)
                .await?
                .ok_or(DomainError::NotFound("teacher"))?;
        }
        if let Some(credits) = changes.credits {
            validate_credits(credits)?;
        }
        if let Some(capacity) = changes.capacity {
            validate_capacity(capacity)?;
        }

        let course_changes = CourseChanges {
            name: changes.name,
            description: changes.description,
            teacher_id: changes.teacher_id,
            credits: changes.credits,
            capacity: changes.capacity,
            schedule: changes.schedule,
            location: changes.location,
            semester: changes.semester,
        };

        let course = course_repo
            .update(course_id, course_changes)
            .await?
            .ok_or(DomainError::NotFound("course"))?;

        Ok(course.into())
    }

    pub async fn set_active(&self, course_id: i32, is_active: bool) -> Result<CourseDto, Error> {
        let course = CourseRepository::new(self.db)
            .set_active(course_id, is_active)
            .await?
            .ok_or(DomainError::NotFound("course"))?;

        tracing::info!(
            "{} course ID {}",
            if is_active { "Activated" } else { "Deactivated" },
            course_id
        );

        Ok(course.into())
    }

    /// Deletes the course along with its assignments, submissions, grades and enrollments
    pub async fn delete(&self, course_id: i32) -> Result<(), Error> {
        let txn = self.db.begin().await?;

        let file_paths = delete_course_cascade(&txn, course_id)
            .await?
            .ok_or(DomainError::NotFound("course"))?;

        txn.commit().await?;

        storage::discard_all(file_paths).await;

        tracing::info!("Deleted course ID {}", course_id);

        Ok(())
    }

    /// Students enrolled in the course, in enrollment order
    pub async fn enrolled_students(&self, course_id: i32) -> Result<Vec<StudentDto>, Error> {
        CourseRepository::new(self.db)
            .get(course_id)
            .await?
            .ok_or(DomainError::NotFound("course"))?;

        let students = EnrollmentRepository::new(self.db)
            .students_for_course(course_id)
            .await?;

        let user_repo = UserRepository::new(self.db);
        let mut dtos = Vec::with_capacity(students.len());
        for student in students {
            let user = user_repo
                .get(student.user_id)
                .await?
                .ok_or_else(|| {
                    Error::InternalError(format!(
                        "Student ID {} references missing user ID {}",
                        student.id, student.user_id
                    ))
                })?;

            dtos.push(StudentDto::new(student, user));
        }

        Ok(dtos)
    }
}
