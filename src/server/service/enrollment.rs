//! Enrollment engine.
//!
//! Enrolling runs a fixed sequence of checks inside one transaction; the first failing check
//! decides the error:
//!
//! 1. the student exists
//! 2. the course exists
//! 3. the course is active
//! 4. the student is not already enrolled
//! 5. the course has a free seat, counted at call time
//! 6. the course schedule shares no weekday with any course the student is enrolled in
//!
//! The course row is read with a row lock (`SELECT ... FOR UPDATE`), so concurrent
//! enrollments into one course run their seat count one at a time and cannot overfill it.
//! The unique index on (student_id, course_id) backs check 4 against concurrent requests.

use sea_orm::{DatabaseConnection, TransactionTrait};

use crate::{
    model::{course::CapacityDto, course::CourseDto, enrollment::EnrollmentDto},
    server::{
        data::{
            course::CourseRepository, enrollment::EnrollmentRepository, is_unique_violation,
            student::StudentRepository,
        },
        error::{domain::DomainError, Error},
        service::notification::{NotificationEvent, Notifier},
        util::schedule,
    },
};

pub struct EnrollmentService<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> EnrollmentService<'a> {
    /// Creates a new instance of [`EnrollmentService`]
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    /// Enrolls a student in a course.
    ///
    /// On success an enrollment confirmation is sent to the student's user after commit.
    ///
    /// # Returns
    /// - `Ok(EnrollmentDto)` - The new enrollment
    /// - `Err(DomainError::NotFound)` - Student or course does not exist
    /// - `Err(DomainError::InvalidState)` - Course is not active
    /// - `Err(DomainError::Conflict)` - Already enrolled, course full, or a schedule conflict
    ///   naming the conflicting course
    pub async fn enroll(&self, student_id: i32, course_id: i32) -> Result<EnrollmentDto, Error> {
        let txn = self.db.begin().await?;

        let student_repo = StudentRepository::new(&txn);
        let course_repo = CourseRepository::new(&txn);
        let enrollment_repo = EnrollmentRepository::new(&txn);

        let student = student_repo
            .get(student_id)
            .await?
            .ok_or(DomainError::NotFound("student"))?;
        let course = course_repo
            .get_for_update(course_id)
            .await?
            .ok_or(DomainError::NotFound("course"))?;

        if !course.is_active {
            return Err(DomainError::invalid_state("course not active").into());
        }

        if enrollment_repo.find(student_id, course_id).await?.is_some() {
            return Err(DomainError::conflict("already enrolled").into());
        }

        let enrolled = enrollment_repo.count_for_course(course_id).await?;
        if enrolled >= course.capacity.max(0) as u64 {
            tracing::debug!(
                "Rejected enrollment of student ID {} into full course ID {} ({}/{})",
                student_id,
                course_id,
                enrolled,
                course.capacity
            );

            return Err(DomainError::conflict("course full").into());
        }

        if let Some(new_schedule) = course.schedule.as_deref().filter(|s| !s.is_empty()) {
            let current_courses = enrollment_repo.courses_for_student(student_id).await?;

            let clash = current_courses.into_iter().find(|existing| {
                existing
                    .schedule
                    .as_deref()
                    .is_some_and(|s| !s.is_empty() && schedule::conflicts(s, new_schedule))
            });

            if let Some(existing) = clash {
                return Err(
                    DomainError::conflict(format!("schedule conflict: {}", existing.name)).into(),
                );
            }
        }

        let enrollment = match enrollment_repo.create(student_id, course_id).await {
            Ok(enrollment) => enrollment,
            Err(e) if is_unique_violation(&e) => {
                return Err(DomainError::conflict("already enrolled").into())
            }
            Err(e) => return Err(e.into()),
        };

        txn.commit().await?;

        tracing::info!(
            "Enrolled student ID {} in course ID {}",
            student_id,
            course_id
        );

        Notifier::new(self.db)
            .notify(
                student.user_id,
                NotificationEvent::EnrollmentConfirmation { course: course.name },
            )
            .await;

        Ok(enrollment.into())
    }

    /// Removes a student from a course
    ///
    /// A missing enrollment is `NotFound` and changes nothing.
    pub async fn withdraw(&self, student_id: i32, course_id: i32) -> Result<(), Error> {
        let enrollment_repo = EnrollmentRepository::new(self.db);

        let enrollment = enrollment_repo
            .find(student_id, course_id)
            .await?
            .ok_or(DomainError::NotFound("enrollment"))?;

        enrollment_repo.delete(enrollment.id).await?;

        tracing::info!(
            "Withdrew student ID {} from course ID {}",
            student_id,
            course_id
        );

        Ok(())
    }

    /// Resolves the enrollment's (student, course) pair, then withdraws
    pub async fn withdraw_by_id(&self, enrollment_id: i32) -> Result<(), Error> {
        let enrollment = EnrollmentRepository::new(self.db)
            .get(enrollment_id)
            .await?
            .ok_or(DomainError::NotFound("enrollment"))?;

        self.withdraw(enrollment.student_id, enrollment.course_id)
            .await
    }

    pub async fn get(&self, enrollment_id: i32) -> Result<EnrollmentDto, Error> {
        let enrollment = EnrollmentRepository::new(self.db)
            .get(enrollment_id)
            .await?
            .ok_or(DomainError::NotFound("enrollment"))?;

        Ok(enrollment.into())
    }

    /// Seats taken and left in a course
    pub async fn capacity(&self, course_id: i32) -> Result<CapacityDto, Error> {
        let course = CourseRepository::new(self.db)
            .get(course_id)
            .await?
            .ok_or(DomainError::NotFound("course"))?;

        let current_enrollment = EnrollmentRepository::new(self.db)
            .count_for_course(course_id)
            .await?;
        let capacity = course.capacity.max(0) as u64;

        Ok(CapacityDto {
            capacity: course.capacity,
            current_enrollment,
            available_slots: capacity.saturating_sub(current_enrollment),
            is_full: current_enrollment >= capacity,
        })
    }

    pub async fn is_enrolled(&self, student_id: i32, course_id: i32) -> Result<bool, Error> {
        Ok(EnrollmentRepository::new(self.db)
            .find(student_id, course_id)
            .await?
            .is_some())
    }

    pub async fn list_for_student(&self, student_id: i32) -> Result<Vec<EnrollmentDto>, Error> {
        let enrollments = EnrollmentRepository::new(self.db)
            .list_for_student(student_id)
            .await?;

        Ok(enrollments.into_iter().map(EnrollmentDto::from).collect())
    }

    pub async fn list_for_course(&self, course_id: i32) -> Result<Vec<EnrollmentDto>, Error> {
        let enrollments = EnrollmentRepository::new(self.db)
            .list_for_course(course_id)
            .await?;

        Ok(enrollments.into_iter().map(EnrollmentDto::from).collect())
    }

    /// Courses the student is enrolled in, in enrollment order
    pub async fn courses_for_student(&self, student_id: i32) -> Result<Vec<CourseDto>, Error> {
        let courses = EnrollmentRepository::new(self.db)
            .courses_for_student(student_id)
            .await?;

        Ok(courses.into_iter().map(CourseDto::from).collect())
    }
}
