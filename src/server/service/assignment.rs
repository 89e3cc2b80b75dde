//! Assignments and student submissions.

use chrono::NaiveDateTime;
use sea_orm::{DatabaseConnection, TransactionTrait};
use tokio::io::AsyncRead;

use crate::{
    model::assignment::{
        AssignmentDto, CreateAssignmentDto, NewFileSubmission, SubmissionDto, UpdateAssignmentDto,
    },
    server::{
        data::{
            assignment::{AssignmentChanges, AssignmentRepository, NewAssignment},
            course::CourseRepository,
            enrollment::EnrollmentRepository,
            is_unique_violation,
            student::StudentRepository,
            submission::SubmissionRepository,
        },
        error::{domain::DomainError, Error},
        service::notification::{NotificationEvent, Notifier},
        util::storage::{self, FileStore},
    },
};

pub const DEFAULT_TOTAL_POINTS: f64 = 100.0;

/// A submission is late when it arrived after the due date
pub fn is_late(submitted_at: NaiveDateTime, due_date: NaiveDateTime) -> bool {
    submitted_at > due_date
}

fn validate_total_points(total_points: f64) -> Result<(), DomainError> {
    if total_points > 0.0 {
        Ok(())
    } else {
        Err(DomainError::invalid_argument("total points must be positive"))
    }
}

pub struct AssignmentService<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> AssignmentService<'a> {
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    /// Posts an assignment and notifies every student enrolled in the course
    pub async fn create(&self, assignment: CreateAssignmentDto) -> Result<AssignmentDto, Error> {
        let course = CourseRepository::new(self.db)
            .get(assignment.course_id)
            .await?
            .ok_or(DomainError::NotFound("course"))?;

        let total_points = assignment.total_points.unwrap_or(DEFAULT_TOTAL_POINTS);
        validate_total_points(total_points)?;

        let new_assignment = NewAssignment {
            course_id: course.id,
            title: assignment.title,
            description: assignment.description,
            due_date: assignment.due_date,
            total_points,
        };
        let assignment = AssignmentRepository::new(self.db)
            .create(new_assignment)
            .await?;

        tracing::info!(
            "Created assignment ID {} in course ID {}",
            assignment.id,
            course.id
        );

        let students = EnrollmentRepository::new(self.db)
            .students_for_course(course.id)
            .await?;
        let notifier = Notifier::new(self.db);
        for student in students {
            notifier
                .notify(
                    student.user_id,
                    NotificationEvent::NewAssignment {
                        course: course.name.clone(),
                        assignment: assignment.title.clone(),
                    },
                )
                .await;
        }

        Ok(assignment.into())
    }

    pub async fn get(&self, assignment_id: i32) -> Result<AssignmentDto, Error> {
        let assignment = AssignmentRepository::new(self.db)
            .get(assignment_id)
            .await?
            .ok_or(DomainError::NotFound("assignment"))?;

        Ok(assignment.into())
    }

    /// Assignments of a course, earliest due first
    pub async fn list_for_course(&self, course_id: i32) -> Result<Vec<AssignmentDto>, Error> {
        let assignments = AssignmentRepository::new(self.db)
            .list_for_course(course_id)
            .await?;

        Ok(assignments.into_iter().map(AssignmentDto::from).collect())
    }

    pub async fn update(
        &self,
        assignment_id: i32,
        changes: UpdateAssignmentDto,
    ) -> Result<AssignmentDto, Error> {
        if let Some(total_points) = changes.total_points {
            validate_total_points(total_points)?;
        }

        let assignment_changes = AssignmentChanges {
            title: changes.title,
            description: changes.description,
            due_date: changes.due_date,
            total_points: changes.total_points,
        };

        let assignment = AssignmentRepository::new(self.db)
            .update(assignment_id, assignment_changes)
            .await?
            .ok_or(DomainError::NotFound("assignment"))?;

        Ok(assignment.into())
    }

    /// Deletes an assignment and its submissions, then their uploaded files
    pub async fn delete(&self, assignment_id: i32) -> Result<(), Error> {
        let txn = self.db.begin().await?;

        let submission_repo = SubmissionRepository::new(&txn);
        let file_paths = submission_repo
            .file_paths_for_assignments(vec![assignment_id])
            .await?;
        submission_repo
            .delete_for_assignments(vec![assignment_id])
            .await?;
        let result = AssignmentRepository::new(&txn)
            .delete(assignment_id)
            .await?;

        if result.rows_affected == 0 {
            return Err(DomainError::NotFound("assignment").into());
        }

        txn.commit().await?;

        storage::discard_all(file_paths).await;

        tracing::info!("Deleted assignment ID {}", assignment_id);

        Ok(())
    }

    /// Submits or resubmits a student's work.
    ///
    /// An existing submission for the pair is replaced in place and re-stamped; any earlier
    /// grade and attachment on it are kept.
    ///
    /// # Returns
    /// - `Ok(SubmissionDto)` - The stored submission with its lateness
    /// - `Err(DomainError::NotFound)` - Assignment or student does not exist
    /// - `Err(DomainError::Conflict)` - A concurrent first submission won the race
    pub async fn submit(
        &self,
        assignment_id: i32,
        student_id: i32,
        content: Option<String>,
    ) -> Result<SubmissionDto, Error> {
        let (submission, _) = self
            .store_submission(assignment_id, student_id, content, None)
            .await?;

        Ok(submission)
    }

    /// Submits or resubmits a student's work with an attached file.
    ///
    /// The file is stored before the submission row is written and removed again if that
    /// fails. A file attached to an earlier submission is removed once the new one is recorded.
    ///
    /// # Returns
    /// - `Ok(SubmissionDto)` - The stored submission with its lateness
    /// - `Err(DomainError::NotFound)` - Assignment or student does not exist
    /// - `Err(DomainError::InvalidArgument)` - File larger than the upload limit
    /// - `Err(DomainError::Conflict)` - A concurrent first submission won the race
    pub async fn submit_file<R>(
        &self,
        files: &FileStore,
        submission: NewFileSubmission,
        reader: R,
    ) -> Result<SubmissionDto, Error>
    where
        R: AsyncRead + Unpin,
    {
        AssignmentRepository::new(self.db)
            .get(submission.assignment_id)
            .await?
            .ok_or(DomainError::NotFound("assignment"))?;
        StudentRepository::new(self.db)
            .get(submission.student_id)
            .await?
            .ok_or(DomainError::NotFound("student"))?;

        let stored = files
            .save(
                &format!(
                    "assignment_{}_student_{}",
                    submission.assignment_id, submission.student_id
                ),
                &submission.file_name,
                reader,
            )
            .await?;

        let result = self
            .store_submission(
                submission.assignment_id,
                submission.student_id,
                submission.content,
                Some(stored.path.clone()),
            )
            .await;

        match result {
            Ok((dto, replaced)) => {
                if let Some(replaced) = replaced {
                    storage::discard(&replaced).await;
                }

                Ok(dto)
            }
            Err(e) => {
                storage::discard(&stored.path).await;

                Err(e)
            }
        }
    }

    /// Inserts or replaces the submission of the pair.
    ///
    /// Returns the path of an attachment that `file_path` replaced.
    async fn store_submission(
        &self,
        assignment_id: i32,
        student_id: i32,
        content: Option<String>,
        file_path: Option<String>,
    ) -> Result<(SubmissionDto, Option<String>), Error> {
        let txn = self.db.begin().await?;

        let assignment = AssignmentRepository::new(&txn)
            .get(assignment_id)
            .await?
            .ok_or(DomainError::NotFound("assignment"))?;
        StudentRepository::new(&txn)
            .get(student_id)
            .await?
            .ok_or(DomainError::NotFound("student"))?;

        let submission_repo = SubmissionRepository::new(&txn);
        let (submission, replaced) = match submission_repo.find(assignment_id, student_id).await? {
            Some(existing) => {
                let replaced = file_path
                    .as_ref()
                    .and(existing.file_path.clone())
                    .filter(|old| Some(old) != file_path.as_ref());
                let submission = submission_repo
                    .resubmit(existing, content, file_path)
                    .await?;

                (submission, replaced)
            }
            None => match submission_repo
                .create(assignment_id, student_id, content, file_path)
                .await
            {
                Ok(submission) => (submission, None),
                Err(e) if is_unique_violation(&e) => {
                    return Err(DomainError::conflict("assignment already submitted").into())
                }
                Err(e) => return Err(e.into()),
            },
        };

        txn.commit().await?;

        let late = is_late(submission.submitted_at, assignment.due_date);
        tracing::info!(
            "Student ID {} submitted assignment ID {}{}",
            student_id,
            assignment_id,
            if late { " late" } else { "" }
        );

        Ok((SubmissionDto::new(submission, late), replaced))
    }

    /// Scores a submission within `[0, total_points]` and notifies the student
    pub async fn grade_submission(
        &self,
        submission_id: i32,
        score: f64,
        feedback: Option<String>,
    ) -> Result<SubmissionDto, Error> {
        let submission_repo = SubmissionRepository::new(self.db);

        let submission = submission_repo
            .get(submission_id)
            .await?
            .ok_or(DomainError::NotFound("submission"))?;
        let assignment = AssignmentRepository::new(self.db)
            .get(submission.assignment_id)
            .await?
            .ok_or(DomainError::NotFound("assignment"))?;

        if !(0.0..=assignment.total_points).contains(&score) {
            tracing::debug!(
                "Rejected score {} for submission ID {} out of {}",
                score,
                submission_id,
                assignment.total_points
            );

            return Err(DomainError::invalid_argument(format!(
                "score must be between 0 and {}",
                assignment.total_points
            ))
            .into());
        }

        let submission = submission_repo.grade(submission, score, feedback).await?;

        if let Some(student) = StudentRepository::new(self.db)
            .get(submission.student_id)
            .await?
        {
            Notifier::new(self.db)
                .notify(
                    student.user_id,
                    NotificationEvent::AssignmentGraded {
                        assignment: assignment.title.clone(),
                        score,
                    },
                )
                .await;
        }

        let late = is_late(submission.submitted_at, assignment.due_date);

        Ok(SubmissionDto::new(submission, late))
    }

    pub async fn submissions_for_assignment(
        &self,
        assignment_id: i32,
        ungraded_only: bool,
    ) -> Result<Vec<SubmissionDto>, Error> {
        let assignment = AssignmentRepository::new(self.db)
            .get(assignment_id)
            .await?
            .ok_or(DomainError::NotFound("assignment"))?;

        let submissions = SubmissionRepository::new(self.db)
            .list_for_assignment(assignment_id, ungraded_only)
            .await?;

        Ok(submissions
            .into_iter()
            .map(|s| {
                let late = is_late(s.submitted_at, assignment.due_date);
                SubmissionDto::new(s, late)
            })
            .collect())
    }

    pub async fn submissions_for_student(
        &self,
        student_id: i32,
    ) -> Result<Vec<SubmissionDto>, Error> {
        let submissions = SubmissionRepository::new(self.db)
            .list_for_student(student_id)
            .await?;

        let assignment_repo = AssignmentRepository::new(self.db);
        let mut dtos = Vec::with_capacity(submissions.len());
        for submission in submissions {
            let late = match assignment_repo.get(submission.assignment_id).await? {
                Some(assignment) => is_late(submission.submitted_at, assignment.due_date),
                None => false,
            };
            dtos.push(SubmissionDto::new(submission, late));
        }

        Ok(dtos)
    }
}
