//! Grade engine.
//!
//! One grade per (student, course). Recording a grade for a pair that already has one
//! overwrites it in place. Scores live on a 0-100 scale and letters are derived from the score
//! unless given explicitly.

use sea_orm::{DatabaseConnection, TransactionTrait};

use crate::{
    model::{
        api::ImportResultDto,
        grade::{CourseStatisticsDto, GpaDto, GradeDto, RecordGradeDto, UpdateGradeDto},
    },
    server::{
        data::{
            course::CourseRepository, grade::GradeRepository, is_unique_violation,
            student::StudentRepository,
        },
        error::{domain::DomainError, Error},
        service::{
            import::{csv_reader, field, ImportTally},
            notification::{NotificationEvent, Notifier},
            system::load_settings,
        },
        util::grading,
    },
};

fn validate_score(score: f64) -> Result<(), DomainError> {
    if grading::is_valid_score(score) {
        return Ok(());
    }

    tracing::debug!("Rejected out of range score {}", score);

    Err(DomainError::invalid_argument("score out of range"))
}

pub struct GradeService<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> GradeService<'a> {
    /// Creates a new instance of [`GradeService`]
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    /// Records or overwrites the grade of a student in a course.
    ///
    /// After commit a grade-released notification goes to the student's user when the
    /// `grade_release_enabled` setting is on.
    ///
    /// # Returns
    /// - `Ok(GradeDto)` - The inserted or updated grade
    /// - `Err(DomainError::NotFound)` - Student or course does not exist
    /// - `Err(DomainError::InvalidArgument)` - Score outside `[0, 100]`
    /// - `Err(DomainError::Conflict)` - A concurrent request inserted the grade first
    pub async fn record_grade(&self, grade: RecordGradeDto) -> Result<GradeDto, Error> {
        let txn = self.db.begin().await?;

        let student = StudentRepository::new(&txn)
            .get(grade.student_id)
            .await?
            .ok_or(DomainError::NotFound("student"))?;
        let course = CourseRepository::new(&txn)
            .get(grade.course_id)
            .await?
            .ok_or(DomainError::NotFound("course"))?;

        validate_score(grade.score)?;

        let letter = grade
            .letter_grade
            .unwrap_or_else(|| grading::letter_grade(grade.score).to_string());

        let grade_repo = GradeRepository::new(&txn);
        let recorded = match grade_repo.find(grade.student_id, grade.course_id).await? {
            Some(existing) => {
                grade_repo
                    .update(existing, grade.score, Some(letter), grade.comments)
                    .await?
            }
            None => match grade_repo
                .create(
                    grade.student_id,
                    grade.course_id,
                    grade.score,
                    Some(letter),
                    grade.comments,
                )
                .await
            {
                Ok(recorded) => recorded,
                Err(e) if is_unique_violation(&e) => {
                    return Err(DomainError::conflict("grade already recorded").into())
                }
                Err(e) => return Err(e.into()),
            },
        };

        txn.commit().await?;

        tracing::info!(
            "Recorded grade {} for student ID {} in course ID {}",
            recorded.score,
            recorded.student_id,
            recorded.course_id
        );

        self.release(student.user_id, course.name, recorded.score)
            .await;

        Ok(recorded.into())
    }

    /// Sends the grade-released notification if releases are enabled
    async fn release(&self, user_id: i32, course: String, score: f64) {
        match load_settings(self.db).await {
            Ok(settings) if settings.grade_release_enabled => {
                Notifier::new(self.db)
                    .notify(user_id, NotificationEvent::GradeReleased { course, score })
                    .await;
            }
            Ok(_) => (),
            Err(e) => tracing::warn!(
                "Skipped grade release notification for user ID {}: {}",
                user_id,
                e
            ),
        }
    }

    /// Changes an existing grade; a new score without a letter re-derives the letter.
    ///
    /// Comments are kept when `changes.comments` is `None` and cleared when it is `Some(None)`.
    pub async fn update_grade(
        &self,
        grade_id: i32,
        changes: UpdateGradeDto,
    ) -> Result<GradeDto, Error> {
        let grade_repo = GradeRepository::new(self.db);

        let grade = grade_repo
            .get(grade_id)
            .await?
            .ok_or(DomainError::NotFound("grade"))?;

        if let Some(score) = changes.score {
            validate_score(score)?;
        }

        let score = changes.score.unwrap_or(grade.score);
        let letter = match (changes.letter_grade, changes.score) {
            (Some(letter), _) => Some(letter),
            (None, Some(score)) => Some(grading::letter_grade(score).to_string()),
            (None, None) => grade.letter_grade.clone(),
        };
        let comments = changes
            .comments
            .unwrap_or_else(|| grade.comments.clone());

        let grade = grade_repo.update(grade, score, letter, comments).await?;

        Ok(grade.into())
    }

    pub async fn delete_grade(&self, grade_id: i32) -> Result<(), Error> {
        let result = GradeRepository::new(self.db).delete(grade_id).await?;

        if result.rows_affected == 0 {
            return Err(DomainError::NotFound("grade").into());
        }

        tracing::info!("Deleted grade ID {}", grade_id);

        Ok(())
    }

    pub async fn get_grade(&self, grade_id: i32) -> Result<GradeDto, Error> {
        let grade = GradeRepository::new(self.db)
            .get(grade_id)
            .await?
            .ok_or(DomainError::NotFound("grade"))?;

        Ok(grade.into())
    }

    pub async fn find_grade(
        &self,
        student_id: i32,
        course_id: i32,
    ) -> Result<Option<GradeDto>, Error> {
        let grade = GradeRepository::new(self.db)
            .find(student_id, course_id)
            .await?;

        Ok(grade.map(GradeDto::from))
    }

    pub async fn grades_for_student(&self, student_id: i32) -> Result<Vec<GradeDto>, Error> {
        let grades = GradeRepository::new(self.db)
            .list_for_student(student_id)
            .await?;

        Ok(grades.into_iter().map(GradeDto::from).collect())
    }

    pub async fn grades_for_course(&self, course_id: i32) -> Result<Vec<GradeDto>, Error> {
        let grades = GradeRepository::new(self.db)
            .list_for_course(course_id)
            .await?;

        Ok(grades.into_iter().map(GradeDto::from).collect())
    }

    /// Statistics over every grade of the course, all zero when there are none
    pub async fn course_statistics(&self, course_id: i32) -> Result<CourseStatisticsDto, Error> {
        let scores: Vec<f64> = GradeRepository::new(self.db)
            .list_for_course(course_id)
            .await?
            .into_iter()
            .map(|grade| grade.score)
            .collect();

        Ok(grading::course_statistics(&scores))
    }

    /// Unweighted mean of the student's raw scores
    pub async fn student_gpa(&self, student_id: i32) -> Result<GpaDto, Error> {
        let scores: Vec<f64> = GradeRepository::new(self.db)
            .list_for_student(student_id)
            .await?
            .into_iter()
            .map(|grade| grade.score)
            .collect();

        Ok(GpaDto {
            student_id,
            gpa: grading::mean_score(&scores),
        })
    }

    /// Records grades for a course from CSV rows of
    /// `student_number, student_name, score, comments`.
    ///
    /// Rows without a student number are skipped. Every other failing row is tallied with its
    /// row number; the batch never aborts.
    pub async fn import_grades(&self, course_id: i32, body: &str) -> Result<ImportResultDto, Error> {
        CourseRepository::new(self.db)
            .get(course_id)
            .await?
            .ok_or(DomainError::NotFound("course"))?;

        let student_repo = StudentRepository::new(self.db);
        let mut tally = ImportTally::default();

        for (row, record) in csv_reader(body).records().enumerate() {
            let row = row + 2;
            let record = match record {
                Ok(record) => record,
                Err(e) => {
                    tally.fail(row, format!("malformed row: {}", e));
                    continue;
                }
            };

            let Some(student_number) = field(&record, 0) else {
                continue;
            };

            let Some(raw_score) = field(&record, 2) else {
                tally.fail(row, "Score is missing");
                continue;
            };
            let Ok(score) = raw_score.parse::<f64>() else {
                tally.fail(row, format!("Invalid score: {}", raw_score));
                continue;
            };

            let Some(student) = student_repo.find_by_number(student_number).await? else {
                tally.fail(row, format!("Student not found: {}", student_number));
                continue;
            };

            let grade = RecordGradeDto {
                student_id: student.id,
                course_id,
                score,
                letter_grade: None,
                comments: field(&record, 3).map(str::to_string),
            };

            match self.record_grade(grade).await {
                Ok(_) => tally.succeed(),
                Err(Error::DomainError(e)) => tally.fail(row, e.to_string()),
                Err(e) => return Err(e),
            }
        }

        tracing::info!(
            "Imported grades for course ID {}: {} succeeded, {} failed",
            course_id,
            tally.success,
            tally.failed
        );

        Ok(tally.into())
    }
}
