//! Tests for grade recording, statistics, GPA and CSV grade import.

use registrar::{
    model::grade::{RecordGradeDto, UpdateGradeDto},
    server::{
        error::domain::DomainError,
        service::{grade::GradeService, notification::NotificationService, system::SystemService},
    },
};
use serde_json::json;

use super::*;

fn record(student_id: i32, course_id: i32, score: f64) -> RecordGradeDto {
    RecordGradeDto {
        student_id,
        course_id,
        score,
        letter_grade: None,
        comments: None,
    }
}

/// Expect the letter to be derived from the score when not given
#[tokio::test]
async fn records_grade_with_derived_letter() -> Result<(), TestError> {
    let test = TestBuilder::new().with_academic_tables().build().await?;
    let (_, teacher) = test.people().insert_teacher("mwhite", "T001").await?;
    let (_, student) = test.people().insert_student("alice", "S001").await?;
    let course = test
        .academic()
        .insert_course("CS101", teacher.id, 30, None)
        .await?;

    let grade = GradeService::new(&test.db)
        .record_grade(record(student.id, course.id, 85.0))
        .await
        .unwrap();

    assert_eq!(grade.score, 85.0);
    assert_eq!(grade.letter_grade.as_deref(), Some("B"));

    Ok(())
}

/// Expect recording again to overwrite the same row, comments included
#[tokio::test]
async fn rerecording_overwrites_in_place() -> Result<(), TestError> {
    let test = TestBuilder::new().with_academic_tables().build().await?;
    let (_, teacher) = test.people().insert_teacher("mwhite", "T001").await?;
    let (_, student) = test.people().insert_student("alice", "S001").await?;
    let course = test
        .academic()
        .insert_course("CS101", teacher.id, 30, None)
        .await?;

    let service = GradeService::new(&test.db);
    let first = service
        .record_grade(RecordGradeDto {
            comments: Some("strong start".to_string()),
            ..record(student.id, course.id, 55.0)
        })
        .await
        .unwrap();
    let second = service
        .record_grade(record(student.id, course.id, 92.0))
        .await
        .unwrap();

    assert_eq!(first.id, second.id);
    assert_eq!(second.letter_grade.as_deref(), Some("A"));
    assert_eq!(second.comments, None);
    assert_eq!(service.grades_for_course(course.id).await.unwrap().len(), 1);

    Ok(())
}

/// Expect scores outside [0, 100] to be rejected without writing
#[tokio::test]
async fn rejects_out_of_range_score() -> Result<(), TestError> {
    let test = TestBuilder::new().with_academic_tables().build().await?;
    let (_, teacher) = test.people().insert_teacher("mwhite", "T001").await?;
    let (_, student) = test.people().insert_student("alice", "S001").await?;
    let course = test
        .academic()
        .insert_course("CS101", teacher.id, 30, None)
        .await?;

    let service = GradeService::new(&test.db);
    for score in [100.1, -0.1, 100.5, -1.0, f64::NAN] {
        let result = service.record_grade(record(student.id, course.id, score)).await;

        assert_eq!(
            domain_error(result),
            DomainError::invalid_argument("score out of range")
        );
    }
    assert!(service
        .find_grade(student.id, course.id)
        .await
        .unwrap()
        .is_none());

    Ok(())
}

/// Expect both ends of the score range to be accepted and 59.9 to fail the course
#[tokio::test]
async fn accepts_boundary_scores() -> Result<(), TestError> {
    let test = TestBuilder::new().with_academic_tables().build().await?;
    let (_, teacher) = test.people().insert_teacher("mwhite", "T001").await?;
    let course = test
        .academic()
        .insert_course("CS101", teacher.id, 30, None)
        .await?;

    let service = GradeService::new(&test.db);
    for (i, (score, letter)) in [(0.0, "F"), (100.0, "A"), (59.9, "F")].into_iter().enumerate() {
        let (_, student) = test
            .people()
            .insert_student(&format!("student{}", i), &format!("S00{}", i))
            .await?;

        let grade = service
            .record_grade(record(student.id, course.id, score))
            .await
            .unwrap();

        assert_eq!(grade.score, score);
        assert_eq!(grade.letter_grade.as_deref(), Some(letter), "score {}", score);
    }

    Ok(())
}

/// Expect a missing student to be reported ahead of a bad score
#[tokio::test]
async fn reports_missing_student_first() -> Result<(), TestError> {
    let test = TestBuilder::new().with_academic_tables().build().await?;

    let result = GradeService::new(&test.db)
        .record_grade(record(1, 1, 500.0))
        .await;

    assert_eq!(domain_error(result), DomainError::NotFound("student"));

    Ok(())
}

/// Expect an updated score without a letter to re-derive the letter
#[tokio::test]
async fn update_rederives_letter() -> Result<(), TestError> {
    let test = TestBuilder::new().with_academic_tables().build().await?;
    let (_, teacher) = test.people().insert_teacher("mwhite", "T001").await?;
    let (_, student) = test.people().insert_student("alice", "S001").await?;
    let course = test
        .academic()
        .insert_course("CS101", teacher.id, 30, None)
        .await?;
    let grade = test
        .academic()
        .insert_grade(student.id, course.id, 95.0)
        .await?;

    let service = GradeService::new(&test.db);
    let updated = service
        .update_grade(
            grade.id,
            UpdateGradeDto {
                score: Some(72.0),
                ..Default::default()
            },
        )
        .await
        .unwrap();

    assert_eq!(updated.score, 72.0);
    assert_eq!(updated.letter_grade.as_deref(), Some("C"));

    let result = service
        .update_grade(
            grade.id,
            UpdateGradeDto {
                score: Some(101.0),
                ..Default::default()
            },
        )
        .await;
    assert_eq!(
        domain_error(result),
        DomainError::invalid_argument("score out of range")
    );

    Ok(())
}

/// Expect omitted comments to be kept and explicitly cleared comments to be removed
#[tokio::test]
async fn update_keeps_or_clears_comments() -> Result<(), TestError> {
    let test = TestBuilder::new().with_academic_tables().build().await?;
    let (_, teacher) = test.people().insert_teacher("mwhite", "T001").await?;
    let (_, student) = test.people().insert_student("alice", "S001").await?;
    let course = test
        .academic()
        .insert_course("CS101", teacher.id, 30, None)
        .await?;

    let service = GradeService::new(&test.db);
    let grade = service
        .record_grade(RecordGradeDto {
            comments: Some("needs work".to_string()),
            ..record(student.id, course.id, 65.0)
        })
        .await
        .unwrap();

    let kept = service
        .update_grade(
            grade.id,
            UpdateGradeDto {
                score: Some(70.0),
                ..Default::default()
            },
        )
        .await
        .unwrap();
    assert_eq!(kept.comments.as_deref(), Some("needs work"));

    let cleared = service
        .update_grade(
            grade.id,
            UpdateGradeDto {
                comments: Some(None),
                ..Default::default()
            },
        )
        .await
        .unwrap();
    assert_eq!(cleared.comments, None);
    assert_eq!(cleared.score, 70.0);

    Ok(())
}

/// Expect average, extremes and pass rate over the course's grades
#[tokio::test]
async fn computes_course_statistics() -> Result<(), TestError> {
    let test = TestBuilder::new().with_academic_tables().build().await?;
    let (_, teacher) = test.people().insert_teacher("mwhite", "T001").await?;
    let course = test
        .academic()
        .insert_course("CS101", teacher.id, 30, None)
        .await?;
    for (i, score) in [90.0, 70.0, 50.0, 30.0].into_iter().enumerate() {
        let (_, student) = test
            .people()
            .insert_student(&format!("student{}", i), &format!("S00{}", i))
            .await?;
        test.academic()
            .insert_grade(student.id, course.id, score)
            .await?;
    }

    let statistics = GradeService::new(&test.db)
        .course_statistics(course.id)
        .await
        .unwrap();

    assert_eq!(statistics.average, 60.0);
    assert_eq!(statistics.maximum, 90.0);
    assert_eq!(statistics.minimum, 30.0);
    assert_eq!(statistics.pass_rate, 50.0);
    assert_eq!(statistics.total_students, 4);

    Ok(())
}

/// Expect a course without grades to report all zeros
#[tokio::test]
async fn statistics_of_ungraded_course_are_zero() -> Result<(), TestError> {
    let test = TestBuilder::new().with_academic_tables().build().await?;
    let (_, teacher) = test.people().insert_teacher("mwhite", "T001").await?;
    let course = test
        .academic()
        .insert_course("CS101", teacher.id, 30, None)
        .await?;

    let statistics = GradeService::new(&test.db)
        .course_statistics(course.id)
        .await
        .unwrap();

    assert_eq!(statistics, Default::default());

    Ok(())
}

/// Expect the GPA to be the unweighted mean of the student's scores
#[tokio::test]
async fn computes_student_gpa() -> Result<(), TestError> {
    let test = TestBuilder::new().with_academic_tables().build().await?;
    let (_, teacher) = test.people().insert_teacher("mwhite", "T001").await?;
    let (_, student) = test.people().insert_student("alice", "S001").await?;
    let first = test
        .academic()
        .insert_course("CS101", teacher.id, 30, None)
        .await?;
    let second = test
        .academic()
        .insert_course("CS102", teacher.id, 30, None)
        .await?;
    test.academic()
        .insert_grade(student.id, first.id, 80.0)
        .await?;
    test.academic()
        .insert_grade(student.id, second.id, 91.0)
        .await?;

    let gpa = GradeService::new(&test.db)
        .student_gpa(student.id)
        .await
        .unwrap();

    assert_eq!(gpa.student_id, student.id);
    assert_eq!(gpa.gpa, 85.5);

    Ok(())
}

/// Expect a release notification only while grade release is enabled
#[tokio::test]
async fn notifies_release_only_when_enabled() -> Result<(), TestError> {
    let test = TestBuilder::new().with_academic_tables().build().await?;
    let (_, teacher) = test.people().insert_teacher("mwhite", "T001").await?;
    let (user, student) = test.people().insert_student("alice", "S001").await?;
    let course = test
        .academic()
        .insert_course("CS101", teacher.id, 30, None)
        .await?;

    let service = GradeService::new(&test.db);
    let notifications = NotificationService::new(&test.db);

    service
        .record_grade(record(student.id, course.id, 88.0))
        .await
        .unwrap();
    let released = notifications.list(user.id, false, None).await.unwrap();
    assert_eq!(released.len(), 1);
    assert_eq!(released[0].title, "Grade Released: Course CS101");

    SystemService::new(&test.db)
        .update_config(json!({ "grade_release_enabled": false }), None)
        .await
        .unwrap();
    service
        .record_grade(record(student.id, course.id, 90.0))
        .await
        .unwrap();

    assert_eq!(notifications.list(user.id, false, None).await.unwrap().len(), 1);

    Ok(())
}

/// Expect each failing row to be reported by its 1-based row number, header included
#[tokio::test]
async fn imports_grades_with_row_errors() -> Result<(), TestError> {
    let test = TestBuilder::new().with_academic_tables().build().await?;
    let (_, teacher) = test.people().insert_teacher("mwhite", "T001").await?;
    let (_, alice) = test.people().insert_student("alice", "S001").await?;
    test.people().insert_student("bob", "S002").await?;
    let course = test
        .academic()
        .insert_course("CS101", teacher.id, 30, None)
        .await?;

    let body = "student_number,name,score,comments\n\
                S001,Alice,91,well done\n\
                S002,Bob,\n\
                S003,Carol,80\n\
                S002,Bob,abc\n\
                ,Nobody,70\n\
                S002,Bob,120\n";

    let service = GradeService::new(&test.db);
    let result = service.import_grades(course.id, body).await.unwrap();

    assert_eq!(result.success, 1);
    assert_eq!(result.failed, 4);
    assert_eq!(
        result.errors,
        vec![
            "Row 3: Score is missing",
            "Row 4: Student not found: S003",
            "Row 5: Invalid score: abc",
            "Row 7: score out of range",
        ]
    );

    let grade = service
        .find_grade(alice.id, course.id)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(grade.score, 91.0);
    assert_eq!(grade.comments.as_deref(), Some("well done"));

    Ok(())
}

/// Expect importing into a missing course to fail as a whole
#[tokio::test]
async fn import_requires_course() -> Result<(), TestError> {
    let test = TestBuilder::new().with_academic_tables().build().await?;

    let result = GradeService::new(&test.db)
        .import_grades(3, "student_number,name,score\nS001,Alice,90\n")
        .await;

    assert_eq!(domain_error(result), DomainError::NotFound("course"));

    Ok(())
}

/// Expect non-terminating averages and pass rates to be reported within 0.01
#[tokio::test]
async fn computes_uneven_course_statistics() -> Result<(), TestError> {
    let test = TestBuilder::new().with_academic_tables().build().await?;
    let (_, teacher) = test.people().insert_teacher("mwhite", "T001").await?;
    let course = test
        .academic()
        .insert_course("CS101", teacher.id, 30, None)
        .await?;
    for (i, score) in [100.0, 80.0, 50.0].into_iter().enumerate() {
        let (_, student) = test
            .people()
            .insert_student(&format!("student{}", i), &format!("S00{}", i))
            .await?;
        test.academic()
            .insert_grade(student.id, course.id, score)
            .await?;
    }

    let statistics = GradeService::new(&test.db)
        .course_statistics(course.id)
        .await
        .unwrap();

    assert!((statistics.average - 76.67).abs() < 0.01, "average {}", statistics.average);
    assert!(
        (statistics.pass_rate - 66.67).abs() < 0.01,
        "pass rate {}",
        statistics.pass_rate
    );
    assert_eq!(statistics.total_students, 3);

    Ok(())
}
