//! Tests for assignments, submissions and submission grading.

use chrono::{Duration, Utc};
use registrar::{
    model::assignment::{CreateAssignmentDto, NewFileSubmission},
    server::{
        error::domain::DomainError,
        service::{assignment::AssignmentService, notification::NotificationService},
        util::storage::FileStore,
    },
};

use super::*;

/// Expect a new assignment to be announced to every enrolled student only
#[tokio::test]
async fn create_notifies_enrolled_students() -> Result<(), TestError> {
    let test = TestBuilder::new().with_academic_tables().build().await?;
    let (_, teacher) = test.people().insert_teacher("mwhite", "T001").await?;
    let (alice_user, alice) = test.people().insert_student("alice", "S001").await?;
    let (bob_user, _) = test.people().insert_student("bob", "S002").await?;
    let course = test
        .academic()
        .insert_course("CS101", teacher.id, 30, None)
        .await?;
    test.academic().insert_enrollment(alice.id, course.id).await?;

    let assignment = AssignmentService::new(&test.db)
        .create(CreateAssignmentDto {
            course_id: course.id,
            title: "Lab 1".to_string(),
            description: None,
            due_date: Utc::now().naive_utc() + Duration::days(3),
            total_points: None,
        })
        .await
        .unwrap();

    assert_eq!(assignment.total_points, 100.0);

    let notifications = NotificationService::new(&test.db);
    let alice_inbox = notifications.list(alice_user.id, false, None).await.unwrap();
    assert_eq!(alice_inbox.len(), 1);
    assert_eq!(alice_inbox[0].title, "New Assignment: Lab 1");
    assert!(notifications
        .list(bob_user.id, false, None)
        .await
        .unwrap()
        .is_empty());

    Ok(())
}

/// Expect non-positive total points to be rejected
#[tokio::test]
async fn create_rejects_non_positive_points() -> Result<(), TestError> {
    let test = TestBuilder::new().with_academic_tables().build().await?;
    let (_, teacher) = test.people().insert_teacher("mwhite", "T001").await?;
    let course = test
        .academic()
        .insert_course("CS101", teacher.id, 30, None)
        .await?;

    let result = AssignmentService::new(&test.db)
        .create(CreateAssignmentDto {
            course_id: course.id,
            title: "Lab 1".to_string(),
            description: None,
            due_date: Utc::now().naive_utc(),
            total_points: Some(0.0),
        })
        .await;

    assert!(matches!(
        domain_error(result),
        DomainError::InvalidArgument(_)
    ));

    Ok(())
}

/// Expect a submission after the due date to be flagged late
#[tokio::test]
async fn flags_late_submission() -> Result<(), TestError> {
    let test = TestBuilder::new().with_academic_tables().build().await?;
    let (_, teacher) = test.people().insert_teacher("mwhite", "T001").await?;
    let (_, student) = test.people().insert_student("alice", "S001").await?;
    let course = test
        .academic()
        .insert_course("CS101", teacher.id, 30, None)
        .await?;
    let overdue = test
        .academic()
        .insert_assignment_due(
            course.id,
            "Essay",
            50.0,
            Utc::now().naive_utc() - Duration::days(1),
        )
        .await?;
    let open = test
        .academic()
        .insert_assignment(course.id, "Lab 1", 50.0)
        .await?;

    let service = AssignmentService::new(&test.db);
    let late = service
        .submit(overdue.id, student.id, Some("draft".to_string()))
        .await
        .unwrap();
    let on_time = service
        .submit(open.id, student.id, Some("answer".to_string()))
        .await
        .unwrap();

    assert!(late.is_late);
    assert!(!on_time.is_late);

    Ok(())
}

/// Expect a resubmission to replace the content of the same row and keep its score
#[tokio::test]
async fn resubmits_in_place() -> Result<(), TestError> {
    let test = TestBuilder::new().with_academic_tables().build().await?;
    let (_, teacher) = test.people().insert_teacher("mwhite", "T001").await?;
    let (_, student) = test.people().insert_student("alice", "S001").await?;
    let course = test
        .academic()
        .insert_course("CS101", teacher.id, 30, None)
        .await?;
    let assignment = test
        .academic()
        .insert_assignment(course.id, "Lab 1", 20.0)
        .await?;

    let service = AssignmentService::new(&test.db);
    let first = service
        .submit(assignment.id, student.id, Some("v1".to_string()))
        .await
        .unwrap();
    service
        .grade_submission(first.id, 15.0, None)
        .await
        .unwrap();
    let second = service
        .submit(assignment.id, student.id, Some("v2".to_string()))
        .await
        .unwrap();

    assert_eq!(first.id, second.id);
    assert_eq!(second.content.as_deref(), Some("v2"));
    assert_eq!(second.score, Some(15.0));
    assert_eq!(
        service
            .submissions_for_assignment(assignment.id, false)
            .await
            .unwrap()
            .len(),
        1
    );

    Ok(())
}

/// Expect grading to be bounded by the assignment's total points and to notify the student
#[tokio::test]
async fn grades_submission_within_total_points() -> Result<(), TestError> {
    let test = TestBuilder::new().with_academic_tables().build().await?;
    let (_, teacher) = test.people().insert_teacher("mwhite", "T001").await?;
    let (user, student) = test.people().insert_student("alice", "S001").await?;
    let course = test
        .academic()
        .insert_course("CS101", teacher.id, 30, None)
        .await?;
    let assignment = test
        .academic()
        .insert_assignment(course.id, "Lab 1", 50.0)
        .await?;
    let submission = test
        .academic()
        .insert_submission(assignment.id, student.id, "answer")
        .await?;

    let service = AssignmentService::new(&test.db);
    let result = service.grade_submission(submission.id, 51.0, None).await;
    assert_eq!(
        domain_error(result),
        DomainError::invalid_argument("score must be between 0 and 50")
    );

    let graded = service
        .grade_submission(submission.id, 42.0, Some("good".to_string()))
        .await
        .unwrap();
    assert_eq!(graded.score, Some(42.0));
    assert_eq!(graded.feedback.as_deref(), Some("good"));
    assert!(graded.graded_at.is_some());

    let inbox = NotificationService::new(&test.db)
        .list(user.id, false, None)
        .await
        .unwrap();
    assert_eq!(inbox.len(), 1);
    assert_eq!(inbox[0].title, "Assignment Graded: Lab 1");

    Ok(())
}

/// Expect the ungraded filter to hide graded submissions
#[tokio::test]
async fn lists_ungraded_submissions() -> Result<(), TestError> {
    let test = TestBuilder::new().with_academic_tables().build().await?;
    let (_, teacher) = test.people().insert_teacher("mwhite", "T001").await?;
    let (_, alice) = test.people().insert_student("alice", "S001").await?;
    let (_, bob) = test.people().insert_student("bob", "S002").await?;
    let course = test
        .academic()
        .insert_course("CS101", teacher.id, 30, None)
        .await?;
    let assignment = test
        .academic()
        .insert_assignment(course.id, "Lab 1", 10.0)
        .await?;
    let graded = test
        .academic()
        .insert_submission(assignment.id, alice.id, "a")
        .await?;
    test.academic()
        .insert_submission(assignment.id, bob.id, "b")
        .await?;

    let service = AssignmentService::new(&test.db);
    service.grade_submission(graded.id, 8.0, None).await.unwrap();

    let ungraded = service
        .submissions_for_assignment(assignment.id, true)
        .await
        .unwrap();
    assert_eq!(ungraded.len(), 1);
    assert_eq!(ungraded[0].student_id, bob.id);

    Ok(())
}

/// Expect deleting an assignment to remove its submissions, and a second delete to be NotFound
#[tokio::test]
async fn delete_removes_submissions() -> Result<(), TestError> {
    let test = TestBuilder::new().with_academic_tables().build().await?;
    let (_, teacher) = test.people().insert_teacher("mwhite", "T001").await?;
    let (_, student) = test.people().insert_student("alice", "S001").await?;
    let course = test
        .academic()
        .insert_course("CS101", teacher.id, 30, None)
        .await?;
    let assignment = test
        .academic()
        .insert_assignment(course.id, "Lab 1", 10.0)
        .await?;
    test.academic()
        .insert_submission(assignment.id, student.id, "a")
        .await?;

    let service = AssignmentService::new(&test.db);
    service.delete(assignment.id).await.unwrap();

    assert!(service
        .submissions_for_student(student.id)
        .await
        .unwrap()
        .is_empty());
    assert_eq!(
        domain_error(service.delete(assignment.id).await),
        DomainError::NotFound("assignment")
    );

    Ok(())
}

fn file_submission(assignment_id: i32, student_id: i32, file_name: &str) -> NewFileSubmission {
    NewFileSubmission {
        assignment_id,
        student_id,
        content: None,
        file_name: file_name.to_string(),
    }
}

fn stored_files(dir: &std::path::Path) -> Vec<std::path::PathBuf> {
    std::fs::read_dir(dir)
        .map(|entries| entries.filter_map(|e| e.ok()).map(|e| e.path()).collect())
        .unwrap_or_default()
}

/// Expect a resubmitted file to replace the earlier attachment on disk
#[tokio::test]
async fn file_resubmission_replaces_attachment() -> Result<(), TestError> {
    let dir = tempfile::tempdir().unwrap();
    let files = FileStore::new(dir.path(), 1024);
    let test = TestBuilder::new().with_academic_tables().build().await?;
    let (_, teacher) = test.people().insert_teacher("mwhite", "T001").await?;
    let (_, student) = test.people().insert_student("alice", "S001").await?;
    let course = test
        .academic()
        .insert_course("CS101", teacher.id, 30, None)
        .await?;
    let assignment = test
        .academic()
        .insert_assignment(course.id, "Lab 1", 10.0)
        .await?;

    let service = AssignmentService::new(&test.db);
    let first = service
        .submit_file(
            &files,
            file_submission(assignment.id, student.id, "lab1.zip"),
            &b"v1"[..],
        )
        .await
        .unwrap();
    assert!(first.has_attachment);

    let second = service
        .submit_file(
            &files,
            file_submission(assignment.id, student.id, "lab1.zip"),
            &b"v2"[..],
        )
        .await
        .unwrap();
    assert_eq!(second.id, first.id);

    let stored = stored_files(dir.path());
    assert_eq!(stored.len(), 1);
    assert_eq!(std::fs::read(&stored[0]).unwrap(), b"v2");

    // A plain resubmission keeps the attachment
    let third = service
        .submit(assignment.id, student.id, Some("notes".to_string()))
        .await
        .unwrap();
    assert!(third.has_attachment);
    assert_eq!(stored_files(dir.path()).len(), 1);

    Ok(())
}

/// Expect a file submission for a missing assignment to store nothing
#[tokio::test]
async fn file_submission_to_missing_assignment_fails() -> Result<(), TestError> {
    let dir = tempfile::tempdir().unwrap();
    let files = FileStore::new(dir.path(), 1024);
    let test = TestBuilder::new().with_academic_tables().build().await?;
    let (_, student) = test.people().insert_student("alice", "S001").await?;

    let result = AssignmentService::new(&test.db)
        .submit_file(&files, file_submission(7, student.id, "lab1.zip"), &b"v1"[..])
        .await;

    assert_eq!(domain_error(result), DomainError::NotFound("assignment"));
    assert!(stored_files(dir.path()).is_empty());

    Ok(())
}

/// Expect deleting an assignment to remove the files attached to its submissions
#[tokio::test]
async fn delete_removes_attachments() -> Result<(), TestError> {
    let dir = tempfile::tempdir().unwrap();
    let files = FileStore::new(dir.path(), 1024);
    let test = TestBuilder::new().with_academic_tables().build().await?;
    let (_, teacher) = test.people().insert_teacher("mwhite", "T001").await?;
    let (_, student) = test.people().insert_student("alice", "S001").await?;
    let course = test
        .academic()
        .insert_course("CS101", teacher.id, 30, None)
        .await?;
    let assignment = test
        .academic()
        .insert_assignment(course.id, "Lab 1", 10.0)
        .await?;

    let service = AssignmentService::new(&test.db);
    service
        .submit_file(
            &files,
            file_submission(assignment.id, student.id, "lab1.zip"),
            &b"v1"[..],
        )
        .await
        .unwrap();
    assert_eq!(stored_files(dir.path()).len(), 1);

    service.delete(assignment.id).await.unwrap();

    assert!(stored_files(dir.path()).is_empty());

    Ok(())
}
