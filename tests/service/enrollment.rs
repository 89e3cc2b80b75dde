//! Tests for enrollment checks, their precedence, capacity and withdrawal.

use registrar::server::{
    error::domain::DomainError,
    service::{enrollment::EnrollmentService, notification::NotificationService},
};

use super::*;

/// Expect a successful enrollment to be stored and confirmed to the student
#[tokio::test]
async fn enrolls_and_confirms() -> Result<(), TestError> {
    let test = TestBuilder::new().with_academic_tables().build().await?;
    let (_, teacher) = test.people().insert_teacher("mwhite", "T001").await?;
    let (user, student) = test.people().insert_student("alice", "S001").await?;
    let course = test
        .academic()
        .insert_course("CS101", teacher.id, 30, None)
        .await?;

    let service = EnrollmentService::new(&test.db);
    let enrollment = service.enroll(student.id, course.id).await.unwrap();

    assert_eq!(enrollment.student_id, student.id);
    assert_eq!(enrollment.course_id, course.id);
    assert!(service.is_enrolled(student.id, course.id).await.unwrap());

    let notifications = NotificationService::new(&test.db)
        .list(user.id, false, None)
        .await
        .unwrap();
    assert_eq!(notifications.len(), 1);
    assert_eq!(notifications[0].title, "Successfully Enrolled: Course CS101");
    assert_eq!(notifications[0].category.as_deref(), Some("enrollment"));

    Ok(())
}

/// Expect NotFound naming the student before the course is looked at
#[tokio::test]
async fn fails_for_missing_student() -> Result<(), TestError> {
    let test = TestBuilder::new().with_academic_tables().build().await?;

    let result = EnrollmentService::new(&test.db).enroll(7, 9).await;

    assert_eq!(domain_error(result), DomainError::NotFound("student"));

    Ok(())
}

/// Expect NotFound for a course that does not exist
#[tokio::test]
async fn fails_for_missing_course() -> Result<(), TestError> {
    let test = TestBuilder::new().with_academic_tables().build().await?;
    let (_, student) = test.people().insert_student("alice", "S001").await?;

    let result = EnrollmentService::new(&test.db).enroll(student.id, 42).await;

    assert_eq!(domain_error(result), DomainError::NotFound("course"));

    Ok(())
}

/// Expect an inactive course to be rejected
#[tokio::test]
async fn fails_for_inactive_course() -> Result<(), TestError> {
    let test = TestBuilder::new().with_academic_tables().build().await?;
    let (_, teacher) = test.people().insert_teacher("mwhite", "T001").await?;
    let (_, student) = test.people().insert_student("alice", "S001").await?;
    let course = test
        .academic()
        .insert_inactive_course("CS101", teacher.id)
        .await?;

    let result = EnrollmentService::new(&test.db)
        .enroll(student.id, course.id)
        .await;

    assert_eq!(
        domain_error(result),
        DomainError::invalid_state("course not active")
    );

    Ok(())
}

/// Expect a second enrollment of the same pair to be rejected, even when the course is now full
#[tokio::test]
async fn reports_duplicate_before_full() -> Result<(), TestError> {
    let test = TestBuilder::new().with_academic_tables().build().await?;
    let (_, teacher) = test.people().insert_teacher("mwhite", "T001").await?;
    let (_, student) = test.people().insert_student("alice", "S001").await?;
    let course = test
        .academic()
        .insert_course("CS101", teacher.id, 1, None)
        .await?;
    test.academic()
        .insert_enrollment(student.id, course.id)
        .await?;

    let result = EnrollmentService::new(&test.db)
        .enroll(student.id, course.id)
        .await;

    assert_eq!(domain_error(result), DomainError::conflict("already enrolled"));

    Ok(())
}

/// Expect a course at capacity to turn away the next student
#[tokio::test]
async fn fails_for_full_course() -> Result<(), TestError> {
    let test = TestBuilder::new().with_academic_tables().build().await?;
    let (_, teacher) = test.people().insert_teacher("mwhite", "T001").await?;
    let (_, alice) = test.people().insert_student("alice", "S001").await?;
    let (_, bob) = test.people().insert_student("bob", "S002").await?;
    let course = test
        .academic()
        .insert_course("CS101", teacher.id, 1, None)
        .await?;

    let service = EnrollmentService::new(&test.db);
    service.enroll(alice.id, course.id).await.unwrap();
    let result = service.enroll(bob.id, course.id).await;

    assert_eq!(domain_error(result), DomainError::conflict("course full"));
    assert_eq!(service.list_for_course(course.id).await.unwrap().len(), 1);

    Ok(())
}

/// Expect a shared weekday with a current course to be rejected, naming that course
#[tokio::test]
async fn fails_for_schedule_conflict() -> Result<(), TestError> {
    let test = TestBuilder::new().with_academic_tables().build().await?;
    let (_, teacher) = test.people().insert_teacher("mwhite", "T001").await?;
    let (_, student) = test.people().insert_student("alice", "S001").await?;
    let current = test
        .academic()
        .insert_course("CS101", teacher.id, 30, Some("Mon/Wed 10:00-11:30"))
        .await?;
    let clashing = test
        .academic()
        .insert_course("MA201", teacher.id, 30, Some("Wed 14:00-15:30"))
        .await?;
    test.academic()
        .insert_enrollment(student.id, current.id)
        .await?;

    let result = EnrollmentService::new(&test.db)
        .enroll(student.id, clashing.id)
        .await;

    assert_eq!(
        domain_error(result),
        DomainError::conflict("schedule conflict: Course CS101")
    );

    Ok(())
}

/// Expect disjoint weekdays and unscheduled courses to enroll without conflict
#[tokio::test]
async fn allows_disjoint_schedules() -> Result<(), TestError> {
    let test = TestBuilder::new().with_academic_tables().build().await?;
    let (_, teacher) = test.people().insert_teacher("mwhite", "T001").await?;
    let (_, student) = test.people().insert_student("alice", "S001").await?;
    let monday = test
        .academic()
        .insert_course("CS101", teacher.id, 30, Some("Mon 09:00"))
        .await?;
    let friday = test
        .academic()
        .insert_course("CS102", teacher.id, 30, Some("Fri 09:00"))
        .await?;
    let unscheduled = test
        .academic()
        .insert_course("CS103", teacher.id, 30, None)
        .await?;

    let service = EnrollmentService::new(&test.db);
    service.enroll(student.id, monday.id).await.unwrap();
    service.enroll(student.id, friday.id).await.unwrap();
    service.enroll(student.id, unscheduled.id).await.unwrap();

    let courses = service.courses_for_student(student.id).await.unwrap();
    assert_eq!(courses.len(), 3);

    Ok(())
}

/// Expect capacity figures to reflect current enrollments
#[tokio::test]
async fn reports_capacity() -> Result<(), TestError> {
    let test = TestBuilder::new().with_academic_tables().build().await?;
    let (_, teacher) = test.people().insert_teacher("mwhite", "T001").await?;
    let (_, alice) = test.people().insert_student("alice", "S001").await?;
    let (_, bob) = test.people().insert_student("bob", "S002").await?;
    let course = test
        .academic()
        .insert_course("CS101", teacher.id, 2, None)
        .await?;
    test.academic().insert_enrollment(alice.id, course.id).await?;

    let service = EnrollmentService::new(&test.db);
    let capacity = service.capacity(course.id).await.unwrap();
    assert_eq!(capacity.capacity, 2);
    assert_eq!(capacity.current_enrollment, 1);
    assert_eq!(capacity.available_slots, 1);
    assert!(!capacity.is_full);

    test.academic().insert_enrollment(bob.id, course.id).await?;

    let capacity = service.capacity(course.id).await.unwrap();
    assert_eq!(capacity.available_slots, 0);
    assert!(capacity.is_full);

    Ok(())
}

/// Expect withdrawal to free the seat and a missing enrollment to be NotFound
#[tokio::test]
async fn withdraws_and_reenrolls() -> Result<(), TestError> {
    let test = TestBuilder::new().with_academic_tables().build().await?;
    let (_, teacher) = test.people().insert_teacher("mwhite", "T001").await?;
    let (_, student) = test.people().insert_student("alice", "S001").await?;
    let course = test
        .academic()
        .insert_course("CS101", teacher.id, 1, None)
        .await?;

    let service = EnrollmentService::new(&test.db);
    service.enroll(student.id, course.id).await.unwrap();
    service.withdraw(student.id, course.id).await.unwrap();

    assert!(!service.is_enrolled(student.id, course.id).await.unwrap());
    assert_eq!(
        domain_error(service.withdraw(student.id, course.id).await),
        DomainError::NotFound("enrollment")
    );

    service.enroll(student.id, course.id).await.unwrap();

    Ok(())
}
