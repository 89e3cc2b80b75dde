//! Tests for deletes that cascade through dependent rows.

use registrar::server::{
    error::domain::DomainError,
    service::{
        assignment::AssignmentService, course::CourseService, enrollment::EnrollmentService,
        grade::GradeService, notification::NotificationService, student::StudentService,
        teacher::TeacherService, user::UserService,
    },
};

use super::*;

/// Expect deleting a student to remove their enrollments, grades, submissions and user
#[tokio::test]
async fn deletes_student_with_dependents() -> Result<(), TestError> {
    let test = TestBuilder::new().with_academic_tables().build().await?;
    let (_, teacher) = test.people().insert_teacher("mwhite", "T001").await?;
    let (user, student) = test.people().insert_student("alice", "S001").await?;
    let (_, other) = test.people().insert_student("bob", "S002").await?;
    let course = test
        .academic()
        .insert_course("CS101", teacher.id, 30, None)
        .await?;
    let assignment = test
        .academic()
        .insert_assignment(course.id, "Lab 1", 10.0)
        .await?;
    for student_id in [student.id, other.id] {
        test.academic().insert_enrollment(student_id, course.id).await?;
        test.academic()
            .insert_grade(student_id, course.id, 75.0)
            .await?;
        test.academic()
            .insert_submission(assignment.id, student_id, "answer")
            .await?;
    }
    test.academic().insert_notification(user.id, "Welcome").await?;

    StudentService::new(&test.db).delete(student.id).await.unwrap();

    assert_eq!(
        domain_error(StudentService::new(&test.db).get(student.id).await),
        DomainError::NotFound("student")
    );
    assert_eq!(
        domain_error(UserService::new(&test.db).get(user.id).await),
        DomainError::NotFound("user")
    );

    let enrollments = EnrollmentService::new(&test.db)
        .list_for_course(course.id)
        .await
        .unwrap();
    assert_eq!(enrollments.len(), 1);
    assert_eq!(enrollments[0].student_id, other.id);
    assert_eq!(
        GradeService::new(&test.db)
            .grades_for_course(course.id)
            .await
            .unwrap()
            .len(),
        1
    );
    assert_eq!(
        AssignmentService::new(&test.db)
            .submissions_for_assignment(assignment.id, false)
            .await
            .unwrap()
            .len(),
        1
    );
    assert_eq!(
        NotificationService::new(&test.db)
            .unread_count(user.id)
            .await
            .unwrap()
            .count,
        0
    );

    Ok(())
}

/// Expect deleting a course to remove its enrollments, grades, assignments and submissions
#[tokio::test]
async fn deletes_course_with_dependents() -> Result<(), TestError> {
    let test = TestBuilder::new().with_academic_tables().build().await?;
    let (_, teacher) = test.people().insert_teacher("mwhite", "T001").await?;
    let (_, student) = test.people().insert_student("alice", "S001").await?;
    let doomed = test
        .academic()
        .insert_course("CS101", teacher.id, 30, None)
        .await?;
    let kept = test
        .academic()
        .insert_course("CS102", teacher.id, 30, None)
        .await?;
    let assignment = test
        .academic()
        .insert_assignment(doomed.id, "Lab 1", 10.0)
        .await?;
    test.academic()
        .insert_submission(assignment.id, student.id, "answer")
        .await?;
    for course_id in [doomed.id, kept.id] {
        test.academic().insert_enrollment(student.id, course_id).await?;
        test.academic()
            .insert_grade(student.id, course_id, 80.0)
            .await?;
    }

    CourseService::new(&test.db).delete(doomed.id).await.unwrap();

    assert_eq!(
        domain_error(CourseService::new(&test.db).get(doomed.id).await),
        DomainError::NotFound("course")
    );

    let courses = EnrollmentService::new(&test.db)
        .courses_for_student(student.id)
        .await
        .unwrap();
    assert_eq!(courses.len(), 1);
    assert_eq!(courses[0].id, kept.id);
    assert_eq!(
        GradeService::new(&test.db)
            .grades_for_student(student.id)
            .await
            .unwrap()
            .len(),
        1
    );
    assert!(AssignmentService::new(&test.db)
        .submissions_for_student(student.id)
        .await
        .unwrap()
        .is_empty());

    Ok(())
}

/// Expect deleting a teacher to remove every course they teach and their user
#[tokio::test]
async fn deletes_teacher_with_courses() -> Result<(), TestError> {
    let test = TestBuilder::new().with_academic_tables().build().await?;
    let (user, teacher) = test.people().insert_teacher("mwhite", "T001").await?;
    let (_, colleague) = test.people().insert_teacher("jpink", "T002").await?;
    let (_, student) = test.people().insert_student("alice", "S001").await?;
    let taught = test
        .academic()
        .insert_course("CS101", teacher.id, 30, None)
        .await?;
    let other = test
        .academic()
        .insert_course("CS102", colleague.id, 30, None)
        .await?;
    test.academic().insert_enrollment(student.id, taught.id).await?;
    test.academic().insert_enrollment(student.id, other.id).await?;

    TeacherService::new(&test.db).delete(teacher.id).await.unwrap();

    assert_eq!(
        domain_error(TeacherService::new(&test.db).get(teacher.id).await),
        DomainError::NotFound("teacher")
    );
    assert_eq!(
        domain_error(UserService::new(&test.db).get(user.id).await),
        DomainError::NotFound("user")
    );
    assert_eq!(
        domain_error(CourseService::new(&test.db).get(taught.id).await),
        DomainError::NotFound("course")
    );

    let remaining = EnrollmentService::new(&test.db)
        .list_for_student(student.id)
        .await
        .unwrap();
    assert_eq!(remaining.len(), 1);
    assert_eq!(remaining[0].course_id, other.id);

    Ok(())
}

/// Expect deleting a missing course to be NotFound
#[tokio::test]
async fn delete_missing_course_fails() -> Result<(), TestError> {
    let test = TestBuilder::new().with_academic_tables().build().await?;

    let result = CourseService::new(&test.db).delete(11).await;

    assert_eq!(domain_error(result), DomainError::NotFound("course"));

    Ok(())
}
