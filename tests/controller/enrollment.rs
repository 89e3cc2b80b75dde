//! Tests for enrollment endpoints.

use axum::{
    extract::{Path, State},
    Json,
};
use registrar::{
    model::enrollment::CreateEnrollmentDto,
    server::controller::enrollment::{enroll, withdraw},
};

use super::*;

/// Expect 201 on enrollment, 409 on a repeat, and 404 for an unknown course
#[tokio::test]
async fn enroll_status_codes() -> Result<(), TestError> {
    let test = TestBuilder::new().with_academic_tables().build().await?;
    let (_, teacher) = test.people().insert_teacher("mwhite", "T001").await?;
    let (user, student) = test.people().insert_student("alice", "S001").await?;
    let course = test
        .academic()
        .insert_course("CS101", teacher.id, 30, None)
        .await?;

    let body = CreateEnrollmentDto {
        student_id: student.id,
        course_id: course.id,
    };

    let result = enroll(State(test.to_app_state()), principal(&user), Json(body.clone())).await;
    assert_eq!(status(result), StatusCode::CREATED);

    let result = enroll(State(test.to_app_state()), principal(&user), Json(body)).await;
    assert_eq!(status(result), StatusCode::CONFLICT);

    let result = enroll(
        State(test.to_app_state()),
        principal(&user),
        Json(CreateEnrollmentDto {
            student_id: student.id,
            course_id: course.id + 1,
        }),
    )
    .await;
    assert_eq!(status(result), StatusCode::NOT_FOUND);

    Ok(())
}

/// Expect an inactive course to be 409
#[tokio::test]
async fn enroll_inactive_course_conflicts() -> Result<(), TestError> {
    let test = TestBuilder::new().with_academic_tables().build().await?;
    let (_, teacher) = test.people().insert_teacher("mwhite", "T001").await?;
    let (user, student) = test.people().insert_student("alice", "S001").await?;
    let course = test
        .academic()
        .insert_inactive_course("CS101", teacher.id)
        .await?;

    let result = enroll(
        State(test.to_app_state()),
        principal(&user),
        Json(CreateEnrollmentDto {
            student_id: student.id,
            course_id: course.id,
        }),
    )
    .await;

    assert_eq!(status(result), StatusCode::CONFLICT);

    Ok(())
}

/// Expect withdrawing by enrollment ID to succeed once and then be 404
#[tokio::test]
async fn withdraw_status_codes() -> Result<(), TestError> {
    let test = TestBuilder::new().with_academic_tables().build().await?;
    let (_, teacher) = test.people().insert_teacher("mwhite", "T001").await?;
    let (user, student) = test.people().insert_student("alice", "S001").await?;
    let course = test
        .academic()
        .insert_course("CS101", teacher.id, 30, None)
        .await?;
    let enrollment = test
        .academic()
        .insert_enrollment(student.id, course.id)
        .await?;

    let result = withdraw(
        State(test.to_app_state()),
        principal(&user),
        Path(enrollment.id),
    )
    .await;
    assert_eq!(status(result), StatusCode::OK);

    let result = withdraw(
        State(test.to_app_state()),
        principal(&user),
        Path(enrollment.id),
    )
    .await;
    assert_eq!(status(result), StatusCode::NOT_FOUND);

    Ok(())
}
