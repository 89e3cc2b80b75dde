//! Tests for course endpoints: role tier and status mapping.

use axum::{
    extract::{Path, State},
    Json,
};
use registrar::{
    model::course::CreateCourseDto,
    server::controller::course::{create_course, delete_course, get_course},
};

use super::*;

fn new_course(code: &str, teacher_id: i32) -> CreateCourseDto {
    CreateCourseDto {
        course_code: code.to_string(),
        name: "Algorithms".to_string(),
        description: None,
        teacher_id,
        credits: 3.0,
        capacity: 40,
        schedule: Some("Tue/Thu 13:00-14:30".to_string()),
        location: None,
        semester: "2025 Fall".to_string(),
    }
}

/// Expect a teacher to create a course (201) and a student to be refused (403)
#[tokio::test]
async fn create_requires_teacher() -> Result<(), TestError> {
    let test = TestBuilder::new().with_academic_tables().build().await?;
    let (teacher_user, teacher) = test.people().insert_teacher("mwhite", "T001").await?;
    let (student_user, _) = test.people().insert_student("alice", "S001").await?;

    let result = create_course(
        State(test.to_app_state()),
        principal(&student_user),
        Json(new_course("CS201", teacher.id)),
    )
    .await;
    assert_eq!(status(result), StatusCode::FORBIDDEN);

    let result = create_course(
        State(test.to_app_state()),
        principal(&teacher_user),
        Json(new_course("CS201", teacher.id)),
    )
    .await;
    assert_eq!(status(result), StatusCode::CREATED);

    Ok(())
}

/// Expect a duplicate code to be 409, an unknown teacher 404 and bad capacity 400
#[tokio::test]
async fn create_maps_domain_errors() -> Result<(), TestError> {
    let test = TestBuilder::new().with_academic_tables().build().await?;
    let admin = test.people().insert_admin("root").await?;
    let (_, teacher) = test.people().insert_teacher("mwhite", "T001").await?;
    test.academic()
        .insert_course("CS201", teacher.id, 30, None)
        .await?;

    let result = create_course(
        State(test.to_app_state()),
        principal(&admin),
        Json(new_course("CS201", teacher.id)),
    )
    .await;
    assert_eq!(status(result), StatusCode::CONFLICT);

    let result = create_course(
        State(test.to_app_state()),
        principal(&admin),
        Json(new_course("CS202", teacher.id + 100)),
    )
    .await;
    assert_eq!(status(result), StatusCode::NOT_FOUND);

    let result = create_course(
        State(test.to_app_state()),
        principal(&admin),
        Json(CreateCourseDto {
            capacity: 0,
            ..new_course("CS203", teacher.id)
        }),
    )
    .await;
    assert_eq!(status(result), StatusCode::BAD_REQUEST);

    Ok(())
}

/// Expect a missing course to be 404 and a delete to leave it gone
#[tokio::test]
async fn get_and_delete() -> Result<(), TestError> {
    let test = TestBuilder::new().with_academic_tables().build().await?;
    let (teacher_user, teacher) = test.people().insert_teacher("mwhite", "T001").await?;
    let course = test
        .academic()
        .insert_course("CS201", teacher.id, 30, None)
        .await?;

    let result = get_course(
        State(test.to_app_state()),
        principal(&teacher_user),
        Path(course.id),
    )
    .await;
    assert_eq!(status(result), StatusCode::OK);

    let result = delete_course(
        State(test.to_app_state()),
        principal(&teacher_user),
        Path(course.id),
    )
    .await;
    assert_eq!(status(result), StatusCode::OK);

    let result = get_course(
        State(test.to_app_state()),
        principal(&teacher_user),
        Path(course.id),
    )
    .await;
    assert_eq!(status(result), StatusCode::NOT_FOUND);

    Ok(())
}
