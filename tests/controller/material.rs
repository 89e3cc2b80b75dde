//! Tests for material endpoints: upload role tier and enrollment-gated downloads.

use axum::{
    body::Body,
    extract::{Path, State},
    http::{
        header::{AUTHORIZATION, CONTENT_DISPOSITION, CONTENT_TYPE},
        Request,
    },
};
use registrar::server::{
    controller::material::download_material,
    model::app::AppState,
    router,
    util::storage::FileStore,
};
use tower::ServiceExt;

use super::*;

const BOUNDARY: &str = "registrar-boundary";

fn upload_request(token: &str, course_id: i32) -> Request<Body> {
    let body = format!(
        "--{b}\r\n\
         Content-Disposition: form-data; name=\"course_id\"\r\n\r\n\
         {course_id}\r\n\
         --{b}\r\n\
         Content-Disposition: form-data; name=\"title\"\r\n\r\n\
         Syllabus\r\n\
         --{b}\r\n\
         Content-Disposition: form-data; name=\"file\"; filename=\"syllabus.pdf\"\r\n\
         Content-Type: application/pdf\r\n\r\n\
         %PDF-1.7\r\n\
         --{b}--\r\n",
        b = BOUNDARY,
        course_id = course_id
    );

    Request::builder()
        .method("POST")
        .uri("/api/materials")
        .header(AUTHORIZATION, format!("Bearer {}", token))
        .header(
            CONTENT_TYPE,
            format!("multipart/form-data; boundary={}", BOUNDARY),
        )
        .body(Body::from(body))
        .unwrap()
}

/// Expect a teacher's multipart upload to be 201 and a student's to be 403
#[tokio::test]
async fn upload_requires_teacher() -> Result<(), TestError> {
    let dir = tempfile::tempdir().unwrap();
    let test = TestBuilder::new().with_academic_tables().build().await?;
    let (teacher_user, teacher) = test.people().insert_teacher("mwhite", "T001").await?;
    let (student_user, _) = test.people().insert_student("alice", "S001").await?;
    let course = test
        .academic()
        .insert_course("CS101", teacher.id, 30, None)
        .await?;
    let state = AppState {
        db: test.db.clone(),
        files: FileStore::new(dir.path(), 1024),
    };

    let response = router::routes()
        .with_state(state.clone())
        .oneshot(upload_request(&principal(&student_user).token(), course.id))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::FORBIDDEN);

    let response = router::routes()
        .with_state(state)
        .oneshot(upload_request(&principal(&teacher_user).token(), course.id))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);
    assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 1);

    Ok(())
}

/// Expect an enrolled student to download (200) and a student not enrolled to get 403
#[tokio::test]
async fn download_requires_enrollment() -> Result<(), TestError> {
    let dir = tempfile::tempdir().unwrap();
    let test = TestBuilder::new().with_academic_tables().build().await?;
    let (_, teacher) = test.people().insert_teacher("mwhite", "T001").await?;
    let (enrolled_user, enrolled) = test.people().insert_student("alice", "S001").await?;
    let (outsider_user, _) = test.people().insert_student("bob", "S002").await?;
    let course = test
        .academic()
        .insert_course("CS101", teacher.id, 30, None)
        .await?;
    test.academic().insert_enrollment(enrolled.id, course.id).await?;

    let path = dir.path().join("course_1_0123456789abcdef0123456789abcdef_notes.pdf");
    std::fs::write(&path, b"notes").unwrap();
    let material = test
        .academic()
        .insert_material(course.id, "Notes", &path.to_string_lossy())
        .await?;

    let result = download_material(
        State(test.to_app_state()),
        principal(&outsider_user),
        Path(material.id),
    )
    .await;
    assert_eq!(status(result), StatusCode::FORBIDDEN);

    let response = download_material(
        State(test.to_app_state()),
        principal(&enrolled_user),
        Path(material.id),
    )
    .await
    .unwrap()
    .into_response();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        response.headers()[CONTENT_DISPOSITION],
        "attachment; filename=\"notes.pdf\""
    );

    Ok(())
}
