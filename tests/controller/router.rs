//! Tests against the assembled router.

use axum::{
    body::Body,
    http::{header::AUTHORIZATION, Request},
};
use registrar::server::{model::app::AppState, router};
use tower::ServiceExt;

use super::*;

/// Expect protected routes to answer 401 without a bearer token
#[tokio::test]
async fn rejects_anonymous_requests() -> Result<(), TestError> {
    let test = TestBuilder::new().with_academic_tables().build().await?;
    let app = router::routes().with_state(test.to_app_state::<AppState>());

    let response = app
        .oneshot(Request::builder().uri("/api/courses").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    Ok(())
}

/// Expect a logged in student to be refused an admin route with 403
#[tokio::test]
async fn rejects_insufficient_role() -> Result<(), TestError> {
    let test = TestBuilder::new().with_academic_tables().build().await?;
    let (user, _) = test.people().insert_student("alice", "S001").await?;
    let app = router::routes().with_state(test.to_app_state::<AppState>());

    let response = app
        .oneshot(
            Request::builder()
                .uri("/api/admin/stats")
                .header(AUTHORIZATION, format!("Bearer {}", principal(&user).token()))
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::FORBIDDEN);

    Ok(())
}

/// Expect the OpenAPI document to be served without authentication
#[tokio::test]
async fn serves_openapi_document() -> Result<(), TestError> {
    let test = TestBuilder::new().with_academic_tables().build().await?;
    let app = router::routes().with_state(test.to_app_state::<AppState>());

    let response = app
        .oneshot(
            Request::builder()
                .uri("/api/docs/openapi.json")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);

    Ok(())
}
