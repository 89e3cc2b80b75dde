//! Tests for the login and current-user endpoints.

use axum::{extract::State, Json};
use entity::user::UserRole;
use registrar::{
    model::{auth::LoginDto, user::CreateUserDto},
    server::{
        controller::auth::{login, logout, me},
        service::user::UserService,
    },
};

use super::*;

async fn create_user(test: &TestContext) -> i32 {
    UserService::new(&test.db)
        .create(CreateUserDto {
            username: "alice".to_string(),
            email: "alice@example.edu".to_string(),
            password: "correct horse".to_string(),
            full_name: "Alice".to_string(),
            role: UserRole::Student,
        })
        .await
        .unwrap()
        .id
}

/// Expect 200 for valid credentials and 401 for a wrong password
#[tokio::test]
async fn login_status_codes() -> Result<(), TestError> {
    let test = TestBuilder::new().with_academic_tables().build().await?;
    create_user(&test).await;

    let result = login(
        State(test.to_app_state()),
        Json(LoginDto {
            username: "alice".to_string(),
            password: "correct horse".to_string(),
        }),
    )
    .await;
    assert_eq!(status(result), StatusCode::OK);

    let result = login(
        State(test.to_app_state()),
        Json(LoginDto {
            username: "alice".to_string(),
            password: "wrong".to_string(),
        }),
    )
    .await;
    assert_eq!(status(result), StatusCode::UNAUTHORIZED);

    Ok(())
}

/// Expect the current user to be returned and logout to always succeed
#[tokio::test]
async fn me_and_logout() -> Result<(), TestError> {
    let test = TestBuilder::new().with_academic_tables().build().await?;
    let user = test.people().insert_admin("root").await?;

    let result = me(State(test.to_app_state()), principal(&user)).await;
    assert_eq!(status(result), StatusCode::OK);

    let result = logout(principal(&user)).await;
    assert_eq!(status(result), StatusCode::OK);

    Ok(())
}
