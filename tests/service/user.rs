//! Tests for user accounts, login and password changes.

use entity::user::UserRole;
use registrar::{
    model::{
        auth::LoginDto,
        student::CreateStudentDto,
        user::{CreateUserDto, UpdateUserDto},
    },
    server::{
        error::{auth::AuthError, domain::DomainError},
        service::{student::StudentService, user::UserService},
    },
};

use super::*;
use crate::util::auth_error;

fn new_user(username: &str, email: &str) -> CreateUserDto {
    CreateUserDto {
        username: username.to_string(),
        email: email.to_string(),
        password: "correct horse".to_string(),
        full_name: String::new(),
        role: UserRole::Student,
    }
}

fn credentials(username: &str, password: &str) -> LoginDto {
    LoginDto {
        username: username.to_string(),
        password: password.to_string(),
    }
}

/// Expect login to issue a `<username>:<id>` token for valid credentials
#[tokio::test]
async fn logs_in_with_valid_credentials() -> Result<(), TestError> {
    let test = TestBuilder::new().with_academic_tables().build().await?;

    let service = UserService::new(&test.db);
    let user = service
        .create(new_user("alice", "alice@example.edu"))
        .await
        .unwrap();
    assert_eq!(user.full_name, "alice");

    let response = service
        .login(credentials("alice", "correct horse"))
        .await
        .unwrap();

    assert_eq!(response.access_token, format!("alice:{}", user.id));
    assert_eq!(response.token_type, "bearer");
    assert_eq!(response.user.id, user.id);

    Ok(())
}

/// Expect a wrong password, unknown user or frozen account to fail login alike
#[tokio::test]
async fn rejects_bad_credentials() -> Result<(), TestError> {
    let test = TestBuilder::new().with_academic_tables().build().await?;

    let service = UserService::new(&test.db);
    let user = service
        .create(new_user("alice", "alice@example.edu"))
        .await
        .unwrap();

    assert_eq!(
        auth_error(service.login(credentials("alice", "wrong")).await),
        AuthError::InvalidCredentials
    );
    assert_eq!(
        auth_error(service.login(credentials("nobody", "correct horse")).await),
        AuthError::InvalidCredentials
    );

    service.set_active(user.id, false).await.unwrap();

    assert!(service
        .authenticate("alice", "correct horse")
        .await
        .unwrap()
        .is_none());

    Ok(())
}

/// Expect a taken username or email to be AlreadyExists and an empty password rejected
#[tokio::test]
async fn rejects_duplicate_and_blank_fields() -> Result<(), TestError> {
    let test = TestBuilder::new().with_academic_tables().build().await?;
    test.people().insert_admin("root").await?;

    let service = UserService::new(&test.db);

    assert_eq!(
        domain_error(service.create(new_user("root", "new@example.edu")).await),
        DomainError::already_exists("username")
    );
    assert_eq!(
        domain_error(service.create(new_user("carol", "root@example.com")).await),
        DomainError::already_exists("email")
    );
    assert!(matches!(
        domain_error(
            service
                .create(CreateUserDto {
                    password: String::new(),
                    ..new_user("carol", "carol@example.edu")
                })
                .await
        ),
        DomainError::InvalidArgument(_)
    ));

    Ok(())
}

/// Expect renaming onto another user's username to be rejected
#[tokio::test]
async fn update_keeps_usernames_unique() -> Result<(), TestError> {
    let test = TestBuilder::new().with_academic_tables().build().await?;
    test.people().insert_admin("root").await?;
    let (user, _) = test.people().insert_student("alice", "S001").await?;

    let service = UserService::new(&test.db);
    let result = service
        .update(
            user.id,
            UpdateUserDto {
                username: Some("root".to_string()),
                ..Default::default()
            },
        )
        .await;
    assert_eq!(domain_error(result), DomainError::already_exists("username"));

    let updated = service
        .update(
            user.id,
            UpdateUserDto {
                full_name: Some("Alice Liddell".to_string()),
                ..Default::default()
            },
        )
        .await
        .unwrap();
    assert_eq!(updated.full_name, "Alice Liddell");
    assert_eq!(updated.username, "alice");

    Ok(())
}

/// Expect the old password to be checked before the new one is stored
#[tokio::test]
async fn changes_password() -> Result<(), TestError> {
    let test = TestBuilder::new().with_academic_tables().build().await?;

    let service = UserService::new(&test.db);
    let user = service
        .create(new_user("alice", "alice@example.edu"))
        .await
        .unwrap();

    assert_eq!(
        domain_error(service.change_password(user.id, "wrong", "new secret").await),
        DomainError::invalid_argument("incorrect password")
    );

    service
        .change_password(user.id, "correct horse", "new secret")
        .await
        .unwrap();

    assert!(service.login(credentials("alice", "new secret")).await.is_ok());
    assert!(service
        .authenticate("alice", "correct horse")
        .await
        .unwrap()
        .is_none());

    Ok(())
}

/// Expect creating a student to create its user in the same step and reject a taken number
#[tokio::test]
async fn creates_student_with_user() -> Result<(), TestError> {
    let test = TestBuilder::new().with_academic_tables().build().await?;
    test.people().insert_student("bob", "S002").await?;

    let service = StudentService::new(&test.db);
    let student = service
        .create(CreateStudentDto {
            username: "alice".to_string(),
            email: "alice@example.edu".to_string(),
            password: "correct horse".to_string(),
            full_name: "Alice Liddell".to_string(),
            student_number: "S001".to_string(),
            grade_level: Some("Freshman".to_string()),
            major: None,
            phone: None,
        })
        .await
        .unwrap();

    assert_eq!(student.full_name, "Alice Liddell");
    assert_eq!(service.get_by_number("S001").await.unwrap().id, student.id);

    let result = service
        .create(CreateStudentDto {
            username: "carol".to_string(),
            email: "carol@example.edu".to_string(),
            password: "correct horse".to_string(),
            full_name: "Carol".to_string(),
            student_number: "S002".to_string(),
            grade_level: None,
            major: None,
            phone: None,
        })
        .await;
    assert_eq!(
        domain_error(result),
        DomainError::already_exists("student number")
    );
    assert!(UserService::new(&test.db)
        .authenticate("carol", "correct horse")
        .await
        .unwrap()
        .is_none());

    Ok(())
}
