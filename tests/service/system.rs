//! Tests for the versioned settings document and system statistics.

use registrar::server::{error::domain::DomainError, service::system::SystemService};
use serde_json::json;

use super::*;

/// Expect defaults at version 0 before anything is stored
#[tokio::test]
async fn reads_defaults_before_first_write() -> Result<(), TestError> {
    let test = TestBuilder::new().with_academic_tables().build().await?;

    let config = SystemService::new(&test.db).get_config().await.unwrap();

    assert_eq!(config.version, 0);
    assert_eq!(config.settings["enrollment_open"], json!(true));
    assert_eq!(config.settings["max_enrollments_per_student"], json!(10));

    Ok(())
}

/// Expect each write to merge keys and bump the version by one
#[tokio::test]
async fn merges_and_bumps_version() -> Result<(), TestError> {
    let test = TestBuilder::new().with_academic_tables().build().await?;
    let service = SystemService::new(&test.db);

    let first = service
        .update_config(json!({ "maintenance_mode": true, "banner": "Welcome" }), Some(0))
        .await
        .unwrap();
    assert_eq!(first.version, 1);

    let second = service.toggle_enrollment(false).await.unwrap();
    assert_eq!(second.version, 2);

    let stored = service.get_config().await.unwrap();
    assert_eq!(stored.version, 2);
    assert_eq!(stored.settings["maintenance_mode"], json!(true));
    assert_eq!(stored.settings["enrollment_open"], json!(false));
    assert_eq!(stored.settings["banner"], json!("Welcome"));
    assert_eq!(stored.settings["current_semester"], json!("2024 Spring"));

    Ok(())
}

/// Expect a write against a stale version to be rejected and leave the document unchanged
#[tokio::test]
async fn rejects_stale_version() -> Result<(), TestError> {
    let test = TestBuilder::new().with_academic_tables().build().await?;
    test.academic()
        .insert_system_config(json!({ "current_semester": "2025 Spring" }), 3)
        .await?;

    let service = SystemService::new(&test.db);
    let result = service
        .update_config(json!({ "current_semester": "2025 Fall" }), Some(2))
        .await;

    assert_eq!(
        domain_error(result),
        DomainError::conflict("config version mismatch: expected 2, found 3")
    );

    let stored = service.get_config().await.unwrap();
    assert_eq!(stored.version, 3);
    assert_eq!(stored.settings["current_semester"], json!("2025 Spring"));

    Ok(())
}

/// Expect a patch that is not an object, or mistypes a known key, to be rejected
#[tokio::test]
async fn rejects_invalid_patches() -> Result<(), TestError> {
    let test = TestBuilder::new().with_academic_tables().build().await?;
    let service = SystemService::new(&test.db);

    let result = service.update_config(json!(["enrollment_open"]), None).await;
    assert_eq!(
        domain_error(result),
        DomainError::invalid_argument("settings must be a JSON object")
    );

    let result = service
        .update_config(json!({ "enrollment_open": "yes" }), None)
        .await;
    assert!(matches!(
        domain_error(result),
        DomainError::InvalidArgument(msg) if msg.starts_with("invalid settings:")
    ));

    assert_eq!(service.get_config().await.unwrap().version, 0);

    Ok(())
}

/// Expect an empty semester to be rejected and a trimmed one stored
#[tokio::test]
async fn sets_semester() -> Result<(), TestError> {
    let test = TestBuilder::new().with_academic_tables().build().await?;
    let service = SystemService::new(&test.db);

    assert!(matches!(
        domain_error(service.set_semester("   ").await),
        DomainError::InvalidArgument(_)
    ));

    let config = service.set_semester(" 2025 Fall ").await.unwrap();
    assert_eq!(config.settings["current_semester"], json!("2025 Fall"));

    Ok(())
}

/// Expect statistics to count rows per table and active users
#[tokio::test]
async fn reports_stats() -> Result<(), TestError> {
    let test = TestBuilder::new().with_academic_tables().build().await?;
    test.people().insert_admin("root").await?;
    let (_, teacher) = test.people().insert_teacher("mwhite", "T001").await?;
    let (_, alice) = test.people().insert_student("alice", "S001").await?;
    let (bob_user, _) = test.people().insert_student("bob", "S002").await?;
    let course = test
        .academic()
        .insert_course("CS101", teacher.id, 30, None)
        .await?;
    test.academic().insert_enrollment(alice.id, course.id).await?;
    test.people().deactivate_user(bob_user.id).await?;

    let stats = SystemService::new(&test.db).stats().await.unwrap();

    assert_eq!(stats.total_users, 4);
    assert_eq!(stats.active_users, 3);
    assert_eq!(stats.total_students, 2);
    assert_eq!(stats.total_teachers, 1);
    assert_eq!(stats.total_courses, 1);
    assert_eq!(stats.total_enrollments, 1);
    assert_eq!(stats.current_semester, "2024 Spring");

    Ok(())
}
