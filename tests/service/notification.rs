//! Tests for notification delivery and per-user inbox operations.

use entity::prelude::User;
use registrar::server::{
    error::domain::DomainError,
    service::notification::{NotificationEvent, NotificationService, Notifier},
};

use super::*;

/// Expect the notifier to report a failed insert instead of returning an error
#[tokio::test]
async fn notifier_swallows_failures() -> Result<(), TestError> {
    let test = TestBuilder::new().with_table(User).build().await?;
    let user = test.people().insert_admin("root").await?;

    let delivered = Notifier::new(&test.db)
        .notify(
            user.id,
            NotificationEvent::EnrollmentConfirmation {
                course: "Course CS101".to_string(),
            },
        )
        .await;

    assert!(!delivered);

    Ok(())
}

/// Expect listing to be scoped to the user, newest first, with an unread filter and limit
#[tokio::test]
async fn lists_own_notifications() -> Result<(), TestError> {
    let test = TestBuilder::new().with_academic_tables().build().await?;
    let alice = test.people().insert_admin("alice").await?;
    let bob = test.people().insert_admin("bob").await?;
    let first = test.academic().insert_notification(alice.id, "First").await?;
    test.academic().insert_notification(alice.id, "Second").await?;
    test.academic().insert_notification(alice.id, "Third").await?;
    test.academic().insert_notification(bob.id, "Other").await?;

    let service = NotificationService::new(&test.db);
    service.mark_read(alice.id, first.id).await.unwrap();

    let all = service.list(alice.id, false, None).await.unwrap();
    assert_eq!(all.len(), 3);
    assert!(all.iter().all(|n| n.title != "Other"));

    let unread = service.list(alice.id, true, None).await.unwrap();
    assert_eq!(unread.len(), 2);
    assert!(unread.iter().all(|n| !n.is_read));

    assert_eq!(service.list(alice.id, false, Some(1)).await.unwrap().len(), 1);
    assert_eq!(service.unread_count(alice.id).await.unwrap().count, 2);

    Ok(())
}

/// Expect another user's notification to be NotFound for read and delete
#[tokio::test]
async fn hides_other_users_notifications() -> Result<(), TestError> {
    let test = TestBuilder::new().with_academic_tables().build().await?;
    let alice = test.people().insert_admin("alice").await?;
    let bob = test.people().insert_admin("bob").await?;
    let notification = test.academic().insert_notification(bob.id, "Private").await?;

    let service = NotificationService::new(&test.db);

    assert_eq!(
        domain_error(service.mark_read(alice.id, notification.id).await),
        DomainError::NotFound("notification")
    );
    assert_eq!(
        domain_error(service.delete(alice.id, notification.id).await),
        DomainError::NotFound("notification")
    );
    assert_eq!(service.unread_count(bob.id).await.unwrap().count, 1);

    Ok(())
}

/// Expect mark-all-read to report the number changed and clear the unread count
#[tokio::test]
async fn marks_all_read() -> Result<(), TestError> {
    let test = TestBuilder::new().with_academic_tables().build().await?;
    let user = test.people().insert_admin("alice").await?;
    test.academic().insert_notification(user.id, "First").await?;
    test.academic().insert_notification(user.id, "Second").await?;

    let service = NotificationService::new(&test.db);

    assert_eq!(service.mark_all_read(user.id).await.unwrap(), 2);
    assert_eq!(service.unread_count(user.id).await.unwrap().count, 0);
    assert_eq!(service.mark_all_read(user.id).await.unwrap(), 0);

    Ok(())
}

/// Expect a deleted notification to disappear from the inbox
#[tokio::test]
async fn deletes_notification() -> Result<(), TestError> {
    let test = TestBuilder::new().with_academic_tables().build().await?;
    let user = test.people().insert_admin("alice").await?;
    let notification = test.academic().insert_notification(user.id, "Bye").await?;

    let service = NotificationService::new(&test.db);
    service.delete(user.id, notification.id).await.unwrap();

    assert!(service.list(user.id, false, None).await.unwrap().is_empty());

    Ok(())
}
