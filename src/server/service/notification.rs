//! In-app notifications.
//!
//! Engines emit [`NotificationEvent`]s through a [`Notifier`] after their transaction commits.
//! Delivery is fire-and-forget: a failed insert is logged and never reaches the caller.

use sea_orm::{ConnectionTrait, DatabaseConnection};

use crate::{
    model::notification::{NotificationDto, UnreadCountDto},
    server::{
        data::notification::NotificationRepository,
        error::{domain::DomainError, Error},
    },
};

/// Something a user should hear about
#[derive(Clone, Debug, PartialEq)]
pub enum NotificationEvent {
    NewAssignment { course: String, assignment: String },
    GradeReleased { course: String, score: f64 },
    AssignmentGraded { assignment: String, score: f64 },
    EnrollmentConfirmation { course: String },
}

/// Title, message and category of a rendered event
pub struct RenderedNotification {
    pub title: String,
    pub message: String,
    pub category: &'static str,
}

impl NotificationEvent {
    pub fn render(&self) -> RenderedNotification {
        match self {
            Self::NewAssignment { course, assignment } => RenderedNotification {
                title: format!("New Assignment: {}", assignment),
                message: format!(
                    "A new assignment has been posted in {}. Check it out!",
                    course
                ),
                category: "assignment",
            },
            Self::GradeReleased { course, score } => RenderedNotification {
                title: format!("Grade Released: {}", course),
                message: format!(
                    "Your grade for {} has been released. Score: {}",
                    course, score
                ),
                category: "grade",
            },
            Self::AssignmentGraded { assignment, score } => RenderedNotification {
                title: format!("Assignment Graded: {}", assignment),
                message: format!(
                    "Your submission for '{}' has been graded. Score: {}",
                    assignment, score
                ),
                category: "assignment",
            },
            Self::EnrollmentConfirmation { course } => RenderedNotification {
                title: format!("Successfully Enrolled: {}", course),
                message: format!("You have been successfully enrolled in {}", course),
                category: "enrollment",
            },
        }
    }
}

/// Persists notification rows, swallowing failures
pub struct Notifier<'a, C: ConnectionTrait> {
    db: &'a C,
}

impl<'a, C: ConnectionTrait> Notifier<'a, C> {
    pub fn new(db: &'a C) -> Self {
        Self { db }
    }

    /// Stores `event` for `user_id`
    ///
    /// Returns whether the notification was stored. Errors are logged at warn and dropped.
    pub async fn notify(&self, user_id: i32, event: NotificationEvent) -> bool {
        let rendered = event.render();

        match NotificationRepository::new(self.db)
            .create(
                user_id,
                rendered.title,
                rendered.message,
                Some(rendered.category.to_string()),
            )
            .await
        {
            Ok(_) => true,
            Err(e) => {
                tracing::warn!(
                    "Failed to store {} notification for user ID {}: {}",
                    rendered.category,
                    user_id,
                    e
                );
                false
            }
        }
    }
}

/// Reads and bookkeeping over a user's own notifications
pub struct NotificationService<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> NotificationService<'a> {
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    /// Newest first, at most `limit` (default 50)
    pub async fn list(
        &self,
        user_id: i32,
        unread_only: bool,
        limit: Option<u64>,
    ) -> Result<Vec<NotificationDto>, Error> {
        let notifications = NotificationRepository::new(self.db)
            .list_for_user(user_id, unread_only, limit.unwrap_or(50))
            .await?;

        Ok(notifications.into_iter().map(NotificationDto::from).collect())
    }

    pub async fn unread_count(&self, user_id: i32) -> Result<UnreadCountDto, Error> {
        let count = NotificationRepository::new(self.db)
            .count_unread(user_id)
            .await?;

        Ok(UnreadCountDto { count })
    }

    /// Marks one of the user's notifications read; another user's notification is `NotFound`
    pub async fn mark_read(
        &self,
        user_id: i32,
        notification_id: i32,
    ) -> Result<NotificationDto, Error> {
        let repo = NotificationRepository::new(self.db);

        let notification = repo
            .find_for_user(notification_id, user_id)
            .await?
            .ok_or(DomainError::NotFound("notification"))?;

        Ok(repo.mark_read(notification).await?.into())
    }

    /// Returns the number of notifications changed
    pub async fn mark_all_read(&self, user_id: i32) -> Result<u64, Error> {
        Ok(NotificationRepository::new(self.db)
            .mark_all_read(user_id)
            .await?)
    }

    pub async fn delete(&self, user_id: i32, notification_id: i32) -> Result<(), Error> {
        let repo = NotificationRepository::new(self.db);

        let notification = repo
            .find_for_user(notification_id, user_id)
            .await?
            .ok_or(DomainError::NotFound("notification"))?;

        repo.delete(notification.id).await?;

        Ok(())
    }
}
