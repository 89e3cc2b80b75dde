use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};

use crate::{
    model::{
        api::{ErrorDto, MessageDto},
        notification::{NotificationDto, NotificationListParams, UnreadCountDto},
    },
    server::{
        error::Error,
        model::{app::AppState, principal::Principal},
        service::notification::NotificationService,
    },
};

pub static NOTIFICATION_TAG: &str = "notification";

/// Notifications of the authenticated user, newest first
#[utoipa::path(
    get,
    path = "/api/notifications",
    tag = NOTIFICATION_TAG,
    params(NotificationListParams),
    responses(
        (status = 200, description = "Own notifications", body = Vec<NotificationDto>),
        (status = 401, description = "Not authenticated", body = ErrorDto)
    ),
)]
pub async fn list_notifications(
    State(state): State<AppState>,
    principal: Principal,
    Query(params): Query<NotificationListParams>,
) -> Result<impl IntoResponse, Error> {
    let notifications = NotificationService::new(&state.db)
        .list(
            principal.user_id,
            params.unread_only.unwrap_or(false),
            params.limit,
        )
        .await?;

    Ok((StatusCode::OK, Json(notifications)))
}

#[utoipa::path(
    get,
    path = "/api/notifications/unread-count",
    tag = NOTIFICATION_TAG,
    responses(
        (status = 200, description = "Number of unread notifications", body = UnreadCountDto),
        (status = 401, description = "Not authenticated", body = ErrorDto)
    ),
)]
pub async fn unread_count(
    State(state): State<AppState>,
    principal: Principal,
) -> Result<impl IntoResponse, Error> {
    let count = NotificationService::new(&state.db)
        .unread_count(principal.user_id)
        .await?;

    Ok((StatusCode::OK, Json(count)))
}

/// Mark one of the authenticated user's notifications read
#[utoipa::path(
    put,
    path = "/api/notifications/{notification_id}/read",
    tag = NOTIFICATION_TAG,
    params(("notification_id" = i32, Path, description = "Notification ID")),
    responses(
        (status = 200, description = "Marked read", body = NotificationDto),
        (status = 404, description = "No such notification for this user", body = ErrorDto)
    ),
)]
pub async fn mark_read(
    State(state): State<AppState>,
    principal: Principal,
    Path(notification_id): Path<i32>,
) -> Result<impl IntoResponse, Error> {
    let notification = NotificationService::new(&state.db)
        .mark_read(principal.user_id, notification_id)
        .await?;

    Ok((StatusCode::OK, Json(notification)))
}

#[utoipa::path(
    put,
    path = "/api/notifications/mark-all-read",
    tag = NOTIFICATION_TAG,
    responses(
        (status = 200, description = "All marked read", body = MessageDto),
        (status = 401, description = "Not authenticated", body = ErrorDto)
    ),
)]
pub async fn mark_all_read(
    State(state): State<AppState>,
    principal: Principal,
) -> Result<impl IntoResponse, Error> {
    let changed = NotificationService::new(&state.db)
        .mark_all_read(principal.user_id)
        .await?;

    Ok((
        StatusCode::OK,
        Json(MessageDto::new(format!(
            "Marked {} notifications as read",
            changed
        ))),
    ))
}

#[utoipa::path(
    delete,
    path = "/api/notifications/{notification_id}",
    tag = NOTIFICATION_TAG,
    params(("notification_id" = i32, Path, description = "Notification ID")),
    responses(
        (status = 200, description = "Notification deleted", body = MessageDto),
        (status = 404, description = "No such notification for this user", body = ErrorDto)
    ),
)]
pub async fn delete_notification(
    State(state): State<AppState>,
    principal: Principal,
    Path(notification_id): Path<i32>,
) -> Result<impl IntoResponse, Error> {
    NotificationService::new(&state.db)
        .delete(principal.user_id, notification_id)
        .await?;

    Ok((StatusCode::OK, Json(MessageDto::new("Notification deleted"))))
}
