use axum::extract::{Path, Query, State};
use axum::response::{IntoResponse, Response};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::auth::CurrentUser;
use crate::repository::notifications;
use crate::utils::error::{AppError, AppResult};
use crate::utils::pagination::PageParams;
use crate::utils::response::success;
use crate::AppState;

#[derive(Deserialize)]
pub struct NotificationParams {
    pub unread: Option<bool>,
}

#[derive(Serialize)]
struct ReadAllPayload {
    marked_read: u64,
}

pub async fn list_notifications(
    State(state): State<AppState>,
    user: CurrentUser,
    Query(params): Query<NotificationParams>,
    Query(page): Query<PageParams>,
) -> AppResult<Response> {
    let notifications = notifications::list_for_user(
        &state.pool,
        user.id(),
        params.unread.unwrap_or(false),
        page.limit(),
        page.offset(),
    )
    .await?;
    Ok(success(notifications, "Notifications retrieved").into_response())
}

pub async fn mark_notification_read(
    State(state): State<AppState>,
    user: CurrentUser,
    Path(notification_id): Path<Uuid>,
) -> AppResult<Response> {
    // scoped to the caller, so foreign ids read as missing
    let notification = notifications::mark_read(&state.pool, user.id(), notification_id)
        .await?
        .ok_or_else(|| {
            AppError::NotFound(format!(
                "Notification '{}' was not found",
                notification_id
            ))
        })?;
    Ok(success(notification, "Notification read").into_response())
}

pub async fn mark_all_notifications_read(
    State(state): State<AppState>,
    user: CurrentUser,
) -> AppResult<Response> {
    let marked_read = notifications::mark_all_read(&state.pool, user.id()).await?;
    Ok(success(ReadAllPayload { marked_read }, "Notifications read").into_response())
}
