use sqlx::PgPool;
use uuid::Uuid;

use crate::models::Notification;
use crate::utils::error::AppResult;

pub async fn list_for_user(
    pool: &PgPool,
    user_id: Uuid,
    unread_only: bool,
    limit: i64,
    offset: i64,
) -> AppResult<Vec<Notification>> {
    let notifications = sqlx::query_as::<_, Notification>(
        "SELECT * FROM notifications
         WHERE user_id = $1
           AND ($2 = FALSE OR read_at IS NULL)
         ORDER BY created_at DESC
         LIMIT $3 OFFSET $4",
    )
    .bind(user_id)
    .bind(unread_only)
    .bind(limit)
    .bind(offset)
    .fetch_all(pool)
    .await?;
    Ok(notifications)
}

/// Idempotent: a second read keeps the original `read_at`.
pub async fn mark_read(
    pool: &PgPool,
    user_id: Uuid,
    id: Uuid,
) -> AppResult<Option<Notification>> {
    let notification = sqlx::query_as::<_, Notification>(
        "UPDATE notifications
         SET read_at = COALESCE(read_at, now())
         WHERE id = $1 AND user_id = $2
         RETURNING *",
    )
    .bind(id)
    .bind(user_id)
    .fetch_optional(pool)
    .await?;
    Ok(notification)
}

pub async fn mark_all_read(pool: &PgPool, user_id: Uuid) -> AppResult<u64> {
    let result = sqlx::query(
        "UPDATE notifications SET read_at = now()
         WHERE user_id = $1 AND read_at IS NULL",
    )
    .bind(user_id)
    .execute(pool)
    .await?;
    Ok(result.rows_affected())
}
