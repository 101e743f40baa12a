use sqlx::PgPool;
use uuid::Uuid;

use crate::models::{Comment, Event};
use crate::utils::error::AppResult;

/// Inserts the comment and, unless the author is the organizer, notifies
/// the organizer in the same transaction.
pub async fn create(
    pool: &PgPool,
    event: &Event,
    author_id: Uuid,
    body: &str,
) -> AppResult<Comment> {
    let mut tx = pool.begin().await?;

    let comment = sqlx::query_as::<_, Comment>(
        "INSERT INTO comments (event_id, author_id, body)
         VALUES ($1, $2, $3)
         RETURNING *",
    )
    .bind(event.id)
    .bind(author_id)
    .bind(body)
    .fetch_one(&mut *tx)
    .await?;

    if author_id != event.organizer_id {
        sqlx::query(
            "INSERT INTO notifications (user_id, actor_id, event_id, kind, body)
             VALUES ($1, $2, $3, 'event_commented', $4)",
        )
        .bind(event.organizer_id)
        .bind(author_id)
        .bind(event.id)
        .bind(format!("New comment on your event: {}", event.title))
        .execute(&mut *tx)
        .await?;
    }

    tx.commit().await?;
    Ok(comment)
}

pub async fn find_by_id(pool: &PgPool, id: Uuid) -> AppResult<Option<Comment>> {
    let comment = sqlx::query_as::<_, Comment>("SELECT * FROM comments WHERE id = $1")
        .bind(id)
        .fetch_optional(pool)
        .await?;
    Ok(comment)
}

pub async fn list_for_event(
    pool: &PgPool,
    event_id: Uuid,
    limit: i64,
    offset: i64,
) -> AppResult<Vec<Comment>> {
    let comments = sqlx::query_as::<_, Comment>(
        "SELECT * FROM comments
         WHERE event_id = $1
         ORDER BY created_at DESC
         LIMIT $2 OFFSET $3",
    )
    .bind(event_id)
    .bind(limit)
    .bind(offset)
    .fetch_all(pool)
    .await?;
    Ok(comments)
}

pub async fn list_for_user(
    pool: &PgPool,
    author_id: Uuid,
    limit: i64,
    offset: i64,
) -> AppResult<Vec<Comment>> {
    let comments = sqlx::query_as::<_, Comment>(
        "SELECT * FROM comments
         WHERE author_id = $1
         ORDER BY created_at DESC
         LIMIT $2 OFFSET $3",
    )
    .bind(author_id)
    .bind(limit)
    .bind(offset)
    .fetch_all(pool)
    .await?;
    Ok(comments)
}

pub async fn update_body(pool: &PgPool, id: Uuid, body: &str) -> AppResult<Option<Comment>> {
    let comment = sqlx::query_as::<_, Comment>(
        "UPDATE comments SET body = $2, updated_at = now() WHERE id = $1 RETURNING *",
    )
    .bind(id)
    .bind(body)
    .fetch_optional(pool)
    .await?;
    Ok(comment)
}

pub async fn delete(pool: &PgPool, id: Uuid) -> AppResult<bool> {
    let result = sqlx::query("DELETE FROM comments WHERE id = $1")
        .bind(id)
        .execute(pool)
        .await?;
    Ok(result.rows_affected() > 0)
}
