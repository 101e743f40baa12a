use sqlx::PgPool;
use uuid::Uuid;

use crate::models::{Participation, ParticipationStatus};
use crate::utils::error::AppResult;

/// RSVP is an upsert keyed on (user, event): the first call inserts,
/// later calls only move the status. `joined_at` is set once.
pub async fn upsert(
    pool: &PgPool,
    user_id: Uuid,
    event_id: Uuid,
    status: ParticipationStatus,
) -> AppResult<Participation> {
    let participation = sqlx::query_as::<_, Participation>(
        "INSERT INTO participations (user_id, event_id, status)
         VALUES ($1, $2, $3)
         ON CONFLICT (user_id, event_id)
         DO UPDATE SET status = EXCLUDED.status, updated_at = now()
         RETURNING *",
    )
    .bind(user_id)
    .bind(event_id)
    .bind(status)
    .fetch_one(pool)
    .await?;
    Ok(participation)
}

pub async fn remove(pool: &PgPool, user_id: Uuid, event_id: Uuid) -> AppResult<bool> {
    let result = sqlx::query(
        "DELETE FROM participations WHERE user_id = $1 AND event_id = $2",
    )
    .bind(user_id)
    .bind(event_id)
    .execute(pool)
    .await?;
    Ok(result.rows_affected() > 0)
}

pub async fn list_for_event(
    pool: &PgPool,
    event_id: Uuid,
    limit: i64,
    offset: i64,
) -> AppResult<Vec<Participation>> {
    let participations = sqlx::query_as::<_, Participation>(
        "SELECT * FROM participations
         WHERE event_id = $1
         ORDER BY joined_at DESC
         LIMIT $2 OFFSET $3",
    )
    .bind(event_id)
    .bind(limit)
    .bind(offset)
    .fetch_all(pool)
    .await?;
    Ok(participations)
}

pub async fn list_for_user(
    pool: &PgPool,
    user_id: Uuid,
    limit: i64,
    offset: i64,
) -> AppResult<Vec<Participation>> {
    let participations = sqlx::query_as::<_, Participation>(
        "SELECT * FROM participations
         WHERE user_id = $1
         ORDER BY joined_at DESC
         LIMIT $2 OFFSET $3",
    )
    .bind(user_id)
    .bind(limit)
    .bind(offset)
    .fetch_all(pool)
    .await?;
    Ok(participations)
}
