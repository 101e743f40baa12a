use sqlx::PgPool;
use uuid::Uuid;

use crate::models::{Subscription, UserProfile};
use crate::repository::constraint_conflict;
use crate::utils::error::AppResult;

/// Creates the follow edge and notifies the followee in one transaction.
/// Self-follows are rejected upstream; the table CHECK backs that up.
pub async fn follow(
    pool: &PgPool,
    follower_id: Uuid,
    followee_id: Uuid,
    follower_label: &str,
) -> AppResult<Subscription> {
    let mut tx = pool.begin().await?;

    let subscription = sqlx::query_as::<_, Subscription>(
        "INSERT INTO subscriptions (follower_id, followee_id)
         VALUES ($1, $2)
         RETURNING *",
    )
    .bind(follower_id)
    .bind(followee_id)
    .fetch_one(&mut *tx)
    .await
    .map_err(|e| constraint_conflict(e, "Already following this user"))?;

    sqlx::query(
        "INSERT INTO notifications (user_id, actor_id, kind, body)
         VALUES ($1, $2, 'new_follower', $3)",
    )
    .bind(followee_id)
    .bind(follower_id)
    .bind(format!("{} started following you", follower_label))
    .execute(&mut *tx)
    .await?;

    tx.commit().await?;
    Ok(subscription)
}

pub async fn unfollow(pool: &PgPool, follower_id: Uuid, followee_id: Uuid) -> AppResult<bool> {
    let result = sqlx::query(
        "DELETE FROM subscriptions WHERE follower_id = $1 AND followee_id = $2",
    )
    .bind(follower_id)
    .bind(followee_id)
    .execute(pool)
    .await?;
    Ok(result.rows_affected() > 0)
}

pub async fn followers(
    pool: &PgPool,
    user_id: Uuid,
    limit: i64,
    offset: i64,
) -> AppResult<Vec<UserProfile>> {
    let profiles = sqlx::query_as::<_, UserProfile>(
        "SELECT u.id, u.name, u.bio, u.role, u.created_at
         FROM subscriptions s
         JOIN users u ON u.id = s.follower_id
         WHERE s.followee_id = $1
         ORDER BY s.created_at DESC
         LIMIT $2 OFFSET $3",
    )
    .bind(user_id)
    .bind(limit)
    .bind(offset)
    .fetch_all(pool)
    .await?;
    Ok(profiles)
}

pub async fn following(
    pool: &PgPool,
    user_id: Uuid,
    limit: i64,
    offset: i64,
) -> AppResult<Vec<UserProfile>> {
    let profiles = sqlx::query_as::<_, UserProfile>(
        "SELECT u.id, u.name, u.bio, u.role, u.created_at
         FROM subscriptions s
         JOIN users u ON u.id = s.followee_id
         WHERE s.follower_id = $1
         ORDER BY s.created_at DESC
         LIMIT $2 OFFSET $3",
    )
    .bind(user_id)
    .bind(limit)
    .bind(offset)
    .fetch_all(pool)
    .await?;
    Ok(profiles)
}
