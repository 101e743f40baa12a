use sqlx::PgPool;
use uuid::Uuid;

use crate::models::Review;
use crate::repository::constraint_conflict;
use crate::utils::error::AppResult;

pub async fn create(
    pool: &PgPool,
    event_id: Uuid,
    author_id: Uuid,
    rating: i32,
    body: &str,
) -> AppResult<Review> {
    sqlx::query_as::<_, Review>(
        "INSERT INTO reviews (event_id, author_id, rating, body)
         VALUES ($1, $2, $3, $4)
         RETURNING *",
    )
    .bind(event_id)
    .bind(author_id)
    .bind(rating)
    .bind(body)
    .fetch_one(pool)
    .await
    .map_err(|e| constraint_conflict(e, "You have already reviewed this event"))
}

pub async fn find_by_id(pool: &PgPool, id: Uuid) -> AppResult<Option<Review>> {
    let review = sqlx::query_as::<_, Review>("SELECT * FROM reviews WHERE id = $1")
        .bind(id)
        .fetch_optional(pool)
        .await?;
    Ok(review)
}

pub async fn list_for_event(
    pool: &PgPool,
    event_id: Uuid,
    limit: i64,
    offset: i64,
) -> AppResult<Vec<Review>> {
    let reviews = sqlx::query_as::<_, Review>(
        "SELECT * FROM reviews
         WHERE event_id = $1
         ORDER BY created_at DESC
         LIMIT $2 OFFSET $3",
    )
    .bind(event_id)
    .bind(limit)
    .bind(offset)
    .fetch_all(pool)
    .await?;
    Ok(reviews)
}

pub async fn list_for_user(
    pool: &PgPool,
    author_id: Uuid,
    limit: i64,
    offset: i64,
) -> AppResult<Vec<Review>> {
    let reviews = sqlx::query_as::<_, Review>(
        "SELECT * FROM reviews
         WHERE author_id = $1
         ORDER BY created_at DESC
         LIMIT $2 OFFSET $3",
    )
    .bind(author_id)
    .bind(limit)
    .bind(offset)
    .fetch_all(pool)
    .await?;
    Ok(reviews)
}

pub async fn update(
    pool: &PgPool,
    id: Uuid,
    rating: i32,
    body: &str,
) -> AppResult<Option<Review>> {
    let review = sqlx::query_as::<_, Review>(
        "UPDATE reviews
         SET rating = $2, body = $3, updated_at = now()
         WHERE id = $1
         RETURNING *",
    )
    .bind(id)
    .bind(rating)
    .bind(body)
    .fetch_optional(pool)
    .await?;
    Ok(review)
}

pub async fn delete(pool: &PgPool, id: Uuid) -> AppResult<bool> {
    let result = sqlx::query("DELETE FROM reviews WHERE id = $1")
        .bind(id)
        .execute(pool)
        .await?;
    Ok(result.rows_affected() > 0)
}
