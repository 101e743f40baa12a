use sqlx::PgPool;
use uuid::Uuid;

use crate::models::{User, UserProfile, UserRole};
use crate::repository::constraint_conflict;
use crate::utils::error::AppResult;

pub async fn create(
    pool: &PgPool,
    email: &str,
    name: Option<&str>,
    hashed_password: &str,
) -> AppResult<User> {
    sqlx::query_as::<_, User>(
        "INSERT INTO users (email, name, hashed_password)
         VALUES ($1, $2, $3)
         RETURNING *",
    )
    .bind(email)
    .bind(name)
    .bind(hashed_password)
    .fetch_one(pool)
    .await
    .map_err(|e| constraint_conflict(e, "Email is already registered"))
}

pub async fn find_by_id(pool: &PgPool, id: Uuid) -> AppResult<Option<User>> {
    let user = sqlx::query_as::<_, User>("SELECT * FROM users WHERE id = $1")
        .bind(id)
        .fetch_optional(pool)
        .await?;
    Ok(user)
}

pub async fn find_by_email(pool: &PgPool, email: &str) -> AppResult<Option<User>> {
    let user = sqlx::query_as::<_, User>("SELECT * FROM users WHERE email = $1")
        .bind(email)
        .fetch_optional(pool)
        .await?;
    Ok(user)
}

pub async fn list_profiles(pool: &PgPool, limit: i64, offset: i64) -> AppResult<Vec<UserProfile>> {
    let profiles = sqlx::query_as::<_, UserProfile>(
        "SELECT id, name, bio, role, created_at
         FROM users
         ORDER BY created_at DESC
         LIMIT $1 OFFSET $2",
    )
    .bind(limit)
    .bind(offset)
    .fetch_all(pool)
    .await?;
    Ok(profiles)
}

/// Partial update; absent fields keep their current value.
pub async fn update_profile(
    pool: &PgPool,
    id: Uuid,
    name: Option<&str>,
    bio: Option<&str>,
) -> AppResult<Option<User>> {
    let user = sqlx::query_as::<_, User>(
        "UPDATE users
         SET name = COALESCE($2, name),
             bio = COALESCE($3, bio),
             updated_at = now()
         WHERE id = $1
         RETURNING *",
    )
    .bind(id)
    .bind(name)
    .bind(bio)
    .fetch_optional(pool)
    .await?;
    Ok(user)
}

pub async fn admin_update(
    pool: &PgPool,
    id: Uuid,
    name: Option<&str>,
    bio: Option<&str>,
    role: Option<UserRole>,
    is_active: Option<bool>,
) -> AppResult<Option<User>> {
    let user = sqlx::query_as::<_, User>(
        "UPDATE users
         SET name = COALESCE($2, name),
             bio = COALESCE($3, bio),
             role = COALESCE($4, role),
             is_active = COALESCE($5, is_active),
             updated_at = now()
         WHERE id = $1
         RETURNING *",
    )
    .bind(id)
    .bind(name)
    .bind(bio)
    .bind(role)
    .bind(is_active)
    .fetch_optional(pool)
    .await?;
    Ok(user)
}

pub async fn update_password(pool: &PgPool, id: Uuid, hashed_password: &str) -> AppResult<bool> {
    let result = sqlx::query(
        "UPDATE users SET hashed_password = $2, updated_at = now() WHERE id = $1",
    )
    .bind(id)
    .bind(hashed_password)
    .execute(pool)
    .await?;
    Ok(result.rows_affected() > 0)
}

pub async fn delete(pool: &PgPool, id: Uuid) -> AppResult<bool> {
    let result = sqlx::query("DELETE FROM users WHERE id = $1")
        .bind(id)
        .execute(pool)
        .await?;
    Ok(result.rows_affected() > 0)
}
