use sqlx::PgPool;
use uuid::Uuid;

use crate::models::Category;
use crate::repository::constraint_conflict;
use crate::utils::error::AppResult;

pub async fn list(pool: &PgPool) -> AppResult<Vec<Category>> {
    let categories =
        sqlx::query_as::<_, Category>("SELECT * FROM categories ORDER BY name ASC")
            .fetch_all(pool)
            .await?;
    Ok(categories)
}

pub async fn find_by_id(pool: &PgPool, id: Uuid) -> AppResult<Option<Category>> {
    let category = sqlx::query_as::<_, Category>("SELECT * FROM categories WHERE id = $1")
        .bind(id)
        .fetch_optional(pool)
        .await?;
    Ok(category)
}

pub async fn create(pool: &PgPool, name: &str) -> AppResult<Category> {
    sqlx::query_as::<_, Category>(
        "INSERT INTO categories (name) VALUES ($1) RETURNING *",
    )
    .bind(name)
    .fetch_one(pool)
    .await
    .map_err(|e| constraint_conflict(e, "A category with this name already exists"))
}

pub async fn rename(pool: &PgPool, id: Uuid, name: &str) -> AppResult<Option<Category>> {
    sqlx::query_as::<_, Category>(
        "UPDATE categories SET name = $2 WHERE id = $1 RETURNING *",
    )
    .bind(id)
    .bind(name)
    .fetch_optional(pool)
    .await
    .map_err(|e| constraint_conflict(e, "A category with this name already exists"))
}

pub async fn delete(pool: &PgPool, id: Uuid) -> AppResult<bool> {
    let result = sqlx::query("DELETE FROM categories WHERE id = $1")
        .bind(id)
        .execute(pool)
        .await
        .map_err(|e| constraint_conflict(e, "Category is still referenced by events"))?;
    Ok(result.rows_affected() > 0)
}
