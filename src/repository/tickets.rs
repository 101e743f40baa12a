use rust_decimal::Decimal;
use sqlx::PgPool;
use uuid::Uuid;

use crate::models::Ticket;
use crate::repository::constraint_conflict;
use crate::utils::error::AppResult;

pub async fn purchase(
    pool: &PgPool,
    event_id: Uuid,
    user_id: Uuid,
    price: Option<Decimal>,
) -> AppResult<Ticket> {
    sqlx::query_as::<_, Ticket>(
        "INSERT INTO tickets (event_id, user_id, price)
         VALUES ($1, $2, $3)
         RETURNING *",
    )
    .bind(event_id)
    .bind(user_id)
    .bind(price)
    .fetch_one(pool)
    .await
    .map_err(|e| constraint_conflict(e, "You already hold a ticket for this event"))
}

pub async fn find_by_id(pool: &PgPool, id: Uuid) -> AppResult<Option<Ticket>> {
    let ticket = sqlx::query_as::<_, Ticket>("SELECT * FROM tickets WHERE id = $1")
        .bind(id)
        .fetch_optional(pool)
        .await?;
    Ok(ticket)
}

pub async fn list_for_user(
    pool: &PgPool,
    user_id: Uuid,
    limit: i64,
    offset: i64,
) -> AppResult<Vec<Ticket>> {
    let tickets = sqlx::query_as::<_, Ticket>(
        "SELECT * FROM tickets
         WHERE user_id = $1
         ORDER BY purchased_at DESC
         LIMIT $2 OFFSET $3",
    )
    .bind(user_id)
    .bind(limit)
    .bind(offset)
    .fetch_all(pool)
    .await?;
    Ok(tickets)
}

pub async fn list_for_event(
    pool: &PgPool,
    event_id: Uuid,
    limit: i64,
    offset: i64,
) -> AppResult<Vec<Ticket>> {
    let tickets = sqlx::query_as::<_, Ticket>(
        "SELECT * FROM tickets
         WHERE event_id = $1
         ORDER BY purchased_at DESC
         LIMIT $2 OFFSET $3",
    )
    .bind(event_id)
    .bind(limit)
    .bind(offset)
    .fetch_all(pool)
    .await?;
    Ok(tickets)
}

pub async fn delete(pool: &PgPool, id: Uuid) -> AppResult<bool> {
    let result = sqlx::query("DELETE FROM tickets WHERE id = $1")
        .bind(id)
        .execute(pool)
        .await?;
    Ok(result.rows_affected() > 0)
}
