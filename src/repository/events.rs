use chrono::{DateTime, Utc};
use sqlx::{PgPool, Postgres, QueryBuilder};
use uuid::Uuid;

use crate::models::{Event, EventStats};
use crate::utils::error::AppResult;

pub struct NewEvent {
    pub title: String,
    pub description: Option<String>,
    pub event_date: DateTime<Utc>,
    pub location: String,
    pub category_id: Uuid,
    pub organizer_id: Uuid,
}

pub struct EventPatch {
    pub title: Option<String>,
    pub description: Option<String>,
    pub event_date: Option<DateTime<Utc>>,
    pub location: Option<String>,
    pub category_id: Option<Uuid>,
}

#[derive(Debug, Default)]
pub struct EventFilter {
    pub q: Option<String>,
    pub category_id: Option<Uuid>,
    pub location: Option<String>,
    pub organizer_id: Option<Uuid>,
    pub from: Option<DateTime<Utc>>,
    pub to: Option<DateTime<Utc>>,
    pub upcoming: bool,
}

/// Inserts the event and fans a notification out to the organizer's
/// followers in the same transaction.
pub async fn create(pool: &PgPool, new_event: NewEvent, organizer_label: &str) -> AppResult<Event> {
    let mut tx = pool.begin().await?;

    let event = sqlx::query_as::<_, Event>(
        "INSERT INTO events (title, description, event_date, location, category_id, organizer_id)
         VALUES ($1, $2, $3, $4, $5, $6)
         RETURNING *",
    )
    .bind(&new_event.title)
    .bind(&new_event.description)
    .bind(new_event.event_date)
    .bind(&new_event.location)
    .bind(new_event.category_id)
    .bind(new_event.organizer_id)
    .fetch_one(&mut *tx)
    .await?;

    sqlx::query(
        "INSERT INTO notifications (user_id, actor_id, event_id, kind, body)
         SELECT follower_id, $1, $2, 'event_published', $3
         FROM subscriptions
         WHERE followee_id = $1",
    )
    .bind(new_event.organizer_id)
    .bind(event.id)
    .bind(format!(
        "{} published a new event: {}",
        organizer_label, event.title
    ))
    .execute(&mut *tx)
    .await?;

    tx.commit().await?;
    Ok(event)
}

pub async fn find_by_id(pool: &PgPool, id: Uuid) -> AppResult<Option<Event>> {
    let event = sqlx::query_as::<_, Event>("SELECT * FROM events WHERE id = $1")
        .bind(id)
        .fetch_optional(pool)
        .await?;
    Ok(event)
}

pub async fn search(
    pool: &PgPool,
    filter: &EventFilter,
    limit: i64,
    offset: i64,
) -> AppResult<Vec<Event>> {
    let mut qb: QueryBuilder<Postgres> = QueryBuilder::new("SELECT * FROM events WHERE TRUE");

    if let Some(q) = &filter.q {
        let pattern = format!("%{}%", q);
        qb.push(" AND (title ILIKE ")
            .push_bind(pattern.clone())
            .push(" OR description ILIKE ")
            .push_bind(pattern)
            .push(")");
    }
    if let Some(category_id) = filter.category_id {
        qb.push(" AND category_id = ").push_bind(category_id);
    }
    if let Some(location) = &filter.location {
        qb.push(" AND location ILIKE ")
            .push_bind(format!("%{}%", location));
    }
    if let Some(organizer_id) = filter.organizer_id {
        qb.push(" AND organizer_id = ").push_bind(organizer_id);
    }
    if let Some(from) = filter.from {
        qb.push(" AND event_date >= ").push_bind(from);
    }
    if let Some(to) = filter.to {
        qb.push(" AND event_date <= ").push_bind(to);
    }
    if filter.upcoming {
        qb.push(" AND event_date > now()");
    }

    qb.push(" ORDER BY event_date ASC LIMIT ")
        .push_bind(limit)
        .push(" OFFSET ")
        .push_bind(offset);

    let events = qb.build_query_as::<Event>().fetch_all(pool).await?;
    Ok(events)
}

pub async fn update(pool: &PgPool, id: Uuid, patch: EventPatch) -> AppResult<Option<Event>> {
    let event = sqlx::query_as::<_, Event>(
        "UPDATE events
         SET title = COALESCE($2, title),
             description = COALESCE($3, description),
             event_date = COALESCE($4, event_date),
             location = COALESCE($5, location),
             category_id = COALESCE($6, category_id),
             updated_at = now()
         WHERE id = $1
         RETURNING *",
    )
    .bind(id)
    .bind(patch.title)
    .bind(patch.description)
    .bind(patch.event_date)
    .bind(patch.location)
    .bind(patch.category_id)
    .fetch_optional(pool)
    .await?;
    Ok(event)
}

pub async fn delete(pool: &PgPool, id: Uuid) -> AppResult<bool> {
    let result = sqlx::query("DELETE FROM events WHERE id = $1")
        .bind(id)
        .execute(pool)
        .await?;
    Ok(result.rows_affected() > 0)
}

/// Upcoming events ranked for one user: followed organizers weigh most,
/// then categories the user has RSVP'd into, then raw attendance. Events
/// the user already responded to, and their own, are excluded.
pub async fn recommended_for(
    pool: &PgPool,
    user_id: Uuid,
    limit: i64,
    offset: i64,
) -> AppResult<Vec<Event>> {
    let events = sqlx::query_as::<_, Event>(
        "SELECT e.*,
                (CASE WHEN e.organizer_id IN (
                        SELECT followee_id FROM subscriptions WHERE follower_id = $1
                     ) THEN 3 ELSE 0 END)
              + (CASE WHEN e.category_id IN (
                        SELECT DISTINCT ev.category_id
                        FROM participations p
                        JOIN events ev ON ev.id = p.event_id
                        WHERE p.user_id = $1 AND p.status IN ('going', 'interested')
                     ) THEN 2 ELSE 0 END)
              + LEAST((SELECT COUNT(*) FROM participations a
                       WHERE a.event_id = e.id AND a.status = 'going'), 5)::int AS score
         FROM events e
         WHERE e.event_date > now()
           AND e.organizer_id <> $1
           AND NOT EXISTS (
               SELECT 1 FROM participations mine
               WHERE mine.event_id = e.id AND mine.user_id = $1
           )
         ORDER BY score DESC, e.event_date ASC
         LIMIT $2 OFFSET $3",
    )
    .bind(user_id)
    .bind(limit)
    .bind(offset)
    .fetch_all(pool)
    .await?;
    Ok(events)
}

pub async fn stats(pool: &PgPool, event_id: Uuid) -> AppResult<EventStats> {
    let stats = sqlx::query_as::<_, EventStats>(
        "SELECT
            (SELECT COUNT(*) FROM participations
             WHERE event_id = $1 AND status = 'going') AS going_count,
            (SELECT COUNT(*) FROM participations
             WHERE event_id = $1 AND status = 'interested') AS interested_count,
            (SELECT COUNT(*) FROM participations
             WHERE event_id = $1 AND status = 'not_going') AS not_going_count,
            (SELECT COUNT(*) FROM tickets WHERE event_id = $1) AS tickets_sold,
            (SELECT SUM(price) FROM tickets WHERE event_id = $1) AS revenue,
            (SELECT AVG(rating)::float8 FROM reviews WHERE event_id = $1) AS average_rating,
            (SELECT COUNT(*) FROM reviews WHERE event_id = $1) AS review_count,
            (SELECT COUNT(*) FROM comments WHERE event_id = $1) AS comment_count",
    )
    .bind(event_id)
    .fetch_one(pool)
    .await?;
    Ok(stats)
}
