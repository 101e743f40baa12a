use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Event {
    pub id: Uuid,
    pub title: String,
    pub description: Option<String>,
    pub event_date: DateTime<Utc>,
    pub location: String,
    pub category_id: Uuid,
    pub organizer_id: Uuid,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Event {
    pub fn is_past(&self, now: DateTime<Utc>) -> bool {
        self.event_date <= now
    }
}

/// Aggregates for a single event, computed on demand for the organizer.
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct EventStats {
    pub going_count: i64,
    pub interested_count: i64,
    pub not_going_count: i64,
    pub tickets_sold: i64,
    pub revenue: Option<Decimal>,
    pub average_rating: Option<f64>,
    pub review_count: i64,
    pub comment_count: i64,
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    fn event_at(event_date: DateTime<Utc>) -> Event {
        Event {
            id: Uuid::new_v4(),
            title: "RustConf Meetup".into(),
            description: None,
            event_date,
            location: "Berlin".into(),
            category_id: Uuid::new_v4(),
            organizer_id: Uuid::new_v4(),
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn past_check_uses_event_date() {
        let now = Utc::now();
        assert!(event_at(now - Duration::hours(1)).is_past(now));
        assert!(!event_at(now + Duration::hours(1)).is_past(now));
    }
}
