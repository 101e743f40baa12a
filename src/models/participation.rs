use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// RSVP state of a user toward an event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "participation_status", rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum ParticipationStatus {
    Going,
    Interested,
    NotGoing,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Participation {
    pub id: Uuid,
    pub user_id: Uuid,
    pub event_id: Uuid,
    pub status: ParticipationStatus,
    pub joined_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_wire_format_is_snake_case() {
        assert_eq!(
            serde_json::to_string(&ParticipationStatus::NotGoing).unwrap(),
            "\"not_going\""
        );
        let parsed: ParticipationStatus = serde_json::from_str("\"interested\"").unwrap();
        assert_eq!(parsed, ParticipationStatus::Interested);
    }
}
