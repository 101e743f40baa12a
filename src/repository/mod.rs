pub mod categories;
pub mod comments;
pub mod events;
pub mod notifications;
pub mod participations;
pub mod reviews;
pub mod subscriptions;
pub mod tickets;
pub mod users;

use crate::utils::error::AppError;

/// Unique and foreign-key violations become 409 Conflict with the given
/// message; every other failure stays a database error.
pub(crate) fn constraint_conflict(err: sqlx::Error, message: &str) -> AppError {
    match &err {
        sqlx::Error::Database(db) if db.is_unique_violation() || db.is_foreign_key_violation() => {
            AppError::Conflict(message.to_string())
        }
        _ => AppError::DatabaseError(err),
    }
}
