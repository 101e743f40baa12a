use axum::extract::State;
use axum::response::{IntoResponse, Response};
use serde::Serialize;

use crate::utils::error::AppResult;
use crate::utils::response::success;
use crate::AppState;

pub mod auth;
pub mod categories;
pub mod comments;
pub mod events;
pub mod notifications;
pub mod participations;
pub mod reviews;
pub mod subscriptions;
pub mod tickets;
pub mod users;

#[derive(Serialize)]
struct HealthPayload {
    status: &'static str,
    service: &'static str,
}

pub async fn health_check(State(state): State<AppState>) -> AppResult<Response> {
    // liveness includes a database round-trip
    sqlx::query("SELECT 1").execute(&state.pool).await?;

    let payload = HealthPayload {
        status: "ok",
        service: "event-sphere-api",
    };

    Ok(success(payload, "Health check successful").into_response())
}
