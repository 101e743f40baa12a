use axum::extract::{Path, Query, State};
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Deserialize;
use uuid::Uuid;

use crate::auth::CurrentUser;
use crate::handlers::events::find_event;
use crate::models::ParticipationStatus;
use crate::repository::participations;
use crate::utils::error::{AppError, AppResult};
use crate::utils::pagination::PageParams;
use crate::utils::response::{empty_success, success};
use crate::AppState;

#[derive(Deserialize)]
pub struct RsvpRequest {
    pub status: ParticipationStatus,
}

/// PUT semantics: the first call creates the RSVP, later calls move its status.
pub async fn rsvp(
    State(state): State<AppState>,
    user: CurrentUser,
    Path(event_id): Path<Uuid>,
    Json(req): Json<RsvpRequest>,
) -> AppResult<Response> {
    let event = find_event(&state, event_id).await?;
    if event.is_past(chrono::Utc::now()) {
        return Err(AppError::ValidationError(
            "Cannot RSVP to a past event".to_string(),
        ));
    }

    let participation =
        participations::upsert(&state.pool, user.id(), event_id, req.status).await?;
    Ok(success(participation, "RSVP recorded").into_response())
}

pub async fn cancel_rsvp(
    State(state): State<AppState>,
    user: CurrentUser,
    Path(event_id): Path<Uuid>,
) -> AppResult<Response> {
    if !participations::remove(&state.pool, user.id(), event_id).await? {
        return Err(AppError::NotFound(
            "You have no RSVP for this event".to_string(),
        ));
    }
    Ok(empty_success("RSVP removed").into_response())
}

pub async fn event_participations(
    State(state): State<AppState>,
    Path(event_id): Path<Uuid>,
    Query(page): Query<PageParams>,
) -> AppResult<Response> {
    find_event(&state, event_id).await?;
    let participations =
        participations::list_for_event(&state.pool, event_id, page.limit(), page.offset())
            .await?;
    Ok(success(participations, "Participations retrieved").into_response())
}

pub async fn user_participations(
    State(state): State<AppState>,
    Path(user_id): Path<Uuid>,
    Query(page): Query<PageParams>,
) -> AppResult<Response> {
    let participations =
        participations::list_for_user(&state.pool, user_id, page.limit(), page.offset()).await?;
    Ok(success(participations, "Participations retrieved").into_response())
}
