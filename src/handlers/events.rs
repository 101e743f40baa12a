use axum::extract::{Path, Query, State};
use axum::response::{IntoResponse, Response};
use axum::Json;
use chrono::{DateTime, Utc};
use serde::Deserialize;
use tracing::info;
use uuid::Uuid;

use crate::auth::CurrentUser;
use crate::models::Event;
use crate::repository::categories;
use crate::repository::events::{self, EventFilter, EventPatch, NewEvent};
use crate::utils::error::{AppError, AppResult};
use crate::utils::pagination::PageParams;
use crate::utils::response::{created, empty_success, success};
use crate::AppState;

const MAX_TITLE_CHARS: usize = 200;
const MAX_LOCATION_CHARS: usize = 200;
const MAX_DESCRIPTION_CHARS: usize = 2000;

#[derive(Deserialize)]
pub struct CreateEventRequest {
    pub title: String,
    pub description: Option<String>,
    pub event_date: DateTime<Utc>,
    pub location: String,
    pub category_id: Uuid,
}

#[derive(Deserialize)]
pub struct UpdateEventRequest {
    pub title: Option<String>,
    pub description: Option<String>,
    pub event_date: Option<DateTime<Utc>>,
    pub location: Option<String>,
    pub category_id: Option<Uuid>,
}

#[derive(Debug, Default, Deserialize)]
pub struct EventSearchParams {
    pub q: Option<String>,
    pub category_id: Option<Uuid>,
    pub location: Option<String>,
    pub organizer_id: Option<Uuid>,
    pub from: Option<DateTime<Utc>>,
    pub to: Option<DateTime<Utc>>,
    pub upcoming: Option<bool>,
}

impl From<EventSearchParams> for EventFilter {
    fn from(params: EventSearchParams) -> Self {
        EventFilter {
            q: params.q.filter(|q| !q.trim().is_empty()),
            category_id: params.category_id,
            location: params.location.filter(|l| !l.trim().is_empty()),
            organizer_id: params.organizer_id,
            from: params.from,
            to: params.to,
            upcoming: params.upcoming.unwrap_or(false),
        }
    }
}

pub async fn create_event(
    State(state): State<AppState>,
    user: CurrentUser,
    Json(req): Json<CreateEventRequest>,
) -> AppResult<Response> {
    user.require_organizer()?;

    let title = require_bounded(&req.title, "Title", MAX_TITLE_CHARS)?;
    let location = require_bounded(&req.location, "Location", MAX_LOCATION_CHARS)?;
    let description = optional_bounded(req.description, "Description", MAX_DESCRIPTION_CHARS)?;

    if req.event_date <= Utc::now() {
        return Err(AppError::ValidationError(
            "Event date must be in the future".to_string(),
        ));
    }

    if categories::find_by_id(&state.pool, req.category_id)
        .await?
        .is_none()
    {
        return Err(AppError::ValidationError(format!(
            "Unknown category '{}'",
            req.category_id
        )));
    }

    let event = events::create(
        &state.pool,
        NewEvent {
            title,
            description,
            event_date: req.event_date,
            location,
            category_id: req.category_id,
            organizer_id: user.id(),
        },
        organizer_label(&user),
    )
    .await?;

    info!(event_id = %event.id, organizer_id = %user.id(), "Event created");
    Ok(created(event, "Event created").into_response())
}

pub async fn list_events(
    State(state): State<AppState>,
    Query(params): Query<EventSearchParams>,
    Query(page): Query<PageParams>,
) -> AppResult<Response> {
    let filter: EventFilter = params.into();
    let events = events::search(&state.pool, &filter, page.limit(), page.offset()).await?;
    Ok(success(events, "Events retrieved").into_response())
}

pub async fn get_event(
    State(state): State<AppState>,
    Path(event_id): Path<Uuid>,
) -> AppResult<Response> {
    let event = find_event(&state, event_id).await?;
    Ok(success(event, "Event retrieved").into_response())
}

pub async fn update_event(
    State(state): State<AppState>,
    user: CurrentUser,
    Path(event_id): Path<Uuid>,
    Json(req): Json<UpdateEventRequest>,
) -> AppResult<Response> {
    let event = find_event(&state, event_id).await?;
    user.require_owner(event.organizer_id)?;

    let title = match req.title {
        Some(title) => Some(require_bounded(&title, "Title", MAX_TITLE_CHARS)?),
        None => None,
    };
    let location = match req.location {
        Some(location) => Some(require_bounded(&location, "Location", MAX_LOCATION_CHARS)?),
        None => None,
    };
    let description = optional_bounded(req.description, "Description", MAX_DESCRIPTION_CHARS)?;

    if let Some(category_id) = req.category_id {
        if categories::find_by_id(&state.pool, category_id)
            .await?
            .is_none()
        {
            return Err(AppError::ValidationError(format!(
                "Unknown category '{}'",
                category_id
            )));
        }
    }

    let updated = events::update(
        &state.pool,
        event_id,
        EventPatch {
            title,
            description,
            event_date: req.event_date,
            location,
            category_id: req.category_id,
        },
    )
    .await?
    .ok_or_else(|| AppError::NotFound(format!("Event '{}' was not found", event_id)))?;

    Ok(success(updated, "Event updated").into_response())
}

pub async fn delete_event(
    State(state): State<AppState>,
    user: CurrentUser,
    Path(event_id): Path<Uuid>,
) -> AppResult<Response> {
    let event = find_event(&state, event_id).await?;
    user.require_owner(event.organizer_id)?;

    events::delete(&state.pool, event_id).await?;
    info!(event_id = %event_id, "Event deleted");
    Ok(empty_success("Event deleted").into_response())
}

pub async fn recommended_events(
    State(state): State<AppState>,
    user: CurrentUser,
    Query(page): Query<PageParams>,
) -> AppResult<Response> {
    let events =
        events::recommended_for(&state.pool, user.id(), page.limit(), page.offset()).await?;
    Ok(success(events, "Recommended events").into_response())
}

pub async fn event_stats(
    State(state): State<AppState>,
    user: CurrentUser,
    Path(event_id): Path<Uuid>,
) -> AppResult<Response> {
    let event = find_event(&state, event_id).await?;
    user.require_owner(event.organizer_id)?;

    let stats = events::stats(&state.pool, event_id).await?;
    Ok(success(stats, "Event statistics").into_response())
}

pub(super) async fn find_event(state: &AppState, event_id: Uuid) -> AppResult<Event> {
    events::find_by_id(&state.pool, event_id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Event '{}' was not found", event_id)))
}

fn organizer_label(user: &CurrentUser) -> &str {
    user.0.name.as_deref().unwrap_or("An organizer you follow")
}

fn require_bounded(raw: &str, field: &str, max_chars: usize) -> AppResult<String> {
    let value = raw.trim();
    if value.is_empty() {
        return Err(AppError::ValidationError(format!(
            "{} must not be empty",
            field
        )));
    }
    if value.chars().count() > max_chars {
        return Err(AppError::ValidationError(format!(
            "{} must be at most {} characters",
            field, max_chars
        )));
    }
    Ok(value.to_string())
}

fn optional_bounded(
    raw: Option<String>,
    field: &str,
    max_chars: usize,
) -> AppResult<Option<String>> {
    match raw {
        None => Ok(None),
        Some(value) => {
            if value.chars().count() > max_chars {
                return Err(AppError::ValidationError(format!(
                    "{} must be at most {} characters",
                    field, max_chars
                )));
            }
            Ok(Some(value))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bounded_fields_reject_blank_and_oversized() {
        assert_eq!(require_bounded(" Rust Meetup ", "Title", 200).unwrap(), "Rust Meetup");
        assert!(require_bounded("   ", "Title", 200).is_err());
        assert!(require_bounded(&"t".repeat(201), "Title", 200).is_err());
    }

    #[test]
    fn search_params_blank_strings_are_dropped() {
        let filter: EventFilter = EventSearchParams {
            q: Some("  ".into()),
            location: Some("".into()),
            upcoming: Some(true),
            ..Default::default()
        }
        .into();
        assert!(filter.q.is_none());
        assert!(filter.location.is_none());
        assert!(filter.upcoming);
    }
}
