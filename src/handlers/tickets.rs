use axum::extract::{Path, Query, State};
use axum::response::{IntoResponse, Response};
use axum::Json;
use chrono::Utc;
use rust_decimal::Decimal;
use serde::Deserialize;
use tracing::info;
use uuid::Uuid;

use crate::auth::CurrentUser;
use crate::handlers::events::find_event;
use crate::repository::tickets;
use crate::utils::error::{AppError, AppResult};
use crate::utils::pagination::PageParams;
use crate::utils::response::{created, empty_success, success};
use crate::AppState;

#[derive(Deserialize)]
pub struct PurchaseRequest {
    /// NULL for free events.
    pub price: Option<Decimal>,
}

pub async fn purchase_ticket(
    State(state): State<AppState>,
    user: CurrentUser,
    Path(event_id): Path<Uuid>,
    Json(req): Json<PurchaseRequest>,
) -> AppResult<Response> {
    if let Some(price) = req.price {
        if price.is_sign_negative() {
            return Err(AppError::ValidationError(
                "Ticket price must not be negative".to_string(),
            ));
        }
    }

    let event = find_event(&state, event_id).await?;
    if event.is_past(Utc::now()) {
        return Err(AppError::ValidationError(
            "Tickets are no longer sold for past events".to_string(),
        ));
    }

    let ticket = tickets::purchase(&state.pool, event_id, user.id(), req.price).await?;
    info!(ticket_id = %ticket.id, event_id = %event_id, user_id = %user.id(), "Ticket purchased");
    Ok(created(ticket, "Ticket purchased").into_response())
}

pub async fn my_tickets(
    State(state): State<AppState>,
    user: CurrentUser,
    Query(page): Query<PageParams>,
) -> AppResult<Response> {
    let tickets =
        tickets::list_for_user(&state.pool, user.id(), page.limit(), page.offset()).await?;
    Ok(success(tickets, "Tickets retrieved").into_response())
}

/// Sales listing, restricted to the event organizer (or an admin).
pub async fn event_tickets(
    State(state): State<AppState>,
    user: CurrentUser,
    Path(event_id): Path<Uuid>,
    Query(page): Query<PageParams>,
) -> AppResult<Response> {
    let event = find_event(&state, event_id).await?;
    user.require_owner(event.organizer_id)?;

    let tickets =
        tickets::list_for_event(&state.pool, event_id, page.limit(), page.offset()).await?;
    Ok(success(tickets, "Tickets retrieved").into_response())
}

pub async fn cancel_ticket(
    State(state): State<AppState>,
    user: CurrentUser,
    Path(ticket_id): Path<Uuid>,
) -> AppResult<Response> {
    let ticket = tickets::find_by_id(&state.pool, ticket_id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Ticket '{}' was not found", ticket_id)))?;

    user.require_owner(ticket.user_id)?;

    tickets::delete(&state.pool, ticket_id).await?;
    info!(ticket_id = %ticket_id, "Ticket cancelled");
    Ok(empty_success("Ticket cancelled").into_response())
}
