use axum::extract::{Path, Query, State};
use axum::response::{IntoResponse, Response};
use axum::Json;
use chrono::Utc;
use serde::Deserialize;
use uuid::Uuid;

use crate::auth::CurrentUser;
use crate::handlers::events::find_event;
use crate::models::review::{MAX_RATING, MIN_RATING};
use crate::repository::reviews;
use crate::utils::error::{AppError, AppResult};
use crate::utils::pagination::PageParams;
use crate::utils::response::{created, empty_success, success};
use crate::AppState;

const MAX_REVIEW_CHARS: usize = 1000;

#[derive(Deserialize)]
pub struct ReviewRequest {
    pub rating: i32,
    pub body: String,
}

pub async fn create_review(
    State(state): State<AppState>,
    user: CurrentUser,
    Path(event_id): Path<Uuid>,
    Json(req): Json<ReviewRequest>,
) -> AppResult<Response> {
    let (rating, body) = validate_review(req.rating, &req.body)?;

    let event = find_event(&state, event_id).await?;
    if !event.is_past(Utc::now()) {
        return Err(AppError::ValidationError(
            "An event can only be reviewed after it has taken place".to_string(),
        ));
    }

    let review = reviews::create(&state.pool, event_id, user.id(), rating, &body).await?;
    Ok(created(review, "Review added").into_response())
}

pub async fn event_reviews(
    State(state): State<AppState>,
    Path(event_id): Path<Uuid>,
    Query(page): Query<PageParams>,
) -> AppResult<Response> {
    find_event(&state, event_id).await?;
    let reviews =
        reviews::list_for_event(&state.pool, event_id, page.limit(), page.offset()).await?;
    Ok(success(reviews, "Reviews retrieved").into_response())
}

pub async fn user_reviews(
    State(state): State<AppState>,
    Path(user_id): Path<Uuid>,
    Query(page): Query<PageParams>,
) -> AppResult<Response> {
    let reviews =
        reviews::list_for_user(&state.pool, user_id, page.limit(), page.offset()).await?;
    Ok(success(reviews, "Reviews retrieved").into_response())
}

pub async fn update_review(
    State(state): State<AppState>,
    user: CurrentUser,
    Path(review_id): Path<Uuid>,
    Json(req): Json<ReviewRequest>,
) -> AppResult<Response> {
    let (rating, body) = validate_review(req.rating, &req.body)?;

    let review = reviews::find_by_id(&state.pool, review_id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Review '{}' was not found", review_id)))?;

    if review.author_id != user.id() {
        return Err(AppError::Forbidden(
            "Only the author can edit a review".to_string(),
        ));
    }

    let updated = reviews::update(&state.pool, review_id, rating, &body)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Review '{}' was not found", review_id)))?;

    Ok(success(updated, "Review updated").into_response())
}

pub async fn delete_review(
    State(state): State<AppState>,
    user: CurrentUser,
    Path(review_id): Path<Uuid>,
) -> AppResult<Response> {
    let review = reviews::find_by_id(&state.pool, review_id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Review '{}' was not found", review_id)))?;

    user.require_owner(review.author_id)?;

    reviews::delete(&state.pool, review_id).await?;
    Ok(empty_success("Review deleted").into_response())
}

fn validate_review(rating: i32, raw_body: &str) -> AppResult<(i32, String)> {
    if !(MIN_RATING..=MAX_RATING).contains(&rating) {
        return Err(AppError::ValidationError(format!(
            "Rating must be between {} and {}",
            MIN_RATING, MAX_RATING
        )));
    }

    let body = raw_body.trim();
    if body.is_empty() {
        return Err(AppError::ValidationError(
            "Review text must not be empty".to_string(),
        ));
    }
    if body.chars().count() > MAX_REVIEW_CHARS {
        return Err(AppError::ValidationError(format!(
            "Review text must be at most {} characters",
            MAX_REVIEW_CHARS
        )));
    }

    Ok((rating, body.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rating_bounds_are_inclusive() {
        assert!(validate_review(0, "fine").is_err());
        assert!(validate_review(1, "fine").is_ok());
        assert!(validate_review(5, "fine").is_ok());
        assert!(validate_review(6, "fine").is_err());
    }

    #[test]
    fn body_rules_apply() {
        assert!(validate_review(3, "  ").is_err());
        assert!(validate_review(3, &"r".repeat(1001)).is_err());
        let (rating, body) = validate_review(3, " solid event ").unwrap();
        assert_eq!(rating, 3);
        assert_eq!(body, "solid event");
    }
}
