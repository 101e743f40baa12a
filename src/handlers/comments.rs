use axum::extract::{Path, Query, State};
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Deserialize;
use uuid::Uuid;

use crate::auth::CurrentUser;
use crate::handlers::events::find_event;
use crate::repository::comments;
use crate::utils::error::{AppError, AppResult};
use crate::utils::pagination::PageParams;
use crate::utils::response::{created, empty_success, success};
use crate::AppState;

const MAX_COMMENT_CHARS: usize = 1000;

#[derive(Deserialize)]
pub struct CommentRequest {
    pub body: String,
}

pub async fn create_comment(
    State(state): State<AppState>,
    user: CurrentUser,
    Path(event_id): Path<Uuid>,
    Json(req): Json<CommentRequest>,
) -> AppResult<Response> {
    let body = validate_body(&req.body)?;
    let event = find_event(&state, event_id).await?;

    let comment = comments::create(&state.pool, &event, user.id(), &body).await?;
    Ok(created(comment, "Comment added").into_response())
}

pub async fn event_comments(
    State(state): State<AppState>,
    Path(event_id): Path<Uuid>,
    Query(page): Query<PageParams>,
) -> AppResult<Response> {
    find_event(&state, event_id).await?;
    let comments =
        comments::list_for_event(&state.pool, event_id, page.limit(), page.offset()).await?;
    Ok(success(comments, "Comments retrieved").into_response())
}

pub async fn user_comments(
    State(state): State<AppState>,
    Path(user_id): Path<Uuid>,
    Query(page): Query<PageParams>,
) -> AppResult<Response> {
    let comments =
        comments::list_for_user(&state.pool, user_id, page.limit(), page.offset()).await?;
    Ok(success(comments, "Comments retrieved").into_response())
}

pub async fn update_comment(
    State(state): State<AppState>,
    user: CurrentUser,
    Path(comment_id): Path<Uuid>,
    Json(req): Json<CommentRequest>,
) -> AppResult<Response> {
    let body = validate_body(&req.body)?;

    let comment = comments::find_by_id(&state.pool, comment_id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Comment '{}' was not found", comment_id)))?;

    // editing is reserved to the author; admins may only delete
    if comment.author_id != user.id() {
        return Err(AppError::Forbidden(
            "Only the author can edit a comment".to_string(),
        ));
    }

    let updated = comments::update_body(&state.pool, comment_id, &body)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Comment '{}' was not found", comment_id)))?;

    Ok(success(updated, "Comment updated").into_response())
}

pub async fn delete_comment(
    State(state): State<AppState>,
    user: CurrentUser,
    Path(comment_id): Path<Uuid>,
) -> AppResult<Response> {
    let comment = comments::find_by_id(&state.pool, comment_id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Comment '{}' was not found", comment_id)))?;

    user.require_owner(comment.author_id)?;

    comments::delete(&state.pool, comment_id).await?;
    Ok(empty_success("Comment deleted").into_response())
}

fn validate_body(raw: &str) -> AppResult<String> {
    let body = raw.trim();
    if body.is_empty() {
        return Err(AppError::ValidationError(
            "Comment must not be empty".to_string(),
        ));
    }
    if body.chars().count() > MAX_COMMENT_CHARS {
        return Err(AppError::ValidationError(format!(
            "Comment must be at most {} characters",
            MAX_COMMENT_CHARS
        )));
    }
    Ok(body.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn body_is_trimmed_and_bounded() {
        assert_eq!(validate_body(" looking forward to it ").unwrap(), "looking forward to it");
        assert!(validate_body("\n\t ").is_err());
        assert!(validate_body(&"a".repeat(1001)).is_err());
    }
}
