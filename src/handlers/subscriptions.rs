use axum::extract::{Path, Query, State};
use axum::response::{IntoResponse, Response};
use tracing::info;
use uuid::Uuid;

use crate::auth::CurrentUser;
use crate::repository::{subscriptions, users};
use crate::utils::error::{AppError, AppResult};
use crate::utils::pagination::PageParams;
use crate::utils::response::{created, empty_success, success};
use crate::AppState;

pub async fn follow_user(
    State(state): State<AppState>,
    user: CurrentUser,
    Path(followee_id): Path<Uuid>,
) -> AppResult<Response> {
    if followee_id == user.id() {
        return Err(AppError::ValidationError(
            "You cannot follow yourself".to_string(),
        ));
    }

    if users::find_by_id(&state.pool, followee_id).await?.is_none() {
        return Err(AppError::NotFound(format!(
            "User '{}' was not found",
            followee_id
        )));
    }

    let label = user.0.name.clone().unwrap_or_else(|| "Someone".to_string());
    let subscription =
        subscriptions::follow(&state.pool, user.id(), followee_id, &label).await?;

    info!(follower_id = %user.id(), followee_id = %followee_id, "Subscription created");
    Ok(created(subscription, "Now following").into_response())
}

pub async fn unfollow_user(
    State(state): State<AppState>,
    user: CurrentUser,
    Path(followee_id): Path<Uuid>,
) -> AppResult<Response> {
    if !subscriptions::unfollow(&state.pool, user.id(), followee_id).await? {
        return Err(AppError::NotFound(
            "You are not following this user".to_string(),
        ));
    }
    Ok(empty_success("Unfollowed").into_response())
}

pub async fn user_followers(
    State(state): State<AppState>,
    Path(user_id): Path<Uuid>,
    Query(page): Query<PageParams>,
) -> AppResult<Response> {
    require_user(&state, user_id).await?;
    let followers =
        subscriptions::followers(&state.pool, user_id, page.limit(), page.offset()).await?;
    Ok(success(followers, "Followers retrieved").into_response())
}

pub async fn user_following(
    State(state): State<AppState>,
    Path(user_id): Path<Uuid>,
    Query(page): Query<PageParams>,
) -> AppResult<Response> {
    require_user(&state, user_id).await?;
    let following =
        subscriptions::following(&state.pool, user_id, page.limit(), page.offset()).await?;
    Ok(success(following, "Following retrieved").into_response())
}

async fn require_user(state: &AppState, user_id: Uuid) -> AppResult<()> {
    users::find_by_id(&state.pool, user_id)
        .await?
        .map(|_| ())
        .ok_or_else(|| AppError::NotFound(format!("User '{}' was not found", user_id)))
}
