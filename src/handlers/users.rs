use axum::extract::{Path, Query, State};
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Deserialize;
use tracing::info;
use uuid::Uuid;

use crate::auth::{password, CurrentUser};
use crate::models::user::Account;
use crate::models::{UserProfile, UserRole};
use crate::repository::users;
use crate::utils::error::{AppError, AppResult};
use crate::utils::pagination::PageParams;
use crate::utils::response::{empty_success, success};
use crate::AppState;

const MAX_NAME_CHARS: usize = 100;
const MAX_BIO_CHARS: usize = 1000;

#[derive(Deserialize)]
pub struct UpdateProfileRequest {
    pub name: Option<String>,
    pub bio: Option<String>,
}

#[derive(Deserialize)]
pub struct ChangePasswordRequest {
    pub current_password: String,
    pub new_password: String,
}

#[derive(Deserialize)]
pub struct AdminUpdateRequest {
    pub name: Option<String>,
    pub bio: Option<String>,
    pub role: Option<UserRole>,
    pub is_active: Option<bool>,
}

pub async fn list_users(
    State(state): State<AppState>,
    Query(page): Query<PageParams>,
) -> AppResult<Response> {
    let profiles = users::list_profiles(&state.pool, page.limit(), page.offset()).await?;
    Ok(success(profiles, "Users retrieved").into_response())
}

pub async fn get_user(
    State(state): State<AppState>,
    Path(user_id): Path<Uuid>,
) -> AppResult<Response> {
    let user = users::find_by_id(&state.pool, user_id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("User '{}' was not found", user_id)))?;
    Ok(success(UserProfile::from(user), "User retrieved").into_response())
}

pub async fn update_me(
    State(state): State<AppState>,
    user: CurrentUser,
    Json(req): Json<UpdateProfileRequest>,
) -> AppResult<Response> {
    validate_limits(req.name.as_deref(), req.bio.as_deref())?;

    let updated = users::update_profile(
        &state.pool,
        user.id(),
        req.name.as_deref(),
        req.bio.as_deref(),
    )
    .await?
    .ok_or_else(|| AppError::NotFound("User no longer exists".to_string()))?;

    Ok(success(Account::from(updated), "Profile updated").into_response())
}

pub async fn change_password(
    State(state): State<AppState>,
    user: CurrentUser,
    Json(req): Json<ChangePasswordRequest>,
) -> AppResult<Response> {
    if !password::verify_password(&req.current_password, &user.0.hashed_password)? {
        return Err(AppError::AuthError(
            "Current password is incorrect".to_string(),
        ));
    }
    if req.new_password.chars().count() < 8 {
        return Err(AppError::ValidationError(
            "Password must be at least 8 characters".to_string(),
        ));
    }

    let hashed = password::hash_password(&req.new_password)?;
    users::update_password(&state.pool, user.id(), &hashed).await?;
    info!(user_id = %user.id(), "Password changed");

    Ok(empty_success("Password updated").into_response())
}

pub async fn admin_update_user(
    State(state): State<AppState>,
    admin: CurrentUser,
    Path(user_id): Path<Uuid>,
    Json(req): Json<AdminUpdateRequest>,
) -> AppResult<Response> {
    admin.require_admin()?;
    validate_limits(req.name.as_deref(), req.bio.as_deref())?;

    let updated = users::admin_update(
        &state.pool,
        user_id,
        req.name.as_deref(),
        req.bio.as_deref(),
        req.role,
        req.is_active,
    )
    .await?
    .ok_or_else(|| AppError::NotFound(format!("User '{}' was not found", user_id)))?;

    info!(admin_id = %admin.id(), user_id = %user_id, "User updated by admin");
    Ok(success(Account::from(updated), "User updated").into_response())
}

pub async fn admin_delete_user(
    State(state): State<AppState>,
    admin: CurrentUser,
    Path(user_id): Path<Uuid>,
) -> AppResult<Response> {
    admin.require_admin()?;

    if admin.id() == user_id {
        return Err(AppError::ValidationError(
            "Administrators cannot delete their own account".to_string(),
        ));
    }

    if !users::delete(&state.pool, user_id).await? {
        return Err(AppError::NotFound(format!(
            "User '{}' was not found",
            user_id
        )));
    }

    info!(admin_id = %admin.id(), user_id = %user_id, "User deleted by admin");
    Ok(empty_success("User deleted").into_response())
}

fn validate_limits(name: Option<&str>, bio: Option<&str>) -> AppResult<()> {
    if let Some(name) = name {
        if name.chars().count() > MAX_NAME_CHARS {
            return Err(AppError::ValidationError(format!(
                "Name must be at most {} characters",
                MAX_NAME_CHARS
            )));
        }
    }
    if let Some(bio) = bio {
        if bio.chars().count() > MAX_BIO_CHARS {
            return Err(AppError::ValidationError(format!(
                "Bio must be at most {} characters",
                MAX_BIO_CHARS
            )));
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn limits_are_enforced() {
        assert!(validate_limits(Some("Ada"), Some("Rustacean")).is_ok());
        assert!(validate_limits(Some(&"x".repeat(101)), None).is_err());
        assert!(validate_limits(None, Some(&"b".repeat(1001))).is_err());
        assert!(validate_limits(None, None).is_ok());
    }
}
