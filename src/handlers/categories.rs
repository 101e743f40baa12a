use axum::extract::{Path, State};
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Deserialize;
use tracing::info;
use uuid::Uuid;

use crate::auth::CurrentUser;
use crate::repository::categories;
use crate::utils::error::{AppError, AppResult};
use crate::utils::response::{created, empty_success, success};
use crate::AppState;

const MAX_CATEGORY_NAME_CHARS: usize = 255;

#[derive(Deserialize)]
pub struct CategoryRequest {
    pub name: String,
}

pub async fn list_categories(State(state): State<AppState>) -> AppResult<Response> {
    let categories = categories::list(&state.pool).await?;
    Ok(success(categories, "Categories retrieved").into_response())
}

pub async fn create_category(
    State(state): State<AppState>,
    admin: CurrentUser,
    Json(req): Json<CategoryRequest>,
) -> AppResult<Response> {
    admin.require_admin()?;
    let name = validate_name(&req.name)?;

    let category = categories::create(&state.pool, &name).await?;
    info!(category_id = %category.id, "Category created");
    Ok(created(category, "Category created").into_response())
}

pub async fn rename_category(
    State(state): State<AppState>,
    admin: CurrentUser,
    Path(category_id): Path<Uuid>,
    Json(req): Json<CategoryRequest>,
) -> AppResult<Response> {
    admin.require_admin()?;
    let name = validate_name(&req.name)?;

    let category = categories::rename(&state.pool, category_id, &name)
        .await?
        .ok_or_else(|| {
            AppError::NotFound(format!("Category '{}' was not found", category_id))
        })?;

    Ok(success(category, "Category updated").into_response())
}

pub async fn delete_category(
    State(state): State<AppState>,
    admin: CurrentUser,
    Path(category_id): Path<Uuid>,
) -> AppResult<Response> {
    admin.require_admin()?;

    if !categories::delete(&state.pool, category_id).await? {
        return Err(AppError::NotFound(format!(
            "Category '{}' was not found",
            category_id
        )));
    }

    info!(category_id = %category_id, "Category deleted");
    Ok(empty_success("Category deleted").into_response())
}

fn validate_name(raw: &str) -> AppResult<String> {
    let name = raw.trim();
    if name.is_empty() {
        return Err(AppError::ValidationError(
            "Category name must not be empty".to_string(),
        ));
    }
    if name.chars().count() > MAX_CATEGORY_NAME_CHARS {
        return Err(AppError::ValidationError(format!(
            "Category name must be at most {} characters",
            MAX_CATEGORY_NAME_CHARS
        )));
    }
    Ok(name.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn name_is_trimmed_and_bounded() {
        assert_eq!(validate_name("  Music  ").unwrap(), "Music");
        assert!(validate_name("   ").is_err());
        assert!(validate_name(&"c".repeat(256)).is_err());
    }
}
