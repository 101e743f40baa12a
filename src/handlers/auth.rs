use axum::extract::State;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::auth::{jwt, password, CurrentUser};
use crate::models::user::Account;
use crate::repository::users;
use crate::utils::error::{AppError, AppResult};
use crate::utils::response::{created, success};
use crate::AppState;

const MIN_PASSWORD_CHARS: usize = 8;
const MAX_NAME_CHARS: usize = 100;

#[derive(Deserialize)]
pub struct RegisterRequest {
    pub email: String,
    pub password: String,
    pub name: Option<String>,
}

#[derive(Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

#[derive(Serialize)]
struct TokenPayload {
    access_token: String,
    token_type: &'static str,
}

#[derive(Serialize)]
struct AuthPayload {
    user: Account,
    token: TokenPayload,
}

pub async fn register(
    State(state): State<AppState>,
    Json(req): Json<RegisterRequest>,
) -> AppResult<Response> {
    let email = normalize_email(&req.email)?;
    validate_password(&req.password)?;
    let name = normalize_name(req.name)?;

    let hashed = password::hash_password(&req.password)?;
    let user = users::create(&state.pool, &email, name.as_deref(), &hashed).await?;
    info!(user_id = %user.id, "User registered");

    let token = issue_token(&state, user.id)?;
    Ok(created(
        AuthPayload {
            user: user.into(),
            token,
        },
        "Registration successful",
    )
    .into_response())
}

pub async fn login(
    State(state): State<AppState>,
    Json(req): Json<LoginRequest>,
) -> AppResult<Response> {
    let email = normalize_email(&req.email)?;

    // One message for unknown email and wrong password
    let invalid = || AppError::AuthError("Incorrect email or password".to_string());

    let user = users::find_by_email(&state.pool, &email)
        .await?
        .ok_or_else(|| {
            warn!(%email, "Login attempt for unknown email");
            invalid()
        })?;

    if !password::verify_password(&req.password, &user.hashed_password)? {
        warn!(user_id = %user.id, "Failed login attempt");
        return Err(invalid());
    }

    if !user.is_active {
        warn!(user_id = %user.id, "Inactive user login attempt");
        return Err(AppError::Forbidden("Account is deactivated".to_string()));
    }

    info!(user_id = %user.id, "User logged in");
    let token = issue_token(&state, user.id)?;
    Ok(success(
        AuthPayload {
            user: user.into(),
            token,
        },
        "Login successful",
    )
    .into_response())
}

pub async fn me(user: CurrentUser) -> Response {
    success(Account::from(user.0), "Authenticated user").into_response()
}

fn issue_token(state: &AppState, user_id: uuid::Uuid) -> AppResult<TokenPayload> {
    let access_token = jwt::issue_token(
        &state.config.jwt_secret,
        user_id,
        state.config.token_ttl_minutes,
    )?;
    Ok(TokenPayload {
        access_token,
        token_type: "bearer",
    })
}

fn normalize_email(raw: &str) -> AppResult<String> {
    let email = raw.trim().to_lowercase();
    let looks_valid = email
        .split_once('@')
        .map(|(local, domain)| !local.is_empty() && domain.contains('.'))
        .unwrap_or(false);

    if looks_valid {
        Ok(email)
    } else {
        Err(AppError::ValidationError(
            "A valid email address is required".to_string(),
        ))
    }
}

fn validate_password(password: &str) -> AppResult<()> {
    if password.chars().count() < MIN_PASSWORD_CHARS {
        return Err(AppError::ValidationError(format!(
            "Password must be at least {} characters",
            MIN_PASSWORD_CHARS
        )));
    }
    Ok(())
}

fn normalize_name(name: Option<String>) -> AppResult<Option<String>> {
    match name {
        None => Ok(None),
        Some(raw) => {
            let trimmed = raw.trim();
            if trimmed.is_empty() {
                return Ok(None);
            }
            if trimmed.chars().count() > MAX_NAME_CHARS {
                return Err(AppError::ValidationError(format!(
                    "Name must be at most {} characters",
                    MAX_NAME_CHARS
                )));
            }
            Ok(Some(trimmed.to_string()))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn email_is_trimmed_and_lowercased() {
        assert_eq!(
            normalize_email("  Ada@Example.COM ").unwrap(),
            "ada@example.com"
        );
    }

    #[test]
    fn email_must_have_local_part_and_dotted_domain() {
        assert!(normalize_email("@example.com").is_err());
        assert!(normalize_email("ada@localhost").is_err());
        assert!(normalize_email("not-an-email").is_err());
        assert!(normalize_email("ada@example.com").is_ok());
    }

    #[test]
    fn short_passwords_are_rejected() {
        assert!(validate_password("seven77").is_err());
        assert!(validate_password("eight888").is_ok());
    }

    #[test]
    fn blank_names_collapse_to_none() {
        assert_eq!(normalize_name(Some("   ".into())).unwrap(), None);
        assert_eq!(
            normalize_name(Some(" Ada ".into())).unwrap(),
            Some("Ada".to_string())
        );
        assert!(normalize_name(Some("x".repeat(101))).is_err());
    }
}
