use axum::{
    async_trait,
    extract::FromRequestParts,
    http::{header::AUTHORIZATION, request::Parts},
};
use uuid::Uuid;

use crate::auth::jwt;
use crate::models::User;
use crate::repository::users;
use crate::utils::error::{AppError, AppResult};
use crate::AppState;

/// The authenticated caller. Extraction verifies the bearer token, then
/// re-reads the account so tokens for deleted or deactivated users die here.
pub struct CurrentUser(pub User);

impl CurrentUser {
    pub fn id(&self) -> Uuid {
        self.0.id
    }

    pub fn require_organizer(&self) -> AppResult<()> {
        if self.0.role.can_organize() {
            Ok(())
        } else {
            Err(AppError::Forbidden(
                "Organizer or administrator privileges required".to_string(),
            ))
        }
    }

    pub fn require_admin(&self) -> AppResult<()> {
        if self.0.role.is_admin() {
            Ok(())
        } else {
            Err(AppError::Forbidden(
                "Administrator privileges required".to_string(),
            ))
        }
    }

    /// Owner-or-admin check used by mutation endpoints.
    pub fn require_owner(&self, owner_id: Uuid) -> AppResult<()> {
        if self.0.id == owner_id || self.0.role.is_admin() {
            Ok(())
        } else {
            Err(AppError::Forbidden(
                "You do not own this resource".to_string(),
            ))
        }
    }
}

#[async_trait]
impl FromRequestParts<AppState> for CurrentUser {
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &AppState) -> Result<Self, Self::Rejection> {
        let token = bearer_token(parts)?;
        let user_id = jwt::verify_token(&state.config.jwt_secret, token)?;

        let user = users::find_by_id(&state.pool, user_id)
            .await?
            .ok_or_else(|| AppError::AuthError("Unknown user".to_string()))?;

        if !user.is_active {
            return Err(AppError::Forbidden("Account is deactivated".to_string()));
        }

        Ok(CurrentUser(user))
    }
}

fn bearer_token(parts: &Parts) -> AppResult<&str> {
    let header = parts
        .headers
        .get(AUTHORIZATION)
        .ok_or_else(|| AppError::AuthError("Missing Authorization header".to_string()))?;

    let header = header
        .to_str()
        .map_err(|_| AppError::AuthError("Malformed Authorization header".to_string()))?;

    header
        .strip_prefix("Bearer ")
        .ok_or_else(|| AppError::AuthError("Expected a bearer token".to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::UserRole;
    use chrono::Utc;

    fn user_with_role(role: UserRole) -> CurrentUser {
        CurrentUser(User {
            id: Uuid::new_v4(),
            email: "grace@example.com".into(),
            name: None,
            bio: None,
            hashed_password: "hash".into(),
            role,
            is_active: true,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        })
    }

    fn parts_with_auth(value: Option<&str>) -> Parts {
        let mut builder = axum::http::Request::builder().uri("/");
        if let Some(value) = value {
            builder = builder.header(AUTHORIZATION, value);
        }
        builder.body(()).unwrap().into_parts().0
    }

    #[test]
    fn bearer_token_requires_scheme() {
        let parts = parts_with_auth(Some("Bearer abc.def.ghi"));
        assert_eq!(bearer_token(&parts).unwrap(), "abc.def.ghi");

        let parts = parts_with_auth(Some("Basic dXNlcjpwdw=="));
        assert!(bearer_token(&parts).is_err());

        let parts = parts_with_auth(None);
        assert!(bearer_token(&parts).is_err());
    }

    #[test]
    fn organizer_guard() {
        assert!(user_with_role(UserRole::User).require_organizer().is_err());
        assert!(user_with_role(UserRole::Organizer).require_organizer().is_ok());
        assert!(user_with_role(UserRole::Admin).require_organizer().is_ok());
    }

    #[test]
    fn owner_guard_allows_admin_override() {
        let other = Uuid::new_v4();
        assert!(user_with_role(UserRole::User).require_owner(other).is_err());
        assert!(user_with_role(UserRole::Admin).require_owner(other).is_ok());

        let me = user_with_role(UserRole::User);
        let my_id = me.id();
        assert!(me.require_owner(my_id).is_ok());
    }
}
