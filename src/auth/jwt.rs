use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::utils::error::{AppError, AppResult};

/// Stateless bearer token: `sub` carries the user id, `exp` the expiry.
/// Deactivated or deleted users are filtered at extraction time with a
/// database lookup, so no revocation list is kept.
#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    pub sub: String,
    pub iat: i64,
    pub exp: i64,
}

pub fn issue_token(secret: &str, user_id: Uuid, ttl_minutes: i64) -> AppResult<String> {
    let now = Utc::now();
    let claims = Claims {
        sub: user_id.to_string(),
        iat: now.timestamp(),
        exp: (now + Duration::minutes(ttl_minutes)).timestamp(),
    };

    Ok(encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(secret.as_bytes()),
    )?)
}

pub fn verify_token(secret: &str, token: &str) -> AppResult<Uuid> {
    let data = decode::<Claims>(
        token,
        &DecodingKey::from_secret(secret.as_bytes()),
        &Validation::default(),
    )?;

    Uuid::parse_str(&data.claims.sub)
        .map_err(|_| AppError::AuthError("Malformed token subject".to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    const SECRET: &str = "unit-test-secret";

    #[test]
    fn issue_and_verify_roundtrip() {
        let user_id = Uuid::new_v4();
        let token = issue_token(SECRET, user_id, 60).unwrap();
        assert_eq!(verify_token(SECRET, &token).unwrap(), user_id);
    }

    #[test]
    fn rejects_wrong_secret() {
        let token = issue_token(SECRET, Uuid::new_v4(), 60).unwrap();
        assert!(verify_token("another-secret", &token).is_err());
    }

    #[test]
    fn rejects_expired_token() {
        // expired well beyond the default validation leeway
        let token = issue_token(SECRET, Uuid::new_v4(), -10).unwrap();
        assert!(verify_token(SECRET, &token).is_err());
    }

    #[test]
    fn rejects_garbage() {
        assert!(verify_token(SECRET, "not.a.jwt").is_err());
    }
}
