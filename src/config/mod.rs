use std::env;

pub mod cors;
pub mod security;

pub use cors::create_cors_layer;
pub use security::create_security_headers_layer;

const DEFAULT_TOKEN_TTL_MINUTES: i64 = 60;
const DEFAULT_PORT: u16 = 3001;

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub database_url: String,
    pub jwt_secret: String,
    pub token_ttl_minutes: i64,
    pub port: u16,
}

impl AppConfig {
    pub fn from_env() -> Self {
        Self {
            database_url: env::var("DATABASE_URL")
                .unwrap_or_else(|_| "postgres://localhost/event_sphere".to_string()),
            jwt_secret: env::var("JWT_SECRET")
                .unwrap_or_else(|_| "change-me-in-production".to_string()),
            token_ttl_minutes: env::var("TOKEN_TTL_MINUTES")
                .ok()
                .and_then(|v| v.parse().ok())
                .filter(|v| *v > 0)
                .unwrap_or(DEFAULT_TOKEN_TTL_MINUTES),
            port: env::var("PORT")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(DEFAULT_PORT),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ttl_rejects_non_positive_values() {
        std::env::set_var("TOKEN_TTL_MINUTES", "-5");
        let config = AppConfig::from_env();
        assert_eq!(config.token_ttl_minutes, DEFAULT_TOKEN_TTL_MINUTES);
        std::env::remove_var("TOKEN_TTL_MINUTES");
    }

    #[test]
    fn port_falls_back_on_garbage() {
        std::env::set_var("PORT", "not-a-port");
        let config = AppConfig::from_env();
        assert_eq!(config.port, DEFAULT_PORT);
        std::env::remove_var("PORT");
    }
}
