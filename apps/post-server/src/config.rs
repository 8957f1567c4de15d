//! Application configuration loaded from environment variables.

use std::env;
use std::num::{NonZeroU64, NonZeroUsize};
use std::str::FromStr;
use std::time::Duration;

use post_core::PostConfig;
use post_core::config::{DEFAULT_MAX_TEXT_LEN, DEFAULT_STORE_TIMEOUT};
use post_infra::JwtConfig;
use post_infra::database::DatabaseConfig;

/// Application configuration.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub host: String,
    pub port: u16,
    pub database: Option<DatabaseConfig>,
    pub post: PostConfig,
    pub jwt: JwtConfig,
}

impl AppConfig {
    /// Load configuration from environment variables.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Load configuration from an arbitrary key/value source.
    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let database = lookup("DATABASE_URL").map(|url| {
            let defaults = DatabaseConfig::new(url);
            DatabaseConfig {
                max_connections: parse_var(&lookup, "DB_MAX_CONNECTIONS")
                    .unwrap_or(defaults.max_connections),
                min_connections: parse_var(&lookup, "DB_MIN_CONNECTIONS")
                    .unwrap_or(defaults.min_connections),
                ..defaults
            }
        });

        // Zero would reject every post or fail every store call.
        let post = PostConfig {
            max_text_len: parse_var(&lookup, "POST_MAX_TEXT_LEN")
                .map_or(DEFAULT_MAX_TEXT_LEN, NonZeroUsize::get),
            store_timeout: parse_var(&lookup, "POST_STORE_TIMEOUT_MS")
                .map_or(DEFAULT_STORE_TIMEOUT, |ms: NonZeroU64| Duration::from_millis(ms.get())),
        };

        let jwt_defaults = JwtConfig::default();
        let jwt = JwtConfig {
            secret: lookup("JWT_SECRET").unwrap_or(jwt_defaults.secret),
            expiration_hours: parse_var(&lookup, "JWT_EXPIRATION_HOURS")
                .unwrap_or(jwt_defaults.expiration_hours),
            issuer: lookup("JWT_ISSUER").unwrap_or(jwt_defaults.issuer),
        };

        Self {
            host: lookup("HOST").unwrap_or_else(|| "127.0.0.1".to_string()),
            port: parse_var(&lookup, "PORT").unwrap_or(8080),
            database,
            post,
            jwt,
        }
    }
}

/// Read and parse a variable. Malformed values are logged and treated as unset.
fn parse_var<T: FromStr>(lookup: &impl Fn(&str) -> Option<String>, key: &str) -> Option<T> {
    let raw = lookup(key)?;
    match raw.parse() {
        Ok(value) => Some(value),
        Err(_) => {
            tracing::warn!(key, value = %raw, "Ignoring malformed configuration value");
            None
        }
    }
}
