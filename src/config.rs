//! Service Configuration
//!
//! All settings come from the environment with working defaults, so the
//! service starts with no configuration at all.

use std::env;

/// Database URL used when DATABASE_URL is not set.
pub const DEFAULT_DATABASE_URL: &str = "sqlite://price_requests.db";

/// HTTP port used when PORT is not set.
pub const DEFAULT_PORT: u16 = 7860;

const DEFAULT_MAX_CONNECTIONS: u32 = 5;

#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Database URL, scheme already normalized.
    pub database_url: String,

    /// Maximum number of connections in the pool.
    pub max_connections: u32,

    /// Port the HTTP server binds on 0.0.0.0.
    pub port: u16,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            database_url: DEFAULT_DATABASE_URL.to_string(),
            max_connections: DEFAULT_MAX_CONNECTIONS,
            port: DEFAULT_PORT,
        }
    }
}

impl AppConfig {
    /// Load configuration from environment variables.
    ///
    /// Unparsable values fall back to the defaults with a warning; a bad
    /// PORT never prevents startup.
    pub fn from_env() -> AppConfig {
        let mut config = AppConfig::default();

        if let Ok(url) = env::var("DATABASE_URL") {
            config.database_url = normalize_database_url(&url);
        }

        if let Ok(max) = env::var("DATABASE_MAX_CONNECTIONS") {
            match max.parse::<u32>() {
                Ok(value) if value > 0 => config.max_connections = value,
                _ => {
                    tracing::warn!(
                        "Invalid DATABASE_MAX_CONNECTIONS '{}', using default: {}",
                        max,
                        config.max_connections
                    );
                }
            }
        }

        if let Ok(port) = env::var("PORT") {
            match port.parse::<u16>() {
                Ok(value) => config.port = value,
                Err(e) => {
                    tracing::warn!(
                        "Failed to parse PORT '{}': {}, using default: {}",
                        port,
                        e,
                        config.port
                    );
                }
            }
        }

        config
    }
}

/// Rewrite the legacy `postgres://` scheme to `postgresql://`.
///
/// Some hosting providers still hand out the legacy form; only the exact
/// prefix is rewritten, everything else passes through untouched.
pub fn normalize_database_url(url: &str) -> String {
    match url.strip_prefix("postgres://") {
        Some(rest) => format!("postgresql://{}", rest),
        None => url.to_string(),
    }
}
