//! Application configuration management
//!
//! Loads and validates configuration from environment variables. All
//! configuration is loaded at startup; site-level settings consulted by
//! the domain logic are passed down as explicit values, never read as
//! ambient state.

use std::env;
use std::sync::LazyLock;

use crate::constants::{
    DEFAULT_DATABASE_MAX_CONNECTIONS, DEFAULT_SERVER_HOST, DEFAULT_SERVER_PORT,
    DEFAULT_SITE_TITLE, DEFAULT_USER_RATING, languages,
};

/// Global application configuration (lazily initialized)
pub static CONFIG: LazyLock<Config> = LazyLock::new(|| {
    Config::from_env().expect("Failed to load configuration from environment")
});

/// Main application configuration
#[derive(Debug, Clone)]
pub struct Config {
    pub server: ServerConfig,
    pub database: DatabaseConfig,
    pub redis: RedisConfig,
    pub session: SessionConfig,
    pub site: SiteConfig,
}

/// Server configuration
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub rust_log: String,
}

/// Database configuration
#[derive(Debug, Clone)]
pub struct DatabaseConfig {
    pub url: String,
    pub max_connections: u32,
}

/// Redis configuration
#[derive(Debug, Clone)]
pub struct RedisConfig {
    pub url: String,
}

/// Session token configuration
///
/// The same secret signs both session tokens issued by the login service
/// (external to this crate) and the submission poll tokens issued here.
#[derive(Debug, Clone)]
pub struct SessionConfig {
    pub secret: String,
}

/// Site-level settings surfaced through the config endpoints and consumed
/// by the shaping logic
#[derive(Debug, Clone)]
pub struct SiteConfig {
    pub title: String,
    /// Rating every user starts from, seeds rating histories
    pub default_rating: i32,
    /// Languages accepted by the judge, subset of [`languages::ALL`]
    pub enabled_languages: Vec<String>,
    /// Footer links as `[{"title": ..., "url": ...}, ...]`
    pub links: serde_json::Value,
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        Ok(Self {
            server: ServerConfig::from_env()?,
            database: DatabaseConfig::from_env()?,
            redis: RedisConfig::from_env()?,
            session: SessionConfig::from_env()?,
            site: SiteConfig::from_env()?,
        })
    }
}

impl ServerConfig {
    fn from_env() -> Result<Self, ConfigError> {
        Ok(Self {
            host: env::var("SERVER_HOST").unwrap_or_else(|_| DEFAULT_SERVER_HOST.to_string()),
            port: env::var("SERVER_PORT")
                .unwrap_or_else(|_| DEFAULT_SERVER_PORT.to_string())
                .parse()
                .map_err(|_| ConfigError::InvalidValue("SERVER_PORT".to_string()))?,
            rust_log: env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string()),
        })
    }
}

impl DatabaseConfig {
    fn from_env() -> Result<Self, ConfigError> {
        Ok(Self {
            url: env::var("DATABASE_URL")
                .map_err(|_| ConfigError::Missing("DATABASE_URL".to_string()))?,
            max_connections: env::var("DATABASE_MAX_CONNECTIONS")
                .unwrap_or_else(|_| DEFAULT_DATABASE_MAX_CONNECTIONS.to_string())
                .parse()
                .map_err(|_| ConfigError::InvalidValue("DATABASE_MAX_CONNECTIONS".to_string()))?,
        })
    }
}

impl RedisConfig {
    fn from_env() -> Result<Self, ConfigError> {
        Ok(Self {
            url: env::var("REDIS_URL").unwrap_or_else(|_| "redis://localhost:6379".to_string()),
        })
    }
}

impl SessionConfig {
    fn from_env() -> Result<Self, ConfigError> {
        Ok(Self {
            secret: env::var("SESSION_SECRET")
                .map_err(|_| ConfigError::Missing("SESSION_SECRET".to_string()))?,
        })
    }
}

impl SiteConfig {
    fn from_env() -> Result<Self, ConfigError> {
        let enabled_languages = match env::var("ENABLED_LANGUAGES") {
            Ok(raw) => {
                let langs: Vec<String> = raw
                    .split(',')
                    .map(|s| s.trim().to_string())
                    .filter(|s| !s.is_empty())
                    .collect();
                for lang in &langs {
                    if !languages::ALL.contains(&lang.as_str()) {
                        return Err(ConfigError::InvalidValue("ENABLED_LANGUAGES".to_string()));
                    }
                }
                langs
            }
            Err(_) => languages::ALL.iter().map(|s| s.to_string()).collect(),
        };

        let links = match env::var("SITE_LINKS") {
            Ok(raw) => serde_json::from_str(&raw)
                .map_err(|_| ConfigError::InvalidValue("SITE_LINKS".to_string()))?,
            Err(_) => serde_json::Value::Array(vec![]),
        };

        Ok(Self {
            title: env::var("SITE_TITLE").unwrap_or_else(|_| DEFAULT_SITE_TITLE.to_string()),
            default_rating: env::var("DEFAULT_USER_RATING")
                .unwrap_or_else(|_| DEFAULT_USER_RATING.to_string())
                .parse()
                .map_err(|_| ConfigError::InvalidValue("DEFAULT_USER_RATING".to_string()))?,
            enabled_languages,
            links,
        })
    }
}

/// Configuration loading errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Missing required environment variable: {0}")]
    Missing(String),

    #[error("Invalid value for environment variable: {0}")]
    InvalidValue(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_values() {
        let server = ServerConfig {
            host: DEFAULT_SERVER_HOST.to_string(),
            port: DEFAULT_SERVER_PORT,
            rust_log: "info".to_string(),
        };
        assert_eq!(server.host, "0.0.0.0");
        assert_eq!(server.port, 8080);
    }

    #[test]
    fn test_site_defaults() {
        let site = SiteConfig {
            title: DEFAULT_SITE_TITLE.to_string(),
            default_rating: DEFAULT_USER_RATING,
            enabled_languages: languages::ALL.iter().map(|s| s.to_string()).collect(),
            links: serde_json::Value::Array(vec![]),
        };
        assert_eq!(site.default_rating, 1500);
        assert!(site.enabled_languages.contains(&"cpp".to_string()));
    }
}
