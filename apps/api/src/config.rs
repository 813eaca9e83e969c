use std::time::Duration;

use anyhow::{Context, Result};

const DEFAULT_JOBS_API_BASE: &str = "http://api.adzuna.com/v1/api/jobs";

/// Whether error responses may carry technical detail.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppEnv {
    Development,
    Production,
}

impl AppEnv {
    fn parse(raw: &str) -> Self {
        match raw.trim().to_ascii_lowercase().as_str() {
            "development" | "dev" => AppEnv::Development,
            _ => AppEnv::Production,
        }
    }
}

/// Application configuration loaded from environment variables.
/// Startup fails if a required variable is missing.
#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: String,
    pub redis_url: String,
    pub jwt_secret: String,
    pub jobs_app_id: String,
    pub jobs_app_key: String,
    /// Base URL of the job-listings API, without the country segment.
    pub jobs_api_base: String,
    pub jobs_country: String,
    pub jobs_cache_ttl: Duration,
    pub port: u16,
    pub rust_log: String,
    pub app_env: AppEnv,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        Ok(Config {
            database_url: require_env("DATABASE_URL")?,
            redis_url: require_env("REDIS_URL")?,
            jwt_secret: require_env("JWT_SECRET")?,
            jobs_app_id: require_env("JOBS_APP_ID")?,
            jobs_app_key: require_env("JOBS_APP_KEY")?,
            jobs_api_base: std::env::var("JOBS_API_BASE")
                .unwrap_or_else(|_| DEFAULT_JOBS_API_BASE.to_string())
                .trim_end_matches('/')
                .to_string(),
            jobs_country: std::env::var("JOBS_COUNTRY").unwrap_or_else(|_| "gb".to_string()),
            jobs_cache_ttl: Duration::from_secs(
                std::env::var("JOBS_CACHE_TTL_SECS")
                    .unwrap_or_else(|_| "300".to_string())
                    .parse::<u64>()
                    .context("JOBS_CACHE_TTL_SECS must be a number of seconds")?,
            ),
            port: std::env::var("PORT")
                .unwrap_or_else(|_| "8080".to_string())
                .parse::<u16>()
                .context("PORT must be a valid port number")?,
            rust_log: std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string()),
            app_env: AppEnv::parse(
                &std::env::var("APP_ENV").unwrap_or_else(|_| "production".to_string()),
            ),
        })
    }

    pub fn is_development(&self) -> bool {
        self.app_env == AppEnv::Development
    }
}

fn require_env(key: &str) -> Result<String> {
    std::env::var(key).with_context(|| format!("Required environment variable '{key}' is not set"))
}

#[cfg(test)]
pub(crate) fn test_config() -> Config {
    Config {
        database_url: "postgres://localhost/jobfolio_test".into(),
        redis_url: "redis://127.0.0.1/".into(),
        jwt_secret: "test-secret".into(),
        jobs_app_id: "app-id".into(),
        jobs_app_key: "app-key".into(),
        jobs_api_base: DEFAULT_JOBS_API_BASE.into(),
        jobs_country: "gb".into(),
        jobs_cache_ttl: Duration::from_secs(300),
        port: 8080,
        rust_log: "info".into(),
        app_env: AppEnv::Production,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_app_env_parse() {
        assert_eq!(AppEnv::parse("development"), AppEnv::Development);
        assert_eq!(AppEnv::parse(" Dev "), AppEnv::Development);
        assert_eq!(AppEnv::parse("production"), AppEnv::Production);
        assert_eq!(AppEnv::parse("staging"), AppEnv::Production);
    }
}
