use std::env;

use thiserror::Error;
use url::Url;

/// Errors raised while assembling [`AppConfig`] from the environment.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("missing required environment variable: {0}")]
    Missing(&'static str),

    #[error("invalid {0}: {1}")]
    InvalidUrl(&'static str, url::ParseError),
}

/// Process configuration, loaded once at startup and handed to
/// [`crate::state::AppState`]. Never read from the environment again after
/// that.
///
/// The three remote-service secrets and the session signing secret are
/// required; startup fails without them.
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Base URL of the remote data service.
    pub supabase_url: Url,
    /// Public (anon) key; row-level policy applies.
    pub anon_key: String,
    /// Privileged service key; bypasses row-level policy.
    pub service_key: String,
    /// HS256 secret for session capability tokens.
    pub session_secret: String,
    /// Validity window of a session token, in hours.
    pub session_expiry_hours: u64,
    pub port: u16,
}

impl AppConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        let supabase_url = require("SUPABASE_URL")?;
        let supabase_url =
            Url::parse(&supabase_url).map_err(|e| ConfigError::InvalidUrl("SUPABASE_URL", e))?;

        Ok(Self {
            supabase_url,
            anon_key: require("SUPABASE_ANON_KEY")?,
            service_key: require("SUPABASE_SERVICE_KEY")?,
            session_secret: require("SESSION_SECRET")?,
            session_expiry_hours: env::var("SESSION_EXPIRY_HOURS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(24),
            // Allow tests or deployments to override port via env
            port: env::var("NOTEKEEP_PORT")
                .ok()
                .or_else(|| env::var("PORT").ok())
                .and_then(|v| v.parse().ok())
                .unwrap_or(3000),
        })
    }
}

fn require(name: &'static str) -> Result<String, ConfigError> {
    match env::var(name) {
        Ok(value) if !value.trim().is_empty() => Ok(value),
        _ => Err(ConfigError::Missing(name)),
    }
}
