//! Process configuration, read once from the environment at start-up.

use std::env;
use std::path::PathBuf;

use crate::services::oilfield_api::OilfieldApiConfig;

/// Environment variable for the listen address
const ENV_BIND_ADDR: &str = "BIND_ADDR";

/// Environment variable for the relational store; unset means JSON file
const ENV_DATABASE_URL: &str = "DATABASE_URL";

/// Environment variable for the JSON state file
const ENV_STATE_FILE: &str = "STATE_FILE";

const ENV_API_BASE_URL: &str = "OILFIELD_API_BASE_URL";
const ENV_TOKEN_URL: &str = "OILFIELD_TOKEN_URL";
const ENV_CLIENT_ID: &str = "OILFIELD_CLIENT_ID";
const ENV_CLIENT_SECRET: &str = "OILFIELD_CLIENT_SECRET";
const ENV_CACHE_TTL: &str = "OILFIELD_CACHE_TTL_SECS";
const ENV_TIMEOUT: &str = "OILFIELD_TIMEOUT_SECS";

const DEFAULT_BIND_ADDR: &str = "0.0.0.0:3000";
const DEFAULT_STATE_FILE: &str = "timelog-state.json";
const DEFAULT_API_BASE_URL: &str = "http://localhost:8080/ords";

/// Default TTL of cached well lookups in seconds (1 hour)
const DEFAULT_CACHE_TTL_SECS: u64 = 3600;

const DEFAULT_TIMEOUT_SECS: u64 = 30;

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub bind_addr: String,
    pub database_url: Option<String>,
    pub state_file: PathBuf,
    pub oilfield_api: OilfieldApiConfig,
}

impl AppConfig {
    /// # Environment Variables
    ///
    /// * `BIND_ADDR` - listen address (default: 0.0.0.0:3000)
    /// * `DATABASE_URL` - persist state relationally when set
    /// * `STATE_FILE` - JSON state file otherwise (default: timelog-state.json)
    /// * `OILFIELD_API_BASE_URL`, `OILFIELD_TOKEN_URL` - upstream endpoints
    /// * `OILFIELD_CLIENT_ID`, `OILFIELD_CLIENT_SECRET` - upstream credentials;
    ///   without them every lookup returns fallback data
    /// * `OILFIELD_CACHE_TTL_SECS` - well lookup cache TTL (default: 3600)
    /// * `OILFIELD_TIMEOUT_SECS` - upstream HTTP timeout (default: 30)
    pub fn from_env() -> Self {
        let base_url = non_empty_var(ENV_API_BASE_URL)
            .unwrap_or_else(|| DEFAULT_API_BASE_URL.to_string());
        let token_url = non_empty_var(ENV_TOKEN_URL)
            .unwrap_or_else(|| format!("{}/oauth/token", base_url.trim_end_matches('/')));

        let client_id = non_empty_var(ENV_CLIENT_ID).unwrap_or_default();
        let client_secret = non_empty_var(ENV_CLIENT_SECRET).unwrap_or_default();
        if client_id.is_empty() || client_secret.is_empty() {
            tracing::warn!(
                "OILFIELD_CLIENT_ID / OILFIELD_CLIENT_SECRET not set - upstream lookups \
                 will return fallback data"
            );
        }

        Self {
            bind_addr: non_empty_var(ENV_BIND_ADDR)
                .unwrap_or_else(|| DEFAULT_BIND_ADDR.to_string()),
            database_url: non_empty_var(ENV_DATABASE_URL),
            state_file: non_empty_var(ENV_STATE_FILE)
                .unwrap_or_else(|| DEFAULT_STATE_FILE.to_string())
                .into(),
            oilfield_api: OilfieldApiConfig {
                base_url,
                token_url,
                client_id,
                client_secret,
                cache_ttl_secs: parsed_var(ENV_CACHE_TTL).unwrap_or(DEFAULT_CACHE_TTL_SECS),
                timeout_secs: parsed_var(ENV_TIMEOUT).unwrap_or(DEFAULT_TIMEOUT_SECS),
            },
        }
    }
}

fn non_empty_var(name: &str) -> Option<String> {
    env::var(name)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

fn parsed_var(name: &str) -> Option<u64> {
    let raw = non_empty_var(name)?;
    match raw.parse() {
        Ok(value) => Some(value),
        Err(_) => {
            tracing::warn!("{} is not a number ({}), using default", name, raw);
            None
        }
    }
}
