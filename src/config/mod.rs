use std::env;

use crate::ingestion::page_fetcher::{DEFAULT_MAX_PAGE_BYTES, DEFAULT_USER_AGENT};
use crate::threeds::client::{DEFAULT_API_BASE, DEFAULT_API_HOST};

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub database_url: String,
    pub host: String,
    pub port: u16,

    /// Bearer token for /api routes. None disables auth (dev mode).
    pub api_token: Option<String>,

    // 3DS lookup service (RapidAPI)
    pub threeds_api_key: Option<String>,
    pub threeds_api_host: String,
    pub threeds_base_url: String,
    pub oracle_timeout_secs: u64,

    // Page fetching
    pub fetch_timeout_secs: u64,
    pub fetch_user_agent: String,
    pub fetch_max_bytes: usize,

    /// Rows loaded for the history and export views.
    pub record_list_limit: i64,
}

impl AppConfig {
    pub fn from_env() -> anyhow::Result<Self> {
        Ok(Self {
            database_url: env::var("DATABASE_URL")
                .map_err(|_| anyhow::anyhow!("DATABASE_URL must be set"))?,
            host: env::var("HOST").unwrap_or_else(|_| "0.0.0.0".into()),
            port: env::var("PORT")
                .unwrap_or_else(|_| "8080".into())
                .parse()?,

            api_token: non_empty_var("API_TOKEN"),

            threeds_api_key: non_empty_var("THREEDS_API_KEY"),
            threeds_api_host: env::var("THREEDS_API_HOST")
                .unwrap_or_else(|_| DEFAULT_API_HOST.into()),
            threeds_base_url: env::var("THREEDS_BASE_URL")
                .unwrap_or_else(|_| DEFAULT_API_BASE.into()),
            oracle_timeout_secs: env::var("ORACLE_TIMEOUT_SECS")
                .unwrap_or_else(|_| "10".into())
                .parse()
                .unwrap_or(10),

            fetch_timeout_secs: env::var("FETCH_TIMEOUT_SECS")
                .unwrap_or_else(|_| "10".into())
                .parse()
                .unwrap_or(10),
            fetch_user_agent: env::var("FETCH_USER_AGENT")
                .unwrap_or_else(|_| DEFAULT_USER_AGENT.into()),
            fetch_max_bytes: env::var("FETCH_MAX_BYTES")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(DEFAULT_MAX_PAGE_BYTES),

            record_list_limit: env::var("RECORD_LIST_LIMIT")
                .unwrap_or_else(|_| "100".into())
                .parse()
                .unwrap_or(100),
        })
    }

    /// Returns true if the 3DS lookup API key is configured.
    pub fn has_oracle_credentials(&self) -> bool {
        self.threeds_api_key.is_some()
    }
}

fn non_empty_var(key: &str) -> Option<String> {
    env::var(key).ok().filter(|v| !v.trim().is_empty())
}
