//! Runtime configuration, read from the environment (and `.env` via dotenv).

use anyhow::{Context, Result};
use chrono_tz::Tz;
use std::env;
use std::str::FromStr;
use std::time::Duration;
use tracing::{info, warn};

use crate::scheduling::constants::*;

#[derive(Debug, Clone)]
pub struct Config {
    pub api_key: Option<String>,
    pub api_url: String,
    pub event_type_id: u64,
    pub event_type_slug: String,
    pub duration_minutes: u32,
    pub window_days: i64,
    pub timeout: Option<Duration>,
    /// Zone slot times are rendered and categorized in
    pub slot_zone: Tz,
    /// Zone conversational phrases are interpreted in
    pub source_zone: Tz,
    /// Zone suggestion annotations are shown in
    pub display_zone: Tz,
    pub host: String,
    pub port: u16,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_key: None,
            api_url: DEFAULT_API_URL.to_string(),
            event_type_id: DEFAULT_EVENT_TYPE_ID,
            event_type_slug: DEFAULT_EVENT_TYPE_SLUG.to_string(),
            duration_minutes: DEFAULT_DURATION_MINUTES,
            window_days: DEFAULT_WINDOW_DAYS,
            timeout: None,
            slot_zone: chrono_tz::America::Toronto,
            source_zone: chrono_tz::Australia::Sydney,
            display_zone: chrono_tz::Australia::Sydney,
            host: DEFAULT_HOST.to_string(),
            port: DEFAULT_PORT,
        }
    }
}

impl Config {
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Builds a config from any key lookup; unset keys keep their defaults.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).map(|v| v.trim().to_string()).filter(|v| !v.is_empty());
        let mut config = Self::default();

        config.api_key = get("CALCOM_API_KEY");
        if config.api_key.is_none() {
            warn!("CALCOM_API_KEY is not set, slot fetches will fail");
        }

        if let Some(url) = get("CALCOM_API_URL") {
            config.api_url = url.trim_end_matches('/').to_string();
        }
        if let Some(slug) = get("CALCOM_EVENT_TYPE_SLUG") {
            config.event_type_slug = slug;
        }
        if let Some(host) = get("HOST") {
            config.host = host;
        }

        config.event_type_id = parse_or(get("CALCOM_EVENT_TYPE_ID"), "CALCOM_EVENT_TYPE_ID", config.event_type_id)?;
        config.duration_minutes =
            parse_or(get("SLOT_DURATION_MINUTES"), "SLOT_DURATION_MINUTES", config.duration_minutes)?;
        config.window_days = parse_or(get("SLOT_WINDOW_DAYS"), "SLOT_WINDOW_DAYS", config.window_days)?;
        config.port = parse_or(get("PORT"), "PORT", config.port)?;

        if let Some(secs) = get("CALCOM_TIMEOUT_SECS") {
            let secs: u64 = secs
                .parse()
                .with_context(|| format!("CALCOM_TIMEOUT_SECS must be a number, got {secs:?}"))?;
            config.timeout = Some(Duration::from_secs(secs));
        }

        config.slot_zone = parse_or(get("SLOT_TIMEZONE"), "SLOT_TIMEZONE", config.slot_zone)?;
        config.source_zone = parse_or(get("SOURCE_TIMEZONE"), "SOURCE_TIMEZONE", config.source_zone)?;
        config.display_zone = parse_or(get("DISPLAY_TIMEZONE"), "DISPLAY_TIMEZONE", config.display_zone)?;

        info!(
            api_url = %config.api_url,
            event_type_id = config.event_type_id,
            slot_zone = %config.slot_zone,
            source_zone = %config.source_zone,
            display_zone = %config.display_zone,
            "configuration loaded"
        );

        Ok(config)
    }
}

fn parse_or<T>(value: Option<String>, key: &str, default: T) -> Result<T>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    match value {
        Some(raw) => raw
            .parse()
            .map_err(|e| anyhow::anyhow!("invalid {key} {raw:?}: {e}")),
        None => Ok(default),
    }
}
