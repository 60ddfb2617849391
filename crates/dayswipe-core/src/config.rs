//! Configuration for triage sessions and the task API client.
//!
//! Read from environment variables:
//! - `DAYSWIPE_API_URL` - Optional. Base URL of the task API. Unset means offline.
//! - `DAYSWIPE_SWIPE_THRESHOLD` - Optional. Release threshold. Defaults to `100`.
//! - `DAYSWIPE_ADVANCE_DELAY_MS` - Optional. Exit animation delay. Defaults to `300`.
//! - `DAYSWIPE_REQUEST_TIMEOUT_MS` - Optional. HTTP timeout. Defaults to `10000`.

use std::str::FromStr;
use std::time::Duration;

use crate::domain::ConfigError;
use crate::gesture::DEFAULT_SWIPE_THRESHOLD;

pub const DEFAULT_ADVANCE_DELAY: Duration = Duration::from_millis(300);
pub const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

pub const ENV_API_URL: &str = "DAYSWIPE_API_URL";
pub const ENV_SWIPE_THRESHOLD: &str = "DAYSWIPE_SWIPE_THRESHOLD";
pub const ENV_ADVANCE_DELAY_MS: &str = "DAYSWIPE_ADVANCE_DELAY_MS";
pub const ENV_REQUEST_TIMEOUT_MS: &str = "DAYSWIPE_REQUEST_TIMEOUT_MS";

/// Session behaviour.
#[derive(Debug, Clone, PartialEq)]
pub struct SessionConfig {
    /// Offsets strictly beyond this commit on release.
    pub swipe_threshold: f64,

    /// Pause between a commit and the next card, for the exit animation.
    pub advance_delay: Duration,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            swipe_threshold: DEFAULT_SWIPE_THRESHOLD,
            advance_delay: DEFAULT_ADVANCE_DELAY,
        }
    }
}

/// Task API client settings.
#[derive(Debug, Clone, PartialEq)]
pub struct ApiConfig {
    pub base_url: String,
    pub request_timeout: Duration,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct TriageConfig {
    pub session: SessionConfig,

    /// `None` when no API is configured.
    pub api: Option<ApiConfig>,
}

impl TriageConfig {
    /// Load configuration from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load configuration through an arbitrary key lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let swipe_threshold: f64 =
            parse_or(&lookup, ENV_SWIPE_THRESHOLD, DEFAULT_SWIPE_THRESHOLD)?;
        if !swipe_threshold.is_finite() || swipe_threshold <= 0.0 {
            return Err(ConfigError::InvalidValue {
                key: ENV_SWIPE_THRESHOLD.to_string(),
                reason: "must be a positive number".to_string(),
            });
        }

        let advance_delay = Duration::from_millis(parse_or(
            &lookup,
            ENV_ADVANCE_DELAY_MS,
            DEFAULT_ADVANCE_DELAY.as_millis() as u64,
        )?);

        let request_timeout = Duration::from_millis(parse_or(
            &lookup,
            ENV_REQUEST_TIMEOUT_MS,
            DEFAULT_REQUEST_TIMEOUT.as_millis() as u64,
        )?);

        let api = lookup(ENV_API_URL)
            .map(|url| url.trim().to_string())
            .filter(|url| !url.is_empty())
            .map(|base_url| ApiConfig {
                base_url,
                request_timeout,
            });

        Ok(Self {
            session: SessionConfig {
                swipe_threshold,
                advance_delay,
            },
            api,
        })
    }
}

fn parse_or<F, T>(lookup: &F, key: &str, default: T) -> Result<T, ConfigError>
where
    F: Fn(&str) -> Option<String>,
    T: FromStr,
    T::Err: std::fmt::Display,
{
    match lookup(key) {
        None => Ok(default),
        Some(raw) => raw.trim().parse().map_err(|e: T::Err| ConfigError::InvalidValue {
            key: key.to_string(),
            reason: e.to_string(),
        }),
    }
}
