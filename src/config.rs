//! Endpoint and timing configuration.

use crate::error::ConfigError;
use std::env;
use std::time::Duration;

/// Wait between an `rsvpUpdated` signal and the re-fetch it triggers.
///
/// The guest sheet is eventually consistent; this is a best-effort wait for a
/// just-submitted RSVP to become readable, not a guarantee.
pub const DEFAULT_SETTLE_DELAY: Duration = Duration::from_millis(2000);

/// Per-request timeout for list fetches.
pub const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

pub const DEFAULT_BASE_URL: &str = "http://localhost:3000";
pub const GUESTS_PATH: &str = "/api/guests";
pub const SPONSORS_PATH: &str = "/api/principal-sponsor";

pub const ENV_BASE_URL: &str = "RSVPFOLD_BASE_URL";
pub const ENV_TIMEOUT_MS: &str = "RSVPFOLD_TIMEOUT_MS";
pub const ENV_SETTLE_DELAY_MS: &str = "RSVPFOLD_SETTLE_DELAY_MS";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub base_url: String,
    pub guests_path: String,
    pub sponsors_path: String,
    pub request_timeout: Duration,
    pub settle_delay: Duration,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            base_url: DEFAULT_BASE_URL.to_string(),
            guests_path: GUESTS_PATH.to_string(),
            sponsors_path: SPONSORS_PATH.to_string(),
            request_timeout: DEFAULT_REQUEST_TIMEOUT,
            settle_delay: DEFAULT_SETTLE_DELAY,
        }
    }
}

impl Config {
    /// Defaults, overridden by `RSVPFOLD_BASE_URL`, `RSVPFOLD_TIMEOUT_MS` and
    /// `RSVPFOLD_SETTLE_DELAY_MS` when set.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidValue`] if a millisecond variable is not
    /// an unsigned integer, or if the timeout is zero. A zero settle delay is
    /// allowed and re-fetches right after the signal.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|var| env::var(var).ok())
    }

    /// Same as [`Config::from_env`], reading variables through `lookup`.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&'static str) -> Option<String>,
    {
        let mut config = Config::default();
        if let Some(url) = lookup(ENV_BASE_URL) {
            config.base_url = url;
        }
        if let Some(ms) = lookup(ENV_TIMEOUT_MS) {
            config.request_timeout = parse_timeout(ENV_TIMEOUT_MS, ms)?;
        }
        if let Some(ms) = lookup(ENV_SETTLE_DELAY_MS) {
            config.settle_delay = parse_millis(ENV_SETTLE_DELAY_MS, ms)?;
        }
        Ok(config)
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    pub fn with_request_timeout(mut self, timeout: Duration) -> Self {
        self.request_timeout = timeout;
        self
    }

    pub fn with_settle_delay(mut self, delay: Duration) -> Self {
        self.settle_delay = delay;
        self
    }

    pub fn guests_url(&self) -> String {
        join_url(&self.base_url, &self.guests_path)
    }

    pub fn sponsors_url(&self) -> String {
        join_url(&self.base_url, &self.sponsors_path)
    }
}

fn parse_millis(var: &'static str, value: String) -> Result<Duration, ConfigError> {
    value
        .trim()
        .parse::<u64>()
        .map(Duration::from_millis)
        .map_err(|_| ConfigError::InvalidValue { var, value })
}

/// A zero timeout would fail every request before it is sent.
fn parse_timeout(var: &'static str, value: String) -> Result<Duration, ConfigError> {
    let timeout = parse_millis(var, value.clone())?;
    if timeout.is_zero() {
        return Err(ConfigError::InvalidValue { var, value });
    }
    Ok(timeout)
}

fn join_url(base: &str, path: &str) -> String {
    format!(
        "{}/{}",
        base.trim_end_matches('/'),
        path.trim_start_matches('/')
    )
}
