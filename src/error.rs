use std::time::Duration;
use thiserror::Error;

/// Failure of a single list fetch.
///
/// Every variant fails the whole fetch; callers never see a partial record
/// list. The `Display` text is what the stats panel shows to the user.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum FetchError {
    /// The request could not be sent or the body could not be read.
    #[error("network error: {0}")]
    Transport(#[source] reqwest::Error),

    /// No response arrived within the configured request timeout.
    #[error("request timed out after {0:?}")]
    Timeout(Duration),

    /// The endpoint answered with a non-2xx status.
    #[error("failed to fetch {resource} (HTTP {status})")]
    Status {
        resource: &'static str,
        status: u16,
    },

    /// The body was not a JSON array of the expected objects.
    #[error("malformed response body: {0}")]
    Parse(#[from] serde_json::Error),
}

impl FetchError {
    pub(crate) fn from_reqwest(err: reqwest::Error, timeout: Duration) -> Self {
        if err.is_timeout() {
            FetchError::Timeout(timeout)
        } else {
            FetchError::Transport(err)
        }
    }
}

/// An environment override could not be parsed.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ConfigError {
    #[error("invalid value {value:?} for {var}: expected a whole number of milliseconds")]
    InvalidValue { var: &'static str, value: String },
}
