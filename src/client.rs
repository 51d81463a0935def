use crate::config::Config;
use crate::error::FetchError;
use crate::guest::GuestRecord;
use crate::sponsor::PrincipalSponsor;
use async_trait::async_trait;
use reqwest::header::{CACHE_CONTROL, HeaderMap, HeaderValue, PRAGMA};
use serde::de::DeserializeOwned;
use std::time::Duration;

/// Anything that can produce the current guest list.
///
/// The stats view only talks to this trait, so it can be driven by the HTTP
/// client or by an in-memory source.
#[async_trait]
pub trait GuestSource: Send + Sync {
    /// Fetch the full guest list as it is right now.
    ///
    /// # Errors
    ///
    /// Fails as a whole; implementations never return a partial list.
    async fn fetch_guests(&self) -> Result<Vec<GuestRecord>, FetchError>;
}

/// HTTP client for the guest and principal-sponsor list endpoints.
///
/// Every request carries `Cache-Control: no-cache, no-store, max-age=0` and
/// `Pragma: no-cache`, so intermediaries revalidate against the sheet instead
/// of serving a stored copy. Calls share nothing but the connection pool and
/// may overlap freely.
#[derive(Debug, Clone)]
pub struct GuestDataClient {
    http: reqwest::Client,
    guests_url: String,
    sponsors_url: String,
    timeout: Duration,
}

impl GuestDataClient {
    /// Build a client for the endpoints in `config`.
    ///
    /// # Errors
    ///
    /// Returns [`FetchError::Transport`] if the TLS backend or resolver
    /// cannot be initialized.
    pub fn new(config: &Config) -> Result<Self, FetchError> {
        let mut headers = HeaderMap::new();
        headers.insert(
            CACHE_CONTROL,
            HeaderValue::from_static("no-cache, no-store, max-age=0"),
        );
        headers.insert(PRAGMA, HeaderValue::from_static("no-cache"));

        let http = reqwest::Client::builder()
            .timeout(config.request_timeout)
            .default_headers(headers)
            .build()
            .map_err(FetchError::Transport)?;

        Ok(GuestDataClient {
            http,
            guests_url: config.guests_url(),
            sponsors_url: config.sponsors_url(),
            timeout: config.request_timeout,
        })
    }

    /// `GET /api/guests`.
    pub async fn fetch_guests(&self) -> Result<Vec<GuestRecord>, FetchError> {
        self.fetch_list(&self.guests_url, "guest list").await
    }

    /// `GET /api/principal-sponsor`.
    pub async fn fetch_sponsors(&self) -> Result<Vec<PrincipalSponsor>, FetchError> {
        self.fetch_list(&self.sponsors_url, "principal sponsors")
            .await
    }

    async fn fetch_list<T: DeserializeOwned>(
        &self,
        url: &str,
        resource: &'static str,
    ) -> Result<Vec<T>, FetchError> {
        log::debug!("fetching {resource} from {url}");

        let response = self
            .http
            .get(url)
            .send()
            .await
            .map_err(|e| FetchError::from_reqwest(e, self.timeout))?;

        let status = response.status();
        if !status.is_success() {
            log::warn!("{resource} endpoint answered HTTP {}", status.as_u16());
            return Err(FetchError::Status {
                resource,
                status: status.as_u16(),
            });
        }

        // Read the whole body before parsing so a truncated or garbled
        // payload fails the fetch instead of yielding a prefix of the list.
        let body = response
            .bytes()
            .await
            .map_err(|e| FetchError::from_reqwest(e, self.timeout))?;
        let items: Vec<T> = serde_json::from_slice(&body)?;

        log::debug!("fetched {} {resource} rows", items.len());
        Ok(items)
    }
}

#[async_trait]
impl GuestSource for GuestDataClient {
    async fn fetch_guests(&self) -> Result<Vec<GuestRecord>, FetchError> {
        GuestDataClient::fetch_guests(self).await
    }
}
