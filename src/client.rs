//! Content fetcher for the Gofile REST API.

use std::time::Duration;

use serde::Deserialize;

use crate::content::ContentEnvelope;
use crate::error::{Error, Result};
use crate::url::extract_content_id;

/// Base URL of the public contents API.
pub const API_BASE: &str = "https://api.gofile.io";

/// Builds the HTTP client used for listing and token requests.
fn build_http_client() -> reqwest::Result<reqwest::Client> {
    reqwest::Client::builder()
        .pool_idle_timeout(Duration::from_secs(60))
        .pool_max_idle_per_host(8)
        .tcp_keepalive(Duration::from_secs(30))
        .build()
}

/// Client for resolving a share link to its content listing.
pub struct GofileClient {
    http: reqwest::Client,
    api_base: String,
}

impl GofileClient {
    /// Creates a client against the public API.
    ///
    /// # Errors
    ///
    /// Returns an error if the underlying HTTP client cannot be built.
    pub fn new() -> Result<Self> {
        Ok(Self::with_base(build_http_client()?, API_BASE))
    }

    /// Creates a client against a custom API base.
    #[must_use]
    pub fn with_base(http: reqwest::Client, api_base: impl Into<String>) -> Self {
        Self {
            http,
            api_base: api_base.into(),
        }
    }

    /// Returns a clone of the underlying HTTP client, for sharing the
    /// connection pool with the downloader.
    #[must_use]
    pub fn http(&self) -> reqwest::Client {
        self.http.clone()
    }

    fn contents_url(&self, id: &str) -> String {
        format!("{}/contents/{id}", self.api_base)
    }

    /// Fetches the content listing behind a share link.
    ///
    /// Resolves the content identifier from `url`, then performs exactly
    /// one GET against the contents endpoint, attaching the password as a
    /// bearer token when supplied. Never retries.
    ///
    /// # Errors
    ///
    /// - [`Error::InvalidUrl`] when no identifier can be extracted.
    /// - [`Error::Http`] on transport errors or a non-success status.
    /// - [`Error::Decode`] when the body does not match the envelope shape.
    /// - [`Error::Status`] when the envelope's status is not `"ok"`.
    /// - [`Error::PasswordRequired`] when the listing is locked and no
    ///   password was supplied. The caller prompts and re-invokes; the
    ///   two-phase protocol is caller-driven.
    pub async fn fetch_contents(
        &self,
        url: &str,
        password: Option<&str>,
    ) -> Result<ContentEnvelope> {
        let id = extract_content_id(url).ok_or_else(|| Error::InvalidUrl(url.to_string()))?;
        let endpoint = self.contents_url(id);
        log::debug!("fetching contents for {id} from {endpoint}");

        let mut req = self
            .http
            .get(&endpoint)
            .header(reqwest::header::CONTENT_TYPE, "application/json");
        if let Some(pw) = password {
            req = req.bearer_auth(pw);
        }

        let resp = req.send().await?.error_for_status()?;
        let body = resp.text().await?;
        let envelope: ContentEnvelope = serde_json::from_str(&body)?;
        validate_envelope(envelope, password.is_some())
    }

    /// Fetches a bearer token from a token-proxy endpoint.
    ///
    /// # Errors
    ///
    /// Returns an error on transport failure or when the body does not
    /// carry a `token` field.
    pub async fn fetch_token(&self, endpoint: &str) -> Result<String> {
        #[derive(Deserialize)]
        struct TokenResponse {
            token: String,
        }

        let resp = self.http.get(endpoint).send().await?.error_for_status()?;
        let body = resp.text().await?;
        let parsed: TokenResponse = serde_json::from_str(&body)?;
        Ok(parsed.token)
    }
}

/// Applies the status and password gates to a decoded envelope.
fn validate_envelope(envelope: ContentEnvelope, password_supplied: bool) -> Result<ContentEnvelope> {
    if !envelope.is_ok() {
        return Err(Error::Status(envelope.status));
    }
    if envelope.data.is_password && !password_supplied {
        return Err(Error::PasswordRequired);
    }
    Ok(envelope)
}
