//! Transport seam between the form and the contact endpoint.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::header::CONTENT_TYPE;
use thiserror::Error;
use tracing::instrument;
use url::Url;

use portfolio_core::ContactSubmission;

/// Path of the contact endpoint, relative to the site base URL.
pub const CONTACT_PATH: &str = "/api/contact";

/// Errors that prevent a response from being received.
#[derive(Debug, Error)]
pub enum TransportError {
    /// HTTP request failed before a response arrived.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// No response within the configured timeout.
    #[error("request timed out")]
    Timeout,

    /// The site base URL could not be turned into an endpoint.
    #[error("Invalid site URL: {0}")]
    InvalidUrl(String),
}

/// Raw response from the contact endpoint.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransportResponse {
    pub status: u16,
    pub body: String,
}

impl TransportResponse {
    /// Whether the status is 2xx.
    #[must_use]
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Sends one JSON submission and returns whatever the server answered.
#[async_trait]
pub trait SubmitTransport: Send + Sync {
    async fn post_json(
        &self,
        submission: &ContactSubmission,
    ) -> Result<TransportResponse, TransportError>;
}

/// reqwest transport for `POST {base}/api/contact`.
///
/// One request per call, no retries. Once the status line has arrived the
/// call succeeds; a body that fails to read is returned as empty.
#[derive(Debug, Clone)]
pub struct HttpTransport {
    client: reqwest::Client,
    endpoint: Url,
}

impl HttpTransport {
    /// Create a transport for the site at `base_url`.
    ///
    /// # Errors
    ///
    /// Returns error if the URL is invalid or the HTTP client fails to build.
    pub fn new(base_url: &str, timeout: Option<Duration>) -> Result<Self, TransportError> {
        let endpoint = format!("{}{CONTACT_PATH}", base_url.trim_end_matches('/'));
        let endpoint = Url::parse(&endpoint)
            .map_err(|e| TransportError::InvalidUrl(format!("{base_url}: {e}")))?;

        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }

        Ok(Self {
            client: builder.build()?,
            endpoint,
        })
    }

    /// The full contact endpoint URL.
    #[must_use]
    pub const fn endpoint(&self) -> &Url {
        &self.endpoint
    }
}

#[async_trait]
impl SubmitTransport for HttpTransport {
    #[instrument(skip(self, submission), fields(endpoint = %self.endpoint))]
    async fn post_json(
        &self,
        submission: &ContactSubmission,
    ) -> Result<TransportResponse, TransportError> {
        let response = self
            .client
            .post(self.endpoint.clone())
            .header(CONTENT_TYPE, "application/json")
            .json(submission)
            .send()
            .await
            .map_err(map_error)?;

        let status = response.status().as_u16();
        let body = response.text().await.unwrap_or_else(|e| {
            tracing::warn!(status, error = %e, "Failed to read contact response body");
            String::new()
        });

        tracing::debug!(status, "Contact endpoint responded");
        Ok(TransportResponse { status, body })
    }
}

fn map_error(err: reqwest::Error) -> TransportError {
    if err.is_timeout() {
        TransportError::Timeout
    } else {
        TransportError::Http(err)
    }
}
