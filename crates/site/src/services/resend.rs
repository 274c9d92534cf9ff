//! Resend API client for transactional email.
//!
//! Sends one email per call through `POST /emails`. No retries; a timeout
//! is reported as [`ProviderError::Timeout`].

use std::time::Duration;

use async_trait::async_trait;
use reqwest::header::{AUTHORIZATION, CONTENT_TYPE, HeaderMap, HeaderValue};
use secrecy::ExposeSecret;
use serde::{Deserialize, Serialize};
use tracing::instrument;

use crate::config::ResendConfig;

use super::email::{EmailProvider, OutboundEmail, ProviderError, SentEmail};

/// Resend API client.
#[derive(Clone)]
pub struct ResendClient {
    client: reqwest::Client,
    endpoint: String,
    timeout: Duration,
}

impl ResendClient {
    /// Create a new Resend API client.
    ///
    /// # Errors
    ///
    /// Returns error if the API key is not a valid header value or the HTTP
    /// client fails to build.
    pub fn new(config: &ResendConfig, timeout: Duration) -> Result<Self, ProviderError> {
        let mut headers = HeaderMap::new();

        let auth_value = format!("Bearer {}", config.api_key.expose_secret());
        let mut auth_header = HeaderValue::from_str(&auth_value)
            .map_err(|e| ProviderError::InvalidConfig(format!("Invalid API key format: {e}")))?;
        auth_header.set_sensitive(true);
        headers.insert(AUTHORIZATION, auth_header);
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));

        let client = reqwest::Client::builder()
            .default_headers(headers)
            .timeout(timeout)
            .build()?;

        Ok(Self {
            client,
            endpoint: format!("{}/emails", config.api_url.trim_end_matches('/')),
            timeout,
        })
    }

    fn map_send_error(&self, err: reqwest::Error) -> ProviderError {
        if err.is_timeout() {
            ProviderError::Timeout(self.timeout)
        } else {
            ProviderError::Http(err)
        }
    }
}

#[async_trait]
impl EmailProvider for ResendClient {
    #[instrument(skip(self, email), fields(provider = "resend", subject = %email.subject))]
    async fn send(&self, email: &OutboundEmail) -> Result<SentEmail, ProviderError> {
        let body = SendEmailRequest {
            from: &email.from,
            to: [&email.to],
            subject: &email.subject,
            html: &email.html,
            reply_to: &email.reply_to,
        };

        let response = self
            .client
            .post(&self.endpoint)
            .json(&body)
            .send()
            .await
            .map_err(|e| self.map_send_error(e))?;
        let status = response.status();

        if !status.is_success() {
            let text = response.text().await.unwrap_or_default();
            let message = serde_json::from_str::<ResendErrorResponse>(&text)
                .ok()
                .and_then(|e| e.message)
                .unwrap_or(text);
            return Err(ProviderError::Api {
                status: status.as_u16(),
                message,
            });
        }

        let sent: SendEmailResponse = response
            .json()
            .await
            .map_err(|e| ProviderError::Parse(e.to_string()))?;

        tracing::debug!(id = ?sent.id, "Resend accepted email");
        Ok(SentEmail { id: sent.id })
    }

    fn provider_name(&self) -> &'static str {
        "resend"
    }
}

/// Request body for `POST /emails`.
#[derive(Debug, Serialize)]
struct SendEmailRequest<'a> {
    from: &'a str,
    to: [&'a str; 1],
    subject: &'a str,
    html: &'a str,
    reply_to: &'a str,
}

/// Success body for `POST /emails`.
#[derive(Debug, Deserialize)]
struct SendEmailResponse {
    #[serde(default)]
    id: Option<String>,
}

/// Error body returned by the Resend API.
#[derive(Debug, Deserialize)]
struct ResendErrorResponse {
    #[serde(default)]
    message: Option<String>,
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use secrecy::SecretString;

    use super::*;

    fn config(api_url: &str) -> ResendConfig {
        ResendConfig {
            api_key: SecretString::from("re_test_key"),
            api_url: api_url.to_string(),
        }
    }

    #[test]
    fn test_endpoint_strips_trailing_slash() {
        let client = ResendClient::new(&config("https://api.resend.com/"), Duration::from_secs(1))
            .unwrap();
        assert_eq!(client.endpoint, "https://api.resend.com/emails");
    }

    #[test]
    fn test_invalid_api_key_rejected() {
        let bad = ResendConfig {
            api_key: SecretString::from("re_key\nInjected: header"),
            api_url: "https://api.resend.com".to_string(),
        };
        let result = ResendClient::new(&bad, Duration::from_secs(1));
        assert!(matches!(result, Err(ProviderError::InvalidConfig(_))));
    }

    #[test]
    fn test_request_body_shape() {
        let body = SendEmailRequest {
            from: "site@example.com",
            to: ["me@example.com"],
            subject: "New contact form message from Ada",
            html: "<div></div>",
            reply_to: "ada@example.com",
        };
        let value = serde_json::to_value(&body).unwrap();
        assert_eq!(value["from"], "site@example.com");
        assert_eq!(value["to"][0], "me@example.com");
        assert_eq!(value["reply_to"], "ada@example.com");
        assert_eq!(value["html"], "<div></div>");
    }

    #[test]
    fn test_response_without_id() {
        let sent: SendEmailResponse = serde_json::from_str("{}").unwrap();
        assert!(sent.id.is_none());
    }

    #[test]
    fn test_error_response_message() {
        let err: ResendErrorResponse = serde_json::from_str(
            r#"{"statusCode":422,"name":"validation_error","message":"Invalid `from` field."}"#,
        )
        .unwrap();
        assert_eq!(err.message.as_deref(), Some("Invalid `from` field."));
    }
}
