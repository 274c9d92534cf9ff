//! Integration test harness for the portfolio contact relay.
//!
//! Runs the real site router on an ephemeral port, pointed at a fake Resend
//! API that records every request it receives.
//!
//! # Running Tests
//!
//! ```bash
//! cargo test -p portfolio-integration-tests
//! ```

use std::collections::HashMap;
use std::net::SocketAddr;
use std::sync::{Arc, Mutex, PoisonError};
use std::time::Duration;

use axum::{
    Json, Router,
    extract::State,
    http::{HeaderMap, StatusCode, header::AUTHORIZATION},
    response::{IntoResponse, Response},
    routing::post,
};
use serde_json::{Value, json};

use portfolio_site::{app, config::SiteConfig, state::AppState};

/// API key the site is configured with.
pub const TEST_API_KEY: &str = "re_integration_test";
/// Configured destination address.
pub const TEST_TO: &str = "owner@example.com";
/// Configured sender address.
pub const TEST_FROM: &str = "contact@example.com";

/// How the fake Resend API answers.
#[derive(Debug, Clone)]
pub enum ResendBehaviour {
    /// 200 with `{"id": ...}`.
    Accept(&'static str),
    /// The given status with `{"message": ...}`.
    Reject(u16, &'static str),
    /// Never answers.
    Hang,
}

/// One request received by the fake Resend API.
#[derive(Debug, Clone)]
pub struct RecordedRequest {
    pub authorization: Option<String>,
    pub body: Value,
}

#[derive(Clone)]
struct FakeState {
    behaviour: ResendBehaviour,
    requests: Arc<Mutex<Vec<RecordedRequest>>>,
}

/// A fake Resend API listening on localhost.
pub struct FakeResend {
    addr: SocketAddr,
    requests: Arc<Mutex<Vec<RecordedRequest>>>,
}

impl FakeResend {
    /// Start a fake Resend API.
    ///
    /// # Errors
    ///
    /// Returns an error if the listener cannot be bound.
    pub async fn start(behaviour: ResendBehaviour) -> std::io::Result<Self> {
        let requests = Arc::new(Mutex::new(Vec::new()));
        let state = FakeState {
            behaviour,
            requests: Arc::clone(&requests),
        };
        let router = Router::new()
            .route("/emails", post(fake_send))
            .with_state(state);

        let addr = serve(router).await?;
        Ok(Self { addr, requests })
    }

    /// Base URL to configure as `RESEND_API_URL`.
    #[must_use]
    pub fn url(&self) -> String {
        format!("http://{}", self.addr)
    }

    /// Requests received so far.
    #[must_use]
    pub fn requests(&self) -> Vec<RecordedRequest> {
        self.requests
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
}

async fn fake_send(
    State(state): State<FakeState>,
    headers: HeaderMap,
    Json(body): Json<Value>,
) -> Response {
    let authorization = headers
        .get(AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .map(String::from);
    state
        .requests
        .lock()
        .unwrap_or_else(PoisonError::into_inner)
        .push(RecordedRequest {
            authorization,
            body,
        });

    match state.behaviour {
        ResendBehaviour::Accept(id) => Json(json!({ "id": id })).into_response(),
        ResendBehaviour::Reject(status, message) => (
            StatusCode::from_u16(status).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR),
            Json(json!({ "statusCode": status, "name": "error", "message": message })),
        )
            .into_response(),
        ResendBehaviour::Hang => std::future::pending().await,
    }
}

/// A running site.
pub struct TestSite {
    addr: SocketAddr,
}

impl TestSite {
    /// Start the site with the given environment.
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration is invalid or the listener
    /// cannot be bound.
    pub async fn start(vars: &[(&str, String)]) -> Result<Self, Box<dyn std::error::Error>> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| ((*k).to_string(), v.clone()))
            .collect();
        let config = SiteConfig::from_source(|key| vars.get(key).cloned())?;
        let state = AppState::new(config)?;

        let addr = serve(app(state)).await?;
        Ok(Self { addr })
    }

    /// Start the site fully configured against `resend`.
    ///
    /// # Errors
    ///
    /// See [`TestSite::start`].
    pub async fn relaying_to(
        resend: &FakeResend,
        send_timeout: Duration,
    ) -> Result<Self, Box<dyn std::error::Error>> {
        Self::start(&[
            ("RESEND_API_KEY", TEST_API_KEY.to_string()),
            ("RESEND_API_URL", resend.url()),
            ("CONTACT_TO_EMAIL", TEST_TO.to_string()),
            ("CONTACT_FROM_EMAIL", TEST_FROM.to_string()),
            (
                "EMAIL_SEND_TIMEOUT_SECS",
                send_timeout.as_secs().max(1).to_string(),
            ),
        ])
        .await
    }

    /// Base URL of the site.
    #[must_use]
    pub fn url(&self) -> String {
        format!("http://{}", self.addr)
    }

    /// Full URL of the contact endpoint.
    #[must_use]
    pub fn contact_url(&self) -> String {
        format!("{}/api/contact", self.url())
    }
}

async fn serve(router: Router) -> std::io::Result<SocketAddr> {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await?;
    let addr = listener.local_addr()?;
    tokio::spawn(async move {
        let _ = axum::serve(listener, router).await;
    });
    Ok(addr)
}
