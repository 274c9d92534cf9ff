//! Site configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! ## Contact relay
//! - `RESEND_API_KEY` - Resend API key
//! - `CONTACT_TO_EMAIL` - Address that receives contact messages
//! - `CONTACT_FROM_EMAIL` - Verified sender address
//!
//! These are optional at startup. When any is missing the server still runs,
//! and `POST /api/contact` answers 500 until it is configured.
//!
//! ## Optional
//! - `SITE_HOST` - Bind address (default: 127.0.0.1)
//! - `SITE_PORT` - Listen port (default: 3000)
//! - `SITE_STATIC_DIR` - Pre-built front-end bundle (default: static)
//! - `RESEND_API_URL` - Resend API base URL (default: <https://api.resend.com>)
//! - `EMAIL_SEND_TIMEOUT_SECS` - Upper bound on one provider call (default: 10)
//! - `SENTRY_DSN` - Sentry error tracking DSN
//! - `SENTRY_ENVIRONMENT` - Sentry environment name
//! - `SENTRY_SAMPLE_RATE` - Error sample rate (default: 1.0)
//! - `SENTRY_TRACES_SAMPLE_RATE` - Trace sample rate (default: 0.0)

use std::net::{IpAddr, SocketAddr};
use std::path::PathBuf;
use std::time::Duration;

use secrecy::SecretString;
use thiserror::Error;

/// Default Resend API base URL.
pub const DEFAULT_RESEND_API_URL: &str = "https://api.resend.com";

const DEFAULT_SEND_TIMEOUT_SECS: u64 = 10;

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
}

/// Site application configuration.
#[derive(Debug, Clone)]
pub struct SiteConfig {
    /// IP address to bind the server to
    pub host: IpAddr,
    /// Port to listen on
    pub port: u16,
    /// Directory holding the pre-built front-end bundle
    pub static_dir: PathBuf,
    /// Contact relay configuration
    pub contact: ContactConfig,
    /// Sentry DSN for error tracking
    pub sentry_dsn: Option<String>,
    /// Sentry environment name
    pub sentry_environment: Option<String>,
    /// Fraction of errors sent to Sentry
    pub sentry_sample_rate: f32,
    /// Fraction of transactions traced
    pub sentry_traces_sample_rate: f32,
}

/// Contact relay configuration.
#[derive(Debug, Clone)]
pub struct ContactConfig {
    /// Resend credentials, present only when an API key is set
    pub resend: Option<ResendConfig>,
    /// Destination address for contact messages
    pub to_email: Option<String>,
    /// Sender address for contact messages
    pub from_email: Option<String>,
    /// Upper bound on a single provider call
    pub send_timeout: Duration,
}

/// Resend API configuration.
///
/// Implements `Debug` manually to redact the API key.
#[derive(Clone)]
pub struct ResendConfig {
    /// Resend API key
    pub api_key: SecretString,
    /// API base URL, without the `/emails` path
    pub api_url: String,
}

impl std::fmt::Debug for ResendConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ResendConfig")
            .field("api_key", &"[REDACTED]")
            .field("api_url", &self.api_url)
            .finish()
    }
}

impl SiteConfig {
    /// Load configuration from environment variables.
    ///
    /// Calls `dotenvy::dotenv()` to load from `.env` file if present.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a variable is set but cannot be parsed.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();

        Self::from_source(|key| std::env::var(key).ok())
    }

    /// Load configuration from an arbitrary key lookup.
    ///
    /// Empty values are treated as unset.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a variable is set but cannot be parsed.
    pub fn from_source<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let env = Env(lookup);

        let host = env.parse_or("SITE_HOST", IpAddr::from([127, 0, 0, 1]))?;
        let port = env.parse_or("SITE_PORT", 3000_u16)?;
        let static_dir = env
            .optional("SITE_STATIC_DIR")
            .map_or_else(|| PathBuf::from("static"), PathBuf::from);

        Ok(Self {
            host,
            port,
            static_dir,
            contact: ContactConfig::from_env(&env)?,
            sentry_dsn: env.optional("SENTRY_DSN"),
            sentry_environment: env.optional("SENTRY_ENVIRONMENT"),
            sentry_sample_rate: env.parse_or("SENTRY_SAMPLE_RATE", 1.0_f32)?,
            sentry_traces_sample_rate: env.parse_or("SENTRY_TRACES_SAMPLE_RATE", 0.0_f32)?,
        })
    }

    /// Returns the socket address for binding the server.
    #[must_use]
    pub const fn socket_addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }
}

impl ContactConfig {
    fn from_env<F>(env: &Env<F>) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let resend = match env.optional("RESEND_API_KEY") {
            Some(api_key) => {
                let api_url = env
                    .optional("RESEND_API_URL")
                    .unwrap_or_else(|| DEFAULT_RESEND_API_URL.to_string());
                url::Url::parse(&api_url).map_err(|e| {
                    ConfigError::InvalidEnvVar("RESEND_API_URL".to_string(), e.to_string())
                })?;
                Some(ResendConfig {
                    api_key: SecretString::from(api_key),
                    api_url,
                })
            }
            None => None,
        };

        let timeout_secs = env.parse_or("EMAIL_SEND_TIMEOUT_SECS", DEFAULT_SEND_TIMEOUT_SECS)?;
        if timeout_secs == 0 {
            return Err(ConfigError::InvalidEnvVar(
                "EMAIL_SEND_TIMEOUT_SECS".to_string(),
                "must be greater than zero".to_string(),
            ));
        }

        Ok(Self {
            resend,
            to_email: env.optional("CONTACT_TO_EMAIL"),
            from_email: env.optional("CONTACT_FROM_EMAIL"),
            send_timeout: Duration::from_secs(timeout_secs),
        })
    }
}

// =============================================================================
// Helper Functions
// =============================================================================

struct Env<F>(F);

impl<F> Env<F>
where
    F: Fn(&str) -> Option<String>,
{
    /// Get an optional variable, treating blank values as unset.
    fn optional(&self, key: &str) -> Option<String> {
        (self.0)(key)
            .map(|v| v.trim().to_string())
            .filter(|v| !v.is_empty())
    }

    /// Parse a variable, falling back to a default when unset.
    fn parse_or<T>(&self, key: &str, default: T) -> Result<T, ConfigError>
    where
        T: std::str::FromStr,
        T::Err: std::fmt::Display,
    {
        self.optional(key).map_or(Ok(default), |raw| {
            raw.parse::<T>()
                .map_err(|e| ConfigError::InvalidEnvVar(key.to_string(), e.to_string()))
        })
    }
}
