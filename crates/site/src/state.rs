//! Application state shared across handlers.

use std::sync::Arc;
use std::time::Duration;

use crate::config::SiteConfig;
use crate::services::{ContactAddresses, EmailProvider, ProviderError, ResendClient};

/// Application state shared across all handlers.
///
/// Built once at startup. The email provider is constructed here from
/// configuration and injected; handlers never read the environment.
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    config: SiteConfig,
    mailer: Option<Arc<dyn EmailProvider>>,
}

impl AppState {
    /// Create application state, building a Resend client when an API key
    /// is configured.
    ///
    /// # Errors
    ///
    /// Returns an error if the Resend client cannot be built.
    pub fn new(config: SiteConfig) -> Result<Self, ProviderError> {
        let mailer = match &config.contact.resend {
            Some(resend) => {
                let client = ResendClient::new(resend, config.contact.send_timeout)?;
                Some(Arc::new(client) as Arc<dyn EmailProvider>)
            }
            None => None,
        };

        Ok(Self::with_mailer(config, mailer))
    }

    /// Create application state with an explicit provider.
    #[must_use]
    pub fn with_mailer(config: SiteConfig, mailer: Option<Arc<dyn EmailProvider>>) -> Self {
        Self {
            inner: Arc::new(AppStateInner { config, mailer }),
        }
    }

    /// Get a reference to the site configuration.
    #[must_use]
    pub fn config(&self) -> &SiteConfig {
        &self.inner.config
    }

    /// The configured email provider, if an API key was set.
    #[must_use]
    pub fn mailer(&self) -> Option<&dyn EmailProvider> {
        self.inner.mailer.as_deref()
    }

    /// Sender and destination addresses, if both are configured.
    #[must_use]
    pub fn contact_addresses(&self) -> Option<ContactAddresses> {
        let contact = &self.inner.config.contact;
        match (&contact.from_email, &contact.to_email) {
            (Some(from), Some(to)) => Some(ContactAddresses {
                from: from.clone(),
                to: to.clone(),
            }),
            _ => None,
        }
    }

    /// Upper bound on a single provider call.
    #[must_use]
    pub fn send_timeout(&self) -> Duration {
        self.inner.config.contact.send_timeout
    }

    /// Whether a contact submission could be relayed right now.
    #[must_use]
    pub fn is_contact_ready(&self) -> bool {
        self.mailer().is_some() && self.contact_addresses().is_some()
    }
}
