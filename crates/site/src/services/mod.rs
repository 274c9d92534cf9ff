//! Business logic services for the site.
//!
//! # Services
//!
//! - `email` - Contact email rendering and the `EmailProvider` trait
//! - `resend` - Resend API client implementing `EmailProvider`

pub mod email;
pub mod resend;

pub use email::{
    ContactAddresses, EmailProvider, OutboundEmail, ProviderError, RenderError, SentEmail,
    contact_email,
};
pub use resend::ResendClient;
