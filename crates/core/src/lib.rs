//! Portfolio Core - Shared contact-form types.
//!
//! This crate provides the types exchanged between the portfolio components:
//! - `site` - The HTTP server that relays contact submissions by email
//! - `client` - The contact form state machine and its HTTP transport
//! - `cli` - Command-line tools for sending and previewing submissions
//!
//! # Architecture
//!
//! The core crate contains only types - no I/O, no HTTP clients, no
//! templating. Validation rules live here as plain functions so both sides
//! can apply them independently.
//!
//! # Modules
//!
//! - [`types`] - The contact submission and the JSON response bodies

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod types;

pub use types::*;
