//! Core types for the contact pipeline.

pub mod response;
pub mod submission;

pub use response::{ContactAccepted, ErrorBody};
pub use submission::{ContactSubmission, Field};
