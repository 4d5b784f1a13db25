//! Service layer
//!
//! Business logic shared between the HTTP handlers and the CLI.

mod tracking_service;

pub use tracking_service::{BatchIssueResult, IssueFailure, IssuedLink, TrackingService};
