//! linktrack - signed tracking links with a per-identity click ledger
//!
//! A tracking token binds an identity to an HMAC-SHA256 signature, so the
//! server keeps no token state. Redeeming a token appends a visit event to the
//! identity's record in the click ledger.
//!
//! # Architecture
//! - `token`: stateless token codec
//! - `ledger`: append-only click ledger (memory / SeaORM backends)
//! - `services`: tracking service shared by HTTP and CLI
//! - `api`: HTTP routes and middleware
//! - `interfaces`: command-line interface
//! - `config`: configuration management
//! - `runtime`: application lifecycle and execution modes
//! - `system`: logging

pub mod api;
pub mod cli;
pub mod config;
pub mod errors;
pub mod interfaces;
pub mod ledger;
pub mod runtime;
pub mod services;
pub mod system;
pub mod token;
pub mod utils;
