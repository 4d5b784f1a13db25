//! Configuration
//!
//! Static configuration is read once at startup from an optional TOML file,
//! overlaid by `LT__*` environment variables, then passed explicitly to the
//! components that need it.

mod structs;
pub mod validators;

pub use structs::*;
