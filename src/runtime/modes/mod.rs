//! Mode routing
//!
//! - Server mode (HTTP server), the default
//! - CLI mode (one-shot commands against the ledger)

pub mod cli;
pub mod server;

pub use cli::run_cli;
pub use server::{configure_routes, run_server};

use crate::cli::Commands;

/// Mode detection result
#[derive(Debug, PartialEq)]
pub enum Mode {
    Server,
    Cli(Commands),
}

/// 没有子命令或子命令为 `serve` 时进入服务器模式
pub fn detect_mode(command: Option<Commands>) -> Mode {
    match command {
        None | Some(Commands::Serve) => Mode::Server,
        Some(cmd) => Mode::Cli(cmd),
    }
}
