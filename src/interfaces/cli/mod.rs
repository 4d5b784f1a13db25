//! CLI interface module
//!
//! This module provides command-line interface functionality for linktrack.

pub mod commands;

use std::fmt;

use crate::cli::{Commands, ConfigCommands};
use crate::config::StaticConfig;
use crate::runtime::lifetime::startup::build_tracking_service;
use commands::{clear_ledger, generate_config, issue_tokens, list_records};

#[derive(Debug)]
pub enum CliError {
    StorageError(String),
    ParseError(String),
    CommandError(String),
}

impl CliError {
    /// Format as simple output
    pub fn format_simple(&self) -> String {
        match self {
            CliError::StorageError(msg) => format!("Storage error: {}", msg),
            CliError::ParseError(msg) => format!("Parse error: {}", msg),
            CliError::CommandError(msg) => format!("Command error: {}", msg),
        }
    }

    /// Format as colored output
    pub fn format_colored(&self) -> String {
        use colored::Colorize;
        match self {
            CliError::StorageError(msg) => {
                format!("{} {}", "Storage error:".red().bold(), msg.white())
            }
            CliError::ParseError(msg) => {
                format!("{} {}", "Parse error:".yellow().bold(), msg.white())
            }
            CliError::CommandError(msg) => {
                format!("{} {}", "Command error:".red().bold(), msg.white())
            }
        }
    }
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.format_simple())
    }
}

impl std::error::Error for CliError {}

impl From<crate::errors::LinktrackError> for CliError {
    fn from(err: crate::errors::LinktrackError) -> Self {
        CliError::StorageError(err.to_string())
    }
}

/// Run a CLI command from clap-parsed input
///
/// `Serve` 不在这里处理，由调用方进入服务器模式。
pub async fn run_cli_command(cmd: Commands, config: &StaticConfig) -> Result<(), CliError> {
    // 生成配置不需要密钥与存储
    if let Commands::Config {
        action: ConfigCommands::Generate { output_path, force },
    } = &cmd
    {
        return generate_config(output_path.clone(), *force);
    }

    config
        .validate()
        .map_err(|e| CliError::ParseError(e.message().to_string()))?;
    let service = build_tracking_service(config)
        .await
        .map_err(|e| CliError::StorageError(format!("{:#}", e)))?;

    match cmd {
        Commands::Issue { identities } => issue_tokens(&service, config, &identities),
        Commands::List { json } => list_records(&service, json).await,
        Commands::Clear { yes } => clear_ledger(&service, yes).await,
        Commands::Serve | Commands::Config { .. } => Err(CliError::CommandError(
            "Command is not handled by the CLI runner".to_string(),
        )),
    }
}
