//! Command-line interface definitions using clap
//!
//! This module defines the CLI structure for linktrack using clap's derive macros.

use clap::{Parser, Subcommand};

/// linktrack - signed tracking links with a per-identity click ledger
#[derive(Parser, Debug)]
#[command(name = "linktrack")]
#[command(version)]
#[command(about = "Signed tracking links with a per-identity click ledger", long_about = None)]
pub struct Cli {
    /// Path to the TOML configuration file (default: config.toml, optional)
    #[arg(long, short = 'c', global = true)]
    pub config: Option<String>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available commands
#[derive(Subcommand, Debug, PartialEq, Eq)]
pub enum Commands {
    /// Start the HTTP server (default)
    Serve,

    /// Issue tracking tokens for one or more identities
    Issue {
        /// Identities to issue tokens for
        #[arg(required = true, num_args = 1..)]
        identities: Vec<String>,
    },

    /// List all ledger records, newest first
    List {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Delete every ledger record
    Clear {
        /// Confirm the irreversible deletion
        #[arg(long)]
        yes: bool,
    },

    /// Manage configuration
    Config {
        #[command(subcommand)]
        action: ConfigCommands,
    },
}

/// Configuration management commands
#[derive(Subcommand, Debug, PartialEq, Eq)]
pub enum ConfigCommands {
    /// Generate example configuration file
    Generate {
        /// Output path (default: stdout)
        output_path: Option<String>,

        /// Force overwrite an existing file
        #[arg(long)]
        force: bool,
    },
}
