//! Command-line interface definitions using clap
//!
//! This module defines the CLI structure for relinker using clap's derive macros.

use clap::{Parser, Subcommand};

/// Relinker - A versioned URL shortener
#[derive(Parser)]
#[command(name = "relinker")]
#[command(version)]
#[command(about = "A versioned URL shortener with confirmed writes", long_about = None)]
pub struct Cli {
    /// Path to the TOML configuration file
    #[arg(long, short = 'c', global = true)]
    pub config: Option<String>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available commands
#[derive(Subcommand, Debug, PartialEq, Eq)]
pub enum Commands {
    /// Start the HTTP gateway (default)
    Serve,

    #[command(flatten)]
    Tool(ToolCommand),
}

/// One-shot helper commands, run without starting the server
#[derive(Subcommand, Debug, PartialEq, Eq)]
pub enum ToolCommand {
    /// Print the Argon2 hash of a password for `auth.password`
    HashPassword {
        /// Plaintext password
        password: String,
    },

    /// Generate a sample configuration file
    GenerateConfig {
        /// Output file path (default: config.toml)
        output_path: Option<String>,
    },
}

impl Cli {
    /// Helper command to run instead of the server; `serve` is implied
    /// when no subcommand is given.
    pub fn tool_command(self) -> Option<ToolCommand> {
        match self.command {
            Some(Commands::Tool(tool)) => Some(tool),
            None | Some(Commands::Serve) => None,
        }
    }
}
