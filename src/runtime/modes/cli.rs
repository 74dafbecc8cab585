//! CLI mode
//!
//! One-shot helper commands that never touch the link store.

use colored::Colorize;

use crate::cli::ToolCommand;
use crate::config::{DEFAULT_CONFIG_PATH, StaticConfig};
use crate::errors::Result;
use crate::utils::password::hash_password;

/// Run CLI mode
pub fn run_cli(command: ToolCommand) -> Result<()> {
    match command {
        ToolCommand::HashPassword { password } => {
            let hash = hash_password(&password)?;
            println!("{}", hash);
            Ok(())
        }
        ToolCommand::GenerateConfig { output_path } => {
            let path = output_path.unwrap_or_else(|| DEFAULT_CONFIG_PATH.to_string());
            StaticConfig::default().save_to_file(&path)?;
            println!("{} {}", "Configuration written to".green(), path.bold());
            Ok(())
        }
    }
}
