//! Commands module
//!
//! Defines all CLI commands and their handlers.

mod apply;
mod show;

use anyhow::Result;
use clap::Subcommand;

use crate::config::Config;

/// Top-level CLI commands
#[derive(Subcommand)]
pub enum Commands {
    /// Publish all definitions to the server in dependency order
    Apply,
    /// Print the definitions as JSON without publishing anything
    Show,
}

/// Handle a CLI command
pub async fn handle_command(command: Commands, config: &Config) -> Result<()> {
    match command {
        Commands::Apply => apply::handle_apply(config).await,
        Commands::Show => show::handle_show(),
    }
}
