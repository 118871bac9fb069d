//! Shipspec CLI
//!
//! Publishes the bundled build and deployment definitions to the
//! orchestration server.

mod commands;
mod config;
mod shipit;

use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;
use commands::{Commands, handle_command};
use config::Config;

#[derive(Parser)]
#[command(name = "shipspec")]
#[command(about = "Declarative build and deployment spec publisher", long_about = None)]
struct Cli {
    /// Orchestration server URL
    #[arg(
        long,
        env = "SHIPSPEC_SERVER_URL",
        default_value = "http://localhost:6990"
    )]
    server_url: String,

    /// Credentials file used when SHIPSPEC_USERNAME/SHIPSPEC_PASSWORD are unset
    #[arg(long, env = "SHIPSPEC_CREDENTIALS_FILE", default_value = ".credentials")]
    credentials_file: PathBuf,

    #[command(subcommand)]
    command: Commands,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();

    let config = Config {
        server_url: cli.server_url,
        credentials_file: cli.credentials_file,
    };

    handle_command(cli.command, &config).await
}
