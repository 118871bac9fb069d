//! Configuration module
//!
//! Handles CLI configuration including the server URL and credentials source.

use std::path::PathBuf;

/// CLI configuration
#[derive(Debug, Clone)]
pub struct Config {
    /// URL of the orchestration server
    pub server_url: String,
    /// Credentials file read when the environment carries no credentials
    pub credentials_file: PathBuf,
}
