//! Shipspec HTTP Client
//!
//! A type-safe client for pushing build plan, deployment, and permission
//! definitions to the orchestration server.
//!
//! Every publish is an idempotent upsert: the server creates the resource if
//! its identity is new and reconciles the stored resource in place
//! otherwise. Definitions are validated locally before any request is made,
//! so a malformed tree never reaches the network.
//!
//! # Example
//!
//! ```no_run
//! use shipspec_client::{Credentials, SpecsClient};
//! use shipspec_core::domain::plan::{Plan, Project};
//! use shipspec_core::ident::Key;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let credentials = Credentials::new("admin", "secret")?;
//!     let client = SpecsClient::new("http://localhost:6990", credentials);
//!
//!     let project = Project::new(Key::new("MYAP")?, "MyApp")?;
//!     let plan = Plan::new(project, "BuildApp", Key::new("BUIL")?)?;
//!     client.publish_plan(&plan).await?;
//!     Ok(())
//! }
//! ```

pub mod credentials;
mod deployments;
pub mod error;
mod plans;

// Re-export commonly used types
pub use credentials::{Credentials, CredentialsError, CredentialsProvider, EnvCredentials, FileCredentials};
pub use error::{PublishError, Result};

use reqwest::Client;
use serde::Serialize;

/// HTTP client for the spec publishing API
///
/// One client holds one authenticated connection pool and is used serially;
/// publish methods are grouped by resource family:
/// - Build plans and their permission sets
/// - Deployments, deployment permissions, environment permissions
#[derive(Debug, Clone)]
pub struct SpecsClient {
    /// Base URL of the server (e.g., "http://localhost:6990")
    base_url: String,
    /// HTTP client instance
    http: Client,
    /// Credentials presented on every request
    credentials: Credentials,
}

impl SpecsClient {
    /// Create a new client for the given server
    ///
    /// Credentials are passed in explicitly; the client never consults the
    /// environment or the filesystem on its own. See
    /// [`credentials::CredentialsProvider`] for the common sources.
    pub fn new(base_url: impl Into<String>, credentials: Credentials) -> Self {
        let base_url = base_url.into();
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            http: Client::new(),
            credentials,
        }
    }

    /// Create a client with a custom HTTP client
    ///
    /// This allows configuring timeouts, proxies, TLS settings, etc.
    pub fn with_client(
        base_url: impl Into<String>,
        credentials: Credentials,
        http: Client,
    ) -> Self {
        let base_url = base_url.into();
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            http,
            credentials,
        }
    }

    /// Create a client, resolving credentials through a provider
    pub fn from_provider(
        base_url: impl Into<String>,
        provider: &dyn CredentialsProvider,
    ) -> Result<Self> {
        Ok(Self::new(base_url, provider.credentials()?))
    }

    /// Get the base URL of the server
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    // =============================================================================
    // Request plumbing
    // =============================================================================

    /// Issue one idempotent upsert
    pub(crate) async fn put_json<T: Serialize + ?Sized>(&self, url: &str, body: &T) -> Result<()> {
        let response = self
            .http
            .put(url)
            .basic_auth(&self.credentials.username, Some(self.credentials.secret()))
            .json(body)
            .send()
            .await?;
        self.handle_response(response).await
    }

    /// Check the response status and translate failures
    ///
    /// Upserts carry no response body we care about; success is the signal.
    async fn handle_response(&self, response: reqwest::Response) -> Result<()> {
        let status = response.status();

        if status.is_success() {
            tracing::debug!(status = status.as_u16(), "server accepted resource");
            return Ok(());
        }

        let message = response
            .text()
            .await
            .unwrap_or_else(|_| "unknown error".to_string());
        Err(PublishError::from_status(status.as_u16(), message))
    }
}
