//! Error types for publish operations

use thiserror::Error;

use crate::credentials::CredentialsError;

/// Result type alias for publish operations
pub type Result<T> = std::result::Result<T, PublishError>;

/// Errors surfaced by a publish call
///
/// Nothing is retried and nothing is swallowed; every failure reaches the
/// caller as one of these variants.
#[derive(Debug, Error)]
pub enum PublishError {
    /// The definition failed local validation; no request was sent
    #[error("invalid definition: {0}")]
    Validation(#[from] shipspec_core::ValidationError),

    /// Credentials could not be resolved from the configured provider
    #[error("credentials unavailable: {0}")]
    Credentials(#[from] CredentialsError),

    /// The server rejected the supplied credentials
    #[error("authentication rejected (status {status}): {message}")]
    Authentication { status: u16, message: String },

    /// Identity collision with an incompatible existing resource
    #[error("conflict with existing resource: {message}")]
    Conflict { message: String },

    /// The published object references an identity the server does not know
    #[error("referenced entity not found: {message}")]
    ReferenceNotFound { message: String },

    /// Server-side validation rejected the definition
    #[error("server rejected definition: {message}")]
    Rejected { message: String },

    /// Any other non-success API response
    #[error("API error (status {status}): {message}")]
    Api { status: u16, message: String },

    /// Network or connection failure
    #[error("transport failure: {0}")]
    Transport(#[from] reqwest::Error),
}

impl PublishError {
    /// Map a non-success HTTP status to an error kind
    pub fn from_status(status: u16, message: impl Into<String>) -> Self {
        let message = message.into();
        match status {
            401 | 403 => Self::Authentication { status, message },
            404 => Self::ReferenceNotFound { message },
            409 => Self::Conflict { message },
            400 | 422 => Self::Rejected { message },
            _ => Self::Api { status, message },
        }
    }

    /// Check if the server rejected our credentials
    pub fn is_authentication(&self) -> bool {
        matches!(self, Self::Authentication { .. })
    }

    /// Check if the target of a reference was missing server-side
    pub fn is_reference_not_found(&self) -> bool {
        matches!(self, Self::ReferenceNotFound { .. })
    }

    /// Check if the failure never left this process
    pub fn is_local(&self) -> bool {
        matches!(self, Self::Validation(_) | Self::Credentials(_))
    }
}
