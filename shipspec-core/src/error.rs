//! Validation errors for definition construction

use thiserror::Error;

/// Errors raised while assembling or checking a definition
///
/// All variants are detected locally, before any network call is made.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// A required field is empty
    #[error("{field} must not be empty")]
    Empty { field: &'static str },

    /// An entity key does not follow the key format
    #[error("invalid key `{value}`: {reason}")]
    InvalidKey { value: String, reason: &'static str },

    /// A stable object id does not follow the oid format
    #[error("invalid oid `{value}`: {reason}")]
    InvalidOid { value: String, reason: &'static str },

    /// A permission grant carries no permission kinds
    #[error("grant for {subject} carries no permissions")]
    EmptyGrant { subject: String },
}
