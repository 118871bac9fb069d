//! Identity newtypes shared across definitions
//!
//! Entity keys and stable object ids are validated once, at construction.
//! Both serialize as plain strings.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::ValidationError;

/// Short identifier for projects, plans, and jobs
///
/// Keys are uppercase ASCII alphanumeric and start with a letter,
/// e.g. `MYAP` or `JOB1`. Uniqueness within a namespace is enforced
/// server-side; only the format is checked here.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Key(String);

impl Key {
    /// Create a key, rejecting anything outside the key format
    pub fn new(value: impl Into<String>) -> Result<Self, ValidationError> {
        let value = value.into();
        if value.is_empty() {
            return Err(ValidationError::Empty { field: "key" });
        }
        let first = value.chars().next().unwrap_or_default();
        if !first.is_ascii_uppercase() {
            return Err(ValidationError::InvalidKey {
                value,
                reason: "keys start with an uppercase ASCII letter",
            });
        }
        if !value
            .chars()
            .all(|c| c.is_ascii_uppercase() || c.is_ascii_digit())
        {
            return Err(ValidationError::InvalidKey {
                value,
                reason: "keys contain only uppercase ASCII letters and digits",
            });
        }
        Ok(Self(value))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Key {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Server-stable object id
///
/// Assigned by the server on first creation; carrying it in a definition
/// pins the upsert to the existing object even if its key changes.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Oid(String);

impl Oid {
    /// Create an oid, rejecting anything outside the oid format
    pub fn new(value: impl Into<String>) -> Result<Self, ValidationError> {
        let value = value.into();
        if value.is_empty() {
            return Err(ValidationError::Empty { field: "oid" });
        }
        if !value
            .chars()
            .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit())
        {
            return Err(ValidationError::InvalidOid {
                value,
                reason: "oids contain only lowercase ASCII letters and digits",
            });
        }
        Ok(Self(value))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Oid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
