//! Credential handling for the publish client
//!
//! Credentials are injected explicitly when the client is built; there is no
//! ambient lookup. Two providers cover the common sources: the process
//! environment and a local credentials file kept out of version control.

use std::fmt;
use std::path::{Path, PathBuf};

use thiserror::Error;

/// Environment variable holding the username
pub const USERNAME_VAR: &str = "SHIPSPEC_USERNAME";
/// Environment variable holding the password or API token
pub const PASSWORD_VAR: &str = "SHIPSPEC_PASSWORD";

/// Username/secret pair presented to the server as HTTP basic auth
#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    pub username: String,
    secret: String,
}

impl Credentials {
    pub fn new(
        username: impl Into<String>,
        secret: impl Into<String>,
    ) -> Result<Self, CredentialsError> {
        let username = username.into();
        if username.is_empty() {
            return Err(CredentialsError::MissingField("username"));
        }
        let secret = secret.into();
        if secret.is_empty() {
            return Err(CredentialsError::MissingField("password"));
        }
        Ok(Self { username, secret })
    }

    pub fn secret(&self) -> &str {
        &self.secret
    }
}

// The secret never appears in logs or error chains.
impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("username", &self.username)
            .field("secret", &"<redacted>")
            .finish()
    }
}

/// Errors raised while resolving credentials
#[derive(Debug, Error)]
pub enum CredentialsError {
    #[error("missing credential field: {0}")]
    MissingField(&'static str),

    #[error("environment variable {0} not set")]
    MissingEnv(&'static str),

    #[error("failed to read credentials file {path}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("malformed credentials file {path}: {reason}")]
    Malformed { path: PathBuf, reason: String },
}

/// Source of credentials for client construction
pub trait CredentialsProvider {
    fn credentials(&self) -> Result<Credentials, CredentialsError>;
}

/// Reads `SHIPSPEC_USERNAME` and `SHIPSPEC_PASSWORD`
#[derive(Debug, Clone, Copy, Default)]
pub struct EnvCredentials;

impl CredentialsProvider for EnvCredentials {
    fn credentials(&self) -> Result<Credentials, CredentialsError> {
        let username =
            std::env::var(USERNAME_VAR).map_err(|_| CredentialsError::MissingEnv(USERNAME_VAR))?;
        let secret =
            std::env::var(PASSWORD_VAR).map_err(|_| CredentialsError::MissingEnv(PASSWORD_VAR))?;
        Credentials::new(username, secret)
    }
}

/// Reads a `key=value` credentials file
///
/// The file holds `username=` and `password=` lines; blank lines and lines
/// starting with `#` are skipped.
#[derive(Debug, Clone)]
pub struct FileCredentials {
    path: PathBuf,
}

impl FileCredentials {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn parse(path: &Path, contents: &str) -> Result<Credentials, CredentialsError> {
        let mut username = None;
        let mut secret = None;
        for line in contents.lines() {
            let line = line.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }
            let Some((key, value)) = line.split_once('=') else {
                return Err(CredentialsError::Malformed {
                    path: path.to_path_buf(),
                    reason: format!("expected key=value, got `{line}`"),
                });
            };
            match key.trim() {
                "username" => username = Some(value.trim().to_string()),
                "password" => secret = Some(value.trim().to_string()),
                other => {
                    return Err(CredentialsError::Malformed {
                        path: path.to_path_buf(),
                        reason: format!("unknown field `{other}`"),
                    });
                }
            }
        }
        match (username, secret) {
            (Some(username), Some(secret)) => Credentials::new(username, secret),
            (None, _) => Err(CredentialsError::Malformed {
                path: path.to_path_buf(),
                reason: "missing username".to_string(),
            }),
            (_, None) => Err(CredentialsError::Malformed {
                path: path.to_path_buf(),
                reason: "missing password".to_string(),
            }),
        }
    }
}

impl CredentialsProvider for FileCredentials {
    fn credentials(&self) -> Result<Credentials, CredentialsError> {
        let contents = std::fs::read_to_string(&self.path).map_err(|source| {
            CredentialsError::Io {
                path: self.path.clone(),
                source,
            }
        })?;
        Self::parse(&self.path, &contents)
    }
}
