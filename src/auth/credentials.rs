//! Credential management for document API authorization.

use secrecy::{ExposeSecret, SecretString};
use std::sync::Arc;

use crate::Result;
use crate::error::SubmitError;

/// Default environment variable holding the authorization value.
pub const TOKEN_ENV_VAR: &str = "DOCUMENT_API_TOKEN";

/// Stub authorization value used until a real token source is configured.
pub const PLACEHOLDER_TOKEN: &str = "Bearer: 287638716ehihi";

/// An authorization header value.
#[derive(Clone)]
pub struct Credential {
    value: SecretString,
}

impl Credential {
    /// Wrap an authorization value, e.g. `"Bearer <token>"`.
    pub fn new(value: impl Into<String>) -> Self {
        Self {
            value: SecretString::from(value.into()),
        }
    }

    /// Get the raw header value.
    ///
    /// This method exposes the secret - use carefully.
    pub fn expose_secret(&self) -> &str {
        self.value.expose_secret()
    }
}

impl std::fmt::Debug for Credential {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credential")
            .field("value", &"[REDACTED]")
            .finish()
    }
}

/// Trait for providing the authorization credential of each request.
///
/// Called once per admitted submission. Implementations that refresh or
/// rotate tokens should return the currently valid credential, or an
/// [`SubmitError::Auth`] if none can be obtained.
pub trait CredentialsProvider: Send + Sync {
    /// Get the credential for the next request.
    fn credential(&self) -> Result<Credential>;
}

/// Provider that always returns the same credential.
#[derive(Clone, Debug)]
pub struct StaticCredentials {
    credential: Credential,
}

impl StaticCredentials {
    /// Create a provider for a fixed authorization value.
    pub fn new(value: impl Into<String>) -> Self {
        Self {
            credential: Credential::new(value),
        }
    }

    /// Provider returning [`PLACEHOLDER_TOKEN`].
    pub fn placeholder() -> Self {
        Self::new(PLACEHOLDER_TOKEN)
    }
}

impl CredentialsProvider for StaticCredentials {
    fn credential(&self) -> Result<Credential> {
        Ok(self.credential.clone())
    }
}

impl<P: CredentialsProvider + ?Sized> CredentialsProvider for Arc<P> {
    fn credential(&self) -> Result<Credential> {
        (**self).credential()
    }
}

/// Provider that reads the authorization value from the environment.
///
/// By default, reads `DOCUMENT_API_TOKEN`. The variable is read once,
/// at construction.
#[derive(Clone, Debug)]
pub struct EnvCredentials {
    credential: Credential,
}

impl EnvCredentials {
    /// Read the credential from `DOCUMENT_API_TOKEN`.
    pub fn from_env() -> Result<Self> {
        Self::from_env_var(TOKEN_ENV_VAR)
    }

    /// Read the credential from a custom environment variable.
    pub fn from_env_var(var: &str) -> Result<Self> {
        Self::try_from_env_var(var).ok_or_else(|| {
            SubmitError::InvalidConfiguration(format!("environment variable {var} not set"))
        })
    }

    /// Try to read the credential from `DOCUMENT_API_TOKEN`.
    ///
    /// Returns `None` if the variable is not set.
    pub fn try_from_env() -> Option<Self> {
        Self::try_from_env_var(TOKEN_ENV_VAR)
    }

    /// Try to read the credential from a custom environment variable.
    pub fn try_from_env_var(var: &str) -> Option<Self> {
        let value = std::env::var(var).ok()?;
        Some(Self {
            credential: Credential::new(value),
        })
    }
}

impl CredentialsProvider for EnvCredentials {
    fn credential(&self) -> Result<Credential> {
        Ok(self.credential.clone())
    }
}
