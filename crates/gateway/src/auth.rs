//! Basic-auth credentials for the market API.
//!
//! Credentials are supplied once at client construction and reused for
//! every call. The password is held in a [`SecretString`] and never logged.

use crate::error::{GatewayError, Result};
use secrecy::{ExposeSecret, SecretString};
use serde::Deserialize;
use std::path::Path;

/// Environment variable holding the client name.
pub const CLIENT_ENV: &str = "TRENDBOT_API_CLIENT";

/// Environment variable holding the password.
pub const PASSWORD_ENV: &str = "TRENDBOT_API_PASSWORD";

/// Market API credentials.
#[derive(Clone)]
pub struct Credentials {
    client: String,
    password: SecretString,
}

impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials")
            .field("client", &self.client)
            .field("password", &"[REDACTED]")
            .finish()
    }
}

/// On-disk credentials layout: `{"client": {"name": "..."}, "password": "..."}`.
#[derive(Deserialize)]
struct RawCredentials {
    client: RawClient,
    password: String,
}

#[derive(Deserialize)]
struct RawClient {
    name: String,
}

impl Credentials {
    /// Creates credentials from explicit values.
    #[must_use]
    pub fn new(client: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            client: client.into(),
            password: SecretString::from(password.into()),
        }
    }

    /// Loads credentials from `TRENDBOT_API_CLIENT` / `TRENDBOT_API_PASSWORD`.
    ///
    /// # Errors
    /// Returns an error if either variable is missing.
    pub fn from_env() -> Result<Self> {
        let client = std::env::var(CLIENT_ENV)
            .map_err(|_| GatewayError::Credentials(format!("{CLIENT_ENV} not set")))?;
        let password = std::env::var(PASSWORD_ENV)
            .map_err(|_| GatewayError::Credentials(format!("{PASSWORD_ENV} not set")))?;
        Ok(Self::new(client, password))
    }

    /// Parses credentials from a JSON document.
    ///
    /// # Errors
    /// Returns an error if the document does not match the expected layout.
    pub fn from_json(json: &str) -> Result<Self> {
        let raw: RawCredentials = serde_json::from_str(json)
            .map_err(|e| GatewayError::Credentials(format!("malformed credentials: {e}")))?;
        Ok(Self::new(raw.client.name, raw.password))
    }

    /// Loads credentials from a JSON file.
    ///
    /// # Errors
    /// Returns an error if the file cannot be read or parsed.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path).map_err(|e| {
            GatewayError::Credentials(format!("cannot read {}: {e}", path.display()))
        })?;
        Self::from_json(&json)
    }

    /// Returns the client name.
    #[must_use]
    pub fn client(&self) -> &str {
        &self.client
    }

    /// Exposes the password for request signing.
    #[must_use]
    pub fn password(&self) -> &str {
        self.password.expose_secret()
    }
}
