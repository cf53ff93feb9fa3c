//! Client configuration from the environment
//!
//! Credentials are read from `TABULAR_ENDPOINT`, `TABULAR_USERNAME` and
//! `TABULAR_PASSWORD`. `TABULAR_PROTOCOL` optionally selects the legacy
//! `query` wire protocol; it defaults to `command`.

use crate::tabular::command::WireProtocol;
use crate::tabular::error::{ApiError, Result};
use serde::{Deserialize, Serialize};

pub const ENV_ENDPOINT: &str = "TABULAR_ENDPOINT";
pub const ENV_USERNAME: &str = "TABULAR_USERNAME";
pub const ENV_PASSWORD: &str = "TABULAR_PASSWORD";
pub const ENV_PROTOCOL: &str = "TABULAR_PROTOCOL";

/// Username, password and endpoint of the remote service
///
/// Read once per request to build the `Authorization` header and pick the
/// target URL. The client never mutates them.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Credentials {
    pub username: String,
    pub password: String,
    pub endpoint: String,
}

impl Credentials {
    pub fn new(
        username: impl Into<String>,
        password: impl Into<String>,
        endpoint: impl Into<String>,
    ) -> Self {
        Credentials {
            username: username.into(),
            password: password.into(),
            endpoint: endpoint.into(),
        }
    }

    /// `Authorization` header value: `username:password`, not encoded
    pub fn authorization(&self) -> String {
        format!("{}:{}", self.username, self.password)
    }
}

impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials")
            .field("username", &self.username)
            .field("password", &"***")
            .field("endpoint", &self.endpoint)
            .finish()
    }
}

/// Everything needed to build an [`ApiClient`](crate::tabular::ApiClient)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    pub credentials: Credentials,
    pub protocol: WireProtocol,
}

impl ClientConfig {
    pub fn new(credentials: Credentials) -> Self {
        ClientConfig {
            credentials,
            protocol: WireProtocol::default(),
        }
    }

    /// Load from process environment variables
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load from an arbitrary key lookup
    ///
    /// A blank endpoint counts as unset; username and password are taken
    /// verbatim, empty included. Used by the CLI to layer flags over the
    /// environment.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let missing = |key: &str| ApiError::Config(format!("{} environment variable not set", key));

        let endpoint = lookup(ENV_ENDPOINT)
            .filter(|v| !v.trim().is_empty())
            .ok_or_else(|| missing(ENV_ENDPOINT))?;
        let credentials = Credentials {
            endpoint,
            username: lookup(ENV_USERNAME).ok_or_else(|| missing(ENV_USERNAME))?,
            password: lookup(ENV_PASSWORD).ok_or_else(|| missing(ENV_PASSWORD))?,
        };

        let protocol = match lookup(ENV_PROTOCOL) {
            Some(raw) => raw.parse()?,
            None => WireProtocol::default(),
        };

        Ok(ClientConfig {
            credentials,
            protocol,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_from_lookup_complete() {
        let config = ClientConfig::from_lookup(lookup(&[
            (ENV_ENDPOINT, "http://localhost:8080/api"),
            (ENV_USERNAME, "admin"),
            (ENV_PASSWORD, "s3cret"),
        ]))
        .unwrap();

        assert_eq!(config.credentials.endpoint, "http://localhost:8080/api");
        assert_eq!(config.credentials.authorization(), "admin:s3cret");
        assert_eq!(config.protocol, WireProtocol::Command);
    }

    #[test]
    fn test_from_lookup_missing_password() {
        let err = ClientConfig::from_lookup(lookup(&[
            (ENV_ENDPOINT, "http://localhost"),
            (ENV_USERNAME, "admin"),
        ]))
        .unwrap_err();
        assert!(matches!(err, ApiError::Config(msg) if msg.contains(ENV_PASSWORD)));
    }

    #[test]
    fn test_from_lookup_empty_credentials_are_kept() {
        let config = ClientConfig::from_lookup(lookup(&[
            (ENV_ENDPOINT, "http://localhost"),
            (ENV_USERNAME, "admin"),
            (ENV_PASSWORD, ""),
            (ENV_PROTOCOL, ""),
        ]))
        .unwrap();
        assert_eq!(config.credentials.authorization(), "admin:");
        assert_eq!(config.protocol, WireProtocol::Command);
    }

    #[test]
    fn test_from_lookup_blank_endpoint() {
        let err = ClientConfig::from_lookup(lookup(&[
            (ENV_ENDPOINT, "   "),
            (ENV_USERNAME, "admin"),
            (ENV_PASSWORD, "s3cret"),
        ]))
        .unwrap_err();
        assert!(matches!(err, ApiError::Config(msg) if msg.contains(ENV_ENDPOINT)));
    }

    #[test]
    fn test_from_lookup_legacy_protocol() {
        let config = ClientConfig::from_lookup(lookup(&[
            (ENV_ENDPOINT, "http://localhost"),
            (ENV_USERNAME, "u"),
            (ENV_PASSWORD, "p"),
            (ENV_PROTOCOL, "query"),
        ]))
        .unwrap();
        assert_eq!(config.protocol, WireProtocol::Query);
    }

    #[test]
    fn test_debug_redacts_password() {
        let creds = Credentials::new("admin", "hunter2", "http://x");
        let printed = format!("{:?}", creds);
        assert!(printed.contains("admin"));
        assert!(!printed.contains("hunter2"));
    }
}
