//! Credentials loaded once from the process environment.
//!
//! All credential types implement custom Debug to redact sensitive data.

use tracing::debug;

use crate::error::{Error, ErrorKind, Result};
use crate::oauth::{OAuthClient, OAuthConfig, TokenResponse};

/// Environment variables that must all be set and non-empty.
pub const REQUIRED_ENV_VARS: [&str; 5] = [
    "CLIENT_ID",
    "CLIENT_SECRET",
    "REFRESH_TOKEN",
    "TOKEN_URL",
    "INSTANCE_URL",
];

/// Optional override for the REST API version.
const API_VERSION_VAR: &str = "API_VERSION";

/// Connected-app credentials plus the endpoints they are used against.
///
/// Immutable once loaded. `client_secret` and `refresh_token` are redacted
/// in Debug output.
#[derive(Clone)]
pub struct RefreshCredentials {
    client_id: String,
    client_secret: String,
    refresh_token: String,
    token_url: String,
    instance_url: String,
    api_version: String,
}

impl std::fmt::Debug for RefreshCredentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RefreshCredentials")
            .field("client_id", &self.client_id)
            .field("client_secret", &"[REDACTED]")
            .field("refresh_token", &"[REDACTED]")
            .field("token_url", &self.token_url)
            .field("instance_url", &self.instance_url)
            .field("api_version", &self.api_version)
            .finish()
    }
}

impl RefreshCredentials {
    /// Load credentials from environment variables.
    ///
    /// Required: `CLIENT_ID`, `CLIENT_SECRET`, `REFRESH_TOKEN`, `TOKEN_URL`,
    /// `INSTANCE_URL`. Optional: `API_VERSION` (default
    /// [`sfquery_client::DEFAULT_API_VERSION`]).
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Load credentials through an arbitrary name -> value lookup.
    ///
    /// Unset and empty values are treated the same. URLs are not validated
    /// here; a malformed URL fails at the call that uses it.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut values = REQUIRED_ENV_VARS.map(|name| lookup(name).filter(|v| !v.is_empty()));

        let missing: Vec<&'static str> = REQUIRED_ENV_VARS
            .iter()
            .zip(values.iter())
            .filter(|(_, value)| value.is_none())
            .map(|(name, _)| *name)
            .collect();

        if !missing.is_empty() {
            debug!(missing = ?missing, "Required environment variables not set");
            return Err(Error::new(ErrorKind::MissingEnvVars { names: missing }));
        }

        let mut take = |i: usize| values[i].take().unwrap_or_default();

        let api_version = lookup(API_VERSION_VAR)
            .filter(|v| !v.is_empty())
            .unwrap_or_else(|| sfquery_client::DEFAULT_API_VERSION.to_string());

        Ok(Self {
            client_id: take(0),
            client_secret: take(1),
            refresh_token: take(2),
            token_url: take(3),
            instance_url: take(4),
            api_version,
        })
    }

    /// Get the OAuth client identifier (consumer key).
    pub fn client_id(&self) -> &str {
        &self.client_id
    }

    /// Get the OAuth client secret.
    pub fn client_secret(&self) -> &str {
        &self.client_secret
    }

    /// Get the refresh token.
    pub fn refresh_token(&self) -> &str {
        &self.refresh_token
    }

    /// Get the token endpoint URL.
    pub fn token_url(&self) -> &str {
        &self.token_url
    }

    /// Get the API instance base URL.
    pub fn instance_url(&self) -> &str {
        &self.instance_url
    }

    /// Get the REST API version.
    pub fn api_version(&self) -> &str {
        &self.api_version
    }

    /// Build an OAuth client for these credentials.
    pub fn oauth_client(&self) -> Result<OAuthClient> {
        let config = OAuthConfig::new(&self.client_id).with_secret(&self.client_secret);
        OAuthClient::new(config)
    }

    /// Exchange the refresh token for a new access token.
    pub async fn exchange(&self) -> Result<TokenResponse> {
        self.oauth_client()?
            .refresh_token(&self.refresh_token, &self.token_url)
            .await
    }
}
