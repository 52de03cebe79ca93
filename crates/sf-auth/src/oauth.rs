//! OAuth 2.0 refresh-token grant.
//!
//! The token endpoint is addressed by its full URL, so any RFC 6749
//! compliant server works, not just Salesforce login hosts.

use serde::{Deserialize, Serialize};
use sfquery_client::{ClientConfig, SfHttpClient};
use tracing::{debug, instrument};

use crate::error::{Error, ErrorKind, Result};

/// OAuth 2.0 configuration for a connected app.
///
/// Sensitive fields like `consumer_secret` are redacted in Debug output
/// to prevent accidental exposure in logs.
#[derive(Clone)]
pub struct OAuthConfig {
    /// Consumer key (client_id).
    pub consumer_key: String,
    /// Consumer secret (client_secret).
    consumer_secret: Option<String>,
}

impl std::fmt::Debug for OAuthConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OAuthConfig")
            .field("consumer_key", &self.consumer_key)
            .field("consumer_secret", &"[REDACTED]")
            .finish()
    }
}

impl OAuthConfig {
    /// Create a new OAuth config.
    pub fn new(consumer_key: impl Into<String>) -> Self {
        Self {
            consumer_key: consumer_key.into(),
            consumer_secret: None,
        }
    }

    /// Set the consumer secret.
    pub fn with_secret(mut self, secret: impl Into<String>) -> Self {
        self.consumer_secret = Some(secret.into());
        self
    }

    pub(crate) fn consumer_secret(&self) -> Option<&str> {
        self.consumer_secret.as_deref()
    }
}

/// OAuth client for the refresh-token grant.
#[derive(Clone)]
pub struct OAuthClient {
    config: OAuthConfig,
    http_client: SfHttpClient,
}

impl std::fmt::Debug for OAuthClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OAuthClient")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

impl OAuthClient {
    /// Create a new OAuth client with the default HTTP configuration.
    pub fn new(config: OAuthConfig) -> Result<Self> {
        Self::with_client_config(config, ClientConfig::default())
    }

    /// Create a new OAuth client with custom HTTP configuration.
    pub fn with_client_config(config: OAuthConfig, client_config: ClientConfig) -> Result<Self> {
        Ok(Self {
            config,
            http_client: SfHttpClient::new(client_config)?,
        })
    }

    /// Get the OAuth config.
    pub fn config(&self) -> &OAuthConfig {
        &self.config
    }

    /// Exchange a refresh token for a new access token.
    ///
    /// Sends one `POST` to `token_url` with `grant_type=refresh_token`,
    /// `refresh_token`, `client_id` and (when configured) `client_secret` as
    /// form fields. The refresh_token parameter is not logged.
    #[instrument(skip(self, refresh_token))]
    pub async fn refresh_token(&self, refresh_token: &str, token_url: &str) -> Result<TokenResponse> {
        let mut params = vec![
            ("grant_type", "refresh_token"),
            ("refresh_token", refresh_token),
            ("client_id", self.config.consumer_key.as_str()),
        ];

        if let Some(secret) = self.config.consumer_secret() {
            params.push(("client_secret", secret));
        }

        let request = self
            .http_client
            .post(token_url)
            .header("Accept", "application/json")
            .form(params);

        let response = self.http_client.execute_unchecked(request).await?;
        self.handle_token_response(response).await
    }

    /// Handle a token response, checking for errors.
    async fn handle_token_response(&self, response: sfquery_client::Response) -> Result<TokenResponse> {
        let status = response.status();

        if !response.is_success() {
            let body = response.text().await.unwrap_or_default();
            debug!(status, "Token endpoint rejected the grant");

            return Err(match serde_json::from_str::<OAuthErrorResponse>(&body) {
                Ok(error) => Error::new(ErrorKind::OAuth {
                    error: error.error,
                    description: error
                        .error_description
                        .map(|d| sfquery_client::sanitize_error_message(&d)),
                }),
                Err(_) => Error::new(ErrorKind::Http(format!(
                    "token endpoint returned {status}: {}",
                    sfquery_client::sanitize_error_message(body.trim())
                ))),
            });
        }

        let body = response.text().await?;
        let token: TokenResponse = serde_json::from_str(&body)?;

        if token.access_token.is_empty() {
            return Err(Error::new(ErrorKind::TokenInvalid(
                "server response missing access_token".to_string(),
            )));
        }

        debug!(
            token_type = token.token_type.as_deref().unwrap_or("unknown"),
            expires_in = token.expires_in,
            "Access token obtained"
        );

        Ok(token)
    }
}

/// Token response from OAuth.
///
/// Sensitive fields like `access_token` and `refresh_token` are redacted
/// in Debug output to prevent accidental exposure in logs.
#[derive(Clone, Deserialize, Serialize)]
pub struct TokenResponse {
    /// Access token.
    #[serde(default)]
    pub access_token: String,
    /// Refresh token, when the server rotates it.
    #[serde(default)]
    pub refresh_token: Option<String>,
    /// Instance URL (Salesforce includes it, generic servers do not).
    #[serde(default)]
    pub instance_url: Option<String>,
    /// User ID URL.
    #[serde(default)]
    pub id: Option<String>,
    /// Token type (usually "Bearer").
    #[serde(default)]
    pub token_type: Option<String>,
    /// Scopes granted.
    #[serde(default)]
    pub scope: Option<String>,
    /// Signature for verification.
    #[serde(default)]
    pub signature: Option<String>,
    /// Issued at timestamp.
    #[serde(default, deserialize_with = "lenient_string")]
    pub issued_at: Option<String>,
    /// Lifetime of the access token in seconds.
    #[serde(default, deserialize_with = "lenient_seconds")]
    pub expires_in: Option<u64>,
}

impl std::fmt::Debug for TokenResponse {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TokenResponse")
            .field("access_token", &"[REDACTED]")
            .field(
                "refresh_token",
                &self.refresh_token.as_ref().map(|_| "[REDACTED]"),
            )
            .field("instance_url", &self.instance_url)
            .field("id", &self.id)
            .field("token_type", &self.token_type)
            .field("scope", &self.scope)
            .field("signature", &self.signature.as_ref().map(|_| "[REDACTED]"))
            .field("issued_at", &self.issued_at)
            .field("expires_in", &self.expires_in)
            .finish()
    }
}

impl TokenResponse {
    /// Returns the new refresh token if the server issued one that differs
    /// from `previous`.
    pub fn rotated_refresh_token(&self, previous: &str) -> Option<&str> {
        self.refresh_token
            .as_deref()
            .filter(|rt| !rt.is_empty() && *rt != previous)
    }
}

/// Accepts `3599` or `"3599"`; any other shape is `None`.
fn lenient_seconds<'de, D>(deserializer: D) -> std::result::Result<Option<u64>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    Ok(match serde_json::Value::deserialize(deserializer)? {
        serde_json::Value::Number(n) => n.as_u64(),
        serde_json::Value::String(s) => s.trim().parse().ok(),
        _ => None,
    })
}

/// Accepts a string or a number (kept as its decimal text).
fn lenient_string<'de, D>(deserializer: D) -> std::result::Result<Option<String>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    Ok(match serde_json::Value::deserialize(deserializer)? {
        serde_json::Value::String(s) => Some(s),
        serde_json::Value::Number(n) => Some(n.to_string()),
        _ => None,
    })
}

/// OAuth error response (RFC 6749 section 5.2).
#[derive(Debug, Deserialize)]
struct OAuthErrorResponse {
    error: String,
    #[serde(default)]
    error_description: Option<String>,
}
