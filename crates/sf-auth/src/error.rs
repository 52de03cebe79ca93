//! Error types for sfquery-auth.
//!
//! Error messages are designed to avoid exposing sensitive credential data.

/// Result type alias for sfquery-auth operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Error type for sfquery-auth operations.
///
/// Error messages are sanitized to prevent accidental credential exposure.
#[derive(Debug, thiserror::Error)]
#[error("{kind}")]
pub struct Error {
    /// The kind of error that occurred.
    pub kind: ErrorKind,
    /// Optional source error.
    #[source]
    pub source: Option<Box<dyn std::error::Error + Send + Sync>>,
}

impl Error {
    /// Create a new error with the given kind.
    pub fn new(kind: ErrorKind) -> Self {
        Self { kind, source: None }
    }

    /// Create a new error with the given kind and source.
    pub fn with_source(
        kind: ErrorKind,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        Self {
            kind,
            source: Some(Box::new(source)),
        }
    }

    /// Returns true if required configuration was absent.
    pub fn is_missing_config(&self) -> bool {
        matches!(self.kind, ErrorKind::MissingEnvVars { .. })
    }
}

/// The kind of error that occurred.
///
/// Error messages avoid including credential values.
#[derive(Debug, thiserror::Error)]
pub enum ErrorKind {
    /// One or more required environment variables were unset or empty.
    ///
    /// Only the variable names are kept, never their values.
    #[error("missing one or more required environment variables")]
    MissingEnvVars { names: Vec<&'static str> },

    /// OAuth error response from the token endpoint.
    #[error("OAuth error: {error}{}", description.as_deref().map(|d| format!(" - {d}")).unwrap_or_default())]
    OAuth {
        error: String,
        description: Option<String>,
    },

    /// The token endpoint answered 2xx without a usable access token.
    #[error("Token invalid: {0}")]
    TokenInvalid(String),

    /// HTTP error during authentication.
    #[error("HTTP error: {0}")]
    Http(String),

    /// JSON error.
    #[error("JSON error: {0}")]
    Json(String),
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error::with_source(ErrorKind::Json(err.to_string()), err)
    }
}

impl From<sfquery_client::Error> for Error {
    fn from(err: sfquery_client::Error) -> Self {
        // Sanitize any potential credential exposure
        let message = err.to_string();
        let sanitized = if message.contains("Bearer") || message.contains("token=") {
            "Client error (details redacted for security)".to_string()
        } else {
            sfquery_client::sanitize_error_message(&message)
        };
        Error::with_source(ErrorKind::Http(sanitized), err)
    }
}
