//! Top-level error type.

use std::error::Error as _;

/// A fatal failure of one pipeline stage.
///
/// Each variant wraps the underlying cause, reachable through
/// [`std::error::Error::source`].
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// Required configuration was absent.
    #[error("configuration error: {0}")]
    Configuration(#[source] sfquery_auth::Error),

    /// The refresh-token grant failed.
    #[error("failed to refresh token: {0}")]
    TokenExchange(#[source] sfquery_auth::Error),

    /// The record query failed.
    #[error("failed to query Salesforce: {0}")]
    Query(#[source] sfquery_client::Error),

    /// Records could not be written to the output.
    #[error("failed to write records: {0}")]
    Output(#[source] std::io::Error),
}

impl AppError {
    /// Process exit code for this error.
    pub fn exit_code(&self) -> u8 {
        1
    }

    /// Render the error followed by its chain of causes, separated by `: `.
    ///
    /// Causes whose message is already part of the parent's are skipped.
    pub fn display_chain(&self) -> String {
        let mut rendered = self.to_string();
        let mut source = std::error::Error::source(self);

        while let Some(cause) = source {
            let message = cause.to_string();
            if !rendered.contains(&message) {
                rendered.push_str(": ");
                rendered.push_str(&message);
            }
            source = cause.source();
        }

        rendered
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn missing_config() -> AppError {
        AppError::Configuration(sfquery_auth::Error::new(
            sfquery_auth::ErrorKind::MissingEnvVars {
                names: vec!["CLIENT_ID"],
            },
        ))
    }

    #[test]
    fn test_configuration_message() {
        assert_eq!(
            missing_config().to_string(),
            "configuration error: missing one or more required environment variables"
        );
    }

    #[test]
    fn test_token_exchange_message() {
        let err = AppError::TokenExchange(sfquery_auth::Error::new(
            sfquery_auth::ErrorKind::OAuth {
                error: "invalid_grant".into(),
                description: None,
            },
        ));
        assert_eq!(
            err.to_string(),
            "failed to refresh token: OAuth error: invalid_grant"
        );
    }

    #[test]
    fn test_every_kind_exits_one() {
        let errors = [
            missing_config(),
            AppError::Query(sfquery_client::Error::new(sfquery_client::ErrorKind::Timeout)),
            AppError::Output(std::io::Error::other("closed pipe")),
        ];
        for err in errors {
            assert_eq!(err.exit_code(), 1, "{err}");
        }
    }

    #[test]
    fn test_source_is_the_wrapped_cause() {
        let err = AppError::Query(sfquery_client::Error::new(
            sfquery_client::ErrorKind::Authentication("Session expired or invalid".into()),
        ));
        let source = std::error::Error::source(&err).unwrap();
        assert_eq!(
            source.to_string(),
            "Authentication error: Session expired or invalid"
        );
    }

    #[test]
    fn test_display_chain_includes_transport_cause() {
        let io = std::io::Error::other("connection refused");
        let inner = sfquery_client::Error::with_source(
            sfquery_client::ErrorKind::Other("request failed".into()),
            io,
        );
        let err = AppError::Query(inner);
        assert_eq!(
            err.display_chain(),
            "failed to query Salesforce: request failed: connection refused"
        );
    }
}
