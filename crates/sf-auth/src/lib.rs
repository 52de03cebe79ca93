//! # sfquery-auth
//!
//! Credentials and the OAuth 2.0 refresh-token grant.
//!
//! ## Security
//!
//! - Secrets and tokens are redacted in Debug output
//! - Tracing spans skip credential parameters
//! - Error messages never carry credential values
//!
//! ## Example
//!
//! ```rust,ignore
//! use sfquery_auth::RefreshCredentials;
//!
//! let creds = RefreshCredentials::from_env()?;
//! let token = creds.exchange().await?;
//! println!("instance: {}", creds.instance_url());
//! ```

mod credentials;
mod error;
mod oauth;

pub use credentials::{RefreshCredentials, REQUIRED_ENV_VARS};
pub use error::{Error, ErrorKind, Result};
pub use oauth::{OAuthClient, OAuthConfig, TokenResponse};
