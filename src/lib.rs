//! # sfquery
//!
//! Exchanges an OAuth 2.0 refresh token for an access token, runs one fixed
//! SOQL query against a Salesforce instance and prints the returned records.
//!
//! ## Crates
//!
//! - **sfquery-client** - HTTP client, Salesforce error parsing, SOQL query
//! - **sfquery-auth** - Environment credentials and the refresh-token grant
//!
//! ## Flow
//!
//! ```text
//! Start -> ConfigLoaded -> TokenObtained -> QueryExecuted -> Reported -> Exit(0)
//!   any failure -------------------------------------------------------> Exit(1)
//! ```
//!
//! ## Example
//!
//! ```rust,ignore
//! use sfquery::{run, RefreshCredentials};
//!
//! let creds = RefreshCredentials::from_env()?;
//! let printed = run(&creds, &mut std::io::stdout().lock()).await?;
//! ```

mod error;
mod query;
mod report;

use std::io::Write;

use tracing::{info, warn};

pub use error::AppError;
pub use query::{ContactQuery, Record, CONTACT_QUERY};
pub use report::{format_record, report};

// Re-export the member crates for convenient access
pub use sfquery_auth as auth;
pub use sfquery_client as client;

pub use sfquery_auth::RefreshCredentials;

/// Load credentials from the process environment.
pub fn load_config() -> Result<RefreshCredentials, AppError> {
    RefreshCredentials::from_env().map_err(AppError::Configuration)
}

/// Run the token exchange, the contact query and the report, in that order.
///
/// Returns the number of records written to `out`. The first failure ends the
/// run; nothing is retried.
pub async fn run<W: Write>(creds: &RefreshCredentials, out: &mut W) -> Result<usize, AppError> {
    let token = creds.exchange().await.map_err(AppError::TokenExchange)?;
    info!(token_url = creds.token_url(), "Access token obtained");

    if token.rotated_refresh_token(creds.refresh_token()).is_some() {
        // The new refresh token is not persisted anywhere.
        warn!("Token endpoint rotated the refresh token; the new one is discarded");
    }

    let records = ContactQuery::new(creds.instance_url(), &token.access_token, creds.api_version())
        .map_err(AppError::Query)?
        .run()
        .await
        .map_err(AppError::Query)?;
    info!(count = records.len(), "Query executed");

    report(&records, out).map_err(AppError::Output)?;
    Ok(records.len())
}
