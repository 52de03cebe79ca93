//! # sfquery-client
//!
//! HTTP infrastructure for talking to a Salesforce-style REST API.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                    SalesforceClient                         │
//! │  - Bound to one instance URL + access token                 │
//! │  - Adds the bearer header to every request                  │
//! │  - Typed SOQL query helper                                  │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │                    SfHttpClient                             │
//! │  - One-shot HTTP over reqwest (no retries)                  │
//! │  - Salesforce error body parsing                            │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Example
//!
//! ```rust,ignore
//! use sfquery_client::SalesforceClient;
//!
//! let client = SalesforceClient::new("https://myorg.my.salesforce.com", token)?;
//! let result: QueryResult<serde_json::Value> =
//!     client.query("SELECT Id FROM Contact LIMIT 5").await?;
//! ```

mod client;
mod config;
mod error;
mod request;
mod response;
mod salesforce_client;

pub use client::SfHttpClient;
pub use config::{ClientConfig, ClientConfigBuilder, CompressionConfig};
pub use error::{Error, ErrorKind, Result};
pub use request::{RequestBody, RequestBuilder, RequestMethod};
pub use response::{sanitize_error_message, ApiUsage, Response, ResponseExt};
pub use salesforce_client::{QueryResult, SalesforceClient};

/// Default Salesforce API version
pub const DEFAULT_API_VERSION: &str = "62.0";

/// User-Agent string for the client
pub const USER_AGENT: &str = concat!("sfquery/", env!("CARGO_PKG_VERSION"));
