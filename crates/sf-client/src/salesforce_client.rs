//! High-level Salesforce client with typed HTTP methods.
//!
//! ## Security
//!
//! - Access tokens are redacted in Debug output
//! - Sensitive parameters are skipped in tracing spans

use serde::de::DeserializeOwned;
use tracing::{debug, instrument};

use crate::client::SfHttpClient;
use crate::config::ClientConfig;
use crate::error::Result;
use crate::request::RequestBuilder;
use crate::DEFAULT_API_VERSION;

/// Salesforce API client bound to one instance URL and access token.
///
/// Every request built through this client carries
/// `Authorization: Bearer <access token>`.
#[derive(Clone)]
pub struct SalesforceClient {
    http: SfHttpClient,
    instance_url: String,
    access_token: String,
    api_version: String,
}

impl std::fmt::Debug for SalesforceClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SalesforceClient")
            .field("instance_url", &self.instance_url)
            .field("access_token", &"[REDACTED]")
            .field("api_version", &self.api_version)
            .finish_non_exhaustive()
    }
}

impl SalesforceClient {
    /// Create a new Salesforce client with the given instance URL and access token.
    pub fn new(instance_url: impl Into<String>, access_token: impl Into<String>) -> Result<Self> {
        Self::with_config(instance_url, access_token, ClientConfig::default())
    }

    /// Create a new Salesforce client with custom configuration.
    ///
    /// Fails if `instance_url` is not an absolute URL.
    pub fn with_config(
        instance_url: impl Into<String>,
        access_token: impl Into<String>,
        config: ClientConfig,
    ) -> Result<Self> {
        let instance_url = instance_url.into().trim_end_matches('/').to_string();
        url::Url::parse(&instance_url)?;

        let http = SfHttpClient::new(config)?;
        Ok(Self {
            http,
            instance_url,
            access_token: access_token.into(),
            api_version: DEFAULT_API_VERSION.to_string(),
        })
    }

    /// Set the API version (e.g., "62.0").
    pub fn with_api_version(mut self, version: impl Into<String>) -> Self {
        self.api_version = version.into();
        self
    }

    /// Get the instance URL.
    pub fn instance_url(&self) -> &str {
        &self.instance_url
    }

    /// Get the access token.
    pub fn access_token(&self) -> &str {
        &self.access_token
    }

    /// Get the API version.
    pub fn api_version(&self) -> &str {
        &self.api_version
    }

    /// Build the REST API URL for a path.
    ///
    /// Example: `rest_url("query")` -> `{instance}/services/data/v62.0/query`
    pub fn rest_url(&self, path: &str) -> String {
        let path = path.trim_start_matches('/');
        format!(
            "{}/services/data/v{}/{}",
            self.instance_url, self.api_version, path
        )
    }

    /// Create a GET request builder with authentication.
    pub fn get(&self, url: &str) -> RequestBuilder {
        self.http.get(url).bearer_auth(&self.access_token)
    }

    /// Send an authenticated request and deserialize the JSON response.
    #[instrument(skip(self, request), fields(url = %request.url))]
    pub async fn send_json<T: DeserializeOwned>(&self, request: RequestBuilder) -> Result<T> {
        let response = self.http.execute(request).await?;

        if let Some(usage) = response.api_usage() {
            debug!(
                used = usage.used,
                limit = usage.limit,
                remaining = usage.remaining(),
                "API usage"
            );
        }

        response.json().await
    }

    /// Execute a SOQL query via the REST API.
    ///
    /// Returns the first batch of results only; `next_records_url` is left
    /// for the caller.
    #[instrument(skip(self))]
    pub async fn query<T: DeserializeOwned>(&self, soql: &str) -> Result<QueryResult<T>> {
        let request = self.get(&self.rest_url("query")).query("q", soql);
        self.send_json(request).await
    }
}

/// Result of a SOQL query.
#[derive(Debug, Clone, serde::Deserialize, serde::Serialize)]
pub struct QueryResult<T> {
    /// Total number of records matching the query.
    #[serde(rename = "totalSize", default)]
    pub total_size: u64,

    /// Whether all records are returned (no more pages).
    #[serde(default = "default_done")]
    pub done: bool,

    /// URL to fetch next batch of results.
    #[serde(rename = "nextRecordsUrl", default)]
    pub next_records_url: Option<String>,

    /// The records.
    pub records: Vec<T>,
}

fn default_done() -> bool {
    true
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;
    use wiremock::matchers::{header, method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[test]
    fn test_url_building() {
        let client = SalesforceClient::new("https://na1.salesforce.com", "token123").unwrap();

        assert_eq!(
            client.rest_url("query"),
            "https://na1.salesforce.com/services/data/v62.0/query"
        );
    }

    #[test]
    fn test_api_version() {
        let client = SalesforceClient::new("https://na1.salesforce.com", "token")
            .unwrap()
            .with_api_version("43.0");

        assert_eq!(client.api_version(), "43.0");
        assert_eq!(
            client.rest_url("/query"),
            "https://na1.salesforce.com/services/data/v43.0/query"
        );
    }

    #[test]
    fn test_trailing_slash_handling() {
        let client = SalesforceClient::new("https://na1.salesforce.com/", "token").unwrap();
        assert_eq!(client.instance_url(), "https://na1.salesforce.com");
    }

    #[test]
    fn test_invalid_instance_url() {
        let err = SalesforceClient::new("na1.salesforce.com", "token").unwrap_err();
        assert!(matches!(err.kind, ErrorKind::Config(_)));
    }

    #[test]
    fn test_debug_redacts_token() {
        let client = SalesforceClient::new("https://na1.salesforce.com", "secret-token").unwrap();
        let debug = format!("{client:?}");
        assert!(debug.contains("[REDACTED]"));
        assert!(!debug.contains("secret-token"));
    }

    #[test]
    fn test_query_result_deserialize() {
        let json = r#"{
            "totalSize": 2,
            "done": false,
            "nextRecordsUrl": "/services/data/v62.0/query/01gxx-2000",
            "records": [{"Id": "003A"}, {"Id": "003B"}]
        }"#;
        let result: QueryResult<serde_json::Value> = serde_json::from_str(json).unwrap();
        assert_eq!(result.total_size, 2);
        assert!(!result.done);
        assert!(result.next_records_url.is_some());
        assert_eq!(result.records.len(), 2);
    }

    #[test]
    fn test_query_result_minimal_body() {
        let result: QueryResult<serde_json::Value> =
            serde_json::from_str(r#"{"records": []}"#).unwrap();
        assert!(result.done);
        assert_eq!(result.total_size, 0);
    }

    #[tokio::test]
    async fn test_query_sends_encoded_soql_with_bearer() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/services/data/v62.0/query"))
            .and(query_param("q", "SELECT Id, Name FROM Contact LIMIT 2"))
            .and(header("Authorization", "Bearer tok"))
            .respond_with(
                ResponseTemplate::new(200)
                    .insert_header("Sforce-Limit-Info", "api-usage=5/15000")
                    .set_body_json(serde_json::json!({
                        "totalSize": 2,
                        "done": true,
                        "records": [
                            {"Id": "003A", "Name": "Ada"},
                            {"Id": "003B", "Name": "Grace"}
                        ]
                    })),
            )
            .expect(1)
            .mount(&mock_server)
            .await;

        let client = SalesforceClient::new(mock_server.uri(), "tok").unwrap();
        let result: QueryResult<serde_json::Value> = client
            .query("SELECT Id, Name FROM Contact LIMIT 2")
            .await
            .unwrap();

        assert_eq!(result.records[0]["Name"], "Ada");
        assert_eq!(result.records[1]["Name"], "Grace");
    }

    #[tokio::test]
    async fn test_query_rejected_token() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/services/data/v62.0/query"))
            .respond_with(ResponseTemplate::new(401).set_body_json(serde_json::json!([{
                "errorCode": "INVALID_SESSION_ID",
                "message": "Session expired or invalid"
            }])))
            .mount(&mock_server)
            .await;

        let client = SalesforceClient::new(mock_server.uri(), "stale").unwrap();
        let err = client
            .query::<serde_json::Value>("SELECT Id FROM Contact")
            .await
            .unwrap_err();

        assert!(err.to_string().contains("INVALID_SESSION_ID"));
    }

    #[tokio::test]
    async fn test_query_malformed_body() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/services/data/v62.0/query"))
            .respond_with(ResponseTemplate::new(200).set_body_string("<html>login</html>"))
            .mount(&mock_server)
            .await;

        let client = SalesforceClient::new(mock_server.uri(), "tok").unwrap();
        let err = client
            .query::<serde_json::Value>("SELECT Id FROM Contact")
            .await
            .unwrap_err();

        assert!(matches!(err.kind, ErrorKind::Json(_)));
    }
}
