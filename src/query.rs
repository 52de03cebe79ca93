//! The contact query.

use sfquery_client::{QueryResult, Result, SalesforceClient};
use tracing::{debug, instrument};

/// The one query this program runs.
pub const CONTACT_QUERY: &str = "SELECT Id, Account.Name, Name FROM Contact LIMIT 5";

/// A record as returned by the query API: field name to value, nested
/// relationships (`Account.Name`) as nested objects, `attributes` included.
pub type Record = serde_json::Map<String, serde_json::Value>;

/// Runs [`CONTACT_QUERY`] against one instance with one access token.
#[derive(Debug, Clone)]
pub struct ContactQuery {
    client: SalesforceClient,
}

impl ContactQuery {
    /// Build an authenticated client bound to `instance_url`.
    ///
    /// Fails if `instance_url` is not an absolute URL.
    pub fn new(
        instance_url: impl Into<String>,
        access_token: impl Into<String>,
        api_version: impl Into<String>,
    ) -> Result<Self> {
        let client = SalesforceClient::new(instance_url, access_token)?.with_api_version(api_version);
        Ok(Self { client })
    }

    /// Execute the query once and return the records in the order received.
    ///
    /// Only the first batch is read; `nextRecordsUrl` is not followed.
    #[instrument(skip(self), fields(instance_url = %self.client.instance_url()))]
    pub async fn run(&self) -> Result<Vec<Record>> {
        let result: QueryResult<Record> = self.client.query(CONTACT_QUERY).await?;

        if !result.done {
            debug!(
                total_size = result.total_size,
                returned = result.records.len(),
                "More records available; not fetching further batches"
            );
        }

        Ok(result.records)
    }
}
