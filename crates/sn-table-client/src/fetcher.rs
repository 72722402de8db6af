//! Record fetcher abstraction — one authenticated read against a named table.

use async_trait::async_trait;

use crate::error::{FetchError, FetchResult};
use crate::query::{Record, TableQuery};

/// Performs filtered reads against remote tables.
///
/// Implemented by `ServiceNowClient` (HTTP) and `MockFetcher` (in-memory),
/// so handlers can be exercised without a live instance.
#[async_trait]
pub trait RecordFetcher: Send + Sync {
    /// Read the records matching `query`, in upstream order.
    async fn fetch(&self, query: &TableQuery) -> FetchResult<Vec<Record>>;

    /// Read exactly one record; an empty result becomes `FetchError::NotFound`
    /// carrying `not_found_message`.
    async fn fetch_one(&self, query: &TableQuery, not_found_message: &str) -> FetchResult<Record> {
        self.fetch(query)
            .await?
            .into_iter()
            .next()
            .ok_or_else(|| FetchError::NotFound(not_found_message.to_string()))
    }
}
