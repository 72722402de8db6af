//! HTTP client for the ServiceNow Table API (`/api/now/table/<table>`).
//!
//! Every read is a single authenticated GET; the instance URL and basic
//! credentials come from an explicit `ServiceNowConfig`.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::StatusCode;
use serde::Deserialize;

use crate::config::ServiceNowConfig;
use crate::error::{FetchError, FetchResult};
use crate::fetcher::RecordFetcher;
use crate::query::{Record, TableQuery};

/// Table API response envelope (only the field we need).
#[derive(Deserialize)]
struct TableResponse {
    #[serde(default)]
    result: Vec<Record>,
}

/// Authenticated Table API client.
pub struct ServiceNowClient {
    client: reqwest::Client,
    config: ServiceNowConfig,
}

impl ServiceNowClient {
    pub fn new(config: ServiceNowConfig) -> FetchResult<Self> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| FetchError::Transport(format!("failed to build http client: {e}")))?;
        Ok(Self { client, config })
    }
}

#[async_trait]
impl RecordFetcher for ServiceNowClient {
    async fn fetch(&self, query: &TableQuery) -> FetchResult<Vec<Record>> {
        let url = self.config.table_url(&query.table);
        tracing::debug!(table = %query.table, query = ?query.query, limit = ?query.limit, "table api read");

        let response = self
            .client
            .get(&url)
            .basic_auth(&self.config.username, Some(&self.config.password))
            .header(reqwest::header::ACCEPT, "application/json")
            .query(&query.to_params())
            .send()
            .await
            .map_err(|e| {
                tracing::warn!(table = %query.table, error = %e, "table api request failed");
                FetchError::Transport(e.to_string())
            })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            tracing::warn!(table = %query.table, status = %status, "table api returned error status");
            return Err(if status == StatusCode::UNAUTHORIZED {
                FetchError::Unauthorized(body)
            } else {
                FetchError::Upstream {
                    status: status.as_u16(),
                    body,
                }
            });
        }

        let body: TableResponse = response
            .json()
            .await
            .map_err(|e| FetchError::Decode(e.to_string()))?;
        Ok(body.result)
    }
}
