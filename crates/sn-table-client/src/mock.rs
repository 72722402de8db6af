//! Mock record fetcher for testing — serves pre-loaded tables from memory.

use std::collections::HashMap;
use std::sync::Mutex;

use async_trait::async_trait;
use serde_json::{Value, json};

use crate::error::{FetchError, FetchResult};
use crate::fetcher::RecordFetcher;
use crate::query::{Record, TableQuery};

/// In-memory stand-in for a ServiceNow instance.
///
/// Understands `field=value` encoded queries, field projection and limits.
/// Every query it receives is recorded for later assertions.
#[derive(Default)]
pub struct MockFetcher {
    tables: HashMap<String, Vec<Record>>,
    failure: Option<FetchError>,
    queries: Mutex<Vec<TableQuery>>,
}

impl MockFetcher {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a table with the given records. Non-object values are skipped.
    pub fn add_table(&mut self, table: impl Into<String>, records: Vec<Value>) {
        let records = records
            .into_iter()
            .filter_map(|r| match r {
                Value::Object(map) => Some(map),
                _ => None,
            })
            .collect();
        self.tables.insert(table.into(), records);
    }

    /// Make every fetch fail with `error`.
    pub fn failing(error: FetchError) -> Self {
        Self {
            failure: Some(error),
            ..Self::default()
        }
    }

    /// Queries received so far, oldest first.
    pub fn queries(&self) -> Vec<TableQuery> {
        self.queries
            .lock()
            .map(|q| q.clone())
            .unwrap_or_default()
    }

    /// Create a mock with one or two records in every table the gateway reads.
    pub fn with_sample_data() -> Self {
        let mut m = Self::new();
        m.add_table(
            "incident",
            vec![
                json!({"sys_id": "a1b2", "number": "INC0001", "short_description": "Email server down", "state": "2", "priority": "1"}),
                json!({"sys_id": "c3d4", "number": "INC0042", "short_description": "VPN drops every hour", "state": "1", "priority": "3"}),
            ],
        );
        m.add_table(
            "sys_user",
            vec![
                json!({"sys_id": "user1", "user_name": "abel.tuter", "name": "Abel Tuter", "email": "abel.tuter@example.com"}),
                json!({"sys_id": "user2", "user_name": "beth.anglin", "name": "Beth Anglin", "email": "beth.anglin@example.com"}),
            ],
        );
        m.add_table(
            "sys_db_object",
            vec![
                json!({"name": "incident", "label": "Incident", "super_class_name": "task", "sys_name": "Incident", "description": ""}),
                json!({"name": "problem", "label": "Problem", "super_class_name": "task", "sys_name": "Problem", "description": ""}),
            ],
        );
        m.add_table(
            "sys_dictionary",
            vec![
                json!({"name": "incident", "element": "number", "column_label": "Number", "internal_type": "string", "max_length": "40", "mandatory": "false"}),
                json!({"name": "incident", "element": "short_description", "column_label": "Short description", "internal_type": "string", "max_length": "160", "mandatory": "true"}),
            ],
        );
        m.add_table(
            "kb_knowledge",
            vec![json!({"sys_id": "kb1", "number": "KB0001", "short_description": "How to reset your password"})],
        );
        m.add_table(
            "sys_user_group",
            vec![json!({"sys_id": "group1", "name": "Service Desk", "description": "First line support"})],
        );
        m.add_table(
            "sc_cat_item",
            vec![json!({"sys_id": "cat1", "name": "Standard Laptop", "short_description": "Lenovo T14"})],
        );
        m.add_table(
            "sc_request",
            vec![json!({"sys_id": "req1", "number": "REQ0001", "request_state": "in_process"})],
        );
        m.add_table(
            "sc_req_item",
            vec![json!({"sys_id": "ritm1", "number": "RITM0001", "cat_item": "cat1"})],
        );
        m.add_table(
            "change_request",
            vec![json!({"sys_id": "chg1", "number": "CHG0001", "short_description": "Patch mail cluster"})],
        );
        m.add_table(
            "task",
            vec![json!({"sys_id": "task1", "number": "TASK0001", "short_description": "Order cables"})],
        );
        m.add_table(
            "problem",
            vec![json!({"sys_id": "prob1", "number": "PRB0001", "short_description": "Recurring VPN drops"})],
        );
        m.add_table(
            "alm_asset",
            vec![json!({"sys_id": "asset1", "display_name": "Lenovo T14 - 001", "asset_tag": "P1000001"})],
        );
        m.add_table(
            "cmdb_ci",
            vec![json!({"sys_id": "ci1", "name": "mail-01", "sys_class_name": "cmdb_ci_server"})],
        );
        m.add_table(
            "sys_audit",
            vec![json!({"sys_id": "audit1", "tablename": "incident", "fieldname": "state", "oldvalue": "1", "newvalue": "2"})],
        );
        m.add_table(
            "syslog",
            vec![json!({"sys_id": "log1", "level": "0", "source": "gateway", "message": "Started"})],
        );
        m
    }
}

/// Split a `field=value` encoded query.
fn parse_filter(query: &str) -> Option<(&str, &str)> {
    query.split_once('=')
}

fn matches_filter(record: &Record, filter: Option<(&str, &str)>) -> bool {
    match filter {
        None => true,
        Some((field, value)) => record
            .get(field)
            .is_some_and(|v| v.as_str() == Some(value)),
    }
}

fn project(record: &Record, fields: &[String]) -> Record {
    if fields.is_empty() {
        return record.clone();
    }
    record
        .iter()
        .filter(|(k, _)| fields.iter().any(|f| f == *k))
        .map(|(k, v)| (k.clone(), v.clone()))
        .collect()
}

#[async_trait]
impl RecordFetcher for MockFetcher {
    async fn fetch(&self, query: &TableQuery) -> FetchResult<Vec<Record>> {
        if let Ok(mut log) = self.queries.lock() {
            log.push(query.clone());
        }

        if let Some(err) = &self.failure {
            return Err(err.clone());
        }

        let Some(records) = self.tables.get(&query.table) else {
            return Ok(Vec::new());
        };

        let filter = query.query.as_deref().and_then(parse_filter);
        let limit = query.limit.map_or(usize::MAX, |l| l as usize);
        Ok(records
            .iter()
            .filter(|r| matches_filter(r, filter))
            .take(limit)
            .map(|r| project(r, &query.fields))
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn filters_by_field() {
        let mock = MockFetcher::with_sample_data();
        let records = mock
            .fetch(&TableQuery::new("incident").filter_eq("number", "INC0042"))
            .await
            .unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0]["sys_id"], "c3d4");
    }

    #[tokio::test]
    async fn projects_fields_and_limits() {
        let mock = MockFetcher::with_sample_data();
        let records = mock
            .fetch(&TableQuery::new("sys_user").fields(["user_name"]).limit(1))
            .await
            .unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].len(), 1);
        assert_eq!(records[0]["user_name"], "abel.tuter");
    }

    #[tokio::test]
    async fn unknown_table_is_empty() {
        let mock = MockFetcher::with_sample_data();
        let records = mock.fetch(&TableQuery::new("u_custom")).await.unwrap();
        assert!(records.is_empty());
    }

    #[tokio::test]
    async fn fetch_one_missing_is_not_found() {
        let mock = MockFetcher::with_sample_data();
        let err = mock
            .fetch_one(
                &TableQuery::new("problem").filter_eq("sys_id", "nope"),
                "Problem not found.",
            )
            .await
            .unwrap_err();
        assert_eq!(err, FetchError::NotFound("Problem not found.".into()));
    }

    #[tokio::test]
    async fn failing_mock_returns_error_and_records_query() {
        let mock = MockFetcher::failing(FetchError::Unauthorized("bad password".into()));
        let query = TableQuery::new("sys_user").limit(1);
        let err = mock.fetch(&query).await.unwrap_err();

        assert!(matches!(err, FetchError::Unauthorized(_)));
        assert_eq!(mock.queries(), vec![query]);
    }
}
