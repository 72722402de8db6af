//! Table query and record types.

use serde::{Deserialize, Serialize};

/// One record as returned by the Table API: field name to value.
pub type Record = serde_json::Map<String, serde_json::Value>;

/// A single filtered read against a named table.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct TableQuery {
    /// Table name (e.g., "incident", "sys_user").
    pub table: String,
    /// Encoded query passed through as `sysparm_query` (opaque to the gateway).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub query: Option<String>,
    /// Field projection passed as `sysparm_fields`. Empty means all fields.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub fields: Vec<String>,
    /// Row limit passed as `sysparm_limit`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub limit: Option<u32>,
}

impl TableQuery {
    pub fn new(table: impl Into<String>) -> Self {
        Self {
            table: table.into(),
            ..Self::default()
        }
    }

    /// Filter on `field=value`.
    pub fn filter_eq(mut self, field: &str, value: &str) -> Self {
        self.query = Some(format!("{field}={value}"));
        self
    }

    pub fn fields<I, S>(mut self, fields: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.fields = fields.into_iter().map(Into::into).collect();
        self
    }

    pub fn limit(mut self, limit: u32) -> Self {
        self.limit = Some(limit);
        self
    }

    /// Query-string pairs in Table API form.
    pub fn to_params(&self) -> Vec<(&'static str, String)> {
        let mut params = Vec::new();
        if let Some(query) = &self.query {
            params.push(("sysparm_query", query.clone()));
        }
        if !self.fields.is_empty() {
            params.push(("sysparm_fields", self.fields.join(",")));
        }
        if let Some(limit) = self.limit {
            params.push(("sysparm_limit", limit.to_string()));
        }
        params
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builder_sets_all_parts() {
        let query = TableQuery::new("incident")
            .filter_eq("number", "INC0001")
            .fields(["number", "short_description"])
            .limit(1);

        assert_eq!(query.table, "incident");
        assert_eq!(query.query.as_deref(), Some("number=INC0001"));
        assert_eq!(query.fields, vec!["number", "short_description"]);
        assert_eq!(query.limit, Some(1));
    }

    #[test]
    fn params_in_table_api_form() {
        let params = TableQuery::new("sys_db_object")
            .filter_eq("name", "incident")
            .fields(["label", "sys_name"])
            .to_params();

        assert_eq!(
            params,
            vec![
                ("sysparm_query", "name=incident".to_string()),
                ("sysparm_fields", "label,sys_name".to_string()),
            ]
        );
    }

    #[test]
    fn bare_query_has_no_params() {
        assert!(TableQuery::new("task").to_params().is_empty());
    }
}
