//! Record endpoints — one generic handler for every catalog operation.

use axum::Json;
use serde::Deserialize;
use serde_json::{Value, json};
use sn_table_client::TableQuery;

use crate::catalog::{DEFAULT_LIMIT, Lookup, MAX_LIMIT, Operation};
use crate::error::{ApiError, ApiResult};
use crate::state::AppState;

/// Query-string parameters accepted by list operations.
#[derive(Debug, Default, Deserialize)]
pub struct ListParams {
    pub limit: Option<u32>,
}

/// Effective row limit: default when absent, clamped to `1..=MAX_LIMIT`.
pub fn effective_limit(limit: Option<u32>) -> u32 {
    limit.unwrap_or(DEFAULT_LIMIT).clamp(1, MAX_LIMIT)
}

/// Path values are matched literally. `^` separates encoded-query clauses,
/// so a value carrying one could widen the filter.
pub fn check_path_value(op: &Operation, value: &str) -> ApiResult<()> {
    if value.contains('^') {
        let param = op.path_param().unwrap_or("path parameter");
        return Err(ApiError::BadRequest(format!("{param} must not contain '^'")));
    }
    Ok(())
}

/// Table query for `op` given its path value (if any) and list parameters.
pub fn build_query(op: &Operation, value: Option<&str>, params: &ListParams) -> TableQuery {
    let query = TableQuery::new(op.table).fields(op.fields.iter().copied());
    match (op.lookup, value) {
        (Lookup::AuthCheck, _) => query.limit(1),
        (Lookup::List, _) => query.limit(effective_limit(params.limit)),
        (Lookup::One { key, .. }, Some(v)) | (Lookup::Field { key, .. }, Some(v)) => {
            query.filter_eq(key, v).limit(1)
        }
        (Lookup::Filtered { key, .. }, Some(v)) => query.filter_eq(key, v),
        (_, None) => query,
    }
}

/// Run `op` against the record fetcher and shape the response body.
pub async fn invoke(
    state: &AppState,
    op: &'static Operation,
    value: Option<String>,
    params: ListParams,
) -> ApiResult<Json<Value>> {
    if op.path_param().is_some() && value.is_none() {
        return Err(ApiError::Internal(format!(
            "missing path parameter for {}",
            op.name
        )));
    }
    if let Some(v) = value.as_deref() {
        check_path_value(op, v)?;
    }

    let query = build_query(op, value.as_deref(), &params);
    tracing::debug!(tool = op.name, table = op.table, "invoking operation");

    match op.lookup {
        Lookup::AuthCheck => {
            let records = state.fetcher.fetch(&query).await.map_err(|e| {
                tracing::warn!(error = %e, "credential check failed");
                ApiError::Unauthorized(format!("Authentication failed: {e}"))
            })?;
            Ok(Json(json!({
                "success": true,
                "result": { "result": records },
            })))
        }
        Lookup::List => {
            let records = state.fetcher.fetch(&query).await?;
            Ok(Json(json!(records)))
        }
        Lookup::One { .. } => {
            let record = state
                .fetcher
                .fetch_one(&query, &op.not_found_message())
                .await?;
            Ok(Json(Value::Object(record)))
        }
        Lookup::Filtered { .. } => {
            let records = state.fetcher.fetch(&query).await?;
            if records.is_empty() {
                return Err(ApiError::NotFound(op.not_found_message()));
            }
            Ok(Json(json!(records)))
        }
        Lookup::Field { param, field, .. } => {
            let record = state
                .fetcher
                .fetch_one(&query, &op.not_found_message())
                .await?;
            let mut body = serde_json::Map::new();
            body.insert(param.to_string(), json!(value));
            body.insert(
                field.to_string(),
                record.get(field).cloned().unwrap_or(Value::Null),
            );
            Ok(Json(Value::Object(body)))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::operation;

    #[test]
    fn limit_defaults_and_clamps() {
        assert_eq!(effective_limit(None), DEFAULT_LIMIT);
        assert_eq!(effective_limit(Some(0)), 1);
        assert_eq!(effective_limit(Some(25)), 25);
        assert_eq!(effective_limit(Some(50_000)), MAX_LIMIT);
    }

    #[test]
    fn list_query_uses_limit_and_projection() {
        let op = operation("list_users").unwrap();
        let query = build_query(op, None, &ListParams { limit: Some(3) });
        assert_eq!(query.table, "sys_user");
        assert_eq!(query.limit, Some(3));
        assert!(query.query.is_none());
        assert!(query.fields.contains(&"user_name".to_string()));
    }

    #[test]
    fn incident_query_filters_on_number() {
        let op = operation("get_incident").unwrap();
        let query = build_query(op, Some("INC0042"), &ListParams::default());
        assert_eq!(query.query.as_deref(), Some("number=INC0042"));
        assert_eq!(query.limit, Some(1));
    }

    #[test]
    fn short_description_query_projects_one_field() {
        let op = operation("get_incident_short_description").unwrap();
        let query = build_query(op, Some("INC0001"), &ListParams::default());
        assert_eq!(query.fields, vec!["short_description"]);
        assert_eq!(query.query.as_deref(), Some("number=INC0001"));
    }

    #[test]
    fn schema_query_is_unbounded() {
        let op = operation("get_table_schema").unwrap();
        let query = build_query(op, Some("incident"), &ListParams { limit: Some(5) });
        assert_eq!(query.table, "sys_dictionary");
        assert_eq!(query.query.as_deref(), Some("name=incident"));
        assert_eq!(query.limit, None);
    }

    #[test]
    fn caret_in_path_value_is_rejected() {
        let op = operation("get_user").unwrap();
        let err = check_path_value(op, "nope^ORsys_idISNOTEMPTY").unwrap_err();
        assert!(matches!(err, ApiError::BadRequest(msg) if msg.contains("sys_id")));
        assert!(check_path_value(op, "user1").is_ok());
    }

    #[test]
    fn auth_check_reads_one_row() {
        let op = operation("test_auth").unwrap();
        let query = build_query(op, None, &ListParams { limit: Some(99) });
        assert_eq!(query.table, "sys_user");
        assert_eq!(query.limit, Some(1));
    }
}
