//! Resource catalog — the declarative operation table and the tool registry
//! derived from it.
//!
//! `OPERATIONS` is the single source of truth: the router mounts one route
//! per entry and the catalog publishes one `ToolDescriptor` per entry, so
//! every routed operation is discoverable by construction.

use std::collections::HashMap;

use sn_protocol::tools::{HttpMethod, ParameterSpec, ToolDescriptor};

/// Default number of rows returned by list operations.
pub const DEFAULT_LIMIT: u32 = 10;
/// Upper bound accepted for the `limit` query parameter.
pub const MAX_LIMIT: u32 = 1000;

/// How an operation reads its table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Lookup {
    /// Read one row to prove the credentials work.
    AuthCheck,
    /// List rows, bounded by the `limit` query parameter.
    List,
    /// Exactly one row where `key` equals the path parameter `param`.
    One {
        param: &'static str,
        key: &'static str,
    },
    /// Every row where `key` equals the path parameter `param`.
    Filtered {
        param: &'static str,
        key: &'static str,
    },
    /// A single `field` of the row where `key` equals `param`.
    Field {
        param: &'static str,
        key: &'static str,
        field: &'static str,
    },
}

/// One read operation exposed by the gateway.
#[derive(Debug, Clone, Copy)]
pub struct Operation {
    /// Tool name, unique across the table.
    pub name: &'static str,
    pub description: &'static str,
    /// Route path; `{param}` segments are axum captures.
    pub path: &'static str,
    /// Remote ServiceNow table.
    pub table: &'static str,
    /// Entity label used in not-found messages (e.g., "Incident").
    pub label: &'static str,
    pub lookup: Lookup,
    /// Field projection; empty means all fields.
    pub fields: &'static [&'static str],
}

impl Operation {
    /// The path parameter this operation captures, if any.
    pub fn path_param(&self) -> Option<&'static str> {
        match self.lookup {
            Lookup::AuthCheck | Lookup::List => None,
            Lookup::One { param, .. }
            | Lookup::Filtered { param, .. }
            | Lookup::Field { param, .. } => Some(param),
        }
    }

    /// Message returned when the lookup finds nothing.
    pub fn not_found_message(&self) -> String {
        format!("{} not found.", self.label)
    }

    /// Catalog entry for this operation.
    pub fn descriptor(&self) -> ToolDescriptor {
        let parameters = match self.lookup {
            Lookup::AuthCheck => Vec::new(),
            Lookup::List => vec![ParameterSpec::query_integer(
                "limit",
                format!("Maximum number of records to return (default {DEFAULT_LIMIT}, max {MAX_LIMIT})"),
            )],
            Lookup::One { param, key }
            | Lookup::Filtered { param, key }
            | Lookup::Field { param, key, .. } => vec![ParameterSpec::path(
                param,
                format!("Value matched against the {} `{key}` field", self.table),
            )],
        };

        ToolDescriptor {
            name: self.name.to_string(),
            description: self.description.to_string(),
            method: HttpMethod::Get,
            path: self.path.to_string(),
            parameters,
        }
    }
}

const fn list(
    name: &'static str,
    description: &'static str,
    path: &'static str,
    table: &'static str,
    label: &'static str,
    fields: &'static [&'static str],
) -> Operation {
    Operation {
        name,
        description,
        path,
        table,
        label,
        lookup: Lookup::List,
        fields,
    }
}

const fn by_sys_id(
    name: &'static str,
    description: &'static str,
    path: &'static str,
    table: &'static str,
    label: &'static str,
    fields: &'static [&'static str],
) -> Operation {
    Operation {
        name,
        description,
        path,
        table,
        label,
        lookup: Lookup::One {
            param: "sys_id",
            key: "sys_id",
        },
        fields,
    }
}

// ── Field projections ───────────────────────────────────────────

const INCIDENT_FIELDS: &[&str] = &[
    "sys_id",
    "number",
    "short_description",
    "state",
    "priority",
    "assigned_to",
    "opened_at",
];
const USER_FIELDS: &[&str] = &["sys_id", "user_name", "name", "email", "active"];
const TABLE_LIST_FIELDS: &[&str] = &["name", "label", "super_class_name"];
const TABLE_DESCRIPTION_FIELDS: &[&str] = &["label", "super_class_name", "sys_name", "description"];
const TABLE_SCHEMA_FIELDS: &[&str] = &[
    "element",
    "column_label",
    "internal_type",
    "max_length",
    "mandatory",
];
const KNOWLEDGE_FIELDS: &[&str] = &["sys_id", "number", "short_description", "workflow_state"];
const GROUP_FIELDS: &[&str] = &["sys_id", "name", "description", "manager"];
const CATALOG_ITEM_FIELDS: &[&str] = &["sys_id", "name", "short_description", "category"];
const REQUEST_FIELDS: &[&str] = &[
    "sys_id",
    "number",
    "request_state",
    "requested_for",
    "opened_at",
];
const REQUESTED_ITEM_FIELDS: &[&str] = &["sys_id", "number", "cat_item", "request", "state"];
const CHANGE_FIELDS: &[&str] = &["sys_id", "number", "short_description", "state", "type"];
const TASK_FIELDS: &[&str] = &["sys_id", "number", "short_description", "state"];
const PROBLEM_FIELDS: &[&str] = &["sys_id", "number", "short_description", "state"];
const ASSET_FIELDS: &[&str] = &["sys_id", "display_name", "asset_tag", "install_status"];
const CMDB_FIELDS: &[&str] = &["sys_id", "name", "sys_class_name", "operational_status"];
const AUDIT_FIELDS: &[&str] = &[
    "sys_id",
    "tablename",
    "fieldname",
    "oldvalue",
    "newvalue",
    "user",
    "sys_created_on",
];
const SYSLOG_FIELDS: &[&str] = &["sys_id", "level", "source", "message", "sys_created_on"];

/// Every operation the gateway serves, in documentation order.
pub static OPERATIONS: &[Operation] = &[
    Operation {
        name: "test_auth",
        description: "Test ServiceNow credentials by reading a single user record",
        path: "/test-auth",
        table: "sys_user",
        label: "User",
        lookup: Lookup::AuthCheck,
        fields: &[],
    },
    Operation {
        name: "get_incident_short_description",
        description: "Get the short description for a given incident number",
        path: "/incident-short-description/{incident_number}",
        table: "incident",
        label: "Incident",
        lookup: Lookup::Field {
            param: "incident_number",
            key: "number",
            field: "short_description",
        },
        fields: &["short_description"],
    },
    list(
        "list_incidents",
        "List incidents",
        "/incidents",
        "incident",
        "Incident",
        INCIDENT_FIELDS,
    ),
    Operation {
        name: "get_incident",
        description: "Get incident details by incident number",
        path: "/incident/{incident_number}",
        table: "incident",
        label: "Incident",
        lookup: Lookup::One {
            param: "incident_number",
            key: "number",
        },
        fields: INCIDENT_FIELDS,
    },
    list(
        "list_users",
        "List users",
        "/users",
        "sys_user",
        "User",
        USER_FIELDS,
    ),
    by_sys_id(
        "get_user",
        "Get a user by sys_id",
        "/user/{sys_id}",
        "sys_user",
        "User",
        USER_FIELDS,
    ),
    list(
        "list_tables",
        "List tables defined on the instance",
        "/tables",
        "sys_db_object",
        "Table",
        TABLE_LIST_FIELDS,
    ),
    Operation {
        name: "get_table_description",
        description: "Get the description of a ServiceNow table",
        path: "/table-description/{table_name}",
        table: "sys_db_object",
        label: "Table",
        lookup: Lookup::One {
            param: "table_name",
            key: "name",
        },
        fields: TABLE_DESCRIPTION_FIELDS,
    },
    Operation {
        name: "get_table_schema",
        description: "List the columns of a ServiceNow table",
        path: "/table-schema/{table_name}",
        table: "sys_dictionary",
        label: "Table",
        lookup: Lookup::Filtered {
            param: "table_name",
            key: "name",
        },
        fields: TABLE_SCHEMA_FIELDS,
    },
    list(
        "list_knowledge_articles",
        "List knowledge articles",
        "/knowledge-articles",
        "kb_knowledge",
        "Knowledge article",
        KNOWLEDGE_FIELDS,
    ),
    by_sys_id(
        "get_knowledge_article",
        "Get a knowledge article by sys_id",
        "/knowledge-article/{sys_id}",
        "kb_knowledge",
        "Knowledge article",
        KNOWLEDGE_FIELDS,
    ),
    list(
        "list_groups",
        "List user groups",
        "/groups",
        "sys_user_group",
        "Group",
        GROUP_FIELDS,
    ),
    by_sys_id(
        "get_group",
        "Get a user group by sys_id",
        "/group/{sys_id}",
        "sys_user_group",
        "Group",
        GROUP_FIELDS,
    ),
    list(
        "list_catalog_items",
        "List service catalog items",
        "/catalog-items",
        "sc_cat_item",
        "Catalog item",
        CATALOG_ITEM_FIELDS,
    ),
    by_sys_id(
        "get_catalog_item",
        "Get a service catalog item by sys_id",
        "/catalog-item/{sys_id}",
        "sc_cat_item",
        "Catalog item",
        CATALOG_ITEM_FIELDS,
    ),
    list(
        "list_requests",
        "List service requests",
        "/requests",
        "sc_request",
        "Request",
        REQUEST_FIELDS,
    ),
    by_sys_id(
        "get_request",
        "Get a service request by sys_id",
        "/request/{sys_id}",
        "sc_request",
        "Request",
        REQUEST_FIELDS,
    ),
    list(
        "list_requested_items",
        "List requested items",
        "/requested-items",
        "sc_req_item",
        "Requested item",
        REQUESTED_ITEM_FIELDS,
    ),
    by_sys_id(
        "get_requested_item",
        "Get a requested item by sys_id",
        "/requested-item/{sys_id}",
        "sc_req_item",
        "Requested item",
        REQUESTED_ITEM_FIELDS,
    ),
    list(
        "list_change_requests",
        "List change requests",
        "/change-requests",
        "change_request",
        "Change request",
        CHANGE_FIELDS,
    ),
    by_sys_id(
        "get_change_request",
        "Get a change request by sys_id",
        "/change-request/{sys_id}",
        "change_request",
        "Change request",
        CHANGE_FIELDS,
    ),
    list(
        "list_tasks",
        "List tasks",
        "/tasks",
        "task",
        "Task",
        TASK_FIELDS,
    ),
    by_sys_id(
        "get_task",
        "Get a task by sys_id",
        "/task/{sys_id}",
        "task",
        "Task",
        TASK_FIELDS,
    ),
    list(
        "list_problems",
        "List problems",
        "/problems",
        "problem",
        "Problem",
        PROBLEM_FIELDS,
    ),
    by_sys_id(
        "get_problem",
        "Get a problem by sys_id",
        "/problem/{sys_id}",
        "problem",
        "Problem",
        PROBLEM_FIELDS,
    ),
    list(
        "list_assets",
        "List assets",
        "/assets",
        "alm_asset",
        "Asset",
        ASSET_FIELDS,
    ),
    by_sys_id(
        "get_asset",
        "Get an asset by sys_id",
        "/asset/{sys_id}",
        "alm_asset",
        "Asset",
        ASSET_FIELDS,
    ),
    list(
        "list_cmdb_items",
        "List configuration items",
        "/cmdb-items",
        "cmdb_ci",
        "Configuration item",
        CMDB_FIELDS,
    ),
    by_sys_id(
        "get_cmdb_item",
        "Get a configuration item by sys_id",
        "/cmdb-item/{sys_id}",
        "cmdb_ci",
        "Configuration item",
        CMDB_FIELDS,
    ),
    list(
        "list_audit_records",
        "List audit records",
        "/audit-records",
        "sys_audit",
        "Audit record",
        AUDIT_FIELDS,
    ),
    list(
        "list_system_logs",
        "List system log entries",
        "/system-logs",
        "syslog",
        "Log entry",
        SYSLOG_FIELDS,
    ),
];

/// Look up an operation by tool name.
pub fn operation(name: &str) -> Option<&'static Operation> {
    OPERATIONS.iter().find(|op| op.name == name)
}

/// Inconsistencies detected while building or checking the catalog.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CatalogError {
    #[error("duplicate tool name: {0}")]
    DuplicateTool(String),

    #[error("tool '{tool}' path '{path}' does not match its declared parameters")]
    PathMismatch { tool: String, path: String },

    #[error("unknown tool referenced: {0}")]
    UnknownTool(String),
}

/// Read-only registry of tool descriptors, in insertion order.
#[derive(Debug, Clone)]
pub struct Catalog {
    tools: Vec<ToolDescriptor>,
    index: HashMap<String, usize>,
}

impl Catalog {
    /// Build a catalog from operations, rejecting duplicates and malformed paths.
    pub fn from_operations(operations: &[Operation]) -> Result<Self, CatalogError> {
        let mut tools = Vec::with_capacity(operations.len());
        let mut index = HashMap::with_capacity(operations.len());

        for op in operations {
            let descriptor = op.descriptor();
            let expected: Vec<&str> = op.path_param().into_iter().collect();
            if descriptor.placeholders() != expected {
                return Err(CatalogError::PathMismatch {
                    tool: op.name.to_string(),
                    path: op.path.to_string(),
                });
            }
            if index.insert(descriptor.name.clone(), tools.len()).is_some() {
                return Err(CatalogError::DuplicateTool(descriptor.name));
            }
            tools.push(descriptor);
        }

        Ok(Self { tools, index })
    }

    /// The catalog of every operation in `OPERATIONS`.
    pub fn standard() -> Result<Self, CatalogError> {
        Self::from_operations(OPERATIONS)
    }

    /// All descriptors in documentation order.
    pub fn list(&self) -> &[ToolDescriptor] {
        &self.tools
    }

    pub fn get(&self, name: &str) -> Option<&ToolDescriptor> {
        self.index.get(name).map(|&i| &self.tools[i])
    }

    pub fn contains(&self, name: &str) -> bool {
        self.index.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.tools.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tools.is_empty()
    }

    /// Fail if any of `names` is missing from the catalog.
    pub fn require_tools<'a>(
        &self,
        names: impl IntoIterator<Item = &'a str>,
    ) -> Result<(), CatalogError> {
        for name in names {
            if !self.contains(name) {
                return Err(CatalogError::UnknownTool(name.to_string()));
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sn_protocol::tools::{ParamLocation, ParamType};

    #[test]
    fn standard_catalog_builds() {
        let catalog = Catalog::standard().unwrap();
        assert_eq!(catalog.len(), OPERATIONS.len());
        assert!(!catalog.is_empty());
    }

    #[test]
    fn list_preserves_documentation_order() {
        let catalog = Catalog::standard().unwrap();
        let names: Vec<&str> = catalog.list().iter().map(|t| t.name.as_str()).collect();
        let expected: Vec<&str> = OPERATIONS.iter().map(|op| op.name).collect();
        assert_eq!(names, expected);
        assert_eq!(names[0], "test_auth");
        assert_eq!(names[1], "get_incident_short_description");

        // Repeated calls are identical.
        assert_eq!(catalog.list(), catalog.list());
    }

    #[test]
    fn covers_every_record_kind() {
        let catalog = Catalog::standard().unwrap();
        for name in [
            "list_incidents",
            "get_incident",
            "list_users",
            "get_user",
            "list_tables",
            "get_table_description",
            "get_table_schema",
            "list_knowledge_articles",
            "list_groups",
            "list_catalog_items",
            "list_requests",
            "list_requested_items",
            "list_change_requests",
            "list_tasks",
            "list_problems",
            "list_assets",
            "list_cmdb_items",
            "list_audit_records",
            "list_system_logs",
        ] {
            assert!(catalog.contains(name), "missing {name}");
        }
    }

    #[test]
    fn get_by_name() {
        let catalog = Catalog::standard().unwrap();
        let tool = catalog.get("get_incident").unwrap();
        assert_eq!(tool.path, "/incident/{incident_number}");
        assert_eq!(tool.method, HttpMethod::Get);
        assert_eq!(tool.parameters.len(), 1);
        assert_eq!(tool.parameters[0].name, "incident_number");
        assert_eq!(tool.parameters[0].location, ParamLocation::Path);
        assert!(catalog.get("delete_incident").is_none());
    }

    #[test]
    fn list_tools_declare_integer_limit() {
        let catalog = Catalog::standard().unwrap();
        let tool = catalog.get("list_users").unwrap();
        assert_eq!(tool.parameters[0].name, "limit");
        assert_eq!(tool.parameters[0].kind, ParamType::Integer);
        assert_eq!(tool.parameters[0].location, ParamLocation::Query);
    }

    #[test]
    fn duplicate_names_rejected() {
        let ops = [OPERATIONS[2], OPERATIONS[2]];
        let err = Catalog::from_operations(&ops).unwrap_err();
        assert_eq!(err, CatalogError::DuplicateTool("list_incidents".into()));
    }

    #[test]
    fn path_mismatch_rejected() {
        let mut op = OPERATIONS[3];
        op.path = "/incident/{number}";
        let err = Catalog::from_operations(&[op]).unwrap_err();
        assert!(matches!(err, CatalogError::PathMismatch { .. }));
    }

    #[test]
    fn require_tools_reports_unknown() {
        let catalog = Catalog::standard().unwrap();
        assert!(catalog.require_tools(["list_users", "get_incident"]).is_ok());
        assert_eq!(
            catalog.require_tools(["list_users", "drop_table"]),
            Err(CatalogError::UnknownTool("drop_table".into()))
        );
    }

    #[test]
    fn operation_lookup() {
        let op = operation("get_table_schema").unwrap();
        assert_eq!(op.table, "sys_dictionary");
        assert_eq!(op.path_param(), Some("table_name"));
        assert_eq!(op.not_found_message(), "Table not found.");
        assert!(operation("nope").is_none());
    }
}
