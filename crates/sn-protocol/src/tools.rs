use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// HTTP method a tool is invoked with. The gateway is read-only.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "UPPERCASE")]
pub enum HttpMethod {
    #[default]
    Get,
}

impl HttpMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Get => "GET",
        }
    }
}

impl std::fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Declared type of a tool parameter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ParamType {
    String,
    Integer,
}

/// Where a parameter is carried in the request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ParamLocation {
    /// Substituted into a `{name}` segment of the path template.
    Path,
    /// Sent as a query-string argument.
    Query,
}

/// One declared parameter of a tool.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParameterSpec {
    pub name: String,
    #[serde(rename = "type")]
    pub kind: ParamType,
    #[serde(rename = "in")]
    pub location: ParamLocation,
    pub description: String,
}

impl ParameterSpec {
    pub fn path(name: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            kind: ParamType::String,
            location: ParamLocation::Path,
            description: description.into(),
        }
    }

    pub fn query_integer(name: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            kind: ParamType::Integer,
            location: ParamLocation::Query,
            description: description.into(),
        }
    }
}

/// Catalog entry describing one invocable read operation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ToolDescriptor {
    /// Unique tool name (e.g., "get_incident").
    pub name: String,
    pub description: String,
    pub method: HttpMethod,
    /// Path template, e.g. `/incident/{incident_number}`.
    pub path: String,
    #[serde(default)]
    pub parameters: Vec<ParameterSpec>,
}

impl ToolDescriptor {
    /// Names of the `{placeholder}` segments in the path template, in order.
    pub fn placeholders(&self) -> Vec<&str> {
        let mut names = Vec::new();
        let mut rest = self.path.as_str();
        while let Some(open) = rest.find('{') {
            let Some(close) = rest[open..].find('}') else {
                break;
            };
            names.push(&rest[open + 1..open + close]);
            rest = &rest[open + close + 1..];
        }
        names
    }

    /// Substitute `parameters` into the path template.
    ///
    /// Placeholders without a matching parameter are left as-is.
    pub fn resolve_endpoint(&self, parameters: &BTreeMap<String, String>) -> String {
        let mut endpoint = self.path.clone();
        for (name, value) in parameters {
            endpoint = endpoint.replace(&format!("{{{name}}}"), value);
        }
        endpoint
    }
}
