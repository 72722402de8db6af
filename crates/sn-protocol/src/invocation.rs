use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::tools::HttpMethod;

/// Extracted parameter values keyed by parameter name.
pub type Parameters = BTreeMap<String, String>;

/// A resolved, ready-to-call reference to a catalog tool.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InvocationDescriptor {
    /// Name of the catalog tool.
    pub tool: String,
    /// Concrete endpoint path with placeholders substituted.
    pub endpoint: String,
    pub method: HttpMethod,
    #[serde(default)]
    pub parameters: Parameters,
}

/// Outcome of mapping a prompt to a tool.
///
/// Serializes as the bare invocation on success and as `{"error": ...}`
/// when no pattern resolved the prompt.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum MapResult {
    Resolved(InvocationDescriptor),
    Unresolved { error: String },
}

impl MapResult {
    pub fn unresolved(error: impl Into<String>) -> Self {
        Self::Unresolved {
            error: error.into(),
        }
    }

    pub fn is_resolved(&self) -> bool {
        matches!(self, Self::Resolved(_))
    }

    pub fn invocation(&self) -> Option<&InvocationDescriptor> {
        match self {
            Self::Resolved(invocation) => Some(invocation),
            Self::Unresolved { .. } => None,
        }
    }

    pub fn error(&self) -> Option<&str> {
        match self {
            Self::Resolved(_) => None,
            Self::Unresolved { error } => Some(error),
        }
    }
}
