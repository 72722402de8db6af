//! Rule-based prompt mapper — ordered intent patterns over lower-cased text.
//!
//! Patterns are evaluated in registration order and the first pattern that
//! both triggers and extracts its parameters wins. A pattern whose trigger
//! matches but whose extraction fails does not consume the prompt; evaluation
//! continues with the next pattern. New intents are appended with
//! `RuleBasedMapper::register`, never inserted, because order decides ties.

use std::sync::{Arc, LazyLock};

use regex::Regex;
use sn_protocol::invocation::{InvocationDescriptor, MapResult, Parameters};

use super::PromptMapper;
use crate::catalog::{Catalog, CatalogError};

/// Returned (HTTP 200, `{"error": ...}`) when no pattern resolves a prompt.
pub const NO_MATCH_MESSAGE: &str = "Sorry, I couldn't map your prompt to a known tool. \
Try rephrasing, e.g. 'get short description for incident INC0010001', 'show users' \
or 'incident details for INC0010001'.";

/// "INC" in any case immediately followed by digits.
static INCIDENT_NUMBER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)inc\d+").unwrap());

static TABLE_NAME: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"describe table\s+([a-z0-9_]+)").unwrap());

/// One ordered intent rule.
#[derive(Debug, Clone, Copy)]
pub struct IntentPattern {
    /// Rule name (for logging).
    pub name: &'static str,
    /// Catalog tool this rule resolves to.
    pub tool: &'static str,
    /// Whether the cue tokens are present in the lower-cased prompt.
    pub trigger: fn(&str) -> bool,
    /// Parameters for the tool; `None` means the rule does not apply.
    pub extract: fn(&str) -> Option<Parameters>,
}

/// The built-in rules, in priority order.
pub fn default_patterns() -> Vec<IntentPattern> {
    vec![
        IntentPattern {
            name: "incident_short_description",
            tool: "get_incident_short_description",
            trigger: |t| contains_all(t, &["short description", "incident"]),
            extract: incident_number_param,
        },
        IntentPattern {
            name: "list_users",
            tool: "list_users",
            trigger: |t| matches_any(t, &["list users", "show users"]),
            extract: no_params,
        },
        IntentPattern {
            name: "incident_details",
            tool: "get_incident",
            trigger: |t| contains_all(t, &["incident", "details"]),
            extract: incident_number_param,
        },
        IntentPattern {
            name: "list_incidents",
            tool: "list_incidents",
            trigger: |t| matches_any(t, &["list incidents", "show incidents"]),
            extract: no_params,
        },
        IntentPattern {
            name: "list_groups",
            tool: "list_groups",
            trigger: |t| matches_any(t, &["list groups", "show groups"]),
            extract: no_params,
        },
        IntentPattern {
            name: "list_problems",
            tool: "list_problems",
            trigger: |t| matches_any(t, &["list problems", "show problems"]),
            extract: no_params,
        },
        IntentPattern {
            name: "list_change_requests",
            tool: "list_change_requests",
            trigger: |t| matches_any(t, &["list change requests", "show change requests"]),
            extract: no_params,
        },
        IntentPattern {
            name: "list_knowledge_articles",
            tool: "list_knowledge_articles",
            trigger: |t| matches_any(t, &["list knowledge articles", "show knowledge articles"]),
            extract: no_params,
        },
        IntentPattern {
            name: "table_description",
            tool: "get_table_description",
            trigger: |t| t.contains("describe table"),
            extract: table_name_param,
        },
    ]
}

/// Check if the text contains any of the given cues.
fn matches_any(text: &str, cues: &[&str]) -> bool {
    cues.iter().any(|c| text.contains(c))
}

/// Check if the text contains every one of the given cues.
fn contains_all(text: &str, cues: &[&str]) -> bool {
    cues.iter().all(|c| text.contains(c))
}

fn no_params(_text: &str) -> Option<Parameters> {
    Some(Parameters::new())
}

/// First incident number in the text, upper-cased.
pub fn extract_incident_number(text: &str) -> Option<String> {
    INCIDENT_NUMBER
        .find(text)
        .map(|m| m.as_str().to_uppercase())
}

fn incident_number_param(text: &str) -> Option<Parameters> {
    let number = extract_incident_number(text)?;
    Some(Parameters::from([("incident_number".to_string(), number)]))
}

fn table_name_param(text: &str) -> Option<Parameters> {
    let name = TABLE_NAME.captures(text)?.get(1)?.as_str();
    Some(Parameters::from([("table_name".to_string(), name.to_string())]))
}

/// Pattern-matching prompt mapper over a resource catalog.
pub struct RuleBasedMapper {
    catalog: Arc<Catalog>,
    patterns: Vec<IntentPattern>,
}

impl RuleBasedMapper {
    /// Mapper with the built-in rules.
    pub fn new(catalog: Arc<Catalog>) -> Result<Self, CatalogError> {
        Self::with_patterns(catalog, default_patterns())
    }

    /// Mapper with custom rules. Fails if a rule targets a tool the catalog lacks.
    pub fn with_patterns(
        catalog: Arc<Catalog>,
        patterns: Vec<IntentPattern>,
    ) -> Result<Self, CatalogError> {
        catalog.require_tools(patterns.iter().map(|p| p.tool))?;
        Ok(Self { catalog, patterns })
    }

    /// Append a rule after all existing ones.
    pub fn register(&mut self, pattern: IntentPattern) -> Result<(), CatalogError> {
        self.catalog.require_tools([pattern.tool])?;
        self.patterns.push(pattern);
        Ok(())
    }

    pub fn patterns(&self) -> &[IntentPattern] {
        &self.patterns
    }
}

impl PromptMapper for RuleBasedMapper {
    fn map(&self, prompt: &str) -> MapResult {
        let normalized = prompt.to_lowercase();

        for pattern in &self.patterns {
            if !(pattern.trigger)(&normalized) {
                continue;
            }
            let Some(parameters) = (pattern.extract)(&normalized) else {
                tracing::debug!(pattern = pattern.name, "cues matched without parameters, trying next rule");
                continue;
            };
            let Some(tool) = self.catalog.get(pattern.tool) else {
                tracing::error!(pattern = pattern.name, tool = pattern.tool, "rule targets unknown tool");
                continue;
            };

            return MapResult::Resolved(InvocationDescriptor {
                tool: tool.name.clone(),
                endpoint: tool.resolve_endpoint(&parameters),
                method: tool.method,
                parameters,
            });
        }

        MapResult::unresolved(NO_MATCH_MESSAGE)
    }

    fn tier_name(&self) -> &str {
        "rules"
    }
}
