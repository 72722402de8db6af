//! Natural-language prompt mapping.
//!
//! Converts caller text ("show users", "details for incident INC0042") into
//! an `InvocationDescriptor` naming a catalog tool and its resolved endpoint.
//! Mapping is a pure, synchronous function of the prompt; it never calls the
//! record fetcher.

pub mod rules;

use sn_protocol::invocation::MapResult;

/// Maps free text onto a catalog tool.
pub trait PromptMapper: Send + Sync {
    /// Resolve `prompt`; an unrecognized prompt is an `Unresolved` value, not an error.
    fn map(&self, prompt: &str) -> MapResult;

    /// Name of this mapper (for logging).
    fn tier_name(&self) -> &str;
}

pub use rules::{IntentPattern, NO_MATCH_MESSAGE, RuleBasedMapper};
