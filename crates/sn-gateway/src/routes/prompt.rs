//! Prompt mapping endpoint.

use axum::Json;
use axum::extract::State;
use serde::Deserialize;
use sn_protocol::invocation::MapResult;

use crate::state::AppState;

/// Request body for mapping a prompt.
#[derive(Debug, Deserialize)]
pub struct PromptRequest {
    /// Free-text request, e.g. "details for incident INC0042".
    pub prompt: String,
}

/// POST /prompt — map free text onto a catalog tool.
///
/// Always 200: an unmapped prompt is reported as `{"error": ...}` in the body.
pub async fn map_prompt(
    State(state): State<AppState>,
    Json(req): Json<PromptRequest>,
) -> Json<MapResult> {
    let result = state.mapper.map(&req.prompt);
    match &result {
        MapResult::Resolved(invocation) => tracing::info!(
            mapper = state.mapper.tier_name(),
            tool = %invocation.tool,
            endpoint = %invocation.endpoint,
            "prompt mapped"
        ),
        MapResult::Unresolved { .. } => tracing::info!(
            mapper = state.mapper.tier_name(),
            prompt_len = req.prompt.len(),
            "prompt not mapped"
        ),
    }
    Json(result)
}
