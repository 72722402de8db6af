//! Resource catalog endpoint.

use axum::Json;
use axum::extract::State;
use serde_json::{Value, json};

use crate::state::AppState;

/// GET /resources — every tool descriptor, in catalog order.
pub async fn list_resources(State(state): State<AppState>) -> Json<Value> {
    Json(json!({ "resources": state.catalog.list() }))
}
