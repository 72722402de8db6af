//! API route definitions and router builder.

pub mod health;
pub mod prompt;
pub mod records;
pub mod resources;

use axum::Router;
use axum::extract::{Path, Query, State};
use axum::routing::{get, post};
use tower_http::compression::CompressionLayer;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::catalog::{OPERATIONS, Operation};
use crate::state::AppState;
use records::ListParams;

/// Build the Axum router with all routes and middleware.
pub fn build_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let router = Router::new()
        .route("/health", get(health::health))
        .route("/resources", get(resources::list_resources))
        .route("/prompt", post(prompt::map_prompt));

    OPERATIONS
        .iter()
        .fold(router, mount_operation)
        .layer(TraceLayer::new_for_http())
        .layer(CompressionLayer::new())
        .layer(cors)
        .with_state(state)
}

/// Mount one catalog operation at its path template.
fn mount_operation(router: Router<AppState>, op: &'static Operation) -> Router<AppState> {
    match op.path_param() {
        None => router.route(
            op.path,
            get(
                move |State(state): State<AppState>, Query(params): Query<ListParams>| async move {
                    records::invoke(&state, op, None, params).await
                },
            ),
        ),
        Some(_) => router.route(
            op.path,
            get(
                move |State(state): State<AppState>,
                      Path(value): Path<String>,
                      Query(params): Query<ListParams>| async move {
                    records::invoke(&state, op, Some(value), params).await
                },
            ),
        ),
    }
}
