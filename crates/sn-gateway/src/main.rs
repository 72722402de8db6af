//! ServiceNow gateway — read-only REST server.
//!
//! Serves the resource catalog (`/resources`), the prompt mapper (`/prompt`)
//! and one GET endpoint per catalog operation.

use std::sync::Arc;

use tokio::net::TcpListener;
use tracing_subscriber::EnvFilter;

use sn_gateway::config::GatewayConfig;
use sn_gateway::routes;
use sn_gateway::state::AppState;
use sn_table_client::ServiceNowClient;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .json()
        .init();

    tracing::info!(version = env!("CARGO_PKG_VERSION"), "sn-gateway starting");

    let config = GatewayConfig::from_env()?;
    tracing::info!(instance = %config.servicenow.instance_url, "using ServiceNow instance");

    let client = ServiceNowClient::new(config.servicenow.clone())?;
    let state = AppState::new(Arc::new(client))?;
    tracing::info!(tools = state.catalog.len(), "resource catalog ready");

    let app = routes::build_router(state);

    let addr = config.listen_addr();
    let listener = TcpListener::bind(&addr).await?;
    tracing::info!(addr = %addr, "listening");

    axum::serve(listener, app).await?;

    Ok(())
}
