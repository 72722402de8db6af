//! Shared test harness for E2E integration tests.
//!
//! Wires the gateway router over a record fetcher and exercises the real
//! prompt → invocation → record read path through HTTP.

#![allow(dead_code)]

use std::sync::Arc;

use axum::Router;
use axum::body::Body;
use axum::http::{Request, StatusCode};
use http_body_util::BodyExt;
use tower::ServiceExt;

use sn_gateway::routes::build_router;
use sn_gateway::state::AppState;
use sn_protocol::invocation::MapResult;
use sn_table_client::{MockFetcher, RecordFetcher};

/// End-to-end test harness: gateway router over a chosen fetcher.
pub struct TestHarness {
    /// Gateway application state.
    pub state: AppState,
    /// Axum router for HTTP requests via `tower::oneshot`.
    pub router: Router,
    /// The in-memory fetcher, when the harness was built over one.
    pub mock: Option<Arc<MockFetcher>>,
}

impl TestHarness {
    /// Harness over `MockFetcher::with_sample_data()`.
    pub fn with_sample_data() -> Self {
        let mock = Arc::new(MockFetcher::with_sample_data());
        let mut h = Self::with_fetcher(mock.clone());
        h.mock = Some(mock);
        h
    }

    /// Harness over any fetcher (e.g., a `ServiceNowClient` aimed at wiremock).
    pub fn with_fetcher(fetcher: Arc<dyn RecordFetcher>) -> Self {
        let state = AppState::new(fetcher).expect("standard catalog is consistent");
        let router = build_router(state.clone());
        Self {
            state,
            router,
            mock: None,
        }
    }

    /// GET `uri`, returning status and JSON body (Null for non-JSON bodies).
    pub async fn get(&self, uri: &str) -> (StatusCode, serde_json::Value) {
        let response = self
            .router
            .clone()
            .oneshot(Request::get(uri).body(Body::empty()).unwrap())
            .await
            .unwrap();
        let status = response.status();
        let body = response.into_body().collect().await.unwrap().to_bytes();
        let json = serde_json::from_slice(&body).unwrap_or(serde_json::Value::Null);
        (status, json)
    }

    /// POST `/prompt` with `{"prompt": text}`.
    pub async fn prompt(&self, text: &str) -> (StatusCode, MapResult) {
        let body = serde_json::json!({ "prompt": text });
        let response = self
            .router
            .clone()
            .oneshot(
                Request::post("/prompt")
                    .header("content-type", "application/json")
                    .body(Body::from(serde_json::to_vec(&body).unwrap()))
                    .unwrap(),
            )
            .await
            .unwrap();
        let status = response.status();
        let body = response.into_body().collect().await.unwrap().to_bytes();
        (status, serde_json::from_slice(&body).unwrap())
    }

    /// Map `text`, then GET the endpoint it resolved to.
    pub async fn follow(&self, text: &str) -> (MapResult, StatusCode, serde_json::Value) {
        let (status, result) = self.prompt(text).await;
        assert_eq!(status, StatusCode::OK);
        let Some(invocation) = result.invocation() else {
            return (result, StatusCode::OK, serde_json::Value::Null);
        };
        let endpoint = invocation.endpoint.clone();
        let (status, json) = self.get(&endpoint).await;
        (result, status, json)
    }
}
