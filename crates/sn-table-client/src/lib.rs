//! Record fetcher for the ServiceNow Table API.
//!
//! Provides the `RecordFetcher` abstraction (one filtered read against a
//! named table), a reqwest-backed `ServiceNowClient`, and an in-memory
//! `MockFetcher` for tests and local development.

pub mod client;
pub mod config;
pub mod error;
pub mod fetcher;
pub mod mock;
pub mod query;

// Re-export key types for convenience
pub use client::ServiceNowClient;
pub use config::ServiceNowConfig;
pub use error::{FetchError, FetchResult};
pub use fetcher::RecordFetcher;
pub use mock::MockFetcher;
pub use query::{Record, TableQuery};
