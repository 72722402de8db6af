//! ServiceNow gateway — library crate for the read-only REST server.
//!
//! Re-exports all modules so the binary (`main.rs`) and external crates
//! (e.g. `sn-e2e-tests`) can access `AppState`, `build_router`, the
//! resource catalog and the prompt mapper.

pub mod catalog;
pub mod config;
pub mod error;
pub mod mapper;
pub mod routes;
pub mod state;
