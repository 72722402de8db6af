//! Shared application state for the Axum server.
//!
//! The catalog and mapper are built once and only read afterwards; the
//! record fetcher is either the live `ServiceNowClient` or, in tests and
//! local development, a `MockFetcher`.

use std::sync::Arc;

use sn_table_client::{MockFetcher, RecordFetcher};

use crate::catalog::{Catalog, CatalogError};
use crate::mapper::{PromptMapper, RuleBasedMapper};

/// Shared application state, wrapped in `Arc` for Axum handler sharing.
#[derive(Clone)]
pub struct AppState {
    /// Tool descriptors served by `/resources`.
    pub catalog: Arc<Catalog>,
    /// Prompt mapper behind `/prompt`.
    pub mapper: Arc<dyn PromptMapper>,
    /// Reads records from ServiceNow.
    pub fetcher: Arc<dyn RecordFetcher>,
}

impl AppState {
    /// Build state over `fetcher` with the standard catalog and rule set.
    ///
    /// Fails if the catalog is inconsistent or a rule targets a missing tool.
    pub fn new(fetcher: Arc<dyn RecordFetcher>) -> Result<Self, CatalogError> {
        let catalog = Arc::new(Catalog::standard()?);
        let mapper = RuleBasedMapper::new(catalog.clone())?;
        Ok(Self {
            catalog,
            mapper: Arc::new(mapper),
            fetcher,
        })
    }

    /// Create state backed by an in-memory fetcher with sample records (for tests).
    pub fn with_sample_data() -> Result<Self, CatalogError> {
        Self::new(Arc::new(MockFetcher::with_sample_data()))
    }
}
