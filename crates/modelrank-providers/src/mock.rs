//! Mock catalog for testing.

use std::sync::atomic::{AtomicU32, Ordering};

use async_trait::async_trait;

use modelrank_core::model::CatalogRecord;
use modelrank_core::traits::CatalogSource;

use crate::error::CatalogError;

/// An in-memory catalog for exercising the grader without network access.
pub struct MockCatalog {
    records: Vec<CatalogRecord>,
    /// When set, every call fails with a network error carrying this message.
    failure: Option<String>,
    call_count: AtomicU32,
}

impl MockCatalog {
    /// Create a mock that always returns these records.
    pub fn new(records: Vec<CatalogRecord>) -> Self {
        Self {
            records,
            failure: None,
            call_count: AtomicU32::new(0),
        }
    }

    /// Create a mock whose fetches always fail.
    pub fn failing(message: &str) -> Self {
        Self {
            records: Vec::new(),
            failure: Some(message.to_string()),
            call_count: AtomicU32::new(0),
        }
    }

    /// Get the number of fetches made.
    pub fn call_count(&self) -> u32 {
        self.call_count.load(Ordering::Relaxed)
    }
}

#[async_trait]
impl CatalogSource for MockCatalog {
    fn name(&self) -> &str {
        "mock"
    }

    async fn list_models(&self) -> anyhow::Result<Vec<CatalogRecord>> {
        self.call_count.fetch_add(1, Ordering::Relaxed);
        if let Some(message) = &self.failure {
            return Err(CatalogError::NetworkError(message.clone()).into());
        }
        Ok(self.records.clone())
    }
}
