//! Core trait definitions for catalog sources.
//!
//! Implemented by the `modelrank-providers` crate.

use async_trait::async_trait;

use crate::model::CatalogRecord;

/// A remote or local listing of models with creation timestamps.
///
/// Implementations return one complete snapshot per call and keep no state
/// the grader depends on between calls.
#[async_trait]
pub trait CatalogSource: Send + Sync {
    /// Human-readable source name (e.g. "openai").
    fn name(&self) -> &str;

    /// Fetch every record in the catalog.
    async fn list_models(&self) -> anyhow::Result<Vec<CatalogRecord>>;
}
