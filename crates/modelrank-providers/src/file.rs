//! Catalog read from a local JSON file.
//!
//! Accepts either the listing envelope returned by `/v1/models`
//! (`{"data": [...]}`) or a bare array of records.

use std::path::{Path, PathBuf};

use anyhow::Context;
use async_trait::async_trait;
use serde::Deserialize;

use modelrank_core::model::CatalogRecord;
use modelrank_core::traits::CatalogSource;

/// A catalog snapshot saved to disk.
pub struct FileCatalog {
    path: PathBuf,
}

impl FileCatalog {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum CatalogFile {
    Envelope { data: Vec<CatalogRecord> },
    Records(Vec<CatalogRecord>),
}

/// Decode a catalog listing from JSON text.
pub fn parse_catalog_json(content: &str) -> anyhow::Result<Vec<CatalogRecord>> {
    let file: CatalogFile =
        serde_json::from_str(content).context("expected a model listing or an array of records")?;
    Ok(match file {
        CatalogFile::Envelope { data } => data,
        CatalogFile::Records(records) => records,
    })
}

#[async_trait]
impl CatalogSource for FileCatalog {
    fn name(&self) -> &str {
        "file"
    }

    async fn list_models(&self) -> anyhow::Result<Vec<CatalogRecord>> {
        let content = tokio::fs::read_to_string(&self.path)
            .await
            .with_context(|| format!("failed to read catalog file: {}", self.path.display()))?;
        let records = parse_catalog_json(&content)
            .with_context(|| format!("failed to parse catalog file: {}", self.path.display()))?;
        tracing::debug!(count = records.len(), path = %self.path.display(), "loaded catalog file");
        Ok(records)
    }
}
