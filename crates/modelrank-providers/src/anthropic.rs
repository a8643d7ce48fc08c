//! Anthropic model listing.

use std::collections::HashSet;
use std::time::Duration;

use anyhow::Context;
use async_trait::async_trait;
use chrono::{DateTime, FixedOffset};
use serde::Deserialize;
use tracing::instrument;

use modelrank_core::model::CatalogRecord;
use modelrank_core::traits::CatalogSource;

use crate::error::{check_status, CatalogError};
use crate::openai::{decode_entries, DEFAULT_TIMEOUT_SECS};

const DEFAULT_BASE_URL: &str = "https://api.anthropic.com";
const API_VERSION: &str = "2023-06-01";
const PAGE_LIMIT: u32 = 1000;

/// Lists models from `GET {base_url}/v1/models`, following pagination.
pub struct AnthropicCatalog {
    api_key: String,
    base_url: String,
    timeout_secs: u64,
    client: reqwest::Client,
}

impl AnthropicCatalog {
    pub fn new(
        api_key: &str,
        base_url: Option<String>,
        timeout_secs: Option<u64>,
    ) -> anyhow::Result<Self> {
        let timeout_secs = timeout_secs.unwrap_or(DEFAULT_TIMEOUT_SECS);
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .build()
            .context("failed to build HTTP client")?;

        Ok(Self {
            api_key: api_key.to_string(),
            base_url: base_url
                .unwrap_or_else(|| DEFAULT_BASE_URL.to_string())
                .trim_end_matches('/')
                .to_string(),
            timeout_secs,
            client,
        })
    }

    async fn fetch_page(&self, after_id: Option<&str>) -> Result<AnthropicModelPage, CatalogError> {
        let mut query = vec![("limit", PAGE_LIMIT.to_string())];
        if let Some(after) = after_id {
            query.push(("after_id", after.to_string()));
        }
        let url = reqwest::Url::parse_with_params(&format!("{}/v1/models", self.base_url), &query)
            .map_err(|e| CatalogError::NetworkError(format!("invalid base URL: {e}")))?;

        let response = self
            .client
            .get(url)
            .header("x-api-key", &self.api_key)
            .header("anthropic-version", API_VERSION)
            .send()
            .await
            .map_err(|e| CatalogError::from_transport(e, self.timeout_secs))?;
        let response = check_status(response).await?;

        response
            .json()
            .await
            .map_err(|e| CatalogError::InvalidResponse(e.to_string()))
    }
}

#[derive(Deserialize)]
struct AnthropicModelPage {
    data: Vec<serde_json::Value>,
    #[serde(default)]
    has_more: bool,
    #[serde(default)]
    last_id: Option<String>,
}

#[derive(Deserialize)]
struct AnthropicModel {
    id: String,
    created_at: DateTime<FixedOffset>,
}

#[async_trait]
impl CatalogSource for AnthropicCatalog {
    fn name(&self) -> &str {
        "anthropic"
    }

    #[instrument(skip(self), fields(base_url = %self.base_url))]
    async fn list_models(&self) -> anyhow::Result<Vec<CatalogRecord>> {
        let mut records = Vec::new();
        let mut after_id: Option<String> = None;
        let mut seen_cursors = HashSet::new();

        loop {
            let page = self.fetch_page(after_id.as_deref()).await?;
            records.extend(
                decode_entries::<AnthropicModel>("anthropic", page.data)
                    .into_iter()
                    .map(|m| CatalogRecord::new(m.id, m.created_at.timestamp())),
            );

            match (page.has_more, page.last_id) {
                (true, Some(last)) if seen_cursors.insert(last.clone()) => {
                    after_id = Some(last);
                }
                (true, Some(last)) => {
                    tracing::warn!(last_id = %last, "pagination cursor repeated, stopping");
                    break;
                }
                _ => break,
            }
        }

        tracing::debug!(count = records.len(), "fetched anthropic catalog");
        Ok(records)
    }
}
