//! OpenAI-compatible model listing.

use std::time::Duration;

use anyhow::Context;
use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use tracing::instrument;

use modelrank_core::model::CatalogRecord;
use modelrank_core::traits::CatalogSource;

use crate::error::{check_status, CatalogError};

const DEFAULT_BASE_URL: &str = "https://api.openai.com";
pub(crate) const DEFAULT_TIMEOUT_SECS: u64 = 60;

/// Lists models from `GET {base_url}/v1/models`.
///
/// Works with any proxy exposing the same listing shape; point `base_url`
/// at the proxy root.
pub struct OpenAiCatalog {
    api_key: String,
    base_url: String,
    org_id: Option<String>,
    timeout_secs: u64,
    client: reqwest::Client,
}

impl OpenAiCatalog {
    pub fn new(
        api_key: &str,
        base_url: Option<String>,
        org_id: Option<String>,
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
            org_id,
            timeout_secs,
            client,
        })
    }
}

/// Decode listing entries one at a time, skipping any that do not fit `T`.
pub(crate) fn decode_entries<T: DeserializeOwned>(
    source: &str,
    entries: Vec<serde_json::Value>,
) -> Vec<T> {
    entries
        .into_iter()
        .enumerate()
        .filter_map(|(i, entry)| match serde_json::from_value(entry) {
            Ok(model) => Some(model),
            Err(e) => {
                tracing::warn!(source, index = i, error = %e, "skipping malformed catalog entry");
                None
            }
        })
        .collect()
}

#[derive(Deserialize)]
struct OpenAiModelList {
    data: Vec<serde_json::Value>,
}

#[derive(Deserialize)]
struct OpenAiModel {
    id: String,
    created: i64,
}

#[async_trait]
impl CatalogSource for OpenAiCatalog {
    fn name(&self) -> &str {
        "openai"
    }

    #[instrument(skip(self), fields(base_url = %self.base_url))]
    async fn list_models(&self) -> anyhow::Result<Vec<CatalogRecord>> {
        let mut req = self
            .client
            .get(format!("{}/v1/models", self.base_url))
            .header("Authorization", format!("Bearer {}", self.api_key))
            .header("content-type", "application/json");

        if let Some(org) = &self.org_id {
            req = req.header("OpenAI-Organization", org);
        }

        let response = req
            .send()
            .await
            .map_err(|e| CatalogError::from_transport(e, self.timeout_secs))?;
        let response = check_status(response).await?;

        let listing: OpenAiModelList = response
            .json()
            .await
            .map_err(|e| CatalogError::InvalidResponse(e.to_string()))?;

        let records: Vec<CatalogRecord> = decode_entries::<OpenAiModel>("openai", listing.data)
            .into_iter()
            .map(|m| CatalogRecord::new(m.id, m.created))
            .collect();
        tracing::debug!(count = records.len(), "fetched openai catalog");

        Ok(records)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn listing() -> serde_json::Value {
        serde_json::json!({
            "object": "list",
            "data": [
                {"id": "gpt-4", "object": "model", "created": 1687882411, "owned_by": "openai"},
                {"id": "whisper-1", "object": "model", "created": 1677532384, "owned_by": "openai-internal"}
            ]
        })
    }

    #[tokio::test]
    async fn lists_models() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/v1/models"))
            .and(header("Authorization", "Bearer test-key"))
            .respond_with(ResponseTemplate::new(200).set_body_json(listing()))
            .mount(&server)
            .await;

        let catalog = OpenAiCatalog::new("test-key", Some(server.uri()), None, None).unwrap();
        let records = catalog.list_models().await.unwrap();
        assert_eq!(
            records,
            vec![
                CatalogRecord::new("gpt-4", 1687882411),
                CatalogRecord::new("whisper-1", 1677532384),
            ]
        );
    }

    #[tokio::test]
    async fn proxy_base_url_with_prefix() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/openai/v1/models"))
            .respond_with(ResponseTemplate::new(200).set_body_json(listing()))
            .mount(&server)
            .await;

        let base = format!("{}/openai/", server.uri());
        let catalog = OpenAiCatalog::new("key", Some(base), None, None).unwrap();
        assert_eq!(catalog.list_models().await.unwrap().len(), 2);
    }

    #[tokio::test]
    async fn sends_organization_header() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/v1/models"))
            .and(header("OpenAI-Organization", "org-123"))
            .respond_with(ResponseTemplate::new(200).set_body_json(listing()))
            .mount(&server)
            .await;

        let catalog =
            OpenAiCatalog::new("key", Some(server.uri()), Some("org-123".into()), None).unwrap();
        assert!(catalog.list_models().await.is_ok());
    }

    #[tokio::test]
    async fn unauthorized() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/v1/models"))
            .respond_with(ResponseTemplate::new(401).set_body_string("invalid api key"))
            .mount(&server)
            .await;

        let catalog = OpenAiCatalog::new("bad", Some(server.uri()), None, None).unwrap();
        let err = catalog.list_models().await.unwrap_err();
        assert!(matches!(
            err.downcast_ref::<CatalogError>(),
            Some(CatalogError::AuthenticationFailed(_))
        ));
    }

    #[tokio::test]
    async fn rate_limited() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/v1/models"))
            .respond_with(ResponseTemplate::new(429).insert_header("retry-after", "7"))
            .mount(&server)
            .await;

        let catalog = OpenAiCatalog::new("key", Some(server.uri()), None, None).unwrap();
        let err = catalog.list_models().await.unwrap_err();
        assert!(matches!(
            err.downcast_ref::<CatalogError>(),
            Some(CatalogError::RateLimited {
                retry_after_ms: 7000
            })
        ));
    }

    #[tokio::test]
    async fn server_error() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/v1/models"))
            .respond_with(ResponseTemplate::new(500).set_body_string("internal error"))
            .mount(&server)
            .await;

        let catalog = OpenAiCatalog::new("key", Some(server.uri()), None, None).unwrap();
        let err = catalog.list_models().await.unwrap_err();
        assert!(err.to_string().contains("500"));
    }

    #[tokio::test]
    async fn skips_malformed_entries() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/v1/models"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "data": [
                    {"id": "no-created"},
                    {"id": "gpt-4", "created": 1687882411},
                    {"id": "bad-created", "created": "yesterday"},
                    "not-an-object"
                ]
            })))
            .mount(&server)
            .await;

        let catalog = OpenAiCatalog::new("key", Some(server.uri()), None, None).unwrap();
        let records = catalog.list_models().await.unwrap();
        assert_eq!(records, vec![CatalogRecord::new("gpt-4", 1687882411)]);
    }

    #[tokio::test]
    async fn malformed_listing() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/v1/models"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(serde_json::json!({"data": {"id": "not-a-list"}})),
            )
            .mount(&server)
            .await;

        let catalog = OpenAiCatalog::new("key", Some(server.uri()), None, None).unwrap();
        let err = catalog.list_models().await.unwrap_err();
        assert!(matches!(
            err.downcast_ref::<CatalogError>(),
            Some(CatalogError::InvalidResponse(_))
        ));
    }
}
