//! Catalog fetch error types.

use thiserror::Error;

/// Errors that can occur when fetching a model catalog.
#[derive(Debug, Error)]
pub enum CatalogError {
    /// The API returned a 429 rate limit response.
    #[error("rate limited, retry after {retry_after_ms}ms")]
    RateLimited { retry_after_ms: u64 },

    /// Authentication failed (invalid or missing API key).
    #[error("authentication failed: {0}")]
    AuthenticationFailed(String),

    /// The API returned an error response.
    #[error("API error (HTTP {status}): {message}")]
    ApiError { status: u16, message: String },

    /// The request timed out.
    #[error("request timed out after {0}s")]
    Timeout(u64),

    /// A network error occurred.
    #[error("network error: {0}")]
    NetworkError(String),

    /// The listing could not be decoded.
    #[error("invalid catalog response: {0}")]
    InvalidResponse(String),
}

impl CatalogError {
    /// Map a transport error from reqwest.
    pub(crate) fn from_transport(err: reqwest::Error, timeout_secs: u64) -> Self {
        if err.is_timeout() {
            CatalogError::Timeout(timeout_secs)
        } else {
            CatalogError::NetworkError(err.to_string())
        }
    }
}

/// Turn non-success HTTP statuses into a [`CatalogError`].
pub(crate) async fn check_status(
    response: reqwest::Response,
) -> Result<reqwest::Response, CatalogError> {
    let status = response.status().as_u16();
    if status == 429 {
        let retry_after = response
            .headers()
            .get("retry-after")
            .and_then(|v| v.to_str().ok())
            .and_then(|v| v.parse::<u64>().ok())
            .unwrap_or(5)
            * 1000;
        return Err(CatalogError::RateLimited {
            retry_after_ms: retry_after,
        });
    }
    if status == 401 || status == 403 {
        let body = response.text().await.unwrap_or_default();
        return Err(CatalogError::AuthenticationFailed(body));
    }
    if status >= 400 {
        let body = response.text().await.unwrap_or_default();
        return Err(CatalogError::ApiError {
            status,
            message: body,
        });
    }
    Ok(response)
}
