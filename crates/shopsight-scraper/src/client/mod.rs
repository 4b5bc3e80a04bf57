//! HTTP client for a storefront's public catalog endpoints.

mod catalog;
mod collections;

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

use reqwest::{Client, StatusCode};
use shopsight_core::AnalyzerConfig;

use crate::error::FetchError;
use crate::types::{ProductsPage, RawProduct};

pub use catalog::{CatalogFetchResult, FetchOutcome};

/// Cloneable cancellation handle.
///
/// The external boundary may cancel a running `analyze` call (e.g. on client
/// disconnect); the fetch loop checks the token between page requests and
/// returns whatever it has collected so far.
#[derive(Debug, Clone, Default)]
pub struct CancelToken(Arc<AtomicBool>);

impl CancelToken {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.0.store(true, Ordering::SeqCst);
    }

    #[must_use]
    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::SeqCst)
    }
}

/// HTTP client for the paginated `products.json` catalog endpoint and the
/// best-effort `collections.json` endpoint.
///
/// Request-scoped by design: callers build one per `analyze` invocation
/// instead of sharing a process-wide instance, so no state leaks between
/// requests and tests can inject their own configuration.
pub struct CatalogClient {
    client: Client,
    config: AnalyzerConfig,
}

impl CatalogClient {
    /// Creates a `CatalogClient` with the configured timeout and
    /// `User-Agent`.
    ///
    /// # Errors
    ///
    /// Returns [`FetchError::Http`] if the underlying `reqwest::Client`
    /// cannot be constructed (e.g., invalid TLS config).
    pub fn new(config: AnalyzerConfig) -> Result<Self, FetchError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.request_timeout_secs))
            .connect_timeout(Duration::from_secs(10))
            .user_agent(&config.user_agent)
            .build()?;
        Ok(Self { client, config })
    }

    #[must_use]
    pub fn config(&self) -> &AnalyzerConfig {
        &self.config
    }

    /// Fetches one page of products from the store's catalog endpoint.
    ///
    /// `origin` is the scheme+authority the store is served from, e.g.
    /// `"https://store.example.com"`.
    ///
    /// # Errors
    ///
    /// - [`FetchError::NotFound`] — HTTP 404; the host does not expose a
    ///   catalog endpoint.
    /// - [`FetchError::RateLimited`] — HTTP 429; the caller owns backoff.
    /// - [`FetchError::UnexpectedStatus`] — any other non-2xx status.
    /// - [`FetchError::Http`] — network-level failure (timeout, DNS,
    ///   connection reset).
    /// - [`FetchError::Deserialize`] — response body is not a valid
    ///   products page.
    pub async fn fetch_page(&self, origin: &str, page: u32) -> Result<Vec<RawProduct>, FetchError> {
        let url = Self::products_url(origin, self.config.page_size, page);

        let response = self.client.get(&url).send().await?;
        let status = response.status();

        if status == StatusCode::NOT_FOUND {
            return Err(FetchError::NotFound { url });
        }

        if status == StatusCode::TOO_MANY_REQUESTS {
            return Err(FetchError::RateLimited { url });
        }

        if !status.is_success() {
            return Err(FetchError::UnexpectedStatus {
                status: status.as_u16(),
                url,
            });
        }

        let body = response.text().await?;
        let parsed =
            serde_json::from_str::<ProductsPage>(&body).map_err(|e| FetchError::Deserialize {
                context: format!("products page {page} from {origin}"),
                source: e,
            })?;

        Ok(parsed.products)
    }

    /// Builds the catalog URL for the given origin, page size, and page
    /// number.
    fn products_url(origin: &str, limit: u32, page: u32) -> String {
        format!(
            "{}/products.json?limit={limit}&page={page}",
            origin.trim_end_matches('/')
        )
    }

    /// Builds the collections URL for the given origin.
    fn collections_url(origin: &str) -> String {
        format!("{}/collections.json", origin.trim_end_matches('/'))
    }
}

#[cfg(test)]
#[path = "../client_test.rs"]
mod tests;
