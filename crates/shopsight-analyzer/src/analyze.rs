//! End-to-end orchestration of one store analysis.

use shopsight_core::AnalyzerConfig;
use shopsight_scraper::{
    normalize_products, normalize_store_identifier, CancelToken, CatalogClient,
    CatalogFetchResult, FetchError, FetchOutcome, StoreHost,
};

use crate::error::AnalysisError;
use crate::report::AnalysisResult;
use crate::stats::CatalogStatistics;

/// Orchestrates identifier normalization, the concurrent catalog and
/// collection fetches, record normalization, statistics, and
/// classification into one `AnalysisResult`.
///
/// The analyzer owns a request-scoped [`CatalogClient`]: build one per
/// `analyze` invocation. Nothing is cached across calls; repeated analyses
/// of the same store re-fetch from the network.
pub struct StoreAnalyzer {
    client: CatalogClient,
}

impl StoreAnalyzer {
    /// # Errors
    ///
    /// Returns [`AnalysisError::FetchFailed`] if the HTTP client cannot be
    /// constructed.
    pub fn new(config: AnalyzerConfig) -> Result<Self, AnalysisError> {
        let client = CatalogClient::new(config).map_err(|err| AnalysisError::FetchFailed {
            detail: format!("failed to build HTTP client: {err}"),
        })?;
        Ok(Self { client })
    }

    /// Analyzes the store the identifier points at, fetching at most
    /// `max_products` products.
    ///
    /// # Errors
    ///
    /// See [`AnalysisError`] for the failure kinds. Partial catalog data is
    /// not an error: it produces a result flagged `partial` instead.
    pub async fn analyze(
        &self,
        store_identifier: &str,
        max_products: usize,
    ) -> Result<AnalysisResult, AnalysisError> {
        self.analyze_with_cancel(store_identifier, max_products, &CancelToken::new())
            .await
    }

    /// Like [`Self::analyze`], with a cancellation token the external
    /// boundary may set; the fetch loop checks it between page requests.
    ///
    /// # Errors
    ///
    /// See [`AnalysisError`].
    pub async fn analyze_with_cancel(
        &self,
        store_identifier: &str,
        max_products: usize,
        cancel: &CancelToken,
    ) -> Result<AnalysisResult, AnalysisError> {
        let host = normalize_host(store_identifier)?;
        let origin = host.origin();
        self.run(&origin, &host, max_products, cancel).await
    }

    /// Analyzes a store served from an explicit origin (scheme +
    /// authority) instead of `https://{host}`. Used when the storefront is
    /// reached through a local gateway, and by integration tests against
    /// local fixtures.
    ///
    /// # Errors
    ///
    /// See [`AnalysisError`].
    pub async fn analyze_origin(
        &self,
        origin: &str,
        store_identifier: &str,
        max_products: usize,
        cancel: &CancelToken,
    ) -> Result<AnalysisResult, AnalysisError> {
        let host = normalize_host(store_identifier)?;
        self.run(origin, &host, max_products, cancel).await
    }

    async fn run(
        &self,
        origin: &str,
        host: &StoreHost,
        max_products: usize,
        cancel: &CancelToken,
    ) -> Result<AnalysisResult, AnalysisError> {
        tracing::info!(store = %host, max_products, "starting store analysis");

        // No data dependency between the two fetches; each carries its own
        // timeout, so the slower one bounds the wall-clock cost.
        let (catalog, collections) = tokio::join!(
            self.client.fetch_catalog(origin, max_products, cancel),
            self.client.fetch_collections(origin),
        );

        let catalog = catalog.map_err(|err| match err {
            FetchError::NotFound { .. } => AnalysisError::StoreNotFound {
                host: host.to_string(),
                suggestion: host.suggested_platform_host(),
            },
            other => AnalysisError::FetchFailed {
                detail: other.to_string(),
            },
        })?;

        // With nothing fetched there is nothing to degrade to: surface the
        // partial outcome as the fatal cause instead of a misleading
        // no-valid-data failure.
        if catalog.products.is_empty() {
            match &catalog.outcome {
                FetchOutcome::RateLimited { detail } => {
                    return Err(AnalysisError::RateLimited {
                        detail: detail.clone(),
                    });
                }
                FetchOutcome::Failed { detail } => {
                    return Err(AnalysisError::FetchFailed {
                        detail: detail.clone(),
                    });
                }
                FetchOutcome::Complete | FetchOutcome::Cancelled => {}
            }
        }

        let partial = catalog.outcome.is_partial();
        let note = fetch_note(&catalog);
        if let Some(note) = &note {
            tracing::warn!(store = %host, note, "analysis based on incomplete catalog data");
        }

        let products = normalize_products(catalog.products, host);
        let stats = CatalogStatistics::compute(&products).ok_or(AnalysisError::NoValidData)?;

        tracing::info!(
            store = %host,
            products = stats.total_products,
            variants = stats.prices.len(),
            collections = collections.len(),
            partial,
            "store analysis complete"
        );

        Ok(AnalysisResult::assemble(
            host,
            &stats,
            collections.len(),
            partial,
            note,
        ))
    }
}

fn normalize_host(store_identifier: &str) -> Result<StoreHost, AnalysisError> {
    normalize_store_identifier(store_identifier).map_err(|_| AnalysisError::InvalidIdentifier)
}

/// Builds the human-readable incompleteness note for a fetch result, when
/// there is anything to disclose.
fn fetch_note(catalog: &CatalogFetchResult) -> Option<String> {
    let mut notes: Vec<String> = Vec::new();

    match &catalog.outcome {
        FetchOutcome::Complete => {}
        FetchOutcome::RateLimited { detail } | FetchOutcome::Failed { detail } => {
            notes.push(format!("catalog fetch incomplete: {detail}"));
        }
        FetchOutcome::Cancelled => {
            notes.push("catalog fetch cancelled before completion".to_string());
        }
    }

    if let Some(extra) = catalog.truncated {
        notes.push(format!(
            "analysis limited to the first {} products ({extra} more were available)",
            catalog.products.len()
        ));
    }

    if notes.is_empty() {
        None
    } else {
        Some(notes.join("; "))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fetch_note_is_none_for_complete_untruncated_fetches() {
        let result = CatalogFetchResult {
            products: vec![],
            outcome: FetchOutcome::Complete,
            truncated: None,
        };
        assert!(fetch_note(&result).is_none());
    }

    #[test]
    fn fetch_note_names_the_failure_and_truncation() {
        let result = CatalogFetchResult {
            products: vec![],
            outcome: FetchOutcome::Failed {
                detail: "HTTP 503".to_string(),
            },
            truncated: Some(40),
        };
        let note = fetch_note(&result).unwrap();
        assert!(note.contains("HTTP 503"), "{note}");
        assert!(note.contains("40 more were available"), "{note}");
    }
}
