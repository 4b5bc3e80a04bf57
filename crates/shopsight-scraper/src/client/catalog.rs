//! Multi-page catalog fetch loop for `CatalogClient`.
//!
//! The loop is an explicit finite-state process: `Fetching` requests the
//! current page, `BackingOff(attempt)` sleeps out an exponential 429 delay
//! before retrying the same page or gives up once the retry ceiling is
//! exceeded. Partial results are first-class: any terminating condition
//! other than a 404 returns whatever was already fetched, tagged with an
//! outcome the caller can disclose.

use std::time::Duration;

use crate::error::FetchError;
use crate::types::RawProduct;

use super::{CancelToken, CatalogClient};

/// Result of a full catalog fetch. Partial results retain whatever was
/// fetched before the terminating condition.
#[derive(Debug)]
pub struct CatalogFetchResult {
    /// Products in page order, capped at the configured maximum.
    pub products: Vec<RawProduct>,
    pub outcome: FetchOutcome,
    /// Number of records that were available beyond the product cap but not
    /// kept, when the cap truncated the result.
    pub truncated: Option<usize>,
}

/// How the fetch loop terminated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FetchOutcome {
    /// The catalog was exhausted (empty or short page) or the cap was
    /// reached.
    Complete,
    /// The retry ceiling for consecutive 429 responses was exceeded.
    RateLimited { detail: String },
    /// A non-2xx status, network-level error, or page guard stopped the
    /// fetch.
    Failed { detail: String },
    /// The caller's cancellation token was set between page requests.
    Cancelled,
}

impl FetchOutcome {
    /// `true` for every outcome that may have left the catalog incomplete.
    #[must_use]
    pub fn is_partial(&self) -> bool {
        !matches!(self, FetchOutcome::Complete)
    }

    /// Diagnostic message for partial outcomes, when one exists.
    #[must_use]
    pub fn detail(&self) -> Option<&str> {
        match self {
            FetchOutcome::Complete | FetchOutcome::Cancelled => None,
            FetchOutcome::RateLimited { detail } | FetchOutcome::Failed { detail } => Some(detail),
        }
    }
}

/// Fetch-loop state. `BackingOff` transitions back to `Fetching` after its
/// delay, or terminates the loop once `attempt` exceeds the retry ceiling.
enum FetchState {
    Fetching { page: u32, rate_limit_hits: u32 },
    BackingOff { page: u32, attempt: u32 },
}

impl CatalogClient {
    /// Fetches the store's catalog page by page until it is exhausted, the
    /// product cap is reached, or a terminating condition ends the loop
    /// with a partial result.
    ///
    /// Between successful pages a pacing delay is inserted that grows
    /// mildly with the page number, to stay under the remote rate limiter
    /// as catalogs get large.
    ///
    /// `max_products` is clamped to the configured system cap; records seen
    /// beyond the effective cap are counted in `truncated` instead of kept.
    ///
    /// # Errors
    ///
    /// Only a 404 is a hard error ([`FetchError::NotFound`]): the host does
    /// not expose a catalog at all. Rate-limit exhaustion, other non-2xx
    /// statuses, and network-level failures all degrade to an `Ok` partial
    /// result, since partial competitive intelligence is more useful than
    /// none.
    pub async fn fetch_catalog(
        &self,
        origin: &str,
        max_products: usize,
        cancel: &CancelToken,
    ) -> Result<CatalogFetchResult, FetchError> {
        let max_products = max_products.min(self.config.max_products);
        let page_size = self.config.page_size;
        let max_retries = self.config.rate_limit_max_retries;
        let mut products: Vec<RawProduct> = Vec::new();
        let mut state = FetchState::Fetching {
            page: 1,
            rate_limit_hits: 0,
        };

        let outcome = loop {
            match state {
                FetchState::Fetching {
                    page,
                    rate_limit_hits,
                } => {
                    if cancel.is_cancelled() {
                        tracing::debug!(page, total = products.len(), "catalog fetch cancelled");
                        break FetchOutcome::Cancelled;
                    }

                    if page > self.config.max_pages {
                        break FetchOutcome::Failed {
                            detail: format!(
                                "stopped after {} pages without reaching the end of the catalog",
                                self.config.max_pages
                            ),
                        };
                    }

                    match self.fetch_page(origin, page).await {
                        Ok(batch) => {
                            let batch_len = batch.len();
                            products.extend(batch);
                            tracing::debug!(
                                page,
                                batch = batch_len,
                                total = products.len(),
                                "fetched catalog page"
                            );

                            let short_page = batch_len == 0 || (batch_len as u64) < u64::from(page_size);
                            if short_page || products.len() >= max_products {
                                break FetchOutcome::Complete;
                            }

                            tokio::time::sleep(self.inter_page_delay(page + 1)).await;
                            state = FetchState::Fetching {
                                page: page + 1,
                                rate_limit_hits: 0,
                            };
                        }
                        Err(FetchError::NotFound { url }) => {
                            return Err(FetchError::NotFound { url });
                        }
                        Err(FetchError::RateLimited { .. }) => {
                            state = FetchState::BackingOff {
                                page,
                                attempt: rate_limit_hits + 1,
                            };
                        }
                        Err(err) => {
                            tracing::warn!(
                                page,
                                fetched = products.len(),
                                error = %err,
                                "catalog fetch degraded to a partial result"
                            );
                            break FetchOutcome::Failed {
                                detail: err.to_string(),
                            };
                        }
                    }
                }
                FetchState::BackingOff { page, attempt } => {
                    if attempt > max_retries {
                        break FetchOutcome::RateLimited {
                            detail: format!(
                                "gave up after {attempt} consecutive 429 responses (retry ceiling {max_retries})"
                            ),
                        };
                    }

                    let delay = self.backoff_delay(attempt);
                    tracing::warn!(
                        page,
                        attempt,
                        delay_secs = delay.as_secs(),
                        "rate limited — backing off before retrying page"
                    );
                    tokio::time::sleep(delay).await;
                    state = FetchState::Fetching {
                        page,
                        rate_limit_hits: attempt,
                    };
                }
            }
        };

        let truncated = (products.len() > max_products).then(|| {
            let extra = products.len() - max_products;
            products.truncate(max_products);
            extra
        });

        Ok(CatalogFetchResult {
            products,
            outcome,
            truncated,
        })
    }

    /// Exponential backoff for the n-th consecutive 429:
    /// `backoff_base * 2^attempt` seconds.
    pub(super) fn backoff_delay(&self, attempt: u32) -> Duration {
        // 1 << attempt.min(16) keeps the shift well away from overflow.
        let factor = 1u64 << attempt.min(16);
        Duration::from_secs(self.config.rate_limit_backoff_base_secs.saturating_mul(factor))
    }

    /// Pacing delay inserted before fetching `next_page`: a base delay plus
    /// one step increase every `page_delay_step_every` pages.
    pub(super) fn inter_page_delay(&self, next_page: u32) -> Duration {
        let step_every = self.config.page_delay_step_every.max(1);
        let steps = u64::from(next_page / step_every);
        Duration::from_millis(
            self.config
                .page_delay_base_ms
                .saturating_add(steps.saturating_mul(self.config.page_delay_step_ms)),
        )
    }
}
