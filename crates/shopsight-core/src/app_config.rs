/// Runtime configuration for the catalog acquisition pipeline.
///
/// Every field has a sensible default so the analyzer works out of the box;
/// each can be overridden through a `SHOPSIGHT_*` environment variable (see
/// [`crate::config`]). The configuration value is request-scoped: callers
/// build one per `analyze` invocation rather than sharing a global.
#[derive(Debug, Clone)]
pub struct AnalyzerConfig {
    /// Total per-request timeout for catalog and collection fetches.
    pub request_timeout_secs: u64,
    /// Descriptive client identifier sent with every request.
    pub user_agent: String,
    /// Records requested per catalog page. The remote endpoint caps this
    /// at 250; a short page signals catalog exhaustion.
    pub page_size: u32,
    /// Cap on the number of products accumulated across pages. Overflow is
    /// reported as truncation rather than fetched.
    pub max_products: usize,
    /// Guard against non-terminating catalogs: fetching stops with a
    /// partial result once this many pages have been requested.
    pub max_pages: u32,
    /// Number of consecutive 429 responses tolerated (with backoff) before
    /// the fetch degrades to a partial result.
    pub rate_limit_max_retries: u32,
    /// Base for the exponential 429 backoff: the n-th consecutive hit waits
    /// `rate_limit_backoff_base_secs * 2^n` seconds. Set to `0` to disable
    /// waiting (tests).
    pub rate_limit_backoff_base_secs: u64,
    /// Base inter-page delay in milliseconds.
    pub page_delay_base_ms: u64,
    /// Delay increment applied once per `page_delay_step_every` pages.
    pub page_delay_step_ms: u64,
    /// Page interval at which the inter-page delay grows by one step.
    pub page_delay_step_every: u32,
}

impl Default for AnalyzerConfig {
    fn default() -> Self {
        Self {
            request_timeout_secs: 30,
            user_agent: "shopsight/0.1 (competitive-intelligence)".to_string(),
            page_size: 250,
            max_products: 5000,
            max_pages: 200,
            rate_limit_max_retries: 3,
            rate_limit_backoff_base_secs: 1,
            page_delay_base_ms: 500,
            page_delay_step_ms: 200,
            page_delay_step_every: 5,
        }
    }
}
