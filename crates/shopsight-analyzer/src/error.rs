use thiserror::Error;

/// Typed failure surfaced across the `analyze` boundary.
///
/// Every variant carries a short, specific message; `kind()` exposes a
/// stable machine-readable tag so collaborators can match on the failure
/// class without parsing prose.
#[derive(Debug, Error)]
pub enum AnalysisError {
    #[error("store identifier is empty or unusable; provide a hostname like \"store.example.com\"")]
    InvalidIdentifier,

    #[error("store not found at {host}{}", .suggestion.as_deref().map(|s| format!("; this may not be a platform-hosted store, try {s}")).unwrap_or_default())]
    StoreNotFound {
        host: String,
        suggestion: Option<String>,
    },

    #[error("rate limited before any catalog page could be fetched: {detail}")]
    RateLimited { detail: String },

    #[error("catalog fetch failed with no data collected: {detail}")]
    FetchFailed { detail: String },

    #[error("no valid product data found; the store may not expose a catalog or has no parseable prices")]
    NoValidData,
}

impl AnalysisError {
    /// Stable kind tag for the boundary contract.
    #[must_use]
    pub fn kind(&self) -> &'static str {
        match self {
            AnalysisError::InvalidIdentifier => "InvalidIdentifier",
            AnalysisError::StoreNotFound { .. } => "StoreNotFound",
            AnalysisError::RateLimited { .. } => "RateLimited",
            AnalysisError::FetchFailed { .. } => "FetchFailed",
            AnalysisError::NoValidData => "NoValidData",
        }
    }
}
