//! Store identifier normalization.
//!
//! Users hand the analyzer anything from `"Store.Example.com/"` to
//! `"https://www.store.example.com"`. Everything downstream (URL building,
//! the currency heuristic, 404 remediation hints) works off one canonical
//! hostname, derived exactly once per request.

use std::fmt;

use crate::error::FetchError;

/// Canonical store hostname: lowercase, no scheme, no trailing slash, no
/// `www.` prefix. Immutable once derived.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoreHost(String);

impl StoreHost {
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// HTTPS origin for this host, e.g. `"https://store.example.com"`.
    #[must_use]
    pub fn origin(&self) -> String {
        format!("https://{}", self.0)
    }

    /// Whether the host already points at a platform-hosted subdomain.
    #[must_use]
    pub fn is_platform_subdomain(&self) -> bool {
        self.0.contains(".myshopify.com")
    }

    /// Alternate platform hostname to suggest when the storefront 404s,
    /// or `None` when the host is already platform-hosted.
    #[must_use]
    pub fn suggested_platform_host(&self) -> Option<String> {
        (!self.is_platform_subdomain()).then(|| format!("{}.myshopify.com", self.0))
    }

    /// Substring check used by the currency heuristic (e.g. `".in"`).
    #[must_use]
    pub fn has_country_marker(&self, marker: &str) -> bool {
        self.0.contains(marker)
    }
}

impl fmt::Display for StoreHost {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Canonicalizes a free-form store reference into a bare hostname.
///
/// Trims and lowercases; when a scheme prefix is present the string is
/// parsed as a URL and only its hostname survives (dropping path, query and
/// port). Trailing slashes and a leading `www.` are stripped. No network
/// access happens here.
///
/// # Errors
///
/// Returns [`FetchError::InvalidIdentifier`] only when the input is empty
/// after trimming (or reduces to nothing, e.g. `"www."`).
pub fn normalize_store_identifier(input: &str) -> Result<StoreHost, FetchError> {
    let mut normalized = input.trim().to_lowercase();

    if normalized.is_empty() {
        return Err(FetchError::InvalidIdentifier {
            input: input.to_string(),
        });
    }

    if normalized.starts_with("http://") || normalized.starts_with("https://") {
        if let Ok(url) = reqwest::Url::parse(&normalized) {
            if let Some(host) = url.host_str() {
                normalized = host.to_string();
            }
        }
    }

    let normalized = normalized.trim_end_matches('/');
    let normalized = normalized.strip_prefix("www.").unwrap_or(normalized);

    if normalized.is_empty() {
        return Err(FetchError::InvalidIdentifier {
            input: input.to_string(),
        });
    }

    Ok(StoreHost(normalized.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bare_hostname_passes_through() {
        let host = normalize_store_identifier("store.example.com").unwrap();
        assert_eq!(host.as_str(), "store.example.com");
    }

    #[test]
    fn scheme_and_path_are_stripped() {
        let host = normalize_store_identifier("https://store.example.com/collections/all").unwrap();
        assert_eq!(host.as_str(), "store.example.com");
    }

    #[test]
    fn mixed_case_is_lowercased() {
        let host = normalize_store_identifier("https://Store.Example.com/").unwrap();
        assert_eq!(host.as_str(), "store.example.com");
    }

    #[test]
    fn trailing_slashes_are_stripped() {
        let host = normalize_store_identifier("store.example.com///").unwrap();
        assert_eq!(host.as_str(), "store.example.com");
    }

    #[test]
    fn www_prefix_is_stripped() {
        let host = normalize_store_identifier("www.store.example.com").unwrap();
        assert_eq!(host.as_str(), "store.example.com");
    }

    #[test]
    fn surrounding_whitespace_is_trimmed() {
        let host = normalize_store_identifier("  store.example.com  ").unwrap();
        assert_eq!(host.as_str(), "store.example.com");
    }

    #[test]
    fn normalization_is_idempotent() {
        let once = normalize_store_identifier("https://WWW.Store.Example.com/").unwrap();
        let twice = normalize_store_identifier(once.as_str()).unwrap();
        assert_eq!(once, twice);
    }

    #[test]
    fn all_variants_converge_to_the_same_host() {
        let variants = [
            "store.example.com",
            "www.store.example.com",
            "store.example.com/",
            "https://store.example.com",
            "http://www.store.example.com/",
            "HTTPS://Store.Example.COM///",
        ];
        for variant in variants {
            let host = normalize_store_identifier(variant).unwrap();
            assert_eq!(host.as_str(), "store.example.com", "input: {variant}");
        }
    }

    #[test]
    fn empty_input_is_rejected() {
        let result = normalize_store_identifier("   ");
        assert!(matches!(
            result,
            Err(FetchError::InvalidIdentifier { .. })
        ));
    }

    #[test]
    fn www_only_input_is_rejected() {
        let result = normalize_store_identifier("www.");
        assert!(matches!(
            result,
            Err(FetchError::InvalidIdentifier { .. })
        ));
    }

    #[test]
    fn origin_prepends_https() {
        let host = normalize_store_identifier("store.example.com").unwrap();
        assert_eq!(host.origin(), "https://store.example.com");
    }

    #[test]
    fn platform_subdomain_detection() {
        let direct = normalize_store_identifier("brand.myshopify.com").unwrap();
        assert!(direct.is_platform_subdomain());
        assert!(direct.suggested_platform_host().is_none());

        let custom = normalize_store_identifier("brand.example.com").unwrap();
        assert!(!custom.is_platform_subdomain());
        assert_eq!(
            custom.suggested_platform_host().as_deref(),
            Some("brand.example.com.myshopify.com")
        );
    }

    #[test]
    fn country_marker_is_a_substring_check() {
        let host = normalize_store_identifier("brand.example.in").unwrap();
        assert!(host.has_country_marker(".in"));

        let other = normalize_store_identifier("brand.example.com").unwrap();
        assert!(!other.has_country_marker(".in"));
    }
}
