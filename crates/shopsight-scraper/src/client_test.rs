use std::time::Duration;

use shopsight_core::AnalyzerConfig;

use super::*;

fn test_client() -> CatalogClient {
    CatalogClient::new(AnalyzerConfig::default()).expect("failed to build test CatalogClient")
}

#[test]
fn products_url_first_page() {
    let url = CatalogClient::products_url("https://store.example.com", 250, 1);
    assert_eq!(url, "https://store.example.com/products.json?limit=250&page=1");
}

#[test]
fn products_url_later_page() {
    let url = CatalogClient::products_url("https://store.example.com", 250, 7);
    assert_eq!(url, "https://store.example.com/products.json?limit=250&page=7");
}

#[test]
fn products_url_strips_trailing_slash() {
    let url = CatalogClient::products_url("https://store.example.com/", 50, 1);
    assert_eq!(url, "https://store.example.com/products.json?limit=50&page=1");
}

#[test]
fn collections_url_shape() {
    let url = CatalogClient::collections_url("https://store.example.com");
    assert_eq!(url, "https://store.example.com/collections.json");
}

#[test]
fn backoff_delay_doubles_per_consecutive_hit() {
    let client = test_client();
    assert_eq!(client.backoff_delay(1), Duration::from_secs(2));
    assert_eq!(client.backoff_delay(2), Duration::from_secs(4));
    assert_eq!(client.backoff_delay(3), Duration::from_secs(8));
}

#[test]
fn backoff_delay_zero_base_disables_waiting() {
    let config = AnalyzerConfig {
        rate_limit_backoff_base_secs: 0,
        ..AnalyzerConfig::default()
    };
    let client = CatalogClient::new(config).unwrap();
    assert_eq!(client.backoff_delay(3), Duration::from_secs(0));
}

#[test]
fn inter_page_delay_steps_up_every_five_pages() {
    let client = test_client();
    assert_eq!(client.inter_page_delay(2), Duration::from_millis(500));
    assert_eq!(client.inter_page_delay(4), Duration::from_millis(500));
    assert_eq!(client.inter_page_delay(5), Duration::from_millis(700));
    assert_eq!(client.inter_page_delay(9), Duration::from_millis(700));
    assert_eq!(client.inter_page_delay(10), Duration::from_millis(900));
}

#[test]
fn cancel_token_starts_clear_and_latches() {
    let token = CancelToken::new();
    assert!(!token.is_cancelled());

    let clone = token.clone();
    clone.cancel();
    assert!(token.is_cancelled(), "cancel must be visible through clones");
}
