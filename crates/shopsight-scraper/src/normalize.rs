//! Normalization from raw catalog records to
//! [`shopsight_core::NormalizedProduct`].
//!
//! Currency resolution is heuristic and intentionally isolated in
//! [`is_reference_currency`]: the remote API does not say which currency a
//! price is quoted in, so the decision rests on the price's magnitude and a
//! country marker in the store hostname. The rule can misclassify high-value
//! foreign prices (and vice versa); it is preserved legacy behavior, not a
//! verified invariant, and lives in one function so it can be swapped
//! without touching the rest of the pipeline.

use chrono::{DateTime, Utc};
use shopsight_core::{Currency, NormalizedProduct, NormalizedVariant};

use crate::identifier::StoreHost;
use crate::types::{PriceField, RawProduct, RawVariant};

/// Fixed conversion rate applied to prices judged to be in the smaller
/// foreign denomination (USD → INR). Rate freshness is out of scope.
pub const USD_TO_INR_RATE: f64 = 83.0;

/// Raw price magnitude above which a price is assumed to already be in the
/// reference currency.
pub const REFERENCE_MAGNITUDE_THRESHOLD: f64 = 100.0;

/// Hostname substring that marks a store as quoting reference-currency
/// prices regardless of magnitude.
pub const REFERENCE_COUNTRY_MARKER: &str = ".in";

/// Decides whether a raw price is already quoted in the reference currency.
///
/// True iff the numeric value exceeds [`REFERENCE_MAGNITUDE_THRESHOLD`] or
/// the store hostname contains [`REFERENCE_COUNTRY_MARKER`].
#[must_use]
pub fn is_reference_currency(raw_price: f64, host: &StoreHost) -> bool {
    raw_price > REFERENCE_MAGNITUDE_THRESHOLD || host.has_country_marker(REFERENCE_COUNTRY_MARKER)
}

/// Normalizes a whole fetched catalog, consuming the raw records.
///
/// Products whose variants all drop stay in the output with an empty
/// variant list; they still count toward catalog breadth downstream.
#[must_use]
pub fn normalize_products(raw: Vec<RawProduct>, host: &StoreHost) -> Vec<NormalizedProduct> {
    raw.into_iter()
        .map(|product| normalize_product(product, host))
        .collect()
}

/// Normalizes a single raw product.
///
/// The sale flag is derived here: it is set iff at least one surviving
/// variant has a compare-at price strictly greater than its price, both in
/// the reference currency.
#[must_use]
pub fn normalize_product(product: RawProduct, host: &StoreHost) -> NormalizedProduct {
    let variants: Vec<NormalizedVariant> = product
        .variants
        .into_iter()
        .filter_map(|variant| normalize_variant(variant, host))
        .collect();

    let on_sale = variants.iter().any(NormalizedVariant::is_discounted);
    let created_at = product.created_at.as_deref().and_then(parse_created_at);

    NormalizedProduct {
        title: product.title,
        category: product.product_type.filter(|s| !s.is_empty()),
        vendor: product.vendor.filter(|s| !s.is_empty()),
        tags: product.tags,
        image_count: product.images.len(),
        on_sale,
        created_at,
        variants,
    }
}

/// Normalizes one variant, or drops it when its price field does not parse
/// as a non-negative decimal. A store with some malformed variants must
/// still be analyzable, so dropping is silent at this level.
///
/// The compare-at price follows the same currency decision as its sibling
/// price; an unparseable or negative compare-at becomes `None` while the
/// variant itself survives.
fn normalize_variant(variant: RawVariant, host: &StoreHost) -> Option<NormalizedVariant> {
    let raw_price = variant.price.as_ref().and_then(PriceField::as_decimal)?;
    if raw_price < 0.0 {
        return None;
    }

    let in_reference = is_reference_currency(raw_price, host);
    let convert = |value: f64| {
        if in_reference {
            value
        } else {
            value * USD_TO_INR_RATE
        }
    };

    let compare_at_price = variant
        .compare_at_price
        .as_ref()
        .and_then(PriceField::as_decimal)
        .filter(|value| *value >= 0.0)
        .map(convert);

    Some(NormalizedVariant {
        title: variant.title.unwrap_or_else(|| "Default".to_string()),
        sku: variant.sku.filter(|s| !s.is_empty()),
        price: convert(raw_price),
        compare_at_price,
        available: variant.available,
        currency: if in_reference {
            Currency::Inr
        } else {
            Currency::Usd
        },
    })
}

fn parse_created_at(raw: &str) -> Option<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(raw)
        .ok()
        .map(|dt| dt.with_timezone(&Utc))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::identifier::normalize_store_identifier;

    fn inr_host() -> StoreHost {
        normalize_store_identifier("brand.example.in").unwrap()
    }

    fn foreign_host() -> StoreHost {
        normalize_store_identifier("brand.example.com").unwrap()
    }

    fn make_variant(price: &str, compare_at: Option<&str>) -> RawVariant {
        RawVariant {
            title: Some("S / Indigo".to_string()),
            sku: Some("KRT-S-IND".to_string()),
            price: Some(PriceField::Text(price.to_string())),
            compare_at_price: compare_at.map(|c| PriceField::Text(c.to_string())),
            available: true,
        }
    }

    fn make_product(variants: Vec<RawVariant>) -> RawProduct {
        RawProduct {
            id: 123_456_789,
            title: "Block Print Kurta".to_string(),
            product_type: Some("Apparel".to_string()),
            vendor: Some("Example Vendor".to_string()),
            tags: vec!["cotton".to_string()],
            created_at: Some("2024-03-01T10:00:00Z".to_string()),
            images: vec![],
            variants,
        }
    }

    #[test]
    fn high_magnitude_price_is_kept_as_reference_currency() {
        let product = make_product(vec![make_variant("1299.00", None)]);
        let normalized = normalize_product(product, &foreign_host());
        assert_eq!(normalized.variants[0].price, 1299.0);
        assert_eq!(normalized.variants[0].currency, Currency::Inr);
    }

    #[test]
    fn low_magnitude_price_is_converted() {
        let product = make_product(vec![make_variant("15.00", None)]);
        let normalized = normalize_product(product, &foreign_host());
        assert_eq!(normalized.variants[0].price, 15.0 * 83.0);
        assert_eq!(normalized.variants[0].currency, Currency::Usd);
    }

    #[test]
    fn country_marker_forces_reference_currency_for_low_prices() {
        let product = make_product(vec![make_variant("15.00", None)]);
        let normalized = normalize_product(product, &inr_host());
        assert_eq!(normalized.variants[0].price, 15.0);
        assert_eq!(normalized.variants[0].currency, Currency::Inr);
    }

    #[test]
    fn compare_at_follows_sibling_price_decision() {
        // Price 15 on a foreign host converts; compare-at 20 must convert
        // with the same decision even though 20 < the magnitude threshold.
        let product = make_product(vec![make_variant("15.00", Some("20.00"))]);
        let normalized = normalize_product(product, &foreign_host());
        assert_eq!(normalized.variants[0].compare_at_price, Some(20.0 * 83.0));
    }

    #[test]
    fn unparseable_price_drops_the_variant_only() {
        let product = make_product(vec![
            make_variant("not-a-price", None),
            make_variant("999.00", None),
        ]);
        let normalized = normalize_product(product, &foreign_host());
        assert_eq!(normalized.variant_count(), 1);
        assert_eq!(normalized.variants[0].price, 999.0);
    }

    #[test]
    fn missing_price_drops_the_variant() {
        let mut variant = make_variant("999.00", None);
        variant.price = None;
        let normalized = normalize_product(make_product(vec![variant]), &foreign_host());
        assert_eq!(normalized.variant_count(), 0);
    }

    #[test]
    fn negative_price_drops_the_variant() {
        let product = make_product(vec![make_variant("-5.00", None)]);
        let normalized = normalize_product(product, &foreign_host());
        assert_eq!(normalized.variant_count(), 0);
    }

    #[test]
    fn product_with_all_variants_dropped_stays_in_catalog() {
        let product = make_product(vec![make_variant("garbage", None)]);
        let normalized = normalize_product(product, &foreign_host());
        assert_eq!(normalized.variant_count(), 0);
        assert_eq!(normalized.title, "Block Print Kurta");
    }

    #[test]
    fn unparseable_compare_at_becomes_none() {
        let product = make_product(vec![make_variant("999.00", Some("was ₹1,499"))]);
        let normalized = normalize_product(product, &foreign_host());
        assert_eq!(normalized.variant_count(), 1);
        assert!(normalized.variants[0].compare_at_price.is_none());
    }

    #[test]
    fn sale_flag_set_when_compare_at_exceeds_price() {
        let product = make_product(vec![make_variant("999.00", Some("1499.00"))]);
        let normalized = normalize_product(product, &foreign_host());
        assert!(normalized.on_sale);
    }

    #[test]
    fn sale_flag_clear_when_compare_at_equals_price() {
        let product = make_product(vec![make_variant("999.00", Some("999.00"))]);
        let normalized = normalize_product(product, &foreign_host());
        assert!(!normalized.on_sale);
    }

    #[test]
    fn sale_flag_clear_without_compare_at() {
        let product = make_product(vec![make_variant("999.00", None)]);
        let normalized = normalize_product(product, &foreign_host());
        assert!(!normalized.on_sale);
    }

    #[test]
    fn numeric_price_encoding_is_accepted() {
        let mut variant = make_variant("0", None);
        variant.price = Some(PriceField::Number(1299.0));
        let normalized = normalize_product(make_product(vec![variant]), &foreign_host());
        assert_eq!(normalized.variants[0].price, 1299.0);
    }

    #[test]
    fn empty_category_and_sku_become_none() {
        let mut product = make_product(vec![make_variant("999.00", None)]);
        product.product_type = Some(String::new());
        product.variants[0].sku = Some(String::new());
        let normalized = normalize_product(product, &foreign_host());
        assert!(normalized.category.is_none());
        assert!(normalized.variants[0].sku.is_none());
    }

    #[test]
    fn missing_variant_title_defaults() {
        let mut product = make_product(vec![make_variant("999.00", None)]);
        product.variants[0].title = None;
        let normalized = normalize_product(product, &foreign_host());
        assert_eq!(normalized.variants[0].title, "Default");
    }

    #[test]
    fn created_at_parses_rfc3339() {
        let product = make_product(vec![make_variant("999.00", None)]);
        let normalized = normalize_product(product, &foreign_host());
        assert!(normalized.created_at.is_some());
    }

    #[test]
    fn malformed_created_at_becomes_none() {
        let mut product = make_product(vec![make_variant("999.00", None)]);
        product.created_at = Some("last tuesday".to_string());
        let normalized = normalize_product(product, &foreign_host());
        assert!(normalized.created_at.is_none());
    }

    #[test]
    fn image_count_reflects_gallery_size() {
        let mut product = make_product(vec![make_variant("999.00", None)]);
        product.images = vec![
            crate::types::RawImage { id: Some(1), src: None },
            crate::types::RawImage { id: Some(2), src: None },
        ];
        let normalized = normalize_product(product, &foreign_host());
        assert_eq!(normalized.image_count, 2);
    }
}
