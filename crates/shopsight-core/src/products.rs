use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Currency the remote store quoted a price in, as decided by the
/// normalization heuristic. All stored prices are already converted to the
/// reference currency (INR); this tag records which way the decision went.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Currency {
    Inr,
    Usd,
}

impl Currency {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Currency::Inr => "INR",
            Currency::Usd => "USD",
        }
    }
}

/// A storefront product normalized into the common-currency model used by
/// the statistics and classification engines.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NormalizedProduct {
    pub title: String,
    /// Shopify `product_type`; empty strings are normalized to `None`.
    pub category: Option<String>,
    pub vendor: Option<String>,
    pub tags: Vec<String>,
    /// Number of gallery images the storefront publishes for this product.
    pub image_count: usize,
    /// `true` iff at least one surviving variant has a compare-at price
    /// strictly greater than its price (both in the reference currency).
    pub on_sale: bool,
    pub created_at: Option<DateTime<Utc>>,
    /// Variants that survived price parsing, in storefront order. May be
    /// empty; such products still count toward catalog breadth.
    pub variants: Vec<NormalizedVariant>,
}

impl NormalizedProduct {
    /// Returns the number of surviving variants for this product.
    #[must_use]
    pub fn variant_count(&self) -> usize {
        self.variants.len()
    }

    /// Returns `true` if at least one variant is currently purchasable.
    #[must_use]
    pub fn has_available_variants(&self) -> bool {
        self.variants.iter().any(|v| v.available)
    }
}

/// A single purchasable variant with its price converted to the reference
/// currency.
///
/// Invariants: `price >= 0`; `compare_at_price` is absent or non-negative.
/// Variants that cannot satisfy these are dropped during normalization.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NormalizedVariant {
    pub title: String,
    pub sku: Option<String>,
    /// Price in reference-currency units.
    pub price: f64,
    /// Pre-sale comparison price in reference-currency units, if set.
    pub compare_at_price: Option<f64>,
    pub available: bool,
    /// Currency the conversion decision attributed to the raw price.
    pub currency: Currency,
}

impl NormalizedVariant {
    /// Returns `true` when the variant advertises a discount: a compare-at
    /// price strictly above the selling price.
    #[must_use]
    pub fn is_discounted(&self) -> bool {
        self.compare_at_price.is_some_and(|c| c > self.price)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_variant(price: f64, compare_at: Option<f64>, available: bool) -> NormalizedVariant {
        NormalizedVariant {
            title: "Default".to_string(),
            sku: Some("SKU-1".to_string()),
            price,
            compare_at_price: compare_at,
            available,
            currency: Currency::Inr,
        }
    }

    fn make_product(variants: Vec<NormalizedVariant>) -> NormalizedProduct {
        NormalizedProduct {
            title: "Block Print Kurta".to_string(),
            category: Some("Apparel".to_string()),
            vendor: Some("Example Vendor".to_string()),
            tags: vec!["cotton".to_string(), "handloom".to_string()],
            image_count: 4,
            on_sale: false,
            created_at: None,
            variants,
        }
    }

    #[test]
    fn variant_count_zero_when_no_variants() {
        let product = make_product(vec![]);
        assert_eq!(product.variant_count(), 0);
    }

    #[test]
    fn variant_count_matches_variants_len() {
        let product = make_product(vec![
            make_variant(999.0, None, true),
            make_variant(1299.0, None, false),
        ]);
        assert_eq!(product.variant_count(), 2);
    }

    #[test]
    fn has_available_variants_false_when_all_unavailable() {
        let product = make_product(vec![
            make_variant(999.0, None, false),
            make_variant(1299.0, None, false),
        ]);
        assert!(!product.has_available_variants());
    }

    #[test]
    fn has_available_variants_true_when_at_least_one_available() {
        let product = make_product(vec![
            make_variant(999.0, None, false),
            make_variant(1299.0, None, true),
        ]);
        assert!(product.has_available_variants());
    }

    #[test]
    fn is_discounted_true_only_when_compare_at_exceeds_price() {
        assert!(make_variant(999.0, Some(1499.0), true).is_discounted());
        assert!(!make_variant(999.0, Some(999.0), true).is_discounted());
        assert!(!make_variant(999.0, Some(499.0), true).is_discounted());
        assert!(!make_variant(999.0, None, true).is_discounted());
    }

    #[test]
    fn currency_as_str() {
        assert_eq!(Currency::Inr.as_str(), "INR");
        assert_eq!(Currency::Usd.as_str(), "USD");
    }

    #[test]
    fn serde_roundtrip_product() {
        let product = make_product(vec![make_variant(999.0, Some(1499.0), true)]);
        let json = serde_json::to_string(&product).expect("serialization failed");
        let decoded: NormalizedProduct =
            serde_json::from_str(&json).expect("deserialization failed");
        assert_eq!(decoded.title, product.title);
        assert_eq!(decoded.variants.len(), 1);
        assert_eq!(decoded.variants[0].currency, Currency::Inr);
    }
}
