//! Remote catalog API response types for the public `products.json` and
//! `collections.json` endpoints.
//!
//! ## Observed shape from live storefronts
//!
//! ### Prices
//! `price` is usually a decimal string (e.g. `"1299.00"`), but some themes
//! and older stores emit a bare JSON number. Both encodings are accepted via
//! the untagged [`PriceField`]; interpretation (and the decision to drop a
//! variant whose price does not parse) happens during normalization.
//!
//! ### `compare_at_price`
//! Explicitly `null` when the variant is not on sale (not omitted, not
//! `"0.00"`). When set it uses the same string-or-number encoding as
//! `price`.
//!
//! ### Tags
//! A JSON array of strings; `[]` when the store uses no tags.
//! `#[serde(default)]` covers stores that omit the field entirely.
//!
//! ### `available` on variants
//! Boolean; may be absent on older stores. Defaults to `true` (optimistic)
//! when missing.
//!
//! Every optional field carries a defensive default: catalogs in the wild
//! omit fields freely and a missing vendor must not fail the whole page.

use serde::Deserialize;

/// Top-level response from `GET /products.json`.
#[derive(Debug, Deserialize)]
pub struct ProductsPage {
    #[serde(default)]
    pub products: Vec<RawProduct>,
}

/// Top-level response from `GET /collections.json`.
#[derive(Debug, Deserialize)]
pub struct CollectionsPage {
    #[serde(default)]
    pub collections: Vec<RawCollection>,
}

/// A single product exactly as the remote API returned it. Transient:
/// consumed entirely by normalization, never retained afterwards.
#[derive(Debug, Clone, Deserialize)]
pub struct RawProduct {
    /// Numeric product ID.
    #[serde(default)]
    pub id: i64,

    #[serde(default)]
    pub title: String,

    /// Product category string; may be empty (`""`) or absent.
    #[serde(default)]
    pub product_type: Option<String>,

    /// Vendor / brand name as configured by the merchant.
    #[serde(default)]
    pub vendor: Option<String>,

    /// Tags as a JSON array of strings.
    #[serde(default)]
    pub tags: Vec<String>,

    /// Creation timestamp as an RFC 3339 string, when present.
    #[serde(default)]
    pub created_at: Option<String>,

    /// Full image gallery for the product; only the count is used.
    #[serde(default)]
    pub images: Vec<RawImage>,

    #[serde(default)]
    pub variants: Vec<RawVariant>,
}

/// A single purchasable variant of a [`RawProduct`].
#[derive(Debug, Clone, Deserialize)]
pub struct RawVariant {
    /// Display title of the variant, e.g. a size/color combination.
    #[serde(default)]
    pub title: Option<String>,

    /// Stock-keeping unit; present but may be an empty string.
    #[serde(default)]
    pub sku: Option<String>,

    /// Price in an unspecified currency; string or numeric encoding.
    #[serde(default)]
    pub price: Option<PriceField>,

    /// Pre-sale comparison price, or `null` when not on sale.
    #[serde(default)]
    pub compare_at_price: Option<PriceField>,

    /// Whether this variant is currently purchasable. Defaults to `true`
    /// when absent.
    #[serde(default = "default_available")]
    pub available: bool,
}

/// A price value as the remote API encodes it: decimal string or number.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum PriceField {
    Text(String),
    Number(f64),
}

impl PriceField {
    /// Interprets the raw encoding as a finite decimal number.
    ///
    /// Returns `None` for unparseable strings and non-finite values; the
    /// caller decides what dropping the value means.
    #[must_use]
    pub fn as_decimal(&self) -> Option<f64> {
        let value = match self {
            PriceField::Text(raw) => raw.trim().parse::<f64>().ok()?,
            PriceField::Number(value) => *value,
        };
        value.is_finite().then_some(value)
    }
}

/// A product image; only its presence matters for merchandising metrics.
#[derive(Debug, Clone, Deserialize)]
pub struct RawImage {
    #[serde(default)]
    pub id: Option<i64>,
    #[serde(default)]
    pub src: Option<String>,
}

/// A named collection from `GET /collections.json`.
#[derive(Debug, Clone, Deserialize)]
pub struct RawCollection {
    #[serde(default)]
    pub id: i64,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub handle: Option<String>,
    #[serde(default)]
    pub products_count: Option<i64>,
}

/// Default value for `RawVariant::available` when the field is absent.
/// serde's `default = "..."` attribute expects a function path, so this
/// cannot be a `const`.
fn default_available() -> bool {
    true
}
