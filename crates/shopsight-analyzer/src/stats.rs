//! Aggregate price and variant statistics over the normalized catalog.

use shopsight_core::NormalizedProduct;

/// Statistics computed once per analysis over all positive variant prices.
///
/// Median and standard deviation have pinned semantics that downstream
/// consumers rely on for reproducibility:
/// - median is the element at index `n / 2` of the ascending-sorted price
///   sequence, so even-length sequences return the upper-middle element,
///   not an interpolated midpoint;
/// - standard deviation is the population form (squared deviations divided
///   by `n`, not `n - 1`).
#[derive(Debug, Clone)]
pub struct CatalogStatistics {
    /// All positive variant prices, ascending. Its length is the variant
    /// count the overview reports.
    pub prices: Vec<f64>,
    pub mean: f64,
    pub median: f64,
    pub min: f64,
    pub max: f64,
    pub std_dev: f64,
    pub total_products: usize,
    pub products_on_sale: usize,
    /// Products-on-sale share of all products, in percent, unrounded.
    pub sale_percentage: f64,
    /// Mean variant count over products with at least one surviving
    /// variant.
    pub avg_variants_per_product: f64,
}

impl CatalogStatistics {
    /// Computes statistics over a normalized catalog.
    ///
    /// Returns `None` when there are no products or no positive prices:
    /// the "not a catalog-bearing store" signal, which the orchestrator
    /// surfaces as a typed failure rather than a statistics object.
    #[must_use]
    pub fn compute(products: &[NormalizedProduct]) -> Option<Self> {
        let mut prices: Vec<f64> = products
            .iter()
            .flat_map(|p| p.variants.iter().map(|v| v.price))
            .filter(|price| *price > 0.0)
            .collect();

        let variant_counts: Vec<usize> = products
            .iter()
            .map(NormalizedProduct::variant_count)
            .filter(|count| *count > 0)
            .collect();

        if prices.is_empty() || products.is_empty() || variant_counts.is_empty() {
            return None;
        }

        prices.sort_unstable_by(f64::total_cmp);

        #[allow(clippy::cast_precision_loss)]
        let count = prices.len() as f64;
        let mean = prices.iter().sum::<f64>() / count;
        let median = prices[prices.len() / 2];
        let variance = prices.iter().map(|p| (p - mean).powi(2)).sum::<f64>() / count;
        let std_dev = variance.sqrt();
        let min = prices[0];
        let max = prices[prices.len() - 1];

        let total_products = products.len();
        let products_on_sale = products.iter().filter(|p| p.on_sale).count();
        #[allow(clippy::cast_precision_loss)]
        let sale_percentage = products_on_sale as f64 / total_products as f64 * 100.0;

        #[allow(clippy::cast_precision_loss)]
        let avg_variants_per_product =
            variant_counts.iter().sum::<usize>() as f64 / variant_counts.len() as f64;

        Some(Self {
            prices,
            mean,
            median,
            min,
            max,
            std_dev,
            total_products,
            products_on_sale,
            sale_percentage,
            avg_variants_per_product,
        })
    }
}
