//! The serializable analysis output contract.
//!
//! Field names and nesting are part of the external contract: consumers
//! deserialize `store`, `analyzed_at`, `overview`, `pricing_strategy` and
//! `product_strategy` by name. Insight strings are data, not prose
//! generation: the same inputs always produce the same sentences.

use chrono::{DateTime, Utc};
use serde::Serialize;
use shopsight_scraper::StoreHost;

use crate::classify::{
    round1, round2, CatalogBreadth, PriceDistribution, PricingConsistency, PricingStrategy,
    PromotionalPosture, VariantStrategy,
};
use crate::stats::CatalogStatistics;

/// Maximum-to-minimum price ratio above which the price range counts as
/// wide catalog diversity in the insight text.
const WIDE_DIVERSITY_PRICE_RATIO: f64 = 10.0;

/// Collection count above which navigation structure counts as good in the
/// insight text.
const GOOD_NAVIGATION_COLLECTIONS: usize = 8;

/// Complete result of one `analyze` call. Immutable after construction and
/// never persisted.
#[derive(Debug, Clone, Serialize)]
pub struct AnalysisResult {
    /// Canonical store hostname the analysis ran against.
    pub store: String,
    pub analyzed_at: DateTime<Utc>,
    pub overview: Overview,
    pub pricing_strategy: PricingStrategyReport,
    pub product_strategy: ProductStrategyReport,
    /// `true` when the catalog fetch terminated early and the analysis is
    /// based on an incomplete catalog.
    pub partial: bool,
    /// Human-readable explanation of why the data is incomplete, when it
    /// is.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fetch_note: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct Overview {
    pub total_products: usize,
    pub total_variants: usize,
    pub total_collections: usize,
    pub products_on_sale: usize,
    pub sale_percentage: f64,
    pub product_range: String,
    pub brand_positioning: String,
    pub catalog_strategy: String,
    pub pricing_consistency: String,
    pub promotional_strategy: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct PricingStrategyReport {
    pub strategy_type: String,
    pub average_price: f64,
    pub median_price: f64,
    pub min_price: f64,
    pub max_price: f64,
    pub std_deviation: f64,
    pub price_distribution: PriceDistribution,
    pub insights: Vec<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct ProductStrategyReport {
    pub variant_strategy: String,
    pub average_variants_per_product: f64,
    pub total_collections: usize,
    pub insights: Vec<String>,
}

impl AnalysisResult {
    /// Assembles the full report from computed statistics. Classification
    /// runs on unrounded values; rounding happens only at the serialization
    /// surface.
    #[must_use]
    pub fn assemble(
        host: &StoreHost,
        stats: &CatalogStatistics,
        total_collections: usize,
        partial: bool,
        fetch_note: Option<String>,
    ) -> Self {
        let pricing = PricingStrategy::classify(stats.mean);
        let spread_ratio = (stats.max - stats.min) / stats.mean;
        let consistency = PricingConsistency::classify(spread_ratio);
        let posture = PromotionalPosture::classify(stats.sale_percentage);
        let variant_strategy = VariantStrategy::classify(stats.avg_variants_per_product);
        let breadth = CatalogBreadth::classify(stats.total_products);

        let overview = Overview {
            total_products: stats.total_products,
            total_variants: stats.prices.len(),
            total_collections,
            products_on_sale: stats.products_on_sale,
            sale_percentage: round1(stats.sale_percentage),
            product_range: format!("₹{} - ₹{}", format_inr(stats.min), format_inr(stats.max)),
            brand_positioning: pricing.positioning().to_string(),
            catalog_strategy: breadth.title(),
            pricing_consistency: consistency.title(),
            promotional_strategy: posture.title(),
        };

        let pricing_strategy = PricingStrategyReport {
            strategy_type: pricing.slug().to_string(),
            average_price: round2(stats.mean),
            median_price: round2(stats.median),
            min_price: round2(stats.min),
            max_price: round2(stats.max),
            std_deviation: round2(stats.std_dev),
            price_distribution: PriceDistribution::from_prices(&stats.prices),
            insights: pricing_insights(stats, pricing, consistency, posture),
        };

        let product_strategy = ProductStrategyReport {
            variant_strategy: variant_strategy.slug().to_string(),
            average_variants_per_product: round1(stats.avg_variants_per_product),
            total_collections,
            insights: product_insights(stats, variant_strategy, total_collections),
        };

        Self {
            store: host.to_string(),
            analyzed_at: Utc::now(),
            overview,
            pricing_strategy,
            product_strategy,
            partial,
            fetch_note,
        }
    }
}

fn pricing_insights(
    stats: &CatalogStatistics,
    pricing: PricingStrategy,
    consistency: PricingConsistency,
    posture: PromotionalPosture,
) -> Vec<String> {
    let diversity = if stats.max / stats.min > WIDE_DIVERSITY_PRICE_RATIO {
        "wide"
    } else {
        "narrow"
    };

    vec![
        format!(
            "Average price point of ₹{} positions store as {}",
            format_inr(stats.mean),
            pricing.slug()
        ),
        format!(
            "Price range spans ₹{}, showing {diversity} catalog diversity",
            format_inr(stats.max - stats.min)
        ),
        format!(
            "Standard deviation of ₹{} indicates {} pricing",
            format_inr(stats.std_dev),
            consistency.words()
        ),
        format!(
            "{:.1}% of products on sale indicates {} strategy",
            stats.sale_percentage,
            posture.words()
        ),
    ]
}

fn product_insights(
    stats: &CatalogStatistics,
    variant_strategy: VariantStrategy,
    total_collections: usize,
) -> Vec<String> {
    let navigation = if total_collections > GOOD_NAVIGATION_COLLECTIONS {
        "good"
    } else {
        "limited"
    };

    vec![
        format!(
            "Average of {:.1} variants per product indicates {}",
            stats.avg_variants_per_product,
            variant_strategy.words()
        ),
        format!("{total_collections} collections provide {navigation} navigation structure"),
    ]
}

/// Formats a price as whole reference-currency units with comma thousands
/// grouping, e.g. `12849.6` -> `"12,850"`.
fn format_inr(value: f64) -> String {
    #[allow(clippy::cast_possible_truncation)]
    let rounded = value.round() as i64;
    let digits = rounded.unsigned_abs().to_string();

    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(c);
    }

    if rounded < 0 {
        format!("-{grouped}")
    } else {
        grouped
    }
}
