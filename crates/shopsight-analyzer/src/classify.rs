//! Fixed classification thresholds and categorical strategy labels.
//!
//! Thresholds are configuration constants in reference-currency (INR)
//! units. Boundary behavior is part of the output contract and must stay
//! exactly as documented on each `classify` function: results are consumed
//! by downstream tooling that compares label strings across runs.

use serde::Serialize;

/// Mean price above which a catalog is classified as luxury.
pub const LUXURY_MEAN_PRICE: f64 = 16_000.0;
/// Mean price above which a catalog is classified as premium.
pub const PREMIUM_MEAN_PRICE: f64 = 12_000.0;
/// Mean price below which a catalog is classified as penetration pricing.
pub const PENETRATION_MEAN_PRICE: f64 = 2_400.0;

/// Upper bound (exclusive) of the budget price band.
pub const BUDGET_BAND_CEILING: f64 = 4_000.0;
/// Upper bound (exclusive) of the mid-range price band.
pub const MID_RANGE_BAND_CEILING: f64 = 12_000.0;
/// Upper bound (exclusive) of the premium price band; everything at or
/// above it is the luxury band.
pub const PREMIUM_BAND_CEILING: f64 = 40_000.0;

/// Average variants per product above which a catalog counts as highly
/// customizable.
pub const HIGH_CUSTOMIZATION_AVG_VARIANTS: f64 = 10.0;
/// Average variants per product above which a catalog offers moderate
/// options.
pub const MODERATE_OPTIONS_AVG_VARIANTS: f64 = 5.0;

/// Product count below which a catalog is a niche specialist.
pub const NICHE_CATALOG_MAX_PRODUCTS: usize = 100;
/// Product count above which a catalog is a broad generalist.
pub const BROAD_CATALOG_MIN_PRODUCTS: usize = 200;

/// Spread ratio `(max - min) / mean` below which pricing is highly
/// consistent.
pub const CONSISTENT_SPREAD_RATIO: f64 = 2.0;
/// Spread ratio below which pricing shows a moderate spread.
pub const MODERATE_SPREAD_RATIO: f64 = 5.0;

/// Sale percentage above which promotions are aggressive.
pub const AGGRESSIVE_PROMO_PERCENTAGE: f64 = 20.0;
/// Sale percentage above which promotions are selective.
pub const SELECTIVE_PROMO_PERCENTAGE: f64 = 5.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PricingStrategy {
    Luxury,
    Premium,
    Penetration,
    Value,
}

impl PricingStrategy {
    /// luxury (> 16000) / premium (> 12000) / penetration (< 2400) /
    /// value (else).
    #[must_use]
    pub fn classify(mean_price: f64) -> Self {
        if mean_price > LUXURY_MEAN_PRICE {
            PricingStrategy::Luxury
        } else if mean_price > PREMIUM_MEAN_PRICE {
            PricingStrategy::Premium
        } else if mean_price < PENETRATION_MEAN_PRICE {
            PricingStrategy::Penetration
        } else {
            PricingStrategy::Value
        }
    }

    #[must_use]
    pub fn slug(self) -> &'static str {
        match self {
            PricingStrategy::Luxury => "luxury",
            PricingStrategy::Premium => "premium",
            PricingStrategy::Penetration => "penetration",
            PricingStrategy::Value => "value",
        }
    }

    /// Capitalized form used for the overview's brand positioning.
    #[must_use]
    pub fn positioning(self) -> &'static str {
        match self {
            PricingStrategy::Luxury => "Luxury",
            PricingStrategy::Premium => "Premium",
            PricingStrategy::Penetration => "Penetration",
            PricingStrategy::Value => "Value",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VariantStrategy {
    HighCustomization,
    ModerateOptions,
    SimpleSelection,
}

impl VariantStrategy {
    /// high_customization (> 10) / moderate_options (> 5) /
    /// simple_selection (else). An average of exactly 5 is
    /// simple_selection.
    #[must_use]
    pub fn classify(avg_variants: f64) -> Self {
        if avg_variants > HIGH_CUSTOMIZATION_AVG_VARIANTS {
            VariantStrategy::HighCustomization
        } else if avg_variants > MODERATE_OPTIONS_AVG_VARIANTS {
            VariantStrategy::ModerateOptions
        } else {
            VariantStrategy::SimpleSelection
        }
    }

    #[must_use]
    pub fn slug(self) -> &'static str {
        match self {
            VariantStrategy::HighCustomization => "high_customization",
            VariantStrategy::ModerateOptions => "moderate_options",
            VariantStrategy::SimpleSelection => "simple_selection",
        }
    }

    #[must_use]
    pub fn words(self) -> String {
        de_slug(self.slug())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CatalogBreadth {
    NicheSpecialist,
    BroadGeneralist,
    Balanced,
}

impl CatalogBreadth {
    /// niche_specialist (< 100) / broad_generalist (> 200) / balanced
    /// (else); counts of exactly 100 or 200 are balanced.
    #[must_use]
    pub fn classify(total_products: usize) -> Self {
        if total_products < NICHE_CATALOG_MAX_PRODUCTS {
            CatalogBreadth::NicheSpecialist
        } else if total_products > BROAD_CATALOG_MIN_PRODUCTS {
            CatalogBreadth::BroadGeneralist
        } else {
            CatalogBreadth::Balanced
        }
    }

    #[must_use]
    pub fn slug(self) -> &'static str {
        match self {
            CatalogBreadth::NicheSpecialist => "niche_specialist",
            CatalogBreadth::BroadGeneralist => "broad_generalist",
            CatalogBreadth::Balanced => "balanced",
        }
    }

    #[must_use]
    pub fn title(self) -> String {
        title_case_slug(self.slug())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PricingConsistency {
    HighlyConsistent,
    ModerateSpread,
    WideVariety,
}

impl PricingConsistency {
    /// Classified on the spread ratio `(max - min) / mean`:
    /// highly_consistent (< 2) / moderate_spread (< 5) / wide_variety
    /// (else).
    #[must_use]
    pub fn classify(spread_ratio: f64) -> Self {
        if spread_ratio < CONSISTENT_SPREAD_RATIO {
            PricingConsistency::HighlyConsistent
        } else if spread_ratio < MODERATE_SPREAD_RATIO {
            PricingConsistency::ModerateSpread
        } else {
            PricingConsistency::WideVariety
        }
    }

    #[must_use]
    pub fn slug(self) -> &'static str {
        match self {
            PricingConsistency::HighlyConsistent => "highly_consistent",
            PricingConsistency::ModerateSpread => "moderate_spread",
            PricingConsistency::WideVariety => "wide_variety",
        }
    }

    #[must_use]
    pub fn words(self) -> String {
        de_slug(self.slug())
    }

    #[must_use]
    pub fn title(self) -> String {
        title_case_slug(self.slug())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PromotionalPosture {
    AggressivePromotions,
    SelectivePromotions,
    PremiumNoDiscount,
}

impl PromotionalPosture {
    /// aggressive_promotions (> 20%) / selective_promotions (> 5%) /
    /// premium_no_discount (else). The unrounded sale percentage is
    /// compared, so 20.8% is aggressive.
    #[must_use]
    pub fn classify(sale_percentage: f64) -> Self {
        if sale_percentage > AGGRESSIVE_PROMO_PERCENTAGE {
            PromotionalPosture::AggressivePromotions
        } else if sale_percentage > SELECTIVE_PROMO_PERCENTAGE {
            PromotionalPosture::SelectivePromotions
        } else {
            PromotionalPosture::PremiumNoDiscount
        }
    }

    #[must_use]
    pub fn slug(self) -> &'static str {
        match self {
            PromotionalPosture::AggressivePromotions => "aggressive_promotions",
            PromotionalPosture::SelectivePromotions => "selective_promotions",
            PromotionalPosture::PremiumNoDiscount => "premium_no_discount",
        }
    }

    #[must_use]
    pub fn words(self) -> String {
        de_slug(self.slug())
    }

    #[must_use]
    pub fn title(self) -> String {
        title_case_slug(self.slug())
    }
}

/// Share of prices falling into each of the four fixed bands, in percent
/// rounded to one decimal.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PriceDistribution {
    pub budget_percentage: f64,
    pub mid_range_percentage: f64,
    pub premium_percentage: f64,
    pub luxury_percentage: f64,
}

impl PriceDistribution {
    /// Buckets every price into one band. `prices` must be non-empty; the
    /// statistics engine guarantees that before classification runs.
    #[must_use]
    pub fn from_prices(prices: &[f64]) -> Self {
        #[allow(clippy::cast_precision_loss)]
        let total = prices.len() as f64;
        let share = |predicate: fn(f64) -> bool| {
            #[allow(clippy::cast_precision_loss)]
            let count = prices.iter().filter(|&&p| predicate(p)).count() as f64;
            round1(count / total * 100.0)
        };

        Self {
            budget_percentage: share(|p| p < BUDGET_BAND_CEILING),
            mid_range_percentage: share(|p| (BUDGET_BAND_CEILING..MID_RANGE_BAND_CEILING).contains(&p)),
            premium_percentage: share(|p| {
                (MID_RANGE_BAND_CEILING..PREMIUM_BAND_CEILING).contains(&p)
            }),
            luxury_percentage: share(|p| p >= PREMIUM_BAND_CEILING),
        }
    }
}

/// `"moderate_spread"` -> `"moderate spread"`.
pub(crate) fn de_slug(slug: &str) -> String {
    slug.replace('_', " ")
}

/// `"niche_specialist"` -> `"Niche Specialist"`.
pub(crate) fn title_case_slug(slug: &str) -> String {
    slug.split('_')
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

/// Round to one decimal place, half away from zero for positive input.
pub(crate) fn round1(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

/// Round to two decimal places.
pub(crate) fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
