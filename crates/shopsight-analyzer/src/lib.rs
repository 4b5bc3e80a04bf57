pub mod analyze;
pub mod classify;
pub mod error;
pub mod report;
pub mod stats;

pub use analyze::StoreAnalyzer;
pub use error::AnalysisError;
pub use report::{AnalysisResult, Overview, PricingStrategyReport, ProductStrategyReport};
pub use stats::CatalogStatistics;
