pub mod app_config;
pub mod config;
pub mod products;

use thiserror::Error;

pub use app_config::AnalyzerConfig;
pub use config::{load_analyzer_config, load_analyzer_config_from_env};
pub use products::{Currency, NormalizedProduct, NormalizedVariant};

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("missing required environment variable: {0}")]
    MissingEnvVar(String),

    #[error("invalid value for environment variable {var}: {reason}")]
    InvalidEnvVar { var: String, reason: String },
}
