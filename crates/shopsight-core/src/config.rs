use crate::app_config::AnalyzerConfig;
use crate::ConfigError;

/// Load analyzer configuration from environment variables.
///
/// Calls `dotenvy::dotenv().ok()` to load `.env` files before reading env vars.
///
/// # Errors
///
/// Returns `ConfigError` if an override value cannot be parsed.
pub fn load_analyzer_config() -> Result<AnalyzerConfig, ConfigError> {
    dotenvy::dotenv().ok();
    load_analyzer_config_from_env()
}

/// Load analyzer configuration from environment variables already in the process.
///
/// Unlike [`load_analyzer_config`], this does NOT load `.env` files — useful for
/// testing or when the caller manages env setup.
///
/// # Errors
///
/// Returns `ConfigError` if an override value cannot be parsed.
pub fn load_analyzer_config_from_env() -> Result<AnalyzerConfig, ConfigError> {
    build_config(|key| std::env::var(key))
}

/// Build analyzer configuration using the provided env-var lookup function.
///
/// This is the core parsing/validation logic, decoupled from the actual
/// environment so it can be tested with a pure `HashMap` lookup — no
/// `set_var`/`remove_var` needed. Every variable is optional; absent ones
/// keep the [`AnalyzerConfig::default`] value.
fn build_config<F>(lookup: F) -> Result<AnalyzerConfig, ConfigError>
where
    F: Fn(&str) -> Result<String, std::env::VarError>,
{
    let mut config = AnalyzerConfig::default();

    let parse_u32 = |var: &str, current: u32| -> Result<u32, ConfigError> {
        match lookup(var) {
            Ok(raw) => raw.parse::<u32>().map_err(|e| ConfigError::InvalidEnvVar {
                var: var.to_string(),
                reason: e.to_string(),
            }),
            Err(_) => Ok(current),
        }
    };

    let parse_u64 = |var: &str, current: u64| -> Result<u64, ConfigError> {
        match lookup(var) {
            Ok(raw) => raw.parse::<u64>().map_err(|e| ConfigError::InvalidEnvVar {
                var: var.to_string(),
                reason: e.to_string(),
            }),
            Err(_) => Ok(current),
        }
    };

    let parse_usize = |var: &str, current: usize| -> Result<usize, ConfigError> {
        match lookup(var) {
            Ok(raw) => raw.parse::<usize>().map_err(|e| ConfigError::InvalidEnvVar {
                var: var.to_string(),
                reason: e.to_string(),
            }),
            Err(_) => Ok(current),
        }
    };

    config.request_timeout_secs =
        parse_u64("SHOPSIGHT_REQUEST_TIMEOUT_SECS", config.request_timeout_secs)?;
    if let Ok(ua) = lookup("SHOPSIGHT_USER_AGENT") {
        config.user_agent = ua;
    }
    config.page_size = parse_u32("SHOPSIGHT_PAGE_SIZE", config.page_size)?;
    config.max_products = parse_usize("SHOPSIGHT_MAX_PRODUCTS", config.max_products)?;
    config.max_pages = parse_u32("SHOPSIGHT_MAX_PAGES", config.max_pages)?;
    config.rate_limit_max_retries = parse_u32(
        "SHOPSIGHT_RATE_LIMIT_MAX_RETRIES",
        config.rate_limit_max_retries,
    )?;
    config.rate_limit_backoff_base_secs = parse_u64(
        "SHOPSIGHT_RATE_LIMIT_BACKOFF_BASE_SECS",
        config.rate_limit_backoff_base_secs,
    )?;
    config.page_delay_base_ms =
        parse_u64("SHOPSIGHT_PAGE_DELAY_BASE_MS", config.page_delay_base_ms)?;
    config.page_delay_step_ms =
        parse_u64("SHOPSIGHT_PAGE_DELAY_STEP_MS", config.page_delay_step_ms)?;
    config.page_delay_step_every = parse_u32(
        "SHOPSIGHT_PAGE_DELAY_STEP_EVERY",
        config.page_delay_step_every,
    )?;

    Ok(config)
}
