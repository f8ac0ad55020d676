use crate::app_config::{AppConfig, Environment};
use crate::ConfigError;

/// Load application configuration from environment variables.
///
/// Calls `dotenvy::dotenv().ok()` to load `.env` files before reading env vars.
///
/// # Errors
///
/// Returns `ConfigError` if a value is present but invalid.
pub fn load_app_config() -> Result<AppConfig, ConfigError> {
    dotenvy::dotenv().ok();
    load_app_config_from_env()
}

/// Load application configuration from environment variables already in the process.
///
/// Unlike [`load_app_config`], this does NOT load `.env` files.
///
/// # Errors
///
/// Returns `ConfigError` if a value is present but invalid.
pub fn load_app_config_from_env() -> Result<AppConfig, ConfigError> {
    build_app_config(|key| std::env::var(key))
}

/// Build application configuration using the provided env-var lookup function.
///
/// Every variable has a default, so an empty environment yields a usable
/// development config with no provider key (all fetches fall back to static data).
fn build_app_config<F>(lookup: F) -> Result<AppConfig, ConfigError>
where
    F: Fn(&str) -> Result<String, std::env::VarError>,
{
    use std::net::SocketAddr;
    use std::path::PathBuf;

    let or_default = |var: &str, default: &str| -> String {
        lookup(var).unwrap_or_else(|_| default.to_string())
    };

    // Empty strings count as unset so `.env` templates with `KEY=` don't leak through.
    let optional = |var: &str| -> Option<String> {
        lookup(var)
            .ok()
            .map(|v| v.trim().to_string())
            .filter(|v| !v.is_empty())
    };

    let parse_addr = |var: &str, default: &str| -> Result<SocketAddr, ConfigError> {
        let raw = or_default(var, default);
        raw.parse::<SocketAddr>()
            .map_err(|e| ConfigError::InvalidEnvVar {
                var: var.to_string(),
                reason: e.to_string(),
            })
    };

    let parse_u64 = |var: &str, default: &str| -> Result<u64, ConfigError> {
        let raw = or_default(var, default);
        raw.parse::<u64>().map_err(|e| ConfigError::InvalidEnvVar {
            var: var.to_string(),
            reason: e.to_string(),
        })
    };

    let parse_usize = |var: &str, default: &str| -> Result<usize, ConfigError> {
        let raw = or_default(var, default);
        raw.parse::<usize>()
            .map_err(|e| ConfigError::InvalidEnvVar {
                var: var.to_string(),
                reason: e.to_string(),
            })
    };

    let env = parse_environment(&or_default("HOTELSEARCH_ENV", "development"))?;
    let bind_addr = parse_addr("HOTELSEARCH_BIND_ADDR", "0.0.0.0:3000")?;
    let log_level = or_default("HOTELSEARCH_LOG_LEVEL", "info");
    let hotels_path = optional("HOTELSEARCH_HOTELS_PATH").map(PathBuf::from);

    let provider_api_key = optional("HOTELSEARCH_PROVIDER_API_KEY");
    let provider_base_url = or_default(
        "HOTELSEARCH_PROVIDER_BASE_URL",
        "https://serpapi.com/search.json",
    );
    let provider_currency = or_default("HOTELSEARCH_PROVIDER_CURRENCY", "USD");
    let user_agent = or_default("HOTELSEARCH_USER_AGENT", "hotelsearch/0.1 (rate-lookup)");

    let list_timeout_secs = parse_u64("HOTELSEARCH_LIST_TIMEOUT_SECS", "8")?;
    let detail_timeout_secs = parse_u64("HOTELSEARCH_DETAIL_TIMEOUT_SECS", "9")?;
    let max_concurrent_fetches = parse_usize("HOTELSEARCH_MAX_CONCURRENT_FETCHES", "6")?;

    let rate_limit_max_requests = parse_usize("HOTELSEARCH_RATE_LIMIT_MAX_REQUESTS", "60")?;
    let rate_limit_window_secs = parse_u64("HOTELSEARCH_RATE_LIMIT_WINDOW_SECS", "60")?;
    let search_cache_ttl_secs = parse_u64("HOTELSEARCH_SEARCH_CACHE_TTL_SECS", "300")?;

    Ok(AppConfig {
        env,
        bind_addr,
        log_level,
        hotels_path,
        provider_api_key,
        provider_base_url,
        provider_currency,
        user_agent,
        list_timeout_secs,
        detail_timeout_secs,
        max_concurrent_fetches,
        rate_limit_max_requests,
        rate_limit_window_secs,
        search_cache_ttl_secs,
    })
}

/// Parse a string into an `Environment` variant.
///
/// # Errors
///
/// Returns [`ConfigError::InvalidEnvVar`] for anything other than
/// `development`, `test`, or `production`.
fn parse_environment(s: &str) -> Result<Environment, ConfigError> {
    match s {
        "development" => Ok(Environment::Development),
        "test" => Ok(Environment::Test),
        "production" => Ok(Environment::Production),
        other => Err(ConfigError::InvalidEnvVar {
            var: "HOTELSEARCH_ENV".to_string(),
            reason: format!("unknown environment '{other}'"),
        }),
    }
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
