use std::collections::HashMap;
use std::env::VarError;

use super::*;

fn lookup_from_map<'a>(
    map: &'a HashMap<&'a str, &'a str>,
) -> impl Fn(&str) -> Result<String, VarError> + 'a {
    move |key| {
        map.get(key)
            .map(|v| (*v).to_string())
            .ok_or(VarError::NotPresent)
    }
}

#[test]
fn parse_environment_development() {
    assert_eq!(
        parse_environment("development").unwrap(),
        Environment::Development
    );
}

#[test]
fn parse_environment_production() {
    assert_eq!(
        parse_environment("production").unwrap(),
        Environment::Production
    );
}

#[test]
fn parse_environment_unknown_fails() {
    let err = parse_environment("staging").unwrap_err();
    assert!(matches!(err, ConfigError::InvalidEnvVar { ref var, .. } if var == "HOTELSEARCH_ENV"));
}

#[test]
fn build_app_config_defaults_from_empty_env() {
    let map: HashMap<&str, &str> = HashMap::new();
    let result = build_app_config(lookup_from_map(&map));
    assert!(result.is_ok(), "expected Ok, got: {result:?}");
    let cfg = result.unwrap();
    assert_eq!(cfg.env, Environment::Development);
    assert_eq!(cfg.bind_addr.to_string(), "0.0.0.0:3000");
    assert_eq!(cfg.log_level, "info");
    assert!(cfg.hotels_path.is_none());
    assert!(cfg.provider_api_key.is_none());
    assert_eq!(cfg.provider_base_url, "https://serpapi.com/search.json");
    assert_eq!(cfg.provider_currency, "USD");
    assert_eq!(cfg.list_timeout_secs, 8);
    assert_eq!(cfg.detail_timeout_secs, 9);
    assert_eq!(cfg.max_concurrent_fetches, 6);
    assert_eq!(cfg.rate_limit_max_requests, 60);
    assert_eq!(cfg.rate_limit_window_secs, 60);
    assert_eq!(cfg.search_cache_ttl_secs, 300);
}

#[test]
fn build_app_config_reads_provider_key() {
    let mut map = HashMap::new();
    map.insert("HOTELSEARCH_PROVIDER_API_KEY", "secret-key");
    let cfg = build_app_config(lookup_from_map(&map)).unwrap();
    assert_eq!(cfg.provider_api_key.as_deref(), Some("secret-key"));
}

#[test]
fn build_app_config_treats_blank_provider_key_as_unset() {
    let mut map = HashMap::new();
    map.insert("HOTELSEARCH_PROVIDER_API_KEY", "   ");
    let cfg = build_app_config(lookup_from_map(&map)).unwrap();
    assert!(cfg.provider_api_key.is_none());
}

#[test]
fn build_app_config_fails_with_invalid_bind_addr() {
    let mut map = HashMap::new();
    map.insert("HOTELSEARCH_BIND_ADDR", "not-a-socket-addr");
    let result = build_app_config(lookup_from_map(&map));
    assert!(
        matches!(result, Err(ConfigError::InvalidEnvVar { ref var, .. }) if var == "HOTELSEARCH_BIND_ADDR"),
        "expected InvalidEnvVar(HOTELSEARCH_BIND_ADDR), got: {result:?}"
    );
}

#[test]
fn build_app_config_timeout_overrides() {
    let mut map = HashMap::new();
    map.insert("HOTELSEARCH_LIST_TIMEOUT_SECS", "3");
    map.insert("HOTELSEARCH_DETAIL_TIMEOUT_SECS", "4");
    let cfg = build_app_config(lookup_from_map(&map)).unwrap();
    assert_eq!(cfg.list_timeout_secs, 3);
    assert_eq!(cfg.detail_timeout_secs, 4);
}

#[test]
fn build_app_config_rejects_invalid_concurrency() {
    let mut map = HashMap::new();
    map.insert("HOTELSEARCH_MAX_CONCURRENT_FETCHES", "lots");
    let result = build_app_config(lookup_from_map(&map));
    assert!(
        matches!(result, Err(ConfigError::InvalidEnvVar { ref var, .. }) if var == "HOTELSEARCH_MAX_CONCURRENT_FETCHES"),
        "expected InvalidEnvVar(HOTELSEARCH_MAX_CONCURRENT_FETCHES), got: {result:?}"
    );
}

#[test]
fn build_app_config_reads_hotels_path() {
    let mut map = HashMap::new();
    map.insert("HOTELSEARCH_HOTELS_PATH", "./config/hotels.yaml");
    let cfg = build_app_config(lookup_from_map(&map)).unwrap();
    assert_eq!(
        cfg.hotels_path.as_deref(),
        Some(std::path::Path::new("./config/hotels.yaml"))
    );
}

#[test]
fn debug_output_redacts_api_key() {
    let mut map = HashMap::new();
    map.insert("HOTELSEARCH_PROVIDER_API_KEY", "super-secret");
    let cfg = build_app_config(lookup_from_map(&map)).unwrap();
    let rendered = format!("{cfg:?}");
    assert!(!rendered.contains("super-secret"));
    assert!(rendered.contains("[redacted]"));
}
