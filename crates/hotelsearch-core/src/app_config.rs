use std::net::SocketAddr;
use std::path::PathBuf;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Environment {
    Development,
    Test,
    Production,
}

impl std::fmt::Display for Environment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Environment::Development => write!(f, "development"),
            Environment::Test => write!(f, "test"),
            Environment::Production => write!(f, "production"),
        }
    }
}

#[derive(Clone)]
pub struct AppConfig {
    pub env: Environment,
    pub bind_addr: SocketAddr,
    pub log_level: String,
    /// Optional YAML file replacing the built-in hotel table.
    pub hotels_path: Option<PathBuf>,
    pub provider_api_key: Option<String>,
    pub provider_base_url: String,
    pub provider_currency: String,
    pub user_agent: String,
    pub list_timeout_secs: u64,
    pub detail_timeout_secs: u64,
    pub max_concurrent_fetches: usize,
    pub rate_limit_max_requests: usize,
    pub rate_limit_window_secs: u64,
    /// `0` disables the list-response cache.
    pub search_cache_ttl_secs: u64,
}

impl std::fmt::Debug for AppConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppConfig")
            .field("env", &self.env)
            .field("bind_addr", &self.bind_addr)
            .field("log_level", &self.log_level)
            .field("hotels_path", &self.hotels_path)
            .field(
                "provider_api_key",
                &self.provider_api_key.as_ref().map(|_| "[redacted]"),
            )
            .field("provider_base_url", &self.provider_base_url)
            .field("provider_currency", &self.provider_currency)
            .field("user_agent", &self.user_agent)
            .field("list_timeout_secs", &self.list_timeout_secs)
            .field("detail_timeout_secs", &self.detail_timeout_secs)
            .field("max_concurrent_fetches", &self.max_concurrent_fetches)
            .field("rate_limit_max_requests", &self.rate_limit_max_requests)
            .field("rate_limit_window_secs", &self.rate_limit_window_secs)
            .field("search_cache_ttl_secs", &self.search_cache_ttl_secs)
            .finish()
    }
}
