mod api;
mod middleware;
mod search_cache;

use std::sync::Arc;
use std::time::Duration;

use hotelsearch_aggregator::{FetchOptions, HotelService};
use hotelsearch_core::HotelRegistry;
use hotelsearch_provider::ProviderClient;
use tracing_subscriber::EnvFilter;

use crate::{
    api::{build_app, AppState},
    middleware::RateLimitState,
    search_cache::SearchCache,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let config = hotelsearch_core::load_app_config()?;
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(config.log_level.clone()))?;
    tracing_subscriber::fmt().with_env_filter(env_filter).init();

    let registry = Arc::new(HotelRegistry::load(config.hotels_path.as_deref())?);
    let client = ProviderClient::new(
        config.provider_api_key.as_deref(),
        &config.provider_base_url,
        &config.provider_currency,
        &config.user_agent,
    )?;
    if !client.has_api_key() {
        tracing::warn!("no provider API key configured; serving static hotel data only");
    }

    let service = HotelService::new(
        Arc::clone(&registry),
        client,
        FetchOptions::from_app_config(&config),
    );
    let image_client = reqwest::Client::builder()
        .timeout(Duration::from_secs(10))
        .user_agent(config.user_agent.clone())
        .build()?;

    let state = AppState {
        service: Arc::new(service),
        http: image_client,
        search_cache: Arc::new(SearchCache::new(Duration::from_secs(
            config.search_cache_ttl_secs,
        ))),
    };
    let app = build_app(state, RateLimitState::from_app_config(&config));

    tracing::info!(
        env = %config.env,
        bind_addr = %config.bind_addr,
        hotels = registry.len(),
        "hotelsearch server starting"
    );
    let listener = tokio::net::TcpListener::bind(config.bind_addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %e, "failed to listen for ctrl-c");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!(error = %e, "failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {},
        () = terminate => {},
    }

    tracing::info!("received shutdown signal, starting graceful shutdown");
}
