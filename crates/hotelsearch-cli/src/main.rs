use std::sync::Arc;

use chrono::Utc;
use clap::{Args, Parser, Subcommand};
use hotelsearch_aggregator::{FetchOptions, HotelService};
use hotelsearch_core::{AppConfig, HotelRegistry, SearchCriteria};
use hotelsearch_provider::ProviderClient;
use serde::Serialize;
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(name = "hotelsearch-cli")]
#[command(about = "Look up live direct-booking rates for the configured hotels")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Price every configured hotel and print the ranked list
    Search(StayArgs),
    /// Price one hotel and print its rooms and descriptive metadata
    Detail {
        /// Hotel slug, e.g. `town-inn-suites`
        slug: String,

        #[command(flatten)]
        stay: StayArgs,
    },
    /// Print the configured hotel registry
    Hotels,
}

#[derive(Debug, Clone, PartialEq, Eq, Args)]
struct StayArgs {
    /// Check-in date (YYYY-MM-DD)
    #[arg(long)]
    check_in: String,

    /// Check-out date (YYYY-MM-DD)
    #[arg(long)]
    check_out: String,

    #[arg(long, default_value_t = 2)]
    adults: u32,

    #[arg(long, default_value_t = 0)]
    children: u32,
}

impl StayArgs {
    fn criteria(&self) -> anyhow::Result<SearchCriteria> {
        Ok(SearchCriteria::parse(
            &self.check_in,
            &self.check_out,
            self.adults,
            self.children,
            Utc::now().date_naive(),
        )?)
    }
}

#[derive(Debug, Serialize)]
struct HotelListing<'a> {
    name: &'a str,
    slug: String,
    address: &'a str,
    rating: f32,
    has_booking_template: bool,
}

fn build_service(
    config: &AppConfig,
    registry: Arc<HotelRegistry>,
) -> anyhow::Result<HotelService<ProviderClient>> {
    let client = ProviderClient::new(
        config.provider_api_key.as_deref(),
        &config.provider_base_url,
        &config.provider_currency,
        &config.user_agent,
    )?;
    if !client.has_api_key() {
        tracing::warn!("no provider API key configured; results use static hotel data only");
    }
    Ok(HotelService::new(
        registry,
        client,
        FetchOptions::from_app_config(config),
    ))
}

fn print_json<T: Serialize>(value: &T) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let config = hotelsearch_core::load_app_config()?;
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(config.log_level.clone()))?;
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let registry = Arc::new(HotelRegistry::load(config.hotels_path.as_deref())?);

    match cli.command {
        Commands::Search(stay) => {
            let criteria = stay.criteria()?;
            let service = build_service(&config, registry)?;
            let results = service.fetch_all_hotels(&criteria).await;
            print_json(&results)?;
        }
        Commands::Detail { slug, stay } => {
            let criteria = stay.criteria()?;
            let service = build_service(&config, registry)?;
            let detail = service.fetch_hotel_detail(&slug, &criteria).await?;
            print_json(&detail)?;
        }
        Commands::Hotels => {
            let listings: Vec<HotelListing<'_>> = registry
                .hotels()
                .iter()
                .map(|h| HotelListing {
                    name: &h.name,
                    slug: h.slug(),
                    address: &h.address,
                    rating: h.rating,
                    has_booking_template: h.has_booking_template(),
                })
                .collect();
            print_json(&listings)?;
        }
    }

    Ok(())
}
