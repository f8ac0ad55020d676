//! The aggregation service: single-hotel fetches with static fallback.
//!
//! List fan-out lives in `fetch_all`, the detail view in `detail`.

mod detail;
mod fetch_all;

use std::sync::Arc;
use std::time::{Duration, Instant};

use hotelsearch_core::{
    proxy_image_url, render_url, AggregatedHotelResult, AppConfig, HotelRecord, HotelRegistry,
    Offer, SearchCriteria,
};
use hotelsearch_provider::{select_official_offer, OtaPolicy, PropertyResponse, ProviderError};

use crate::cache::MetadataCache;
use crate::source::PricingSource;

pub use fetch_all::rank_results;

/// Timeouts and the fan-out ceiling.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FetchOptions {
    /// Per-call budget for list (fan-out) fetches.
    pub list_timeout: Duration,
    /// Per-call budget for single-hotel detail fetches.
    pub detail_timeout: Duration,
    /// Maximum provider calls in flight during fan-out. `0` is treated as `1`.
    pub max_concurrent: usize,
}

impl Default for FetchOptions {
    fn default() -> Self {
        Self {
            list_timeout: Duration::from_secs(8),
            detail_timeout: Duration::from_secs(9),
            max_concurrent: 6,
        }
    }
}

impl FetchOptions {
    #[must_use]
    pub fn from_app_config(config: &AppConfig) -> Self {
        Self {
            list_timeout: Duration::from_secs(config.list_timeout_secs),
            detail_timeout: Duration::from_secs(config.detail_timeout_secs),
            max_concurrent: config.max_concurrent_fetches,
        }
    }
}

/// Aggregates live pricing over the static hotel registry.
///
/// Each instance owns its metadata cache, so tests can build isolated
/// services. Share one instance (behind `Arc`) per process in production.
pub struct HotelService<P> {
    registry: Arc<HotelRegistry>,
    source: P,
    policy: OtaPolicy,
    options: FetchOptions,
    cache: MetadataCache,
}

impl<P: PricingSource> HotelService<P> {
    #[must_use]
    pub fn new(registry: Arc<HotelRegistry>, source: P, options: FetchOptions) -> Self {
        Self {
            registry,
            source,
            policy: OtaPolicy::default(),
            options,
            cache: MetadataCache::new(),
        }
    }

    /// Replaces the default reseller deny-list.
    #[must_use]
    pub fn with_policy(mut self, policy: OtaPolicy) -> Self {
        self.policy = policy;
        self
    }

    #[must_use]
    pub fn registry(&self) -> &HotelRegistry {
        &self.registry
    }

    #[must_use]
    pub fn source(&self) -> &P {
        &self.source
    }

    #[must_use]
    pub fn cache(&self) -> &MetadataCache {
        &self.cache
    }

    #[must_use]
    pub fn options(&self) -> FetchOptions {
        self.options
    }

    /// Fetches live pricing for one hotel.
    ///
    /// Never fails: any upstream problem yields [`fallback_result`], whose
    /// booking link is still the rendered static template. The list view
    /// carries no rooms.
    pub async fn fetch_one_hotel(
        &self,
        hotel: &HotelRecord,
        criteria: &SearchCriteria,
    ) -> AggregatedHotelResult {
        let (mut result, _) = self
            .fetch_priced(hotel, criteria, self.options.list_timeout)
            .await;
        result.rooms.clear();
        result
    }

    /// Shared single-hotel path. Also returns the raw response on success so
    /// the detail view can extract metadata from it.
    async fn fetch_priced(
        &self,
        hotel: &HotelRecord,
        criteria: &SearchCriteria,
        timeout: Duration,
    ) -> (AggregatedHotelResult, Option<PropertyResponse>) {
        let started = Instant::now();

        match self.source.fetch_pricing(hotel, criteria, timeout).await {
            Ok(response) => {
                let booking_link = render_url(&hotel.booking_url_template, criteria);
                let selection = select_official_offer(&response, &self.policy, &booking_link);
                let source = selection
                    .official_price
                    .as_ref()
                    .map_or("none", |o| o.source.as_str());
                tracing::debug!(
                    hotel = %hotel.name,
                    source = %source,
                    has_direct_rate = selection.has_direct_rate,
                    elapsed_ms = started.elapsed().as_millis(),
                    "pricing fetched"
                );

                let result = AggregatedHotelResult {
                    hotel: hotel.name.clone(),
                    slug: hotel.slug(),
                    official_price: selection.official_price,
                    rooms: selection.rooms,
                    has_direct_rate: selection.has_direct_rate,
                    address: hotel.address.clone(),
                    rating: display_rating(hotel, &response),
                    image: display_image(hotel, &response),
                };
                (result, Some(response))
            }
            Err(ProviderError::MissingApiKey) => {
                tracing::debug!(hotel = %hotel.name, "no provider API key; using static fallback");
                (fallback_result(hotel, criteria), None)
            }
            Err(e) => {
                tracing::warn!(
                    hotel = %hotel.name,
                    error = %e,
                    elapsed_ms = started.elapsed().as_millis(),
                    "pricing fetch failed; using static fallback"
                );
                (fallback_result(hotel, criteria), None)
            }
        }
    }
}

/// A result built purely from registry data.
///
/// Carries an "Official Site" offer with the rendered booking link whenever
/// the hotel has a template, so booking works without live pricing.
#[must_use]
pub fn fallback_result(hotel: &HotelRecord, criteria: &SearchCriteria) -> AggregatedHotelResult {
    let official_price = hotel
        .has_booking_template()
        .then(|| Offer::official_site(render_url(&hotel.booking_url_template, criteria)));

    AggregatedHotelResult {
        hotel: hotel.name.clone(),
        slug: hotel.slug(),
        official_price,
        rooms: Vec::new(),
        has_direct_rate: false,
        address: hotel.address.clone(),
        rating: hotel.rating,
        image: proxy_image_url(&hotel.fallback_image_url),
    }
}

/// Provider review score when it is a sane 0–5 value, registry rating otherwise.
#[allow(clippy::cast_possible_truncation)]
fn display_rating(hotel: &HotelRecord, response: &PropertyResponse) -> f32 {
    response
        .overall_rating
        .filter(|r| (0.0..=5.0).contains(r))
        .map_or(hotel.rating, |r| r as f32)
}

fn display_image(hotel: &HotelRecord, response: &PropertyResponse) -> Option<String> {
    response
        .images
        .iter()
        .filter_map(|img| img.best_url())
        .find_map(proxy_image_url)
        .or_else(|| proxy_image_url(&hotel.fallback_image_url))
}

#[cfg(test)]
#[path = "../service_test.rs"]
mod tests;
