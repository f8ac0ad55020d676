//! Single-hotel detail view: pricing plus rooms and cached metadata.

use hotelsearch_core::{proxy_image_url, HotelDetail, HotelMetadata, HotelRecord, SearchCriteria};
use hotelsearch_provider::extract_metadata;

use super::HotelService;
use crate::error::DetailError;
use crate::source::PricingSource;

impl<P: PricingSource> HotelService<P> {
    /// Fetches the detail view for the hotel at `slug`.
    ///
    /// Pricing is fetched fresh on every call. Descriptive metadata comes from
    /// the per-token cache when present; otherwise the first successful
    /// response for the token populates it.
    ///
    /// # Errors
    ///
    /// Returns [`DetailError::UnknownSlug`] if no registry hotel has this slug.
    /// Upstream failures are not errors; they yield fallback pricing.
    pub async fn fetch_hotel_detail(
        &self,
        slug: &str,
        criteria: &SearchCriteria,
    ) -> Result<HotelDetail, DetailError> {
        let hotel = self
            .registry
            .by_slug(slug)
            .ok_or_else(|| DetailError::UnknownSlug {
                slug: slug.to_owned(),
            })?;

        let (result, response) = self
            .fetch_priced(hotel, criteria, self.options.detail_timeout)
            .await;

        let token = hotel.provider_token.as_str();
        let metadata = match (self.cache.get(token), response) {
            (Some(cached), _) => cached,
            (None, Some(response)) => {
                tracing::debug!(hotel = %hotel.name, "caching hotel metadata");
                self.cache
                    .insert_if_absent(token, extract_metadata(&response))
            }
            (None, None) => fallback_metadata(hotel),
        };

        Ok(HotelDetail {
            result,
            metadata: with_registry_defaults(metadata, hotel),
        })
    }
}

/// Metadata shown when nothing is cached and the provider failed. Not cached.
fn fallback_metadata(hotel: &HotelRecord) -> HotelMetadata {
    HotelMetadata {
        images: proxy_image_url(&hotel.fallback_image_url)
            .into_iter()
            .collect(),
        amenities: hotel.amenities.clone(),
        ..HotelMetadata::default()
    }
}

fn with_registry_defaults(mut metadata: HotelMetadata, hotel: &HotelRecord) -> HotelMetadata {
    if metadata.amenities.is_empty() {
        metadata.amenities.clone_from(&hotel.amenities);
    }
    if metadata.images.is_empty() {
        metadata.images = proxy_image_url(&hotel.fallback_image_url)
            .into_iter()
            .collect();
    }
    metadata
}
