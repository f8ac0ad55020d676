//! Official-offer selection and normalization of provider payloads.
//!
//! List and detail views share one selection routine: scan `featured_prices`
//! then `prices`, keep only official-and-direct offers (see
//! [`crate::policy`]), and pick the lowest nightly rate. Ties keep the first
//! offer encountered; priced offers always beat unpriced ones. Every entry
//! competes on its own, so a source listed in both arrays is priced by its
//! cheapest entry; its rooms are merged from every entry.

use std::collections::HashSet;

use hotelsearch_core::{proxy_image_url, HotelMetadata, Offer, RoomOffer, OFFICIAL_SITE_SOURCE};
use rust_decimal::Decimal;

use crate::policy::OtaPolicy;
use crate::types::{PropertyResponse, ProviderOffer, ProviderRoom};

/// Room names providers use when they have no real room data.
const PLACEHOLDER_ROOM_NAMES: &[&str] = &[
    "room",
    "rooms",
    "standard",
    "standard room",
    "hotel room",
    "guest room",
    "room only",
    "best available rate",
];

/// Outcome of offer selection for one property response.
#[derive(Debug, Clone, PartialEq)]
pub struct OfferSelection {
    /// `None` only when nothing qualified and there is no booking link.
    pub official_price: Option<Offer>,
    pub rooms: Vec<RoomOffer>,
    pub has_direct_rate: bool,
}

impl OfferSelection {
    /// Selection used when the provider returned nothing usable. Carries an
    /// "Official Site" offer only if there is a link to book through.
    #[must_use]
    pub fn official_site_only(booking_link: &str) -> Self {
        Self {
            official_price: (!booking_link.is_empty())
                .then(|| Offer::official_site(booking_link.to_owned())),
            rooms: Vec::new(),
            has_direct_rate: false,
        }
    }
}

/// All offers in scan order: featured first, then the secondary list.
fn all_offers(response: &PropertyResponse) -> impl Iterator<Item = &ProviderOffer> {
    response.featured_prices.iter().chain(response.prices.iter())
}

/// Returns the lowest-priced official-and-direct offer, if any.
#[must_use]
pub fn best_official_offer<'a>(
    response: &'a PropertyResponse,
    policy: &OtaPolicy,
) -> Option<&'a ProviderOffer> {
    let mut best: Option<(&ProviderOffer, Option<Decimal>)> = None;

    for offer in all_offers(response).filter(|o| policy.is_official_direct(o)) {
        let rate = offer.rate_per_night_amount();
        let better = match (&best, rate) {
            (None, _) => true,
            (Some((_, None)), Some(_)) => true,
            (Some((_, Some(current))), Some(candidate)) => candidate < *current,
            _ => false,
        };
        if better {
            best = Some((offer, rate));
        }
    }

    best.map(|(offer, _)| offer)
}

/// Selects the best official offer and normalizes it.
///
/// `booking_link` is the rendered static template; it replaces every
/// provider link on the offer and its rooms.
#[must_use]
pub fn select_official_offer(
    response: &PropertyResponse,
    policy: &OtaPolicy,
    booking_link: &str,
) -> OfferSelection {
    let Some(best) = best_official_offer(response, policy) else {
        return OfferSelection::official_site_only(booking_link);
    };

    let source = match best.source_name() {
        "" => OFFICIAL_SITE_SOURCE.to_owned(),
        name => name.to_owned(),
    };
    let rate_per_night = best.rate_per_night_amount();

    let official_price = Offer {
        source,
        rate_per_night,
        total_rate: best.total_rate_amount(),
        booking_link: booking_link.to_owned(),
        is_official: true,
        remarks: best.remarks.clone(),
        discount_remarks: best.discount_remarks.clone(),
    };

    let rooms = collect_rooms(response, policy, best, booking_link);

    OfferSelection {
        official_price: Some(official_price),
        rooms,
        has_direct_rate: rate_per_night.is_some(),
    }
}

/// Rooms from every direct entry for the selected source, merged across
/// both lists and de-duplicated by case-insensitive name.
fn collect_rooms(
    response: &PropertyResponse,
    policy: &OtaPolicy,
    best: &ProviderOffer,
    booking_link: &str,
) -> Vec<RoomOffer> {
    let best_source = best.source_name().to_lowercase();
    let mut seen = HashSet::new();

    all_offers(response)
        .filter(|o| policy.is_official_direct(o) && o.source_name().to_lowercase() == best_source)
        .flat_map(|o| o.rooms.iter())
        .filter(|room| !is_placeholder_room(room))
        .filter(|room| seen.insert(room_name(room).to_lowercase()))
        .map(|room| RoomOffer {
            name: room_name(room).to_owned(),
            rate_per_night: room.rate_per_night.as_ref().and_then(|r| r.amount()),
            total_rate: room.total_rate.as_ref().and_then(|r| r.amount()),
            images: room
                .images
                .iter()
                .filter_map(|url| proxy_image_url(url))
                .collect(),
            num_guests: room.num_guests,
            booking_link: booking_link.to_owned(),
        })
        .collect()
}

fn room_name(room: &ProviderRoom) -> &str {
    room.name.as_deref().unwrap_or_default().trim()
}

/// A room is dropped when it has a generic name and no images to show.
fn is_placeholder_room(room: &ProviderRoom) -> bool {
    let name = room_name(room).to_lowercase();
    let generic = name.is_empty() || PLACEHOLDER_ROOM_NAMES.contains(&name.as_str());
    generic && room.images.iter().all(|i| i.trim().is_empty())
}

/// Descriptive fields cached per provider token.
#[must_use]
pub fn extract_metadata(response: &PropertyResponse) -> HotelMetadata {
    HotelMetadata {
        description: response
            .description
            .clone()
            .filter(|d| !d.trim().is_empty()),
        images: response
            .images
            .iter()
            .filter_map(|img| img.best_url())
            .filter_map(proxy_image_url)
            .collect(),
        nearby_places: response
            .nearby_places
            .iter()
            .cloned()
            .filter_map(|p| p.into_nearby_place())
            .collect(),
        coordinates: response.gps_coordinates.map(Into::into),
        check_in_time: response.check_in_time.clone(),
        check_out_time: response.check_out_time.clone(),
        amenities: response.amenities.clone(),
    }
}

#[cfg(test)]
#[path = "offers_test.rs"]
mod tests;
