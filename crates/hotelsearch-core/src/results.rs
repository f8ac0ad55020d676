//! Normalized result shapes handed to the UI layer.
//!
//! Field names serialize to the JSON the search and detail pages consume,
//! e.g. `{"hotel": ..., "official_price": {"source", "rate_per_night", "link"}, "rooms": []}`.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Source label used when no qualifying provider offer exists but the
/// hotel's own booking link is still shown.
pub const OFFICIAL_SITE_SOURCE: &str = "Official Site";

/// Best direct offer for a hotel.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Offer {
    pub source: String,
    pub rate_per_night: Option<Decimal>,
    pub total_rate: Option<Decimal>,
    /// Always rendered from the static booking template, never from the provider.
    #[serde(rename = "link")]
    pub booking_link: String,
    pub is_official: bool,
    #[serde(default)]
    pub remarks: Vec<String>,
    #[serde(default)]
    pub discount_remarks: Vec<String>,
}

impl Offer {
    /// A price-less offer pointing at the hotel's own booking page.
    #[must_use]
    pub fn official_site(booking_link: String) -> Self {
        Self {
            source: OFFICIAL_SITE_SOURCE.to_owned(),
            rate_per_night: None,
            total_rate: None,
            booking_link,
            is_official: true,
            remarks: Vec::new(),
            discount_remarks: Vec::new(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RoomOffer {
    pub name: String,
    pub rate_per_night: Option<Decimal>,
    pub total_rate: Option<Decimal>,
    #[serde(default)]
    pub images: Vec<String>,
    pub num_guests: Option<u32>,
    #[serde(rename = "link")]
    pub booking_link: String,
}

/// One hotel in the list view (and the core of the detail view).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AggregatedHotelResult {
    pub hotel: String,
    pub slug: String,
    pub official_price: Option<Offer>,
    #[serde(default)]
    pub rooms: Vec<RoomOffer>,
    pub has_direct_rate: bool,
    pub address: String,
    pub rating: f32,
    pub image: Option<String>,
}

impl AggregatedHotelResult {
    #[must_use]
    pub fn rate_per_night(&self) -> Option<Decimal> {
        self.official_price.as_ref().and_then(|o| o.rate_per_night)
    }

    /// Whether the result carries a link the user can book through.
    #[must_use]
    pub fn has_booking_link(&self) -> bool {
        self.official_price
            .as_ref()
            .is_some_and(|o| !o.booking_link.trim().is_empty())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinates {
    pub latitude: f64,
    pub longitude: f64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Transportation {
    #[serde(rename = "type")]
    pub kind: String,
    pub duration: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NearbyPlace {
    pub name: String,
    #[serde(default)]
    pub transportations: Vec<Transportation>,
}

/// Descriptive fields assumed stable for a provider token; cached per token
/// for the process lifetime.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct HotelMetadata {
    pub description: Option<String>,
    #[serde(default)]
    pub images: Vec<String>,
    #[serde(default)]
    pub nearby_places: Vec<NearbyPlace>,
    pub coordinates: Option<Coordinates>,
    pub check_in_time: Option<String>,
    pub check_out_time: Option<String>,
    #[serde(default)]
    pub amenities: Vec<String>,
}

/// Detail-page payload: the aggregated result plus descriptive metadata.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HotelDetail {
    #[serde(flatten)]
    pub result: AggregatedHotelResult,
    #[serde(flatten)]
    pub metadata: HotelMetadata,
}
