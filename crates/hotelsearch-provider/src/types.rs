//! Wire types for the hotel-pricing provider's property endpoint.
//!
//! The payload is treated as untrusted: every field is optional or defaulted
//! so that missing keys degrade to "no data" instead of a parse failure.
//! Lists also accept an explicit `null`, and the `official` flag accepts the
//! strings `"true"`/`"false"` some responses carry.
//!
//! ### Offers
//! Offers appear in two arrays, `featured_prices` (the provider's highlighted
//! sources, usually including the hotel's own site) and `prices` (everything
//! else). The same source may appear in both.
//!
//! ### Money
//! Each rate object carries a display string (`"lowest": "$1,234"`) and a
//! numeric twin (`"extracted_lowest": 1234`). The numeric value is preferred.

use hotelsearch_core::{Coordinates, NearbyPlace, Transportation};
use rust_decimal::prelude::FromPrimitive;
use rust_decimal::Decimal;
use serde::{Deserialize, Deserializer};
use serde_json::Value;

/// Treats an explicit `null` like a missing key.
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// Accepts `true`, `"true"` (any case) and their negatives; anything else is
/// treated as absent.
fn lenient_bool<'de, D>(deserializer: D) -> Result<Option<bool>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Option::<Value>::deserialize(deserializer)? {
        Some(Value::Bool(b)) => Some(b),
        Some(Value::String(text)) => match text.trim().to_ascii_lowercase().as_str() {
            "true" => Some(true),
            "false" => Some(false),
            _ => None,
        },
        _ => None,
    })
}

/// Top-level property-details response.
#[derive(Debug, Default, Deserialize)]
pub struct PropertyResponse {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub address: Option<String>,
    #[serde(default)]
    pub gps_coordinates: Option<GpsCoordinates>,
    #[serde(default)]
    pub check_in_time: Option<String>,
    #[serde(default)]
    pub check_out_time: Option<String>,
    #[serde(default)]
    pub overall_rating: Option<f64>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub featured_prices: Vec<ProviderOffer>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub prices: Vec<ProviderOffer>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub images: Vec<ProviderImage>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub nearby_places: Vec<ProviderNearbyPlace>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub amenities: Vec<String>,
    /// Set by the provider instead of data when the search failed.
    #[serde(default)]
    pub error: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ProviderOffer {
    #[serde(default)]
    pub source: Option<String>,
    /// Provider-supplied deep link. Never surfaced to users.
    #[serde(default)]
    pub link: Option<String>,
    #[serde(default, deserialize_with = "lenient_bool")]
    pub official: Option<bool>,
    #[serde(default)]
    pub num_guests: Option<u32>,
    #[serde(default)]
    pub rate_per_night: Option<ProviderRate>,
    #[serde(default)]
    pub total_rate: Option<ProviderRate>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub rooms: Vec<ProviderRoom>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub remarks: Vec<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub discount_remarks: Vec<String>,
}

impl ProviderOffer {
    #[must_use]
    pub fn source_name(&self) -> &str {
        self.source.as_deref().unwrap_or_default().trim()
    }

    #[must_use]
    pub fn is_flagged_official(&self) -> bool {
        self.official.unwrap_or(false)
    }

    #[must_use]
    pub fn rate_per_night_amount(&self) -> Option<Decimal> {
        self.rate_per_night.as_ref().and_then(ProviderRate::amount)
    }

    #[must_use]
    pub fn total_rate_amount(&self) -> Option<Decimal> {
        self.total_rate.as_ref().and_then(ProviderRate::amount)
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ProviderRoom {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub images: Vec<String>,
    #[serde(default)]
    pub link: Option<String>,
    #[serde(default)]
    pub num_guests: Option<u32>,
    #[serde(default)]
    pub rate_per_night: Option<ProviderRate>,
    #[serde(default)]
    pub total_rate: Option<ProviderRate>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ProviderRate {
    #[serde(default)]
    pub lowest: Option<String>,
    #[serde(default)]
    pub extracted_lowest: Option<f64>,
}

impl ProviderRate {
    /// Amount rounded to cents, preferring `extracted_lowest` over the display
    /// string. Negative or non-finite values count as absent.
    #[must_use]
    pub fn amount(&self) -> Option<Decimal> {
        let numeric = self
            .extracted_lowest
            .filter(|v| v.is_finite() && *v >= 0.0)
            .and_then(Decimal::from_f64);

        numeric
            .or_else(|| self.lowest.as_deref().and_then(parse_display_amount))
            .map(|d| d.round_dp(2))
    }
}

/// Parses display amounts like `"$1,234"` or `"US$89.50"`.
fn parse_display_amount(raw: &str) -> Option<Decimal> {
    let cleaned: String = raw
        .chars()
        .filter(|c| c.is_ascii_digit() || *c == '.')
        .collect();
    if cleaned.is_empty() {
        return None;
    }
    cleaned.parse::<Decimal>().ok()
}

#[derive(Debug, Clone, Copy, Deserialize)]
pub struct GpsCoordinates {
    pub latitude: f64,
    pub longitude: f64,
}

impl From<GpsCoordinates> for Coordinates {
    fn from(value: GpsCoordinates) -> Self {
        Self {
            latitude: value.latitude,
            longitude: value.longitude,
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ProviderImage {
    #[serde(default)]
    pub thumbnail: Option<String>,
    #[serde(default)]
    pub original_image: Option<String>,
}

impl ProviderImage {
    /// Full-size URL when present, thumbnail otherwise.
    #[must_use]
    pub fn best_url(&self) -> Option<&str> {
        self.original_image
            .as_deref()
            .or(self.thumbnail.as_deref())
            .filter(|s| !s.trim().is_empty())
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ProviderNearbyPlace {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub transportations: Vec<ProviderTransportation>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ProviderTransportation {
    #[serde(default, rename = "type")]
    pub kind: Option<String>,
    #[serde(default)]
    pub duration: Option<String>,
}

impl ProviderNearbyPlace {
    /// Converts to the public shape, dropping unnamed places and incomplete
    /// transport entries.
    #[must_use]
    pub fn into_nearby_place(self) -> Option<NearbyPlace> {
        let name = self.name.filter(|n| !n.trim().is_empty())?;
        let transportations = self
            .transportations
            .into_iter()
            .filter_map(|t| {
                Some(Transportation {
                    kind: t.kind?,
                    duration: t.duration?,
                })
            })
            .collect();
        Some(NearbyPlace {
            name,
            transportations,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn amount_prefers_extracted_value() {
        let rate = ProviderRate {
            lowest: Some("$999".to_owned()),
            extracted_lowest: Some(149.0),
        };
        assert_eq!(rate.amount(), Some(Decimal::new(149, 0)));
    }

    #[test]
    fn amount_falls_back_to_display_string() {
        let rate = ProviderRate {
            lowest: Some("$1,234".to_owned()),
            extracted_lowest: None,
        };
        assert_eq!(rate.amount(), Some(Decimal::new(1234, 0)));
    }

    #[test]
    fn amount_rounds_to_cents() {
        let rate = ProviderRate {
            lowest: None,
            extracted_lowest: Some(89.499),
        };
        assert_eq!(rate.amount(), Some(Decimal::new(8950, 2)));
    }

    #[test]
    fn amount_absent_for_negative_or_empty() {
        let negative = ProviderRate {
            lowest: None,
            extracted_lowest: Some(-1.0),
        };
        assert_eq!(negative.amount(), None);
        assert_eq!(ProviderRate::default().amount(), None);
        let text = ProviderRate {
            lowest: Some("Sold out".to_owned()),
            extracted_lowest: None,
        };
        assert_eq!(text.amount(), None);
    }

    #[test]
    fn response_tolerates_missing_fields() {
        let parsed: PropertyResponse = serde_json::from_str(r#"{"name": "Only A Name"}"#).unwrap();
        assert_eq!(parsed.name.as_deref(), Some("Only A Name"));
        assert!(parsed.featured_prices.is_empty());
        assert!(parsed.prices.is_empty());
        assert!(parsed.images.is_empty());
    }

    #[test]
    fn response_tolerates_null_lists() {
        let parsed: PropertyResponse = serde_json::from_str(
            r#"{
                "featured_prices": [{
                    "source": "Town Inn Suites",
                    "official": true,
                    "rooms": null,
                    "remarks": null,
                    "rate_per_night": {"extracted_lowest": 140}
                }],
                "prices": null,
                "images": null,
                "nearby_places": [{"name": "Old Port", "transportations": null}],
                "amenities": null
            }"#,
        )
        .unwrap();
        assert_eq!(parsed.featured_prices.len(), 1);
        assert!(parsed.featured_prices[0].rooms.is_empty());
        assert!(parsed.prices.is_empty());
        assert!(parsed.images.is_empty());
        assert!(parsed.nearby_places[0].transportations.is_empty());
        assert!(parsed.amenities.is_empty());
    }

    #[test]
    fn official_flag_accepts_strings() {
        let parsed: Vec<ProviderOffer> = serde_json::from_str(
            r#"[
                {"official": "true"},
                {"official": "FALSE"},
                {"official": 1},
                {"official": null},
                {}
            ]"#,
        )
        .unwrap();
        let flags: Vec<Option<bool>> = parsed.iter().map(|o| o.official).collect();
        assert_eq!(flags, vec![Some(true), Some(false), None, None, None]);
    }

    #[test]
    fn nearby_place_drops_incomplete_transport() {
        let place = ProviderNearbyPlace {
            name: Some("Old Port".to_owned()),
            transportations: vec![
                ProviderTransportation {
                    kind: Some("Walking".to_owned()),
                    duration: Some("5 min".to_owned()),
                },
                ProviderTransportation {
                    kind: Some("Taxi".to_owned()),
                    duration: None,
                },
            ],
        };
        let converted = place.into_nearby_place().unwrap();
        assert_eq!(converted.transportations.len(), 1);
        assert_eq!(converted.transportations[0].kind, "Walking");
    }
}
