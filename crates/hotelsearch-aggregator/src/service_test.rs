use chrono::NaiveDate;
use hotelsearch_core::OFFICIAL_SITE_SOURCE;
use rust_decimal::Decimal;
use serde_json::json;

use super::*;

fn criteria() -> SearchCriteria {
    SearchCriteria::new(
        NaiveDate::from_ymd_opt(2025, 8, 25).unwrap(),
        NaiveDate::from_ymd_opt(2025, 8, 26).unwrap(),
        2,
        0,
    )
}

fn hotel(name: &str, rating: f32) -> HotelRecord {
    HotelRecord {
        name: name.to_owned(),
        provider_token: format!("tok-{name}"),
        booking_url_template: "https://hotel.test/book?in={checkin}&out={checkout}&a={adults}"
            .to_owned(),
        address: "1 Main St".to_owned(),
        rating,
        amenities: vec![],
        fallback_image_url: "/images/hotels/test.jpg".to_owned(),
    }
}

/// Returns the same canned payload (or error) for every hotel.
struct CannedSource {
    payload: Option<serde_json::Value>,
}

impl CannedSource {
    fn ok(value: serde_json::Value) -> Self {
        Self {
            payload: Some(value),
        }
    }

    fn failing() -> Self {
        Self {
            payload: None,
        }
    }
}

impl PricingSource for CannedSource {
    async fn fetch_pricing(
        &self,
        hotel: &HotelRecord,
        _criteria: &SearchCriteria,
        timeout: Duration,
    ) -> Result<PropertyResponse, ProviderError> {
        match &self.payload {
            Some(value) => Ok(serde_json::from_value(value.clone()).unwrap()),
            None => Err(ProviderError::Timeout {
                token: hotel.provider_token.clone(),
                after_ms: timeout.as_millis(),
            }),
        }
    }
}

fn service(source: CannedSource, hotels: Vec<HotelRecord>) -> HotelService<CannedSource> {
    HotelService::new(
        Arc::new(HotelRegistry::new(hotels)),
        source,
        FetchOptions::default(),
    )
}

fn ranked(has_direct_rate: bool, rate: Option<i64>, rating: f32, name: &str) -> AggregatedHotelResult {
    AggregatedHotelResult {
        hotel: name.to_owned(),
        slug: name.to_owned(),
        official_price: Some(Offer {
            rate_per_night: rate.map(|r| Decimal::new(r, 0)),
            ..Offer::official_site("https://hotel.test/book".to_owned())
        }),
        rooms: vec![],
        has_direct_rate,
        address: String::new(),
        rating,
        image: None,
    }
}

// -----------------------------------------------------------------------
// fetch_one_hotel
// -----------------------------------------------------------------------

#[tokio::test]
async fn fetch_one_hotel_prefers_direct_offer_over_cheaper_ota() {
    let source = CannedSource::ok(json!({
        "featured_prices": [
            {"source": "Expedia", "official": true, "rate_per_night": {"extracted_lowest": 60}},
            {"source": "Sea Breeze Hotel", "official": true, "rate_per_night": {"extracted_lowest": 140}}
        ]
    }));
    let h = hotel("Sea Breeze", 4.0);
    let svc = service(source, vec![h.clone()]);

    let result = svc.fetch_one_hotel(&h, &criteria()).await;
    let offer = result.official_price.expect("offer");
    assert_eq!(offer.source, "Sea Breeze Hotel");
    assert_eq!(offer.rate_per_night, Some(Decimal::new(140, 0)));
    assert!(result.has_direct_rate);
}

#[tokio::test]
async fn fetch_one_hotel_picks_lowest_direct_rate() {
    let source = CannedSource::ok(json!({
        "featured_prices": [
            {"source": "Hotel Site", "official": true, "rate_per_night": {"extracted_lowest": 120}}
        ],
        "prices": [
            {"source": "Hotel Site Mobile", "official": true, "rate_per_night": {"extracted_lowest": 100}}
        ]
    }));
    let h = hotel("Sea Breeze", 4.0);
    let svc = service(source, vec![h.clone()]);

    let result = svc.fetch_one_hotel(&h, &criteria()).await;
    assert_eq!(result.rate_per_night(), Some(Decimal::new(100, 0)));
}

#[tokio::test]
async fn fetch_one_hotel_uses_cheaper_repeat_of_direct_source() {
    let source = CannedSource::ok(json!({
        "featured_prices": [{"source": "Sea Breeze Hotel", "official": true}],
        "prices": [
            {"source": "Sea Breeze Hotel", "official": true, "rate_per_night": {"extracted_lowest": 95}}
        ]
    }));
    let h = hotel("Sea Breeze", 4.0);
    let svc = service(source, vec![h.clone()]);

    let result = svc.fetch_one_hotel(&h, &criteria()).await;
    assert!(result.has_direct_rate);
    assert_eq!(result.rate_per_night(), Some(Decimal::new(95, 0)));
}

#[tokio::test]
async fn fetch_one_hotel_without_template_or_direct_offer_has_no_offer() {
    let source = CannedSource::ok(json!({
        "featured_prices": [
            {"source": "Expedia", "official": true, "rate_per_night": {"extracted_lowest": 60}}
        ]
    }));
    let mut h = hotel("Sea Breeze", 4.0);
    h.booking_url_template = String::new();
    let svc = service(source, vec![h.clone()]);

    let result = svc.fetch_one_hotel(&h, &criteria()).await;
    assert!(result.official_price.is_none());
    assert!(!result.has_direct_rate);
    assert_eq!(result, fallback_result(&h, &criteria()));
}

#[tokio::test]
async fn fetch_one_hotel_falls_back_on_failure() {
    let h = hotel("Sea Breeze", 4.0);
    let svc = service(CannedSource::failing(), vec![h.clone()]);

    let result = svc.fetch_one_hotel(&h, &criteria()).await;
    assert!(!result.has_direct_rate);
    let offer = result.official_price.expect("fallback keeps a booking link");
    assert_eq!(offer.source, OFFICIAL_SITE_SOURCE);
    assert_eq!(offer.rate_per_night, None);
    assert_eq!(
        offer.booking_link,
        render_url(&h.booking_url_template, &criteria())
    );
}

#[tokio::test]
async fn fetch_one_hotel_ignores_provider_links() {
    let source = CannedSource::ok(json!({
        "featured_prices": [{
            "source": "Hotel Site",
            "official": true,
            "link": "https://tracking.provider.example.com/redirect?id=1",
            "rate_per_night": {"extracted_lowest": 99},
            "rooms": [{"name": "Queen", "link": "https://tracking.provider.example.com/q"}]
        }]
    }));
    let h = hotel("Sea Breeze", 4.0);
    let svc = service(source, vec![h.clone()]);

    let result = svc.fetch_one_hotel(&h, &criteria()).await;
    assert_eq!(
        result.official_price.unwrap().booking_link,
        "https://hotel.test/book?in=2025-08-25&out=2025-08-26&a=2"
    );
    assert!(result.rooms.is_empty(), "list view carries no rooms");
}

#[tokio::test]
async fn fetch_one_hotel_uses_provider_rating_and_image() {
    let source = CannedSource::ok(json!({
        "overall_rating": 4.8,
        "images": [{"original_image": "https://img.example.com/lobby.jpg"}]
    }));
    let h = hotel("Sea Breeze", 3.0);
    let svc = service(source, vec![h.clone()]);

    let result = svc.fetch_one_hotel(&h, &criteria()).await;
    assert!((result.rating - 4.8).abs() < f32::EPSILON);
    assert_eq!(
        result.image.as_deref(),
        Some("/api/hotel-images?url=https%3A%2F%2Fimg.example.com%2Flobby.jpg")
    );
}

// -----------------------------------------------------------------------
// fallback_result
// -----------------------------------------------------------------------

#[test]
fn fallback_without_template_has_no_offer() {
    let mut h = hotel("Sea Breeze", 4.0);
    h.booking_url_template = String::new();
    let result = fallback_result(&h, &criteria());
    assert!(result.official_price.is_none());
    assert!(!result.has_booking_link());
}

#[test]
fn fallback_uses_registry_display_fields() {
    let h = hotel("Sea Breeze", 4.2);
    let result = fallback_result(&h, &criteria());
    assert_eq!(result.hotel, "Sea Breeze");
    assert_eq!(result.slug, "sea-breeze");
    assert_eq!(result.address, "1 Main St");
    assert_eq!(result.image.as_deref(), Some("/images/hotels/test.jpg"));
}

// -----------------------------------------------------------------------
// rank_results
// -----------------------------------------------------------------------

#[test]
fn rank_puts_direct_rates_first_then_cheapest() {
    let mut results = vec![
        ranked(false, None, 4.5, "no-rate"),
        ranked(true, Some(150), 4.0, "rate-150"),
        ranked(true, Some(100), 3.0, "rate-100"),
    ];
    rank_results(&mut results);
    let order: Vec<&str> = results.iter().map(|r| r.hotel.as_str()).collect();
    assert_eq!(order, vec!["rate-100", "rate-150", "no-rate"]);
}

#[test]
fn rank_breaks_rate_ties_by_rating() {
    let mut results = vec![
        ranked(true, Some(100), 3.5, "lower"),
        ranked(true, Some(100), 4.5, "higher"),
    ];
    rank_results(&mut results);
    assert_eq!(results[0].hotel, "higher");
}

#[test]
fn rank_sorts_missing_rate_after_present_rate() {
    let mut results = vec![
        ranked(false, None, 5.0, "unpriced"),
        ranked(false, Some(300), 1.0, "priced"),
    ];
    rank_results(&mut results);
    assert_eq!(results[0].hotel, "priced");
}

#[test]
fn rank_is_stable_for_full_ties() {
    let mut results = vec![
        ranked(false, None, 4.0, "first"),
        ranked(false, None, 4.0, "second"),
        ranked(false, None, 4.0, "third"),
    ];
    rank_results(&mut results);
    let order: Vec<&str> = results.iter().map(|r| r.hotel.as_str()).collect();
    assert_eq!(order, vec!["first", "second", "third"]);
}
