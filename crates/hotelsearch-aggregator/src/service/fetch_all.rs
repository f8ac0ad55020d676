//! Bounded fan-out over the whole registry.

use std::cmp::Ordering;
use std::panic::AssertUnwindSafe;
use std::time::Instant;

use futures::stream::{self, StreamExt};
use futures::FutureExt;
use hotelsearch_core::{AggregatedHotelResult, HotelRecord, SearchCriteria};

use super::{fallback_result, HotelService};
use crate::source::PricingSource;

impl<P: PricingSource> HotelService<P> {
    /// Fetches every registry hotel that has a booking template, with at most
    /// `max_concurrent` provider calls in flight.
    ///
    /// Always returns one result per listed hotel: a fetch that panics is
    /// replaced by its [`fallback_result`]. Output order is a function of the
    /// returned data only (see [`rank_results`]); ties keep registry order,
    /// whatever order the fetches completed in.
    pub async fn fetch_all_hotels(&self, criteria: &SearchCriteria) -> Vec<AggregatedHotelResult> {
        let started = Instant::now();
        let max_concurrent = self.options.max_concurrent.max(1);

        let listed: Vec<(usize, &HotelRecord)> = self
            .registry
            .hotels()
            .iter()
            .enumerate()
            .filter(|(_, hotel)| {
                if hotel.has_booking_template() {
                    true
                } else {
                    tracing::warn!(hotel = %hotel.name, "skipping hotel without booking template");
                    false
                }
            })
            .collect();

        let fetches: Vec<_> = listed
            .into_iter()
            .map(|(idx, hotel)| async move {
                let result = AssertUnwindSafe(self.fetch_one_hotel(hotel, criteria))
                    .catch_unwind()
                    .await
                    .unwrap_or_else(|_| {
                        tracing::error!(hotel = %hotel.name, "pricing fetch panicked; using static fallback");
                        fallback_result(hotel, criteria)
                    });
                (idx, result)
            })
            .collect();

        let mut indexed: Vec<(usize, AggregatedHotelResult)> = stream::iter(fetches)
            .buffer_unordered(max_concurrent)
            .collect()
            .await;

        indexed.sort_by_key(|(idx, _)| *idx);
        let mut results: Vec<AggregatedHotelResult> = indexed
            .into_iter()
            .map(|(_, result)| result)
            .filter(AggregatedHotelResult::has_booking_link)
            .collect();
        rank_results(&mut results);

        let direct = results.iter().filter(|r| r.has_direct_rate).count();
        tracing::info!(
            hotels = results.len(),
            direct_rates = direct,
            elapsed_ms = started.elapsed().as_millis(),
            "hotel search aggregated"
        );

        results
    }
}

/// Sorts results for display, stably:
///
/// 1. hotels with a direct rate first,
/// 2. then lower nightly rate (a missing rate sorts after any rate),
/// 3. then higher rating.
pub fn rank_results(results: &mut [AggregatedHotelResult]) {
    results.sort_by(|a, b| {
        b.has_direct_rate
            .cmp(&a.has_direct_rate)
            .then_with(|| compare_rates(a, b))
            .then_with(|| b.rating.total_cmp(&a.rating))
    });
}

fn compare_rates(a: &AggregatedHotelResult, b: &AggregatedHotelResult) -> Ordering {
    match (a.rate_per_night(), b.rate_per_night()) {
        (Some(x), Some(y)) => x.cmp(&y),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}
