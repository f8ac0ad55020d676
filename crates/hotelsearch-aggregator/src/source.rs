use std::future::Future;
use std::time::Duration;

use hotelsearch_core::{HotelRecord, SearchCriteria};
use hotelsearch_provider::{PropertyResponse, ProviderClient, ProviderError};

/// Where live pricing comes from.
///
/// [`ProviderClient`] is the production implementation; tests substitute
/// synthetic sources to control latency and failures.
pub trait PricingSource: Send + Sync {
    fn fetch_pricing(
        &self,
        hotel: &HotelRecord,
        criteria: &SearchCriteria,
        timeout: Duration,
    ) -> impl Future<Output = Result<PropertyResponse, ProviderError>> + Send;
}

impl PricingSource for ProviderClient {
    fn fetch_pricing(
        &self,
        hotel: &HotelRecord,
        criteria: &SearchCriteria,
        timeout: Duration,
    ) -> impl Future<Output = Result<PropertyResponse, ProviderError>> + Send {
        self.fetch_property(&hotel.provider_token, &hotel.name, criteria, timeout)
    }
}
