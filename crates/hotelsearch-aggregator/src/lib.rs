//! Hotel-data aggregation: per-hotel pricing fetches with static fallback,
//! bounded fan-out across the registry, and the detail view with its
//! per-token metadata cache.

pub mod cache;
pub mod error;
pub mod service;
pub mod source;

pub use cache::MetadataCache;
pub use error::DetailError;
pub use service::{fallback_result, rank_results, FetchOptions, HotelService};
pub use source::PricingSource;
