pub mod client;
pub mod error;
pub mod offers;
pub mod policy;
pub mod types;

pub use client::ProviderClient;
pub use error::ProviderError;
pub use offers::{extract_metadata, select_official_offer, OfferSelection};
pub use policy::{OtaPolicy, KNOWN_OTAS};
pub use types::{PropertyResponse, ProviderOffer, ProviderRate, ProviderRoom};
