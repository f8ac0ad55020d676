use thiserror::Error;

/// Detail lookups fail only on routing mistakes; upstream problems degrade
/// to fallback data instead.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DetailError {
    #[error("no hotel is configured for slug '{slug}'")]
    UnknownSlug { slug: String },
}
