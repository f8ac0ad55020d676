use thiserror::Error;

#[derive(Debug, Error)]
pub enum ProviderError {
    #[error("pricing provider API key is not configured")]
    MissingApiKey,

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("pricing request for {token} timed out after {after_ms}ms")]
    Timeout { token: String, after_ms: u128 },

    #[error("unexpected HTTP status {status} from pricing provider for {token}")]
    UnexpectedStatus { status: u16, token: String },

    /// The provider answered 2xx but reported an error in the body.
    #[error("pricing provider error for {token}: {message}")]
    Upstream { token: String, message: String },

    #[error("JSON deserialization error for {context}: {source}")]
    Deserialize {
        context: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("invalid provider base URL \"{base_url}\": {reason}")]
    InvalidBaseUrl { base_url: String, reason: String },
}
