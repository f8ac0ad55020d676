//! HTTP client for the hotel-pricing provider's property-details search.

use std::time::Duration;

use hotelsearch_core::SearchCriteria;
use reqwest::{Client, Url};

use crate::error::ProviderError;
use crate::types::PropertyResponse;

/// Search engine identifier the provider expects for hotel property lookups.
const ENGINE: &str = "google_hotels";

/// Client for the upstream pricing API.
///
/// Each call carries its own timeout so list and detail fetches can use
/// different budgets on one shared connection pool. No call is retried.
pub struct ProviderClient {
    client: Client,
    api_key: Option<String>,
    base_url: Url,
    currency: String,
}

impl ProviderClient {
    /// Creates a client for `base_url`.
    ///
    /// `api_key = None` is valid: every fetch then fails fast with
    /// [`ProviderError::MissingApiKey`] and callers fall back to static data.
    ///
    /// # Errors
    ///
    /// Returns [`ProviderError::Http`] if the underlying `reqwest::Client`
    /// cannot be constructed, or [`ProviderError::InvalidBaseUrl`] if
    /// `base_url` does not parse.
    pub fn new(
        api_key: Option<&str>,
        base_url: &str,
        currency: &str,
        user_agent: &str,
    ) -> Result<Self, ProviderError> {
        let client = Client::builder()
            .connect_timeout(Duration::from_secs(5))
            .user_agent(user_agent)
            .build()?;
        let base_url = Url::parse(base_url).map_err(|e| ProviderError::InvalidBaseUrl {
            base_url: base_url.to_owned(),
            reason: e.to_string(),
        })?;

        Ok(Self {
            client,
            api_key: api_key.map(str::to_owned),
            base_url,
            currency: currency.to_owned(),
        })
    }

    #[must_use]
    pub fn has_api_key(&self) -> bool {
        self.api_key.is_some()
    }

    /// Fetches property details and offers for one hotel.
    ///
    /// # Errors
    ///
    /// - [`ProviderError::MissingApiKey`]: no key configured (no request is made).
    /// - [`ProviderError::Timeout`]: no complete response within `timeout`.
    /// - [`ProviderError::UnexpectedStatus`]: non-2xx response.
    /// - [`ProviderError::Upstream`]: 2xx with an `error` field in the body.
    /// - [`ProviderError::Deserialize`]: body is not the expected JSON shape.
    /// - [`ProviderError::Http`]: network or TLS failure.
    pub async fn fetch_property(
        &self,
        token: &str,
        hotel_name: &str,
        criteria: &SearchCriteria,
        timeout: Duration,
    ) -> Result<PropertyResponse, ProviderError> {
        let Some(api_key) = self.api_key.as_deref() else {
            return Err(ProviderError::MissingApiKey);
        };
        let url = self.property_url(api_key, token, hotel_name, criteria);

        let response = self
            .client
            .get(url)
            .header(reqwest::header::ACCEPT, "application/json")
            .timeout(timeout)
            .send()
            .await
            .map_err(|e| timeout_or_http(e, token, timeout))?;

        let status = response.status();
        if !status.is_success() {
            return Err(ProviderError::UnexpectedStatus {
                status: status.as_u16(),
                token: token.to_owned(),
            });
        }

        let body = response
            .text()
            .await
            .map_err(|e| timeout_or_http(e, token, timeout))?;
        let parsed = serde_json::from_str::<PropertyResponse>(&body).map_err(|e| {
            ProviderError::Deserialize {
                context: format!("property response for {token}"),
                source: e,
            }
        })?;

        if let Some(message) = parsed.error.as_deref().filter(|m| !m.trim().is_empty()) {
            return Err(ProviderError::Upstream {
                token: token.to_owned(),
                message: message.to_owned(),
            });
        }

        Ok(parsed)
    }

    /// Builds the property search URL. Contains the API key; never log it.
    fn property_url(
        &self,
        api_key: &str,
        token: &str,
        hotel_name: &str,
        criteria: &SearchCriteria,
    ) -> Url {
        let mut url = self.base_url.clone();
        url.query_pairs_mut()
            .append_pair("engine", ENGINE)
            .append_pair("q", hotel_name)
            .append_pair("property_token", token)
            .append_pair(
                "check_in_date",
                &criteria.check_in.format("%Y-%m-%d").to_string(),
            )
            .append_pair(
                "check_out_date",
                &criteria.check_out.format("%Y-%m-%d").to_string(),
            )
            .append_pair("adults", &criteria.adults.to_string())
            .append_pair("children", &criteria.children.to_string())
            .append_pair("currency", &self.currency)
            .append_pair("gl", "us")
            .append_pair("hl", "en")
            .append_pair("api_key", api_key);
        url
    }
}

fn timeout_or_http(err: reqwest::Error, token: &str, timeout: Duration) -> ProviderError {
    if err.is_timeout() {
        ProviderError::Timeout {
            token: token.to_owned(),
            after_ms: timeout.as_millis(),
        }
    } else {
        ProviderError::Http(err)
    }
}

#[cfg(test)]
#[path = "client_test.rs"]
mod tests;
