//! `GET /api/hotel-images?url=`: relays third-party hotel images so pages
//! never reference the provider's CDNs directly.

use axum::{
    body::Bytes,
    extract::{Query, State},
    http::{header, HeaderValue},
    response::{IntoResponse, Response},
    Extension,
};
use reqwest::Url;
use serde::Deserialize;

use crate::middleware::RequestId;

use super::{ApiError, AppState};

const CACHE_CONTROL: &str = "public, max-age=86400";
const MAX_IMAGE_BYTES: usize = 10 * 1024 * 1024;

#[derive(Debug, Deserialize)]
pub(super) struct ImageQuery {
    pub url: Option<String>,
}

pub(super) fn parse_image_url(raw: Option<&str>) -> Result<Url, String> {
    let raw = raw
        .map(str::trim)
        .filter(|u| !u.is_empty())
        .ok_or_else(|| "url is required".to_owned())?;
    let url = Url::parse(raw).map_err(|e| format!("invalid url: {e}"))?;
    match url.scheme() {
        "http" | "https" => Ok(url),
        other => Err(format!("unsupported url scheme '{other}'")),
    }
}

pub(super) async fn proxy_image(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
    Query(query): Query<ImageQuery>,
) -> Result<Response, ApiError> {
    let url = parse_image_url(query.url.as_deref())
        .map_err(|message| ApiError::new(&*req_id.0, "validation_error", message))?;

    let bad_gateway = |message: String| {
        tracing::warn!(url = %url, %message, "image proxy failed");
        ApiError::new(&*req_id.0, "bad_gateway", "image could not be fetched")
    };

    let response = state
        .http
        .get(url.clone())
        .send()
        .await
        .map_err(|e| bad_gateway(e.to_string()))?;

    if !response.status().is_success() {
        return Err(bad_gateway(format!("upstream status {}", response.status())));
    }

    let content_type = response
        .headers()
        .get(header::CONTENT_TYPE)
        .filter(|v| v.to_str().is_ok_and(|ct| ct.starts_with("image/")))
        .cloned()
        .ok_or_else(|| bad_gateway("upstream response is not an image".to_owned()))?;

    let body: Bytes = response
        .bytes()
        .await
        .map_err(|e| bad_gateway(e.to_string()))?;
    if body.len() > MAX_IMAGE_BYTES {
        return Err(bad_gateway(format!("image too large: {} bytes", body.len())));
    }

    Ok((
        [
            (header::CONTENT_TYPE, content_type),
            (header::CACHE_CONTROL, HeaderValue::from_static(CACHE_CONTROL)),
        ],
        body,
    )
        .into_response())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_http_and_https() {
        assert!(parse_image_url(Some("https://img.example.com/a.jpg")).is_ok());
        assert!(parse_image_url(Some("http://img.example.com/a.jpg")).is_ok());
    }

    #[test]
    fn rejects_other_schemes_and_missing_url() {
        assert!(parse_image_url(Some("file:///etc/passwd")).is_err());
        assert!(parse_image_url(Some("javascript:alert(1)")).is_err());
        assert!(parse_image_url(Some("  ")).is_err());
        assert!(parse_image_url(None).is_err());
    }
}
