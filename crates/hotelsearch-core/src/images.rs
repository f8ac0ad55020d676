//! Rewrites third-party image URLs to the application's own image proxy.

use percent_encoding::{utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};

pub const IMAGE_PROXY_PATH: &str = "/api/hotel-images";

/// Characters left unescaped in the `url` query value (RFC 3986 unreserved).
const QUERY_VALUE: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'.')
    .remove(b'_')
    .remove(b'~');

/// Returns the proxied form of `url`.
///
/// - Absolute `http(s)` URLs become `/api/hotel-images?url=<encoded>`.
/// - Root-relative paths (bundled assets) and already-proxied URLs pass through.
/// - Anything else (`data:`, `javascript:`, empty) yields `None`.
#[must_use]
pub fn proxy_image_url(url: &str) -> Option<String> {
    let url = url.trim();
    if url.is_empty() {
        return None;
    }
    if url.starts_with(IMAGE_PROXY_PATH) || (url.starts_with('/') && !url.starts_with("//")) {
        return Some(url.to_owned());
    }

    let lower = url.to_ascii_lowercase();
    if lower.starts_with("https://") || lower.starts_with("http://") {
        let encoded = utf8_percent_encode(url, QUERY_VALUE);
        return Some(format!("{IMAGE_PROXY_PATH}?url={encoded}"));
    }

    None
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn proxies_absolute_https_url() {
        assert_eq!(
            proxy_image_url("https://lh3.example.com/p/a.jpg?w=400").as_deref(),
            Some("/api/hotel-images?url=https%3A%2F%2Flh3.example.com%2Fp%2Fa.jpg%3Fw%3D400")
        );
    }

    #[test]
    fn keeps_local_asset_paths() {
        assert_eq!(
            proxy_image_url("/images/hotels/town-inn.jpg").as_deref(),
            Some("/images/hotels/town-inn.jpg")
        );
    }

    #[test]
    fn does_not_double_proxy() {
        let once = proxy_image_url("https://cdn.example.com/x.png").unwrap();
        assert_eq!(proxy_image_url(&once).as_deref(), Some(once.as_str()));
    }

    #[test]
    fn rejects_other_schemes() {
        assert!(proxy_image_url("data:image/png;base64,AAAA").is_none());
        assert!(proxy_image_url("//cdn.example.com/x.png").is_none());
        assert!(proxy_image_url("   ").is_none());
    }
}
