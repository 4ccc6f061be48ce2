//! Browser-like request headers.

use reqwest::header::{HeaderValue, ORIGIN, REFERER};
use reqwest::RequestBuilder;

/// Default headers sent with every request to the portal.
///
/// The portal serves its form only to clients that look like a desktop
/// browser; the User-Agent itself is set on the client.
pub(crate) struct RequestHeaders;

impl RequestHeaders {
    /// Applies the standard browser headers to a `reqwest::RequestBuilder`.
    pub(crate) fn apply_to_request_builder(builder: RequestBuilder) -> RequestBuilder {
        builder
            .header(
                reqwest::header::ACCEPT,
                "text/html,application/xhtml+xml,application/xml;q=0.9,image/avif,image/webp,image/apng,*/*;q=0.8",
            )
            .header(reqwest::header::ACCEPT_LANGUAGE, "en-US,en;q=0.9")
            .header(reqwest::header::UPGRADE_INSECURE_REQUESTS, "1")
            .header(reqwest::header::CACHE_CONTROL, "max-age=0")
    }

    /// Adds a `Referer` header when `referer` is a valid header value.
    pub(crate) fn with_referer(builder: RequestBuilder, referer: &str) -> RequestBuilder {
        match HeaderValue::from_str(referer) {
            Ok(value) => builder.header(REFERER, value),
            Err(_) => builder,
        }
    }

    /// Adds an `Origin` header derived from `page_url` (scheme, host and port).
    pub(crate) fn with_origin_of(builder: RequestBuilder, page_url: &str) -> RequestBuilder {
        match origin_of(page_url) {
            Some(origin) => builder.header(ORIGIN, origin),
            None => builder,
        }
    }
}

/// Serialized origin of `page_url`, or `None` for opaque or unparsable URLs.
pub(crate) fn origin_of(page_url: &str) -> Option<String> {
    let origin = url::Url::parse(page_url).ok()?.origin();
    origin.is_tuple().then(|| origin.ascii_serialization())
}
