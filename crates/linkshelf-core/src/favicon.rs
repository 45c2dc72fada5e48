//! Favicon resolution and URL checks
//!
//! The resolver only builds an icon URL; it never fetches anything.

use url::Url;

/// Icon service endpoint; the host is appended as the `domain` parameter
const FAVICON_ENDPOINT: &str = "https://www.google.com/s2/favicons?sz=64&domain=";

/// Domain used when a URL does not parse
const FALLBACK_DOMAIN: &str = "example.com";

/// Maps a bookmark URL to a display-icon URL
pub trait FaviconResolver {
    fn resolve(&self, url: &str) -> String;
}

/// Resolver backed by Google's favicon service
#[derive(Debug, Clone, Copy, Default)]
pub struct GoogleFavicons;

impl FaviconResolver for GoogleFavicons {
    fn resolve(&self, url: &str) -> String {
        match Url::parse(url) {
            Ok(parsed) => format!("{}{}", FAVICON_ENDPOINT, parsed.host_str().unwrap_or("")),
            Err(_) => fallback_favicon(),
        }
    }
}

/// Icon URL returned for unparseable URLs
pub fn fallback_favicon() -> String {
    format!("{}{}", FAVICON_ENDPOINT, FALLBACK_DOMAIN)
}

/// True when `url` parses as an absolute URL
pub fn is_valid_url(url: &str) -> bool {
    Url::parse(url).is_ok()
}

/// Host part of a URL, if it has one
pub fn host_of(url: &str) -> Option<String> {
    Url::parse(url)
        .ok()
        .and_then(|parsed| parsed.host_str().map(str::to_string))
}
