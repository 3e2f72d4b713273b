//! Host extraction from HTTP requests.

use axum::http::{HeaderMap, Uri, header};

/// Returns the host the client addressed, exactly as sent.
///
/// Reads the `Host` header and falls back to the URI authority (HTTP/2
/// requests carry `:authority` instead of `Host`). The value is not
/// lowercased and any port is kept.
///
/// Returns `None` if neither is present or the header is not valid UTF-8.
///
/// # Examples
///
/// ```ignore
/// let mut headers = HeaderMap::new();
/// headers.insert(header::HOST, "short.example:8080".parse().unwrap());
///
/// assert_eq!(request_host(&headers, &Uri::default()), Some("short.example:8080"));
/// ```
pub fn request_host<'a>(headers: &'a HeaderMap, uri: &'a Uri) -> Option<&'a str> {
    match headers.get(header::HOST) {
        Some(value) => value.to_str().ok(),
        None => uri.authority().map(|a| a.as_str()),
    }
}

/// Strips the port from a host value.
///
/// Handles:
/// - IPv4 addresses (e.g., `192.168.1.1`)
/// - IPv6 addresses (e.g., `[::1]`)
/// - Hostnames with ports (e.g., `example.com:3000`)
/// - Plain hostnames (e.g., `example.com`)
pub fn strip_port(host: &str) -> &str {
    if host.starts_with('[') {
        // IPv6 address (e.g., [::1] or [::1]:8080)
        match host.find(']') {
            Some(end_bracket) => &host[..=end_bracket],
            None => host,
        }
    } else {
        host.split(':').next().unwrap_or(host)
    }
}
