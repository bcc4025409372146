//! Response model and formatting.
//!
//! # Responsibilities
//! - Hold the normalized result of a call
//! - Render the status line and raw header text
//!
//! # Design Decisions
//! - `Default` is the zero value handed back on early failures
//! - Header names are canonicalized; ordering follows the multimap and
//!   callers must not depend on it

use serde::Serialize;

use crate::http::headers::{canonical_header_key, HeaderMultimap};

/// A fully buffered HTTP response.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct HttpResponse {
    /// Numeric status code, `0` when no response was received.
    pub status_code: u16,

    /// Protocol version, e.g. `HTTP/1.1` or `HTTP/2.0`.
    pub proto: String,

    /// Status text, e.g. `200 OK`.
    pub status: String,

    /// Response headers, every value kept.
    pub headers: HeaderMultimap,

    /// `"<proto> <status>\r\n"`.
    pub status_line: String,

    /// `"Key: Value\r\n"` per header value.
    pub raw_headers: String,

    /// Body bytes after decoding.
    #[serde(skip)]
    pub body: Vec<u8>,
}

impl HttpResponse {
    /// Build a response from its parts, deriving the formatted fields.
    pub fn from_parts(
        status_code: u16,
        proto: impl Into<String>,
        status: impl Into<String>,
        headers: HeaderMultimap,
        body: Vec<u8>,
    ) -> Self {
        let proto = proto.into();
        let status = status.into();
        Self {
            status_line: format_status_line(&proto, &status),
            raw_headers: format_headers(&headers),
            status_code,
            proto,
            status,
            headers,
            body,
        }
    }

    /// First value of a header, matched case-insensitively.
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .get(&canonical_header_key(name))
            .and_then(|values| values.first())
            .map(String::as_str)
    }

    /// Body as text, replacing invalid UTF-8.
    pub fn text(&self) -> String {
        String::from_utf8_lossy(&self.body).into_owned()
    }
}

/// `"<proto> <status>\r\n"`.
pub fn format_status_line(proto: &str, status: &str) -> String {
    format!("{} {}\r\n", proto, status)
}

/// One `"Key: Value\r\n"` line per value per key.
pub fn format_headers(headers: &HeaderMultimap) -> String {
    let mut raw = String::new();
    for (key, values) in headers {
        for value in values {
            raw.push_str(key);
            raw.push_str(": ");
            raw.push_str(value);
            raw.push_str("\r\n");
        }
    }
    raw
}

/// Status text the way servers send it: code plus reason phrase.
pub fn status_text(status: reqwest::StatusCode) -> String {
    match status.canonical_reason() {
        Some(reason) => format!("{} {}", status.as_u16(), reason),
        None => status.as_u16().to_string(),
    }
}

/// Protocol string for a negotiated version.
pub fn proto_text(version: reqwest::Version) -> String {
    format!("{:?}", version)
}

/// Collect a `HeaderMap` into the canonical multimap.
pub fn collect_headers(map: &reqwest::header::HeaderMap) -> HeaderMultimap {
    let mut headers = HeaderMultimap::new();
    for (name, value) in map {
        headers
            .entry(canonical_header_key(name.as_str()))
            .or_default()
            .push(String::from_utf8_lossy(value.as_bytes()).into_owned());
    }
    headers
}
