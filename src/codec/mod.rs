//! Text encodings: hex, base64, URL query components and HTML.

mod binary;
mod web;

use thiserror::Error;

pub use binary::{base64_decode, base64_encode, hex_decode, hex_encode};
pub use web::{html_escape, html_unescape, url_decode, url_encode};

#[derive(Debug, Error)]
pub enum CodecError {
    #[error("hex decode failed: {0}")]
    Hex(#[from] hex::FromHexError),

    #[error("base64 decode failed: {0}")]
    Base64(#[from] base64::DecodeError),

    #[error("invalid URL escape '{0}'")]
    UrlEscape(String),

    #[error("decoded text is not valid UTF-8")]
    Utf8,
}
