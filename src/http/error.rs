//! Error taxonomy for the request executor.

use thiserror::Error;

use crate::http::decode::ContentEncoding;
use crate::http::response::HttpResponse;

/// Errors that can occur while executing a request.
#[derive(Debug, Error)]
pub enum HttpError {
    /// The proxy address could not be parsed.
    #[error("invalid proxy URL '{proxy}': {reason}")]
    ProxyUrl { proxy: String, reason: String },

    /// The transport could not be configured (TLS / protocol negotiation).
    #[error("transport configuration failed: {0}")]
    ClientConfig(#[source] reqwest::Error),

    /// The request could not be built (bad method, URL or header).
    #[error("invalid request: {0}")]
    Request(String),

    /// DNS, connect, TLS or I/O failure while sending.
    #[error("sending request: {0}")]
    Transport(#[source] reqwest::Error),

    /// Redirect chain could not be followed.
    #[error("redirect failed: {0}")]
    Redirect(String),

    /// The overall deadline elapsed.
    #[error("request timed out after {0:?}")]
    Timeout(std::time::Duration),

    /// The connection failed while the body was being read.
    #[error("reading body: {0}")]
    Body(#[source] reqwest::Error),

    /// The body exceeded the configured ceiling.
    #[error("response exceeds max size of {limit} bytes")]
    SizeExceeded {
        limit: u64,
        /// Length the server announced, when it sent one.
        declared: Option<u64>,
    },

    /// The body could not be decoded per its `Content-Encoding`.
    #[error("{encoding} decode failed: {source}")]
    Decode {
        encoding: ContentEncoding,
        #[source]
        source: std::io::Error,
    },
}

impl HttpError {
    /// True when the failure happened before any response headers arrived.
    pub fn is_early(&self) -> bool {
        !matches!(
            self,
            HttpError::Body(_) | HttpError::SizeExceeded { .. } | HttpError::Decode { .. }
        )
    }
}

/// A failed call: the error plus whatever response data was obtained.
///
/// The response is the zero value for early failures and carries status,
/// headers and a (possibly truncated or still-encoded) body otherwise.
#[derive(Debug, Error)]
#[error("request failed")]
pub struct RequestFailure {
    #[source]
    pub error: HttpError,
    pub response: HttpResponse,
}

impl RequestFailure {
    pub fn new(error: HttpError, response: HttpResponse) -> Self {
        Self { error, response }
    }

    /// Failure before headers arrived; carries the zero-value response.
    pub fn early(error: HttpError) -> Self {
        Self::new(error, HttpResponse::default())
    }

    pub fn into_parts(self) -> (HttpError, HttpResponse) {
        (self.error, self.response)
    }
}

/// Result type for executor calls.
pub type HttpResult = Result<HttpResponse, RequestFailure>;
