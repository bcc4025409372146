//! Request description.
//!
//! # Responsibilities
//! - Carry everything one call needs: target, payload, headers, policy
//! - Provide a builder for the structured entry point
//!
//! # Design Decisions
//! - Built fresh per call; the executor only borrows it
//! - `0` in `timeout_secs` / `max_response_bytes` means "use the default"

use bytes::Bytes;

/// Parameters of a single HTTP call.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HttpRequest {
    /// Target URL.
    pub url: String,

    /// Method name; empty means `GET`.
    pub method: String,

    /// Request body; `None` sends an empty body.
    pub body: Option<Bytes>,

    /// Explicit cookie string, e.g. `a=1; b=2`. Wins over the header block.
    pub cookie: String,

    /// Multi-line `Key: Value` header block.
    pub headers: String,

    /// Follow redirects instead of returning the first response.
    pub allow_redirects: bool,

    /// Proxy URL (`http://`, `https://`, `socks5://`), empty for none.
    pub proxy: String,

    /// Overall timeout in seconds, `0` for the configured default.
    pub timeout_secs: u64,

    /// Body ceiling in bytes, `0` for the configured default.
    pub max_response_bytes: u64,

    /// Skip TLS certificate verification.
    pub ignore_cert_errors: bool,
}

impl HttpRequest {
    pub fn new(method: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            method: method.into(),
            url: url.into(),
            ..Default::default()
        }
    }

    pub fn get(url: impl Into<String>) -> Self {
        Self::new("GET", url)
    }

    pub fn post(url: impl Into<String>, body: impl Into<Bytes>) -> Self {
        Self::new("POST", url).body(body)
    }

    pub fn body(mut self, body: impl Into<Bytes>) -> Self {
        self.body = Some(body.into());
        self
    }

    pub fn cookie(mut self, cookie: impl Into<String>) -> Self {
        self.cookie = cookie.into();
        self
    }

    pub fn headers(mut self, headers: impl Into<String>) -> Self {
        self.headers = headers.into();
        self
    }

    pub fn allow_redirects(mut self, allow: bool) -> Self {
        self.allow_redirects = allow;
        self
    }

    pub fn proxy(mut self, proxy: impl Into<String>) -> Self {
        self.proxy = proxy.into();
        self
    }

    pub fn timeout_secs(mut self, secs: u64) -> Self {
        self.timeout_secs = secs;
        self
    }

    pub fn max_response_bytes(mut self, bytes: u64) -> Self {
        self.max_response_bytes = bytes;
        self
    }

    pub fn ignore_cert_errors(mut self, ignore: bool) -> Self {
        self.ignore_cert_errors = ignore;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builder_sets_fields() {
        let req = HttpRequest::post("http://example.test/", "a=1&b=2")
            .cookie("sid=1")
            .headers("Accept: */*")
            .allow_redirects(true)
            .proxy("socks5://127.0.0.1:1080")
            .timeout_secs(5)
            .max_response_bytes(1024)
            .ignore_cert_errors(true);

        assert_eq!(req.method, "POST");
        assert_eq!(req.body.as_deref(), Some(&b"a=1&b=2"[..]));
        assert_eq!(req.cookie, "sid=1");
        assert!(req.allow_redirects);
        assert_eq!(req.timeout_secs, 5);
        assert_eq!(req.max_response_bytes, 1024);
        assert!(req.ignore_cert_errors);
    }

    #[test]
    fn defaults_are_zero() {
        let req = HttpRequest::get("http://example.test/");
        assert!(req.body.is_none());
        assert_eq!(req.timeout_secs, 0);
        assert_eq!(req.max_response_bytes, 0);
        assert!(!req.allow_redirects);
    }
}
