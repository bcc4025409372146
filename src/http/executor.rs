//! Request execution.
//!
//! # Responsibilities
//! - Resolve a pooled client for the call's proxy / TLS / timeout / redirect
//!   configuration
//! - Build the outgoing request from the header block and merged cookies
//! - Follow redirects when allowed, under one overall deadline
//! - Read the body under a size ceiling and decode it
//!
//! # Design Decisions
//! - Single attempt: nothing is retried and no error is swallowed
//! - Failures after headers arrive still hand back status, headers and
//!   whatever body bytes were obtained
//! - An oversized body is returned truncated and still encoded

use std::sync::Arc;
use std::time::{Duration, Instant};

use bytes::Bytes;
use reqwest::header::{
    HeaderMap, HeaderName, HeaderValue, AUTHORIZATION, CONTENT_ENCODING, CONTENT_LENGTH,
    CONTENT_TYPE, COOKIE, LOCATION, PROXY_AUTHORIZATION,
};
use reqwest::{Method, StatusCode};
use url::Url;

use crate::config::{HttpKitConfig, RequestDefaults, DEFAULT_MAX_RESPONSE_BYTES};
use crate::http::cookies::merge_cookies;
use crate::http::decode::ContentEncoding;
use crate::http::error::{HttpError, HttpResult, RequestFailure};
use crate::http::headers::parse_header_block;
use crate::http::pool::{ClientPool, PooledClient, RedirectPolicy};
use crate::http::request::HttpRequest;
use crate::http::response::{collect_headers, proto_text, status_text, HttpResponse};
use crate::observability::metrics;

/// HTTP client backed by a shared transport pool.
///
/// Cheap to clone; clones share the pool.
#[derive(Debug, Clone)]
pub struct HttpClient {
    pool: Arc<ClientPool>,
    defaults: RequestDefaults,
}

impl HttpClient {
    pub fn new(config: &HttpKitConfig) -> Self {
        Self::with_pool(
            Arc::new(ClientPool::new(config.pool.clone())),
            config.defaults.clone(),
        )
    }

    pub fn with_pool(pool: Arc<ClientPool>, defaults: RequestDefaults) -> Self {
        Self { pool, defaults }
    }

    pub fn pool(&self) -> &Arc<ClientPool> {
        &self.pool
    }

    /// Execute a structured request.
    ///
    /// Zero `timeout_secs` / `max_response_bytes` fall back to the configured
    /// defaults.
    pub async fn execute(&self, request: &HttpRequest) -> HttpResult {
        let timeout_secs = if request.timeout_secs == 0 {
            self.defaults.timeout_secs
        } else {
            request.timeout_secs
        };
        let max_bytes = if request.max_response_bytes == 0 {
            self.defaults.max_response_bytes
        } else {
            request.max_response_bytes
        };
        self.run(request, Some(Duration::from_secs(timeout_secs)), max_bytes)
            .await
    }

    /// Positional entry point.
    ///
    /// `timeout_secs == 0` disables the overall deadline;
    /// `max_response_bytes == 0` means 200 MiB.
    #[allow(clippy::too_many_arguments)]
    pub async fn fetch(
        &self,
        url: &str,
        method: &str,
        body: Option<&[u8]>,
        cookie: &str,
        header_text: &str,
        allow_redirects: bool,
        proxy: &str,
        timeout_secs: u64,
        max_response_bytes: u64,
        ignore_cert_errors: bool,
    ) -> HttpResult {
        let request = HttpRequest {
            url: url.to_string(),
            method: method.to_string(),
            body: body.map(Bytes::copy_from_slice),
            cookie: cookie.to_string(),
            headers: header_text.to_string(),
            allow_redirects,
            proxy: proxy.to_string(),
            timeout_secs,
            max_response_bytes,
            ignore_cert_errors,
        };
        let timeout = (timeout_secs > 0).then(|| Duration::from_secs(timeout_secs));
        let max_bytes = if max_response_bytes == 0 {
            DEFAULT_MAX_RESPONSE_BYTES
        } else {
            max_response_bytes
        };
        self.run(&request, timeout, max_bytes).await
    }

    async fn run(&self, request: &HttpRequest, timeout: Option<Duration>, max_bytes: u64) -> HttpResult {
        let start = Instant::now();
        let result = self.run_inner(request, timeout, max_bytes).await;

        let method = if request.method.is_empty() {
            "GET"
        } else {
            request.method.as_str()
        };
        match &result {
            Ok(response) => {
                tracing::debug!(
                    method,
                    url = %request.url,
                    status = response.status_code,
                    bytes = response.body.len(),
                    elapsed_ms = start.elapsed().as_millis() as u64,
                    "Request completed"
                );
                metrics::record_request(method, Some(response.status_code), start);
            }
            Err(failure) => {
                tracing::debug!(
                    method,
                    url = %request.url,
                    error = %failure.error,
                    status = failure.response.status_code,
                    "Request failed"
                );
                metrics::record_request(method, None, start);
            }
        }
        result
    }

    async fn run_inner(
        &self,
        request: &HttpRequest,
        timeout: Option<Duration>,
        max_bytes: u64,
    ) -> HttpResult {
        let client = self
            .pool
            .client(
                &request.proxy,
                request.ignore_cert_errors,
                timeout,
                RedirectPolicy::from_allow(request.allow_redirects),
            )
            .map_err(RequestFailure::early)?;
        let outgoing = OutgoingRequest::prepare(request).map_err(RequestFailure::early)?;

        let call = perform(&client, outgoing, self.pool.config().max_redirects, max_bytes);
        match client.timeout() {
            Some(limit) => match tokio::time::timeout(limit, call).await {
                Ok(result) => result,
                Err(_) => Err(RequestFailure::early(HttpError::Timeout(limit))),
            },
            None => call.await,
        }
    }
}

/// Request parts that survive across redirect hops.
#[derive(Debug, Clone)]
struct OutgoingRequest {
    method: Method,
    url: Url,
    headers: HeaderMap,
    body: Bytes,
}

impl OutgoingRequest {
    fn prepare(request: &HttpRequest) -> Result<Self, HttpError> {
        let method = if request.method.is_empty() {
            Method::GET
        } else {
            Method::from_bytes(request.method.as_bytes())
                .map_err(|_| HttpError::Request(format!("invalid method '{}'", request.method)))?
        };

        let url = Url::parse(&request.url)
            .map_err(|e| HttpError::Request(format!("invalid URL '{}': {}", request.url, e)))?;
        if !matches!(url.scheme(), "http" | "https") {
            return Err(HttpError::Request(format!(
                "unsupported URL scheme '{}'",
                url.scheme()
            )));
        }

        let block = parse_header_block(&request.headers);
        let mut headers = HeaderMap::new();
        for (name, values) in &block.headers {
            let header_name = HeaderName::from_bytes(name.as_bytes())
                .map_err(|_| HttpError::Request(format!("invalid header name '{}'", name)))?;
            if header_name == CONTENT_LENGTH {
                tracing::debug!("Ignoring caller-supplied Content-Length");
                continue;
            }
            for value in values {
                let header_value = HeaderValue::from_bytes(value.as_bytes()).map_err(|_| {
                    HttpError::Request(format!("invalid value for header '{}'", name))
                })?;
                headers.append(header_name.clone(), header_value);
            }
        }

        let cookies = merge_cookies(block.cookie.as_deref().unwrap_or(""), &request.cookie);
        if let Some(cookie) = cookies.to_header_value() {
            let value = HeaderValue::from_bytes(cookie.as_bytes())
                .map_err(|_| HttpError::Request("invalid cookie value".to_string()))?;
            headers.insert(COOKIE, value);
        }

        Ok(Self {
            method,
            url,
            headers,
            body: request.body.clone().unwrap_or_default(),
        })
    }

    /// Rewrite for the next hop.
    fn redirect_to(&mut self, kind: RedirectKind, next: Url) {
        if kind == RedirectKind::SwitchToGet {
            if self.method != Method::HEAD {
                self.method = Method::GET;
            }
            self.body = Bytes::new();
            self.headers.remove(CONTENT_TYPE);
            self.headers.remove(CONTENT_ENCODING);
        }

        if !same_origin(&self.url, &next) {
            self.headers.remove(AUTHORIZATION);
            self.headers.remove(PROXY_AUTHORIZATION);
            self.headers.remove(COOKIE);
        }
        self.url = next;
    }
}

/// How a followable redirect rewrites the next request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum RedirectKind {
    /// 301, 302, 303: GET without a body.
    SwitchToGet,
    /// 307, 308: same method and body.
    Replay,
}

impl RedirectKind {
    /// `None` for statuses that are returned to the caller as-is (300, 304...).
    fn classify(status: StatusCode) -> Option<Self> {
        match status {
            StatusCode::MOVED_PERMANENTLY | StatusCode::FOUND | StatusCode::SEE_OTHER => {
                Some(Self::SwitchToGet)
            }
            StatusCode::TEMPORARY_REDIRECT | StatusCode::PERMANENT_REDIRECT => Some(Self::Replay),
            _ => None,
        }
    }
}

fn same_origin(a: &Url, b: &Url) -> bool {
    a.host_str() == b.host_str() && a.port_or_known_default() == b.port_or_known_default()
}

async fn perform(
    client: &PooledClient,
    outgoing: OutgoingRequest,
    max_redirects: usize,
    max_bytes: u64,
) -> HttpResult {
    let mut response = send(client, outgoing, max_redirects)
        .await
        .map_err(RequestFailure::early)?;

    let status_code = response.status().as_u16();
    let status = status_text(response.status());
    let proto = proto_text(response.version());
    let headers = collect_headers(response.headers());
    let declared = response.content_length();
    let encoding =
        ContentEncoding::from_header(response.headers().get(CONTENT_ENCODING).and_then(|v| v.to_str().ok()));

    let partial = |body: Vec<u8>| {
        HttpResponse::from_parts(status_code, proto.clone(), status.clone(), headers.clone(), body)
    };

    let body = match read_capped(&mut response, max_bytes).await {
        Ok(ReadBody::Complete(body)) => body,
        Ok(ReadBody::Truncated(body)) => {
            tracing::warn!(limit = max_bytes, ?declared, "Response body exceeds size limit");
            return Err(RequestFailure::new(
                HttpError::SizeExceeded {
                    limit: max_bytes,
                    declared,
                },
                partial(body),
            ));
        }
        Err((err, body)) => {
            return Err(RequestFailure::new(HttpError::Body(err), partial(body)));
        }
    };

    match encoding.decode(body.clone()) {
        Ok(decoded) => Ok(partial(decoded)),
        Err(source) => {
            tracing::warn!(%encoding, error = %source, "Response body decode failed");
            Err(RequestFailure::new(
                HttpError::Decode { encoding, source },
                partial(body),
            ))
        }
    }
}

/// Send and, when the client follows redirects, walk the chain.
async fn send(
    client: &PooledClient,
    mut outgoing: OutgoingRequest,
    max_redirects: usize,
) -> Result<reqwest::Response, HttpError> {
    let http = client.transport().inner();
    let mut hops = 0;

    loop {
        let response = http
            .request(outgoing.method.clone(), outgoing.url.clone())
            .headers(outgoing.headers.clone())
            .body(outgoing.body.clone())
            .send()
            .await
            .map_err(HttpError::Transport)?;

        let status = response.status();
        if client.redirect() == RedirectPolicy::Stop {
            return Ok(response);
        }
        let Some(kind) = RedirectKind::classify(status) else {
            return Ok(response);
        };
        let Some(location) = response.headers().get(LOCATION) else {
            return Ok(response);
        };
        if hops >= max_redirects {
            return Err(HttpError::Redirect(format!(
                "stopped after {} redirects",
                max_redirects
            )));
        }

        let location = location
            .to_str()
            .map_err(|_| HttpError::Redirect("Location header is not valid ASCII".to_string()))?;
        let next = outgoing
            .url
            .join(location)
            .map_err(|e| HttpError::Redirect(format!("invalid Location '{}': {}", location, e)))?;

        let from = outgoing.url.clone();
        outgoing.redirect_to(kind, next);
        hops += 1;
        tracing::debug!(
            from = %from,
            to = %outgoing.url,
            status = status.as_u16(),
            hop = hops,
            "Following redirect"
        );
    }
}

enum ReadBody {
    Complete(Vec<u8>),
    /// More than the limit arrived; holds exactly the limit.
    Truncated(Vec<u8>),
}

/// Read at most `max + 1` bytes to tell "exactly max" from "too large".
async fn read_capped(
    response: &mut reqwest::Response,
    max: u64,
) -> Result<ReadBody, (reqwest::Error, Vec<u8>)> {
    let limit = usize::try_from(max).unwrap_or(usize::MAX);
    let mut body = Vec::new();

    loop {
        match response.chunk().await {
            Ok(Some(chunk)) => {
                body.extend_from_slice(&chunk);
                if body.len() > limit {
                    body.truncate(limit);
                    return Ok(ReadBody::Truncated(body));
                }
            }
            Ok(None) => return Ok(ReadBody::Complete(body)),
            Err(err) => return Err((err, body)),
        }
    }
}
