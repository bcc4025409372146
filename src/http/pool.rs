//! Transport and client pooling.
//!
//! # Responsibilities
//! - Cache one connection-pooling transport per (proxy, ignore-cert) pair
//! - Cache one client per (transport, timeout, redirect policy)
//! - Fail fast on bad proxy or builder configuration, caching nothing
//!
//! # Design Decisions
//! - Entries are immutable; a different configuration is a different key
//! - Insert-if-absent: racing creators build independently, the first
//!   inserted entry is kept and the rest are dropped
//! - Entries live as long as the pool; nothing is evicted
//! - No lock is held while a request is in flight

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;

use dashmap::DashMap;

use crate::config::PoolConfig;
use crate::http::error::HttpError;
use crate::observability::metrics;

static TRANSPORT_ID_COUNTER: AtomicU64 = AtomicU64::new(1);

/// Unique identifier for a transport.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TransportId(u64);

impl TransportId {
    fn next() -> Self {
        Self(TRANSPORT_ID_COUNTER.fetch_add(1, Ordering::Relaxed))
    }

    pub fn as_u64(&self) -> u64 {
        self.0
    }
}

impl std::fmt::Display for TransportId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "transport-{}", self.0)
    }
}

/// Whether redirects are followed or the first response is returned.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RedirectPolicy {
    Follow,
    Stop,
}

impl RedirectPolicy {
    pub fn from_allow(allow: bool) -> Self {
        if allow {
            Self::Follow
        } else {
            Self::Stop
        }
    }
}

/// Pool key for transports.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct TransportKey {
    pub proxy: String,
    pub ignore_cert_errors: bool,
}

/// A configured, connection-pooling transport.
#[derive(Debug)]
pub struct Transport {
    id: TransportId,
    key: TransportKey,
    inner: reqwest::Client,
}

impl Transport {
    /// Build a transport. Redirects are never followed here; the executor
    /// drives them so that redirect policy can live on the client entry.
    pub fn build(key: TransportKey, config: &PoolConfig) -> Result<Self, HttpError> {
        let mut builder = reqwest::Client::builder()
            .danger_accept_invalid_certs(key.ignore_cert_errors)
            .pool_max_idle_per_host(config.max_idle_per_host)
            .pool_idle_timeout(config.idle_timeout())
            .connect_timeout(config.connect_timeout())
            .tcp_keepalive(config.tcp_keepalive())
            .redirect(reqwest::redirect::Policy::none());

        if !config.http2 {
            builder = builder.http1_only();
        }

        builder = if key.proxy.is_empty() {
            builder.no_proxy()
        } else {
            builder.proxy(parse_proxy(&key.proxy)?)
        };

        let inner = builder.build().map_err(HttpError::ClientConfig)?;

        Ok(Self {
            id: TransportId::next(),
            key,
            inner,
        })
    }

    pub fn id(&self) -> TransportId {
        self.id
    }

    pub fn key(&self) -> &TransportKey {
        &self.key
    }

    pub fn inner(&self) -> &reqwest::Client {
        &self.inner
    }
}

fn parse_proxy(proxy: &str) -> Result<reqwest::Proxy, HttpError> {
    let invalid = |reason: String| HttpError::ProxyUrl {
        proxy: proxy.to_string(),
        reason,
    };
    let url = url::Url::parse(proxy).map_err(|e| invalid(e.to_string()))?;
    if url.host_str().is_none() {
        return Err(invalid("missing host".to_string()));
    }
    reqwest::Proxy::all(url).map_err(|e| invalid(e.to_string()))
}

/// Pool key for clients.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ClientKey {
    pub transport: TransportId,
    /// `None` means no overall deadline.
    pub timeout: Option<Duration>,
    pub redirect: RedirectPolicy,
}

/// A transport plus per-call policy.
#[derive(Debug)]
pub struct PooledClient {
    transport: Arc<Transport>,
    timeout: Option<Duration>,
    redirect: RedirectPolicy,
}

impl PooledClient {
    pub fn transport(&self) -> &Arc<Transport> {
        &self.transport
    }

    pub fn timeout(&self) -> Option<Duration> {
        self.timeout
    }

    pub fn redirect(&self) -> RedirectPolicy {
        self.redirect
    }
}

/// Process-lifetime cache of transports and clients.
///
/// Owned by the application (usually inside an `HttpClient`); tests create a
/// fresh one per case.
#[derive(Debug, Default)]
pub struct ClientPool {
    config: PoolConfig,
    transports: DashMap<TransportKey, Arc<Transport>>,
    clients: DashMap<ClientKey, Arc<PooledClient>>,
}

impl ClientPool {
    pub fn new(config: PoolConfig) -> Self {
        Self {
            config,
            transports: DashMap::new(),
            clients: DashMap::new(),
        }
    }

    pub fn config(&self) -> &PoolConfig {
        &self.config
    }

    /// Get or create the transport for a proxy / certificate policy pair.
    pub fn transport(
        &self,
        proxy: &str,
        ignore_cert_errors: bool,
    ) -> Result<Arc<Transport>, HttpError> {
        let key = TransportKey {
            proxy: proxy.to_string(),
            ignore_cert_errors,
        };
        if let Some(existing) = self.transports.get(&key) {
            return Ok(Arc::clone(existing.value()));
        }

        let built = Arc::new(Transport::build(key.clone(), &self.config)?);
        let kept = Arc::clone(self.transports.entry(key).or_insert(built).value());

        tracing::debug!(
            transport = %kept.id(),
            proxy = %kept.key().proxy,
            ignore_cert_errors,
            "Transport ready"
        );
        metrics::record_transport_count(self.transports.len());
        Ok(kept)
    }

    /// Get or create the client for a full call configuration.
    pub fn client(
        &self,
        proxy: &str,
        ignore_cert_errors: bool,
        timeout: Option<Duration>,
        redirect: RedirectPolicy,
    ) -> Result<Arc<PooledClient>, HttpError> {
        let transport = self.transport(proxy, ignore_cert_errors)?;
        let key = ClientKey {
            transport: transport.id(),
            timeout,
            redirect,
        };
        if let Some(existing) = self.clients.get(&key) {
            return Ok(Arc::clone(existing.value()));
        }

        let built = Arc::new(PooledClient {
            transport,
            timeout,
            redirect,
        });
        let kept = Arc::clone(self.clients.entry(key).or_insert(built).value());
        metrics::record_client_count(self.clients.len());
        Ok(kept)
    }

    pub fn transport_count(&self) -> usize {
        self.transports.len()
    }

    pub fn client_count(&self) -> usize {
        self.clients.len()
    }
}
