//! Logs and metrics emitted by the request path.
//!
//! `logging` installs the `tracing` subscriber (text or JSON lines on
//! stderr). `metrics` names the counters and histograms the pool and the
//! executor record; nothing is exported unless the host binary installs a
//! `metrics` recorder.

pub mod logging;
pub mod metrics;
