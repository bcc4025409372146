//! HTTP request toolkit.
//!
//! A pooled, single-shot HTTP client that returns fully buffered, decoded
//! responses, plus the small text, file and conversion helpers that usually
//! travel with it.

// Core
pub mod config;
pub mod http;
pub mod observability;

// Helpers
pub mod charset;
pub mod codec;
pub mod convert;
pub mod csv;
pub mod files;
pub mod text;
pub mod time;

pub use config::HttpKitConfig;
pub use http::{HttpClient, HttpError, HttpRequest, HttpResponse, RequestFailure};
