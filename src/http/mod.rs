//! HTTP request execution subsystem.
//!
//! # Data Flow
//! ```text
//! HttpRequest / positional fetch()
//!     → pool.rs (transport + client for proxy, TLS, timeout, redirects)
//!     → headers.rs (parse header block, extract Cookie line)
//!     → cookies.rs (merge header and explicit cookies)
//!     → executor.rs (send, follow redirects, capped body read)
//!     → decode.rs (Content-Encoding)
//!     → response.rs (status line, raw headers)
//!     → Result<HttpResponse, RequestFailure>
//! ```

pub mod cookies;
pub mod decode;
pub mod error;
pub mod executor;
pub mod headers;
pub mod pool;
pub mod request;
pub mod response;

pub use error::{HttpError, HttpResult, RequestFailure};
pub use executor::HttpClient;
pub use pool::{ClientPool, RedirectPolicy};
pub use request::HttpRequest;
pub use response::HttpResponse;
