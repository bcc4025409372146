//! Client settings read from a TOML file.
//!
//! `load_config` reads the file, `toml` deserializes it into
//! [`HttpKitConfig`] with every section optional, and `validate_config`
//! rejects values the pool or the executor cannot honour (a zero
//! timeout, a runaway redirect limit or an unparsable log filter).
//!
//! The result is handed to [`crate::HttpClient::new`] and to
//! [`crate::observability::logging::init_logging`] once at startup.
//! Changing settings means building a new client.

pub mod loader;
pub mod schema;
pub mod validation;

pub use loader::{load_config, ConfigError};
pub use schema::{HttpKitConfig, LoggingConfig, PoolConfig, RequestDefaults};
pub use schema::DEFAULT_MAX_RESPONSE_BYTES;
