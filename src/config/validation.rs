//! Configuration validation.
//!
//! # Responsibilities
//! - Semantic validation (serde handles syntactic)
//! - Validate value ranges (timeouts > 0, caps > 0)
//! - Check the logging filter parses
//!
//! # Design Decisions
//! - Returns all validation errors, not just first
//! - Validation is pure function: HttpKitConfig → Result<(), Vec<ValidationError>>
//! - Runs before config is accepted into the system

use crate::config::schema::HttpKitConfig;
use tracing_subscriber::EnvFilter;

/// A single semantic problem found in a configuration.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{field}: {message}")]
pub struct ValidationError {
    /// Dotted path of the offending field.
    pub field: &'static str,
    pub message: String,
}

impl ValidationError {
    fn new(field: &'static str, message: impl Into<String>) -> Self {
        Self {
            field,
            message: message.into(),
        }
    }
}

/// Validate a configuration, collecting every problem.
pub fn validate_config(config: &HttpKitConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    if config.pool.connect_timeout_secs == 0 {
        errors.push(ValidationError::new(
            "pool.connect_timeout_secs",
            "must be greater than zero",
        ));
    }
    if config.pool.idle_timeout_secs == 0 {
        errors.push(ValidationError::new(
            "pool.idle_timeout_secs",
            "must be greater than zero",
        ));
    }
    if config.pool.max_redirects > 50 {
        errors.push(ValidationError::new(
            "pool.max_redirects",
            format!("{} exceeds the limit of 50", config.pool.max_redirects),
        ));
    }
    if config.defaults.timeout_secs == 0 {
        errors.push(ValidationError::new(
            "defaults.timeout_secs",
            "must be greater than zero",
        ));
    }
    if config.defaults.max_response_bytes == 0 {
        errors.push(ValidationError::new(
            "defaults.max_response_bytes",
            "must be greater than zero",
        ));
    }
    if let Err(e) = EnvFilter::try_new(&config.logging.level) {
        errors.push(ValidationError::new("logging.level", e.to_string()));
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_is_valid() {
        assert!(validate_config(&HttpKitConfig::default()).is_ok());
    }

    #[test]
    fn reports_every_error() {
        let mut config = HttpKitConfig::default();
        config.pool.connect_timeout_secs = 0;
        config.defaults.timeout_secs = 0;
        config.defaults.max_response_bytes = 0;

        let errors = validate_config(&config).unwrap_err();
        let fields: Vec<_> = errors.iter().map(|e| e.field).collect();
        assert_eq!(
            fields,
            vec![
                "pool.connect_timeout_secs",
                "defaults.timeout_secs",
                "defaults.max_response_bytes"
            ]
        );
    }

    #[test]
    fn rejects_runaway_redirect_limit() {
        let mut config = HttpKitConfig::default();
        config.pool.max_redirects = 500;
        let errors = validate_config(&config).unwrap_err();
        assert_eq!(errors.len(), 1);
        assert!(errors[0].to_string().starts_with("pool.max_redirects"));
    }
}
