//! Reading client settings from a TOML file.

use std::fs;
use std::path::{Path, PathBuf};

use crate::config::schema::HttpKitConfig;
use crate::config::validation::{validate_config, ValidationError};

/// Why a configuration could not be produced.
#[derive(Debug)]
pub enum ConfigError {
    /// The file could not be read.
    Io { path: PathBuf, source: std::io::Error },
    /// The text is not valid TOML for [`HttpKitConfig`].
    Parse(toml::de::Error),
    /// The values deserialized but are unusable.
    Validation(Vec<ValidationError>),
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::Io { path, source } => {
                write!(f, "cannot read config {}: {}", path.display(), source)
            }
            ConfigError::Parse(e) => write!(f, "malformed config: {}", e),
            ConfigError::Validation(errors) => {
                let joined: Vec<String> = errors.iter().map(ToString::to_string).collect();
                write!(f, "invalid config: {}", joined.join("; "))
            }
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ConfigError::Io { source, .. } => Some(source),
            ConfigError::Parse(e) => Some(e),
            ConfigError::Validation(_) => None,
        }
    }
}

/// Parse and validate configuration from TOML text.
pub fn parse_config(content: &str) -> Result<HttpKitConfig, ConfigError> {
    let config: HttpKitConfig = toml::from_str(content).map_err(ConfigError::Parse)?;
    validate_config(&config).map_err(ConfigError::Validation)?;
    Ok(config)
}

/// Read `path` and parse it with [`parse_config`].
pub fn load_config(path: &Path) -> Result<HttpKitConfig, ConfigError> {
    let content = fs::read_to_string(path).map_err(|source| ConfigError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let config = parse_config(&content)?;

    tracing::debug!(
        path = %path.display(),
        timeout_secs = config.defaults.timeout_secs,
        max_redirects = config.pool.max_redirects,
        "Client settings loaded"
    );
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn loads_file_from_disk() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[defaults]\ntimeout_secs = 12").unwrap();

        let config = load_config(file.path()).unwrap();
        assert_eq!(config.defaults.timeout_secs, 12);
    }

    #[test]
    fn missing_file_is_io_error() {
        let err = load_config(Path::new("/definitely/not/here.toml")).unwrap_err();
        assert!(matches!(err, ConfigError::Io { .. }));
        assert!(err.to_string().starts_with("cannot read config /definitely/not/here.toml"));
    }

    #[test]
    fn syntax_error_is_parse_error() {
        let err = parse_config("[pool\nmax_idle_per_host = 1").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn semantic_error_lists_fields() {
        let err = parse_config("[defaults]\ntimeout_secs = 0").unwrap_err();
        assert!(matches!(err, ConfigError::Validation(ref v) if v.len() == 1));
        assert_eq!(
            err.to_string(),
            "invalid config: defaults.timeout_secs: must be greater than zero"
        );
    }
}
