//! Configuration loading from disk.

use std::fs;
use std::path::Path;

use thiserror::Error;

use crate::config::schema::ServiceConfig;
use crate::config::validation::{validate_config, ValidationError};

/// Error type for configuration loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Parse error: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Validation failed: {}", join(.0))]
    Validation(Vec<ValidationError>),
}

fn join(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}

/// Parse and validate configuration from TOML text.
pub fn parse_config(content: &str) -> Result<ServiceConfig, ConfigError> {
    let config: ServiceConfig = toml::from_str(content)?;
    validate_config(&config).map_err(ConfigError::Validation)?;
    Ok(config)
}

/// Load and validate configuration from a TOML file.
pub fn load_config(path: &Path) -> Result<ServiceConfig, ConfigError> {
    let content = fs::read_to_string(path)?;
    parse_config(&content)
}

/// Build the effective configuration from an optional file and command-line
/// overrides. Validation runs once, after every override is applied.
pub fn resolve_config(path: Option<&Path>, bind: Option<String>) -> Result<ServiceConfig, ConfigError> {
    let mut config = match path {
        Some(path) => toml::from_str(&fs::read_to_string(path)?)?,
        None => ServiceConfig::default(),
    };
    if let Some(bind) = bind {
        config.listener.bind_address = bind;
    }
    validate_config(&config).map_err(ConfigError::Validation)?;
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_valid() {
        let config = parse_config("[timeouts]\nrequest_secs = 3\n").unwrap();
        assert_eq!(config.timeouts.request_secs, 3);
    }

    #[test]
    fn test_parse_syntax_error() {
        assert!(matches!(
            parse_config("[listener\n"),
            Err(ConfigError::Parse(_))
        ));
    }

    #[test]
    fn test_validation_errors_are_joined() {
        let err = parse_config("[timeouts]\nrequest_secs = 0\n[limits]\nmax_body_size = 0\n")
            .unwrap_err();
        assert_eq!(
            err.to_string(),
            "Validation failed: timeouts.request_secs must be greater than zero, \
             limits.max_body_size must be greater than zero"
        );
    }

    #[test]
    fn test_bind_override_is_validated() {
        let err = resolve_config(None, Some("not-an-address".into())).unwrap_err();
        assert_eq!(
            err.to_string(),
            "Validation failed: listener.bind_address: \"not-an-address\" is not a valid socket address"
        );
    }

    #[test]
    fn test_bind_override_fixes_file_value() {
        let path = std::env::temp_dir().join(format!("hexnet-resolve-{}.toml", std::process::id()));
        fs::write(&path, "[listener]\nbind_address = \"nowhere\"\n").unwrap();

        assert!(matches!(
            resolve_config(Some(&path), None),
            Err(ConfigError::Validation(_))
        ));
        let config = resolve_config(Some(&path), Some("127.0.0.1:9000".into())).unwrap();
        assert_eq!(config.listener.bind_address, "127.0.0.1:9000");

        fs::remove_file(&path).unwrap();
    }

    #[test]
    fn test_missing_file() {
        let err = load_config(Path::new("/nonexistent/hexnet.toml")).unwrap_err();
        assert!(matches!(err, ConfigError::Io(_)));
    }
}
