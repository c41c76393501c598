//! Configuration loading from disk.
//!
//! Reads a TOML file, deserializes it, and runs the semantic validation
//! pass before the config is accepted.

use std::fs;
use std::path::Path;
use thiserror::Error;

use crate::config::schema::ProxyConfig;
use crate::config::validation::{validate_config, ValidationError};

/// Error type for configuration loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Parse error: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Validation failed: {}", join_errors(.0))]
    Validation(Vec<ValidationError>),
}

fn join_errors(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}

/// Load and validate configuration from a TOML file.
pub fn load_config(path: &Path) -> Result<ProxyConfig, ConfigError> {
    let content = fs::read_to_string(path)?;
    let config: ProxyConfig = toml::from_str(&content)?;

    validate_config(&config).map_err(ConfigError::Validation)?;

    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    fn write_temp(name: &str, content: &str) -> PathBuf {
        let path = std::env::temp_dir().join(format!("cors-relay-{}-{}", std::process::id(), name));
        fs::write(&path, content).unwrap();
        path
    }

    #[test]
    fn test_load_valid_config() {
        let path = write_temp(
            "valid.toml",
            r#"
            [listener]
            bind_address = "127.0.0.1:9000"
            "#,
        );
        let config = load_config(&path).unwrap();
        assert_eq!(config.listener.bind_address, "127.0.0.1:9000");
        fs::remove_file(path).ok();
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let result = load_config(Path::new("/nonexistent/cors-relay.toml"));
        assert!(matches!(result, Err(ConfigError::Io(_))));
    }

    #[test]
    fn test_bad_toml_is_parse_error() {
        let path = write_temp("bad.toml", "not [ valid toml");
        let result = load_config(&path);
        assert!(matches!(result, Err(ConfigError::Parse(_))));
        fs::remove_file(path).ok();
    }

    #[test]
    fn test_semantic_errors_joined_in_display() {
        let path = write_temp(
            "invalid.toml",
            r#"
            [listener]
            bind_address = "nowhere"

            [limits]
            max_body_bytes = 0
            "#,
        );
        let error = load_config(&path).unwrap_err();
        let message = error.to_string();
        assert!(message.starts_with("Validation failed: "));
        assert!(message.contains("listener.bind_address"));
        assert!(message.contains("limits.max_body_bytes"));
        fs::remove_file(path).ok();
    }
}
