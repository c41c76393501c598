//! Configuration validation.
//!
//! # Responsibilities
//! - Semantic validation (serde handles syntactic)
//! - Validate value ranges and address/URL syntax
//!
//! # Design Decisions
//! - Returns all validation errors, not just the first
//! - Validation is a pure function over the parsed config
//! - Runs before the config is accepted into the system

use std::net::SocketAddr;
use thiserror::Error;
use url::Url;

use crate::config::schema::ProxyConfig;

/// One semantic problem with a parsed configuration.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ValidationError {
    #[error("listener.bind_address is not a valid socket address: {0}")]
    BindAddress(String),

    #[error("blocklist keywords must not be empty strings")]
    EmptyBlocklistKeyword,

    #[error("telemetry is enabled but no endpoint is configured")]
    MissingTelemetryEndpoint,

    #[error("telemetry.endpoint is not a valid URL: {0}")]
    TelemetryEndpoint(String),

    #[error("limits.max_body_bytes must be greater than zero")]
    ZeroBodyLimit,
}

/// Validate a parsed configuration, collecting every error.
pub fn validate_config(config: &ProxyConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    if config.listener.bind_address.parse::<SocketAddr>().is_err() {
        errors.push(ValidationError::BindAddress(
            config.listener.bind_address.clone(),
        ));
    }

    if config.blocklist.keywords.iter().any(|k| k.trim().is_empty()) {
        errors.push(ValidationError::EmptyBlocklistKeyword);
    }

    if config.telemetry.enabled {
        if config.telemetry.endpoint.is_empty() {
            errors.push(ValidationError::MissingTelemetryEndpoint);
        } else if Url::parse(&config.telemetry.endpoint).is_err() {
            errors.push(ValidationError::TelemetryEndpoint(
                config.telemetry.endpoint.clone(),
            ));
        }
    }

    if config.limits.max_body_bytes == 0 {
        errors.push(ValidationError::ZeroBodyLimit);
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
