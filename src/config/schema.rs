//! Configuration schema definitions.
//!
//! All types derive Serde traits for deserialization from config files.
//! Every section has defaults, so an empty config file is valid.

use serde::{Deserialize, Serialize};

/// Root configuration for the relay.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct ProxyConfig {
    /// Listener configuration (bind address).
    pub listener: ListenerConfig,

    /// Destination blocklist.
    pub blocklist: BlocklistConfig,

    /// Request size limits.
    pub limits: LimitConfig,

    /// Telemetry sink settings.
    pub telemetry: TelemetryConfig,

    /// Observability settings.
    pub observability: ObservabilityConfig,
}

/// Listener configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ListenerConfig {
    /// Bind address (e.g., "0.0.0.0:8080").
    pub bind_address: String,
}

impl Default for ListenerConfig {
    fn default() -> Self {
        Self {
            bind_address: "0.0.0.0:8080".to_string(),
        }
    }
}

/// Destination blocklist configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct BlocklistConfig {
    /// Banned substrings, matched case-insensitively against the decoded
    /// destination fragment.
    pub keywords: Vec<String>,
}

impl Default for BlocklistConfig {
    fn default() -> Self {
        Self {
            keywords: [
                ".m3u8",
                ".ts",
                ".acc",
                ".m4s",
                "photocall.tv",
                "googlevideo.com",
                "liveradio.ie",
            ]
            .into_iter()
            .map(str::to_string)
            .collect(),
        }
    }
}

/// Request size limits.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct LimitConfig {
    /// Maximum inbound body size in bytes. Inbound bodies are buffered
    /// for translation; upstream response bodies are always streamed.
    pub max_body_bytes: usize,
}

impl Default for LimitConfig {
    fn default() -> Self {
        Self {
            max_body_bytes: 2 * 1024 * 1024, // 2MB
        }
    }
}

/// Telemetry sink configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct TelemetryConfig {
    /// Enable record delivery.
    pub enabled: bool,

    /// Endpoint receiving the POSTed records.
    pub endpoint: String,
}

impl Default for TelemetryConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            endpoint: String::new(),
        }
    }
}

/// Observability configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ObservabilityConfig {
    /// Log level (trace, debug, info, warn, error).
    pub log_level: String,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_cover_every_section() {
        let config = ProxyConfig::default();
        assert_eq!(config.listener.bind_address, "0.0.0.0:8080");
        assert_eq!(config.blocklist.keywords.len(), 7);
        assert!(config.blocklist.keywords.contains(&".m3u8".to_string()));
        assert_eq!(config.limits.max_body_bytes, 2 * 1024 * 1024);
        assert!(!config.telemetry.enabled);
        assert_eq!(config.observability.log_level, "info");
    }

    #[test]
    fn test_partial_toml_keeps_other_defaults() {
        let config: ProxyConfig = toml::from_str(
            r#"
            [listener]
            bind_address = "127.0.0.1:3000"

            [blocklist]
            keywords = [".flv"]
            "#,
        )
        .unwrap();
        assert_eq!(config.listener.bind_address, "127.0.0.1:3000");
        assert_eq!(config.blocklist.keywords, vec![".flv".to_string()]);
        assert_eq!(config.limits.max_body_bytes, 2 * 1024 * 1024);
    }

    #[test]
    fn test_empty_toml_is_valid() {
        let config: ProxyConfig = toml::from_str("").unwrap();
        assert!(!config.telemetry.enabled);
    }
}
