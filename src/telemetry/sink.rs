//! Fire-and-forget delivery to the telemetry endpoint.

use crate::config::TelemetryConfig;
use crate::telemetry::record::TelemetryRecord;

/// Best-effort sink posting exchange records to a configured endpoint.
///
/// Delivery runs on a detached task: the response path never waits for
/// it, and a delivery failure is traced and dropped.
pub struct TelemetrySink {
    client: reqwest::Client,
    config: TelemetryConfig,
}

impl TelemetrySink {
    pub fn new(config: TelemetryConfig) -> Self {
        Self {
            client: reqwest::Client::new(),
            config,
        }
    }

    /// Hand off one record. Returns immediately.
    pub fn dispatch(&self, record: TelemetryRecord) {
        if !self.config.enabled {
            return;
        }

        let client = self.client.clone();
        let endpoint = self.config.endpoint.clone();
        tokio::spawn(async move {
            match client.post(&endpoint).json(&record).send().await {
                Ok(response) => {
                    tracing::trace!(status = %response.status(), "telemetry delivered");
                }
                Err(error) => {
                    tracing::debug!(error = %error, "telemetry delivery failed");
                }
            }
        });
    }
}
