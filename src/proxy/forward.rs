//! Outbound request execution.
//!
//! # Responsibilities
//! - Execute an [`OutboundSpec`] against the destination URL
//! - Relay the upstream body as a stream, never fully buffered
//!
//! # Design Decisions
//! - One shared `reqwest::Client` with default redirect and TLS policy;
//!   the core imposes no timeout of its own
//! - All network failures (DNS, connect, TLS, timeout) collapse into one
//!   undifferentiated exchange error

use axum::body::Body;
use axum::http::{HeaderValue, StatusCode};
use thiserror::Error;

use crate::proxy::translate::{OutboundBody, OutboundSpec};

/// Undifferentiated forwarding failure.
#[derive(Debug, Error)]
#[error("exchange with {url} failed: {source}")]
pub struct ForwardError {
    url: String,
    source: reqwest::Error,
}

/// Upstream result handed to the response composer.
///
/// `status_text` is the canonical reason phrase, kept for telemetry and
/// logging; the wire response carries only the status code.
pub struct UpstreamResponse {
    pub status: StatusCode,
    pub status_text: String,
    pub content_type: Option<HeaderValue>,
    pub body: Body,
}

/// Executes outbound requests against destination servers.
pub struct Forwarder {
    client: reqwest::Client,
}

impl Forwarder {
    pub fn new() -> Self {
        Self {
            client: reqwest::Client::new(),
        }
    }

    /// Send the outbound request and wrap the streaming response.
    pub async fn execute(
        &self,
        url: &str,
        spec: OutboundSpec,
    ) -> Result<UpstreamResponse, ForwardError> {
        let wrap = |source: reqwest::Error| ForwardError {
            url: url.to_string(),
            source,
        };

        let mut request = self.client.request(spec.method, url).headers(spec.headers);
        request = match spec.body {
            OutboundBody::Empty => request,
            OutboundBody::Json(value) => request.json(&value),
            OutboundBody::Text(text) => request.body(text),
            OutboundBody::Form(pairs) => request.form(&pairs),
            OutboundBody::Multipart(parts) => {
                let mut form = reqwest::multipart::Form::new();
                for part in parts {
                    let mut piece = reqwest::multipart::Part::bytes(part.data.to_vec());
                    if let Some(file_name) = part.file_name {
                        piece = piece.file_name(file_name);
                    }
                    if let Some(content_type) = part.content_type {
                        piece = piece.mime_str(&content_type).map_err(wrap)?;
                    }
                    form = form.part(part.name, piece);
                }
                request.multipart(form)
            }
            OutboundBody::Binary(bytes) => request.body(bytes),
        };

        let response = request.send().await.map_err(wrap)?;

        let status = response.status();
        let status_text = status.canonical_reason().unwrap_or_default().to_string();
        let content_type = response.headers().get(reqwest::header::CONTENT_TYPE).cloned();

        Ok(UpstreamResponse {
            status,
            status_text,
            content_type,
            // Stream the upstream body straight through; large or chunked
            // responses never land in memory whole.
            body: Body::from_stream(response.bytes_stream()),
        })
    }
}

impl Default for Forwarder {
    fn default() -> Self {
        Self::new()
    }
}
