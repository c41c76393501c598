//! Exchange records handed to the telemetry sink.

use axum::http::{HeaderMap, Method, StatusCode};
use serde::Serialize;
use std::net::SocketAddr;
use url::Url;

use crate::proxy::url::normalize;

/// One completed exchange, as the sink's endpoint expects it.
///
/// Built once per request after the response is finalized; the core never
/// retains it.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TelemetryRecord {
    pub method: String,
    pub status_code: u16,
    pub client_ip: String,
    pub referer: Option<String>,
    pub user_agent: Option<String>,
    pub host: Option<String>,
    pub path: String,
    pub proxy_host: Option<String>,
}

impl TelemetryRecord {
    /// Build a record from the inbound request's parts and the final status.
    pub fn new(
        method: &Method,
        status: StatusCode,
        headers: &HeaderMap,
        peer: SocketAddr,
        path: &str,
    ) -> Self {
        let header = |name: &str| {
            headers
                .get(name)
                .and_then(|v| v.to_str().ok())
                .map(str::to_string)
        };

        // Behind another proxy the socket peer is not the caller; prefer
        // the first forwarded hop when one is reported.
        let client_ip = header("x-forwarded-for")
            .and_then(|v| v.split(',').next().map(|ip| ip.trim().to_string()))
            .unwrap_or_else(|| peer.ip().to_string());

        let (path, proxy_host) = derive_target(path);

        Self {
            method: method.to_string(),
            status_code: status.as_u16(),
            client_ip,
            referer: header("referer"),
            user_agent: header("user-agent"),
            host: header("host"),
            path,
            proxy_host,
        }
    }
}

/// Replace the raw inbound path with the normalized destination URL when
/// one is derivable, and report that destination's host.
fn derive_target(path: &str) -> (String, Option<String>) {
    if path.contains('.') && path != "/" && !path.contains("favicon.ico") {
        if let Ok(decoded) = urlencoding::decode(path.strip_prefix('/').unwrap_or(path)) {
            let target = normalize(&decoded);
            let proxy_host = Url::parse(&target)
                .ok()
                .and_then(|u| u.host_str().map(str::to_string));
            return (target, proxy_host);
        }
    }
    (path.to_string(), None)
}
