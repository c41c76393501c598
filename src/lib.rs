//! Single-hop CORS forwarding proxy.
//!
//! The inbound path encodes a destination URL (`/{URL}`); the relay
//! rewrites and forwards the request, then streams the destination's
//! response back with permissive cross-origin headers injected.

pub mod config;
pub mod http;
pub mod proxy;
pub mod telemetry;

pub use config::ProxyConfig;
pub use http::HttpServer;
