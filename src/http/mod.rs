//! HTTP protocol handling subsystem.
//!
//! # Data Flow
//! ```text
//! TCP connection
//!     → server.rs (Axum setup, request ID, tracing)
//!     → proxy::dispatch (usage-info | blocked | proxied)
//!     → response.rs (CORS injection, final response)
//!     → send to client; telemetry dispatched after
//! ```

pub mod response;
pub mod server;

pub use server::HttpServer;
