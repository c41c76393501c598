//! Telemetry subsystem.
//!
//! # Data Flow
//! ```text
//! handler finalizes response
//!     → record.rs (TelemetryRecord from request parts + final status)
//!     → sink.rs (detached POST to the configured endpoint)
//! ```
//!
//! # Design Decisions
//! - Strictly fire-and-forget: the sink is invoked after the response is
//!   built, is never awaited, and its failures are traced and dropped
//! - A disabled sink short-circuits before spawning anything

pub mod record;
pub mod sink;

pub use record::TelemetryRecord;
pub use sink::TelemetrySink;
