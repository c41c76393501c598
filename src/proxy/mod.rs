//! The forwarding pipeline.
//!
//! # Data Flow
//! ```text
//! decoded path fragment
//!     → dispatch.rs (ordered guards: usage-info | blocked | proxied)
//!     → url.rs (normalize fragment into an absolute destination URL)
//!     → translate.rs (filter headers, encode body by content type)
//!     → forward.rs (execute via shared client, stream the response)
//! ```
//!
//! # Design Decisions
//! - Every fallible step funnels into [`PipelineError`]; the handler
//!   boundary converts it to the fixed 500 JSON shape
//! - The blocklist is immutable configuration injected at construction
//! - Outcomes are terminal: no retries, no cancellation propagation

pub mod blocklist;
pub mod dispatch;
pub mod forward;
pub mod translate;
pub mod url;

use thiserror::Error;

/// Any failure inside the normalize/translate/forward pipeline.
///
/// Callers do not branch on the variant: all of them become the same
/// caller-visible 500 response.
#[derive(Debug, Error)]
pub enum PipelineError {
    #[error("invalid percent-encoding in path: {0}")]
    Decode(#[from] std::string::FromUtf8Error),

    #[error("failed to read request body: {0}")]
    BodyRead(#[from] axum::Error),

    #[error(transparent)]
    Translate(#[from] translate::TranslateError),

    #[error(transparent)]
    Forward(#[from] forward::ForwardError),
}
