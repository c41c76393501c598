//! Per-request outcome selection.
//!
//! # Responsibilities
//! - Evaluate the ordered guards: usage-info, blocked, proxied
//! - Preserve the exact precedence of the guards (first match wins)
//!
//! # Design Decisions
//! - Pure function over (method, fragment, blocklist) returning a tagged
//!   outcome, so every branch is testable without a server
//! - The usage-info arm distinguishes an informational call (OPTIONS, or
//!   a bare root visit with an empty fragment) from a malformed one via
//!   `invalid = !(OPTIONS || empty)`; OPTIONS therefore always gets the
//!   200 variant, whatever the fragment contains
//! - The blocklist runs on the raw decoded fragment, before URL
//!   normalization; the destination is never contacted for blocked or
//!   usage-info outcomes

use axum::http::Method;

use crate::proxy::blocklist::Blocklist;
use crate::proxy::url::normalize;

/// Mutually exclusive request outcomes. The fourth outcome, a 500 error,
/// is the `Err` arm of the surrounding pipeline.
#[derive(Debug, PartialEq)]
pub enum Outcome {
    /// Reply with the usage payload; 400 when `invalid`, else 200.
    UsageInfo { invalid: bool },
    /// Reply 403 naming the matched keywords.
    Blocked { keywords: Vec<String> },
    /// Forward to the normalized destination URL.
    Proxied { url: String },
}

/// Pick the outcome for one inbound request.
pub fn decide(method: &Method, fragment: &str, blocklist: &Blocklist) -> Outcome {
    // Character count, not byte length: a two-character multibyte
    // fragment is still a malformed call.
    if *method == Method::OPTIONS
        || fragment.chars().count() < 3
        || !fragment.contains('.')
        || fragment == "favicon.ico"
        || fragment == "robots.txt"
    {
        let invalid = !(*method == Method::OPTIONS || fragment.is_empty());
        return Outcome::UsageInfo { invalid };
    }

    let keywords = blocklist.matches(fragment);
    if !keywords.is_empty() {
        return Outcome::Blocked { keywords };
    }

    Outcome::Proxied {
        url: normalize(fragment),
    }
}
