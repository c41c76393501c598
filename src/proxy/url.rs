//! Destination URL normalization.
//!
//! # Responsibilities
//! - Turn the raw path fragment into a well-formed absolute URL
//! - Repair the common `http:/host` single-slash client typo
//!
//! # Design Decisions
//! - Pure string transform with no failure mode: whether the destination
//!   is reachable is only established when the forwarder connects
//! - Idempotent on already-absolute URLs

/// Normalize a path fragment into an absolute URL.
///
/// Fragments that already carry a `scheme://` pass through unchanged.
/// A single-slash scheme (`http:/example.com`) is expanded. Everything
/// else gets `http://` prepended.
pub fn normalize(fragment: &str) -> String {
    if fragment.contains("://") {
        fragment.to_string()
    } else if fragment.contains(":/") {
        fragment.replacen(":/", "://", 1)
    } else {
        format!("http://{}", fragment)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_absolute_url_unchanged() {
        assert_eq!(normalize("http://example.com/a"), "http://example.com/a");
        assert_eq!(normalize("https://example.com"), "https://example.com");
    }

    #[test]
    fn test_idempotent() {
        let once = normalize("example.com/a");
        assert_eq!(normalize(&once), once);
    }

    #[test]
    fn test_single_slash_typo_expanded() {
        assert_eq!(normalize("http:/example.com"), "http://example.com");
        assert_eq!(normalize("https:/example.com/x"), "https://example.com/x");
    }

    #[test]
    fn test_scheme_prepended() {
        assert_eq!(normalize("example.com/a"), "http://example.com/a");
        assert_eq!(normalize("httpbin.org/get?a=b"), "http://httpbin.org/get?a=b");
    }
}
