//! Destination blocklist.
//!
//! # Responsibilities
//! - Hold the immutable set of banned substrings from configuration
//! - Report every keyword contained in a candidate URL
//!
//! # Design Decisions
//! - Matching is case-insensitive, unanchored substring containment;
//!   keywords are lower-cased once at construction
//! - The filter runs on the raw decoded fragment, before normalization,
//!   so a banned host cannot be smuggled past it by scheme tricks

/// Immutable substring filter for destination URLs.
#[derive(Debug, Clone)]
pub struct Blocklist {
    keywords: Vec<String>,
}

impl Blocklist {
    /// Create a blocklist from configured keywords.
    pub fn new(keywords: Vec<String>) -> Self {
        Self {
            keywords: keywords.into_iter().map(|k| k.to_lowercase()).collect(),
        }
    }

    /// Return every configured keyword the candidate URL contains.
    ///
    /// An empty result means the URL is allowed.
    pub fn matches(&self, url: &str) -> Vec<String> {
        let candidate = url.to_lowercase();
        self.keywords
            .iter()
            .filter(|k| candidate.contains(k.as_str()))
            .cloned()
            .collect()
    }
}
