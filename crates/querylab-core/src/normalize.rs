//! Query text normalization.
//!
//! Lowercases, maps every character outside `[a-z0-9]` to a space, collapses
//! whitespace, and stems each remaining token with the English Snowball stemmer.

use rust_stemmers::{Algorithm, Stemmer};

/// Normalizes raw search queries into stemmed, space-separated tokens.
pub struct QueryNormalizer {
    stemmer: Stemmer,
}

impl QueryNormalizer {
    /// Create a normalizer using the English stemmer.
    pub fn new() -> Self {
        Self {
            stemmer: Stemmer::create(Algorithm::English),
        }
    }

    /// Normalize a single query. The empty string normalizes to itself.
    pub fn normalize(&self, query: &str) -> String {
        let cleaned: String = query
            .to_lowercase()
            .chars()
            .map(|c| {
                if c.is_ascii_lowercase() || c.is_ascii_digit() {
                    c
                } else {
                    ' '
                }
            })
            .collect();

        cleaned
            .split_whitespace()
            .map(|token| self.stemmer.stem(token))
            .collect::<Vec<_>>()
            .join(" ")
    }
}

impl Default for QueryNormalizer {
    fn default() -> Self {
        Self::new()
    }
}
