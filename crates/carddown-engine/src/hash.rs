//! Content-derived identifiers.

use std::collections::HashMap;

use sha2::{Digest, Sha256};

/// Length of the hex prefix used for generated ids.
pub const HASH_LEN: usize = 8;

/// First [`HASH_LEN`] hex chars of the SHA-256 of `data`.
pub fn short_hash(data: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(data.as_bytes());
    let mut hex = format!("{:x}", hasher.finalize());
    hex.truncate(HASH_LEN);
    hex
}

/// Keeps alphanumerics only, lowercased.
pub fn clean(text: &str) -> String {
    text.chars()
        .filter(|c| c.is_alphanumeric())
        .flat_map(char::to_lowercase)
        .collect()
}

/// Anchor id for a heading key (its explicit `{#key}` or its text).
///
/// Links written as `[x](#Some Key)` resolve through the same function, so
/// both sides agree without knowing about each other.
pub fn anchor_id(key: &str) -> String {
    format!("h-{}", short_hash(&clean(key)))
}

/// Hands out hash-based ids, suffixing repeats with a per-hash counter.
///
/// One registry lives per document; nothing leaks between conversions.
#[derive(Debug, Default)]
pub struct IdRegistry {
    seen: HashMap<String, usize>,
}

impl IdRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns `short_hash(data)`, or `short_hash(data)` + `n` for the n-th repeat.
    pub fn unique_hash(&mut self, data: &str) -> String {
        self.disambiguate(short_hash(data))
    }

    /// Suffixes `base` with a counter if it was handed out before.
    pub fn disambiguate(&mut self, base: String) -> String {
        match self.seen.get_mut(&base) {
            Some(count) => {
                *count += 1;
                format!("{base}{count}")
            }
            None => {
                self.seen.insert(base.clone(), 0);
                base
            }
        }
    }

    pub fn reset(&mut self) {
        self.seen.clear();
    }
}
