//! Canonical Hashing and Exact-Match Index
//!
//! A question's canonical hash is the SHA-256 hex digest of its trimmed,
//! lowercased text. Same text mod case/whitespace → same digest, which makes
//! the exact stage a plain map lookup.

use sha2::{Digest, Sha256};
use std::collections::HashMap;

/// Normalize text for hashing: trim surrounding whitespace, lowercase
pub fn canonicalize(text: &str) -> String {
    text.trim().to_lowercase()
}

/// SHA-256 hex digest of the canonicalized text
pub fn canonical_hash(text: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(canonicalize(text).as_bytes());
    hex::encode(hasher.finalize())
}

// ============================================================================
// EXACT-MATCH INDEX
// ============================================================================

/// Rejected insert: the hash is already registered.
///
/// Carries the first registrant's id so the caller can report what the new
/// text collided with. The index is never overwritten; first writer wins.
#[derive(Debug, Clone)]
pub struct HashCollision {
    /// The colliding canonical hash
    pub hash: String,
    /// Id of the first registrant
    pub existing_id: String,
}

impl std::fmt::Display for HashCollision {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "hash {} already registered under id {}",
            self.hash, self.existing_id
        )
    }
}

impl std::error::Error for HashCollision {}

/// O(1) canonical-hash → id lookup table
#[derive(Debug, Default)]
pub struct ExactMatchIndex {
    by_hash: HashMap<String, String>,
}

impl ExactMatchIndex {
    /// Create an empty index
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of registered hashes
    pub fn len(&self) -> usize {
        self.by_hash.len()
    }

    /// Whether the index is empty
    pub fn is_empty(&self) -> bool {
        self.by_hash.is_empty()
    }

    /// Id registered for `hash`, if any
    pub fn lookup(&self, hash: &str) -> Option<&str> {
        self.by_hash.get(hash).map(String::as_str)
    }

    /// Whether `hash` is registered
    pub fn contains(&self, hash: &str) -> bool {
        self.by_hash.contains_key(hash)
    }

    /// Register `hash → id`; a duplicate hash is rejected with the first
    /// registrant's id
    pub fn insert(&mut self, hash: String, id: String) -> Result<(), HashCollision> {
        if let Some(existing) = self.by_hash.get(&hash) {
            return Err(HashCollision {
                hash,
                existing_id: existing.clone(),
            });
        }
        self.by_hash.insert(hash, id);
        Ok(())
    }

    /// Unregister a hash. Rollback path for a failed registration; records
    /// are otherwise append-only.
    pub(crate) fn remove(&mut self, hash: &str) {
        self.by_hash.remove(hash);
    }
}

// ============================================================================
// TESTS
// ============================================================================
