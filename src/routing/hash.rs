//! Key hashing and hash-space partitioning.

use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha512};
use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};

/// Size of the 64-bit hash space, `2^64`.
pub const HASH_SPACE: u128 = 1 << 64;

/// Hash used by the shard router.
///
/// Deterministic for the lifetime of the process, which is all a router needs
/// since nothing is persisted.
pub fn shard_hash(key: &str) -> u64 {
    let mut hasher = DefaultHasher::new();
    key.hash(&mut hasher);
    hasher.finish()
}

/// Hash used by the range router: the first 64 bits of the SHA-512 digest of
/// the UTF-8 key, read big-endian (the first 16 hex digits of the digest).
pub fn range_hash(key: &str) -> u64 {
    let digest = Sha512::digest(key.as_bytes());
    let mut prefix = [0u8; 8];
    prefix.copy_from_slice(&digest[..8]);
    u64::from_be_bytes(prefix)
}

/// A half-open interval `[start, end)` of the hash space.
///
/// Bounds are `u128` so the last range can end at `2^64`.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct HashRange {
    pub start: u128,
    pub end: u128,
}

impl HashRange {
    pub fn new(start: u128, end: u128) -> Self {
        Self { start, end }
    }

    pub fn contains(&self, hash: u64) -> bool {
        let hash = hash as u128;
        hash >= self.start && hash < self.end
    }

    pub fn len(&self) -> u128 {
        self.end.saturating_sub(self.start)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Splits `[0, 2^64)` into `n` contiguous ranges,
    /// range `i` being `[floor(2^64*i/n), floor(2^64*(i+1)/n))`.
    pub fn partition(n: usize) -> Vec<HashRange> {
        let n = n as u128;
        (0..n)
            .map(|i| HashRange::new(HASH_SPACE * i / n, HASH_SPACE * (i + 1) / n))
            .collect()
    }
}
