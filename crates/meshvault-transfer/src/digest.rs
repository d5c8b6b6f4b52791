//! Content digests assigned on completion
//!
//! The value is opaque: a fixed prefix followed by random base-36 characters.
//! Nothing is hashed.

use std::fmt;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Fixed leading part of every minted digest
pub const DIGEST_PREFIX: &str = "a1b2c3d4e5f6";
/// Random characters appended after the prefix
pub const DIGEST_SUFFIX_LEN: usize = 9;

const BASE36: &[u8] = b"0123456789abcdefghijklmnopqrstuvwxyz";

/// Opaque stand-in for a content fingerprint
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct Digest(String);

impl Digest {
    pub fn new(value: impl Into<String>) -> Self {
        Digest(value.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Debug for Digest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Digest({})", self.0)
    }
}

impl fmt::Display for Digest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Mints digests from its own RNG
#[derive(Debug, Clone)]
pub struct DigestMint {
    rng: StdRng,
}

impl DigestMint {
    pub fn new() -> Self {
        Self {
            rng: StdRng::from_entropy(),
        }
    }

    /// Reproducible digests for tests and replays
    pub fn with_seed(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }

    pub fn mint(&mut self) -> Digest {
        let mut value = String::with_capacity(DIGEST_PREFIX.len() + DIGEST_SUFFIX_LEN);
        value.push_str(DIGEST_PREFIX);
        for _ in 0..DIGEST_SUFFIX_LEN {
            let c = BASE36[self.rng.gen_range(0..BASE36.len())];
            value.push(c as char);
        }
        Digest(value)
    }
}

impl Default for DigestMint {
    fn default() -> Self {
        Self::new()
    }
}
