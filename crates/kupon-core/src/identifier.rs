//! # Identifier Generator
//!
//! Short coupon identifiers: nine characters from `0-9A-Z`.
//!
//! ## Uniqueness
//! Nothing is enforced across calls. With 36^9 (about 10^14) possible values
//! a collision inside one session is statistically negligible, which is all
//! the display layer relies on. Anyone who needs more swaps the generator
//! behind [`IdGenerator`]; [`SequentialIdGenerator`] is the structural option.

use std::sync::atomic::{AtomicU64, Ordering};
use uuid::Uuid;

use crate::ID_LENGTH;

const ALPHABET: &[u8; 36] = b"0123456789ABCDEFGHIJKLMNOPQRSTUVWXYZ";

/// Produces coupon identifiers.
pub trait IdGenerator: Send + Sync {
    /// Returns a fresh identifier of [`ID_LENGTH`] uppercase alphanumerics.
    fn next_id(&self) -> String;
}

/// Random identifiers drawn from UUID v4 bits. Not cryptographic.
#[derive(Debug, Clone, Copy, Default)]
pub struct RandomIdGenerator;

impl IdGenerator for RandomIdGenerator {
    fn next_id(&self) -> String {
        encode_base36(Uuid::new_v4().as_u128())
    }
}

/// Monotonic counter identifiers (`000000001`, `000000002`, ...).
#[derive(Debug)]
pub struct SequentialIdGenerator {
    next: AtomicU64,
}

impl Default for SequentialIdGenerator {
    fn default() -> Self {
        Self::starting_at(1)
    }
}

impl SequentialIdGenerator {
    /// Starts counting at `first`.
    pub fn starting_at(first: u64) -> Self {
        SequentialIdGenerator {
            next: AtomicU64::new(first),
        }
    }
}

impl IdGenerator for SequentialIdGenerator {
    fn next_id(&self) -> String {
        encode_base36(u128::from(self.next.fetch_add(1, Ordering::Relaxed)))
    }
}

/// Encodes the low base-36 digits of `value`, most significant first.
fn encode_base36(mut value: u128) -> String {
    let mut digits = [b'0'; ID_LENGTH];
    for slot in digits.iter_mut().rev() {
        *slot = ALPHABET[(value % 36) as usize];
        value /= 36;
    }
    digits.iter().map(|&b| b as char).collect()
}

/// Checks the identifier shape: exact length, `0-9A-Z` only.
pub fn is_valid_id(id: &str) -> bool {
    id.len() == ID_LENGTH && id.bytes().all(|b| b.is_ascii_digit() || b.is_ascii_uppercase())
}
