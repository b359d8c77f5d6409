//! Sources of unique 128-bit values.
//!
//! Identifiers never generate their own randomness. Every fresh ID asks a
//! [`ValueSource`] for either a time-ordered or a purely random value.

use std::sync::{Mutex, PoisonError};

use ulid::{Generator, Ulid};
use uuid::Uuid;

/// Number of low bits below the millisecond timestamp in an ordered value.
const TIMESTAMP_SHIFT: u32 = 80;

/// A generator of unique 128-bit values.
pub trait ValueSource: Send + Sync {
    /// Returns a value that is nondecreasing across calls and carries the
    /// Unix millisecond timestamp in its top 48 bits.
    fn ordered(&self) -> u128;

    /// Returns a cryptographically random value with no ordering guarantee.
    fn random(&self) -> u128;

    /// Dispatches to [`ordered`](Self::ordered) or [`random`](Self::random).
    fn next(&self, ordered: bool) -> u128 {
        if ordered {
            self.ordered()
        } else {
            self.random()
        }
    }
}

/// UUIDv7 for ordered values, UUIDv4 for random values.
#[derive(Debug, Default, Clone, Copy)]
pub struct UuidSource;

impl ValueSource for UuidSource {
    fn ordered(&self) -> u128 {
        Uuid::now_v7().as_u128()
    }

    fn random(&self) -> u128 {
        Uuid::new_v4().as_u128()
    }
}

/// Monotonic ULIDs for ordered values, UUIDv4 for random values.
pub struct UlidSource {
    generator: Mutex<Generator>,
}

impl UlidSource {
    /// Creates a source with a fresh monotonic generator.
    pub fn new() -> Self {
        Self {
            generator: Mutex::new(Generator::new()),
        }
    }
}

impl Default for UlidSource {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for UlidSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("UlidSource").finish_non_exhaustive()
    }
}

impl ValueSource for UlidSource {
    fn ordered(&self) -> u128 {
        let mut generator = self
            .generator
            .lock()
            .unwrap_or_else(PoisonError::into_inner);
        // The random part only overflows after 2^80 IDs in one millisecond.
        generator.generate().unwrap_or_else(|_| Ulid::new()).0
    }

    fn random(&self) -> u128 {
        Uuid::new_v4().as_u128()
    }
}

static DEFAULT_SOURCE: UuidSource = UuidSource;

/// The source used by `Id::new` and `Registry::generate`.
pub fn default_source() -> &'static UuidSource {
    &DEFAULT_SOURCE
}

/// Extracts the Unix millisecond timestamp from an ordered value.
#[must_use]
pub const fn timestamp_ms(value: u128) -> u64 {
    (value >> TIMESTAMP_SHIFT) as u64
}
