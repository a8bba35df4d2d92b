//! Atomic 64-bit float cell.
//!
//! There is no native atomic `f64`; the value is viewed through its bit
//! pattern in an [`AtomicU64`]. `fetch_add` is the classic compare-exchange
//! retry loop: load the current bits, add on the decoded value, try to swap
//! exactly the bits that were observed, and retry if another writer raced
//! in. No backoff — metric contention is short-lived.

use std::sync::atomic::{AtomicU64, Ordering};

/// A 64-bit float updated with atomic operations.
///
/// Loads and stores of a single cell are coherent: a load observes the most
/// recently committed value for that cell or a later one, never an earlier
/// one. No ordering is implied across different cells.
#[derive(Debug)]
pub struct AtomicF64(AtomicU64);

impl AtomicF64 {
    pub fn new(value: f64) -> Self {
        Self(AtomicU64::new(value.to_bits()))
    }

    /// Consistent snapshot; never observes a half-written value.
    pub fn load(&self) -> f64 {
        f64::from_bits(self.0.load(Ordering::Relaxed))
    }

    /// Atomically replace the value.
    pub fn store(&self, value: f64) {
        self.0.store(value.to_bits(), Ordering::Relaxed);
    }

    /// Atomically add `delta`, returning the previous value.
    ///
    /// Retries unconditionally on CAS failure; always eventually succeeds.
    pub fn fetch_add(&self, delta: f64) -> f64 {
        loop {
            let old_bits = self.0.load(Ordering::Relaxed);
            let new = f64::from_bits(old_bits) + delta;
            if self
                .0
                .compare_exchange_weak(
                    old_bits,
                    new.to_bits(),
                    Ordering::Relaxed,
                    Ordering::Relaxed,
                )
                .is_ok()
            {
                return f64::from_bits(old_bits);
            }
        }
    }
}

impl Default for AtomicF64 {
    fn default() -> Self {
        Self::new(0.0)
    }
}
