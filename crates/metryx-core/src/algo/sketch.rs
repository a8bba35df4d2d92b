//! Fixed-capacity quantile window sketch.
//!
//! A circular buffer of the most recent [`CAPACITY`] observations plus a
//! monotonically increasing write cursor. An insert claims its slot with a
//! single `fetch_add` and stores the value atomically; once the cursor
//! passes the capacity, inserts wrap and overwrite the oldest slots, so the
//! sketch is a sliding window, not a full-history structure.
//!
//! Queries copy the filled window into a private buffer with atomic
//! per-slot loads and run quickselect on the copy ("snapshot-then-select").
//! A query therefore never writes to storage that concurrent inserts are
//! racing on; the only remaining imprecision is which in-flight values the
//! snapshot happens to catch, which is acceptable for an estimator.

use std::sync::atomic::{AtomicU64, Ordering};

use super::atomic_f64::AtomicF64;

/// Number of slots in the window. Power of two.
pub const CAPACITY: usize = 1024;

/// Lock-free sliding-window quantile estimator.
#[derive(Debug)]
pub struct WindowSketch {
    slots: Vec<AtomicF64>,
    cursor: AtomicU64,
}

impl WindowSketch {
    pub fn new() -> Self {
        let mut slots = Vec::with_capacity(CAPACITY);
        slots.resize_with(CAPACITY, AtomicF64::default);
        Self {
            slots,
            cursor: AtomicU64::new(0),
        }
    }

    /// Record one observation, overwriting the oldest once the window wraps.
    pub fn insert(&self, value: f64) {
        let idx = self.cursor.fetch_add(1, Ordering::Relaxed) as usize % CAPACITY;
        self.slots[idx].store(value);
    }

    /// Observations currently inside the window (capped at [`CAPACITY`]).
    pub fn len(&self) -> usize {
        (self.cursor.load(Ordering::Relaxed) as usize).min(CAPACITY)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Estimate the `q`-quantile over the current window.
    ///
    /// Returns `None` before the first completed insert. The desired rank is
    /// `ceil(q * n) - 1`, clamped to `[0, n - 1]`.
    pub fn query(&self, q: f64) -> Option<f64> {
        let n = self.len();
        if n == 0 {
            return None;
        }
        // Selection partitions in place, so it runs on a snapshot rather
        // than the live slots (see module docs).
        let mut snapshot: Vec<f64> = self.slots[..n].iter().map(AtomicF64::load).collect();
        let rank = ((q * n as f64).ceil() as isize - 1).clamp(0, n as isize - 1) as usize;
        Some(quick_select(&mut snapshot, rank))
    }
}

impl Default for WindowSketch {
    fn default() -> Self {
        Self::new()
    }
}

/// Select the `k`-th smallest element in place. O(n) expected, O(n²) worst
/// case on adversarial orderings.
fn quick_select(arr: &mut [f64], k: usize) -> f64 {
    let mut left = 0usize;
    let mut right = arr.len() - 1;
    while left < right {
        let pivot = partition(arr, left, right);
        match pivot.cmp(&k) {
            std::cmp::Ordering::Equal => break,
            std::cmp::Ordering::Less => left = pivot + 1,
            std::cmp::Ordering::Greater => right = pivot - 1,
        }
    }
    arr[k]
}

/// Lomuto partition around `arr[right]`; returns the pivot's final index.
fn partition(arr: &mut [f64], left: usize, right: usize) -> usize {
    let pivot = arr[right];
    let mut i = left;
    for j in left..right {
        if arr[j] < pivot {
            arr.swap(i, j);
            i += 1;
        }
    }
    arr.swap(i, right);
    i
}
