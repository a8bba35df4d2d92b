//! Lock-free building blocks shared by every metric kind.
//!
//! - [`AtomicF64`]: atomic load/store/add over a 64-bit float, via its bit
//!   pattern in an `AtomicU64`.
//! - [`WindowSketch`]: fixed-capacity sliding window with on-the-fly rank
//!   selection for client-side quantile estimates.
//!
//! Nothing in this module blocks, allocates on the update path, or returns
//! an error; contention is resolved by short CAS retry loops.

pub mod atomic_f64;
pub mod sketch;

pub use atomic_f64::AtomicF64;
pub use sketch::WindowSketch;

use std::time::{SystemTime, UNIX_EPOCH};

/// Milliseconds since the Unix epoch. Clamps to 0 on a pre-epoch clock.
pub fn timestamp_ms() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis() as u64)
        .unwrap_or(0)
}
