use core::cell::Cell;

use crate::generator::SequenceGenerator;

/// A non-concurrent sequence generator suitable for single-threaded
/// environments.
///
/// This generator is lightweight, but **not thread-safe**: it is `!Sync`, so
/// the compiler rejects any attempt to share it.
///
/// ## Features
/// - ❌ Not thread-safe
/// - ✅ Same issue order as [`AtomicSequenceGenerator`]
///
/// ## Recommended When
/// - A single caller owns the generator
///
/// [`AtomicSequenceGenerator`]: crate::generator::AtomicSequenceGenerator
#[derive(Debug, Default)]
pub struct BasicSequenceGenerator {
    state: Cell<u64>,
}

impl BasicSequenceGenerator {
    /// Creates a generator whose first issued value is `0`.
    pub const fn new() -> Self {
        Self::starting_at(0)
    }

    /// Creates a generator whose first issued value is `start`.
    pub const fn starting_at(start: u64) -> Self {
        Self {
            state: Cell::new(start),
        }
    }

    /// Issues the next value.
    pub fn next(&self) -> u64 {
        let current = self.state.get();
        self.state.set(current.wrapping_add(1));
        current
    }
}

impl SequenceGenerator for BasicSequenceGenerator {
    fn next(&self) -> u64 {
        self.next()
    }
}
