//! Nullable clock — time advances only when told to.

use guild_types::Timestamp;
use std::cell::Cell;

/// A deterministic clock for driving the engine's explicit `now` parameters.
pub struct NullClock {
    current: Cell<u64>,
}

impl NullClock {
    pub fn new(initial_secs: u64) -> Self {
        Self {
            current: Cell::new(initial_secs),
        }
    }

    /// The current time.
    pub fn now(&self) -> Timestamp {
        Timestamp::new(self.current.get())
    }

    /// Move time forward by `secs`.
    pub fn advance(&self, secs: u64) {
        self.current.set(self.current.get() + secs);
    }

    /// Jump to an absolute time.
    pub fn set(&self, secs: u64) {
        self.current.set(secs);
    }
}
