//! Freeze overlay for virtual clocks.

use core::cell::Cell;

use crate::clock::VirtualClock;
use crate::time::{TimeMicros, TimeMillis, TimeSource};

/// A [`VirtualClock`] whose reading can additionally be frozen.
///
/// While frozen, reads return the snapshot taken at the freeze, no matter
/// what happens to the underlying clock. Freezing is independent of
/// pausing: the underlying clock keeps its own running/paused state and
/// stays fully readable and adjustable underneath, reached through
/// [`clock`](Self::clock).
pub struct FreezableClock<'a, T: TimeSource> {
    clock: VirtualClock<'a, T>,
    frozen: Cell<Option<TimeMicros>>,
}

impl<'a, T: TimeSource> FreezableClock<'a, T> {
    /// Creates an unfrozen clock reading zero, running against `hardware`.
    pub fn new(hardware: &'a T) -> Self {
        Self {
            clock: VirtualClock::new(hardware),
            frozen: Cell::new(None),
        }
    }

    /// Snapshots the underlying reading and holds it.
    ///
    /// Calling freeze while already frozen re-snapshots from the live
    /// underlying reading.
    pub fn freeze(&self) {
        self.frozen.set(Some(self.clock.now_micros()));
    }

    /// Releases the snapshot; reads resume tracking the underlying clock.
    pub fn unfreeze(&self) {
        self.frozen.set(None);
    }

    /// Returns true if the clock is frozen.
    pub fn is_frozen(&self) -> bool {
        self.frozen.get().is_some()
    }

    /// Returns the frozen snapshot, or the underlying reading in
    /// microseconds when unfrozen.
    pub fn now_micros(&self) -> TimeMicros {
        match self.frozen.get() {
            Some(snapshot) => snapshot,
            None => self.clock.now_micros(),
        }
    }

    /// Returns the frozen snapshot, or the underlying reading, in
    /// milliseconds (truncating).
    pub fn now_millis(&self) -> TimeMillis {
        self.now_micros() / 1000
    }

    /// The underlying clock.
    ///
    /// Mutations applied here take effect immediately but stay invisible
    /// through the frozen reads until [`unfreeze`](Self::unfreeze). Note
    /// that attaching this clock as a source elsewhere goes through this
    /// accessor, so the freeze overlay is never visible to chained clocks.
    pub fn clock(&self) -> &VirtualClock<'a, T> {
        &self.clock
    }
}
