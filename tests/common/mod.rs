//! Shared test infrastructure for virtual-clock integration tests

#![allow(dead_code)] // Items used across multiple test files; Rust analyzes per-file

use core::cell::{Cell, RefCell};

use virtual_clock::{TimeMicros, TimeMillis, TimeSource};

// ============================================================================
// Mock Time Source
// ============================================================================

/// Mock hardware counter with controllable time advancement
pub struct MockTimeSource {
    now: Cell<TimeMicros>,
}

impl MockTimeSource {
    pub fn new() -> Self {
        Self { now: Cell::new(0) }
    }

    /// Advance the counter by the given number of microseconds
    pub fn advance_micros(&self, delta: TimeMicros) {
        self.now.set(self.now.get() + delta);
    }

    /// Advance the counter by the given number of milliseconds
    pub fn advance_millis(&self, delta: TimeMillis) {
        self.advance_micros(delta * 1000);
    }

    pub fn set_micros(&self, value: TimeMicros) {
        self.now.set(value);
    }
}

impl TimeSource for MockTimeSource {
    fn now_micros(&self) -> TimeMicros {
        self.now.get()
    }
}

// ============================================================================
// Jump Log
// ============================================================================

/// Records every delta delivered to a time-jump hook
pub struct JumpLog {
    deltas: RefCell<heapless::Vec<TimeMicros, 32>>,
}

impl JumpLog {
    pub fn new() -> Self {
        Self {
            deltas: RefCell::new(heapless::Vec::new()),
        }
    }

    pub fn record(&self, delta: TimeMicros) {
        let _ = self.deltas.borrow_mut().push(delta);
    }

    pub fn count(&self) -> usize {
        self.deltas.borrow().len()
    }

    pub fn last(&self) -> Option<TimeMicros> {
        self.deltas.borrow().last().copied()
    }

    pub fn deltas(&self) -> heapless::Vec<TimeMicros, 32> {
        self.deltas.borrow().clone()
    }
}
