//! Virtual clock with offset algebra, pause control and chaining.
//!
//! Provides [`VirtualClock`] which reports elapsed time derived from a
//! [`TimeSource`], while letting the caller rebase, shift and pause the
//! reported timeline or derive it from another virtual clock.

use core::cell::Cell;

use crate::time::{TimeMicros, TimeMillis, TimeSource};

/// Hook invoked when a clock's reported time changes discontinuously.
///
/// Receives the jump in microseconds, `new reading - old reading`.
pub type TimeJumpHook<'a> = &'a dyn Fn(TimeMicros);

/// The current state of a clock's timeline.
///
/// A clock holds a single signed microsecond value whose meaning depends on
/// whether the clock is running or paused. The two interpretations are kept
/// as separate variants so the representation is explicit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ClockState {
    /// Clock is advancing. The reading is `source time - origin`.
    Running {
        /// Timestamp on the source timeline at which this clock reads zero.
        origin: TimeMicros,
    },
    /// Clock is paused and holds its reading.
    Paused {
        /// The reading held while paused.
        elapsed: TimeMicros,
    },
}

/// A virtual monotonic clock derived from a [`TimeSource`].
///
/// The clock reports elapsed microseconds (or milliseconds) on its own
/// timeline. Callers drive all adjustments explicitly: the timeline can be
/// rebased ([`set_now_micros`](Self::set_now_micros)), shifted
/// ([`adjust_micros`](Self::adjust_micros)), paused and resumed, or chained
/// to another clock ([`attach`](Self::attach)) so that its time derives from
/// that clock's timeline instead of the hardware counter.
///
/// All state lives in [`Cell`]s and every operation takes `&self`, so a
/// clock can keep being adjusted while other clocks hold a reference to it
/// as their source. This also makes the type `!Sync`: the design is
/// single-threaded, and sharing a clock with an interrupt handler requires
/// external synchronization.
///
/// All microsecond arithmetic saturates at the `i64` range, so extreme
/// adjustments clamp instead of wrapping.
///
/// # Type Parameters
/// * `'a` - Lifetime of the time source, attached clocks and hook
/// * `T` - Hardware time source implementation type
pub struct VirtualClock<'a, T: TimeSource> {
    hardware: &'a T,
    source: Cell<Option<&'a VirtualClock<'a, T>>>,
    timeline: Cell<ClockState>,
    jump_hook: Cell<Option<TimeJumpHook<'a>>>,
}

impl<'a, T: TimeSource> VirtualClock<'a, T> {
    /// Creates a running clock reading zero.
    pub fn new(hardware: &'a T) -> Self {
        Self::with_elapsed_micros(hardware, 0)
    }

    /// Creates a running clock whose reading starts at `elapsed` milliseconds.
    pub fn with_elapsed_millis(hardware: &'a T, elapsed: TimeMillis) -> Self {
        Self::with_elapsed_micros(hardware, elapsed.saturating_mul(1000))
    }

    /// Creates a running clock whose reading starts at `elapsed` microseconds.
    pub fn with_elapsed_micros(hardware: &'a T, elapsed: TimeMicros) -> Self {
        Self {
            hardware,
            source: Cell::new(None),
            timeline: Cell::new(ClockState::Running {
                origin: hardware.now_micros().saturating_sub(elapsed),
            }),
            jump_hook: Cell::new(None),
        }
    }

    /// Returns the clock's reading in microseconds.
    ///
    /// Pure read with no side effects; the time source is consulted only
    /// while running.
    pub fn now_micros(&self) -> TimeMicros {
        match self.timeline.get() {
            ClockState::Running { origin } => self.source_micros().saturating_sub(origin),
            ClockState::Paused { elapsed } => elapsed,
        }
    }

    /// Returns the clock's reading in milliseconds (truncating).
    pub fn now_millis(&self) -> TimeMillis {
        self.now_micros() / 1000
    }

    /// Rebases the timeline so the clock reads `value` milliseconds.
    ///
    /// See [`set_now_micros`](Self::set_now_micros).
    pub fn set_now_millis(&self, value: TimeMillis) {
        self.set_now_micros(value.saturating_mul(1000));
    }

    /// Rebases the timeline so the clock reads `value` microseconds.
    ///
    /// Works in both running and paused states. Fires the time-jump hook
    /// with `value - previous reading`.
    pub fn set_now_micros(&self, value: TimeMicros) {
        // Single source read so the fired delta and the new origin agree.
        let delta = match self.timeline.get() {
            ClockState::Running { origin } => {
                let source = self.source_micros();
                self.timeline.set(ClockState::Running {
                    origin: source.saturating_sub(value),
                });
                value.saturating_sub(source.saturating_sub(origin))
            }
            ClockState::Paused { elapsed } => {
                self.timeline.set(ClockState::Paused { elapsed: value });
                value.saturating_sub(elapsed)
            }
        };

        self.notify_jump(delta);
    }

    /// Shifts the reading by `delta` milliseconds.
    ///
    /// See [`adjust_micros`](Self::adjust_micros).
    pub fn adjust_millis(&self, delta: TimeMillis) {
        self.adjust_micros(delta.saturating_mul(1000));
    }

    /// Shifts the reading by `delta` microseconds.
    ///
    /// The reading changes by exactly `delta` whether the clock is running
    /// or paused; negative deltas rewind. Fires the time-jump hook with
    /// `delta`.
    pub fn adjust_micros(&self, delta: TimeMicros) {
        match self.timeline.get() {
            ClockState::Running { origin } => self.timeline.set(ClockState::Running {
                origin: origin.saturating_sub(delta),
            }),
            ClockState::Paused { elapsed } => self.timeline.set(ClockState::Paused {
                elapsed: elapsed.saturating_add(delta),
            }),
        }

        self.notify_jump(delta);
    }

    /// Holds the current reading. No-op if already paused.
    ///
    /// The reading is unchanged by the transition and the time-jump hook
    /// does not fire. Source time that passes while paused is never
    /// reflected in the reading.
    pub fn pause(&self) {
        if let ClockState::Running { origin } = self.timeline.get() {
            self.timeline.set(ClockState::Paused {
                elapsed: self.source_micros().saturating_sub(origin),
            });
        }
    }

    /// Resumes advancing from the held reading. No-op if already running.
    ///
    /// Together with [`pause`](Self::pause) this preserves the reading
    /// exactly across the pause boundary.
    pub fn unpause(&self) {
        if let ClockState::Paused { elapsed } = self.timeline.get() {
            self.timeline.set(ClockState::Running {
                origin: self.source_micros().saturating_sub(elapsed),
            });
        }
    }

    /// Returns true if the clock is paused.
    pub fn is_paused(&self) -> bool {
        matches!(self.timeline.get(), ClockState::Paused { .. })
    }

    /// Returns the clock's current timeline state.
    pub fn state(&self) -> ClockState {
        self.timeline.get()
    }

    /// Derives this clock's timeline from `source` instead of the hardware
    /// counter.
    ///
    /// All subsequent reads while running resolve through `source`, which
    /// may itself be paused, adjusted or attached elsewhere; chains resolve
    /// recursively. The held state is not rebased, so the reading jumps by
    /// whatever the two timelines disagree by, and no hook fires.
    ///
    /// The reference is non-owning. Attaching a clock to itself, directly
    /// or through a chain, is a caller error: reads through such a cycle
    /// recurse without bound.
    pub fn attach(&self, source: &'a VirtualClock<'a, T>) {
        self.source.set(Some(source));
    }

    /// Reverts to the hardware counter as the time source.
    ///
    /// Discontinuous if the attached clock's timeline and the hardware
    /// timeline disagree; no hook fires.
    pub fn detach(&self) {
        self.source.set(None);
    }

    /// One-shot copy of `other`'s current reading into this clock.
    ///
    /// Unlike [`attach`](Self::attach) no live link is created; the two
    /// clocks diverge again as time passes or either is adjusted. The pause
    /// state of `other` is not copied. Fires the time-jump hook like any
    /// `set_now` call.
    pub fn sync(&self, other: &VirtualClock<'a, T>) {
        self.set_now_micros(other.now_micros());
    }

    /// Registers `hook` to be called on every discontinuous change of the
    /// reading (`set_now_*`, `adjust_*`, `sync`).
    ///
    /// The hook receives the jump in microseconds and runs synchronously
    /// inside the mutating call, after the state change; it is a
    /// notification only and cannot affect the mutation. A single slot
    /// exists: registering again replaces the previous hook, and `None`
    /// clears it. Pause, unpause, attach, detach and plain reads never
    /// fire the hook.
    pub fn on_time_jump(&self, hook: Option<TimeJumpHook<'a>>) {
        self.jump_hook.set(hook);
    }

    fn notify_jump(&self, delta: TimeMicros) {
        if let Some(hook) = self.jump_hook.get() {
            hook(delta);
        }
    }

    fn source_micros(&self) -> TimeMicros {
        match self.source.get() {
            Some(clock) => clock.now_micros(),
            None => self.hardware.now_micros(),
        }
    }
}
