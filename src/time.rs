//! Time abstraction for platform-agnostic clock sources.

/// Microseconds on a clock timeline. 1s = 1_000_000us.
pub type TimeMicros = i64;

/// Milliseconds on a clock timeline. 1s = 1000ms.
pub type TimeMillis = i64;

/// Trait for abstracting the hardware microsecond counter.
///
/// Implement this for your platform's free-running timer (ESP32
/// `esp_timer_get_time`, a 64-bit hardware counter read, or a mock for
/// testing). The returned value must be monotonically non-decreasing;
/// the epoch is arbitrary, typically device boot.
pub trait TimeSource {
    /// Returns the current counter value in microseconds.
    fn now_micros(&self) -> TimeMicros;
}
