//! Host-side demo driving a virtual clock from `std::time::Instant`.
//!
//! On hardware the `TimeSource` implementation would read the platform's
//! free-running microsecond counter instead.

use std::thread::sleep;
use std::time::{Duration, Instant};

use virtual_clock::{TimeMicros, TimeSource, VirtualClock};

struct HostTimer {
    boot: Instant,
}

impl HostTimer {
    fn new() -> Self {
        Self {
            boot: Instant::now(),
        }
    }
}

impl TimeSource for HostTimer {
    fn now_micros(&self) -> TimeMicros {
        self.boot.elapsed().as_micros() as TimeMicros
    }
}

fn main() {
    let timer = HostTimer::new();
    let clock = VirtualClock::new(&timer);

    let hook = |delta: TimeMicros| {
        println!("  time jumped by {} us", delta);
    };
    clock.on_time_jump(Some(&hook));

    println!("clock starts at {} ms", clock.now_millis());

    clock.adjust_millis(5_000);
    println!("fast-forwarded to {} ms", clock.now_millis());

    clock.pause();
    sleep(Duration::from_millis(50));
    println!("paused, still reads {} ms", clock.now_millis());

    clock.adjust_millis(1_000);
    clock.unpause();
    sleep(Duration::from_millis(20));
    println!("resumed, now reads {} ms", clock.now_millis());

    // a second clock deriving its timeline from the first
    let game_time = VirtualClock::new(&timer);
    game_time.attach(&clock);
    println!("attached clock reads {} ms", game_time.now_millis());
}
