use std::time::{Duration, Instant};

/// Fixed-rate tick pacer on a monotonic clock.
///
/// A tick fires once at least `1 / ticks_per_second` seconds have elapsed
/// since the previous tick's scheduled start. A slow tick makes the schedule
/// drift forward rather than firing compensating extra ticks, so a stall
/// never accumulates a backlog.
#[derive(Debug)]
pub struct TickClock {
    period: Duration,
    next: Instant,
    ticks: u64,
}

impl TickClock {
    /// Creates a clock firing `ticks_per_second` times per second.
    /// Callers guarantee a positive rate; non-positive rates never reach a
    /// clock (they select single-pass mode instead).
    pub fn new(ticks_per_second: f64) -> Self {
        debug_assert!(ticks_per_second > 0.0);
        let period = Duration::from_secs_f64(1.0 / ticks_per_second);
        Self {
            period,
            next: Instant::now() + period,
            ticks: 0,
        }
    }

    /// Ticks fired so far.
    pub fn ticks(&self) -> u64 {
        self.ticks
    }

    /// Blocks until the next tick boundary, then advances the schedule.
    ///
    /// Returns the 1-based tick index. When the caller overran the boundary,
    /// the next deadline is taken from "now" instead of the stale schedule —
    /// that is the drift-not-backlog rule.
    pub fn wait_next_tick(&mut self) -> u64 {
        let now = Instant::now();
        if let Some(remaining) = self.next.checked_duration_since(now) {
            std::thread::sleep(remaining);
        }

        let now = Instant::now();
        self.next = if now > self.next {
            now + self.period
        } else {
            self.next + self.period
        };

        self.ticks += 1;
        self.ticks
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ticks_respect_the_configured_rate() {
        let mut clock = TickClock::new(100.0); // 10ms period
        let t0 = Instant::now();
        for _ in 0..3 {
            clock.wait_next_tick();
        }
        // Three boundaries at 10/20/30ms; sleep guarantees "at least".
        assert!(t0.elapsed() >= Duration::from_millis(30));
        assert_eq!(clock.ticks(), 3);
    }

    #[test]
    fn an_overrun_drifts_instead_of_bursting() {
        let mut clock = TickClock::new(50.0); // 20ms period
        clock.wait_next_tick();

        // Simulate a slow tick spanning several periods.
        std::thread::sleep(Duration::from_millis(70));

        // The late tick fires immediately...
        let late = Instant::now();
        clock.wait_next_tick();
        assert!(late.elapsed() < Duration::from_millis(10));

        // ...and the one after it waits close to a full period again,
        // rather than firing a catch-up burst.
        let after = Instant::now();
        clock.wait_next_tick();
        assert!(after.elapsed() >= Duration::from_millis(15));
    }
}
