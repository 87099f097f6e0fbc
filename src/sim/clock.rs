use std::time::Duration;

use crate::error::{Error, Result};
use super::runner::Simulation;

/// Upper bound on ticks released by a single `elapse` call.
pub const DEFAULT_MAX_CATCH_UP: u32 = 8;

// ---------------------------------------------------------------------------
// Fixed-period tick accumulator
// ---------------------------------------------------------------------------

/// Converts wall-clock time reported by a frame loop into a whole number of
/// fixed-period ticks.
///
/// Frames may arrive faster or slower than the period; leftover time carries
/// into the next call. After a long stall only `max_catch_up` ticks are
/// released and the backlog is discarded.
#[derive(Debug, Clone)]
pub struct TickClock {
    period: Duration,
    max_catch_up: u32,
    accum: Duration,
}

impl TickClock {
    pub fn new(period: Duration) -> Result<Self> {
        if period.is_zero() {
            return Err(Error::ZeroTickPeriod);
        }
        Ok(Self {
            period,
            max_catch_up: DEFAULT_MAX_CATCH_UP,
            accum: Duration::ZERO,
        })
    }

    pub fn with_max_catch_up(mut self, max: u32) -> Self {
        self.max_catch_up = max.max(1);
        self
    }

    /// Add `elapsed` and return how many ticks are now due.
    pub fn elapse(&mut self, elapsed: Duration) -> u32 {
        self.accum += elapsed;
        let mut due = 0;
        while self.accum >= self.period && due < self.max_catch_up {
            self.accum -= self.period;
            due += 1;
        }
        if self.accum >= self.period {
            // Drop the backlog, keep the phase.
            self.accum = Duration::from_nanos((self.accum.as_nanos() % self.period.as_nanos()) as u64);
        }
        due
    }

    /// Time left before the next tick is due.
    pub fn until_next(&self) -> Duration {
        self.period.saturating_sub(self.accum)
    }

    pub fn reset(&mut self) {
        self.accum = Duration::ZERO;
    }

    /// Feed `elapsed` to the clock and tick `sim` once per due period.
    /// Returns the number of steps taken. A stopped simulation holds the
    /// clock at zero so a later start does not release a burst.
    pub fn drive(&mut self, sim: &mut Simulation, elapsed: Duration) -> u32 {
        if !sim.is_running() {
            self.reset();
            return 0;
        }
        let due = self.elapse(elapsed);
        for _ in 0..due {
            sim.tick();
        }
        due
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ms(n: u64) -> Duration {
        Duration::from_millis(n)
    }

    #[test]
    fn zero_period_rejected() {
        assert_eq!(TickClock::new(Duration::ZERO).unwrap_err(), Error::ZeroTickPeriod);
    }

    #[test]
    fn carries_remainder_between_frames() {
        let mut clock = TickClock::new(ms(50)).unwrap();
        assert_eq!(clock.elapse(ms(16)), 0);
        assert_eq!(clock.elapse(ms(16)), 0);
        assert_eq!(clock.elapse(ms(16)), 0);
        assert_eq!(clock.elapse(ms(16)), 1); // 64 ms
        assert_eq!(clock.until_next(), ms(36));
    }

    #[test]
    fn long_stall_is_capped() {
        let mut clock = TickClock::new(ms(50)).unwrap().with_max_catch_up(4);
        assert_eq!(clock.elapse(Duration::from_secs(10) + ms(20)), 4);
        assert_eq!(clock.until_next(), ms(30));
    }

    #[test]
    fn drive_steps_once_per_period() {
        let mut sim = Simulation::default();
        let mut clock = TickClock::new(ms(50)).unwrap();
        sim.start();
        let mut total = 0;
        for _ in 0..60 {
            total += clock.drive(&mut sim, ms(25));
        }
        assert_eq!(total, 30);
        assert_eq!(sim.snapshot().len(), 30);
    }

    #[test]
    fn drive_idles_while_stopped() {
        let mut sim = Simulation::default();
        let mut clock = TickClock::new(ms(50)).unwrap();
        assert_eq!(clock.drive(&mut sim, Duration::from_secs(5)), 0);
        assert_eq!(sim.steps(), 0);

        // Starting twice still yields one step per period.
        sim.start();
        sim.start();
        for _ in 0..10 {
            clock.drive(&mut sim, ms(50));
        }
        assert_eq!(sim.steps(), 10);
    }
}
