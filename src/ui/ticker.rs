//! Once-per-second tick scheduling.

use std::time::{Duration, Instant};

/// Tick period of the overlay.
pub const TICK_PERIOD: Duration = Duration::from_millis(1000);

/// What the UI loop should do about the tick this frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tick {
    /// Render now, then call [`TickScheduler::rearm`].
    Fire,
    /// Not due yet; wake up after this long.
    Wait(Duration),
    /// The running flag is down; nothing more will be scheduled.
    Stopped,
}

/// Re-armed timer state for the tick loop.
///
/// The running flag is checked on every poll, so the loop ends by itself
/// once the flag goes down.
#[derive(Debug, Clone)]
pub struct TickScheduler {
    period: Duration,
    next_due: Option<Instant>,
}

impl TickScheduler {
    pub fn new(period: Duration) -> Self {
        Self {
            period,
            next_due: None,
        }
    }

    pub fn period(&self) -> Duration {
        self.period
    }

    /// A scheduler that has never fired is due immediately.
    pub fn poll(&mut self, now: Instant, running: bool) -> Tick {
        if !running {
            self.next_due = None;
            return Tick::Stopped;
        }
        match self.next_due {
            Some(due) if now < due => Tick::Wait(due - now),
            _ => Tick::Fire,
        }
    }

    /// Schedule the next tick one period after `now`.
    pub fn rearm(&mut self, now: Instant) {
        self.next_due = Some(now + self.period);
    }

    pub fn cancel(&mut self) {
        self.next_due = None;
    }

    pub fn next_due(&self) -> Option<Instant> {
        self.next_due
    }
}

impl Default for TickScheduler {
    fn default() -> Self {
        Self::new(TICK_PERIOD)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fires_immediately_then_waits_a_period() {
        let start = Instant::now();
        let mut ticker = TickScheduler::default();
        assert_eq!(ticker.poll(start, true), Tick::Fire);
        ticker.rearm(start);

        let later = start + Duration::from_millis(400);
        assert_eq!(ticker.poll(later, true), Tick::Wait(Duration::from_millis(600)));
        assert_eq!(ticker.poll(start + TICK_PERIOD, true), Tick::Fire);
    }

    #[test]
    fn stops_once_flag_is_down() {
        let start = Instant::now();
        let mut ticker = TickScheduler::default();
        ticker.rearm(start);
        assert_eq!(ticker.poll(start + TICK_PERIOD * 3, false), Tick::Stopped);
        assert_eq!(ticker.next_due(), None);
    }

    #[test]
    fn cancel_makes_next_poll_fire() {
        let start = Instant::now();
        let mut ticker = TickScheduler::new(Duration::from_secs(5));
        ticker.rearm(start);
        ticker.cancel();
        assert_eq!(ticker.poll(start, true), Tick::Fire);
    }
}
