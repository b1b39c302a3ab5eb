use std::thread::sleep;
use std::time::{Duration, Instant};

/// Game speed in ticks per second. Only ever goes up during a game.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Tempo {
    ticks_per_second: f64,
    increment: f64,
}

impl Tempo {
    pub fn new(base: f64, increment: f64) -> Self {
        Tempo { ticks_per_second: base, increment }
    }

    pub fn ticks_per_second(&self) -> f64 {
        self.ticks_per_second
    }

    pub fn speed_up(&mut self) {
        self.ticks_per_second += self.increment;
    }

    pub fn tick_interval(&self) -> Duration {
        Duration::from_secs_f64(1.0 / self.ticks_per_second)
    }

    /// The death reveal plays four times faster than the game was running.
    pub fn reveal_interval(&self) -> Duration {
        self.tick_interval() / 4
    }
}

/// Paces a loop on absolute deadlines.
///
/// Each deadline is the previous one plus the interval, never "now plus the
/// interval", so a late wakeup is absorbed by the next wait instead of
/// pushing every later tick back.
#[derive(Debug)]
pub struct Clock {
    next_deadline: Instant,
}

impl Clock {
    pub fn new(start: Instant) -> Self {
        Clock { next_deadline: start }
    }

    pub fn next_deadline(&self) -> Instant {
        self.next_deadline
    }

    /// Sleeps until the pending deadline (not at all if it already passed),
    /// then schedules the next one `interval` later.
    pub fn wait(&mut self, interval: Duration) {
        let now = Instant::now();
        if self.next_deadline > now {
            sleep(self.next_deadline - now);
        }
        self.advance(interval);
    }

    pub fn advance(&mut self, interval: Duration) {
        self.next_deadline += interval;
    }
}
