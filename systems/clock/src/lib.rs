#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Fixed-timestep scheduler that turns host time into tick commands.

use std::time::Duration;

use colony_core::{config, Command};

/// Timer firings retained when the host falls behind; older ones are dropped.
const MAX_BACKLOG: u32 = 5;

/// Configuration parameters required to construct the clock.
#[derive(Clone, Copy, Debug)]
pub struct Config {
    tick_interval: Duration,
}

impl Config {
    /// Creates a new configuration firing once per `tick_interval`.
    #[must_use]
    pub const fn new(tick_interval: Duration) -> Self {
        Self { tick_interval }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::new(config::TICK_INTERVAL)
    }
}

/// Pure system that emits `speed` tick commands for every elapsed interval
/// while running.
#[derive(Debug)]
pub struct Clock {
    tick_interval: Duration,
    accumulator: Duration,
    speed: u32,
    running: bool,
}

impl Clock {
    /// Creates a paused clock at speed one.
    #[must_use]
    pub fn new(config: Config) -> Self {
        Self {
            tick_interval: config.tick_interval,
            accumulator: Duration::ZERO,
            speed: 1,
            running: false,
        }
    }

    /// Resumes issuing ticks.
    pub fn start(&mut self) {
        self.running = true;
    }

    /// Stops issuing ticks and discards any partially elapsed interval.
    pub fn pause(&mut self) {
        self.running = false;
        self.accumulator = Duration::ZERO;
    }

    /// Reports whether the clock is issuing ticks.
    #[must_use]
    pub const fn is_running(&self) -> bool {
        self.running
    }

    /// Ticks issued per timer firing.
    #[must_use]
    pub const fn speed(&self) -> u32 {
        self.speed
    }

    /// Sets the ticks-per-firing multiplier, clamped to `1..=MAX_SPEED`.
    ///
    /// Returns the speed actually applied.
    pub fn set_speed(&mut self, speed: u32) -> u32 {
        self.speed = speed.clamp(1, config::MAX_SPEED);
        self.speed
    }

    /// Accumulates `elapsed` host time and pushes the ticks it pays for.
    ///
    /// Returns the number of timer firings that elapsed.
    pub fn advance(&mut self, elapsed: Duration, out: &mut Vec<Command>) -> u32 {
        if !self.running || self.tick_interval.is_zero() {
            return 0;
        }

        self.accumulator = self.accumulator.saturating_add(elapsed);
        let backlog = self.tick_interval * MAX_BACKLOG;
        if self.accumulator > backlog {
            self.accumulator = backlog;
        }

        let mut firings = 0;
        while self.accumulator >= self.tick_interval {
            self.accumulator -= self.tick_interval;
            firings += 1;
            out.extend(std::iter::repeat(Command::Tick).take(self.speed as usize));
        }
        firings
    }
}
