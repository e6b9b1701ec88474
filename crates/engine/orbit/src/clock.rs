//! Elapsed-time sources

use std::time::Instant;

/// Monotonic seconds since the session started
pub trait Clock {
    fn elapsed_seconds(&self) -> f32;
}

/// Wall clock anchored at construction
#[derive(Debug, Clone, Copy)]
pub struct MonotonicClock {
    start: Instant,
}

impl MonotonicClock {
    pub fn start() -> Self {
        Self {
            start: Instant::now(),
        }
    }
}

impl Default for MonotonicClock {
    fn default() -> Self {
        Self::start()
    }
}

impl Clock for MonotonicClock {
    fn elapsed_seconds(&self) -> f32 {
        self.start.elapsed().as_secs_f32()
    }
}

/// Clock advanced by hand, for tests and offline capture
#[derive(Debug, Clone, Copy, Default)]
pub struct ManualClock {
    elapsed: f32,
}

impl ManualClock {
    pub fn at(elapsed: f32) -> Self {
        Self { elapsed }
    }

    /// Move forward; negative deltas are ignored to stay monotonic
    pub fn advance(&mut self, seconds: f32) {
        if seconds > 0.0 {
            self.elapsed += seconds;
        }
    }
}

impl Clock for ManualClock {
    fn elapsed_seconds(&self) -> f32 {
        self.elapsed
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_monotonic_clock_never_decreases() {
        let clock = MonotonicClock::start();
        let a = clock.elapsed_seconds();
        let b = clock.elapsed_seconds();
        assert!(a >= 0.0);
        assert!(b >= a);
    }

    #[test]
    fn test_manual_clock_ignores_rewind() {
        let mut clock = ManualClock::at(2.0);
        clock.advance(0.5);
        clock.advance(-10.0);
        assert_eq!(clock.elapsed_seconds(), 2.5);
    }
}
