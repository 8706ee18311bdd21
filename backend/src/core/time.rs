//! Game time for the production scheduler
//!
//! The game advances in discrete game loops ("ticks"). Build times and
//! income rates are expressed in game seconds, so the clock converts
//! between the two using a fixed loop rate.

use serde::{Deserialize, Serialize};

/// Game loops per game second at "faster" game speed
pub const DEFAULT_TICKS_PER_SECOND: f64 = 22.4;

/// Tracks the current game loop and converts between ticks and seconds
///
/// # Example
/// ```
/// use production_scheduler_core::GameClock;
///
/// let mut clock = GameClock::new(22.4);
/// assert_eq!(clock.current_tick(), 0);
///
/// clock.advance_tick();
/// assert_eq!(clock.current_tick(), 1);
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameClock {
    /// Game loops elapsed since the game started
    current_tick: usize,
    /// Game loops per game second
    ticks_per_second: f64,
}

impl GameClock {
    /// Create a clock at tick zero
    ///
    /// # Panics
    ///
    /// Panics if `ticks_per_second` is not a positive, finite number.
    pub fn new(ticks_per_second: f64) -> Self {
        assert!(
            ticks_per_second.is_finite() && ticks_per_second > 0.0,
            "ticks_per_second must be positive"
        );
        Self {
            current_tick: 0,
            ticks_per_second,
        }
    }

    /// Advance time by one tick
    pub fn advance_tick(&mut self) {
        self.current_tick += 1;
    }

    /// Jump to an absolute tick reported by the game
    ///
    /// The clock never moves backwards; an older tick is ignored.
    pub fn sync_to(&mut self, tick: usize) {
        self.current_tick = self.current_tick.max(tick);
    }

    /// Current game loop
    pub fn current_tick(&self) -> usize {
        self.current_tick
    }

    /// Game loops per game second
    pub fn ticks_per_second(&self) -> f64 {
        self.ticks_per_second
    }

    /// Game seconds elapsed since tick zero
    ///
    /// # Example
    /// ```
    /// use production_scheduler_core::GameClock;
    ///
    /// let mut clock = GameClock::new(10.0);
    /// for _ in 0..25 {
    ///     clock.advance_tick();
    /// }
    /// assert!((clock.elapsed_seconds() - 2.5).abs() < 1e-9);
    /// ```
    pub fn elapsed_seconds(&self) -> f64 {
        self.ticks_to_seconds(self.current_tick)
    }

    /// Convert a tick span to game seconds
    pub fn ticks_to_seconds(&self, ticks: usize) -> f64 {
        ticks as f64 / self.ticks_per_second
    }

    /// Convert game seconds to a tick span, rounding up
    pub fn seconds_to_ticks(&self, seconds: f64) -> usize {
        if seconds <= 0.0 {
            return 0;
        }
        (seconds * self.ticks_per_second).ceil() as usize
    }
}

impl Default for GameClock {
    fn default() -> Self {
        Self::new(DEFAULT_TICKS_PER_SECOND)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    #[should_panic(expected = "ticks_per_second must be positive")]
    fn test_zero_rate_panics() {
        GameClock::new(0.0);
    }

    #[test]
    fn test_seconds_to_ticks_rounds_up() {
        let clock = GameClock::new(22.4);
        assert_eq!(clock.seconds_to_ticks(1.0), 23);
        assert_eq!(clock.seconds_to_ticks(0.0), 0);
        assert_eq!(clock.seconds_to_ticks(-3.0), 0);
    }

    #[test]
    fn test_sync_never_moves_backwards() {
        let mut clock = GameClock::default();
        clock.sync_to(100);
        clock.sync_to(40);
        assert_eq!(clock.current_tick(), 100);
    }
}
