//! Income-rate estimation
//!
//! Income is the slope of the cumulative collected-resource counters over a
//! sliding window of samples. Rates are in resources per game second and
//! are never negative.

use crate::core::time::GameClock;
use std::collections::VecDeque;

/// Income rates consumed by the reservation logic
pub trait IncomeEstimator {
    /// Minerals gathered per game second
    fn mineral_income(&self) -> f64;

    /// Vespene gathered per game second
    fn gas_income(&self) -> f64;
}

#[derive(Debug, Clone, Copy, PartialEq)]
struct IncomeSample {
    tick: usize,
    minerals: i64,
    vespene: i64,
}

/// Sliding-window [`IncomeEstimator`]
///
/// # Example
/// ```
/// use production_scheduler_core::{GameClock, IncomeCalculator, IncomeEstimator};
///
/// let clock = GameClock::new(10.0);
/// let mut income = IncomeCalculator::new(100);
/// income.record(&clock, 0, 0, 0);
/// income.record(&clock, 20, 100, 40);
///
/// // 100 minerals over 2 seconds
/// assert!((income.mineral_income() - 50.0).abs() < 1e-9);
/// assert!((income.gas_income() - 20.0).abs() < 1e-9);
/// ```
#[derive(Debug, Clone)]
pub struct IncomeCalculator {
    window_ticks: usize,
    samples: VecDeque<IncomeSample>,
    mineral_rate: f64,
    gas_rate: f64,
}

impl IncomeCalculator {
    /// Estimator averaging over the last `window_ticks` ticks
    ///
    /// # Panics
    ///
    /// Panics if `window_ticks` is zero.
    pub fn new(window_ticks: usize) -> Self {
        assert!(window_ticks > 0, "window_ticks must be positive");
        Self {
            window_ticks,
            samples: VecDeque::new(),
            mineral_rate: 0.0,
            gas_rate: 0.0,
        }
    }

    /// Add a sample of the cumulative collected counters at `tick`
    ///
    /// Samples older than the window are discarded. A sample that does not
    /// advance time replaces the newest one.
    pub fn record(&mut self, clock: &GameClock, tick: usize, minerals: i64, vespene: i64) {
        let sample = IncomeSample {
            tick,
            minerals,
            vespene,
        };
        match self.samples.back_mut() {
            Some(last) if last.tick >= tick => *last = sample,
            _ => self.samples.push_back(sample),
        }

        while let Some(first) = self.samples.front() {
            if tick.saturating_sub(first.tick) > self.window_ticks && self.samples.len() > 2 {
                self.samples.pop_front();
            } else {
                break;
            }
        }

        self.recompute(clock);
    }

    fn recompute(&mut self, clock: &GameClock) {
        let (Some(first), Some(last)) = (self.samples.front(), self.samples.back()) else {
            return;
        };
        if last.tick <= first.tick {
            self.mineral_rate = 0.0;
            self.gas_rate = 0.0;
            return;
        }

        let seconds = clock.ticks_to_seconds(last.tick - first.tick);
        // Counters reset on reconnect; treat a drop as no income
        self.mineral_rate = ((last.minerals - first.minerals).max(0)) as f64 / seconds;
        self.gas_rate = ((last.vespene - first.vespene).max(0)) as f64 / seconds;
    }

    /// Number of samples currently inside the window
    pub fn sample_count(&self) -> usize {
        self.samples.len()
    }
}

impl IncomeEstimator for IncomeCalculator {
    fn mineral_income(&self) -> f64 {
        self.mineral_rate
    }

    fn gas_income(&self) -> f64 {
        self.gas_rate
    }
}

/// Fixed income rates
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct FixedIncome {
    pub minerals: f64,
    pub vespene: f64,
}

impl FixedIncome {
    pub fn new(minerals: f64, vespene: f64) -> Self {
        Self {
            minerals: minerals.max(0.0),
            vespene: vespene.max(0.0),
        }
    }
}

impl IncomeEstimator for FixedIncome {
    fn mineral_income(&self) -> f64 {
        self.minerals
    }

    fn gas_income(&self) -> f64 {
        self.vespene
    }
}
