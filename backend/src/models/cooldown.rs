//! Per-producer, per-ability cooldowns
//!
//! Production orders only read cooldowns. The tick runner records a use
//! after it forwards a command to the game, which keeps an order from
//! re-issuing the same ability before the game has acknowledged it.

use crate::models::unit::Tag;
use crate::models::unit_type::AbilityId;
use std::collections::HashMap;

/// Cooldown lookup consumed by production orders
pub trait CooldownTracker {
    /// Whether `producer` may use `ability` this tick
    fn is_ready(&self, producer: Tag, ability: AbilityId) -> bool;
}

/// Map of (producer, ability) to the first tick the pair is usable again
///
/// # Example
/// ```
/// use production_scheduler_core::{AbilityId, CooldownBook, CooldownTracker};
///
/// let mut book = CooldownBook::new();
/// book.record_use(7, AbilityId::TrainMarine, 4);
/// assert!(!book.is_ready(7, AbilityId::TrainMarine));
///
/// book.advance_to(4);
/// assert!(book.is_ready(7, AbilityId::TrainMarine));
/// ```
#[derive(Debug, Clone, Default)]
pub struct CooldownBook {
    current_tick: usize,
    ready_at: HashMap<(Tag, AbilityId), usize>,
}

impl CooldownBook {
    pub fn new() -> Self {
        Self::default()
    }

    /// Move the book's notion of "now" forward
    pub fn advance_to(&mut self, tick: usize) {
        self.current_tick = self.current_tick.max(tick);
    }

    pub fn current_tick(&self) -> usize {
        self.current_tick
    }

    /// Block `producer` from using `ability` for `cooldown_ticks` ticks
    pub fn record_use(&mut self, producer: Tag, ability: AbilityId, cooldown_ticks: usize) {
        self.ready_at
            .insert((producer, ability), self.current_tick + cooldown_ticks);
    }

    /// First tick `producer` may use `ability` again, if it is still cooling down
    pub fn ready_at(&self, producer: Tag, ability: AbilityId) -> Option<usize> {
        self.ready_at
            .get(&(producer, ability))
            .copied()
            .filter(|&tick| tick > self.current_tick)
    }

    /// Drop entries that have already elapsed
    pub fn prune(&mut self) {
        let now = self.current_tick;
        self.ready_at.retain(|_, ready| *ready > now);
    }

    /// Number of tracked entries (elapsed ones included until pruned)
    pub fn len(&self) -> usize {
        self.ready_at.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ready_at.is_empty()
    }
}

impl CooldownTracker for CooldownBook {
    fn is_ready(&self, producer: Tag, ability: AbilityId) -> bool {
        self.ready_at(producer, ability).is_none()
    }
}
