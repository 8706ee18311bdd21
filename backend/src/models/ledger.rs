//! Shared resource ledger
//!
//! Every active production order checks affordability against the same
//! ledger. High-priority orders may also place reservations that hide part
//! of the bank from everyone else for the rest of the tick.
//!
//! # Reconciliation
//!
//! The ledger carries no history. Its owner calls [`Ledger::refresh`] once
//! per tick with the fresh player resources, which also drops every
//! reservation made during the previous tick. Orders that still need a
//! reservation place it again.
//!
//! CRITICAL: All resource amounts are i64

use crate::models::game_data::Cost;
use crate::models::state::PlayerResources;

/// Affordability queries and reservations shared by all orders
pub trait ResourceLedger {
    /// Whether `cost` fits in the unreserved bank
    fn can_afford(&self, cost: &Cost) -> bool;

    /// Hold resources back from other orders (additive per call)
    fn reserve(&mut self, minerals: i64, vespene: i64);

    /// Deduct the cost of a command that was just issued
    fn spend(&mut self, cost: &Cost);
}

/// In-memory [`ResourceLedger`] rebuilt from the snapshot each tick
///
/// # Example
/// ```
/// use production_scheduler_core::{Cost, Ledger, ResourceLedger};
///
/// let mut ledger = Ledger::new(150, 0, 10);
/// let marine = Cost::new(50, 0, 1);
/// assert!(ledger.can_afford(&marine));
///
/// ledger.reserve(120, 0);
/// assert!(!ledger.can_afford(&marine));
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Ledger {
    minerals: i64,
    vespene: i64,
    supply_left: i64,
    reserved_minerals: i64,
    reserved_vespene: i64,
    reservation_count: usize,
}

impl Ledger {
    /// Ledger with the given bank and no reservations
    pub fn new(minerals: i64, vespene: i64, supply_left: i64) -> Self {
        Self {
            minerals,
            vespene,
            supply_left,
            ..Default::default()
        }
    }

    /// Start a new tick from fresh player resources
    pub fn refresh(&mut self, player: &PlayerResources) {
        *self = Self::new(player.minerals, player.vespene, player.supply_left());
    }

    pub fn minerals(&self) -> i64 {
        self.minerals
    }

    pub fn vespene(&self) -> i64 {
        self.vespene
    }

    pub fn supply_left(&self) -> i64 {
        self.supply_left
    }

    /// Total reserved this tick as (minerals, vespene)
    pub fn reserved(&self) -> (i64, i64) {
        (self.reserved_minerals, self.reserved_vespene)
    }

    /// Number of `reserve` calls since the last refresh
    pub fn reservation_count(&self) -> usize {
        self.reservation_count
    }

    /// Minerals not held back by reservations (may be negative)
    pub fn free_minerals(&self) -> i64 {
        self.minerals - self.reserved_minerals
    }

    /// Vespene not held back by reservations (may be negative)
    pub fn free_vespene(&self) -> i64 {
        self.vespene - self.reserved_vespene
    }
}

impl ResourceLedger for Ledger {
    fn can_afford(&self, cost: &Cost) -> bool {
        let supply_ok = cost.supply <= 0 || self.supply_left >= cost.supply;
        self.free_minerals() >= cost.minerals && self.free_vespene() >= cost.vespene && supply_ok
    }

    fn reserve(&mut self, minerals: i64, vespene: i64) {
        self.reserved_minerals += minerals;
        self.reserved_vespene += vespene;
        self.reservation_count += 1;
    }

    fn spend(&mut self, cost: &Cost) {
        self.minerals -= cost.minerals;
        self.vespene -= cost.vespene;
        self.supply_left -= cost.supply;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_supply_blocks_affordability() {
        let ledger = Ledger::new(1000, 1000, 1);
        assert!(!ledger.can_afford(&Cost::new(100, 0, 2)));
        // Supply-free production ignores the cap
        let blocked = Ledger::new(1000, 0, 0);
        assert!(blocked.can_afford(&Cost::new(100, 0, 0)));
    }

    #[test]
    fn test_reservations_accumulate() {
        let mut ledger = Ledger::new(400, 200, 10);
        ledger.reserve(150, 100);
        ledger.reserve(100, 50);
        assert_eq!(ledger.reserved(), (250, 150));
        assert_eq!(ledger.reservation_count(), 2);
        assert_eq!(ledger.free_minerals(), 150);
        assert!(ledger.can_afford(&Cost::new(150, 50, 1)));
        assert!(!ledger.can_afford(&Cost::new(150, 51, 1)));
    }

    #[test]
    fn test_spend_reduces_bank() {
        let mut ledger = Ledger::new(100, 0, 2);
        ledger.spend(&Cost::new(50, 0, 1));
        assert_eq!(ledger.minerals(), 50);
        assert_eq!(ledger.supply_left(), 1);
    }

    #[test]
    fn test_refresh_drops_reservations() {
        let mut ledger = Ledger::new(100, 0, 2);
        ledger.reserve(100, 0);
        ledger.refresh(&PlayerResources {
            minerals: 300,
            vespene: 25,
            supply_used: 20,
            supply_cap: 23,
            ..Default::default()
        });
        assert_eq!(ledger.reserved(), (0, 0));
        assert_eq!(ledger.reservation_count(), 0);
        assert_eq!(ledger.minerals(), 300);
        assert_eq!(ledger.supply_left(), 3);
    }
}
