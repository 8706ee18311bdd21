//! Completion projection
//!
//! The projected count is what the unit count will be once every piece of
//! production already paid for has finished:
//!
//! 1. live units whose canonical kind matches
//! 2. floored at the worker supply when counting workers
//! 3. plus orders waiting inside incubation objects (eggs), where a split
//!    kind such as zerglings contributes two per order
//! 4. floored at the worker supply again
//! 5. plus matching orders queued on the resolved producers
//!
//! Queue entries whose ability could not be resolved never match.

use crate::models::state::StateView;
use crate::models::unit::Unit;
use crate::models::unit_type::{AbilityId, UnitTypeId};

/// Counts live and in-flight units of one kind
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CompletionProjector {
    unit_type: UnitTypeId,
    ability: AbilityId,
}

impl CompletionProjector {
    /// Projector for `unit_type`, produced by `ability`
    pub fn new(unit_type: UnitTypeId, ability: AbilityId) -> Self {
        Self { unit_type, ability }
    }

    /// Live units of the projected kind, alternate modes included
    pub fn live_count(&self, state: &dyn StateView) -> u32 {
        state
            .own_units()
            .iter()
            .filter(|u| u.canonical_type() == self.unit_type)
            .count() as u32
    }

    /// Individuals waiting inside incubation objects
    pub fn incubating_count(&self, state: &dyn StateView) -> u32 {
        let Some(incubator) = state.race().incubator() else {
            return 0;
        };
        let pending: u32 = state
            .own_of_type(incubator)
            .iter()
            .map(|egg| egg.count_orders(self.ability))
            .sum();
        pending * self.unit_type.units_per_order()
    }

    /// Matching orders queued on `producers`
    pub fn queued_count(&self, producers: &[&Unit]) -> u32 {
        producers.iter().map(|p| p.count_orders(self.ability)).sum()
    }

    /// Live plus in-flight count
    ///
    /// # Example
    /// ```
    /// use production_scheduler_core::production::CompletionProjector;
    /// use production_scheduler_core::{AbilityId, GameSnapshot, Race, Unit, UnitTypeId};
    ///
    /// let barracks = Unit::new(1, UnitTypeId::Barracks).with_order(AbilityId::TrainMarine, 0.4);
    /// let snapshot = GameSnapshot::new(Race::Terran)
    ///     .with_unit(Unit::new(2, UnitTypeId::Marine))
    ///     .with_unit(barracks.clone());
    ///
    /// let projector = CompletionProjector::new(UnitTypeId::Marine, AbilityId::TrainMarine);
    /// assert_eq!(projector.projected_count(&snapshot, &[&barracks]), 2);
    /// ```
    pub fn projected_count(&self, state: &dyn StateView, producers: &[&Unit]) -> u32 {
        let worker_floor = if state.race().worker_type() == self.unit_type {
            state.supply_workers()
        } else {
            0
        };

        let mut count = self.live_count(state).max(worker_floor);
        count += self.incubating_count(state);
        count = count.max(worker_floor);
        count + self.queued_count(producers)
    }
}
