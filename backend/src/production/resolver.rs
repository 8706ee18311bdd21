//! Producer resolution
//!
//! Upgrading a structure changes its raw kind without taking away what it
//! could produce before. A command center that became an orbital command
//! still trains workers, so asking for "command centers" must also return
//! orbital commands and planetary fortresses. Only the faction's base
//! structure ([`Race::base_type`]) has upgraded forms.
//!
//! [`Race::base_type`]: crate::models::unit_type::Race::base_type
//!
//! # Order
//!
//! Producers are grouped by form: the configured kind first, then each
//! upgraded form in [`UnitTypeId::upgraded_forms`] order. Within a form the
//! snapshot order is kept. The first eligible producer in this order gets
//! the command.

use crate::models::state::StateView;
use crate::models::unit::Unit;
use crate::models::unit_type::UnitTypeId;

/// Live entities that can currently act as `producer_type`
///
/// Computed fresh on every call. Alternate modes (e.g. a lifted barracks)
/// are included; filtering out producers that cannot act right now is the
/// caller's job.
///
/// # Example
/// ```
/// use production_scheduler_core::production::resolve_producers;
/// use production_scheduler_core::{GameSnapshot, Race, Unit, UnitTypeId};
///
/// let snapshot = GameSnapshot::new(Race::Terran)
///     .with_unit(Unit::new(1, UnitTypeId::OrbitalCommand))
///     .with_unit(Unit::new(2, UnitTypeId::CommandCenter));
///
/// let tags: Vec<u64> = resolve_producers(&snapshot, UnitTypeId::CommandCenter)
///     .iter()
///     .map(|u| u.tag)
///     .collect();
/// assert_eq!(tags, vec![2, 1]);
/// ```
pub fn resolve_producers<'s>(
    state: &'s dyn StateView,
    producer_type: UnitTypeId,
) -> Vec<&'s Unit> {
    let mut producers = state.own_of_canonical_type(producer_type);
    if producer_type == state.race().base_type() {
        for &form in producer_type.upgraded_forms() {
            producers.extend(state.own_of_canonical_type(form));
        }
    }
    producers
}
