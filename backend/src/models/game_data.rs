//! Ability and cost resolution
//!
//! Maps a unit kind to the ability that creates it, the resources that
//! ability costs and the time it takes. Missing data is never defaulted:
//! a lookup failure means the order or the table is malformed, so it is
//! returned as a [`DataError`] for the caller to propagate.
//!
//! CRITICAL: All resource amounts are i64

use crate::models::unit_type::{AbilityId, UnitTypeId};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use thiserror::Error;

/// Errors raised by a [`GameData`] lookup
#[derive(Debug, Clone, Error, PartialEq)]
pub enum DataError {
    #[error("No game data for unit type {unit_type}")]
    MissingUnitData { unit_type: UnitTypeId },

    #[error("Unit type {unit_type} has no creation ability")]
    MissingCreationAbility { unit_type: UnitTypeId },

    #[error("No cost known for ability {ability:?}")]
    MissingAbilityCost { ability: AbilityId },
}

/// Resource cost of one production order
///
/// Supply is counted in whole supply units; a zergling pair costs 1.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Cost {
    pub minerals: i64,
    pub vespene: i64,
    #[serde(default)]
    pub supply: i64,
}

impl Cost {
    pub const fn new(minerals: i64, vespene: i64, supply: i64) -> Self {
        Self {
            minerals,
            vespene,
            supply,
        }
    }
}

/// Static data of one unit kind
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UnitData {
    /// Ability that produces this kind; structures placed by workers have none
    pub creation_ability: Option<AbilityId>,

    pub cost: Cost,

    /// Production or construction time in game seconds
    pub build_time: f64,
}

/// Ability/cost resolver consumed by production orders
pub trait GameData {
    /// Raw table entry for `unit_type`
    fn unit_data(&self, unit_type: UnitTypeId) -> Option<&UnitData>;

    /// Cost of executing `ability` once
    fn ability_cost(&self, ability: AbilityId) -> Result<Cost, DataError>;

    /// Ability that creates `unit_type`
    fn creation_ability(&self, unit_type: UnitTypeId) -> Result<AbilityId, DataError> {
        self.unit_data(unit_type)
            .ok_or(DataError::MissingUnitData { unit_type })?
            .creation_ability
            .ok_or(DataError::MissingCreationAbility { unit_type })
    }

    /// Build time of `unit_type` in game seconds
    fn build_time(&self, unit_type: UnitTypeId) -> Result<f64, DataError> {
        self.unit_data(unit_type)
            .map(|data| data.build_time)
            .ok_or(DataError::MissingUnitData { unit_type })
    }
}

/// Table-backed [`GameData`]
///
/// # Example
/// ```
/// use production_scheduler_core::{AbilityId, GameData, UnitCatalog, UnitTypeId};
///
/// let catalog = UnitCatalog::builtin();
/// let ability = catalog.creation_ability(UnitTypeId::Marine).unwrap();
/// assert_eq!(ability, AbilityId::TrainMarine);
/// assert_eq!(catalog.ability_cost(ability).unwrap().minerals, 50);
/// ```
#[derive(Debug, Clone, Default)]
pub struct UnitCatalog {
    units: HashMap<UnitTypeId, UnitData>,
    abilities: HashMap<AbilityId, Cost>,
}

// (unit, creation ability, minerals, vespene, supply, build seconds)
type ProductionRow = (UnitTypeId, AbilityId, i64, i64, i64, f64);

// (producer, minerals, vespene, build seconds)
type StructureRow = (UnitTypeId, i64, i64, f64);

const PRODUCTION_TABLE: &[ProductionRow] = {
    use AbilityId as A;
    use UnitTypeId as U;
    &[
        (U::Scv, A::TrainScv, 50, 0, 1, 12.0),
        (U::Marine, A::TrainMarine, 50, 0, 1, 18.0),
        (U::Marauder, A::TrainMarauder, 100, 25, 2, 21.0),
        (U::Reaper, A::TrainReaper, 50, 50, 1, 32.0),
        (U::Ghost, A::TrainGhost, 150, 125, 2, 29.0),
        (U::Hellion, A::TrainHellion, 100, 0, 2, 21.0),
        (U::Hellbat, A::TrainHellbat, 100, 0, 2, 21.0),
        (U::WidowMine, A::TrainWidowMine, 75, 25, 2, 21.0),
        (U::SiegeTank, A::TrainSiegeTank, 150, 125, 3, 32.0),
        (U::Cyclone, A::TrainCyclone, 150, 100, 3, 32.0),
        (U::Thor, A::TrainThor, 300, 200, 6, 43.0),
        (U::VikingFighter, A::TrainVikingFighter, 150, 75, 2, 30.0),
        (U::Medivac, A::TrainMedivac, 100, 100, 2, 30.0),
        (U::Liberator, A::TrainLiberator, 150, 150, 3, 43.0),
        (U::Raven, A::TrainRaven, 100, 200, 2, 43.0),
        (U::Banshee, A::TrainBanshee, 150, 100, 3, 43.0),
        (U::Battlecruiser, A::TrainBattlecruiser, 400, 300, 6, 64.0),
        (U::Probe, A::TrainProbe, 50, 0, 1, 12.0),
        (U::Zealot, A::TrainZealot, 100, 0, 2, 27.0),
        (U::Stalker, A::TrainStalker, 125, 50, 2, 30.0),
        (U::Sentry, A::TrainSentry, 50, 100, 2, 26.0),
        (U::Adept, A::TrainAdept, 100, 25, 2, 30.0),
        (U::HighTemplar, A::TrainHighTemplar, 50, 150, 2, 39.0),
        (U::DarkTemplar, A::TrainDarkTemplar, 125, 125, 2, 39.0),
        (U::Immortal, A::TrainImmortal, 275, 100, 4, 39.0),
        (U::Observer, A::TrainObserver, 25, 75, 1, 21.0),
        (U::WarpPrism, A::TrainWarpPrism, 250, 0, 2, 36.0),
        (U::Colossus, A::TrainColossus, 300, 200, 6, 54.0),
        (U::Phoenix, A::TrainPhoenix, 150, 100, 2, 25.0),
        (U::VoidRay, A::TrainVoidRay, 250, 150, 4, 43.0),
        (U::Oracle, A::TrainOracle, 150, 150, 3, 37.0),
        (U::Carrier, A::TrainCarrier, 350, 250, 6, 64.0),
        (U::Drone, A::TrainDrone, 50, 0, 1, 12.0),
        (U::Overlord, A::TrainOverlord, 100, 0, 0, 18.0),
        (U::Zergling, A::TrainZergling, 50, 0, 1, 17.0),
        (U::Queen, A::TrainQueen, 150, 0, 2, 36.0),
        (U::Roach, A::TrainRoach, 75, 25, 2, 19.0),
        (U::Hydralisk, A::TrainHydralisk, 100, 50, 2, 24.0),
        (U::Mutalisk, A::TrainMutalisk, 100, 100, 2, 24.0),
        (U::Corruptor, A::TrainCorruptor, 150, 100, 2, 29.0),
        (U::Infestor, A::TrainInfestor, 100, 150, 2, 36.0),
        (U::Ultralisk, A::TrainUltralisk, 275, 200, 6, 39.0),
    ]
};

const STRUCTURE_TABLE: &[StructureRow] = {
    use UnitTypeId as U;
    &[
        (U::CommandCenter, 400, 0, 71.0),
        (U::OrbitalCommand, 150, 0, 25.0),
        (U::PlanetaryFortress, 150, 150, 36.0),
        (U::SupplyDepot, 100, 0, 21.0),
        (U::Refinery, 75, 0, 21.0),
        (U::EngineeringBay, 125, 0, 25.0),
        (U::Barracks, 150, 0, 46.0),
        (U::Factory, 150, 100, 43.0),
        (U::Starport, 150, 100, 36.0),
        (U::BarracksReactor, 50, 50, 36.0),
        (U::FactoryReactor, 50, 50, 36.0),
        (U::StarportReactor, 50, 50, 36.0),
        (U::Reactor, 50, 50, 36.0),
        (U::BarracksTechLab, 50, 25, 18.0),
        (U::FactoryTechLab, 50, 25, 18.0),
        (U::StarportTechLab, 50, 25, 18.0),
        (U::TechLab, 50, 25, 18.0),
        (U::Nexus, 400, 0, 71.0),
        (U::Pylon, 100, 0, 18.0),
        (U::Assimilator, 75, 0, 21.0),
        (U::Gateway, 150, 0, 46.0),
        (U::CyberneticsCore, 150, 0, 36.0),
        (U::RoboticsFacility, 150, 100, 46.0),
        (U::Stargate, 150, 150, 43.0),
        // Larva are not built; build time is the spawn interval
        (U::Larva, 0, 0, 11.0),
        (U::Hatchery, 300, 0, 71.0),
        (U::Lair, 150, 100, 57.0),
        (U::Hive, 200, 150, 71.0),
        (U::Extractor, 25, 0, 21.0),
        (U::SpawningPool, 200, 0, 46.0),
        (U::RoachWarren, 150, 0, 39.0),
        (U::HydraliskDen, 100, 100, 29.0),
        (U::Spire, 200, 200, 71.0),
    ]
};

impl UnitCatalog {
    /// Create an empty catalog
    pub fn new() -> Self {
        Self::default()
    }

    /// Catalog with every trainable unit and producer structure of the three races
    pub fn builtin() -> Self {
        let mut catalog = Self::new();
        for &(unit_type, ability, minerals, vespene, supply, build_time) in PRODUCTION_TABLE {
            catalog.insert(
                unit_type,
                UnitData {
                    creation_ability: Some(ability),
                    cost: Cost::new(minerals, vespene, supply),
                    build_time,
                },
            );
        }
        for &(unit_type, minerals, vespene, build_time) in STRUCTURE_TABLE {
            catalog.insert(
                unit_type,
                UnitData {
                    creation_ability: None,
                    cost: Cost::new(minerals, vespene, 0),
                    build_time,
                },
            );
        }
        catalog
    }

    /// Add or replace the entry for `unit_type`
    pub fn insert(&mut self, unit_type: UnitTypeId, data: UnitData) {
        if let Some(ability) = data.creation_ability {
            self.abilities.insert(ability, data.cost);
        }
        self.units.insert(unit_type, data);
    }

    /// Remove the entry for `unit_type` together with its ability cost
    pub fn remove(&mut self, unit_type: UnitTypeId) -> Option<UnitData> {
        let data = self.units.remove(&unit_type)?;
        if let Some(ability) = data.creation_ability {
            self.abilities.remove(&ability);
        }
        Some(data)
    }

    /// Number of unit kinds in the catalog
    pub fn len(&self) -> usize {
        self.units.len()
    }

    pub fn is_empty(&self) -> bool {
        self.units.is_empty()
    }
}

impl GameData for UnitCatalog {
    fn unit_data(&self, unit_type: UnitTypeId) -> Option<&UnitData> {
        self.units.get(&unit_type)
    }

    fn ability_cost(&self, ability: AbilityId) -> Result<Cost, DataError> {
        self.abilities
            .get(&ability)
            .copied()
            .ok_or(DataError::MissingAbilityCost { ability })
    }
}
