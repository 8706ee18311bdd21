//! Unit, structure and ability vocabulary
//!
//! The game reports raw unit kinds, and several raw kinds can describe the
//! same thing: a sieged tank is still a siege tank, a lifted barracks is
//! still a barracks. Everything in this module is a pure lookup table so
//! that the projector and the producer resolver agree on what counts as
//! "the same kind".
//!
//! # Tables
//!
//! - [`UnitTypeId::canonical`]: raw kind -> canonical kind
//! - [`UnitTypeId::upgraded_forms`]: base producer -> upgraded producers that
//!   keep its production abilities
//! - [`UnitTypeId::is_capacity_extension`]: add-ons that double queue capacity
//! - [`UnitTypeId::units_per_order`]: individuals produced per order

use serde::{Deserialize, Serialize};
use std::fmt;

/// Playable faction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Race {
    Terran,
    Protoss,
    Zerg,
}

impl Race {
    /// Designated worker kind of the faction
    pub fn worker_type(self) -> UnitTypeId {
        match self {
            Race::Terran => UnitTypeId::Scv,
            Race::Protoss => UnitTypeId::Probe,
            Race::Zerg => UnitTypeId::Drone,
        }
    }

    /// Intermediate object that carries in-flight production, if any
    ///
    /// Zerg larva morph into eggs; the egg holds the production order until
    /// the unit hatches, so the order is invisible on any producer.
    pub fn incubator(self) -> Option<UnitTypeId> {
        match self {
            Race::Zerg => Some(UnitTypeId::Egg),
            Race::Terran | Race::Protoss => None,
        }
    }

    /// Primary base structure of the faction
    pub fn base_type(self) -> UnitTypeId {
        match self {
            Race::Terran => UnitTypeId::CommandCenter,
            Race::Protoss => UnitTypeId::Nexus,
            Race::Zerg => UnitTypeId::Hatchery,
        }
    }
}

/// Raw unit kind as reported by the game
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum UnitTypeId {
    // Terran units
    Scv,
    Mule,
    Marine,
    Marauder,
    Reaper,
    Ghost,
    Hellion,
    Hellbat,
    WidowMine,
    WidowMineBurrowed,
    SiegeTank,
    SiegeTankSieged,
    Cyclone,
    Thor,
    ThorHighImpact,
    VikingFighter,
    VikingAssault,
    Medivac,
    Liberator,
    LiberatorDefender,
    Raven,
    Banshee,
    Battlecruiser,

    // Terran structures
    CommandCenter,
    CommandCenterFlying,
    OrbitalCommand,
    OrbitalCommandFlying,
    PlanetaryFortress,
    SupplyDepot,
    SupplyDepotLowered,
    Refinery,
    EngineeringBay,
    Barracks,
    BarracksFlying,
    Factory,
    FactoryFlying,
    Starport,
    StarportFlying,
    BarracksReactor,
    FactoryReactor,
    StarportReactor,
    Reactor,
    BarracksTechLab,
    FactoryTechLab,
    StarportTechLab,
    TechLab,

    // Protoss units
    Probe,
    Zealot,
    Stalker,
    Sentry,
    Adept,
    HighTemplar,
    DarkTemplar,
    Immortal,
    Observer,
    ObserverSurveillance,
    WarpPrism,
    WarpPrismPhasing,
    Colossus,
    Phoenix,
    VoidRay,
    Oracle,
    Carrier,

    // Protoss structures
    Nexus,
    Pylon,
    Assimilator,
    Gateway,
    WarpGate,
    CyberneticsCore,
    RoboticsFacility,
    Stargate,

    // Zerg units and incubation objects
    Larva,
    Egg,
    Drone,
    DroneBurrowed,
    Overlord,
    Zergling,
    ZerglingBurrowed,
    Queen,
    QueenBurrowed,
    Roach,
    RoachBurrowed,
    Hydralisk,
    HydraliskBurrowed,
    Mutalisk,
    Corruptor,
    Infestor,
    InfestorBurrowed,
    Ultralisk,

    // Zerg structures
    Hatchery,
    Lair,
    Hive,
    Extractor,
    SpawningPool,
    RoachWarren,
    HydraliskDen,
    Spire,
}

impl UnitTypeId {
    /// Canonical kind of a raw kind
    ///
    /// Alternate modes (sieged, burrowed, lifted, lowered) resolve to the
    /// kind that produced them. Every other kind maps to itself.
    ///
    /// # Example
    /// ```
    /// use production_scheduler_core::UnitTypeId;
    ///
    /// assert_eq!(UnitTypeId::SiegeTankSieged.canonical(), UnitTypeId::SiegeTank);
    /// assert_eq!(UnitTypeId::Marine.canonical(), UnitTypeId::Marine);
    /// ```
    pub fn canonical(self) -> UnitTypeId {
        use UnitTypeId::*;
        match self {
            WidowMineBurrowed => WidowMine,
            SiegeTankSieged => SiegeTank,
            ThorHighImpact => Thor,
            VikingAssault => VikingFighter,
            LiberatorDefender => Liberator,
            CommandCenterFlying => CommandCenter,
            OrbitalCommandFlying => OrbitalCommand,
            SupplyDepotLowered => SupplyDepot,
            BarracksFlying => Barracks,
            FactoryFlying => Factory,
            StarportFlying => Starport,
            ObserverSurveillance => Observer,
            WarpPrismPhasing => WarpPrism,
            DroneBurrowed => Drone,
            ZerglingBurrowed => Zergling,
            QueenBurrowed => Queen,
            RoachBurrowed => Roach,
            HydraliskBurrowed => Hydralisk,
            InfestorBurrowed => Infestor,
            other => other,
        }
    }

    /// Upgraded forms that keep every production ability of `self`
    ///
    /// Only base structures have upgraded forms. The order of the returned
    /// slice is part of the producer iteration contract.
    pub fn upgraded_forms(self) -> &'static [UnitTypeId] {
        match self {
            UnitTypeId::CommandCenter => {
                &[UnitTypeId::OrbitalCommand, UnitTypeId::PlanetaryFortress]
            }
            UnitTypeId::Hatchery => &[UnitTypeId::Lair, UnitTypeId::Hive],
            _ => &[],
        }
    }

    /// Whether this add-on lets its host hold two production orders
    pub fn is_capacity_extension(self) -> bool {
        matches!(
            self,
            UnitTypeId::BarracksReactor
                | UnitTypeId::FactoryReactor
                | UnitTypeId::StarportReactor
                | UnitTypeId::Reactor
        )
    }

    /// Individuals that materialize from a single production order
    pub fn units_per_order(self) -> u32 {
        match self {
            UnitTypeId::Zergling => 2,
            _ => 1,
        }
    }
}

impl fmt::Display for UnitTypeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(self, f)
    }
}

/// Ability identifier carried by unit orders
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AbilityId {
    // Terran production
    TrainScv,
    TrainMarine,
    TrainMarauder,
    TrainReaper,
    TrainGhost,
    TrainHellion,
    TrainHellbat,
    TrainWidowMine,
    TrainSiegeTank,
    TrainCyclone,
    TrainThor,
    TrainVikingFighter,
    TrainMedivac,
    TrainLiberator,
    TrainRaven,
    TrainBanshee,
    TrainBattlecruiser,

    // Protoss production
    TrainProbe,
    TrainZealot,
    TrainStalker,
    TrainSentry,
    TrainAdept,
    TrainHighTemplar,
    TrainDarkTemplar,
    TrainImmortal,
    TrainObserver,
    TrainWarpPrism,
    TrainColossus,
    TrainPhoenix,
    TrainVoidRay,
    TrainOracle,
    TrainCarrier,

    // Zerg production
    TrainDrone,
    TrainOverlord,
    TrainZergling,
    TrainQueen,
    TrainRoach,
    TrainHydralisk,
    TrainMutalisk,
    TrainCorruptor,
    TrainInfestor,
    TrainUltralisk,

    // Abilities that occupy a queue without producing a unit
    UpgradeToOrbital,
    UpgradeToPlanetaryFortress,
    UpgradeToLair,
    UpgradeToHive,
    BuildReactor,
    BuildTechLab,
    Research,
    Move,
    Attack,
    Harvest,
}
