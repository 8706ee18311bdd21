//! Game-state snapshot
//!
//! One immutable view of the player's side of the game, taken at the start
//! of a tick. Production orders never cache anything from it across ticks.
//!
//! # Iteration order
//!
//! `own_units()` returns entities in snapshot order and every derived query
//! preserves it. Producer selection depends on this order, so a snapshot
//! must keep it stable for identical game states.

use crate::models::unit::{Tag, Unit};
use crate::models::unit_type::{Race, UnitTypeId};
use serde::{Deserialize, Serialize};

/// Read-only game state consumed by production orders
pub trait StateView {
    /// Faction being played
    fn race(&self) -> Race;

    /// Every owned unit and structure, in snapshot order
    fn own_units(&self) -> &[Unit];

    /// Look up an owned entity by identity
    fn by_tag(&self, tag: Tag) -> Option<&Unit>;

    /// Supply currently taken by workers
    ///
    /// Counts workers inside refineries and in transit that a type-based
    /// count misses.
    fn supply_workers(&self) -> u32;

    /// Owned entities whose raw kind is `unit_type`
    fn own_of_type(&self, unit_type: UnitTypeId) -> Vec<&Unit> {
        self.own_units()
            .iter()
            .filter(|u| u.unit_type == unit_type)
            .collect()
    }

    /// Owned entities whose canonical kind is `unit_type`
    fn own_of_canonical_type(&self, unit_type: UnitTypeId) -> Vec<&Unit> {
        self.own_units()
            .iter()
            .filter(|u| u.canonical_type() == unit_type)
            .collect()
    }
}

/// Spendable resources and supply of the player
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PlayerResources {
    pub minerals: i64,
    pub vespene: i64,
    pub supply_used: i64,
    pub supply_cap: i64,
    pub supply_workers: u32,

    /// Cumulative minerals collected since game start (income sampling)
    #[serde(default)]
    pub collected_minerals: i64,

    /// Cumulative vespene collected since game start (income sampling)
    #[serde(default)]
    pub collected_vespene: i64,
}

impl PlayerResources {
    pub fn supply_left(&self) -> i64 {
        (self.supply_cap - self.supply_used).max(0)
    }
}

/// Concrete snapshot delivered by the game bridge each tick
///
/// # Example
/// ```
/// use production_scheduler_core::{GameSnapshot, Race, StateView, Unit, UnitTypeId};
///
/// let snapshot = GameSnapshot::new(Race::Terran)
///     .with_unit(Unit::new(1, UnitTypeId::CommandCenter))
///     .with_unit(Unit::new(2, UnitTypeId::Scv));
///
/// assert_eq!(snapshot.own_of_type(UnitTypeId::Scv).len(), 1);
/// assert!(snapshot.by_tag(1).is_some());
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GameSnapshot {
    /// Game loop the snapshot was taken at
    #[serde(default)]
    pub game_loop: usize,

    pub race: Race,

    #[serde(default)]
    pub units: Vec<Unit>,

    #[serde(default)]
    pub player: PlayerResources,
}

impl GameSnapshot {
    /// Empty snapshot for `race`
    pub fn new(race: Race) -> Self {
        Self {
            game_loop: 0,
            race,
            units: Vec::new(),
            player: PlayerResources::default(),
        }
    }

    /// Parse a snapshot exported by the game bridge
    pub fn from_json_str(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    pub fn with_unit(mut self, unit: Unit) -> Self {
        self.units.push(unit);
        self
    }

    pub fn with_resources(mut self, player: PlayerResources) -> Self {
        self.player = player;
        self
    }

    pub fn at_loop(mut self, game_loop: usize) -> Self {
        self.game_loop = game_loop;
        self
    }

    /// Mutable access to an owned entity
    pub fn unit_mut(&mut self, tag: Tag) -> Option<&mut Unit> {
        self.units.iter_mut().find(|u| u.tag == tag)
    }
}

impl StateView for GameSnapshot {
    fn race(&self) -> Race {
        self.race
    }

    fn own_units(&self) -> &[Unit] {
        &self.units
    }

    fn by_tag(&self, tag: Tag) -> Option<&Unit> {
        self.units.iter().find(|u| u.tag == tag)
    }

    fn supply_workers(&self) -> u32 {
        self.player.supply_workers
    }
}
