//! Live entities as seen in one game-state snapshot
//!
//! Units are owned by the snapshot, never by a production order. An order
//! only looks them up again every tick.

use crate::models::unit_type::{AbilityId, UnitTypeId};
use serde::{Deserialize, Serialize};

/// Unique identity of a live entity for the whole game
pub type Tag = u64;

/// Map position
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point2 {
    pub x: f32,
    pub y: f32,
}

impl Point2 {
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

/// One entry of a unit's order queue
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UnitOrder {
    /// Ability being executed
    ///
    /// `None` when the game reported an ability the snapshot could not
    /// resolve. Such entries never match a production ability.
    pub ability: Option<AbilityId>,

    /// Completion fraction in [0, 1]
    #[serde(default)]
    pub progress: f32,
}

impl UnitOrder {
    pub fn new(ability: AbilityId, progress: f32) -> Self {
        Self {
            ability: Some(ability),
            progress,
        }
    }

    /// Whether this entry executes `ability`
    pub fn is_ability(&self, ability: AbilityId) -> bool {
        self.ability == Some(ability)
    }
}

/// A unit or structure owned by the player
///
/// # Example
/// ```
/// use production_scheduler_core::{Unit, UnitTypeId};
///
/// let barracks = Unit::new(7, UnitTypeId::Barracks);
/// assert!(barracks.is_ready);
/// assert!(barracks.is_idle());
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Unit {
    pub tag: Tag,

    /// Raw kind reported by the game (see [`UnitTypeId::canonical`])
    pub unit_type: UnitTypeId,

    /// Construction finished
    #[serde(default = "default_true")]
    pub is_ready: bool,

    /// Construction progress in [0, 1]; 1.0 for finished entities
    #[serde(default = "default_progress")]
    pub build_progress: f32,

    #[serde(default)]
    pub is_flying: bool,

    /// Tag of the attached add-on, `None` when nothing is attached
    #[serde(default)]
    pub add_on_tag: Option<Tag>,

    /// Order queue, oldest first
    #[serde(default)]
    pub orders: Vec<UnitOrder>,

    #[serde(default)]
    pub position: Point2,
}

fn default_true() -> bool {
    true
}

fn default_progress() -> f32 {
    1.0
}

impl Unit {
    /// Create a finished, idle, grounded unit at the origin
    pub fn new(tag: Tag, unit_type: UnitTypeId) -> Self {
        Self {
            tag,
            unit_type,
            is_ready: true,
            build_progress: 1.0,
            is_flying: false,
            add_on_tag: None,
            orders: Vec::new(),
            position: Point2::default(),
        }
    }

    /// Mark the unit as still under construction
    pub fn under_construction(mut self, build_progress: f32) -> Self {
        self.is_ready = false;
        self.build_progress = build_progress.clamp(0.0, 1.0);
        self
    }

    pub fn with_order(mut self, ability: AbilityId, progress: f32) -> Self {
        self.orders.push(UnitOrder::new(ability, progress));
        self
    }

    pub fn with_add_on(mut self, add_on_tag: Tag) -> Self {
        self.add_on_tag = Some(add_on_tag);
        self
    }

    pub fn at(mut self, x: f32, y: f32) -> Self {
        self.position = Point2::new(x, y);
        self
    }

    pub fn flying(mut self) -> Self {
        self.is_flying = true;
        self
    }

    /// Canonical kind of this unit
    pub fn canonical_type(&self) -> UnitTypeId {
        self.unit_type.canonical()
    }

    /// No queued orders
    pub fn is_idle(&self) -> bool {
        self.orders.is_empty()
    }

    /// Number of queued orders executing `ability`
    pub fn count_orders(&self, ability: AbilityId) -> u32 {
        self.orders.iter().filter(|o| o.is_ability(ability)).count() as u32
    }
}
