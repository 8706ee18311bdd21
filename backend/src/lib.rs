//! Production Scheduler Core
//!
//! Tick-driven production orders for a real-time strategy bot. Each order
//! keeps issuing "produce unit X from structure Y" commands until the
//! projected count of X reaches its target, without double-booking a
//! producer within a tick and, for priority orders, while holding funds for
//! producers that are about to become usable.
//!
//! # Architecture
//!
//! - **core**: Game clock
//! - **models**: Game-state views, static game data, ledger, cooldowns,
//!   income, commands and events
//! - **production**: Completion projector, producer resolver, queue
//!   admission and the production order itself
//! - **orchestrator**: Owner of the shared state; polls orders once per tick
//!
//! # Critical Invariants
//!
//! 1. At most one command per producer per tick
//! 2. At most one command per order per tick
//! 3. Reservations never outlive the tick they were made in

pub mod core;
pub mod models;
pub mod orchestrator;
pub mod production;

// Re-exports for convenience
pub use core::time::GameClock;
pub use models::{
    command::{Command, CommandBuffer},
    cooldown::{CooldownBook, CooldownTracker},
    event::{Event, EventLog},
    game_data::{Cost, DataError, GameData, UnitCatalog, UnitData},
    income::{FixedIncome, IncomeCalculator, IncomeEstimator},
    ledger::{Ledger, ResourceLedger},
    state::{GameSnapshot, PlayerResources, StateView},
    unit::{Point2, Tag, Unit, UnitOrder},
    unit_type::{AbilityId, Race, UnitTypeId},
};
pub use orchestrator::{
    Orchestrator, OrchestratorConfig, OrderConfig, PlanMode, SimulationError, TickResult,
};
pub use production::{
    Act, CompletionProjector, ProductionError, ProductionOrder, QueueAdmission, TickContext,
};
