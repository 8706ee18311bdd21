//! Production orders
//!
//! A production order keeps one unit kind topped up to a target count. It is
//! polled once per tick and issues at most one production command per poll.
//!
//! # Responsibilities
//!
//! - **resolver**: which live entities can act as the configured producer
//! - **projector**: how many units exist or are already on the way
//! - **admission**: whether a producer may accept one more order
//! - **reservation**: when a priority order should hold resources back
//! - **order**: the per-tick decision procedure tying them together
//!
//! # Lifecycle
//!
//! ```rust
//! use production_scheduler_core::production::{Act, ProductionOrder, TickContext};
//! use production_scheduler_core::{
//!     CommandBuffer, CooldownBook, EventLog, FixedIncome, GameSnapshot, Ledger, Race, Unit,
//!     UnitCatalog, UnitTypeId,
//! };
//!
//! let catalog = UnitCatalog::builtin();
//! let mut order = ProductionOrder::new(UnitTypeId::Marine, UnitTypeId::Barracks, 1);
//! order.start(&catalog).unwrap();
//!
//! let snapshot = GameSnapshot::new(Race::Terran).with_unit(Unit::new(1, UnitTypeId::Barracks));
//! let cooldowns = CooldownBook::new();
//! let income = FixedIncome::default();
//! let mut ledger = Ledger::new(50, 0, 1);
//! let mut commands = CommandBuffer::new();
//! let mut events = EventLog::new();
//!
//! let mut ctx = TickContext {
//!     tick: 0,
//!     data: &catalog,
//!     state: &snapshot,
//!     cooldowns: &cooldowns,
//!     income: &income,
//!     ledger: &mut ledger,
//!     commands: &mut commands,
//!     events: &mut events,
//! };
//!
//! // Command issued, order not fulfilled yet
//! assert_eq!(order.execute(&mut ctx).unwrap(), false);
//! assert_eq!(commands.len(), 1);
//! ```

use crate::models::game_data::{DataError, GameData};
use thiserror::Error;

pub mod admission;
pub mod context;
pub mod order;
pub mod projector;
pub mod reservation;
pub mod resolver;

pub use admission::{QueueAdmission, QUEUE_PROGRESS_THRESHOLD};
pub use context::TickContext;
pub use order::{ProductionOrder, DEFAULT_TARGET_COUNT};
pub use projector::CompletionProjector;
pub use reservation::{estimate_wait_seconds, seconds_until_ready};
pub use resolver::resolve_producers;

/// Errors that abort an order's start or the current tick
///
/// Waiting on producers, resources or cooldowns is not an error.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum ProductionError {
    #[error("Invalid game data: {0}")]
    Data(#[from] DataError),

    #[error("Order {order_id} was executed before start")]
    NotStarted { order_id: String },
}

/// Tick lifecycle shared by everything the tick runner polls
pub trait Act {
    /// Stable identifier used in events and logs
    fn id(&self) -> &str;

    /// Bind the act to static game data
    ///
    /// Configuration errors surface here, before the first tick.
    fn start(&mut self, data: &dyn GameData) -> Result<(), ProductionError>;

    /// Poll the act for one tick
    ///
    /// Returns `Ok(true)` once the act is fulfilled and `Ok(false)` while it
    /// still needs to be polled.
    fn execute(&mut self, ctx: &mut TickContext<'_>) -> Result<bool, ProductionError>;
}
