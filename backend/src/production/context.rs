//! Per-tick collaborators
//!
//! Everything an order touches during `execute` arrives through this struct.
//! Nothing is global: the tick runner owns the ledger, the command buffer and
//! the event log, and lends them to one order at a time.

use crate::models::command::CommandBuffer;
use crate::models::cooldown::CooldownTracker;
use crate::models::event::EventLog;
use crate::models::game_data::GameData;
use crate::models::income::IncomeEstimator;
use crate::models::ledger::ResourceLedger;
use crate::models::state::StateView;

/// Collaborators lent to an order for one `execute` call
pub struct TickContext<'a> {
    /// Current game loop
    pub tick: usize,

    /// Ability/cost resolver
    pub data: &'a dyn GameData,

    /// Snapshot taken at the start of the tick
    pub state: &'a dyn StateView,

    pub cooldowns: &'a dyn CooldownTracker,

    pub income: &'a dyn IncomeEstimator,

    /// Shared by every order polled this tick
    pub ledger: &'a mut dyn ResourceLedger,

    /// Commands issued this tick and the per-tick dedupe set
    pub commands: &'a mut CommandBuffer,

    /// Status sink
    pub events: &'a mut EventLog,
}
