//! Orchestrator Engine - owner of the shared per-tick state
//!
//! Polls every active production order once per tick and forwards the
//! commands they issue to the game bridge.
//!
//! # Tick Loop
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │ 1. Sync clock to the snapshot's game loop                   │
//! │ 2. Refresh ledger (drops last tick's reservations)          │
//! │ 3. Sample income, advance cooldowns, clear command buffer   │
//! │ 4. Poll pending orders in configuration order               │
//! │ 5. Drain commands, start cooldowns for issued abilities     │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! Orders are polled in the order they were configured, which decides who
//! gets first claim on a shared producer or on the bank. Fulfilled orders
//! are never polled again.
//!
//! # Example
//!
//! ```rust
//! use production_scheduler_core::orchestrator::{OrchestratorConfig, Orchestrator, OrderConfig};
//! use production_scheduler_core::{
//!     GameSnapshot, PlayerResources, Race, Unit, UnitCatalog, UnitTypeId,
//! };
//!
//! let mut config = OrchestratorConfig::default();
//! config.orders.push(OrderConfig::new(UnitTypeId::Scv, UnitTypeId::CommandCenter, 13));
//!
//! let mut orchestrator = Orchestrator::new(config, UnitCatalog::builtin()).unwrap();
//!
//! let snapshot = GameSnapshot::new(Race::Terran)
//!     .with_unit(Unit::new(1, UnitTypeId::CommandCenter))
//!     .with_resources(PlayerResources {
//!         minerals: 50,
//!         supply_used: 12,
//!         supply_cap: 15,
//!         supply_workers: 12,
//!         ..Default::default()
//!     });
//!
//! let result = orchestrator.tick(&snapshot).unwrap();
//! assert_eq!(result.commands.len(), 1);
//! assert_eq!(result.pending, 1);
//! ```

use crate::core::time::{GameClock, DEFAULT_TICKS_PER_SECOND};
use crate::models::command::{Command, CommandBuffer};
use crate::models::cooldown::CooldownBook;
use crate::models::event::EventLog;
use crate::models::game_data::UnitCatalog;
use crate::models::income::IncomeCalculator;
use crate::models::ledger::Ledger;
use crate::models::state::GameSnapshot;
use crate::models::unit_type::UnitTypeId;
use crate::production::{Act, ProductionError, ProductionOrder, TickContext, DEFAULT_TARGET_COUNT};
use log::debug;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use thiserror::Error;

// ============================================================================
// Configuration Types
// ============================================================================

/// How pending orders share a tick
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PlanMode {
    /// Poll every pending order each tick
    #[default]
    Parallel,

    /// Poll pending orders in turn, stopping at the first that is not fulfilled
    Sequential,
}

/// Configuration of one production order
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderConfig {
    /// Identifier used in events; generated when omitted
    #[serde(default)]
    pub id: Option<String>,

    /// Unit kind to produce
    pub unit_type: UnitTypeId,

    /// Structure kind that produces it
    pub producer_type: UnitTypeId,

    /// Desired total count
    #[serde(default = "default_target_count")]
    pub target_count: u32,

    /// May reserve resources ahead of availability
    #[serde(default)]
    pub priority: bool,

    /// May a producer hold more than one pending order
    #[serde(default = "default_allow_queue")]
    pub allow_queue: bool,
}

fn default_target_count() -> u32 {
    DEFAULT_TARGET_COUNT
}

fn default_allow_queue() -> bool {
    true
}

impl OrderConfig {
    /// Non-priority, queuing order without an explicit id
    pub fn new(unit_type: UnitTypeId, producer_type: UnitTypeId, target_count: u32) -> Self {
        Self {
            id: None,
            unit_type,
            producer_type,
            target_count,
            priority: false,
            allow_queue: true,
        }
    }

    pub fn with_priority(mut self, priority: bool) -> Self {
        self.priority = priority;
        self
    }

    /// Build the (not yet started) order described by this config
    pub fn build(&self) -> ProductionOrder {
        let order = ProductionOrder::new(self.unit_type, self.producer_type, self.target_count)
            .with_priority(self.priority)
            .with_allow_queue(self.allow_queue);
        match &self.id {
            Some(id) => order.with_id(id.clone()),
            None => order,
        }
    }
}

/// Complete orchestrator configuration
///
/// # Fields
///
/// * `ticks_per_second` - Game loops per game second
/// * `income_window_ticks` - Window the income estimate averages over
/// * `command_cooldown_ticks` - Ticks a producer/ability pair stays blocked
///   after a command, until the game reflects it in the order queue
/// * `mode` - How pending orders share a tick
/// * `orders` - Orders in polling order
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OrchestratorConfig {
    pub ticks_per_second: f64,
    pub income_window_ticks: usize,
    pub command_cooldown_ticks: usize,
    pub mode: PlanMode,
    pub orders: Vec<OrderConfig>,
}

impl Default for OrchestratorConfig {
    fn default() -> Self {
        Self {
            ticks_per_second: DEFAULT_TICKS_PER_SECOND,
            income_window_ticks: 224, // ten game seconds
            command_cooldown_ticks: 2,
            mode: PlanMode::Parallel,
            orders: Vec::new(),
        }
    }
}

impl OrchestratorConfig {
    /// Parse a configuration document, filling omitted fields with defaults
    pub fn from_json_str(json: &str) -> Result<Self, SimulationError> {
        serde_json::from_str(json).map_err(|e| SimulationError::ConfigParse(e.to_string()))
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<(), SimulationError> {
        if !(self.ticks_per_second.is_finite() && self.ticks_per_second > 0.0) {
            return Err(SimulationError::InvalidConfig(
                "ticks_per_second must be > 0".to_string(),
            ));
        }

        if self.income_window_ticks == 0 {
            return Err(SimulationError::InvalidConfig(
                "income_window_ticks must be > 0".to_string(),
            ));
        }

        // Check for duplicate order IDs
        let mut ids = HashSet::new();
        for order in &self.orders {
            if let Some(id) = &order.id {
                if !ids.insert(id) {
                    return Err(SimulationError::InvalidConfig(format!(
                        "Duplicate order ID: {}",
                        id
                    )));
                }
            }
        }

        Ok(())
    }
}

// ============================================================================
// Results and Errors
// ============================================================================

/// Result of a single tick
#[derive(Debug, Clone, PartialEq)]
pub struct TickResult {
    /// Tick the result belongs to
    pub tick: usize,

    /// Commands to forward to the game, in issue order
    pub commands: Vec<Command>,

    /// Number of reservations placed this tick
    pub reservations: usize,

    /// Total reserved this tick as (minerals, vespene)
    pub reserved: (i64, i64),

    /// Orders that became fulfilled this tick
    pub completed: usize,

    /// Orders polled this tick that are still pending
    pub pending: usize,
}

/// Simulation error types
#[derive(Debug, Clone, Error, PartialEq)]
pub enum SimulationError {
    /// Configuration validation error
    #[error("Invalid config: {0}")]
    InvalidConfig(String),

    /// Configuration document could not be parsed
    #[error("Config parse error: {0}")]
    ConfigParse(String),

    /// An order failed to start or to execute
    #[error("Order {order_id} failed: {source}")]
    Order {
        order_id: String,
        #[source]
        source: ProductionError,
    },
}

// ============================================================================
// Orchestrator
// ============================================================================

struct ActSlot {
    act: Box<dyn Act>,
    fulfilled: bool,
}

/// Owns every production order and the state they share
pub struct Orchestrator {
    config: OrchestratorConfig,
    catalog: UnitCatalog,
    acts: Vec<ActSlot>,
    clock: GameClock,
    ledger: Ledger,
    cooldowns: CooldownBook,
    income: IncomeCalculator,
    commands: CommandBuffer,
    event_log: EventLog,
}

impl Orchestrator {
    /// Create an orchestrator and start every configured order
    ///
    /// # Returns
    ///
    /// * `Ok(Orchestrator)` - Every order resolved its ability and cost
    /// * `Err(SimulationError)` - Invalid configuration or malformed order
    pub fn new(config: OrchestratorConfig, catalog: UnitCatalog) -> Result<Self, SimulationError> {
        config.validate()?;

        let mut orchestrator = Self {
            clock: GameClock::new(config.ticks_per_second),
            income: IncomeCalculator::new(config.income_window_ticks),
            catalog,
            acts: Vec::new(),
            ledger: Ledger::default(),
            cooldowns: CooldownBook::new(),
            commands: CommandBuffer::new(),
            event_log: EventLog::new(),
            config,
        };

        let orders: Vec<ProductionOrder> =
            orchestrator.config.orders.iter().map(OrderConfig::build).collect();
        for order in orders {
            orchestrator.add_act(order)?;
        }

        Ok(orchestrator)
    }

    /// Start `act` and append it to the polling order
    pub fn add_act<A: Act + 'static>(&mut self, mut act: A) -> Result<(), SimulationError> {
        act.start(&self.catalog).map_err(|source| SimulationError::Order {
            order_id: act.id().to_string(),
            source,
        })?;
        self.acts.push(ActSlot {
            act: Box::new(act),
            fulfilled: false,
        });
        Ok(())
    }

    // ========================================================================
    // Accessors
    // ========================================================================

    pub fn config(&self) -> &OrchestratorConfig {
        &self.config
    }

    pub fn current_tick(&self) -> usize {
        self.clock.current_tick()
    }

    pub fn ledger(&self) -> &Ledger {
        &self.ledger
    }

    pub fn cooldowns(&self) -> &CooldownBook {
        &self.cooldowns
    }

    pub fn income(&self) -> &IncomeCalculator {
        &self.income
    }

    pub fn event_log(&self) -> &EventLog {
        &self.event_log
    }

    /// Number of orders, fulfilled ones included
    pub fn num_acts(&self) -> usize {
        self.acts.len()
    }

    pub fn fulfilled_count(&self) -> usize {
        self.acts.iter().filter(|slot| slot.fulfilled).count()
    }

    /// Every order is fulfilled
    pub fn is_complete(&self) -> bool {
        self.acts.iter().all(|slot| slot.fulfilled)
    }

    // ========================================================================
    // Tick Loop
    // ========================================================================

    /// Run one tick against `snapshot`
    pub fn tick(&mut self, snapshot: &GameSnapshot) -> Result<TickResult, SimulationError> {
        self.clock.sync_to(snapshot.game_loop);
        let tick = self.clock.current_tick();

        self.ledger.refresh(&snapshot.player);
        self.income.record(
            &self.clock,
            tick,
            snapshot.player.collected_minerals,
            snapshot.player.collected_vespene,
        );
        self.cooldowns.advance_to(tick);
        self.cooldowns.prune();
        self.commands.clear();

        let mut completed = 0;
        let mut pending = 0;

        for slot in self.acts.iter_mut().filter(|slot| !slot.fulfilled) {
            let mut ctx = TickContext {
                tick,
                data: &self.catalog,
                state: snapshot,
                cooldowns: &self.cooldowns,
                income: &self.income,
                ledger: &mut self.ledger,
                commands: &mut self.commands,
                events: &mut self.event_log,
            };

            let done = slot
                .act
                .execute(&mut ctx)
                .map_err(|source| SimulationError::Order {
                    order_id: slot.act.id().to_string(),
                    source,
                })?;

            if done {
                slot.fulfilled = true;
                completed += 1;
            } else {
                pending += 1;
                if self.config.mode == PlanMode::Sequential {
                    break;
                }
            }
        }

        let commands = self.commands.drain();
        for command in &commands {
            match command {
                Command::Train {
                    producer, ability, ..
                } => self
                    .cooldowns
                    .record_use(*producer, *ability, self.config.command_cooldown_ticks),
            }
        }

        let result = TickResult {
            tick,
            commands,
            reservations: self.ledger.reservation_count(),
            reserved: self.ledger.reserved(),
            completed,
            pending,
        };

        debug!(
            "tick {}: {} command(s), {} reservation(s), {} pending, {} completed",
            tick,
            result.commands.len(),
            result.reservations,
            result.pending,
            result.completed
        );

        self.clock.advance_tick();
        Ok(result)
    }
}
