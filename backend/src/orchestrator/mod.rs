//! Orchestrator - per-tick driver for production orders
//!
//! See `engine.rs` for the tick loop.

pub mod engine;

pub use engine::{
    Orchestrator, OrchestratorConfig, OrderConfig, PlanMode, SimulationError, TickResult,
};
