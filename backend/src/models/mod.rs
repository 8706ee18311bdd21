//! Domain models and collaborator interfaces for the production scheduler

pub mod command;
pub mod cooldown;
pub mod event;
pub mod game_data;
pub mod income;
pub mod ledger;
pub mod state;
pub mod unit;
pub mod unit_type;

// Re-exports
pub use command::{Command, CommandBuffer};
pub use cooldown::{CooldownBook, CooldownTracker};
pub use event::{Event, EventLog};
pub use game_data::{Cost, DataError, GameData, UnitCatalog, UnitData};
pub use income::{FixedIncome, IncomeCalculator, IncomeEstimator};
pub use ledger::{Ledger, ResourceLedger};
pub use state::{GameSnapshot, PlayerResources, StateView};
pub use unit::{Point2, Tag, Unit, UnitOrder};
pub use unit_type::{AbilityId, Race, UnitTypeId};
