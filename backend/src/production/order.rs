//! Production order: keeps one unit kind topped up to a target count
//!
//! # Decision Logic
//!
//! Each tick:
//! 1. If the projected count reaches the target → **fulfilled** (no action)
//! 2. If a producer is ready and the cost is affordable → issue one command
//!    on the first eligible producer and stop
//! 3. Priority order, nothing issued in step 2 → **reserve** the cost
//! 4. Priority order, not affordable or no ready producer:
//!    - a producer is under construction → reserve if income will not fund
//!      the order before the producer finishes
//!    - otherwise an idle producer exists → reserve
//!
//! A producer is eligible when it is ready, grounded, has not acted this
//! tick, passes [`QueueAdmission`] and is off cooldown for the ability.
//!
//! The idle-producer reservation in step 4 holds the full cost even when a
//! previous order is partly funded. It over-reserves; reserving
//! incrementally while the previous order completes would be tighter.

use super::admission::QueueAdmission;
use super::context::TickContext;
use super::projector::CompletionProjector;
use super::reservation::{estimate_wait_seconds, funds_lag_producer, seconds_until_ready};
use super::resolver::resolve_producers;
use super::{Act, ProductionError};
use crate::models::event::Event;
use crate::models::game_data::{Cost, GameData};
use crate::models::state::StateView;
use crate::models::unit::Unit;
use crate::models::unit_type::{AbilityId, UnitTypeId};
use log::info;
use uuid::Uuid;

/// Target used when an order should never complete on its own
pub const DEFAULT_TARGET_COUNT: u32 = 9999;

/// Creation ability and cost resolved at start
#[derive(Debug, Clone, Copy, PartialEq)]
struct Binding {
    ability: AbilityId,
    cost: Cost,
}

/// Single-kind production order
///
/// # Example
///
/// ```
/// use production_scheduler_core::production::{Act, ProductionOrder};
/// use production_scheduler_core::{UnitCatalog, UnitTypeId};
///
/// // Keep 22 workers, reserving ahead of other orders
/// let mut order = ProductionOrder::new(UnitTypeId::Scv, UnitTypeId::CommandCenter, 22)
///     .with_priority(true);
/// order.start(&UnitCatalog::builtin()).unwrap();
/// assert!(order.is_started());
/// ```
#[derive(Debug, Clone)]
pub struct ProductionOrder {
    id: String,
    unit_type: UnitTypeId,
    producer_type: UnitTypeId,
    target_count: u32,
    priority: bool,
    admission: QueueAdmission,
    binding: Option<Binding>,
}

impl ProductionOrder {
    /// Create an order for `target_count` units of `unit_type` from `producer_type`
    ///
    /// Defaults: not priority, queuing ahead allowed.
    pub fn new(unit_type: UnitTypeId, producer_type: UnitTypeId, target_count: u32) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            unit_type,
            producer_type,
            target_count,
            priority: false,
            admission: QueueAdmission::new(true),
            binding: None,
        }
    }

    /// May reserve resources ahead of availability
    pub fn with_priority(mut self, priority: bool) -> Self {
        self.priority = priority;
        self
    }

    /// May a producer hold more than one pending order
    pub fn with_allow_queue(mut self, allow_queue: bool) -> Self {
        self.admission = QueueAdmission::new(allow_queue);
        self
    }

    /// Replace the generated identifier
    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = id.into();
        self
    }

    pub fn unit_type(&self) -> UnitTypeId {
        self.unit_type
    }

    pub fn producer_type(&self) -> UnitTypeId {
        self.producer_type
    }

    pub fn target_count(&self) -> u32 {
        self.target_count
    }

    pub fn priority(&self) -> bool {
        self.priority
    }

    pub fn allow_queue(&self) -> bool {
        self.admission.allow_queue()
    }

    pub fn is_started(&self) -> bool {
        self.binding.is_some()
    }

    /// Cost of one order, once started
    pub fn cost(&self) -> Option<Cost> {
        self.binding.map(|b| b.cost)
    }

    fn binding(&self) -> Result<Binding, ProductionError> {
        self.binding.ok_or_else(|| ProductionError::NotStarted {
            order_id: self.id.clone(),
        })
    }

    /// Live entities that can produce this order's unit
    pub fn producers<'s>(&self, state: &'s dyn StateView) -> Vec<&'s Unit> {
        resolve_producers(state, self.producer_type)
    }

    /// Projected count: live units plus production already underway
    pub fn get_count(&self, state: &dyn StateView) -> Result<u32, ProductionError> {
        let binding = self.binding()?;
        let producers = self.producers(state);
        Ok(CompletionProjector::new(self.unit_type, binding.ability)
            .projected_count(state, &producers))
    }

    /// Whether the projected count has reached the target
    pub fn is_done(&self, state: &dyn StateView) -> Result<bool, ProductionError> {
        Ok(self.get_count(state)? >= self.target_count)
    }

    /// Whether `producer` may accept one more command from this order
    pub fn has_order_ready(&self, producer: &Unit, state: &dyn StateView) -> bool {
        self.admission.has_order_ready(producer, state)
    }

    /// Try to issue the production command on the first eligible producer
    fn try_issue(
        &self,
        ctx: &mut TickContext<'_>,
        producers: &[&Unit],
        binding: Binding,
    ) -> bool {
        let state = ctx.state;
        for producer in producers.iter().filter(|p| p.is_ready) {
            if !self.has_order_ready(producer, state) || producer.is_flying {
                continue;
            }
            if ctx.commands.already_acted(producer.tag) {
                continue;
            }
            if !ctx.cooldowns.is_ready(producer.tag, binding.ability) {
                continue;
            }
            if ctx.commands.train(producer.tag, self.unit_type, binding.ability) {
                ctx.ledger.spend(&binding.cost);
                let event = Event::UnitQueued {
                    tick: ctx.tick,
                    order_id: self.id.clone(),
                    unit_type: self.unit_type,
                    producer_type: self.producer_type,
                    producer: producer.tag,
                    position: producer.position,
                };
                info!("{}", event);
                ctx.events.log(event);
                return true;
            }
        }
        false
    }

    /// Reservation branch when the order cannot even try to issue a command
    fn reserve_ahead(
        &self,
        ctx: &mut TickContext<'_>,
        producers: &[&Unit],
        cost: Cost,
    ) -> Result<(), ProductionError> {
        if let Some(until_ready) = seconds_until_ready(producers, ctx.data)? {
            let wait = estimate_wait_seconds(&cost, ctx.income);
            if funds_lag_producer(wait, until_ready) {
                ctx.ledger.reserve(cost.minerals, cost.vespene);
            }
        } else if producers.iter().any(|p| p.is_idle()) {
            ctx.ledger.reserve(cost.minerals, cost.vespene);
        }
        Ok(())
    }
}

impl Act for ProductionOrder {
    fn id(&self) -> &str {
        &self.id
    }

    fn start(&mut self, data: &dyn GameData) -> Result<(), ProductionError> {
        let ability = data.creation_ability(self.unit_type)?;
        let cost = data.ability_cost(ability)?;
        // Until-ready estimates look these up mid-tick
        data.build_time(self.producer_type)?;
        for &form in self.producer_type.upgraded_forms() {
            data.build_time(form)?;
        }
        self.binding = Some(Binding { ability, cost });
        Ok(())
    }

    fn execute(&mut self, ctx: &mut TickContext<'_>) -> Result<bool, ProductionError> {
        let binding = self.binding()?;
        let state = ctx.state;

        if self.is_done(state)? {
            return Ok(true);
        }

        let producers = self.producers(state);
        let any_ready = producers.iter().any(|p| p.is_ready);

        if any_ready && ctx.ledger.can_afford(&binding.cost) {
            if self.try_issue(ctx, &producers, binding) {
                return Ok(false);
            }
            if self.priority {
                // Producers are busy, not missing: hold the funds for them
                ctx.ledger.reserve(binding.cost.minerals, binding.cost.vespene);
            }
        } else if self.priority {
            self.reserve_ahead(ctx, &producers, binding.cost)?;
        }

        Ok(false)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::command::CommandBuffer;
    use crate::models::cooldown::CooldownBook;
    use crate::models::event::EventLog;
    use crate::models::game_data::{DataError, UnitCatalog};
    use crate::models::income::FixedIncome;
    use crate::models::ledger::Ledger;
    use crate::models::state::GameSnapshot;
    use crate::models::unit_type::Race;

    struct Harness {
        catalog: UnitCatalog,
        cooldowns: CooldownBook,
        income: FixedIncome,
        ledger: Ledger,
        commands: CommandBuffer,
        events: EventLog,
    }

    impl Harness {
        fn new(minerals: i64, vespene: i64) -> Self {
            Self {
                catalog: UnitCatalog::builtin(),
                cooldowns: CooldownBook::new(),
                income: FixedIncome::default(),
                ledger: Ledger::new(minerals, vespene, 200),
                commands: CommandBuffer::new(),
                events: EventLog::new(),
            }
        }

        fn run(&mut self, order: &mut ProductionOrder, snapshot: &GameSnapshot) -> bool {
            let mut ctx = TickContext {
                tick: 0,
                data: &self.catalog,
                state: snapshot,
                cooldowns: &self.cooldowns,
                income: &self.income,
                ledger: &mut self.ledger,
                commands: &mut self.commands,
                events: &mut self.events,
            };
            order.execute(&mut ctx).unwrap()
        }
    }

    fn started(order: ProductionOrder) -> ProductionOrder {
        let mut order = order;
        order.start(&UnitCatalog::builtin()).unwrap();
        order
    }

    #[test]
    fn test_defaults() {
        let order =
            ProductionOrder::new(UnitTypeId::Marine, UnitTypeId::Barracks, DEFAULT_TARGET_COUNT);
        assert!(!order.priority());
        assert!(order.allow_queue());
        assert!(!order.is_started());
        assert_eq!(order.cost(), None);
    }

    #[test]
    fn test_start_rejects_unit_without_creation_ability() {
        let mut order = ProductionOrder::new(UnitTypeId::Barracks, UnitTypeId::Scv, 1);
        let err = order.start(&UnitCatalog::builtin()).unwrap_err();
        assert!(matches!(err, ProductionError::Data(_)));
        assert!(!order.is_started());
    }

    #[test]
    fn test_start_requires_build_time_of_every_producer_form() {
        let mut catalog = UnitCatalog::builtin();
        catalog.remove(UnitTypeId::PlanetaryFortress);

        let mut order = ProductionOrder::new(UnitTypeId::Scv, UnitTypeId::CommandCenter, 20);
        assert_eq!(
            order.start(&catalog),
            Err(ProductionError::Data(DataError::MissingUnitData {
                unit_type: UnitTypeId::PlanetaryFortress
            }))
        );
        assert!(!order.is_started());
    }

    #[test]
    fn test_execute_before_start_is_error() {
        let mut order =
            ProductionOrder::new(UnitTypeId::Marine, UnitTypeId::Barracks, 1).with_id("m");
        let mut harness = Harness::new(50, 0);
        let snapshot = GameSnapshot::new(Race::Terran);
        let mut ctx = TickContext {
            tick: 0,
            data: &harness.catalog,
            state: &snapshot,
            cooldowns: &harness.cooldowns,
            income: &harness.income,
            ledger: &mut harness.ledger,
            commands: &mut harness.commands,
            events: &mut harness.events,
        };
        assert_eq!(
            order.execute(&mut ctx),
            Err(ProductionError::NotStarted {
                order_id: "m".to_string()
            })
        );
    }

    #[test]
    fn test_flying_producer_skipped() {
        let mut order = started(ProductionOrder::new(UnitTypeId::Marine, UnitTypeId::Barracks, 5));
        let snapshot = GameSnapshot::new(Race::Terran)
            .with_unit(Unit::new(1, UnitTypeId::BarracksFlying).flying())
            .with_unit(Unit::new(2, UnitTypeId::Barracks));
        let mut harness = Harness::new(100, 0);

        assert!(!harness.run(&mut order, &snapshot));
        assert_eq!(harness.commands.commands()[0].target(), 2);
    }

    #[test]
    fn test_issued_command_spends_and_logs() {
        let mut order = started(
            ProductionOrder::new(UnitTypeId::Marauder, UnitTypeId::Barracks, 5)
                .with_id("marauders"),
        );
        let snapshot = GameSnapshot::new(Race::Terran)
            .with_unit(Unit::new(1, UnitTypeId::Barracks).at(40.0, 22.5));
        let mut harness = Harness::new(100, 25);

        harness.run(&mut order, &snapshot);

        assert_eq!(harness.ledger.minerals(), 0);
        assert_eq!(harness.ledger.vespene(), 0);
        assert_eq!(harness.events.len(), 1);
        assert_eq!(
            harness.events.events()[0].to_string(),
            "Marauder from Barracks at (40.0, 22.5)"
        );
        assert_eq!(harness.events.events_for_order("marauders").len(), 1);
    }

    #[test]
    fn test_cooldown_blocks_producer() {
        let mut order = started(ProductionOrder::new(UnitTypeId::Marine, UnitTypeId::Barracks, 5));
        let snapshot = GameSnapshot::new(Race::Terran)
            .with_unit(Unit::new(1, UnitTypeId::Barracks))
            .with_unit(Unit::new(2, UnitTypeId::Barracks));
        let mut harness = Harness::new(100, 0);
        harness.cooldowns.record_use(1, AbilityId::TrainMarine, 10);

        harness.run(&mut order, &snapshot);
        assert_eq!(harness.commands.commands()[0].target(), 2);
    }
}
