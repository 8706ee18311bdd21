//! Production order scenarios
//!
//! Drives a single `ProductionOrder` through one tick at a time against
//! hand-built snapshots, checking issued commands and reservations.

use production_scheduler_core::{
    AbilityId, Act, Command, CommandBuffer, CooldownBook, Cost, DataError, EventLog, FixedIncome,
    GameSnapshot, Ledger, PlayerResources, ProductionError, ProductionOrder, Race, TickContext,
    Unit, UnitCatalog, UnitData, UnitOrder, UnitTypeId,
};

/// Shared tick state owned by the test instead of an orchestrator
struct Bank {
    catalog: UnitCatalog,
    cooldowns: CooldownBook,
    income: FixedIncome,
    ledger: Ledger,
    commands: CommandBuffer,
    events: EventLog,
}

impl Bank {
    fn new(minerals: i64, vespene: i64) -> Self {
        Self {
            catalog: UnitCatalog::builtin(),
            cooldowns: CooldownBook::new(),
            income: FixedIncome::default(),
            ledger: Ledger::new(minerals, vespene, 100),
            commands: CommandBuffer::new(),
            events: EventLog::new(),
        }
    }

    fn with_income(mut self, minerals: f64, vespene: f64) -> Self {
        self.income = FixedIncome::new(minerals, vespene);
        self
    }

    fn with_catalog(mut self, catalog: UnitCatalog) -> Self {
        self.catalog = catalog;
        self
    }

    fn start(&self, order: &mut ProductionOrder) {
        order.start(&self.catalog).unwrap();
    }

    fn execute(
        &mut self,
        order: &mut ProductionOrder,
        snapshot: &GameSnapshot,
    ) -> Result<bool, ProductionError> {
        let mut ctx = TickContext {
            tick: snapshot.game_loop,
            data: &self.catalog,
            state: snapshot,
            cooldowns: &self.cooldowns,
            income: &self.income,
            ledger: &mut self.ledger,
            commands: &mut self.commands,
            events: &mut self.events,
        };
        order.execute(&mut ctx)
    }
}

fn terran() -> GameSnapshot {
    GameSnapshot::new(Race::Terran)
}

fn trained_on(commands: &[Command]) -> Vec<u64> {
    commands.iter().map(Command::target).collect()
}

#[test]
fn test_done_order_issues_nothing() {
    let mut bank = Bank::new(1000, 0);
    let mut order =
        ProductionOrder::new(UnitTypeId::Marine, UnitTypeId::Barracks, 2).with_priority(true);
    bank.start(&mut order);

    let snapshot = terran()
        .with_unit(Unit::new(1, UnitTypeId::Barracks))
        .with_unit(Unit::new(2, UnitTypeId::Marine))
        .with_unit(Unit::new(3, UnitTypeId::Marine));

    assert!(bank.execute(&mut order, &snapshot).unwrap());
    assert!(bank.commands.is_empty());
    assert_eq!(bank.ledger.reservation_count(), 0);
}

#[test]
fn test_queued_marine_counts_toward_target() {
    let mut bank = Bank::new(1000, 0);
    let mut order = ProductionOrder::new(UnitTypeId::Marine, UnitTypeId::Barracks, 2);
    bank.start(&mut order);

    let snapshot = terran()
        .with_unit(Unit::new(1, UnitTypeId::Barracks).with_order(AbilityId::TrainMarine, 0.2))
        .with_unit(Unit::new(2, UnitTypeId::Marine));

    assert!(bank.execute(&mut order, &snapshot).unwrap());
}

#[test]
fn test_single_unit_order_done_once_game_shows_queue() {
    let mut bank = Bank::new(1000, 0);
    let mut order = ProductionOrder::new(UnitTypeId::Marine, UnitTypeId::Barracks, 1);
    bank.start(&mut order);

    let mut snapshot = terran().with_unit(Unit::new(1, UnitTypeId::Barracks));
    assert!(!bank.execute(&mut order, &snapshot).unwrap());
    assert_eq!(trained_on(bank.commands.commands()), vec![1]);

    // Next tick: the barracks now carries the marine in its queue
    bank.commands.clear();
    snapshot = snapshot.at_loop(1);
    if let Some(barracks) = snapshot.unit_mut(1) {
        barracks.orders.push(UnitOrder::new(AbilityId::TrainMarine, 0.0));
    }

    assert!(bank.execute(&mut order, &snapshot).unwrap());
    assert!(bank.commands.is_empty());
    assert_eq!(bank.events.len(), 1);
}

#[test]
fn test_one_command_per_call_across_idle_producers() {
    let mut bank = Bank::new(1000, 0);
    let mut order = ProductionOrder::new(UnitTypeId::Marine, UnitTypeId::Barracks, 10);
    bank.start(&mut order);

    let snapshot = terran()
        .with_unit(Unit::new(1, UnitTypeId::Barracks))
        .with_unit(Unit::new(2, UnitTypeId::Barracks))
        .with_unit(Unit::new(3, UnitTypeId::Barracks));

    assert!(!bank.execute(&mut order, &snapshot).unwrap());
    assert_eq!(trained_on(bank.commands.commands()), vec![1]);
    assert_eq!(bank.ledger.minerals(), 950);

    // Same tick, next call: producer 1 already acted
    assert!(!bank.execute(&mut order, &snapshot).unwrap());
    assert_eq!(trained_on(bank.commands.commands()), vec![1, 2]);
    assert_eq!(bank.events.len(), 2);
}

#[test]
fn test_non_priority_never_reserves() {
    let mut bank = Bank::new(0, 0).with_income(10.0, 0.0);
    let mut order = ProductionOrder::new(UnitTypeId::Marine, UnitTypeId::Barracks, 10);
    bank.start(&mut order);

    let snapshot = terran()
        .with_unit(Unit::new(1, UnitTypeId::Barracks))
        .with_unit(Unit::new(2, UnitTypeId::Barracks).under_construction(0.9));

    assert!(!bank.execute(&mut order, &snapshot).unwrap());
    assert!(bank.commands.is_empty());
    assert_eq!(bank.ledger.reservation_count(), 0);
}

#[test]
fn test_priority_reserves_when_funds_lag_construction() {
    // Marine at 50/50, barracks builds in 10s
    let mut catalog = UnitCatalog::new();
    catalog.insert(
        UnitTypeId::Marine,
        UnitData {
            creation_ability: Some(AbilityId::TrainMarine),
            cost: Cost::new(50, 50, 1),
            build_time: 18.0,
        },
    );
    catalog.insert(
        UnitTypeId::Barracks,
        UnitData {
            creation_ability: None,
            cost: Cost::new(150, 0, 0),
            build_time: 10.0,
        },
    );

    let mut bank = Bank::new(0, 0).with_catalog(catalog).with_income(10.0, 10.0);
    let mut order =
        ProductionOrder::new(UnitTypeId::Marine, UnitTypeId::Barracks, 5).with_priority(true);
    bank.start(&mut order);

    // Three seconds of construction left, five seconds of income needed
    let snapshot = terran().with_unit(Unit::new(1, UnitTypeId::Barracks).under_construction(0.7));

    assert!(!bank.execute(&mut order, &snapshot).unwrap());
    assert!(bank.commands.is_empty());
    assert_eq!(bank.ledger.reservation_count(), 1);
    assert_eq!(bank.ledger.reserved(), (50, 50));
}

#[test]
fn test_priority_skips_reservation_when_funds_arrive_first() {
    let mut bank = Bank::new(0, 0).with_income(10.0, 1.0);
    let mut order =
        ProductionOrder::new(UnitTypeId::Marauder, UnitTypeId::Barracks, 5).with_priority(true);
    bank.start(&mut order);

    // 11.5s of construction left, 10s until the minerals are in
    let snapshot = terran().with_unit(Unit::new(1, UnitTypeId::Barracks).under_construction(0.75));

    assert!(!bank.execute(&mut order, &snapshot).unwrap());
    assert_eq!(bank.ledger.reservation_count(), 0);

    // 5.75s left: funding now lags the producer
    let snapshot = terran().with_unit(Unit::new(1, UnitTypeId::Barracks).under_construction(0.875));
    assert!(!bank.execute(&mut order, &snapshot).unwrap());
    assert_eq!(bank.ledger.reserved(), (100, 25));
}

#[test]
fn test_priority_reserves_for_idle_producer_when_broke() {
    let mut bank = Bank::new(20, 0);
    let mut order =
        ProductionOrder::new(UnitTypeId::Marine, UnitTypeId::Barracks, 5).with_priority(true);
    bank.start(&mut order);

    let snapshot = terran().with_unit(Unit::new(1, UnitTypeId::Barracks));

    assert!(!bank.execute(&mut order, &snapshot).unwrap());
    assert!(bank.commands.is_empty());
    assert_eq!(bank.ledger.reservation_count(), 1);
    assert_eq!(bank.ledger.free_minerals(), -30);
}

#[test]
fn test_priority_without_any_producer_does_nothing() {
    let mut bank = Bank::new(0, 0);
    let mut order =
        ProductionOrder::new(UnitTypeId::Marine, UnitTypeId::Barracks, 5).with_priority(true);
    bank.start(&mut order);

    assert!(!bank.execute(&mut order, &terran()).unwrap());
    assert_eq!(bank.ledger.reservation_count(), 0);
}

#[test]
fn test_reactor_admits_second_order_behind_nearly_done_one() {
    let mut bank = Bank::new(1000, 0);
    let mut order = ProductionOrder::new(UnitTypeId::Marine, UnitTypeId::Barracks, 20);
    bank.start(&mut order);

    let barracks = Unit::new(1, UnitTypeId::Barracks)
        .with_add_on(50)
        .with_order(AbilityId::TrainMarine, 0.95)
        .with_order(AbilityId::TrainMarine, 0.2);
    let snapshot = terran()
        .with_unit(barracks)
        .with_unit(Unit::new(50, UnitTypeId::BarracksReactor));

    assert!(!bank.execute(&mut order, &snapshot).unwrap());
    assert_eq!(trained_on(bank.commands.commands()), vec![1]);
}

#[test]
fn test_tech_lab_does_not_extend_capacity() {
    let mut bank = Bank::new(1000, 0);
    let mut order = ProductionOrder::new(UnitTypeId::Marine, UnitTypeId::Barracks, 20);
    bank.start(&mut order);

    let snapshot = terran()
        .with_unit(
            Unit::new(1, UnitTypeId::Barracks)
                .with_add_on(50)
                .with_order(AbilityId::TrainMarine, 0.5),
        )
        .with_unit(Unit::new(50, UnitTypeId::BarracksTechLab));

    assert!(!bank.execute(&mut order, &snapshot).unwrap());
    assert!(bank.commands.is_empty());
}

#[test]
fn test_producer_that_already_acted_is_skipped() {
    let mut bank = Bank::new(1000, 0);
    bank.commands.mark_acted(1);
    let mut order = ProductionOrder::new(UnitTypeId::Marine, UnitTypeId::Barracks, 20);
    bank.start(&mut order);

    let snapshot = terran()
        .with_unit(Unit::new(1, UnitTypeId::Barracks))
        .with_unit(Unit::new(2, UnitTypeId::Barracks));

    assert!(!bank.execute(&mut order, &snapshot).unwrap());
    assert_eq!(trained_on(bank.commands.commands()), vec![2]);
}

#[test]
fn test_priority_with_busy_producers_reserves_once() {
    let mut bank = Bank::new(500, 0);
    let mut order = ProductionOrder::new(UnitTypeId::Marine, UnitTypeId::Barracks, 20)
        .with_priority(true)
        .with_allow_queue(false);
    bank.start(&mut order);

    let snapshot = terran()
        .with_unit(Unit::new(1, UnitTypeId::Barracks).with_order(AbilityId::TrainMarine, 0.95))
        .with_unit(Unit::new(2, UnitTypeId::Barracks).with_order(AbilityId::TrainMarine, 0.3));

    assert!(!bank.execute(&mut order, &snapshot).unwrap());
    assert!(bank.commands.is_empty());
    assert_eq!(bank.ledger.reservation_count(), 1);
    assert_eq!(bank.ledger.reserved(), (50, 0));
}

#[test]
fn test_flying_producer_is_skipped() {
    let mut bank = Bank::new(1000, 0);
    let mut order = ProductionOrder::new(UnitTypeId::Marine, UnitTypeId::Barracks, 20);
    bank.start(&mut order);

    let snapshot = terran()
        .with_unit(Unit::new(1, UnitTypeId::BarracksFlying).flying())
        .with_unit(Unit::new(2, UnitTypeId::Barracks));

    assert!(!bank.execute(&mut order, &snapshot).unwrap());
    assert_eq!(trained_on(bank.commands.commands()), vec![2]);
}

#[test]
fn test_cooling_down_producer_is_skipped() {
    let mut bank = Bank::new(1000, 0);
    bank.cooldowns.record_use(1, AbilityId::TrainMarine, 2);
    let mut order = ProductionOrder::new(UnitTypeId::Marine, UnitTypeId::Barracks, 20);
    bank.start(&mut order);

    let snapshot = terran()
        .with_unit(Unit::new(1, UnitTypeId::Barracks))
        .with_unit(Unit::new(2, UnitTypeId::Barracks));

    assert!(!bank.execute(&mut order, &snapshot).unwrap());
    assert_eq!(trained_on(bank.commands.commands()), vec![2]);
}

#[test]
fn test_workers_from_orbital_and_fortress() {
    let mut bank = Bank::new(1000, 0);
    let mut order = ProductionOrder::new(UnitTypeId::Scv, UnitTypeId::CommandCenter, 30);
    bank.start(&mut order);

    let snapshot = terran()
        .with_unit(Unit::new(1, UnitTypeId::OrbitalCommand))
        .with_unit(Unit::new(2, UnitTypeId::PlanetaryFortress))
        .with_resources(PlayerResources {
            minerals: 1000,
            supply_used: 20,
            supply_cap: 30,
            supply_workers: 20,
            ..Default::default()
        });

    bank.execute(&mut order, &snapshot).unwrap();
    bank.execute(&mut order, &snapshot).unwrap();
    assert_eq!(trained_on(bank.commands.commands()), vec![1, 2]);
}

#[test]
fn test_supply_blocked_order_waits() {
    let mut bank = Bank::new(1000, 0);
    bank.ledger = Ledger::new(1000, 0, 0);
    let mut order = ProductionOrder::new(UnitTypeId::Marine, UnitTypeId::Barracks, 20);
    bank.start(&mut order);

    let snapshot = terran().with_unit(Unit::new(1, UnitTypeId::Barracks));

    assert!(!bank.execute(&mut order, &snapshot).unwrap());
    assert!(bank.commands.is_empty());
}

#[test]
fn test_execute_before_start_is_error() {
    let mut bank = Bank::new(1000, 0);
    let mut order =
        ProductionOrder::new(UnitTypeId::Marine, UnitTypeId::Barracks, 20).with_id("early");

    let err = bank.execute(&mut order, &terran()).unwrap_err();
    assert_eq!(
        err,
        ProductionError::NotStarted {
            order_id: "early".to_string()
        }
    );
}

#[test]
fn test_structure_order_fails_to_start() {
    let catalog = UnitCatalog::builtin();
    let mut order = ProductionOrder::new(UnitTypeId::Barracks, UnitTypeId::Scv, 1);

    assert_eq!(
        order.start(&catalog),
        Err(ProductionError::Data(DataError::MissingCreationAbility {
            unit_type: UnitTypeId::Barracks
        }))
    );
}
