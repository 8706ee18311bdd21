//! Reservation estimates for priority orders
//!
//! A priority order that cannot act yet compares two durations: how long
//! income needs to fund the order, and how long until a producer finishes
//! construction. If funding will not arrive before the producer does, the
//! cost is reserved now so other orders cannot spend it in the meantime.

use crate::models::game_data::{Cost, DataError, GameData};
use crate::models::income::IncomeEstimator;
use crate::models::unit::Unit;

/// Seconds of income needed to fund `cost`
///
/// The minimum of the per-resource waits. A resource that is not needed, or
/// that has no income, contributes a wait of zero rather than an unbounded
/// one.
///
/// # Example
/// ```
/// use production_scheduler_core::production::estimate_wait_seconds;
/// use production_scheduler_core::{Cost, FixedIncome};
///
/// let income = FixedIncome::new(10.0, 4.0);
/// assert_eq!(estimate_wait_seconds(&Cost::new(150, 100, 3), &income), 15.0);
/// // No gas needed: the gas wait is zero, so the minimum is zero
/// assert_eq!(estimate_wait_seconds(&Cost::new(150, 0, 2), &income), 0.0);
/// ```
pub fn estimate_wait_seconds(cost: &Cost, income: &dyn IncomeEstimator) -> f64 {
    let mineral_wait = wait_for(cost.minerals, income.mineral_income());
    let gas_wait = wait_for(cost.vespene, income.gas_income());
    mineral_wait.min(gas_wait)
}

fn wait_for(needed: i64, rate: f64) -> f64 {
    if needed > 0 && rate > 0.0 {
        needed as f64 / rate
    } else {
        0.0
    }
}

/// Seconds until the first producer under construction finishes
///
/// `None` when every producer is already finished. Build times come from
/// `data`; a producer kind without data is a configuration error.
pub fn seconds_until_ready(
    producers: &[&Unit],
    data: &dyn GameData,
) -> Result<Option<f64>, DataError> {
    let mut soonest: Option<f64> = None;
    for producer in producers.iter().filter(|p| !p.is_ready) {
        let build_time = data.build_time(producer.canonical_type())?;
        let remaining = build_time * (1.0 - f64::from(producer.build_progress)).max(0.0);
        soonest = Some(soonest.map_or(remaining, |s| s.min(remaining)));
    }
    Ok(soonest)
}

/// Whether funding arrives no earlier than the producer
pub fn funds_lag_producer(wait_seconds: f64, until_ready_seconds: f64) -> bool {
    wait_seconds >= until_ready_seconds
}
