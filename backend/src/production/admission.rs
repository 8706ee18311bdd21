//! Queue admission policy
//!
//! Queue depth stands in for resources committed but not yet spent. A
//! producer normally takes a new order only when its queue is empty. When
//! queuing ahead is allowed, it also takes one when the running order is
//! past [`QUEUE_PROGRESS_THRESHOLD`], so the next order starts the moment
//! the current one finishes. A capacity extension (reactor) doubles the
//! number of orders that run side by side.

use crate::models::state::StateView;
use crate::models::unit::{Unit, UnitOrder};

/// Progress past which a running order is "nearly done"
pub const QUEUE_PROGRESS_THRESHOLD: f32 = 0.9;

/// Decides whether a producer may accept one more production command
///
/// # Example
/// ```
/// use production_scheduler_core::production::QueueAdmission;
/// use production_scheduler_core::{AbilityId, UnitOrder};
///
/// let admission = QueueAdmission::new(true);
/// let nearly_done = [UnitOrder::new(AbilityId::TrainMarine, 0.95)];
/// let just_started = [UnitOrder::new(AbilityId::TrainMarine, 0.3)];
///
/// assert!(admission.admits(&nearly_done, false));
/// assert!(!admission.admits(&just_started, false));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QueueAdmission {
    allow_queue: bool,
}

impl QueueAdmission {
    pub fn new(allow_queue: bool) -> Self {
        Self { allow_queue }
    }

    pub fn allow_queue(&self) -> bool {
        self.allow_queue
    }

    /// Whether `producer` carries a recognized capacity extension
    ///
    /// An add-on tag missing from the snapshot counts as no extension.
    pub fn has_capacity_extension(producer: &Unit, state: &dyn StateView) -> bool {
        producer
            .add_on_tag
            .and_then(|tag| state.by_tag(tag))
            .map_or(false, |add_on| add_on.unit_type.is_capacity_extension())
    }

    /// Whether `producer` may accept another production command now
    pub fn has_order_ready(&self, producer: &Unit, state: &dyn StateView) -> bool {
        self.admits(&producer.orders, Self::has_capacity_extension(producer, state))
    }

    /// Admission rule on a raw order queue
    pub fn admits(&self, orders: &[UnitOrder], has_extension: bool) -> bool {
        if has_extension {
            if orders.len() < 2 {
                return true;
            }
            if self.allow_queue {
                return orders.iter().take(2).any(nearly_done);
            }
        }

        if self.allow_queue && orders.len() == 1 {
            return nearly_done(&orders[0]);
        }

        orders.is_empty()
    }
}

fn nearly_done(order: &UnitOrder) -> bool {
    order.progress > QUEUE_PROGRESS_THRESHOLD
}
