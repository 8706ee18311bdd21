//! Status events for auditing production decisions.
//!
//! Only successful command issuance is recorded. Waiting on producers,
//! resources or cooldowns is the normal state of an order and would flood
//! the log at tick granularity, so it produces no event.
//!
//! # Example
//!
//! ```rust
//! use production_scheduler_core::models::event::Event;
//! use production_scheduler_core::{Point2, UnitTypeId};
//!
//! let event = Event::UnitQueued {
//!     tick: 224,
//!     order_id: "marines".to_string(),
//!     unit_type: UnitTypeId::Marine,
//!     producer_type: UnitTypeId::Barracks,
//!     producer: 42,
//!     position: Point2::new(31.5, 60.0),
//! };
//!
//! assert_eq!(event.to_string(), "Marine from Barracks at (31.5, 60.0)");
//! ```

use crate::models::unit::{Point2, Tag};
use crate::models::unit_type::UnitTypeId;
use std::fmt;

/// Recorded production decision
#[derive(Debug, Clone, PartialEq)]
pub enum Event {
    /// A production command was issued
    UnitQueued {
        tick: usize,
        order_id: String,
        unit_type: UnitTypeId,
        /// Producer kind the order was configured with
        producer_type: UnitTypeId,
        producer: Tag,
        position: Point2,
    },
}

impl Event {
    /// Tick at which the event occurred
    pub fn tick(&self) -> usize {
        match self {
            Event::UnitQueued { tick, .. } => *tick,
        }
    }

    /// Order that produced the event
    pub fn order_id(&self) -> &str {
        match self {
            Event::UnitQueued { order_id, .. } => order_id,
        }
    }

    /// Event type name
    pub fn event_type(&self) -> &'static str {
        match self {
            Event::UnitQueued { .. } => "UnitQueued",
        }
    }
}

impl fmt::Display for Event {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Event::UnitQueued {
                unit_type,
                producer_type,
                position,
                ..
            } => write!(
                f,
                "{} from {} at ({:.1}, {:.1})",
                unit_type, producer_type, position.x, position.y
            ),
        }
    }
}

/// Append-only log of events
#[derive(Debug, Clone, Default)]
pub struct EventLog {
    events: Vec<Event>,
}

impl EventLog {
    /// Create a new empty event log
    pub fn new() -> Self {
        Self { events: Vec::new() }
    }

    /// Add an event to the log
    pub fn log(&mut self, event: Event) {
        self.events.push(event);
    }

    /// Get the number of events logged
    pub fn len(&self) -> usize {
        self.events.len()
    }

    /// Check if the log is empty
    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    /// Get all events
    pub fn events(&self) -> &[Event] {
        &self.events
    }

    /// Get events for a specific tick
    pub fn events_at_tick(&self, tick: usize) -> Vec<&Event> {
        self.events.iter().filter(|e| e.tick() == tick).collect()
    }

    /// Get events for a specific order
    pub fn events_for_order(&self, order_id: &str) -> Vec<&Event> {
        self.events
            .iter()
            .filter(|e| e.order_id() == order_id)
            .collect()
    }

    /// Clear all events
    pub fn clear(&mut self) {
        self.events.clear();
    }
}
