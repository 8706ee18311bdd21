//! Commands produced during a tick
//!
//! Orders do not talk to the game directly. They push commands into a
//! [`CommandBuffer`] that the tick runner forwards after every order has
//! been polled. The buffer also doubles as the per-tick dedupe set: a
//! producer that already received any action this tick is off-limits.

use crate::models::unit::Tag;
use crate::models::unit_type::{AbilityId, UnitTypeId};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// Action for the game bridge
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Command {
    /// Queue production of `unit_type` on `producer`
    Train {
        producer: Tag,
        unit_type: UnitTypeId,
        ability: AbilityId,
    },
}

impl Command {
    /// Entity receiving the command
    pub fn target(&self) -> Tag {
        match self {
            Command::Train { producer, .. } => *producer,
        }
    }
}

/// Commands issued this tick plus the set of producers that already acted
///
/// # Example
/// ```
/// use production_scheduler_core::{AbilityId, CommandBuffer, UnitTypeId};
///
/// let mut buffer = CommandBuffer::new();
/// assert!(buffer.train(5, UnitTypeId::Marine, AbilityId::TrainMarine));
/// // Same producer, same tick
/// assert!(!buffer.train(5, UnitTypeId::Marine, AbilityId::TrainMarine));
/// assert_eq!(buffer.len(), 1);
/// ```
#[derive(Debug, Clone, Default)]
pub struct CommandBuffer {
    commands: Vec<Command>,
    acted: HashSet<Tag>,
}

impl CommandBuffer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether `producer` already received an action this tick
    pub fn already_acted(&self, producer: Tag) -> bool {
        self.acted.contains(&producer)
    }

    /// Record an action issued outside this buffer (e.g. by another subsystem)
    pub fn mark_acted(&mut self, producer: Tag) {
        self.acted.insert(producer);
    }

    /// Queue a production command
    ///
    /// Returns `false` and queues nothing when `producer` already acted.
    pub fn train(&mut self, producer: Tag, unit_type: UnitTypeId, ability: AbilityId) -> bool {
        if !self.acted.insert(producer) {
            return false;
        }
        self.commands.push(Command::Train {
            producer,
            unit_type,
            ability,
        });
        true
    }

    /// Commands queued this tick, in issue order
    pub fn commands(&self) -> &[Command] {
        &self.commands
    }

    pub fn len(&self) -> usize {
        self.commands.len()
    }

    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }

    /// Take the queued commands, keeping the dedupe set for the rest of the tick
    pub fn drain(&mut self) -> Vec<Command> {
        std::mem::take(&mut self.commands)
    }

    /// Forget commands and dedupe state; called once per tick by the owner
    pub fn clear(&mut self) {
        self.commands.clear();
        self.acted.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_marked_producer_rejects_train() {
        let mut buffer = CommandBuffer::new();
        buffer.mark_acted(9);
        assert!(buffer.already_acted(9));
        assert!(!buffer.train(9, UnitTypeId::Scv, AbilityId::TrainScv));
        assert!(buffer.is_empty());
    }

    #[test]
    fn test_drain_keeps_dedupe_until_clear() {
        let mut buffer = CommandBuffer::new();
        buffer.train(1, UnitTypeId::Scv, AbilityId::TrainScv);
        let drained = buffer.drain();
        assert_eq!(drained.len(), 1);
        assert_eq!(drained[0].target(), 1);
        assert!(buffer.already_acted(1));

        buffer.clear();
        assert!(!buffer.already_acted(1));
    }
}
