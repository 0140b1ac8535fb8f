use std::collections::VecDeque;

use crate::components::{EntityId, Tick};

/// Structured journal of what happened each turn. Every variant carries the
/// tick it happened on.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    Spawned {
        entity: EntityId,
        tick: Tick,
    },
    Moved {
        entity: EntityId,
        x: i32,
        y: i32,
        tick: Tick,
    },
    Attacked {
        attacker: EntityId,
        defender: EntityId,
        damage: i32,
        tick: Tick,
    },
    Died {
        entity: EntityId,
        tick: Tick,
    },
    GameOver {
        tick: Tick,
    },
}

impl Event {
    pub fn tick(&self) -> Tick {
        match self {
            Event::Spawned { tick, .. }
            | Event::Moved { tick, .. }
            | Event::Attacked { tick, .. }
            | Event::Died { tick, .. }
            | Event::GameOver { tick } => *tick,
        }
    }
}

/// Bounded journal of turn events, oldest first. Once `limit` events are
/// held, each push drops the oldest.
#[derive(Debug, Clone)]
pub struct EventLog {
    events: VecDeque<Event>,
    limit: usize,
}

impl EventLog {
    pub const DEFAULT_LIMIT: usize = 4_096;

    pub fn new(limit: usize) -> Self {
        let limit = limit.max(1);
        Self {
            events: VecDeque::with_capacity(limit.min(Self::DEFAULT_LIMIT)),
            limit,
        }
    }

    pub fn push(&mut self, event: Event) {
        if self.events.len() == self.limit {
            self.events.pop_front();
        }
        self.events.push_back(event);
    }

    pub fn iter(&self) -> impl DoubleEndedIterator<Item = &Event> {
        self.events.iter()
    }

    pub fn last(&self) -> Option<&Event> {
        self.events.back()
    }

    /// Everything recorded on `tick`, in the order it happened.
    pub fn on_tick(&self, tick: Tick) -> impl Iterator<Item = &Event> {
        self.events.iter().filter(move |e| e.tick() == tick)
    }

    /// The newest `n` events, oldest first.
    pub fn recent(&self, n: usize) -> impl Iterator<Item = &Event> {
        self.events.iter().skip(self.events.len().saturating_sub(n))
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }
}

impl Default for EventLog {
    fn default() -> Self {
        Self::new(Self::DEFAULT_LIMIT)
    }
}
