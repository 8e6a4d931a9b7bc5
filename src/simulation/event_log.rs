//! Bounded record of the most recent births, captures and deaths.

use serde::{Deserialize, Serialize};
use std::collections::VecDeque;

/// One entry of the [`EventLog`].
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggedEvent {
    /// Step the event happened on
    pub step: u64,
    /// Free-form description, e.g. `"predator 4 caught prey 17"`
    pub description: String,
    /// What happened
    pub kind: EventKind,
}

/// Event categories
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EventKind {
    /// An offspring was produced
    Birth,
    /// A predator consumed a prey
    Capture,
    /// A predator reached its lifespan
    Death,
    /// Predators were dropped by the balance safeguard
    Trim,
    /// A fresh predator was seeded by the balance safeguard
    Injection,
    /// A species died out
    Extinction,
}

/// Keeps the last `capacity` events, newest first. Every event is also
/// emitted at `debug` level.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EventLog {
    entries: VecDeque<LoggedEvent>,
    capacity: usize,
}

impl Default for EventLog {
    fn default() -> Self {
        Self::new(32)
    }
}

impl EventLog {
    /// Creates an empty log holding at most `capacity` events.
    pub fn new(capacity: usize) -> Self {
        Self {
            entries: VecDeque::with_capacity(capacity),
            capacity,
        }
    }

    /// Records an event, evicting the oldest one when full.
    pub fn log(&mut self, step: u64, description: String, kind: EventKind) {
        log::debug!("[step {step}] {kind:?}: {description}");

        if self.capacity == 0 {
            return;
        }
        if self.entries.len() == self.capacity {
            self.entries.pop_back();
        }
        self.entries.push_front(LoggedEvent {
            step,
            description,
            kind,
        });
    }

    /// Retained events, newest first.
    pub fn events(&self) -> &VecDeque<LoggedEvent> {
        &self.entries
    }

    /// Number of retained events of the given kind.
    pub fn count(&self, kind: EventKind) -> usize {
        self.entries.iter().filter(|e| e.kind == kind).count()
    }

    /// Drops every retained event.
    pub fn clear(&mut self) {
        self.entries.clear();
    }
}
