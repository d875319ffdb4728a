//=========================================================================
// Event Pool
//=========================================================================
//
// Per-scene queue of pending input events.
//
// Events are appended as they arrive and drained most-recent-first
// (last in, first out). Scenes that need arrival order must reverse the
// drained sequence themselves.
//
//=========================================================================

//=== Internal Dependencies ===============================================

use super::Event;

//=== EventPool ===========================================================

/// Pending input events of one scene instance.
///
/// # Example
///
/// ```
/// use stagehand::core::input::{Event, EventPool};
///
/// let mut pool = EventPool::new();
/// pool.push(Event::User(1));
/// pool.push(Event::User(2));
///
/// let drained: Vec<_> = pool.drain().collect();
/// assert_eq!(drained, vec![Event::User(2), Event::User(1)]);
/// assert!(pool.is_empty());
/// ```
#[derive(Debug, Clone, Default)]
pub struct EventPool {
    events: Vec<Event>,
}

impl EventPool {
    /// Creates an empty pool.
    pub fn new() -> Self {
        Self { events: Vec::new() }
    }

    /// Appends an event.
    pub fn push(&mut self, event: Event) {
        self.events.push(event);
    }

    /// Removes and yields every pending event, most recently added first.
    ///
    /// The pool is empty once the iterator is dropped, even if it was not
    /// fully consumed.
    pub fn drain(&mut self) -> impl Iterator<Item = Event> + '_ {
        self.events.drain(..).rev()
    }

    /// Returns the pending events in insertion order without removing them.
    pub fn peek(&self) -> &[Event] {
        &self.events
    }

    /// Returns the number of pending events.
    pub fn len(&self) -> usize {
        self.events.len()
    }

    /// Returns true if no events are pending.
    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    /// Discards all pending events.
    pub fn clear(&mut self) {
        self.events.clear();
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
