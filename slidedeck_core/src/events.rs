// Copyright 2025 the Slidedeck Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Lifecycle notifications and the opt-in broadcast bus.
//!
//! Every deck pushes its [`DeckEvent`]s onto a local queue drained with
//! [`Deck::take_events`](crate::deck::Deck::take_events) — the narrow,
//! container-scoped channel. A host that wants one place to observe several
//! decks attaches a shared [`EventBus`] at construction; the deck mirrors
//! every event onto it. Each event names its emitting container, so broad
//! subscribers can tell sources apart.

use alloc::collections::VecDeque;
use alloc::rc::Rc;
use alloc::vec::Vec;
use core::cell::RefCell;

use crate::options::DeckOptions;

/// A lifecycle notification emitted by a deck.
///
/// `target` and `previous` are slide indices. [`DeckEvent::BeforeChange`] is
/// emitted strictly before any visual mutation of a transition;
/// [`DeckEvent::Change`] once the transition's opacity settle has elapsed.
/// Neither is emitted when a transition targets the already-current slide.
#[derive(Clone, Debug, PartialEq)]
pub enum DeckEvent<K> {
    /// The deck finished construction against `container`.
    Init {
        /// The emitting container.
        container: K,
    },
    /// A transition to a different slide is about to mutate visual state.
    BeforeChange {
        /// The emitting container.
        container: K,
        /// Index the deck is moving to.
        target: usize,
        /// Index the deck is moving from.
        previous: usize,
    },
    /// A transition to a different slide has settled.
    Change {
        /// The emitting container.
        container: K,
        /// Index the deck moved to.
        target: usize,
        /// Index the deck moved from.
        previous: usize,
    },
    /// The deck was torn down. Carries the final snapshot of its state.
    Destroy {
        /// The emitting container.
        container: K,
        /// Slide ids at teardown, in order.
        slides: Vec<K>,
        /// Current index at teardown, `None` when the collection was empty.
        current_index: Option<usize>,
        /// Maximum intrinsic height observed across slides.
        max_height: f64,
        /// The configuration the deck was constructed with.
        options: DeckOptions<K>,
    },
}

/// Shared broadcast channel for deck events.
///
/// Clonable handle over a shared queue. Attach one bus to several decks via
/// [`DeckOptions::with_bus`](crate::options::DeckOptions::with_bus) to observe
/// them from a single place.
///
/// ```
/// use slidedeck_core::events::{DeckEvent, EventBus};
///
/// let bus: EventBus<u32> = EventBus::new();
/// let mirror = bus.clone();
///
/// bus.publish(DeckEvent::Init { container: 7 });
/// assert_eq!(mirror.drain(), vec![DeckEvent::Init { container: 7 }]);
/// assert!(bus.is_empty());
/// ```
pub struct EventBus<K> {
    queue: Rc<RefCell<VecDeque<DeckEvent<K>>>>,
}

impl<K> EventBus<K> {
    /// Create an empty bus.
    pub fn new() -> Self {
        Self {
            queue: Rc::new(RefCell::new(VecDeque::new())),
        }
    }

    /// Append an event to the shared queue.
    pub fn publish(&self, event: DeckEvent<K>) {
        self.queue.borrow_mut().push_back(event);
    }

    /// Take all queued events, oldest first.
    pub fn drain(&self) -> Vec<DeckEvent<K>> {
        self.queue.borrow_mut().drain(..).collect()
    }

    /// Number of queued events.
    pub fn len(&self) -> usize {
        self.queue.borrow().len()
    }

    /// Whether the queue is empty.
    pub fn is_empty(&self) -> bool {
        self.queue.borrow().is_empty()
    }
}

impl<K> Clone for EventBus<K> {
    fn clone(&self) -> Self {
        Self {
            queue: Rc::clone(&self.queue),
        }
    }
}

impl<K> Default for EventBus<K> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K> core::fmt::Debug for EventBus<K> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("EventBus")
            .field("queued", &self.queue.borrow().len())
            .finish_non_exhaustive()
    }
}

impl<K> PartialEq for EventBus<K> {
    /// Buses compare by identity: two handles are equal when they share the
    /// same underlying queue.
    fn eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.queue, &other.queue)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clones_share_one_queue() {
        let bus: EventBus<u8> = EventBus::new();
        let mirror = bus.clone();

        bus.publish(DeckEvent::Init { container: 1 });
        mirror.publish(DeckEvent::Init { container: 2 });

        assert_eq!(bus.len(), 2);
        let drained = mirror.drain();
        assert_eq!(drained.len(), 2);
        assert!(bus.is_empty());
    }

    #[test]
    fn buses_compare_by_identity() {
        let a: EventBus<u8> = EventBus::new();
        let b = a.clone();
        let c: EventBus<u8> = EventBus::new();

        assert_eq!(a, b);
        assert_ne!(a, c);
    }
}
