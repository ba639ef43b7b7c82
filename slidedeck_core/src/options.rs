// Copyright 2025 the Slidedeck Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Deck configuration.
//!
//! Options are built once, by overriding defaults field by field, and are
//! immutable after the deck consumes them. There is no merging of mutable
//! records: construct the value you mean.

use alloc::string::String;
use alloc::string::ToString;

use crate::events::EventBus;
use crate::surface::NodeRef;

/// Configuration for a [`Deck`](crate::deck::Deck).
///
/// All fields have working defaults; override them with the `with_*` builders:
///
/// ```
/// use slidedeck_core::options::DeckOptions;
///
/// let options: DeckOptions<u32> = DeckOptions::new()
///     .with_infinite(true)
///     .with_start(2)
///     .with_swipe_threshold(80.0);
/// assert!(options.infinite);
/// assert_eq!(options.start, 2);
/// ```
#[derive(Clone, Debug, PartialEq)]
pub struct DeckOptions<K> {
    /// Wrap navigation past the first/last slide instead of stopping.
    pub infinite: bool,
    /// Marker class applied to the current slide.
    pub active_class: String,
    /// Selector for slide members within the container.
    pub slide_selector: String,
    /// Initial slide index. A slide already carrying [`DeckOptions::active_class`]
    /// at construction overrides this, so pre-rendered state wins.
    pub start: usize,
    /// Track the current slide's natural height per transition instead of
    /// fixing the container to the tallest slide.
    pub adaptive_height: bool,
    /// External control wired to advance the deck.
    pub next: Option<NodeRef<K>>,
    /// External control wired to retreat the deck.
    pub prev: Option<NodeRef<K>>,
    /// Preferred image descendant used for height re-measurement, falling back
    /// to the first plain image descendant of the current slide.
    pub image_selector: String,
    /// Enable swipe-gesture navigation.
    pub swipe: bool,
    /// Styling-hook class added to the container while swipe is wired.
    pub swipe_class: String,
    /// Styling-hook class toggled on the container while a gesture is in
    /// progress.
    pub swipe_active_class: String,
    /// Minimum gesture distance, in the host's units, to count as a swipe.
    pub swipe_threshold: f64,
    /// Maximum gesture duration in milliseconds to count as a swipe. Zero
    /// disables the duration check.
    pub swipe_time_threshold: u64,
    /// Optional broadcast bus; every emitted event is mirrored onto it.
    pub bus: Option<EventBus<K>>,
}

impl<K> Default for DeckOptions<K> {
    fn default() -> Self {
        Self {
            infinite: false,
            active_class: "slidedeck-current-slide".to_string(),
            slide_selector: ".js-slidedeck".to_string(),
            start: 0,
            adaptive_height: true,
            next: None,
            prev: None,
            image_selector: ".js-slidedeck-image".to_string(),
            swipe: true,
            swipe_class: "slidedeck-has-swipe".to_string(),
            swipe_active_class: "slidedeck-swipe-active".to_string(),
            swipe_threshold: 50.0,
            swipe_time_threshold: 1000,
            bus: None,
        }
    }
}

impl<K> DeckOptions<K> {
    /// Default options.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set wraparound navigation.
    pub fn with_infinite(mut self, infinite: bool) -> Self {
        self.infinite = infinite;
        self
    }

    /// Set the current-slide marker class.
    pub fn with_active_class(mut self, class: impl Into<String>) -> Self {
        self.active_class = class.into();
        self
    }

    /// Set the slide member selector.
    pub fn with_slide_selector(mut self, selector: impl Into<String>) -> Self {
        self.slide_selector = selector.into();
        self
    }

    /// Set the initial slide index.
    pub fn with_start(mut self, start: usize) -> Self {
        self.start = start;
        self
    }

    /// Enable or disable adaptive container height.
    pub fn with_adaptive_height(mut self, adaptive: bool) -> Self {
        self.adaptive_height = adaptive;
        self
    }

    /// Wire an external advance control.
    pub fn with_next(mut self, next: NodeRef<K>) -> Self {
        self.next = Some(next);
        self
    }

    /// Wire an external retreat control.
    pub fn with_prev(mut self, prev: NodeRef<K>) -> Self {
        self.prev = Some(prev);
        self
    }

    /// Set the preferred image selector for height re-measurement.
    pub fn with_image_selector(mut self, selector: impl Into<String>) -> Self {
        self.image_selector = selector.into();
        self
    }

    /// Enable or disable swipe navigation.
    pub fn with_swipe(mut self, swipe: bool) -> Self {
        self.swipe = swipe;
        self
    }

    /// Set the swipe styling-hook class.
    pub fn with_swipe_class(mut self, class: impl Into<String>) -> Self {
        self.swipe_class = class.into();
        self
    }

    /// Set the gesture-in-progress styling-hook class.
    pub fn with_swipe_active_class(mut self, class: impl Into<String>) -> Self {
        self.swipe_active_class = class.into();
        self
    }

    /// Set the minimum swipe distance.
    pub fn with_swipe_threshold(mut self, threshold: f64) -> Self {
        self.swipe_threshold = threshold;
        self
    }

    /// Set the maximum swipe duration in milliseconds; zero disables the check.
    pub fn with_swipe_time_threshold(mut self, threshold_ms: u64) -> Self {
        self.swipe_time_threshold = threshold_ms;
        self
    }

    /// Mirror every emitted event onto a shared bus.
    pub fn with_bus(mut self, bus: EventBus<K>) -> Self {
        self.bus = Some(bus);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_the_documented_contract() {
        let options: DeckOptions<u32> = DeckOptions::new();

        assert!(!options.infinite);
        assert_eq!(options.active_class, "slidedeck-current-slide");
        assert_eq!(options.slide_selector, ".js-slidedeck");
        assert_eq!(options.start, 0);
        assert!(options.adaptive_height);
        assert!(options.next.is_none());
        assert!(options.prev.is_none());
        assert!(options.swipe);
        assert_eq!(options.swipe_threshold, 50.0);
        assert_eq!(options.swipe_time_threshold, 1000);
        assert!(options.bus.is_none());
    }

    #[test]
    fn builders_override_single_fields() {
        let options: DeckOptions<u32> = DeckOptions::new()
            .with_slide_selector(".card")
            .with_next(NodeRef::Selector("#next".to_string()))
            .with_swipe(false);

        assert_eq!(options.slide_selector, ".card");
        assert_eq!(options.next, Some(NodeRef::Selector("#next".to_string())));
        assert!(!options.swipe);
        // Untouched fields keep their defaults.
        assert_eq!(options.image_selector, ".js-slidedeck-image");
    }
}
