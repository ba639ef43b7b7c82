// Copyright 2025 the Slidedeck Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The deck: slide-transition and index-management state machine.
//!
//! A [`Deck`] owns one container node on a [`Surface`] and manages which of
//! its slide children is current. Navigation (programmatic calls, control
//! clicks, swipe gestures) resolves a target index, the transition applies the
//! incoming/outgoing visual treatments, and settle timers demarcate when the
//! host-declared height and opacity transitions are complete. Lifecycle
//! events land on a local queue ([`Deck::take_events`]) and, when configured,
//! on a shared [`EventBus`](crate::events::EventBus).
//!
//! All mutation is single-threaded and host-driven: mutating operations take a
//! `now` millisecond timestamp, and the host pumps pending settles with
//! [`Deck::tick`]. Starting a new transition always supersedes the pending
//! settles of the previous one; deadlines never stack.

use alloc::collections::VecDeque;
use alloc::format;
use alloc::string::String;
use alloc::vec::Vec;
use core::fmt;

use hashbrown::HashMap;
use kurbo::Point;
use slidedeck_swipe::{Axis, Direction, PointerId, SwipeResult, SwipeState};
use smallvec::SmallVec;

use crate::duration::duration_map;
use crate::events::DeckEvent;
use crate::index::{next_index, previous_index};
use crate::options::DeckOptions;
use crate::settle::Settle;
use crate::surface::{ATTR_CURRENT, ATTR_INDEX, ATTR_INITIALIZED, NodeRef, SlideVisual, Surface};

/// Construction failure. Both variants are fatal: no partial deck is returned.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum DeckError {
    /// The target did not resolve, or resolved to a non-element node.
    InvalidContainer,
    /// The container already carries a deck's initialization marker.
    AlreadyInitialized,
}

impl fmt::Display for DeckError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidContainer => {
                write!(f, "container not provided, not found, or not an element")
            }
            Self::AlreadyInitialized => {
                write!(f, "container is already initialized as a slide deck")
            }
        }
    }
}

impl core::error::Error for DeckError {}

/// A cross-fading slide deck over one container node.
///
/// Exactly one slide (or zero, when the collection is empty) carries the
/// active treatment at any settled moment, and the current index always refers
/// to a real member of the collection. Abnormal navigation — empty collection,
/// out-of-range target — is a silent no-op rather than an error, since
/// UI-driven navigation may race with collection mutation.
///
/// ## Minimal example
///
/// ```
/// use slidedeck_core::deck::Deck;
/// use slidedeck_core::mem::MemSurface;
/// use slidedeck_core::options::DeckOptions;
/// use slidedeck_core::surface::{NodeRef, Surface};
///
/// let mut surface = MemSurface::new();
/// let container = surface.element("div");
/// for _ in 0..3 {
///     let slide = surface.element("div");
///     surface.add_class(slide, "js-slidedeck");
///     surface.append(container, slide);
/// }
///
/// let mut deck = Deck::new(surface, NodeRef::Node(container), DeckOptions::new(), 0).unwrap();
/// assert_eq!(deck.current_index(), Some(0));
///
/// deck.next(100);
/// deck.tick(100); // undeclared durations settle instantly
/// assert_eq!(deck.current_index(), Some(1));
/// ```
pub struct Deck<S: Surface> {
    surface: S,
    container: S::NodeId,
    slides: SmallVec<[S::NodeId; 8]>,
    current: Option<usize>,
    options: DeckOptions<S::NodeId>,
    max_height: f64,
    /// Declared transition durations of the container, parsed at construction.
    container_durations: HashMap<String, u64>,
    height_settle: Settle,
    slide_settle: Settle,
    /// Slide that switches to in-flow positioning when the height settles.
    pending_inflow: Option<S::NodeId>,
    /// `(target, previous)` for the `Change` event when the slide settles.
    pending_change: Option<(usize, usize)>,
    /// Image whose load completion re-measures the container height.
    image_watch: Option<S::NodeId>,
    next_control: Option<S::NodeId>,
    prev_control: Option<S::NodeId>,
    swipe: Option<SwipeState>,
    events: VecDeque<DeckEvent<S::NodeId>>,
    destroyed: bool,
}

impl<S: Surface> Deck<S> {
    /// Initialize a deck against a container.
    ///
    /// Resolves the target (node or selector), collects slide members via the
    /// configured selector, establishes the starting index — a slide already
    /// carrying the active class wins over [`DeckOptions::start`] — runs the
    /// first layout pass, applies the initial transition, marks the container
    /// initialized, wires swipe, and emits [`DeckEvent::Init`].
    ///
    /// # Errors
    ///
    /// [`DeckError::InvalidContainer`] when the target does not resolve to an
    /// element; [`DeckError::AlreadyInitialized`] when the container carries a
    /// prior initialization marker.
    pub fn new(
        surface: S,
        target: NodeRef<S::NodeId>,
        options: DeckOptions<S::NodeId>,
        now: u64,
    ) -> Result<Self, DeckError> {
        let container = resolve_ref(&surface, &target).ok_or(DeckError::InvalidContainer)?;
        if surface.attr(container, ATTR_INITIALIZED).as_deref() == Some("true") {
            return Err(DeckError::AlreadyInitialized);
        }

        let container_durations = duration_map(surface.transition_durations(container));
        let next_control = options.next.as_ref().and_then(|r| resolve_ref(&surface, r));
        let prev_control = options.prev.as_ref().and_then(|r| resolve_ref(&surface, r));
        let swipe = options.swipe.then(|| {
            SwipeState::with_thresholds(
                options.swipe_threshold,
                (options.swipe_time_threshold != 0).then_some(options.swipe_time_threshold),
            )
        });

        let mut deck = Self {
            surface,
            container,
            slides: SmallVec::new(),
            current: None,
            options,
            max_height: 0.0,
            container_durations,
            height_settle: Settle::new(),
            slide_settle: Settle::new(),
            pending_inflow: None,
            pending_change: None,
            image_watch: None,
            next_control,
            prev_control,
            swipe,
            events: VecDeque::new(),
            destroyed: false,
        };

        deck.collect_slides();
        deck.current = deck.initial_index();
        deck.layout_slides();
        if let Some(start) = deck.current {
            deck.set_current_slide(start, now);
        }
        deck.surface.set_attr(deck.container, ATTR_INITIALIZED, "true");
        if deck.options.swipe {
            deck.surface.add_class(deck.container, &deck.options.swipe_class);
        }
        deck.emit(DeckEvent::Init { container });
        Ok(deck)
    }

    /// Transition to the slide at `target`.
    ///
    /// No-op when the collection is empty or `target` is out of range.
    /// Supersedes any in-flight settle timers, emits
    /// [`DeckEvent::BeforeChange`] strictly before visual mutation when the
    /// index actually moves, applies the incoming and outgoing treatments, and
    /// arms the height and opacity settles from the durations declared on the
    /// container and the incoming slide respectively.
    pub fn set_current_slide(&mut self, target: usize, now: u64) {
        if self.destroyed {
            return;
        }
        let len = self.slides.len();
        if len == 0 || target >= len {
            return;
        }
        let Some(previous) = self.current else {
            return;
        };

        // Supersede, never queue: one pending settle of each kind at most.
        self.height_settle.cancel();
        self.slide_settle.cancel();
        self.pending_inflow = None;
        self.pending_change = None;
        self.image_watch = None;

        // Keep layout stable during the swap: hold the outgoing slide's
        // height until the incoming slide's own height is known.
        if self.options.adaptive_height {
            let outgoing_height = self.surface.intrinsic_height(self.slides[previous]);
            self.surface.set_fixed_height(self.container, Some(outgoing_height));
        }

        if target != previous {
            self.emit(DeckEvent::BeforeChange {
                container: self.container,
                target,
                previous,
            });
        }

        self.current = Some(target);
        let value = format!("{target}");
        self.surface.set_attr(self.container, ATTR_CURRENT, &value);

        // Incoming treatment. Still out of flow so its height can be measured
        // against the container without disturbing the outgoing slide.
        let incoming = self.slides[target];
        self.surface.add_class(incoming, &self.options.active_class);
        self.surface.apply_visual(incoming, SlideVisual::incoming());

        if self.options.adaptive_height {
            let height = self.surface.intrinsic_height(incoming);
            self.surface.set_fixed_height(self.container, Some(height));

            let image = self
                .surface
                .matching_descendant(incoming, &self.options.image_selector)
                .or_else(|| self.surface.image_descendants(incoming).into_iter().next());
            self.image_watch = image.filter(|&img| !self.surface.is_image_complete(img));

            let duration = self.container_durations.get("height").copied().unwrap_or(0);
            self.height_settle.arm(now, duration);
            self.pending_inflow = Some(incoming);
        }

        for i in 0..len {
            if i == target {
                continue;
            }
            let slide = self.slides[i];
            self.surface.remove_class(slide, &self.options.active_class);
            self.surface.apply_visual(slide, SlideVisual::outgoing());
        }

        let opacity = duration_map(self.surface.transition_durations(incoming))
            .get("opacity")
            .copied()
            .unwrap_or(0);
        self.slide_settle.arm(now, opacity);
        if target != previous {
            self.pending_change = Some((target, previous));
        }
    }

    /// Fire any settle whose deadline has passed.
    ///
    /// The height settle switches the incoming slide to in-flow positioning
    /// and releases the forced container height; the slide settle emits the
    /// pending [`DeckEvent::Change`].
    pub fn tick(&mut self, now: u64) {
        if self.destroyed {
            return;
        }
        if self.height_settle.fire(now) {
            if let Some(slide) = self.pending_inflow.take() {
                self.surface.apply_visual(slide, SlideVisual::settled());
                self.surface.set_fixed_height(self.container, None);
            }
            // A pending image re-measure is stale once the height settles.
            self.image_watch = None;
        }
        if self.slide_settle.fire(now) {
            if let Some((target, previous)) = self.pending_change.take() {
                self.emit(DeckEvent::Change {
                    container: self.container,
                    target,
                    previous,
                });
            }
        }
    }

    /// Advance to the next slide, wrapping in infinite mode.
    pub fn next(&mut self, now: u64) {
        if self.destroyed {
            return;
        }
        let Some(current) = self.current else {
            return;
        };
        if let Some(target) = next_index(current, self.slides.len(), self.options.infinite) {
            if target != current {
                self.set_current_slide(target, now);
            }
        }
    }

    /// Retreat to the previous slide, wrapping in infinite mode.
    pub fn previous(&mut self, now: u64) {
        if self.destroyed {
            return;
        }
        let Some(current) = self.current else {
            return;
        };
        if let Some(target) = previous_index(current, self.slides.len(), self.options.infinite) {
            if target != current {
                self.set_current_slide(target, now);
            }
        }
    }

    /// Route a click. Navigates when `node` is a wired prev/next control.
    pub fn click(&mut self, node: S::NodeId, now: u64) {
        if self.destroyed {
            return;
        }
        if self.next_control == Some(node) {
            self.next(now);
        } else if self.prev_control == Some(node) {
            self.previous(now);
        }
    }

    /// Report an image load completion.
    ///
    /// Re-measures the container height when `image` is the one the current
    /// transition is watching and the height settle has not yet fired.
    /// One-shot: a second load report for the same image is a no-op.
    pub fn image_loaded(&mut self, image: S::NodeId) {
        if self.destroyed {
            return;
        }
        if self.image_watch != Some(image) {
            return;
        }
        self.image_watch = None;
        if let Some(slide) = self.current_slide() {
            let height = self.surface.intrinsic_height(slide);
            self.surface.set_fixed_height(self.container, Some(height));
        }
    }

    /// Route a pointer press into the swipe recognizer.
    ///
    /// No-op when swipe is disabled. Adds the gesture-in-progress class to the
    /// container for styling hooks.
    pub fn pointer_down(&mut self, pointer: Option<PointerId>, position: Point, now: u64) {
        if self.destroyed {
            return;
        }
        let Some(swipe) = self.swipe.as_mut() else {
            return;
        };
        swipe.on_down(pointer, position, now);
        self.surface.add_class(self.container, &self.options.swipe_active_class);
    }

    /// Route a pointer move into the swipe recognizer.
    ///
    /// Returns the deltas accumulated since the press, for live drag feedback.
    pub fn pointer_move(&mut self, pointer: Option<PointerId>, position: Point) -> Option<(f64, f64)> {
        if self.destroyed {
            return None;
        }
        self.swipe.as_mut()?.on_move(pointer, position)
    }

    /// Route a pointer release into the swipe recognizer and navigate on a
    /// recognized horizontal swipe: left advances, right retreats.
    ///
    /// Vertical-only or sub-threshold gestures produce no navigation.
    pub fn pointer_up(&mut self, pointer: Option<PointerId>, position: Point, now: u64) {
        if self.destroyed {
            return;
        }
        let (result, gesture_over) = {
            let Some(swipe) = self.swipe.as_mut() else {
                return;
            };
            let result = swipe.on_up(pointer, position, now);
            (result, swipe.active_presses() == 0)
        };
        if gesture_over {
            self.surface.remove_class(self.container, &self.options.swipe_active_class);
        }
        if let SwipeResult::Swipe(swipe) = result {
            if swipe.axis == Axis::Horizontal {
                if swipe.direction == Direction::Left {
                    self.next(now);
                } else {
                    self.previous(now);
                }
            }
        }
    }

    /// Discard a pointer's gesture without classifying it.
    pub fn pointer_cancel(&mut self, pointer: Option<PointerId>) {
        if self.destroyed {
            return;
        }
        let gesture_over = {
            let Some(swipe) = self.swipe.as_mut() else {
                return;
            };
            swipe.cancel(pointer);
            swipe.active_presses() == 0
        };
        if gesture_over {
            self.surface.remove_class(self.container, &self.options.swipe_active_class);
        }
    }

    /// Insert a new slide at `index` (append when `None` or past the end).
    ///
    /// The newcomer starts invisible. When the insertion position is at or
    /// before the current index, the current index advances by one so it keeps
    /// tracking the same logical slide, clamped to the new last index. Re-runs
    /// the layout pass and re-applies the transition. Inserting a non-element
    /// is a no-op.
    pub fn add(&mut self, node: S::NodeId, index: Option<usize>, now: u64) {
        if self.destroyed {
            return;
        }
        if !self.surface.is_element(node) {
            return;
        }
        let len = self.slides.len();
        let position = index.unwrap_or(len).min(len);
        let reference = self.slides.get(position).copied();
        self.surface.insert_before(self.container, node, reference);
        self.surface.apply_visual(node, SlideVisual::outgoing());

        self.collect_slides();
        let new_len = self.slides.len();
        if new_len == 0 {
            self.current = None;
        } else {
            let current = match self.current {
                Some(current) if position <= current => (current + 1).min(new_len - 1),
                Some(current) => current.min(new_len - 1),
                None => 0,
            };
            self.current = Some(current);
        }

        self.layout_slides();
        if let Some(current) = self.current {
            self.set_current_slide(current, now);
        }
    }

    /// Remove the slide at `index` (the last slide when `None` or out of
    /// range).
    ///
    /// When the removed position was at or before the current index, the
    /// current index retreats by one, floored at zero. Re-runs the layout pass
    /// and re-applies the transition. Removing from an empty collection is a
    /// no-op.
    pub fn remove(&mut self, index: Option<usize>, now: u64) {
        if self.destroyed {
            return;
        }
        let len = self.slides.len();
        if len == 0 {
            return;
        }
        let position = match index {
            Some(i) if i < len => i,
            _ => len - 1,
        };
        let node = self.slides[position];
        self.surface.remove_child(self.container, node);

        self.collect_slides();
        if self.slides.is_empty() {
            self.current = None;
        } else {
            let last = self.slides.len() - 1;
            let current = match self.current {
                Some(current) if position <= current => current.saturating_sub(1),
                Some(current) => current,
                None => 0,
            };
            self.current = Some(current.min(last));
        }

        self.layout_slides();
        if let Some(current) = self.current {
            self.set_current_slide(current, now);
        }
    }

    /// Tear the deck down.
    ///
    /// Cancels pending settles, releases the stored swipe and control
    /// registrations, clears the initialization and current-index markers,
    /// and emits [`DeckEvent::Destroy`] carrying the final snapshot. Every
    /// operation after this is a no-op; drain the destroy event with
    /// [`Deck::take_events`] or recover the surface with
    /// [`Deck::into_surface`].
    pub fn destroy(&mut self) {
        if self.destroyed {
            return;
        }
        self.height_settle.cancel();
        self.slide_settle.cancel();
        self.pending_inflow = None;
        self.pending_change = None;
        self.image_watch = None;
        self.swipe = None;
        self.next_control = None;
        self.prev_control = None;

        if self.options.swipe {
            self.surface.remove_class(self.container, &self.options.swipe_class);
            self.surface.remove_class(self.container, &self.options.swipe_active_class);
        }
        self.surface.remove_attr(self.container, ATTR_INITIALIZED);
        self.surface.remove_attr(self.container, ATTR_CURRENT);

        let event = DeckEvent::Destroy {
            container: self.container,
            slides: self.slides.iter().copied().collect(),
            current_index: self.current,
            max_height: self.max_height,
            options: self.options.clone(),
        };
        self.emit(event);

        self.slides.clear();
        self.current = None;
        self.destroyed = true;
    }

    /// Take all queued events, oldest first.
    pub fn take_events(&mut self) -> Vec<DeckEvent<S::NodeId>> {
        self.events.drain(..).collect()
    }

    /// Index of the current slide, `None` when the collection is empty or the
    /// deck is destroyed.
    pub fn current_index(&self) -> Option<usize> {
        self.current
    }

    /// Node id of the current slide.
    pub fn current_slide(&self) -> Option<S::NodeId> {
        self.current.and_then(|i| self.slides.get(i).copied())
    }

    /// Number of slides in the collection.
    pub fn slide_count(&self) -> usize {
        self.slides.len()
    }

    /// Maximum intrinsic height observed across slides at the last layout
    /// pass. Governs the container height when adaptive height is disabled.
    pub fn max_height(&self) -> f64 {
        self.max_height
    }

    /// The container node this deck owns.
    pub fn container(&self) -> S::NodeId {
        self.container
    }

    /// The configuration this deck was constructed with.
    pub fn options(&self) -> &DeckOptions<S::NodeId> {
        &self.options
    }

    /// Whether [`Deck::destroy`] has run.
    pub fn is_destroyed(&self) -> bool {
        self.destroyed
    }

    /// Shared access to the underlying surface.
    pub fn surface(&self) -> &S {
        &self.surface
    }

    /// Exclusive access to the underlying surface.
    ///
    /// The deck does not observe surface mutation; structural changes to the
    /// slide collection should go through [`Deck::add`] and [`Deck::remove`]
    /// so the current index stays valid.
    pub fn surface_mut(&mut self) -> &mut S {
        &mut self.surface
    }

    /// Consume the deck and return the surface.
    pub fn into_surface(self) -> S {
        self.surface
    }

    /// Re-query the slide collection via the configured selector.
    fn collect_slides(&mut self) {
        let slides = self
            .surface
            .matching_children(self.container, &self.options.slide_selector);
        self.slides = SmallVec::from_vec(slides);
    }

    /// Starting index: a pre-marked active slide wins over the configured
    /// `start`; an out-of-range `start` falls back to 0.
    fn initial_index(&self) -> Option<usize> {
        let len = self.slides.len();
        if len == 0 {
            return None;
        }
        let premarked = (0..len)
            .find(|&i| self.surface.has_class(self.slides[i], &self.options.active_class));
        Some(premarked.unwrap_or(if self.options.start < len { self.options.start } else { 0 }))
    }

    /// Layout pass over the whole collection.
    ///
    /// Runs whenever membership changes: positional index attributes, box
    /// normalization, the in-flow treatment for the current slide and the
    /// out-of-flow invisible treatment for the rest, max-height tracking, and
    /// image drag suppression when swipe is enabled.
    fn layout_slides(&mut self) {
        self.max_height = 0.0;
        for i in 0..self.slides.len() {
            let slide = self.slides[i];
            let value = format!("{i}");
            self.surface.set_attr(slide, ATTR_INDEX, &value);

            let height = self.surface.intrinsic_height(slide);
            if height > self.max_height {
                self.max_height = height;
            }

            self.surface.normalize_slide_box(slide);
            if Some(i) == self.current {
                self.surface.apply_visual(slide, SlideVisual::settled());
            } else {
                self.surface.apply_visual(slide, SlideVisual::outgoing());
            }

            if self.options.swipe {
                // Native image drag would hijack gesture tracking.
                let images = self.surface.image_descendants(slide);
                for image in images {
                    self.surface.set_drag_enabled(image, false);
                }
            }
        }

        if !self.options.adaptive_height {
            self.surface.set_fixed_height(self.container, Some(self.max_height));
        }
    }

    fn emit(&mut self, event: DeckEvent<S::NodeId>) {
        if let Some(bus) = &self.options.bus {
            bus.publish(event.clone());
        }
        self.events.push_back(event);
    }
}

impl<S: Surface> fmt::Debug for Deck<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Deck")
            .field("container", &self.container)
            .field("slides", &self.slides.len())
            .field("current", &self.current)
            .field("destroyed", &self.destroyed)
            .finish_non_exhaustive()
    }
}

fn resolve_ref<S: Surface>(surface: &S, reference: &NodeRef<S::NodeId>) -> Option<S::NodeId> {
    let node = match reference {
        NodeRef::Node(node) => Some(*node),
        NodeRef::Selector(selector) => surface.resolve(selector),
    };
    node.filter(|&n| surface.is_element(n))
}
