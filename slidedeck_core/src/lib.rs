// Copyright 2025 the Slidedeck Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Slidedeck Core: a headless cross-fading slide deck.
//!
//! This crate manages which of a container's slide children is current and how
//! the deck transitions between them. It is headless: no DOM, no renderer, no
//! timers. The host provides a tree of presentable nodes behind the [`Surface`]
//! trait, feeds the deck input (navigation calls, control clicks, pointer
//! gestures, image load completions), and pumps time through [`Deck::tick`]
//! with millisecond timestamps. Everything the deck does to the presentation
//! is expressed through `Surface` mutations; everything it wants the host to
//! know comes back as [`DeckEvent`]s.
//!
//! The pieces:
//!
//! - [`Deck`] — the transition and index-management state machine.
//! - [`Surface`] — the host-implemented rendering abstraction, with
//!   [`MemSurface`] as the in-memory reference implementation.
//! - [`DeckOptions`] — construction-time configuration.
//! - [`DeckEvent`] / [`EventBus`] — per-deck lifecycle queue and the opt-in
//!   shared broadcast channel.
//! - [`index`] — the pure next/previous index arithmetic.
//! - [`duration`] — CSS time string parsing for declared transitions.
//!
//! Swipe recognition lives in the companion `slidedeck_swipe` crate and is
//! re-exported here for hosts that route pointer events through the deck.
//!
//! ## Minimal example
//!
//! ```
//! use slidedeck_core::{Deck, DeckEvent, DeckOptions, MemSurface, NodeRef, Surface};
//!
//! let mut surface = MemSurface::new();
//! let container = surface.element("div");
//! for _ in 0..3 {
//!     let slide = surface.element("div");
//!     surface.add_class(slide, "js-slidedeck");
//!     surface.append(container, slide);
//! }
//!
//! let mut deck = Deck::new(surface, NodeRef::Node(container), DeckOptions::new(), 0).unwrap();
//! deck.next(100);
//! deck.tick(100);
//!
//! assert_eq!(deck.current_index(), Some(1));
//! let events = deck.take_events();
//! assert!(matches!(events.first(), Some(DeckEvent::Init { .. })));
//! assert!(matches!(events.last(), Some(DeckEvent::Change { target: 1, .. })));
//! ```
//!
//! ## Features
//!
//! - `std` (default): enables `std` support for dependencies such as `kurbo`.
//! - `libm`: enables `no_std` + `alloc` builds that rely on `libm` for
//!   floating-point math.

#![no_std]

extern crate alloc;

pub mod deck;
pub mod duration;
pub mod events;
pub mod index;
pub mod mem;
pub mod options;
pub mod settle;
pub mod surface;

pub use deck::{Deck, DeckError};
pub use events::{DeckEvent, EventBus};
pub use mem::{MemNode, MemSurface};
pub use options::DeckOptions;
pub use settle::Settle;
pub use surface::{NodeRef, SlideVisual, Surface};

pub use slidedeck_swipe::{Axis, Direction, PointerId, Swipe, SwipeResult, SwipeState};
