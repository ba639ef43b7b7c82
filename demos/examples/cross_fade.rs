// Copyright 2025 the Slidedeck Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! A complete deck lifecycle driven against the in-memory surface.
//!
//! This example shows how a host wires `slidedeck_core`:
//! - build a node tree implementing `Surface` (here: `MemSurface`),
//! - construct a `Deck` with controls and a shared `EventBus`,
//! - feed it clicks, swipe pointer sequences, and image load reports,
//! - pump settle timers with `tick` using a simulated millisecond clock.
//!
//! Run:
//! - `cargo run -p slidedeck_demos --example cross_fade`

use kurbo::Point;
use slidedeck_core::{Deck, DeckEvent, DeckOptions, EventBus, MemSurface, NodeRef, Surface};

fn main() {
    // A gallery: container with a declared height transition, three slides
    // fading over 300ms, and prev/next buttons outside the container.
    let mut surface = MemSurface::new();
    let container = surface.element("div");
    surface.set_id(container, "gallery");
    surface.declare_transition(container, "height", "0.2s");

    for (i, height) in [240.0, 320.0, 280.0].iter().enumerate() {
        let slide = surface.element("div");
        surface.add_class(slide, "js-slidedeck");
        surface.declare_transition(slide, "opacity", "300ms");
        surface.set_intrinsic_height(slide, *height);
        surface.append(container, slide);

        let image = surface.element("img");
        surface.add_class(image, "js-slidedeck-image");
        // The second slide's image is still loading when the deck starts.
        surface.set_image_complete(image, i != 1);
        surface.append(slide, image);
    }

    let next_button = surface.element("button");
    surface.set_id(next_button, "next");
    let prev_button = surface.element("button");
    surface.set_id(prev_button, "prev");

    let bus = EventBus::new();
    let options = DeckOptions::new()
        .with_infinite(true)
        .with_next(NodeRef::Node(next_button))
        .with_prev(NodeRef::Selector("#prev".to_string()))
        .with_bus(bus.clone());

    let mut now = 0_u64;
    let mut deck = Deck::new(surface, NodeRef::Selector("#gallery".to_string()), options, now)
        .expect("gallery container resolves to an element");
    now += 500;
    deck.tick(now);
    report("after init", &mut deck);

    // Click the next control. The incoming slide's image has not loaded yet,
    // so the deck watches it and re-measures the height when it arrives.
    deck.click(next_button, now);
    println!(
        "mid-transition: container height forced to {:?}",
        deck.surface().fixed_height(deck.container())
    );
    let current = deck.current_slide().unwrap();
    let image = deck.surface().image_descendants(current)[0];
    deck.surface_mut().set_intrinsic_height(current, 360.0);
    deck.surface_mut().set_image_complete(image, true);
    deck.image_loaded(image);
    println!(
        "image loaded: container height re-measured to {:?}",
        deck.surface().fixed_height(deck.container())
    );
    now += 400;
    deck.tick(now);
    report("after next click", &mut deck);

    // A quick leftward swipe advances again.
    deck.pointer_down(None, Point::new(260.0, 120.0), now);
    deck.pointer_move(None, Point::new(190.0, 118.0));
    deck.pointer_up(None, Point::new(140.0, 116.0), now + 160);
    now += 600;
    deck.tick(now);
    report("after swipe", &mut deck);

    // Infinite mode wraps the prev control from the first slide to the last.
    deck.click(prev_button, now);
    deck.click(prev_button, now);
    deck.click(prev_button, now);
    now += 600;
    deck.tick(now);
    report("after wrapping back", &mut deck);

    deck.destroy();
    report("after destroy", &mut deck);

    println!("\nbroadcast bus saw {} events in total", bus.drain().len());
}

fn report(label: &str, deck: &mut Deck<MemSurface>) {
    println!("\n== {label} ==");
    println!(
        "current index: {:?}, slides: {}, max height: {}",
        deck.current_index(),
        deck.slide_count(),
        deck.max_height()
    );
    for event in deck.take_events() {
        match event {
            DeckEvent::Init { .. } => println!("  event: init"),
            DeckEvent::BeforeChange { target, previous, .. } => {
                println!("  event: before-change {previous} -> {target}");
            }
            DeckEvent::Change { target, previous, .. } => {
                println!("  event: change {previous} -> {target}");
            }
            DeckEvent::Destroy { current_index, .. } => {
                println!("  event: destroy (final index {current_index:?})");
            }
        }
    }
}
