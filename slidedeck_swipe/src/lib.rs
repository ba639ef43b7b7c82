// Copyright 2025 the Slidedeck Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Slidedeck Swipe: renderer-agnostic swipe gesture recognition.
//!
//! This crate turns raw pointer sequences (down, move, up) into discrete swipe
//! results. It does not listen to any event source itself: the host feeds it
//! positions and millisecond timestamps, and it classifies the gesture when the
//! pointer is released. This keeps the state machine usable from any UI stack —
//! a DOM host, a terminal, or a test harness driving synthetic pointers.
//!
//! ## Classification rules
//!
//! A released gesture is reported as a [`Swipe`] when:
//!
//! 1. The travel along the dominant axis (the axis with the larger absolute
//!    delta) is at least [`SwipeState::distance_threshold`].
//! 2. The elapsed time between down and up is within
//!    [`SwipeState::time_threshold`], when one is configured. `None` disables
//!    the duration check entirely, making recognition purely distance-based.
//!
//! Anything else — sub-threshold travel, a too-slow drag, or a release with no
//! matching press — is [`SwipeResult::Ignored`].
//!
//! ## Minimal example
//!
//! A fast leftward drag past the default 50px threshold:
//!
//! ```
//! use kurbo::Point;
//! use slidedeck_swipe::{Axis, Direction, SwipeResult, SwipeState};
//!
//! let mut state = SwipeState::new();
//!
//! state.on_down(None, Point::new(200.0, 100.0), 1000);
//! state.on_move(None, Point::new(150.0, 102.0));
//! let result = state.on_up(None, Point::new(80.0, 104.0), 1180);
//!
//! match result {
//!     SwipeResult::Swipe(swipe) => {
//!         assert_eq!(swipe.axis, Axis::Horizontal);
//!         assert_eq!(swipe.direction, Direction::Left);
//!     }
//!     SwipeResult::Ignored => panic!("travel and duration were within thresholds"),
//! }
//! ```
//!
//! ## Multi-pointer support
//!
//! Each pointer is tracked independently, keyed by an optional [`PointerId`].
//! Passing `None` selects a primary pointer, which is convenient for hosts that
//! only ever deal with a single mouse or touch point:
//!
//! ```
//! use core::num::NonZeroU64;
//! use kurbo::Point;
//! use slidedeck_swipe::SwipeState;
//!
//! let mut state = SwipeState::new();
//! let finger_a = NonZeroU64::new(1).unwrap();
//! let finger_b = NonZeroU64::new(2).unwrap();
//!
//! state.on_down(Some(finger_a), Point::new(0.0, 0.0), 1000);
//! state.on_down(Some(finger_b), Point::new(300.0, 0.0), 1010);
//! assert!(state.is_pressed(Some(finger_a)));
//! assert!(state.is_pressed(Some(finger_b)));
//! ```
//!
//! ## Features
//!
//! - `std` (default): enables `std` support for dependencies such as `kurbo`.
//! - `libm`: enables `no_std` + `alloc` builds that rely on `libm` for
//!   floating-point math.

#![no_std]

extern crate alloc;

use alloc::collections::BTreeMap;
use core::num::NonZeroU64;
use kurbo::Point;

/// Pointer identifier for tracking multiple concurrent presses.
pub type PointerId = NonZeroU64;

/// Axis along which a recognized swipe travelled.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Axis {
    /// Dominant travel along the x axis.
    Horizontal,
    /// Dominant travel along the y axis.
    Vertical,
}

/// Direction of a recognized swipe along its dominant axis.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Direction {
    /// Horizontal travel toward negative x.
    Left,
    /// Horizontal travel toward positive x.
    Right,
    /// Vertical travel toward negative y.
    Up,
    /// Vertical travel toward positive y.
    Down,
}

/// A recognized swipe gesture.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Swipe {
    /// Dominant axis of the gesture.
    pub axis: Axis,
    /// Direction along the dominant axis.
    pub direction: Direction,
    /// Total x delta from press to release, in the host's coordinate units.
    pub dx: f64,
    /// Total y delta from press to release, in the host's coordinate units.
    pub dy: f64,
    /// Elapsed time from press to release, in milliseconds.
    pub elapsed_ms: u64,
}

/// Result of gesture classification at pointer release.
#[derive(Copy, Clone, Debug, PartialEq)]
pub enum SwipeResult {
    /// The gesture met the configured thresholds.
    Swipe(Swipe),
    /// Sub-threshold, too slow, or no active press for this pointer.
    Ignored,
}

/// State for an active pointer press.
#[derive(Copy, Clone, Debug)]
struct Press {
    /// Pointer position at press time.
    down_position: Point,
    /// Timestamp when the press occurred, in milliseconds.
    down_time: u64,
    /// Most recent pointer position.
    last_position: Point,
}

/// Swipe gesture state machine.
///
/// Tracks active pointer presses and classifies each release as a [`Swipe`] or
/// [`SwipeResult::Ignored`] according to distance and duration thresholds. The
/// machine holds no references to any event source; the host routes pointer
/// events in and acts on the returned classification.
#[derive(Clone, Debug)]
pub struct SwipeState {
    /// Active presses per pointer.
    presses: BTreeMap<PointerId, Press>,
    /// Minimum travel along the dominant axis for a release to count as a swipe.
    pub distance_threshold: f64,
    /// Maximum press-to-release duration in milliseconds, or `None` to skip the
    /// duration check.
    pub time_threshold: Option<u64>,
}

impl SwipeState {
    /// Create a swipe state with default thresholds.
    ///
    /// Defaults to a 50px distance threshold and a 1000ms duration threshold:
    /// a short flick counts, a slow metre-long drag does not.
    pub fn new() -> Self {
        Self::with_thresholds(50.0, Some(1000))
    }

    /// Create a swipe state with custom thresholds.
    ///
    /// # Arguments
    /// * `distance_threshold` - Minimum dominant-axis travel for recognition
    /// * `time_threshold` - Maximum gesture duration in milliseconds, or `None`
    ///   for purely distance-based recognition
    pub fn with_thresholds(distance_threshold: f64, time_threshold: Option<u64>) -> Self {
        Self {
            presses: BTreeMap::new(),
            distance_threshold,
            time_threshold,
        }
    }

    /// Record a pointer down event.
    ///
    /// A second down for the same pointer replaces the existing press.
    ///
    /// # Arguments
    /// * `pointer_id` - Unique pointer identifier, defaults to the primary pointer if `None`
    /// * `position` - Pointer position at press time
    /// * `timestamp` - Event timestamp in milliseconds
    pub fn on_down(&mut self, pointer_id: Option<PointerId>, position: Point, timestamp: u64) {
        let pointer_id = resolve_pointer(pointer_id);
        self.presses.insert(
            pointer_id,
            Press {
                down_position: position,
                down_time: timestamp,
                last_position: position,
            },
        );
    }

    /// Record a pointer move event.
    ///
    /// Returns the `(dx, dy)` deltas accumulated since the press, or `None`
    /// when there is no active press for this pointer. Hosts can use the deltas
    /// for live drag feedback while the gesture is still in flight.
    pub fn on_move(&mut self, pointer_id: Option<PointerId>, position: Point) -> Option<(f64, f64)> {
        let pointer_id = resolve_pointer(pointer_id);
        let press = self.presses.get_mut(&pointer_id)?;
        press.last_position = position;
        Some((
            position.x - press.down_position.x,
            position.y - press.down_position.y,
        ))
    }

    /// Process a pointer up event and classify the gesture.
    ///
    /// Removes the press for this pointer and evaluates the thresholds against
    /// the total press-to-release deltas.
    ///
    /// # Arguments
    /// * `pointer_id` - Pointer identifier, defaults to the primary pointer if `None`
    /// * `position` - Pointer position at release time
    /// * `timestamp` - Event timestamp in milliseconds
    pub fn on_up(
        &mut self,
        pointer_id: Option<PointerId>,
        position: Point,
        timestamp: u64,
    ) -> SwipeResult {
        let pointer_id = resolve_pointer(pointer_id);
        let press = match self.presses.remove(&pointer_id) {
            Some(press) => press,
            None => return SwipeResult::Ignored, // No active press
        };

        let dx = position.x - press.down_position.x;
        let dy = position.y - press.down_position.y;
        let adx = abs(dx);
        let ady = abs(dy);

        let (axis, travel) = if adx >= ady {
            (Axis::Horizontal, adx)
        } else {
            (Axis::Vertical, ady)
        };

        if travel < self.distance_threshold {
            return SwipeResult::Ignored;
        }

        let elapsed_ms = timestamp.saturating_sub(press.down_time);
        if let Some(threshold) = self.time_threshold {
            if elapsed_ms > threshold {
                return SwipeResult::Ignored;
            }
        }

        let direction = match axis {
            Axis::Horizontal if dx < 0.0 => Direction::Left,
            Axis::Horizontal => Direction::Right,
            Axis::Vertical if dy < 0.0 => Direction::Up,
            Axis::Vertical => Direction::Down,
        };

        SwipeResult::Swipe(Swipe {
            axis,
            direction,
            dx,
            dy,
            elapsed_ms,
        })
    }

    /// Discard the press for this pointer without classifying it.
    ///
    /// Use this for pointer-cancel events (for example, when the host window
    /// loses the pointer mid-gesture).
    pub fn cancel(&mut self, pointer_id: Option<PointerId>) {
        let pointer_id = resolve_pointer(pointer_id);
        self.presses.remove(&pointer_id);
    }

    /// Whether this pointer has an active press.
    pub fn is_pressed(&self, pointer_id: Option<PointerId>) -> bool {
        let pointer_id = resolve_pointer(pointer_id);
        self.presses.contains_key(&pointer_id)
    }

    /// Number of pointers with an active press.
    pub fn active_presses(&self) -> usize {
        self.presses.len()
    }

    /// The `(dx, dy)` deltas accumulated so far for this pointer, if pressed.
    pub fn deltas(&self, pointer_id: Option<PointerId>) -> Option<(f64, f64)> {
        let pointer_id = resolve_pointer(pointer_id);
        let press = self.presses.get(&pointer_id)?;
        Some((
            press.last_position.x - press.down_position.x,
            press.last_position.y - press.down_position.y,
        ))
    }
}

impl Default for SwipeState {
    fn default() -> Self {
        Self::new()
    }
}

fn resolve_pointer(pointer_id: Option<PointerId>) -> PointerId {
    // The primary pointer is id 1, which is `NonZeroU64::MIN`.
    pointer_id.unwrap_or(NonZeroU64::MIN)
}

/// Absolute value without pulling in a float math backend.
fn abs(x: f64) -> f64 {
    if x < 0.0 { -x } else { x }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fast_horizontal_drag_is_a_left_swipe() {
        let mut state = SwipeState::new();

        state.on_down(None, Point::new(200.0, 100.0), 1000);
        let result = state.on_up(None, Point::new(100.0, 105.0), 1200);

        match result {
            SwipeResult::Swipe(swipe) => {
                assert_eq!(swipe.axis, Axis::Horizontal);
                assert_eq!(swipe.direction, Direction::Left);
                assert_eq!(swipe.dx, -100.0);
                assert_eq!(swipe.elapsed_ms, 200);
            }
            SwipeResult::Ignored => panic!("expected a swipe"),
        }
        assert!(!state.is_pressed(None));
    }

    #[test]
    fn rightward_drag_reports_right() {
        let mut state = SwipeState::new();

        state.on_down(None, Point::new(0.0, 0.0), 0);
        let result = state.on_up(None, Point::new(80.0, -3.0), 150);

        assert!(matches!(
            result,
            SwipeResult::Swipe(Swipe {
                direction: Direction::Right,
                ..
            })
        ));
    }

    #[test]
    fn sub_threshold_travel_is_ignored() {
        let mut state = SwipeState::with_thresholds(50.0, Some(1000));

        state.on_down(None, Point::new(0.0, 0.0), 0);
        let result = state.on_up(None, Point::new(49.0, 0.0), 100);

        assert_eq!(result, SwipeResult::Ignored);
    }

    #[test]
    fn slow_drag_is_ignored_when_time_threshold_set() {
        let mut state = SwipeState::with_thresholds(50.0, Some(1000));

        state.on_down(None, Point::new(0.0, 0.0), 0);
        let result = state.on_up(None, Point::new(200.0, 0.0), 1500);

        assert_eq!(result, SwipeResult::Ignored);
    }

    #[test]
    fn no_time_threshold_accepts_slow_drags() {
        let mut state = SwipeState::with_thresholds(50.0, None);

        state.on_down(None, Point::new(0.0, 0.0), 0);
        let result = state.on_up(None, Point::new(200.0, 0.0), 60_000);

        assert!(matches!(result, SwipeResult::Swipe(_)));
    }

    #[test]
    fn dominant_axis_picks_vertical_for_steep_drags() {
        let mut state = SwipeState::new();

        state.on_down(None, Point::new(0.0, 0.0), 0);
        let result = state.on_up(None, Point::new(30.0, 120.0), 200);

        match result {
            SwipeResult::Swipe(swipe) => {
                assert_eq!(swipe.axis, Axis::Vertical);
                assert_eq!(swipe.direction, Direction::Down);
            }
            SwipeResult::Ignored => panic!("expected a swipe"),
        }
    }

    #[test]
    fn release_without_press_is_ignored() {
        let mut state = SwipeState::new();
        assert_eq!(state.on_up(None, Point::new(0.0, 0.0), 100), SwipeResult::Ignored);
    }

    #[test]
    fn cancel_discards_the_press() {
        let mut state = SwipeState::new();

        state.on_down(None, Point::new(0.0, 0.0), 0);
        state.cancel(None);

        assert!(!state.is_pressed(None));
        assert_eq!(state.on_up(None, Point::new(200.0, 0.0), 100), SwipeResult::Ignored);
    }

    #[test]
    fn pointers_are_tracked_independently() {
        let mut state = SwipeState::new();
        let a = NonZeroU64::new(7).unwrap();
        let b = NonZeroU64::new(8).unwrap();

        state.on_down(Some(a), Point::new(0.0, 0.0), 0);
        state.on_down(Some(b), Point::new(500.0, 0.0), 10);
        assert_eq!(state.active_presses(), 2);

        let result_a = state.on_up(Some(a), Point::new(100.0, 0.0), 200);
        assert!(matches!(result_a, SwipeResult::Swipe(_)));
        assert!(state.is_pressed(Some(b)));

        let result_b = state.on_up(Some(b), Point::new(501.0, 0.0), 220);
        assert_eq!(result_b, SwipeResult::Ignored);
    }

    #[test]
    fn move_reports_accumulated_deltas() {
        let mut state = SwipeState::new();

        state.on_down(None, Point::new(10.0, 10.0), 0);
        assert_eq!(state.on_move(None, Point::new(30.0, 5.0)), Some((20.0, -5.0)));
        assert_eq!(state.deltas(None), Some((20.0, -5.0)));
        assert_eq!(state.on_move(Some(NonZeroU64::new(9).unwrap()), Point::ZERO), None);
    }
}
