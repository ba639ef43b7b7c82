// Copyright 2025 the Slidedeck Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Settle timers: cancellable one-shot deadlines for timed visual transitions.
//!
//! A transition is "settled" once its declared duration has elapsed; at that
//! moment the deck reverts the transient measuring treatment to steady state.
//! Each timer is a tiny state machine, `Idle | Pending { deadline }`. Arming a
//! pending timer supersedes it — deadlines never stack, which is the deck's
//! sole concurrency-correctness mechanism.
//!
//! The host drives time: it passes millisecond timestamps into the deck, and
//! the deck calls [`Settle::fire`] from its tick.

/// One-shot, cancellable settle timer.
///
/// ```
/// use slidedeck_core::settle::Settle;
///
/// let mut settle = Settle::new();
/// settle.arm(1000, 250);
/// assert!(!settle.fire(1100)); // not due yet
/// assert!(settle.fire(1250)); // due, fires once
/// assert!(!settle.fire(1300)); // already fired
/// ```
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct Settle {
    state: State,
}

#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
enum State {
    #[default]
    Idle,
    Pending {
        deadline: u64,
    },
}

impl Settle {
    /// Create an idle timer.
    pub fn new() -> Self {
        Self { state: State::Idle }
    }

    /// Arm the timer to fire `duration_ms` after `now`.
    ///
    /// Supersedes any pending deadline. A zero duration fires on the next
    /// [`Settle::fire`] at the same timestamp — an instant transition.
    pub fn arm(&mut self, now: u64, duration_ms: u64) {
        self.state = State::Pending {
            deadline: now.saturating_add(duration_ms),
        };
    }

    /// Cancel a pending deadline, returning the timer to idle.
    pub fn cancel(&mut self) {
        self.state = State::Idle;
    }

    /// Whether a deadline is pending.
    pub fn is_pending(&self) -> bool {
        matches!(self.state, State::Pending { .. })
    }

    /// Fire the timer if its deadline has passed.
    ///
    /// Returns `true` exactly once per armed deadline; the timer is idle
    /// afterwards.
    pub fn fire(&mut self, now: u64) -> bool {
        match self.state {
            State::Pending { deadline } if now >= deadline => {
                self.state = State::Idle;
                true
            }
            _ => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fires_once_at_deadline() {
        let mut settle = Settle::new();
        settle.arm(0, 200);

        assert!(!settle.fire(199));
        assert!(settle.is_pending());
        assert!(settle.fire(200));
        assert!(!settle.is_pending());
        assert!(!settle.fire(10_000));
    }

    #[test]
    fn zero_duration_fires_at_the_same_timestamp() {
        let mut settle = Settle::new();
        settle.arm(500, 0);
        assert!(settle.fire(500));
    }

    #[test]
    fn rearming_supersedes_the_pending_deadline() {
        let mut settle = Settle::new();
        settle.arm(0, 100);
        settle.arm(50, 100);

        assert!(!settle.fire(100)); // original deadline no longer counts
        assert!(settle.fire(150));
    }

    #[test]
    fn cancel_returns_to_idle() {
        let mut settle = Settle::new();
        settle.arm(0, 100);
        settle.cancel();

        assert!(!settle.is_pending());
        assert!(!settle.fire(1000));
    }

    #[test]
    fn idle_timer_never_fires() {
        let mut settle = Settle::new();
        assert!(!settle.fire(0));
        assert!(!settle.fire(u64::MAX));
    }
}
