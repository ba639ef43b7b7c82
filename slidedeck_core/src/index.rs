// Copyright 2025 the Slidedeck Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Index resolution: pure next/previous computation over a slide collection.
//!
//! These functions are total over `(current, len, infinite)`. An empty
//! collection yields `None`, which callers must treat as "no-op" — never as
//! index 0. At the ends of a finite collection the result clamps to `current`
//! (no movement, not an error); in infinite mode it wraps.

/// Index of the slide after `current`.
///
/// Wraps to 0 past the end when `infinite` is set, otherwise clamps to
/// `current`. Returns `None` when the collection is empty.
///
/// ```
/// use slidedeck_core::index::next_index;
///
/// assert_eq!(next_index(1, 3, false), Some(2));
/// assert_eq!(next_index(2, 3, false), Some(2)); // clamped
/// assert_eq!(next_index(2, 3, true), Some(0)); // wrapped
/// assert_eq!(next_index(0, 0, true), None);
/// ```
pub fn next_index(current: usize, len: usize, infinite: bool) -> Option<usize> {
    if len == 0 {
        return None;
    }
    if current + 1 < len {
        Some(current + 1)
    } else if infinite {
        Some(0)
    } else {
        Some(current.min(len - 1))
    }
}

/// Index of the slide before `current`.
///
/// Wraps to `len - 1` past the start when `infinite` is set, otherwise clamps
/// to `current`. Returns `None` when the collection is empty.
///
/// ```
/// use slidedeck_core::index::previous_index;
///
/// assert_eq!(previous_index(1, 3, false), Some(0));
/// assert_eq!(previous_index(0, 3, false), Some(0)); // clamped
/// assert_eq!(previous_index(0, 3, true), Some(2)); // wrapped
/// assert_eq!(previous_index(0, 0, true), None);
/// ```
pub fn previous_index(current: usize, len: usize, infinite: bool) -> Option<usize> {
    if len == 0 {
        return None;
    }
    if current > 0 {
        Some((current - 1).min(len - 1))
    } else if infinite {
        Some(len - 1)
    } else {
        Some(0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn finite_next_is_min_of_increment_and_last() {
        for len in 1..6_usize {
            for current in 0..len {
                assert_eq!(
                    next_index(current, len, false),
                    Some((current + 1).min(len - 1)),
                    "len={len} current={current}"
                );
            }
        }
    }

    #[test]
    fn infinite_next_is_modular_increment() {
        for len in 1..6_usize {
            for current in 0..len {
                assert_eq!(
                    next_index(current, len, true),
                    Some((current + 1) % len),
                    "len={len} current={current}"
                );
            }
        }
    }

    #[test]
    fn finite_previous_is_saturating_decrement() {
        for len in 1..6_usize {
            for current in 0..len {
                assert_eq!(
                    previous_index(current, len, false),
                    Some(current.saturating_sub(1)),
                    "len={len} current={current}"
                );
            }
        }
    }

    #[test]
    fn infinite_previous_is_modular_decrement() {
        for len in 1..6_usize {
            for current in 0..len {
                assert_eq!(
                    previous_index(current, len, true),
                    Some((current + len - 1) % len),
                    "len={len} current={current}"
                );
            }
        }
    }

    #[test]
    fn empty_collection_yields_none() {
        assert_eq!(next_index(0, 0, false), None);
        assert_eq!(next_index(0, 0, true), None);
        assert_eq!(previous_index(0, 0, false), None);
        assert_eq!(previous_index(0, 0, true), None);
    }
}
