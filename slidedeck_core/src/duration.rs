// Copyright 2025 the Slidedeck Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! CSS duration parsing and per-property transition duration maps.
//!
//! The deck never hard-codes how long a cross-fade takes. It reads the
//! durations the host has declared on the relevant nodes (the container's
//! `height` transition, a slide's `opacity` transition) and schedules its
//! settle timers from those. An undeclared or unparseable duration behaves as
//! zero — an instant transition.

use alloc::string::String;
use hashbrown::HashMap;

/// Parse a CSS time value into milliseconds.
///
/// Accepts a leading decimal number followed by a unit, `s` or `ms`
/// (case-insensitive). Any other unit, or input with no number-unit pair at
/// all, parses as 0. Fractional milliseconds are truncated.
///
/// ```
/// use slidedeck_core::duration::css_time_to_ms;
///
/// assert_eq!(css_time_to_ms("300ms"), 300);
/// assert_eq!(css_time_to_ms("12.5s"), 12500);
/// assert_eq!(css_time_to_ms("0s"), 0);
/// assert_eq!(css_time_to_ms("fast"), 0);
/// assert_eq!(css_time_to_ms("5"), 0); // unit required
/// ```
#[expect(
    clippy::cast_possible_truncation,
    reason = "sub-millisecond precision is deliberately dropped"
)]
pub fn css_time_to_ms(input: &str) -> u64 {
    let bytes = input.as_bytes();
    let start = match bytes.iter().position(|b| b.is_ascii_digit() || *b == b'.') {
        Some(start) => start,
        None => return 0,
    };
    let number_end = start
        + bytes[start..]
            .iter()
            .position(|b| !b.is_ascii_digit() && *b != b'.')
            .unwrap_or(bytes.len() - start);
    let unit_end = number_end
        + bytes[number_end..]
            .iter()
            .position(|b| !b.is_ascii_alphabetic())
            .unwrap_or(bytes.len() - number_end);

    let value: f64 = match input[start..number_end].parse() {
        Ok(value) => value,
        Err(_) => return 0,
    };
    let unit = &input[number_end..unit_end];

    if unit.eq_ignore_ascii_case("ms") {
        value.max(0.0) as u64
    } else if unit.eq_ignore_ascii_case("s") {
        (value.max(0.0) * 1000.0) as u64
    } else {
        0
    }
}

/// Fold declared `(property, duration)` pairs into a property → milliseconds map.
///
/// Later entries for the same property overwrite earlier ones, matching how a
/// later declaration wins in a style system.
///
/// ```
/// use slidedeck_core::duration::duration_map;
///
/// let map = duration_map([
///     ("height".to_string(), "0.2s".to_string()),
///     ("opacity".to_string(), "300ms".to_string()),
/// ]);
/// assert_eq!(map.get("height"), Some(&200));
/// assert_eq!(map.get("opacity"), Some(&300));
/// assert_eq!(map.get("width"), None);
/// ```
pub fn duration_map(pairs: impl IntoIterator<Item = (String, String)>) -> HashMap<String, u64> {
    let mut map = HashMap::new();
    for (property, duration) in pairs {
        map.insert(property, css_time_to_ms(&duration));
    }
    map
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::string::ToString;

    #[test]
    fn milliseconds_parse_directly() {
        assert_eq!(css_time_to_ms("300ms"), 300);
        assert_eq!(css_time_to_ms("1.5ms"), 1);
    }

    #[test]
    fn seconds_scale_by_a_thousand() {
        assert_eq!(css_time_to_ms("2s"), 2000);
        assert_eq!(css_time_to_ms("0.25s"), 250);
        assert_eq!(css_time_to_ms("12.5S"), 12500);
    }

    #[test]
    fn junk_parses_as_zero() {
        assert_eq!(css_time_to_ms(""), 0);
        assert_eq!(css_time_to_ms("fast"), 0);
        assert_eq!(css_time_to_ms("5"), 0);
        assert_eq!(css_time_to_ms("5min"), 0);
        assert_eq!(css_time_to_ms("..s"), 0);
    }

    #[test]
    fn leading_whitespace_is_tolerated() {
        // Computed-style lists come back comma separated with stray spaces.
        assert_eq!(css_time_to_ms(" 150ms"), 150);
    }

    #[test]
    fn map_keeps_last_declaration_per_property() {
        let map = duration_map([
            ("height".to_string(), "1s".to_string()),
            ("height".to_string(), "250ms".to_string()),
            ("opacity".to_string(), "oops".to_string()),
        ]);
        assert_eq!(map.get("height"), Some(&250));
        assert_eq!(map.get("opacity"), Some(&0));
    }
}
