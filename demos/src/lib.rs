// Copyright 2025 the Slidedeck Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Runnable demos for the slidedeck crates.
//!
//! This crate has no library content of its own; see the programs under
//! `examples/`.
