// Copyright 2025 the Gridshift Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The pointer snapshot read by the engine at each tick.

use kurbo::Point;

/// Last known pointer position and button state.
///
/// Positions are relative to the grid container's top-left corner. The host's
/// input handlers write this state at arbitrary times between ticks; the
/// engine copies one snapshot at the start of each tick and never re-reads
/// it, so interleaved input delivery cannot tear a tick.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct PointerState {
    /// Pointer position relative to the container origin.
    pub position: Point,
    /// Whether the primary button is held.
    pub pressed: bool,
}

impl Default for PointerState {
    fn default() -> Self {
        Self {
            position: Point::ZERO,
            pressed: false,
        }
    }
}
