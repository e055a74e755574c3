// Copyright 2025 the Gridshift Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! What a tick hands back to the host: placements and drag notifications.

use kurbo::Point;
use smallvec::SmallVec;

/// A position assignment for one item.
///
/// `animated = true` marks updates the host should transition smoothly
/// (items displaced by a shift, the final snap on release); `animated =
/// false` marks positions that must apply immediately (initial placement,
/// the dragged item tracking the pointer with zero lag).
#[derive(Clone, Debug, PartialEq)]
pub struct Placement<K> {
    /// The item being positioned.
    pub item: K,
    /// Top-left pixel position, relative to the container origin.
    pub position: Point,
    /// Whether the host should animate the move.
    pub animated: bool,
}

/// A drag lifecycle notification, for active/settled styling on the host side.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum DragEvent<K> {
    /// A drag session began on this item.
    Started(K),
    /// The drag session on this item ended (pointer released).
    Ended(K),
}

/// Everything one [`tick`](crate::ReorderEngine::tick) produced.
///
/// Placements appear in emission order: displaced items first (in shift
/// order), then the dragged item's own update. Both batches are empty on a
/// quiet tick.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct TickOutput<K> {
    /// Position updates to apply, in order.
    pub placements: SmallVec<[Placement<K>; 8]>,
    /// Drag start/end notifications.
    pub events: SmallVec<[DragEvent<K>; 2]>,
}

impl<K> TickOutput<K> {
    /// Creates an empty output.
    #[must_use]
    pub fn new() -> Self {
        Self {
            placements: SmallVec::new(),
            events: SmallVec::new(),
        }
    }

    /// Returns `true` if the tick produced nothing to apply.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.placements.is_empty() && self.events.is_empty()
    }
}
