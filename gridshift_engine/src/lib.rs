// Copyright 2025 the Gridshift Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Gridshift Engine: a tick-driven drag-reorder engine for fixed-column grids.
//!
//! ## Overview
//!
//! The engine owns the reorderable state of a grid: the slot → identity
//! [`OrderTable`], the grid's [`GridGeometry`], the latest [`PointerState`],
//! and an in-progress drag session, if any. A host drives it with exactly one
//! [`tick`](ReorderEngine::tick) per display frame; each tick returns a batch
//! of [`Placement`] updates and [`DragEvent`] notifications for the host's
//! renderer to apply. The engine performs no side effects of its own: no
//! element styling, no event capture, no frame scheduling.
//!
//! While a drag is active the engine resolves the dragged item's midpoint to
//! a target slot every tick and, when the target differs from the item's
//! current slot, shifts the intervening items one slot toward the vacated
//! position. The dragged item's own position tracks the pointer directly and
//! is reported with `animated = false`; displaced items are reported at their
//! new slot origins with `animated = true` so the host can transition them.
//!
//! ## Data flow
//!
//! Pointer samples arrive at arbitrary times through
//! [`set_pointer_position`](ReorderEngine::set_pointer_position) and
//! [`set_pointer_pressed`](ReorderEngine::set_pointer_pressed); the engine
//! reads one snapshot of them at the start of each tick. Everything else
//! (target resolution, order mutation, placement emission) derives from that
//! snapshot plus the engine's own state, so a tick is a bounded, synchronous
//! computation: O(distance shifted) when a shift fires, O(1) otherwise.
//!
//! ## Minimal example
//!
//! ```rust
//! use gridshift_engine::{DragEvent, EngineConfig, ReorderEngine};
//! use kurbo::{Point, Size};
//!
//! let mut engine: ReorderEngine<u32> = ReorderEngine::new(EngineConfig::default()).unwrap();
//!
//! // The host measures one representative item; cells are 100×100.
//! engine.set_item_size(Size::new(100.0, 100.0));
//! for id in 0..9 {
//!     let _ = engine.push_item(id);
//! }
//!
//! // Press on the first cell…
//! engine.set_pointer_position(Point::new(50.0, 50.0));
//! engine.set_pointer_pressed(true);
//! let grabbed = engine.tick();
//! assert_eq!(grabbed.events.as_slice(), &[DragEvent::Started(0)]);
//!
//! // …drag two cells to the right: the two intervening items slide left and
//! // the dragged item reports its free-floating position.
//! engine.set_pointer_position(Point::new(250.0, 50.0));
//! let moved = engine.tick();
//! assert_eq!(moved.placements.len(), 3);
//! assert_eq!(engine.order().as_slice(), &[1, 2, 0, 3, 4, 5, 6, 7, 8]);
//!
//! // …and release: one animated snap into slot 2, then the session is over.
//! engine.set_pointer_pressed(false);
//! let dropped = engine.tick();
//! assert_eq!(dropped.events.as_slice(), &[DragEvent::Ended(0)]);
//! ```
//!
//! ## Geometry establishment
//!
//! Cell dimensions are unknown until the host measures an item and calls
//! [`set_item_size`](ReorderEngine::set_item_size). Until then the engine
//! refuses to run: ticks return an empty [`TickOutput`] and
//! [`push_item`](ReorderEngine::push_item) returns no placement. Items pushed
//! early are still recorded in the order table; once measurement arrives,
//! [`reflow`](ReorderEngine::reflow) yields the deferred placements.
//!
//! ## Features
//!
//! - `std` (default): enables `std` support for dependencies such as `kurbo`.
//! - `libm`: enables `no_std` + `alloc` builds that rely on `libm` for
//!   floating-point math.
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

mod config;
mod engine;
mod events;
mod pointer;

pub use config::{ConfigError, EngineConfig};
pub use engine::ReorderEngine;
pub use events::{DragEvent, Placement, TickOutput};
pub use pointer::PointerState;

pub use gridshift_geometry::{GridCell, GridGeometry};
pub use gridshift_order::OrderTable;
