// Copyright 2025 the Gridshift Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Gridshift Geometry: row-major slot/cell/pixel conversions.
//!
//! This crate maps between the three coordinate spaces of a fixed-column
//! grid:
//!
//! - **Slot**: a linear index into a dense strip of items, `0..len`.
//! - **Cell**: a `(column, row)` pair, row-major: slot `0` is the top-left
//!   cell, slot `columns` starts the second row.
//! - **Pixel**: a [`kurbo::Point`] in the grid's local space, with the origin
//!   at the top-left corner of cell `(0, 0)`.
//!
//! A [`GridGeometry`] is a fixed column count plus uniform per-cell pixel
//! dimensions. Cell dimensions are expected to already include any inter-item
//! margin, so cell origins tile the plane with no extra spacing.
//!
//! All conversions are pure and allocation-free. Mapping a pixel position
//! back to a slot is a *query*, not a fallible operation: positions outside
//! the grid resolve to `None`.
//!
//! ## Minimal example
//!
//! ```rust
//! use core::num::NonZeroUsize;
//! use gridshift_geometry::{GridCell, GridGeometry};
//! use kurbo::{Point, Size};
//!
//! // Three columns of 100×100 cells.
//! let geometry = GridGeometry::new(NonZeroUsize::new(3).unwrap(), Size::new(100.0, 100.0));
//!
//! assert_eq!(geometry.cell_of_slot(4), GridCell { col: 1, row: 1 });
//! assert_eq!(geometry.origin_of_slot(4), Point::new(100.0, 100.0));
//!
//! // A point in the second row, third column of a 9-item grid.
//! assert_eq!(geometry.slot_at_point(Point::new(250.0, 150.0), 9), Some(5));
//! // Outside the last occupied slot, or left of the grid: no slot.
//! assert_eq!(geometry.slot_at_point(Point::new(250.0, 150.0), 5), None);
//! assert_eq!(geometry.slot_at_point(Point::new(-1.0, 0.0), 9), None);
//! ```
//!
//! This crate is `no_std`.

#![no_std]

use core::num::NonZeroUsize;

use kurbo::{Point, Size};

/// A `(column, row)` grid position.
///
/// Row-major: `row` grows downward, `col` grows to the right.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct GridCell {
    /// Zero-based column.
    pub col: usize,
    /// Zero-based row.
    pub row: usize,
}

/// Fixed column count plus uniform per-cell pixel dimensions.
///
/// Cell dimensions include any configured inter-item margin; consecutive cell
/// origins are exactly `cell.width` / `cell.height` apart.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct GridGeometry {
    columns: NonZeroUsize,
    cell: Size,
}

impl GridGeometry {
    /// Creates a geometry with `columns` columns of `cell`-sized cells.
    ///
    /// Negative cell dimensions are clamped to zero. A zero-sized axis makes
    /// [`slot_at_point`](Self::slot_at_point) resolve nothing; slot → pixel
    /// conversions still work (every origin collapses onto that axis).
    #[must_use]
    pub fn new(columns: NonZeroUsize, cell: Size) -> Self {
        Self {
            columns,
            cell: Size::new(cell.width.max(0.0), cell.height.max(0.0)),
        }
    }

    /// Returns the number of columns.
    #[must_use]
    pub const fn columns(&self) -> usize {
        self.columns.get()
    }

    /// Returns the per-cell pixel dimensions.
    #[must_use]
    pub const fn cell(&self) -> Size {
        self.cell
    }

    /// Returns the cell containing `slot`.
    ///
    /// The result is `(slot % columns, slot / columns)`.
    #[must_use]
    pub const fn cell_of_slot(&self, slot: usize) -> GridCell {
        GridCell {
            col: slot % self.columns.get(),
            row: slot / self.columns.get(),
        }
    }

    /// Returns the top-left pixel position of `cell`.
    #[must_use]
    pub fn origin_of_cell(&self, cell: GridCell) -> Point {
        Point::new(
            cell.col as f64 * self.cell.width,
            cell.row as f64 * self.cell.height,
        )
    }

    /// Returns the top-left pixel position of `slot`.
    #[must_use]
    pub fn origin_of_slot(&self, slot: usize) -> Point {
        self.origin_of_cell(self.cell_of_slot(slot))
    }

    /// Returns the pixel position of the midpoint of `slot`.
    #[must_use]
    pub fn center_of_slot(&self, slot: usize) -> Point {
        let origin = self.origin_of_slot(slot);
        Point::new(
            origin.x + self.cell.width * 0.5,
            origin.y + self.cell.height * 0.5,
        )
    }

    /// Resolves a pixel position to the slot occupying it, for a grid of
    /// `len` items.
    ///
    /// Returns `None` when the position lies left of the grid, right of the
    /// last column, above the first row, or inside a cell at or past `len`.
    /// There is no lower row bound other than `len` itself: the grid grows
    /// downward as items are appended.
    ///
    /// Degenerate (zero-sized) cells resolve nothing.
    #[must_use]
    pub fn slot_at_point(&self, point: Point, len: usize) -> Option<usize> {
        if self.cell.width <= 0.0 || self.cell.height <= 0.0 {
            return None;
        }

        let col = floor_coord(point.x, self.cell.width);
        let row = floor_coord(point.y, self.cell.height);

        if col < 0 || row < 0 {
            return None;
        }
        let (col, row) = (col as usize, row as usize);
        if col >= self.columns.get() {
            return None;
        }

        let slot = row.saturating_mul(self.columns.get()).saturating_add(col);
        (slot < len).then_some(slot)
    }
}

/// Map a pixel coordinate to a cell coordinate along one axis.
///
/// Rounds toward −∞ so that coordinates just below zero land in cell `-1`
/// rather than cell `0`. `cell_size` must be strictly positive.
#[allow(
    clippy::cast_possible_truncation,
    reason = "Cell coordinates far outside isize range are rejected by the caller's bounds checks."
)]
#[inline]
fn floor_coord(value: f64, cell_size: f64) -> isize {
    debug_assert!(
        cell_size > 0.0,
        "floor_coord requires a strictly positive cell size"
    );
    let t = value / cell_size;
    let coord = t as isize;

    // Round towards -∞ (the cast above has already truncated).
    if t < 0.0 && (coord as f64) > t {
        coord.saturating_sub(1)
    } else {
        coord
    }
}
