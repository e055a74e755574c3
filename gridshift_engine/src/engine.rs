// Copyright 2025 the Gridshift Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The reorder engine: drag session lifecycle and the per-tick shift step.

use core::num::NonZeroUsize;

use kurbo::{Point, Size, Vec2};

use gridshift_geometry::GridGeometry;
use gridshift_order::OrderTable;

use crate::config::{ConfigError, EngineConfig};
use crate::events::{DragEvent, Placement, TickOutput};
use crate::pointer::PointerState;

/// An in-progress drag: the grabbed item, its current slot, and where inside
/// the item the pointer grabbed it.
///
/// `slot` tracks the dragged item's *current* slot, not the slot the drag
/// began in; it advances every time a shift fires. `grab_offset` is fixed for
/// the session's lifetime.
#[derive(Clone, Debug)]
struct DragSession<K> {
    item: K,
    slot: usize,
    grab_offset: Vec2,
}

/// Tick-driven drag-reorder engine for a fixed-column grid.
///
/// The engine exclusively owns the order table and the drag session. Hosts
/// feed it pointer samples between ticks and invoke [`tick`](Self::tick) once
/// per frame; see the crate docs for the full protocol.
#[derive(Clone, Debug)]
pub struct ReorderEngine<K> {
    columns: NonZeroUsize,
    margin: Size,
    geometry: Option<GridGeometry>,
    order: OrderTable<K>,
    pointer: PointerState,
    session: Option<DragSession<K>>,
}

impl<K: Clone + PartialEq> ReorderEngine<K> {
    /// Creates an engine from `config`.
    ///
    /// Malformed configuration (zero columns, negative or non-finite
    /// margins) is rejected here, never clamped.
    pub fn new(config: EngineConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        let columns = NonZeroUsize::new(config.columns).ok_or(ConfigError::ZeroColumns)?;
        Ok(Self {
            columns,
            margin: Size::new(config.margin_right, config.margin_bottom),
            geometry: None,
            order: OrderTable::new(),
            pointer: PointerState::default(),
            session: None,
        })
    }

    /// Fixes cell dimensions from one measured item.
    ///
    /// Cell dimensions are the measured size plus the configured right/bottom
    /// margins. The first measurement wins: items are assumed uniform and the
    /// geometry is invariant for the engine's lifetime, so later calls are
    /// ignored. (Mixed item sizes are unsupported.)
    pub fn set_item_size(&mut self, size: Size) {
        if self.geometry.is_none() {
            let cell = Size::new(
                size.width.max(0.0) + self.margin.width,
                size.height.max(0.0) + self.margin.height,
            );
            self.geometry = Some(GridGeometry::new(self.columns, cell));
        }
    }

    /// Appends `identity` at the next slot in row-major order.
    ///
    /// Returns the item's initial (non-animated) placement, or `None` while
    /// geometry is unavailable; the item is still recorded, and its
    /// placement can be recovered via [`reflow`](Self::reflow) once the host
    /// has measured.
    pub fn push_item(&mut self, identity: K) -> Option<Placement<K>> {
        let slot = self.order.push(identity.clone());
        let geometry = self.geometry?;
        Some(Placement {
            item: identity,
            position: geometry.origin_of_slot(slot),
            animated: false,
        })
    }

    /// Yields a non-animated placement for every item at its current slot.
    ///
    /// Empty while geometry is unavailable. Typically used once after
    /// deferred measurement to position items that were pushed before the
    /// host could measure.
    pub fn reflow(&self) -> impl Iterator<Item = Placement<K>> + '_ {
        self.geometry.into_iter().flat_map(|geometry| {
            self.order.iter().map(move |(slot, item)| Placement {
                item: item.clone(),
                position: geometry.origin_of_slot(slot),
                animated: false,
            })
        })
    }

    /// Records the latest pointer position, relative to the container origin.
    pub fn set_pointer_position(&mut self, position: Point) {
        self.pointer.position = position;
    }

    /// Records the latest pressed state of the primary button.
    pub fn set_pointer_pressed(&mut self, pressed: bool) {
        self.pointer.pressed = pressed;
    }

    /// Returns the latest pointer snapshot.
    #[must_use]
    pub const fn pointer(&self) -> PointerState {
        self.pointer
    }

    /// Returns the order table (slot → identity).
    #[must_use]
    pub const fn order(&self) -> &OrderTable<K> {
        &self.order
    }

    /// Returns the grid geometry, once established.
    #[must_use]
    pub const fn geometry(&self) -> Option<&GridGeometry> {
        self.geometry.as_ref()
    }

    /// Returns the identity currently being dragged, if any.
    #[must_use]
    pub fn dragging(&self) -> Option<&K> {
        self.session.as_ref().map(|session| &session.item)
    }

    /// Returns the number of items in the grid.
    #[must_use]
    pub fn len(&self) -> usize {
        self.order.len()
    }

    /// Returns `true` if no items have been added.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// Advances the engine by one frame.
    ///
    /// Reads one snapshot of the pointer state, runs the drag session state
    /// machine, and returns the placements and notifications the host should
    /// apply. While geometry is unavailable this is a refusal: nothing is
    /// read, nothing mutates, the output is empty.
    ///
    /// Must be invoked serially by a single driver; all work is synchronous
    /// and bounded by the distance shifted this tick.
    pub fn tick(&mut self) -> TickOutput<K> {
        let mut out = TickOutput::new();
        let Some(geometry) = self.geometry else {
            return out;
        };
        // One snapshot per tick; input handlers may overwrite `self.pointer`
        // at any time between ticks.
        let pointer = self.pointer;

        match self.session.take() {
            None => {
                // Idle. A held press keeps trying to grab, so a press that
                // starts outside the grid begins a drag if it wanders in.
                if pointer.pressed {
                    self.begin_drag(&geometry, pointer, &mut out);
                }
            }
            Some(mut session) => {
                if pointer.pressed {
                    self.drag_tick(&geometry, pointer, &mut session, &mut out);
                    self.session = Some(session);
                } else {
                    // Release: snap into the current slot and end the session.
                    out.placements.push(Placement {
                        item: session.item.clone(),
                        position: geometry.origin_of_slot(session.slot),
                        animated: true,
                    });
                    out.events.push(DragEvent::Ended(session.item));
                }
            }
        }
        out
    }

    /// Idle → Dragging, if the pointer is over an occupied cell.
    fn begin_drag(
        &mut self,
        geometry: &GridGeometry,
        pointer: PointerState,
        out: &mut TickOutput<K>,
    ) {
        let Some(slot) = geometry.slot_at_point(pointer.position, self.order.len()) else {
            // A press outside any valid cell is a no-op.
            return;
        };
        let Some(item) = self.order.get(slot).cloned() else {
            return;
        };
        let grab_offset = pointer.position - geometry.origin_of_slot(slot);
        self.session = Some(DragSession {
            item: item.clone(),
            slot,
            grab_offset,
        });
        out.events.push(DragEvent::Started(item));
    }

    /// Dragging → Dragging: resolve the target slot, shift if it moved, and
    /// report the dragged item's free-floating position.
    fn drag_tick(
        &mut self,
        geometry: &GridGeometry,
        pointer: PointerState,
        session: &mut DragSession<K>,
        out: &mut TickOutput<K>,
    ) {
        let top_left = pointer.position - session.grab_offset;
        let cell = geometry.cell();
        let center = Point::new(
            top_left.x + cell.width * 0.5,
            top_left.y + cell.height * 0.5,
        );

        // Target resolution is speculative; fast motion frequently lands out
        // of bounds. Skip the shift for this tick and self-correct on the
        // next one.
        if let Some(target) = geometry.slot_at_point(center, self.order.len())
            // Equal slots shift nothing; this guard precedes any direction
            // arithmetic, so a zero span is never divided or signed.
            && target != session.slot
            && self.order.shift(session.slot, target).is_ok()
        {
            // The displaced items now occupy the slots from the old origin
            // toward the target, exclusive of the target itself. Walk them in
            // shift order.
            if session.slot < target {
                for slot in session.slot..target {
                    self.emit_displaced(geometry, slot, out);
                }
            } else {
                for slot in (target + 1..=session.slot).rev() {
                    self.emit_displaced(geometry, slot, out);
                }
            }
            session.slot = target;
        }

        // The dragged item tracks the pointer with zero lag, even on ticks
        // whose target resolution was out of bounds.
        out.placements.push(Placement {
            item: session.item.clone(),
            position: top_left,
            animated: false,
        });
    }

    /// Reports the (post-shift) occupant of `slot` at its new origin.
    fn emit_displaced(&self, geometry: &GridGeometry, slot: usize, out: &mut TickOutput<K>) {
        if let Some(item) = self.order.get(slot) {
            out.placements.push(Placement {
                item: item.clone(),
                position: geometry.origin_of_slot(slot),
                animated: true,
            });
        }
    }
}

#[cfg(test)]
mod tests {
    use alloc::vec::Vec;

    use kurbo::{Point, Size};

    use super::ReorderEngine;
    use crate::config::{ConfigError, EngineConfig};
    use crate::events::{DragEvent, Placement};

    /// A 3-column engine over `len` items with measured 100×100 cells.
    fn engine(len: u32) -> ReorderEngine<u32> {
        let mut engine = ReorderEngine::new(EngineConfig::default()).unwrap();
        engine.set_item_size(Size::new(100.0, 100.0));
        for id in 0..len {
            let _ = engine.push_item(id);
        }
        engine
    }

    fn press(engine: &mut ReorderEngine<u32>, position: Point) {
        engine.set_pointer_position(position);
        engine.set_pointer_pressed(true);
    }

    #[test]
    fn construction_rejects_malformed_config() {
        let zero = EngineConfig {
            columns: 0,
            ..EngineConfig::default()
        };
        assert_eq!(
            ReorderEngine::<u32>::new(zero).err(),
            Some(ConfigError::ZeroColumns)
        );

        let negative = EngineConfig {
            margin_bottom: -4.0,
            ..EngineConfig::default()
        };
        assert_eq!(
            ReorderEngine::<u32>::new(negative).err(),
            Some(ConfigError::InvalidMargin)
        );
    }

    #[test]
    fn tick_refuses_without_geometry() {
        let mut engine: ReorderEngine<u32> = ReorderEngine::new(EngineConfig::default()).unwrap();
        assert!(engine.push_item(0).is_none());
        assert!(engine.push_item(1).is_none());

        press(&mut engine, Point::new(50.0, 50.0));
        let out = engine.tick();
        assert!(out.is_empty());
        assert!(engine.dragging().is_none());
    }

    #[test]
    fn deferred_items_place_after_measurement() {
        let mut engine: ReorderEngine<u32> = ReorderEngine::new(EngineConfig {
            margin_right: 10.0,
            margin_bottom: 20.0,
            ..EngineConfig::default()
        })
        .unwrap();
        for id in 0..4 {
            assert!(engine.push_item(id).is_none());
        }
        assert_eq!(engine.reflow().count(), 0);

        // Measurement arrives late; cells are measured size plus margins.
        engine.set_item_size(Size::new(100.0, 100.0));
        let placements: Vec<Placement<u32>> = engine.reflow().collect();
        assert_eq!(placements.len(), 4);
        assert_eq!(placements[1].position, Point::new(110.0, 0.0));
        assert_eq!(placements[3].position, Point::new(0.0, 120.0));
        assert!(placements.iter().all(|p| !p.animated));

        // Items pushed after measurement place immediately.
        let placed = engine.push_item(4).unwrap();
        assert_eq!(placed.position, Point::new(110.0, 120.0));
    }

    #[test]
    fn first_measurement_wins() {
        let mut engine = engine(3);
        engine.set_item_size(Size::new(7.0, 7.0));
        assert_eq!(engine.geometry().unwrap().cell(), Size::new(100.0, 100.0));
    }

    #[test]
    fn press_outside_bounds_creates_no_session() {
        // Scenario: 9 items, 3 columns, 100×100 cells; press far outside.
        let mut engine = engine(9);
        press(&mut engine, Point::new(1000.0, 1000.0));
        let out = engine.tick();
        assert!(out.is_empty());
        assert!(engine.dragging().is_none());
    }

    #[test]
    fn press_grabs_the_occupant_of_the_cell() {
        let mut engine = engine(9);
        press(&mut engine, Point::new(50.0, 50.0));
        let out = engine.tick();
        assert_eq!(out.events.as_slice(), &[DragEvent::Started(0)]);
        assert!(out.placements.is_empty());
        assert_eq!(engine.dragging(), Some(&0));
    }

    #[test]
    fn held_press_entering_the_grid_starts_a_drag() {
        let mut engine = engine(9);
        press(&mut engine, Point::new(1000.0, 50.0));
        assert!(engine.tick().is_empty());

        // Still held; the pointer wanders into cell 1.
        engine.set_pointer_position(Point::new(150.0, 50.0));
        let out = engine.tick();
        assert_eq!(out.events.as_slice(), &[DragEvent::Started(1)]);
    }

    #[test]
    fn dragging_two_columns_right_shifts_two_items() {
        // Press at (50,50) grabs slot 0; moving the item's center over slot 2
        // slides the two intervening items left.
        let mut engine = engine(9);
        press(&mut engine, Point::new(50.0, 50.0));
        engine.tick();

        engine.set_pointer_position(Point::new(250.0, 50.0));
        let out = engine.tick();

        assert_eq!(engine.order().as_slice(), &[1, 2, 0, 3, 4, 5, 6, 7, 8]);
        assert_eq!(
            out.placements.as_slice(),
            &[
                Placement {
                    item: 1,
                    position: Point::new(0.0, 0.0),
                    animated: true
                },
                Placement {
                    item: 2,
                    position: Point::new(100.0, 0.0),
                    animated: true
                },
                // The dragged item itself, free-floating under the pointer.
                Placement {
                    item: 0,
                    position: Point::new(200.0, 0.0),
                    animated: false
                },
            ]
        );
        assert!(out.events.is_empty());
    }

    #[test]
    fn dragging_backward_emits_displaced_in_shift_order() {
        // Grab slot 4 and move its center over slot 1: the items at slots
        // 1..=3 slide down, reported from the old origin toward the target.
        let mut engine = engine(9);
        press(&mut engine, Point::new(150.0, 150.0));
        engine.tick();

        engine.set_pointer_position(Point::new(150.0, 50.0));
        let out = engine.tick();

        assert_eq!(engine.order().as_slice(), &[0, 4, 1, 2, 3, 5, 6, 7, 8]);
        let displaced: Vec<(u32, Point)> = out
            .placements
            .iter()
            .filter(|p| p.animated)
            .map(|p| (p.item, p.position))
            .collect();
        assert_eq!(
            displaced,
            [
                (3, Point::new(100.0, 100.0)),
                (2, Point::new(0.0, 100.0)),
                (1, Point::new(200.0, 0.0)),
            ]
        );
    }

    #[test]
    fn hovering_within_the_origin_slot_shifts_nothing() {
        let mut engine = engine(9);
        press(&mut engine, Point::new(50.0, 50.0));
        engine.tick();

        // Wiggle near the grab point; the center stays inside cell 0.
        engine.set_pointer_position(Point::new(70.0, 40.0));
        let out = engine.tick();

        assert_eq!(engine.order().as_slice(), &[0, 1, 2, 3, 4, 5, 6, 7, 8]);
        assert_eq!(
            out.placements.as_slice(),
            &[Placement {
                item: 0,
                position: Point::new(20.0, -10.0),
                animated: false
            }]
        );
    }

    #[test]
    fn out_of_bounds_target_skips_the_shift_but_tracks_the_pointer() {
        // Scenario: mid-drag the center resolves to a negative row.
        let mut engine = engine(9);
        press(&mut engine, Point::new(50.0, 50.0));
        engine.tick();

        engine.set_pointer_position(Point::new(50.0, -60.0));
        let out = engine.tick();

        assert_eq!(engine.order().as_slice(), &[0, 1, 2, 3, 4, 5, 6, 7, 8]);
        assert_eq!(
            out.placements.as_slice(),
            &[Placement {
                item: 0,
                position: Point::new(0.0, -110.0),
                animated: false
            }]
        );
    }

    #[test]
    fn shift_work_is_bounded_by_the_span() {
        // Slot 0 → slot 8 in one tick: exactly eight displaced updates.
        let mut engine = engine(9);
        press(&mut engine, Point::new(50.0, 50.0));
        engine.tick();

        engine.set_pointer_position(Point::new(250.0, 250.0));
        let out = engine.tick();
        let displaced = out.placements.iter().filter(|p| p.animated).count();
        assert_eq!(displaced, 8);
        assert_eq!(engine.order().as_slice(), &[1, 2, 3, 4, 5, 6, 7, 8, 0]);
    }

    #[test]
    fn round_trip_within_a_session_restores_the_order() {
        let mut engine = engine(9);
        press(&mut engine, Point::new(50.0, 50.0));
        engine.tick();

        engine.set_pointer_position(Point::new(250.0, 50.0));
        engine.tick();
        assert_eq!(engine.order().as_slice(), &[1, 2, 0, 3, 4, 5, 6, 7, 8]);

        engine.set_pointer_position(Point::new(50.0, 50.0));
        engine.tick();
        assert_eq!(engine.order().as_slice(), &[0, 1, 2, 3, 4, 5, 6, 7, 8]);
    }

    #[test]
    fn release_snaps_into_the_current_slot() {
        // Scenario: release while the dragged item sits at slot 4.
        let mut engine = engine(9);
        press(&mut engine, Point::new(50.0, 50.0));
        engine.tick();
        engine.set_pointer_position(Point::new(150.0, 150.0));
        engine.tick();
        assert_eq!(engine.order().slot_of(&0), Some(4));

        engine.set_pointer_pressed(false);
        let out = engine.tick();
        assert_eq!(
            out.placements.as_slice(),
            &[Placement {
                item: 0,
                position: Point::new(100.0, 100.0),
                animated: true
            }]
        );
        assert_eq!(out.events.as_slice(), &[DragEvent::Ended(0)]);
        assert!(engine.dragging().is_none());

        // A subsequent press starts a fresh session on the new occupant.
        press(&mut engine, Point::new(50.0, 50.0));
        let out = engine.tick();
        assert_eq!(out.events.as_slice(), &[DragEvent::Started(1)]);
    }

    #[test]
    fn ticks_after_release_are_quiet() {
        let mut engine = engine(9);
        press(&mut engine, Point::new(50.0, 50.0));
        engine.tick();
        engine.set_pointer_pressed(false);
        engine.tick();
        assert!(engine.tick().is_empty());
    }

    #[test]
    fn shifts_preserve_the_permutation_across_a_session() {
        let mut engine = engine(9);
        press(&mut engine, Point::new(50.0, 50.0));
        engine.tick();

        for target_center in [
            Point::new(250.0, 250.0),
            Point::new(50.0, 150.0),
            Point::new(250.0, 50.0),
            Point::new(50.0, 50.0),
        ] {
            engine.set_pointer_position(target_center);
            engine.tick();
            let mut seen: Vec<u32> = engine.order().as_slice().to_vec();
            seen.sort_unstable();
            assert_eq!(seen, (0..9).collect::<Vec<_>>(), "lost or duplicated an item");
        }
    }
}
