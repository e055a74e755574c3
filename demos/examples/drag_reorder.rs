// Copyright 2025 the Gridshift Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Scripted drag through a 3×3 grid, one engine tick per simulated frame.
//!
//! This example stands in for the host glue the engine deliberately leaves
//! out: it plays the role of the input handlers (feeding pointer samples),
//! the frame driver (calling `tick` once per frame), and the renderer
//! (printing the placements it would apply as transforms).
//!
//! Run:
//! - `cargo run -p gridshift_demos --example drag_reorder`

use gridshift_engine::{DragEvent, EngineConfig, Placement, ReorderEngine};
use kurbo::{Point, Size};

/// One scripted input sample: where the pointer is and whether it is down.
struct Frame {
    label: &'static str,
    position: Point,
    pressed: bool,
}

fn apply(placement: &Placement<char>) {
    let style = if placement.animated { "transition" } else { "immediate" };
    println!(
        "  place '{}' at ({:>6.1}, {:>6.1})  [{style}]",
        placement.item, placement.position.x, placement.position.y
    );
}

fn main() {
    let mut engine: ReorderEngine<char> = ReorderEngine::new(EngineConfig {
        margin_right: 8.0,
        margin_bottom: 8.0,
        ..EngineConfig::default()
    })
    .expect("default column count is valid");

    // The "renderer" measures one representative 92×92 item; with margins the
    // grid tiles at 100×100.
    engine.set_item_size(Size::new(92.0, 92.0));

    println!("== Initial placement ==");
    for id in 'a'..='i' {
        if let Some(placement) = engine.push_item(id) {
            apply(&placement);
        }
    }

    // Press inside cell 0, sweep right across the top row, drop down a row,
    // then release. Each sample is one display frame.
    let script = [
        Frame {
            label: "press on 'a'",
            position: Point::new(50.0, 50.0),
            pressed: true,
        },
        Frame {
            label: "drag toward column 1",
            position: Point::new(140.0, 55.0),
            pressed: true,
        },
        Frame {
            label: "drag toward column 2",
            position: Point::new(250.0, 60.0),
            pressed: true,
        },
        Frame {
            label: "drag down into row 1",
            position: Point::new(255.0, 160.0),
            pressed: true,
        },
        Frame {
            label: "release",
            position: Point::new(255.0, 160.0),
            pressed: false,
        },
    ];

    for frame in script {
        println!("\n== Frame: {} ==", frame.label);
        engine.set_pointer_position(frame.position);
        engine.set_pointer_pressed(frame.pressed);

        let out = engine.tick();
        for event in &out.events {
            match event {
                DragEvent::Started(item) => println!("  drag started on '{item}'"),
                DragEvent::Ended(item) => println!("  drag ended on '{item}'"),
            }
        }
        for placement in &out.placements {
            apply(placement);
        }
        if out.is_empty() {
            println!("  (quiet frame)");
        }
    }

    println!("\n== Final order ==");
    let order: String = engine.order().as_slice().iter().collect();
    println!("  {order}");
}
