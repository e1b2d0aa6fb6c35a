// Copyright 2025 the Trellis Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Basic frame.
//!
//! Declare a small panel for a few frames and print the draw commands.
//! A counter keeps its identity while its label changes.
//!
//! Run:
//! - `RUST_LOG=trellis_ui=trace cargo run -p trellis_demos --example basic_frame`

use trellis_ui::{Axis, BoxFlags, DrawCommand, FrameInput, Key, MonospaceMeasure, Ui};

fn main() {
    env_logger::init();

    let mut ui = Ui::new(MonospaceMeasure::default());
    for count in 0..3 {
        ui.begin(FrameInput::default());
        let root = ui.container(
            Axis::Y,
            BoxFlags::DRAW_BACKGROUND | BoxFlags::DRAW_BORDER,
            Key::parse("###panel"),
        );
        ui.set_origin(root, (20.0, 20.0));

        let label = format!("Count: {count}###counter");
        let counter = ui.text(Key::parse(&label));
        ui.parent(Axis::X, |ui| {
            ui.button("Save##1");
            ui.button("Save##2");
        });
        ui.pop();
        ui.end();

        println!(
            "frame {}: counter {:?} first_frame={} rect={:?}",
            ui.frame_index(),
            counter,
            ui.get(counter).is_first_frame(),
            ui.get(counter).display_rect(),
        );
    }

    println!("draw commands:");
    for command in ui.draw_commands() {
        match command {
            DrawCommand::Rectangle { rect, fill, .. } => {
                println!("  rect {rect:?} fill {:?}", fill.to_array());
            }
            DrawCommand::Text {
                origin,
                text,
                font_size,
                ..
            } => println!("  text {text:?} at {origin:?} size {font_size}"),
        }
    }
}
