// Copyright 2025 the Trellis Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Hover animation.
//!
//! Move the pointer onto a button, click it, then move away, and watch the
//! displayed background: escalation snaps, relaxing is smoothed.
//!
//! Run:
//! - `cargo run -p trellis_demos --example hover_animation`

use kurbo::Point;
use trellis_ui::{Axis, BoxFlags, FrameInput, MonospaceMeasure, Ui};

fn frame(ui: &mut Ui<MonospaceMeasure>, input: FrameInput) {
    ui.begin(input);
    ui.container(Axis::X, BoxFlags::empty(), None);
    let id = ui.button("Hover me");
    ui.pop();
    ui.end();

    let b = ui.get(id);
    log::info!("frame {} kind {:?}", ui.frame_index(), b.style_kind());
    println!(
        "frame {:>2}  hovered={:<5} clicked={:<5} kind={:<8?} background.r={:.3}",
        ui.frame_index(),
        b.hovered(),
        b.clicked(),
        b.style_kind(),
        b.display_style().background.r,
    );
}

fn main() {
    env_logger::init();

    let dt = 1.0 / 60.0;
    let away = Point::new(-100.0, -100.0);
    let mut ui = Ui::new(MonospaceMeasure::default());

    frame(&mut ui, FrameInput::at(away, dt));
    let center = ui
        .render_list()
        .next()
        .map(|item| item.rect.center())
        .unwrap_or(away);

    frame(&mut ui, FrameInput::at(center, dt));
    frame(&mut ui, FrameInput::at(center, dt).with_primary_click());
    for _ in 0..10 {
        frame(&mut ui, FrameInput::at(away, dt));
    }
}
