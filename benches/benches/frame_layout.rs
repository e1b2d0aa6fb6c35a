// Copyright 2025 the Trellis Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use criterion::{Criterion, Throughput, black_box, criterion_group, criterion_main};
use trellis_ui::{Axis, BoxFlags, FrameInput, Key, MonospaceMeasure, Ui, UiConfig};

/// A toolbar row over `rows` rows of `columns` buttons each.
fn declare(ui: &mut Ui<MonospaceMeasure>, rows: usize, columns: usize, labels: &[String]) {
    ui.container(Axis::Y, BoxFlags::DRAW_BACKGROUND, Key::parse("###window"));
    ui.parent(Axis::X, |ui| {
        ui.button("New");
        ui.button("Open");
        ui.button("Save");
    });
    for row in 0..rows {
        ui.parent(Axis::X, |ui| {
            for column in 0..columns {
                ui.button(Key::parse(&labels[row * columns + column]));
            }
        });
    }
    ui.pop();
}

fn bench_frames(c: &mut Criterion) {
    let mut group = c.benchmark_group("frame");
    for &(rows, columns) in &[(4usize, 8usize), (16, 16), (32, 32)] {
        let labels: Vec<String> = (0..rows * columns)
            .map(|i| format!("Cell {i}###cell-{i}"))
            .collect();
        let config = UiConfig::default()
            .with_max_boxes(rows * columns + 16)
            .with_duplicate_key_detection(false);
        let mut ui = Ui::with_config(config, MonospaceMeasure::default());
        // Warm the identity table so the loop measures steady-state frames.
        ui.begin(FrameInput::default());
        declare(&mut ui, rows, columns, &labels);
        ui.end();

        let mut t = 0_u32;
        group.throughput(Throughput::Elements((rows * columns) as u64));
        group.bench_function(format!("declare_layout_{rows}x{columns}"), |b| {
            b.iter(|| {
                t = t.wrapping_add(1);
                let pointer = (f64::from(t % 400), f64::from(t % 300));
                ui.begin(FrameInput::at(pointer, 1.0 / 60.0));
                declare(&mut ui, rows, columns, &labels);
                ui.end();
                black_box(ui.render_list().count())
            });
        });
        group.bench_function(format!("draw_commands_{rows}x{columns}"), |b| {
            b.iter(|| black_box(ui.draw_commands().len()));
        });
    }
    group.finish();
}

criterion_group!(benches, bench_frames);
criterion_main!(benches);
