// Copyright 2025 the Trellis Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use criterion::{BatchSize, Criterion, Throughput, black_box, criterion_group, criterion_main};
use trellis_identity::{IdentityStore, Key};

fn bench_resolve(c: &mut Criterion) {
    let mut group = c.benchmark_group("identity");
    for &n in &[64usize, 512, 4096] {
        let labels: Vec<String> = (0..n).map(|i| format!("Item {i}###item-{i}")).collect();
        group.throughput(Throughput::Elements(n as u64));

        group.bench_function(format!("claim_n{n}"), |b| {
            b.iter_batched(
                || IdentityStore::<u32>::with_max_entries(n),
                |mut store| {
                    for label in &labels {
                        let key = Key::parse(label);
                        let _ = black_box(store.resolve(&key.hash_segment()));
                    }
                    store
                },
                BatchSize::SmallInput,
            );
        });

        let mut store = IdentityStore::<u32>::with_max_entries(n);
        for label in &labels {
            let _ = store.resolve(&Key::parse(label).hash_segment());
        }
        group.bench_function(format!("hit_n{n}"), |b| {
            b.iter(|| {
                for label in &labels {
                    let key = Key::parse(label);
                    let _ = black_box(store.resolve(&key.hash_segment()));
                }
            });
        });
    }
    group.finish();
}

criterion_group!(benches, bench_resolve);
criterion_main!(benches);
