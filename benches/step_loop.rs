// SPDX-FileCopyrightText: Copyright (c) 2024 NVIDIA CORPORATION & AFFILIATES. All rights reserved.
// SPDX-License-Identifier: Apache-2.0
//! Benchmarks for the bounded step loop.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use strobe::driver::{Driver, RunConfig};
use strobe::full_adder::FullAdderTb;

fn bench_step_loop(c: &mut Criterion) {
    let mut group = c.benchmark_group("step_loop");

    for steps in [100u64, 1000, 10000] {
        group.bench_with_input(
            BenchmarkId::new("full_adder_held_in_reset", steps),
            &steps,
            |b, &steps| {
                let dir = tempfile::tempdir().unwrap();
                let path = dir.path().join("bench.vcd");

                b.iter(|| {
                    // Reset stays asserted, so the model never finishes and
                    // the loop runs the full budget.
                    let config = RunConfig::new(steps, &path);
                    let mut driver = Driver::new(FullAdderTb::new(), config);
                    black_box(driver.run().unwrap())
                });
            },
        );
    }

    group.finish();
}

criterion_group!(benches, bench_step_loop);
criterion_main!(benches);
