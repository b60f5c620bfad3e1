//! Benchmarks for pulse-cells
//!
//! Run with: cargo bench

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use pulse_cells::cell;

// =============================================================================
// CELL BENCHMARKS
// =============================================================================

fn bench_cell_create(c: &mut Criterion) {
    c.bench_function("cell_create", |b| b.iter(|| black_box(cell(0i32))));
}

fn bench_cell_get(c: &mut Criterion) {
    let s = cell(42i32);
    c.bench_function("cell_get", |b| b.iter(|| black_box(s.get())));
}

fn bench_cell_set_value_no_observers(c: &mut Criterion) {
    let s = cell(0i32);
    c.bench_function("cell_set_value_no_observers", |b| {
        b.iter(|| s.set_value(|n| black_box(n + 1)))
    });
}

// =============================================================================
// FAN-OUT BENCHMARKS
// =============================================================================

fn bench_subscriber_fan_out(c: &mut Criterion) {
    let mut group = c.benchmark_group("subscriber_fan_out");

    for count in [1, 10, 100, 1000] {
        group.bench_with_input(BenchmarkId::new("width", count), &count, |b, &count| {
            let s = cell(0i32);
            for _ in 0..count {
                s.subscribe(|v| {
                    black_box(*v);
                });
            }

            b.iter(|| s.set_value(|n| black_box(n + 1)));
        });
    }

    group.finish();
}

fn bench_map_chain_depth(c: &mut Criterion) {
    let mut group = c.benchmark_group("map_chain");

    for depth in [1, 5, 10, 20] {
        group.bench_with_input(BenchmarkId::new("depth", depth), &depth, |b, &depth| {
            let s = cell(1i32);

            let mut current = s.map(|n| n + 1);
            for _ in 1..depth {
                current = current.map(|n| n + 1);
            }

            b.iter(|| {
                s.set_value(|n| black_box(n + 1));
                black_box(current.get())
            });
        });
    }

    group.finish();
}

fn bench_apply_combination(c: &mut Criterion) {
    let add = cell(|a: &i32| {
        let a = *a;
        move |b: &i32| a + b
    });
    let x = cell(0i32);
    let y = cell(0i32);
    let combined = add.apply(&x).apply(&y);

    c.bench_function("apply_update_one_source", |b| {
        b.iter(|| {
            x.set_value(|n| black_box(n + 1));
            black_box(combined.get())
        })
    });
}

fn bench_flat_map_rebind(c: &mut Criterion) {
    let outer = cell(0i32);
    let derived = outer.flat_map(|n| cell(n * 2));

    c.bench_function("flat_map_rebind", |b| {
        b.iter(|| {
            outer.set_value(|n| black_box(n + 1));
            black_box(derived.get())
        })
    });
}

// =============================================================================
// STRESS TESTS
// =============================================================================

fn bench_many_cells(c: &mut Criterion) {
    let mut group = c.benchmark_group("many_cells");

    for count in [100, 1000, 10000] {
        group.bench_with_input(BenchmarkId::new("create", count), &count, |b, &count| {
            b.iter(|| {
                let cells: Vec<_> = (0..count).map(cell).collect();
                black_box(cells)
            })
        });
    }

    group.finish();
}

// =============================================================================
// CRITERION SETUP
// =============================================================================

criterion_group!(
    cell_benches,
    bench_cell_create,
    bench_cell_get,
    bench_cell_set_value_no_observers,
);

criterion_group!(
    fan_out_benches,
    bench_subscriber_fan_out,
    bench_map_chain_depth,
    bench_apply_combination,
    bench_flat_map_rebind,
);

criterion_group!(stress_benches, bench_many_cells);

criterion_main!(cell_benches, fan_out_benches, stress_benches);
