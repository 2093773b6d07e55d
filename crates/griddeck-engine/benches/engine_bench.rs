//! Benchmarks for the hot engine paths.
//!
//! Run with: cargo bench -p griddeck-engine

use std::hint::black_box;

use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};
use griddeck_engine::{
    ArrangeOptions, EngineConfig, GridMetrics, GridPoint, GridRect, LayoutEngine, UnitPoint,
    WidgetBounds, WidgetId, arrange::arrange, derive_guides, first_fit,
};

const COLUMNS: u16 = 12;

/// Deterministic scattered layout of `n` widgets.
fn make_layout(n: usize) -> Vec<WidgetBounds> {
    (0..n)
        .map(|i| {
            let w = 2 + (i % 4) as u16;
            let x = ((i * 5) % usize::from(COLUMNS - w)) as u16;
            let y = (i * 3 % 17) as u16;
            WidgetBounds::new(
                WidgetId::new(i as u64 + 1).unwrap(),
                GridRect::new(x, y, w, 1 + (i % 3) as u16),
            )
        })
        .collect()
}

fn bench_first_fit(c: &mut Criterion) {
    let mut group = c.benchmark_group("engine/first_fit");
    for n in [4, 16, 64] {
        let occupied = arrange(&make_layout(n), COLUMNS, &ArrangeOptions::default()).layout;
        group.bench_with_input(BenchmarkId::from_parameter(n), &occupied, |b, occupied| {
            b.iter(|| black_box(first_fit(3, 2, occupied, COLUMNS, GridPoint::default(), 0)))
        });
    }
    group.finish();
}

fn bench_arrange(c: &mut Criterion) {
    let mut group = c.benchmark_group("engine/arrange");
    for n in [4, 16, 64] {
        let layout = make_layout(n);
        group.bench_with_input(BenchmarkId::from_parameter(n), &layout, |b, layout| {
            b.iter(|| black_box(arrange(layout, COLUMNS, &ArrangeOptions::default())))
        });
    }
    group.finish();
}

fn bench_guides(c: &mut Criterion) {
    let metrics = GridMetrics::new(COLUMNS, 1200.0, 40.0).unwrap();
    let mut group = c.benchmark_group("engine/derive_guides");
    for n in [4, 16, 64] {
        let layout = make_layout(n);
        group.bench_with_input(BenchmarkId::from_parameter(n), &layout, |b, layout| {
            b.iter(|| black_box(derive_guides(layout, None, &metrics)))
        });
    }
    group.finish();
}

fn bench_drag_move(c: &mut Criterion) {
    let mut group = c.benchmark_group("engine/drag_move");
    for n in [4, 16, 64] {
        let grid = GridMetrics::new(COLUMNS, 1200.0, 40.0).unwrap();
        let layout = arrange(&make_layout(n), COLUMNS, &ArrangeOptions::default()).layout;
        let dragged = layout[0].id;
        let mut engine = LayoutEngine::new(EngineConfig::new(grid));
        engine.begin_drag(&layout, dragged);
        group.bench_with_input(BenchmarkId::from_parameter(n), &layout, |b, layout| {
            b.iter(|| black_box(engine.drag_move(layout, dragged, UnitPoint::new(3.4, 1.7))))
        });
    }
    group.finish();
}

criterion_group!(
    benches,
    bench_first_fit,
    bench_arrange,
    bench_guides,
    bench_drag_move
);
criterion_main!(benches);
