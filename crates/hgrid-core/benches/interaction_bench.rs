//! Benchmark: pointer hit-testing and slide updates.
//!
//! Run with: `cargo bench -p hgrid-core --bench interaction_bench`
//!
//! Pointer samples arrive at display rate (60–120 Hz) and every sample does a
//! bounds lookup, so the tracker's per-sample cost bounds how large a grid
//! stays responsive. The registry scan is compared against the arithmetic
//! lookup in `GridLayout`.

use std::hint::black_box;
use std::time::Duration;

use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};
use hgrid_core::{
    GridConfig, GridLayout, GridTouchTracker, Instant, NullPort, Point, SlideConfig,
    SlideConfirmController, Size, rubber_band,
};

const VIEW: Size = Size::new(400.0, 400.0);

fn sample_path(len: usize) -> Vec<Point> {
    (0..len)
        .map(|i| {
            let t = i as f64 / len as f64;
            Point::new(400.0 * t, 200.0 + 150.0 * (t * 12.0).sin())
        })
        .collect()
}

// ===========================================================================
// Grid hit-testing
// ===========================================================================

fn bench_hit_test(c: &mut Criterion) {
    let mut group = c.benchmark_group("hit_test");
    let path = sample_path(256);

    for dim in [5u16, 10, 16, 20] {
        let config = GridConfig::with_dimensions(dim, dim);
        let layout = GridLayout::fit(VIEW, &config);
        let mut tracker = GridTouchTracker::new(config, NullPort).unwrap();
        tracker.layout(VIEW);

        group.bench_with_input(BenchmarkId::new("registry_scan", dim), &path, |b, path| {
            b.iter(|| {
                for &p in path {
                    black_box(tracker.cell_at(p));
                }
            });
        });
        group.bench_with_input(BenchmarkId::new("arithmetic", dim), &path, |b, path| {
            b.iter(|| {
                for &p in path {
                    black_box(layout.cell_at(p));
                }
            });
        });
    }
    group.finish();
}

fn bench_pointer_stream(c: &mut Criterion) {
    let path = sample_path(512);
    let frame = Duration::from_millis(8);

    c.bench_function("pointer_stream/16x16", |b| {
        let mut tracker = GridTouchTracker::new(GridConfig::with_dimensions(16, 16), NullPort)
            .unwrap();
        tracker.layout(VIEW);
        b.iter(|| {
            let mut now = Instant::now();
            for &p in &path {
                black_box(tracker.on_pointer_moved(p, now));
                now += frame;
            }
            tracker.on_pointer_up();
            black_box(tracker.tick(now + tracker.highlight_duration()));
        });
    });
}

// ===========================================================================
// Slide
// ===========================================================================

fn bench_slide(c: &mut Criterion) {
    let mut group = c.benchmark_group("slide");

    group.bench_function("rubber_band", |b| {
        b.iter(|| black_box(rubber_band(black_box(37.5), black_box(37.5), black_box(4.5))));
    });

    group.bench_function("drag_release_reset", |b| {
        b.iter(|| {
            let mut slider = SlideConfirmController::new(SlideConfig::default(), NullPort).unwrap();
            let now = Instant::now();
            for delta in (1..=30).map(|d| f64::from(d) * 10.0) {
                black_box(slider.on_drag_update(delta, 420.0, now));
            }
            slider.on_drag_end(now);
            black_box(slider.tick(now + Duration::from_secs(1)))
        });
    });

    group.finish();
}

criterion_group!(benches, bench_hit_test, bench_pointer_stream, bench_slide);
criterion_main!(benches);
