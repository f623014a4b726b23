use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use uxlatency_sdk::Tracker;

/// Benchmark a single start/feedback pair on an empty tracker
fn bench_start_feedback_pair(c: &mut Criterion) {
    let tracker = Tracker::new();

    c.bench_function("start_feedback_pair", |b| {
        b.iter(|| {
            tracker.record_start(black_box("button"));
            tracker.record_feedback(black_box("button"));
        });
    });
}

/// Benchmark record_start with a growing number of distinct ids already held
fn bench_start_with_existing_records(c: &mut Criterion) {
    let mut group = c.benchmark_group("record_start_existing");

    for record_count in [10, 100, 1000].iter() {
        let tracker = Tracker::new();
        for i in 0..*record_count {
            let id = format!("element-{}", i);
            tracker.record_start(&id);
            tracker.record_feedback(&id);
        }

        group.throughput(Throughput::Elements(1));
        group.bench_with_input(
            BenchmarkId::from_parameter(record_count),
            record_count,
            |b, _| {
                b.iter(|| tracker.record_start(black_box("element-0")));
            },
        );
    }
    group.finish();
}

/// Benchmark feedback for an id that has no open interaction
fn bench_orphan_feedback(c: &mut Criterion) {
    let tracker = Tracker::new();
    for i in 0..100 {
        tracker.record_start(&format!("element-{}", i));
    }

    c.bench_function("orphan_feedback", |b| {
        b.iter(|| tracker.record_feedback(black_box("missing")));
    });
}

/// Benchmark latency lookups
fn bench_latency_lookup(c: &mut Criterion) {
    let mut group = c.benchmark_group("latency_lookup");

    for record_count in [10, 100, 1000].iter() {
        let tracker = Tracker::new();
        for i in 0..*record_count {
            let id = format!("element-{}", i);
            tracker.record_start(&id);
            tracker.record_feedback(&id);
        }
        let first = "element-0".to_string();

        group.bench_with_input(
            BenchmarkId::from_parameter(record_count),
            record_count,
            |b, _| {
                b.iter(|| tracker.latency(black_box(&first)));
            },
        );
    }
    group.finish();
}

/// Benchmark the guard-based API
fn bench_track_tap_guard(c: &mut Criterion) {
    let tracker = Tracker::new();

    c.bench_function("track_tap_guard", |b| {
        b.iter(|| {
            let _tap = tracker.track_tap(black_box("tab"));
        });
    });
}

criterion_group!(
    benches,
    bench_start_feedback_pair,
    bench_start_with_existing_records,
    bench_orphan_feedback,
    bench_latency_lookup,
    bench_track_tap_guard,
);
criterion_main!(benches);
