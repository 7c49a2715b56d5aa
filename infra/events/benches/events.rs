use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};
use herald_event_bus::{EventBus, Handler};
use std::hint::black_box;

// ============================================================================
// Benchmark: Dispatch
// ============================================================================

fn bench_publish(c: &mut Criterion) {
    let mut group = c.benchmark_group("publish");

    for fan_out in [1usize, 8, 64] {
        let bus = EventBus::new();
        for _ in 0..fan_out {
            let accepted = bus.subscribe(
                "bench:tick",
                Handler::new(|event| {
                    black_box(event.event_type());
                }),
            );
            assert!(accepted);
        }

        group.bench_function(BenchmarkId::new("handlers", fan_out), |b| {
            b.iter(|| black_box(bus.publish_with("bench:tick", black_box(42u64))));
        });
    }

    let empty = EventBus::new();
    group.bench_function("no_subscribers", |b| {
        b.iter(|| black_box(empty.publish("bench:silence")));
    });

    group.finish();
}

// ============================================================================
// Benchmark: Registration
// ============================================================================

fn bench_subscribe(c: &mut Criterion) {
    let mut group = c.benchmark_group("subscribe");

    group.bench_function("subscribe_unsubscribe", |b| {
        let bus = EventBus::new();
        b.iter(|| {
            let handler = Handler::new(|_event| {});
            black_box(bus.subscribe("bench:reg", handler.clone()));
            bus.unsubscribe("bench:reg", &handler);
        });
    });

    group.bench_function("duplicate_rejection", |b| {
        let bus = EventBus::new();
        let handler = Handler::new(|_event| {});
        assert!(bus.subscribe("bench:dup", handler.clone()));
        b.iter(|| black_box(bus.subscribe("bench:dup", handler.clone())));
    });

    group.finish();
}

criterion_group!(benches, bench_publish, bench_subscribe);
criterion_main!(benches);
