use std::sync::Arc;

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use pulsegate_ingest::{Bpm, LatestRelay};

/// Benchmark the producer-side overwrite (hot path of the receive loop)
fn bench_write(c: &mut Criterion) {
    let relay = LatestRelay::new();

    c.bench_function("relay_write", |b| {
        b.iter(|| {
            relay.write(black_box(Bpm::new(92)));
        });
    });
}

/// Benchmark the consumer-side drain (hot path of the tick loop)
fn bench_drain(c: &mut Criterion) {
    let relay = LatestRelay::new();

    c.bench_function("relay_drain", |b| {
        b.iter(|| {
            relay.write(Bpm::new(92));
            black_box(relay.drain());
        });
    });
}

/// Benchmark write/drain under producer contention
fn bench_contended_drain(c: &mut Criterion) {
    let relay = Arc::new(LatestRelay::new());
    let stop = Arc::new(std::sync::atomic::AtomicBool::new(false));

    let writer = {
        let relay = relay.clone();
        let stop = stop.clone();
        std::thread::spawn(move || {
            let mut bpm = 60u16;
            while !stop.load(std::sync::atomic::Ordering::Relaxed) {
                relay.write(Bpm::new(bpm));
                bpm = 60 + (bpm + 1) % 60;
            }
        })
    };

    c.bench_function("relay_drain_contended", |b| {
        b.iter(|| {
            black_box(relay.drain());
        });
    });

    stop.store(true, std::sync::atomic::Ordering::Relaxed);
    writer.join().unwrap();
}

criterion_group!(benches, bench_write, bench_drain, bench_contended_drain);
criterion_main!(benches);
