use chrono::{DateTime, Duration, Utc};
use criterion::{criterion_group, criterion_main, BatchSize, Criterion};
use run_tracker::models::{ActiveRun, Sample};
use run_tracker::services::metrics::compute_metrics;
use std::hint::black_box;

/// A two-hour run sampled once per second along a wandering path.
fn long_run() -> Vec<Sample> {
    let start = DateTime::from_timestamp(1_714_550_400, 0).expect("valid timestamp");
    (0..7200)
        .map(|i| {
            let t = i as f64;
            Sample::new(
                37.40 + 0.00003 * t.sin() + 0.000001 * t,
                -122.10 + 0.00003 * t.cos() + 0.000002 * t,
                start + Duration::seconds(i),
            )
        })
        .collect()
}

fn benchmark_metrics(c: &mut Criterion) {
    let samples = long_run();

    let mut group = c.benchmark_group("run_metrics");

    group.bench_function("compute_metrics_7200_samples", |b| {
        b.iter(|| compute_metrics(black_box(&samples)))
    });

    // Live refresh cost: one append followed by a tick-style recompute
    group.bench_function("append_then_refresh", |b| {
        let mut base = ActiveRun::new(Utc::now());
        for sample in &samples {
            base.push(*sample);
        }
        base.metrics();
        let extra = samples[samples.len() - 1];
        b.iter_batched(
            || base.clone(),
            |mut run| {
                run.push(black_box(extra));
                run.metrics()
            },
            BatchSize::LargeInput,
        )
    });

    group.finish();
}

criterion_group!(benches, benchmark_metrics);
criterion_main!(benches);
