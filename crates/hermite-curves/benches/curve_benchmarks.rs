//! Benchmark tests for curve evaluation.
//!
//! Run with: cargo bench --bench curve_benchmarks

use criterion::{BenchmarkId, Criterion, Throughput, criterion_group, criterion_main};
use hermite_curves::{Curve, KeyFrame, Segment, WrapMode};

fn inputs(start: f64, end: f64) -> Vec<f64> {
    (0..=1000)
        .map(|i| start + (end - start) * f64::from(i) / 1000.0)
        .collect()
}

fn weighted_curve(keys: u32) -> Curve {
    Curve::from_keyframes((0..keys).map(|i| {
        let x = f64::from(i);
        let y = if i % 2 == 0 { 0.0 } else { 1.0 };
        KeyFrame::new(x, y)
            .with_tangents(0.5, -0.5)
            .with_in_weight(0.2)
            .with_out_weight(0.7)
    }))
    .unwrap_or_default()
}

fn bench_segment_unweighted(c: &mut Criterion) {
    let segment = Segment::from_keys(
        &KeyFrame::new(0.0, 0.0).with_tangents(0.0, 1.0),
        &KeyFrame::new(1.0, 1.0).with_tangents(1.0, 0.0),
    );
    let inputs = inputs(0.0, 1.0);

    c.bench_function("segment_evaluate_unweighted", |b| {
        b.iter(|| {
            for &input in &inputs {
                std::hint::black_box(segment.evaluate(std::hint::black_box(input)));
            }
        });
    });
}

fn bench_segment_weighted(c: &mut Criterion) {
    let segment = Segment::from_keys(
        &KeyFrame::new(0.0, 0.0)
            .with_tangents(0.0, 1.0)
            .with_out_weight(0.8),
        &KeyFrame::new(1.0, 1.0)
            .with_tangents(1.0, 0.0)
            .with_in_weight(0.15),
    );
    let inputs = inputs(0.0, 1.0);

    c.bench_function("segment_evaluate_weighted", |b| {
        b.iter(|| {
            for &input in &inputs {
                std::hint::black_box(segment.evaluate(std::hint::black_box(input)));
            }
        });
    });
}

fn bench_curve_evaluate_by_key_count(c: &mut Criterion) {
    let mut group = c.benchmark_group("curve_evaluate");
    group.throughput(Throughput::Elements(1001));

    for keys in [2u32, 8, 64] {
        let curve = weighted_curve(keys);
        let inputs = inputs(0.0, f64::from(keys - 1));
        group.bench_with_input(BenchmarkId::from_parameter(keys), &inputs, |b, inputs| {
            b.iter(|| {
                for &input in inputs {
                    std::hint::black_box(curve.evaluate(std::hint::black_box(input)));
                }
            });
        });
    }

    group.finish();
}

fn bench_curve_wrapped(c: &mut Criterion) {
    let curve = weighted_curve(8);
    let inputs = inputs(-50.0, 50.0);

    for mode in WrapMode::ALL {
        c.bench_function(&format!("curve_evaluate_wrapped_{}", mode), |b| {
            b.iter(|| {
                for &input in &inputs {
                    std::hint::black_box(curve.evaluate_with(std::hint::black_box(input), mode, mode));
                }
            });
        });
    }
}

fn bench_control_point_refresh(c: &mut Criterion) {
    let keys = weighted_curve(64).keyframes().to_vec();

    c.bench_function("control_point_refresh_64", |b| {
        b.iter(|| {
            let mut curve = Curve::new();
            if curve.set_keyframes(keys.iter().copied()).is_ok() {
                std::hint::black_box(curve.segments().len());
            }
        });
    });
}

fn bench_lut_creation(c: &mut Criterion) {
    let curve = weighted_curve(8);

    c.bench_function("lut_creation", |b| {
        b.iter(|| std::hint::black_box(curve.to_lut()));
    });
}

fn bench_lut_lookup(c: &mut Criterion) {
    let curve = weighted_curve(8);
    let lut = curve.to_lut();
    let inputs = inputs(0.0, 7.0);

    let mut group = c.benchmark_group("lut");
    group.throughput(Throughput::Elements(1001));

    group.bench_function("lookup_loop", |b| {
        b.iter(|| {
            for &input in &inputs {
                std::hint::black_box(lut.lookup(std::hint::black_box(input)));
            }
        });
    });

    group.finish();
}

criterion_group!(
    benches,
    bench_segment_unweighted,
    bench_segment_weighted,
    bench_curve_evaluate_by_key_count,
    bench_curve_wrapped,
    bench_control_point_refresh,
    bench_lut_creation,
    bench_lut_lookup,
);

criterion_main!(benches);
