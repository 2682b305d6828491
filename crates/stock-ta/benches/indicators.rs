//! Performance benchmarks for stock-ta indicators.
//!
//! Run with: `cargo bench -p stock-ta`
//!
//! These benchmarks measure throughput for each indicator and for the full
//! engine pass across various history lengths, to confirm the rolling
//! kernels keep every indicator O(n).

use chrono::{Days, NaiveDate};
use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use stock_ta::data::{normalize, Bar};
use stock_ta::engine::{compute_indicators, Engine, IndicatorKind};
use stock_ta::indicators::{bollinger_bands, macd, moving_average, rsi, stochastic};

/// Generate synthetic daily bars for benchmarks.
fn generate_bars(size: usize) -> Vec<Bar> {
    let start = NaiveDate::from_ymd_opt(1990, 1, 1).unwrap();
    let mut bars = Vec::with_capacity(size);

    let mut price = 100.0;
    for i in 0..size {
        // Simple deterministic price movement for reproducibility
        let t = i as f64;
        let delta = ((t * 0.1).sin() * 2.0) + ((t * 0.03).cos() * 1.5);
        price = (price + delta).max(10.0);

        let high = price + 1.0 + (t * 0.07).sin().abs();
        let low = price - 1.0 - (t * 0.05).cos().abs();
        let close = price + (t * 0.02).sin() * 0.8;
        let open = price + (t * 0.04).sin() * 0.3;
        let volume = 1_000_000.0 + (t * 1000.0).sin().abs() * 500_000.0;

        bars.push(Bar::new(start + Days::new(i as u64), open, high, low, close, volume));
    }

    bars
}

// Standard sizes: one year, ten years and a long intraday-like history
const SIZES: &[usize] = &[252, 2_520, 100_000];

fn bench_moving_average(c: &mut Criterion) {
    let mut group = c.benchmark_group("moving_average");
    for &size in SIZES {
        let bars = generate_bars(size);
        group.throughput(Throughput::Elements(size as u64));
        group.bench_with_input(BenchmarkId::from_parameter(size), &bars, |b, bars| {
            b.iter(|| moving_average(black_box(bars)));
        });
    }
    group.finish();
}

fn bench_rsi(c: &mut Criterion) {
    let mut group = c.benchmark_group("rsi");
    for &size in SIZES {
        let bars = generate_bars(size);
        group.throughput(Throughput::Elements(size as u64));
        group.bench_with_input(BenchmarkId::from_parameter(size), &bars, |b, bars| {
            b.iter(|| rsi(black_box(bars), black_box(14)));
        });
    }
    group.finish();
}

fn bench_macd(c: &mut Criterion) {
    let mut group = c.benchmark_group("macd");
    for &size in SIZES {
        let bars = generate_bars(size);
        group.throughput(Throughput::Elements(size as u64));
        group.bench_with_input(BenchmarkId::from_parameter(size), &bars, |b, bars| {
            b.iter(|| macd(black_box(bars), 12, 26, 9));
        });
    }
    group.finish();
}

fn bench_bollinger(c: &mut Criterion) {
    let mut group = c.benchmark_group("bollinger");
    for &size in SIZES {
        let bars = generate_bars(size);
        group.throughput(Throughput::Elements(size as u64));
        group.bench_with_input(BenchmarkId::from_parameter(size), &bars, |b, bars| {
            b.iter(|| bollinger_bands(black_box(bars), 20, 2.0, 2.0));
        });
    }
    group.finish();
}

fn bench_stochastic(c: &mut Criterion) {
    let mut group = c.benchmark_group("stochastic");
    for &size in SIZES {
        let bars = generate_bars(size);
        group.throughput(Throughput::Elements(size as u64));
        group.bench_with_input(BenchmarkId::from_parameter(size), &bars, |b, bars| {
            b.iter(|| stochastic(black_box(bars), 14, 3, 3));
        });
    }
    group.finish();
}

fn bench_compute_indicators(c: &mut Criterion) {
    let mut group = c.benchmark_group("compute_indicators");
    let names = IndicatorKind::ALL.map(IndicatorKind::name);
    for &size in SIZES {
        let bars = generate_bars(size);
        group.throughput(Throughput::Elements(size as u64));
        group.bench_with_input(BenchmarkId::new("with_normalize", size), &bars, |b, bars| {
            b.iter(|| compute_indicators(black_box(bars), names));
        });

        let series = normalize(bars).unwrap();
        let engine = Engine::default();
        group.bench_with_input(BenchmarkId::new("pre_normalized", size), &series, |b, series| {
            b.iter(|| engine.compute_normalized(black_box(series), &IndicatorKind::ALL));
        });
    }
    group.finish();
}

criterion_group!(
    benches,
    bench_moving_average,
    bench_rsi,
    bench_macd,
    bench_bollinger,
    bench_stochastic,
    bench_compute_indicators,
);
criterion_main!(benches);
