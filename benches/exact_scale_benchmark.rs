// ============================================================================
// Exact Scaling Benchmarks
// ============================================================================
//
// Benchmark Categories:
// 1. Decimal Parsing - shortest round-trip decimal view of a factor
// 2. Exact Scaling - scale_exact / descale_exact across factor shapes
// 3. Quantity Arithmetic - fixed-point vs float representations
// 4. Conversions - unit conversion of fixed-point quantities
//
// Factor shapes:
// - integral: fast path, plain checked multiply/divide
// - short decimal: few significant digits (0.1, 2.54)
// - long decimal: 16-17 significant digits (1/3, 1/3600)
// ============================================================================

use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};
use exact_quantity::numeric::ParsedDecimal;
use exact_quantity::prelude::*;
use std::hint::black_box;

const FACTORS: [(&str, f64); 4] = [
    ("integral", 1000.0),
    ("short_decimal", 0.1),
    ("inch", 0.0254),
    ("long_decimal", 1.0 / 3600.0),
];

// ============================================================================
// Decimal Parsing Benchmarks
// ============================================================================

fn benchmark_decimal_parsing(c: &mut Criterion) {
    let mut group = c.benchmark_group("decimal_parsing");

    for (name, factor) in FACTORS.iter() {
        group.bench_with_input(BenchmarkId::new("from_f64", name), factor, |b, &factor| {
            b.iter(|| black_box(ParsedDecimal::from_f64(black_box(factor))));
        });
    }

    group.finish();
}

// ============================================================================
// Exact Scaling Benchmarks
// ============================================================================

fn benchmark_exact_scaling(c: &mut Criterion) {
    let mut group = c.benchmark_group("exact_scaling");
    let value = 123_456_789_012_345i64;

    for (name, factor) in FACTORS.iter() {
        group.bench_with_input(BenchmarkId::new("scale_exact", name), factor, |b, &factor| {
            b.iter(|| black_box(scale_exact(black_box(value), black_box(factor))));
        });

        group.bench_with_input(BenchmarkId::new("descale_exact", name), factor, |b, &factor| {
            b.iter(|| black_box(descale_exact(black_box(value), black_box(factor))));
        });

        // Float baseline for comparison
        group.bench_with_input(BenchmarkId::new("f64_multiply", name), factor, |b, &factor| {
            b.iter(|| black_box((black_box(value) as f64 * black_box(factor)) as i64));
        });
    }

    group.bench_function("reciprocal_exact", |b| {
        b.iter(|| black_box(reciprocal_exact(black_box(3600.0))));
    });

    group.finish();
}

// ============================================================================
// Quantity Arithmetic Benchmarks
// ============================================================================

fn benchmark_quantity_arithmetic(c: &mut Criterion) {
    let mut group = c.benchmark_group("quantity_arithmetic");
    let meters = Length::canonical_unit();

    let fixed_a = FixedLength::from_i64(1_234, meters).unwrap();
    let fixed_b = FixedLength::from_i64(567, meters).unwrap();
    let float_a = FloatQuantity::<Length>::new(1_234.0, meters).unwrap();
    let float_b = FloatQuantity::<Length>::new(567.0, meters).unwrap();

    group.bench_function("fixed_add", |b| {
        b.iter(|| black_box(black_box(&fixed_a).checked_add(black_box(&fixed_b))));
    });

    group.bench_function("fixed_add_bridged", |b| {
        b.iter(|| black_box(black_box(&fixed_a).checked_add(black_box(&float_b))));
    });

    group.bench_function("float_add", |b| {
        b.iter(|| black_box(black_box(&float_a).checked_add(black_box(&float_b))));
    });

    group.bench_function("fixed_div_scalar", |b| {
        b.iter(|| black_box(black_box(&fixed_a).checked_div_scalar(black_box(3.6))));
    });

    group.bench_function("speed_per_hour", |b| {
        let hour = FixedTime::from_i64(1, Time::unit("h").unwrap()).unwrap();
        b.iter(|| black_box(FixedSpeed::per(black_box(&fixed_a), black_box(&hour))));
    });

    group.finish();
}

// ============================================================================
// Conversion Benchmarks
// ============================================================================

fn benchmark_conversions(c: &mut Criterion) {
    let mut group = c.benchmark_group("conversions");
    let quantity = FixedLength::from_i64(1_609_344, Length::unit("mm").unwrap()).unwrap();

    for symbol in ["m", "mi", "in", "nm"] {
        let unit = Length::unit(symbol).unwrap();
        group.bench_with_input(BenchmarkId::new("to_i64", symbol), unit, |b, unit| {
            b.iter(|| black_box(black_box(&quantity).to_i64(unit)));
        });
        group.bench_with_input(BenchmarkId::new("round_to_i64", symbol), unit, |b, unit| {
            b.iter(|| black_box(black_box(&quantity).round_to_i64(unit)));
        });
    }

    group.finish();
}

criterion_group!(
    benches,
    benchmark_decimal_parsing,
    benchmark_exact_scaling,
    benchmark_quantity_arithmetic,
    benchmark_conversions
);
criterion_main!(benches);
