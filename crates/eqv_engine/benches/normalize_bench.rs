use criterion::{criterion_group, criterion_main, Criterion};
use std::hint::black_box;

use eqv_engine::Normalizer;
use eqv_parser::parse;

fn benchmark_parser(c: &mut Criterion) {
    let mut group = c.benchmark_group("parser");

    group.bench_function("parse_nested_parens", |b| {
        b.iter(|| {
            black_box(parse("(((a + b) * (c + d)) / ((e + f) * (g + h)))").unwrap());
        })
    });

    group.finish();
}

fn benchmark_normalize(c: &mut Criterion) {
    let mut group = c.benchmark_group("normalize");
    let normalizer = Normalizer::new();

    group.bench_function("distribute_binomial_product", |b| {
        let expr = parse("(a+b)*(c+d)*(e+f)").unwrap();
        b.iter(|| {
            black_box(normalizer.normalize(&expr).unwrap());
        })
    });

    group.bench_function("large_commutative_sum", |b| {
        // x1 + x2 + ... + x20, worst case for sorting
        let mut s = "x1".to_string();
        for i in (2..=20).rev() {
            s.push_str(&format!(" + x{}", i));
        }
        let expr = parse(&s).unwrap();
        b.iter(|| {
            black_box(normalizer.normalize(&expr).unwrap());
        })
    });

    group.bench_function("cancelling_sum", |b| {
        let expr = parse("a + b + c + d - a - b - c - d").unwrap();
        b.iter(|| {
            black_box(normalizer.normalize(&expr).unwrap());
        })
    });

    group.finish();
}

criterion_group!(benches, benchmark_parser, benchmark_normalize);
criterion_main!(benches);
