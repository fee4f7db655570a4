use bigfloat::{BigInt, Float, PiCache};

fn test_pi() {
    black_box(Float::compute_pi(2000));
}

fn test_pi_cache() {
    let cache = PiCache::empty();
    for prec in [500, 1000, 2000] {
        black_box(cache.get(prec));
    }
}

fn test_agm() {
    let a = Float::one(2000, false);
    let b = Float::from_u64(2000, 10);
    black_box(a.agm(&b).unwrap());
}

fn test_log() {
    let x = Float::from_u64(1000, 10);
    black_box(x.log().unwrap());
}

fn test_exp() {
    let x = Float::from_f64(2.5).with_precision(1000);
    black_box(x.exp().unwrap());
}

fn test_pow() {
    let z = Float::from_u64(500, 3);
    let w = Float::from_f64(0.75).with_precision(500);
    black_box(z.pow(&w).unwrap());
}

fn test_sqrt() {
    black_box(Float::from_u64(10000, 2).sqrt());
}

fn test_bigint_div() {
    let mut a = BigInt::pseudorandom(1000, 12345);
    let b = BigInt::pseudorandom(500, 67890);
    let rem = a.inplace_div(&b);
    black_box((a, rem));
}

use criterion::{black_box, criterion_group, criterion_main, Criterion};

pub fn criterion_benchmark(c: &mut Criterion) {
    c.bench_function("test_pi", |b| b.iter(test_pi));
    c.bench_function("test_pi_cache", |b| b.iter(test_pi_cache));
    c.bench_function("test_agm", |b| b.iter(test_agm));
    c.bench_function("test_log", |b| b.iter(test_log));
    c.bench_function("test_exp", |b| b.iter(test_exp));
    c.bench_function("test_pow", |b| b.iter(test_pow));
    c.bench_function("test_sqrt", |b| b.iter(test_sqrt));
    c.bench_function("test_bigint_div", |b| b.iter(test_bigint_div));
}

criterion_group!(benches, criterion_benchmark);
criterion_main!(benches);
