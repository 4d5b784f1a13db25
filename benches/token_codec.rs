//! 令牌编解码性能基准测试

use std::hint::black_box;

use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};
use linktrack::token::{Identity, TokenCodec, constant_time_eq};

// ============== issue 基准测试 ==============

fn bench_issue(c: &mut Criterion) {
    let mut group = c.benchmark_group("token/issue");
    let codec = TokenCodec::new("bench-secret").unwrap();

    for len in [8usize, 32, 100] {
        let identity = Identity::parse("u".repeat(len)).unwrap();
        group.bench_with_input(BenchmarkId::from_parameter(len), &identity, |b, id| {
            b.iter(|| codec.issue(black_box(id)).unwrap());
        });
    }

    group.finish();
}

// ============== redeem 基准测试 ==============

fn bench_redeem(c: &mut Criterion) {
    let mut group = c.benchmark_group("token/redeem");
    let codec = TokenCodec::new("bench-secret").unwrap();
    let valid = codec
        .issue(&Identity::parse("alice@example.com").unwrap())
        .unwrap();
    let foreign = TokenCodec::new("other-secret")
        .unwrap()
        .issue(&Identity::parse("alice@example.com").unwrap())
        .unwrap();

    group.bench_function("valid", |b| {
        b.iter(|| codec.redeem(black_box(&valid)).unwrap());
    });

    group.bench_function("bad_signature", |b| {
        b.iter(|| assert!(codec.redeem(black_box(&foreign)).is_err()));
    });

    group.bench_function("malformed", |b| {
        b.iter(|| assert!(codec.redeem(black_box("@@not-a-token@@")).is_err()));
    });

    group.finish();
}

// ============== constant_time_eq 基准测试 ==============

fn bench_constant_time_eq(c: &mut Criterion) {
    let mut group = c.benchmark_group("token/constant_time_eq");
    let a = "a".repeat(64);
    let mut early = a.clone().into_bytes();
    early[0] = b'b';
    let mut late = a.clone().into_bytes();
    late[63] = b'b';

    group.bench_function("equal", |b| {
        b.iter(|| constant_time_eq(black_box(a.as_bytes()), black_box(a.as_bytes())));
    });
    group.bench_function("differ_first_byte", |b| {
        b.iter(|| constant_time_eq(black_box(a.as_bytes()), black_box(&early)));
    });
    group.bench_function("differ_last_byte", |b| {
        b.iter(|| constant_time_eq(black_box(a.as_bytes()), black_box(&late)));
    });

    group.finish();
}

criterion_group!(benches, bench_issue, bench_redeem, bench_constant_time_eq);
criterion_main!(benches);
