//! Stark curve scalar arithmetic benchmarks

use criterion::{
    BenchmarkGroup, Criterion, criterion_group, criterion_main, measurement::Measurement,
};
use hex_literal::hex;
use stark252::{
    ProjectivePoint, Scalar,
    arithmetic::{lincomb_vartime, mul_vartime},
};

fn test_scalar_x() -> Scalar {
    Scalar::from_bytes(
        &hex!("057b78c7a6db039233ad693bfb625d974de43dda3928c6ab83e58879f02efb83").into(),
    )
    .unwrap()
}

fn test_scalar_y() -> Scalar {
    Scalar::from_bytes(
        &hex!("07ecd8b9fe02257a2a7ef667c3fd765eaba15344ee35727f65219d1195f3c93a").into(),
    )
    .unwrap()
}

fn bench_point_mul<'a, M: Measurement>(group: &mut BenchmarkGroup<'a, M>) {
    let p = ProjectivePoint::GENERATOR;
    let s = test_scalar_x();
    group.bench_function("point-scalar mul", |b| b.iter(|| &p * &s));
}

fn bench_point_mul_vartime<'a, M: Measurement>(group: &mut BenchmarkGroup<'a, M>) {
    let p = ProjectivePoint::GENERATOR;
    let s = test_scalar_x();
    group.bench_function("point-scalar mul (vartime)", |b| {
        b.iter(|| mul_vartime(&p, &s))
    });
}

fn bench_point_lincomb<'a, M: Measurement>(group: &mut BenchmarkGroup<'a, M>) {
    let p = ProjectivePoint::GENERATOR;
    let q = p * test_scalar_y();
    let s = test_scalar_x();
    let t = test_scalar_y();
    group.bench_function("lincomb (vartime)", |b| {
        b.iter(|| lincomb_vartime(&p, &s, &q, &t))
    });
}

fn bench_scalar_sub<'a, M: Measurement>(group: &mut BenchmarkGroup<'a, M>) {
    let x = test_scalar_x();
    let y = test_scalar_y();
    group.bench_function("sub", |b| b.iter(|| &x - &y));
}

fn bench_scalar_add<'a, M: Measurement>(group: &mut BenchmarkGroup<'a, M>) {
    let x = test_scalar_x();
    let y = test_scalar_y();
    group.bench_function("add", |b| b.iter(|| &x + &y));
}

fn bench_scalar_mul<'a, M: Measurement>(group: &mut BenchmarkGroup<'a, M>) {
    let x = test_scalar_x();
    let y = test_scalar_y();
    group.bench_function("mul", |b| b.iter(|| &x * &y));
}

fn bench_scalar_negate<'a, M: Measurement>(group: &mut BenchmarkGroup<'a, M>) {
    let x = test_scalar_x();
    group.bench_function("negate", |b| b.iter(|| -x));
}

fn bench_scalar_invert<'a, M: Measurement>(group: &mut BenchmarkGroup<'a, M>) {
    let x = test_scalar_x();
    group.bench_function("invert", |b| b.iter(|| x.invert()));
}

fn bench_point(c: &mut Criterion) {
    let mut group = c.benchmark_group("point operations");
    bench_point_mul(&mut group);
    bench_point_mul_vartime(&mut group);
    bench_point_lincomb(&mut group);
    group.finish();
}

fn bench_scalar(c: &mut Criterion) {
    let mut group = c.benchmark_group("scalar operations");
    bench_scalar_sub(&mut group);
    bench_scalar_add(&mut group);
    bench_scalar_mul(&mut group);
    bench_scalar_negate(&mut group);
    bench_scalar_invert(&mut group);
    group.finish();
}

criterion_group!(benches, bench_point, bench_scalar);
criterion_main!(benches);
