//! Benchmarks for the arithmetic core and the calculation methods

use criterion::{black_box, criterion_group, criterion_main, Criterion};

use pilab::calculator::{create, Method};
use pilab::math::{sqrt, BigDecimal};
use pilab::StepOutcome;

fn bench_divide(c: &mut Criterion) {
    let one = BigDecimal::from(1);
    let three = BigDecimal::from(3);

    c.bench_function("divide_1_by_3_at_1000_digits", |b| {
        b.iter(|| BigDecimal::divide(black_box(&one), black_box(&three), 1000).expect("division"))
    });
}

fn bench_sqrt(c: &mut Criterion) {
    let two = BigDecimal::from(2);

    c.bench_function("sqrt_2_at_200_digits", |b| {
        b.iter(|| sqrt(black_box(&two), 200).expect("sqrt"))
    });
}

fn bench_gauss_legendre(c: &mut Criterion) {
    c.bench_function("gauss_legendre_100_digits", |b| {
        b.iter(|| {
            let mut calc = create(Method::GaussLegendre, 100, 5).expect("factory");
            while calc.step().expect("step") != StepOutcome::Complete {}
            calc.estimate().cloned()
        })
    });
}

fn bench_machin(c: &mut Criterion) {
    c.bench_function("machin_100_digits", |b| {
        b.iter(|| {
            let mut calc = create(Method::Machin, 100, 5).expect("factory");
            while calc.step().expect("step") != StepOutcome::Complete {}
            calc.estimate().cloned()
        })
    });
}

criterion_group!(benches, bench_divide, bench_sqrt, bench_gauss_legendre, bench_machin);
criterion_main!(benches);
