use RustedNumLab::Examples_and_utils::random_spd_system;
use RustedNumLab::linsys::direct_solvers::{DirectMethod, solve_direct};
use RustedNumLab::roots::scalar_root_solvers::{bisection, newton_raphson};
use criterion::{Criterion, criterion_group, criterion_main};
use std::hint::black_box;

fn bench_direct_solvers(c: &mut Criterion) {
    let (a, b, _) = random_spd_system(12);
    let mut group = c.benchmark_group("direct solvers, 12x12 SPD");
    for method in [
        DirectMethod::GaussianElimination,
        DirectMethod::Lu,
        DirectMethod::Cholesky,
        DirectMethod::Inversion,
    ] {
        group.bench_function(method.to_string(), |bch| {
            bch.iter(|| solve_direct(black_box(&a), black_box(&b), method))
        });
    }
    group.finish();
}

fn bench_root_solvers(c: &mut Criterion) {
    let f = |x: f64| x * x * x - x - 2.0;
    c.bench_function("bisection on x^3 - x - 2", |b| {
        b.iter(|| bisection(f, black_box(1.0), black_box(2.0), 1e-10, 100))
    });
    c.bench_function("newton-raphson on x^3 - x - 2", |b| {
        b.iter(|| newton_raphson(f, black_box(2.0), 1e-10, 100))
    });
}

criterion_group!(benches, bench_direct_solvers, bench_root_solvers);
criterion_main!(benches);
