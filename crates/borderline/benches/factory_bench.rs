//! Benchmarks for border basis construction and root finding.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};

use borderline::{Basis, BorderBasedUniverse, BorderBasisFactory, FactoryConfig};
use borderline_poly::{MonomialOrder, PolyRing, Polynomial};

/// The system x_i^2 - (i + 1) = 0, with 2^n real zeros.
fn squares_system(num_vars: usize) -> (PolyRing, Vec<Polynomial>) {
    let ring = PolyRing::with_vars(num_vars, MonomialOrder::Grevlex);
    let gens = (0..num_vars)
        .map(|i| {
            let constant = vec![0u16; num_vars];
            let mut square = constant.clone();
            square[i] = 2;
            ring.poly(&[(1.0, square.as_slice()), (-((i + 1) as f64), constant.as_slice())])
        })
        .collect();
    (ring, gens)
}

fn bench_generate(c: &mut Criterion) {
    let mut group = c.benchmark_group("generate");
    let factory = BorderBasisFactory::default();

    for n in [1, 2, 3] {
        let (ring, gens) = squares_system(n);

        group.bench_with_input(BenchmarkId::new("degree_bounded", n), &n, |b, _| {
            b.iter(|| black_box(factory.generate(&ring, &gens)))
        });

        let tol = FactoryConfig::default().tolerance();
        group.bench_with_input(BenchmarkId::new("border_based", n), &n, |b, _| {
            b.iter(|| {
                let universe = BorderBasedUniverse::from_support(&ring, &gens, tol);
                black_box(factory.generate_in(universe, &gens))
            })
        });
    }

    group.finish();
}

fn bench_zeros(c: &mut Criterion) {
    let mut group = c.benchmark_group("zeros");

    for n in [1, 2, 3] {
        let (ring, gens) = squares_system(n);
        let Ok(basis) = BorderBasisFactory::default().generate(&ring, &gens) else {
            continue;
        };

        group.bench_with_input(BenchmarkId::new("simultaneous_diagonalization", n), &n, |b, _| {
            b.iter(|| black_box(basis.zeros()))
        });
    }

    group.finish();
}

criterion_group!(benches, bench_generate, bench_zeros);
criterion_main!(benches);
