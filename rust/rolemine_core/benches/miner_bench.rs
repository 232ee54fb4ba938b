//! Role mining benchmarks using criterion.

use criterion::{criterion_group, criterion_main, Criterion};
use rand::SeedableRng;
use rand_chacha::ChaCha20Rng;

use rolemine_core::dataset::generate::{generate_upa, GeneratorParams};
use rolemine_core::{generate_candidates, init_roles, MinerConfig, RoleMiner, ScanMode, UpaMatrix};

fn synthetic(users: usize) -> UpaMatrix {
    let params = GeneratorParams::new(40, users, 120, 4, 12);
    generate_upa(&params, &mut ChaCha20Rng::seed_from_u64(2024)).unwrap()
}

fn bench_generate_candidates(c: &mut Criterion) {
    let upa = synthetic(500);
    let init = init_roles(&upa).unwrap();

    c.bench_function("generate_candidates_500", |b| {
        b.iter(|| generate_candidates(init.roles()));
    });
}

fn bench_basic_rmp_sequential(c: &mut Criterion) {
    let upa = synthetic(500);

    c.bench_function("basic_rmp_500_sequential", |b| {
        b.iter(|| RoleMiner::new(MinerConfig::default()).mine(&upa).unwrap());
    });
}

fn bench_basic_rmp_parallel(c: &mut Criterion) {
    let upa = synthetic(500);
    let config = MinerConfig {
        delta_factor: 0,
        scan: ScanMode::Parallel,
    };

    c.bench_function("basic_rmp_500_parallel", |b| {
        b.iter(|| RoleMiner::new(config).mine(&upa).unwrap());
    });
}

criterion_group!(
    benches,
    bench_generate_candidates,
    bench_basic_rmp_sequential,
    bench_basic_rmp_parallel
);
criterion_main!(benches);
