use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use pso_swarm::{Mode, Particle, Swarm64, SwarmConfig, UpdateCoefficients};

fn bench_particle_update(c: &mut Criterion) {
    let config: SwarmConfig<f64> = SwarmConfig::new(1, 64);
    let coefficients = UpdateCoefficients {
        cognitive: 2.05,
        social: 2.05,
        vmax: 1.0,
        constriction: 0.7298,
    };
    let global = vec![0.0; 64];

    let mut group = c.benchmark_group("particle_update");
    for mode in Mode::ALL {
        let mut particle = Particle::new(&config, 1, false);
        group.bench_with_input(BenchmarkId::from_parameter(mode), &mode, |b, &mode| {
            b.iter(|| particle.apply_update(black_box(mode), &coefficients, &global));
        });
    }
    group.finish();
}

fn bench_sync_cycle(c: &mut Criterion) {
    let mut swarm = Swarm64::new(Some(5));
    swarm.configure(Mode::ConstantInertia, SwarmConfig::new(100, 32));
    let fitnesses: Vec<f64> = (0..100).map(|i| i as f64).collect();

    c.bench_function("sync_update_100x32", |b| {
        b.iter(|| swarm.sync_update(black_box(&fitnesses)))
    });
}

criterion_group!(benches, bench_particle_update, bench_sync_cycle);
criterion_main!(benches);
