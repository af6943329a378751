use pso_swarm::{Mode, PsoResult, Swarm64, SwarmConfig};
use std::{
    panic,
    sync::Arc,
    thread::{self, JoinHandle},
    time::{Duration, Instant},
};
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

const SEED: u64 = 20_240_601;
const PARTICLES: usize = 40;
const DIMS: usize = 8;
const ITERATIONS: usize = 500;
const WORKERS: usize = 4;
const STATE_LOWER_BOUND: f64 = -5.12;
const STATE_UPPER_BOUND: f64 = 5.12;

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let start_time: Instant = Instant::now();

    println!("protocol,mode,iterations,fitness,position");
    for mode in Mode::ALL {
        match run_sync(mode) {
            Ok(swarm) => print_row("sync", mode, &swarm),
            Err(e) => error!(%mode, error = %e, "synchronous run failed"),
        }
    }
    match run_async(Mode::ConstantInertia) {
        Ok(swarm) => print_row("async", Mode::ConstantInertia, &swarm),
        Err(e) => error!(error = %e, "asynchronous run failed"),
    }

    let elapsed_time: Duration = start_time.elapsed();
    info!(?elapsed_time, "all runs finished");
}

fn print_row(protocol: &str, mode: Mode, swarm: &Swarm64) {
    println!(
        "{},{},{},{:.6e},{}",
        protocol,
        mode,
        swarm.iterations(),
        swarm.global_fitness(),
        swarm
            .global_position()
            .iter()
            .map(|&x| format!("{:.6}", x))
            .collect::<Vec<String>>()
            .join(","),
    );
}

fn config() -> SwarmConfig<f64> {
    SwarmConfig {
        cognitive: 2.05,
        social: 2.05,
        vmax: 1.0,
        position_min: STATE_LOWER_BOUND,
        position_max: STATE_UPPER_BOUND,
        alpha_max: 0.99,
        inertia_max: 0.9,
        ..SwarmConfig::new(PARTICLES, DIMS)
    }
}

fn swarm_for(mode: Mode) -> Swarm64 {
    let mut swarm = Swarm64::new(Some(SEED));
    let mut config = config();
    match mode {
        Mode::Vanilla => {
            config.cognitive = 1.49445;
            config.social = 1.49445;
            config.vmax = 0.5;
        }
        // vmax is the spread multiplier here
        Mode::DynamicInertiaMaxVelocityReduction => config.vmax = 0.2,
        _ => {}
    }
    swarm.configure(mode, config);
    swarm
}

fn run_sync(mode: Mode) -> PsoResult<Swarm64> {
    let mut swarm = swarm_for(mode);
    let mut fitnesses: Vec<f64> = vec![0.0; swarm.len()];
    for _ in 0..ITERATIONS {
        for (i, fitness) in fitnesses.iter_mut().enumerate() {
            *fitness = rastrigin(&swarm.particle_position(i)?);
        }
        swarm.sync_update(&fitnesses)?;
    }
    Ok(swarm)
}

fn run_async(mode: Mode) -> PsoResult<Arc<Swarm64>> {
    let swarm: Arc<Swarm64> = Arc::new(swarm_for(mode));
    let mut threads: Vec<JoinHandle<PsoResult<()>>> = Vec::new();

    for worker in 0..WORKERS {
        let swarm: Arc<Swarm64> = Arc::clone(&swarm);
        threads.push(thread::spawn(move || {
            // each worker owns a stripe of particle indices
            for _ in 0..ITERATIONS {
                for i in (worker..swarm.len()).step_by(WORKERS) {
                    let fitness: f64 = rastrigin(&swarm.particle_position(i)?);
                    swarm.async_update(i, fitness)?;
                }
            }
            Ok(())
        }));
    }

    for thread in threads {
        match thread.join() {
            Ok(result) => result?,
            Err(panic) => panic::resume_unwind(panic),
        }
    }

    Ok(swarm)
}

fn rastrigin(x: &[f64]) -> f64 {
    let a: f64 = 10.0;
    let mut sum: f64 = a * x.len() as f64;
    for &xi in x {
        sum += xi * xi - a * (2.0 * std::f64::consts::PI * xi).cos();
    }
    sum
}
