use crate::config::SwarmConfig;
use crate::float::SwarmFloat;
use crate::mode::Mode;
use crate::update_rule::{Motion, UpdateCoefficients};
use rand::rngs::StdRng;
use rand::SeedableRng;

/// One candidate solution with its own velocity, personal best and random
/// stream. All three buffers always have the same length.
#[derive(Debug, Clone)]
pub struct Particle<T> {
    pub(crate) position: Vec<T>,
    pub(crate) velocity: Vec<T>,
    pub(crate) best_position: Vec<T>,
    pub(crate) best_fitness: T,
    pub(crate) inertia: T,
    pub(crate) alpha: T,
    rng: StdRng,
}

impl<T: SwarmFloat> Particle<T> {
    /// Draws position and personal best in `[position_min, position_max)`,
    /// velocity in `[0, vmax)`, then inertia and alpha below their maxima.
    pub fn new(config: &SwarmConfig<T>, seed: u64, maximize: bool) -> Self {
        let dims = config.dims;
        let mut particle = Particle {
            position: vec![T::zero(); dims],
            velocity: vec![T::zero(); dims],
            best_position: vec![T::zero(); dims],
            best_fitness: T::worst(maximize),
            inertia: T::zero(),
            alpha: T::zero(),
            rng: StdRng::seed_from_u64(seed),
        };
        particle.reset(config);
        particle
    }

    /// Re-randomizes the particle in place, continuing its own random stream.
    /// `best_fitness` is left as it was.
    pub fn reset(&mut self, config: &SwarmConfig<T>) {
        let span = config.position_max - config.position_min;
        for i in 0..self.position.len() {
            let x = span * T::unit(&mut self.rng) + config.position_min;
            self.position[i] = x;
            self.best_position[i] = x;
            self.velocity[i] = T::unit(&mut self.rng) * config.vmax;
        }
        self.inertia = T::unit(&mut self.rng) * config.inertia_max;
        self.alpha = T::unit(&mut self.rng) * config.alpha_max;
    }

    /// Records `fitness` as the personal best when it strictly improves on it.
    pub fn record_if_best(&mut self, fitness: T, maximize: bool) -> bool {
        if !T::improves(fitness, self.best_fitness, maximize) {
            return false;
        }
        self.best_fitness = fitness;
        self.best_position.copy_from_slice(&self.position);
        true
    }

    pub fn apply_update(&mut self, mode: Mode, c: &UpdateCoefficients<T>, global: &[T]) {
        Motion {
            position: &mut self.position,
            velocity: &mut self.velocity,
            best_position: &self.best_position,
            inertia: &mut self.inertia,
            alpha: self.alpha,
            rng: &mut self.rng,
        }
        .apply(mode, c, global);
    }

    pub fn position(&self) -> &[T] {
        &self.position
    }

    pub fn velocity(&self) -> &[T] {
        &self.velocity
    }

    pub fn best_position(&self) -> &[T] {
        &self.best_position
    }

    pub fn best_fitness(&self) -> T {
        self.best_fitness
    }

    pub fn inertia(&self) -> T {
        self.inertia
    }

    pub fn alpha(&self) -> T {
        self.alpha
    }

    pub fn dims(&self) -> usize {
        self.position.len()
    }

    pub(crate) fn reset_fitness(&mut self, maximize: bool) {
        self.best_fitness = T::worst(maximize);
    }
}
