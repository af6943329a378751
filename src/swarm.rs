use crate::config::SwarmConfig;
use crate::error::{PsoError, PsoResult};
use crate::float::SwarmFloat;
use crate::mode::Mode;
use crate::particle::Particle;
use crate::search_result::SearchResult;
use crate::update_rule::{constriction_coefficient, UpdateCoefficients};
use parking_lot::{Mutex, RwLock, RwLockWriteGuard};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::cmp::Ordering;
use std::time::{SystemTime, UNIX_EPOCH};
use tracing::{debug, trace};

pub type Swarm32 = Swarm<f32>;
pub type Swarm64 = Swarm<f64>;

/// Personal-best fitness of the particle at index `particle`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FitnessIndex<T> {
    pub particle: usize,
    pub fitness: T,
}

/// A particle population with its shared parameters and global best.
///
/// The caller evaluates the objective and feeds fitness values back through
/// one of three protocols:
///
/// - [`Swarm::sync_update`]: one fitness per particle, global best resolved
///   before any particle moves.
/// - [`Swarm::async_update`]: one particle at a time, callable from many
///   threads at once through a shared reference.
/// - [`Swarm::record_personal_best`], [`Swarm::resolve_global_best`] and
///   [`Swarm::update_particle`]: the synchronous cycle split so phases one and
///   three can be fanned out across threads.
///
/// Accessors hand out copies, never references into live buffers.
pub struct Swarm<T> {
    config: SwarmConfig<T>,
    constriction: T,
    mode: Mode,
    maximize: bool,
    particles: Vec<Mutex<Particle<T>>>,
    global_best: RwLock<SearchResult<T>>,
    rng: StdRng,
}

impl<T: SwarmFloat> Swarm<T> {
    /// Creates an empty swarm. Without a seed the random source is taken from
    /// the wall clock, so runs are not reproducible.
    pub fn new(seed: Option<u64>) -> Self {
        let seed = seed.unwrap_or_else(clock_seed);
        let config = SwarmConfig::default();
        Swarm {
            constriction: constriction_coefficient(config.cognitive, config.social),
            config,
            mode: Mode::default(),
            maximize: false,
            particles: Vec::new(),
            global_best: RwLock::new(SearchResult::new(0, false)),
            rng: StdRng::seed_from_u64(seed),
        }
    }

    /// Replaces the population with `config.swarm_size` fresh particles and
    /// resets the global best.
    pub fn configure(&mut self, mode: Mode, config: SwarmConfig<T>) {
        debug!(
            %mode,
            swarm_size = config.swarm_size,
            dims = config.dims,
            "configuring swarm"
        );
        self.mode = mode;
        self.constriction = constriction_coefficient(config.cognitive, config.social);
        *self.global_best.get_mut() = SearchResult::new(config.dims, self.maximize);
        self.particles = (0..config.swarm_size)
            .map(|_| Mutex::new(Particle::new(&config, self.rng.gen(), self.maximize)))
            .collect();
        self.config = config;
    }

    #[allow(clippy::too_many_arguments)]
    pub fn set_vanilla(
        &mut self,
        swarm_size: usize,
        dims: usize,
        cognitive: T,
        social: T,
        vmax: T,
        position_min: T,
        position_max: T,
    ) {
        let config = SwarmConfig {
            swarm_size,
            dims,
            cognitive,
            social,
            vmax,
            position_min,
            position_max,
            alpha_max: T::zero(),
            inertia_max: T::zero(),
        };
        self.configure(Mode::Vanilla, config);
    }

    #[allow(clippy::too_many_arguments)]
    pub fn set_constant_inertia(
        &mut self,
        swarm_size: usize,
        dims: usize,
        cognitive: T,
        social: T,
        vmax: T,
        position_min: T,
        position_max: T,
        inertia_max: T,
    ) {
        let config = SwarmConfig {
            swarm_size,
            dims,
            cognitive,
            social,
            vmax,
            position_min,
            position_max,
            alpha_max: T::zero(),
            inertia_max,
        };
        self.configure(Mode::ConstantInertia, config);
    }

    #[allow(clippy::too_many_arguments)]
    pub fn set_linear_inertia_reduction(
        &mut self,
        swarm_size: usize,
        dims: usize,
        cognitive: T,
        social: T,
        vmax: T,
        position_min: T,
        position_max: T,
        alpha_max: T,
        inertia_max: T,
    ) {
        let config = SwarmConfig {
            swarm_size,
            dims,
            cognitive,
            social,
            vmax,
            position_min,
            position_max,
            alpha_max,
            inertia_max,
        };
        self.configure(Mode::LinearInertiaReduction, config);
    }

    /// `cognitive + social` must exceed 4 for the constriction coefficient to
    /// be real. This is not checked.
    #[allow(clippy::too_many_arguments)]
    pub fn set_constriction(
        &mut self,
        swarm_size: usize,
        dims: usize,
        cognitive: T,
        social: T,
        vmax: T,
        position_min: T,
        position_max: T,
    ) {
        let config = SwarmConfig {
            swarm_size,
            dims,
            cognitive,
            social,
            vmax,
            position_min,
            position_max,
            alpha_max: T::zero(),
            inertia_max: T::zero(),
        };
        self.configure(Mode::Constriction, config);
    }

    /// `vmax_gamma` scales each particle's position spread into its velocity cap.
    #[allow(clippy::too_many_arguments)]
    pub fn set_dynamic_inertia_max_velocity_reduction(
        &mut self,
        swarm_size: usize,
        dims: usize,
        cognitive: T,
        social: T,
        vmax_gamma: T,
        position_min: T,
        position_max: T,
        inertia_max: T,
    ) {
        let config = SwarmConfig {
            swarm_size,
            dims,
            cognitive,
            social,
            vmax: vmax_gamma,
            position_min,
            position_max,
            alpha_max: T::zero(),
            inertia_max,
        };
        self.configure(Mode::DynamicInertiaMaxVelocityReduction, config);
    }

    /// Switches the objective direction. Before the first completed cycle the
    /// global and personal best fitnesses are reset to the new worst value.
    pub fn set_maximize(&mut self, maximize: bool) {
        debug!(maximize, "objective direction changed");
        self.maximize = maximize;
        let global = self.global_best.get_mut();
        if global.iter == 0 {
            global.fitness = T::worst(maximize);
            for particle in &mut self.particles {
                particle.get_mut().reset_fitness(maximize);
            }
        }
    }

    /// Negative `cognitive` or `social` leaves that coefficient unchanged;
    /// both being negative, or both zero, changes neither. `vmax <= 0` is
    /// ignored. The constriction coefficient is always recomputed.
    pub fn change_update_values(&mut self, cognitive: T, social: T, vmax: T) {
        let zero = T::zero();
        if cognitive < zero && social >= zero {
            self.config.social = social;
        } else if cognitive >= zero && social < zero {
            self.config.cognitive = cognitive;
        } else if cognitive > zero && social > zero {
            self.config.cognitive = cognitive;
            self.config.social = social;
        }
        if vmax > zero {
            self.config.vmax = vmax;
        }
        self.constriction = constriction_coefficient(self.config.cognitive, self.config.social);
    }

    /// Takes effect for particles created or reset afterwards. Keeping
    /// `position_min < position_max` is up to the caller.
    pub fn change_min_start(&mut self, position_min: T) {
        self.config.position_min = position_min;
    }

    pub fn change_max_start(&mut self, position_max: T) {
        self.config.position_max = position_max;
    }

    /// Non-positive values are ignored.
    pub fn change_alpha_max(&mut self, alpha_max: T) {
        if alpha_max > T::zero() {
            self.config.alpha_max = alpha_max;
        }
    }

    /// Non-positive values are ignored.
    pub fn change_inertia_max(&mut self, inertia_max: T) {
        if inertia_max > T::zero() {
            self.config.inertia_max = inertia_max;
        }
    }

    pub fn change_mode(&mut self, mode: Mode) {
        debug!(%mode, "mode changed");
        self.mode = mode;
    }

    /// One fitness per particle. Personal and global bests are resolved over
    /// the whole population before any particle moves, so every particle sees
    /// the same global best. Ties go to the lowest index.
    pub fn sync_update(&mut self, fitnesses: &[T]) -> PsoResult<()> {
        self.check_fitness_len(fitnesses)?;
        let maximize = self.maximize;
        let mode = self.mode;
        let coefficients = self.coefficients();
        let global = self.global_best.get_mut();

        let mut winner = None;
        for (index, (slot, &fitness)) in self.particles.iter_mut().zip(fitnesses).enumerate() {
            slot.get_mut().record_if_best(fitness, maximize);
            if T::improves(fitness, global.fitness, maximize) {
                global.fitness = fitness;
                winner = Some(index);
            }
        }
        if let Some(index) = winner {
            global.value.copy_from_slice(self.particles[index].get_mut().position());
            trace!(
                fitness = %global.fitness,
                particle = index,
                iteration = global.iter,
                "global best improved"
            );
        }

        for slot in &mut self.particles {
            slot.get_mut().apply_update(mode, &coefficients, &global.value);
        }
        global.iter += 1;
        Ok(())
    }

    /// Feeds back the fitness of a single particle and moves it.
    ///
    /// Safe to call concurrently for different indices. The global-best
    /// comparison, copy and cycle count happen under one exclusive lock, which
    /// is then downgraded so the particle moves against a global best nobody
    /// can rewrite mid-read. Concurrent calls for the same index serialize on
    /// that particle.
    pub fn async_update(&self, index: usize, fitness: T) -> PsoResult<()> {
        let slot = self.slot(index)?;
        let mut global = self.global_best.write();
        {
            let particle = slot.lock();
            if global.compare_and_maybe_update(particle.position(), fitness, self.maximize) {
                trace!(
                    fitness = %fitness,
                    particle = index,
                    iteration = global.iter,
                    "global best improved"
                );
            }
        }
        global.iter += 1;
        let global = RwLockWriteGuard::downgrade(global);

        let mut particle = slot.lock();
        particle.record_if_best(fitness, self.maximize);
        particle.apply_update(self.mode, &self.coefficients(), &global.value);
        Ok(())
    }

    /// Phase one of the partitioned cycle: personal best only. Independent
    /// across particles.
    pub fn record_personal_best(&self, index: usize, fitness: T) -> PsoResult<()> {
        self.slot(index)?.lock().record_if_best(fitness, self.maximize);
        Ok(())
    }

    /// Phase two: serial scan of the cycle's fitnesses into the global best.
    /// Must run after every phase-one call of the cycle and before any
    /// phase-three call.
    pub fn resolve_global_best(&self, fitnesses: &[T]) -> PsoResult<()> {
        self.check_fitness_len(fitnesses)?;
        let mut global = self.global_best.write();
        let mut winner = None;
        for (index, &fitness) in fitnesses.iter().enumerate() {
            if T::improves(fitness, global.fitness, self.maximize) {
                global.fitness = fitness;
                winner = Some(index);
            }
        }
        if let Some(index) = winner {
            global.value.copy_from_slice(self.particles[index].lock().position());
            trace!(
                fitness = %global.fitness,
                particle = index,
                iteration = global.iter,
                "global best improved"
            );
        }
        global.iter += 1;
        Ok(())
    }

    /// Phase three: moves one particle against `snapshot`. When the snapshot
    /// does not have `dims` entries it is refilled from the current global
    /// best first; give each worker its own buffer.
    pub fn update_particle(&self, index: usize, snapshot: &mut Vec<T>) -> PsoResult<()> {
        let slot = self.slot(index)?;
        if snapshot.len() != self.config.dims {
            self.global_position_into(snapshot);
        }
        slot.lock().apply_update(self.mode, &self.coefficients(), snapshot);
        Ok(())
    }

    /// Removes the particles at `indices`, keeping the survivors in order.
    /// Duplicate indices remove a particle once.
    pub fn kill(&mut self, indices: &[usize]) -> PsoResult<()> {
        self.check_indices(indices)?;
        let mut doomed = vec![false; self.particles.len()];
        for &index in indices {
            doomed[index] = true;
        }
        let mut flags = doomed.into_iter();
        self.particles.retain(|_| !flags.next().unwrap_or(false));
        debug!(killed = indices.len(), remaining = self.particles.len(), "particles killed");
        Ok(())
    }

    /// Appends `count` new particles drawn from the current configuration.
    pub fn add(&mut self, count: usize) {
        for _ in 0..count {
            let particle = Particle::new(&self.config, self.rng.gen(), self.maximize);
            self.particles.push(Mutex::new(particle));
        }
        debug!(added = count, total = self.particles.len(), "particles added");
    }

    /// Re-randomizes the particles at `indices` in place. Personal-best
    /// fitnesses and the global best fitness are untouched; the global best
    /// position is zeroed when `reset_global_position` is set.
    pub fn reset(&mut self, indices: &[usize], reset_global_position: bool) -> PsoResult<()> {
        self.check_indices(indices)?;
        if reset_global_position {
            self.global_best.get_mut().value.fill(T::zero());
        }
        for &index in indices {
            self.particles[index].get_mut().reset(&self.config);
        }
        debug!(reset = indices.len(), reset_global_position, "particles reset");
        Ok(())
    }

    /// Personal-best fitness of every particle, sorted ascending by raw value
    /// whatever the objective direction.
    pub fn all_fitnesses(&self) -> Vec<FitnessIndex<T>> {
        let mut out = Vec::with_capacity(self.particles.len());
        self.all_fitnesses_into(&mut out);
        out
    }

    /// Same as [`Swarm::all_fitnesses`], reusing `out`.
    pub fn all_fitnesses_into(&self, out: &mut Vec<FitnessIndex<T>>) {
        out.clear();
        out.extend(self.particles.iter().enumerate().map(|(particle, slot)| FitnessIndex {
            particle,
            fitness: slot.lock().best_fitness(),
        }));
        out.sort_by(|a, b| a.fitness.partial_cmp(&b.fitness).unwrap_or(Ordering::Equal));
    }

    pub fn global_fitness(&self) -> T {
        self.global_best.read().fitness
    }

    pub fn global_position(&self) -> Vec<T> {
        self.global_best.read().value.clone()
    }

    pub fn global_position_into(&self, out: &mut Vec<T>) {
        let global = self.global_best.read();
        out.clear();
        out.extend_from_slice(&global.value);
    }

    pub fn best(&self) -> SearchResult<T> {
        self.global_best.read().clone()
    }

    pub fn particle_position(&self, index: usize) -> PsoResult<Vec<T>> {
        Ok(self.slot(index)?.lock().position().to_vec())
    }

    pub fn particle_fitness(&self, index: usize) -> PsoResult<FitnessIndex<T>> {
        let fitness = self.slot(index)?.lock().best_fitness();
        Ok(FitnessIndex {
            particle: index,
            fitness,
        })
    }

    /// Snapshot of the whole particle at `index`.
    pub fn particle(&self, index: usize) -> PsoResult<Particle<T>> {
        Ok(self.slot(index)?.lock().clone())
    }

    pub fn iterations(&self) -> u64 {
        self.global_best.read().iter
    }

    pub fn len(&self) -> usize {
        self.particles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.particles.is_empty()
    }

    pub fn dims(&self) -> usize {
        self.config.dims
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    pub fn maximize(&self) -> bool {
        self.maximize
    }

    pub fn constriction(&self) -> T {
        self.constriction
    }

    pub fn config(&self) -> &SwarmConfig<T> {
        &self.config
    }

    fn coefficients(&self) -> UpdateCoefficients<T> {
        UpdateCoefficients {
            cognitive: self.config.cognitive,
            social: self.config.social,
            vmax: self.config.vmax,
            constriction: self.constriction,
        }
    }

    fn slot(&self, index: usize) -> PsoResult<&Mutex<Particle<T>>> {
        self.particles.get(index).ok_or(PsoError::IndexOutOfRange {
            index,
            len: self.particles.len(),
        })
    }

    fn check_fitness_len(&self, fitnesses: &[T]) -> PsoResult<()> {
        if fitnesses.len() != self.particles.len() {
            return Err(PsoError::SizeMismatch {
                expected: self.particles.len(),
                actual: fitnesses.len(),
            });
        }
        Ok(())
    }

    fn check_indices(&self, indices: &[usize]) -> PsoResult<()> {
        let len = self.particles.len();
        if indices.len() > len {
            return Err(PsoError::TooManyIndices {
                requested: indices.len(),
                len,
            });
        }
        if let Some(&index) = indices.iter().find(|&&index| index >= len) {
            return Err(PsoError::IndexOutOfRange { index, len });
        }
        Ok(())
    }
}

fn clock_seed() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_nanos() as u64)
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn vanilla(swarm_size: usize, dims: usize, seed: u64) -> Swarm64 {
        let mut swarm = Swarm64::new(Some(seed));
        swarm.set_vanilla(swarm_size, dims, 2.05, 2.05, 0.5, -3.0, 3.0);
        swarm
    }

    #[test]
    fn configure_allocates_population() {
        let swarm = vanilla(7, 4, 1);
        assert_eq!(swarm.len(), 7);
        assert_eq!(swarm.dims(), 4);
        assert_eq!(swarm.global_position(), vec![0.0; 4]);
        assert_eq!(swarm.global_fitness(), f64::INFINITY);
        assert_eq!(swarm.iterations(), 0);
        assert_eq!(swarm.mode(), Mode::Vanilla);
        let expected = constriction_coefficient(2.05_f64, 2.05);
        assert!((swarm.constriction() - expected).abs() < 1e-15);
    }

    #[test]
    fn configure_honors_requested_mode() {
        let mut swarm = Swarm32::new(Some(3));
        swarm.configure(Mode::Constriction, SwarmConfig::new(2, 2));
        assert_eq!(swarm.mode(), Mode::Constriction);
        swarm.set_dynamic_inertia_max_velocity_reduction(2, 2, 2.0, 2.0, 0.1, 0.0, 1.0, 0.9);
        assert_eq!(swarm.mode(), Mode::DynamicInertiaMaxVelocityReduction);
        assert_eq!(swarm.config().alpha_max, 0.0);
        assert_eq!(swarm.config().inertia_max, 0.9);
    }

    #[test]
    fn mode_setters_zero_unused_maxima() {
        let swarm = vanilla(3, 2, 2);
        assert_eq!(swarm.config().alpha_max, 0.0);
        assert_eq!(swarm.config().inertia_max, 0.0);
        for i in 0..3 {
            let particle = swarm.particle(i).unwrap();
            assert_eq!(particle.alpha(), 0.0);
            assert_eq!(particle.inertia(), 0.0);
        }

        let mut swarm = Swarm64::new(Some(2));
        swarm.set_constant_inertia(3, 2, 2.0, 2.0, 1.0, -1.0, 1.0, 0.7);
        assert_eq!(swarm.config().alpha_max, 0.0);
        assert_eq!(swarm.config().inertia_max, 0.7);

        swarm.set_constriction(3, 2, 2.05, 2.05, 1.0, -1.0, 1.0);
        assert_eq!(swarm.config().alpha_max, 0.0);
        assert_eq!(swarm.config().inertia_max, 0.0);

        swarm.set_linear_inertia_reduction(3, 2, 2.0, 2.0, 1.0, -1.0, 1.0, 0.9, 0.8);
        assert_eq!(swarm.config().alpha_max, 0.9);
        assert_eq!(swarm.config().inertia_max, 0.8);
    }

    #[test]
    fn seeded_swarms_are_reproducible() {
        let a = vanilla(5, 3, 77);
        let b = vanilla(5, 3, 77);
        for i in 0..5 {
            assert_eq!(a.particle_position(i).unwrap(), b.particle_position(i).unwrap());
        }
        let c = vanilla(5, 3, 78);
        assert_ne!(a.particle_position(0).unwrap(), c.particle_position(0).unwrap());
    }

    #[test]
    fn set_maximize_resets_sentinels_before_first_cycle() {
        let mut swarm = vanilla(3, 2, 4);
        swarm.set_maximize(true);
        assert_eq!(swarm.global_fitness(), f64::NEG_INFINITY);
        assert!(swarm
            .all_fitnesses()
            .iter()
            .all(|f| f.fitness == f64::NEG_INFINITY));

        swarm.sync_update(&[1.0, 2.0, 3.0]).unwrap();
        swarm.set_maximize(false);
        assert_eq!(swarm.global_fitness(), 3.0);
        assert!(!swarm.maximize());
    }

    #[test]
    fn change_update_values_ignores_negatives() {
        let mut swarm = vanilla(1, 1, 5);
        swarm.change_update_values(-1.0, 3.0, -1.0);
        assert_eq!(swarm.config().cognitive, 2.05);
        assert_eq!(swarm.config().social, 3.0);
        assert_eq!(swarm.config().vmax, 0.5);

        swarm.change_update_values(2.5, -1.0, 0.75);
        assert_eq!(swarm.config().cognitive, 2.5);
        assert_eq!(swarm.config().social, 3.0);
        assert_eq!(swarm.config().vmax, 0.75);

        swarm.change_update_values(-1.0, -1.0, 0.0);
        swarm.change_update_values(0.0, 0.0, 0.0);
        assert_eq!(swarm.config().cognitive, 2.5);
        assert_eq!(swarm.config().social, 3.0);
        let expected = constriction_coefficient(2.5_f64, 3.0);
        assert!((swarm.constriction() - expected).abs() < 1e-15);
    }

    #[test]
    fn start_and_coefficient_mutators() {
        let mut swarm = vanilla(1, 1, 6);
        swarm.change_min_start(10.0);
        swarm.change_max_start(11.0);
        swarm.change_alpha_max(0.0);
        swarm.change_inertia_max(-2.0);
        assert_eq!(swarm.config().alpha_max, 0.0);
        assert_eq!(swarm.config().inertia_max, 0.0);
        swarm.change_alpha_max(0.8);
        swarm.change_inertia_max(0.9);
        assert_eq!(swarm.config().alpha_max, 0.8);
        assert_eq!(swarm.config().inertia_max, 0.9);

        swarm.add(1);
        let x = swarm.particle_position(1).unwrap()[0];
        assert!((10.0..11.0).contains(&x));

        swarm.change_mode(Mode::ConstantInertia);
        assert_eq!(swarm.mode(), Mode::ConstantInertia);
    }

    #[test]
    fn sync_update_rejects_wrong_length() {
        let mut swarm = vanilla(3, 2, 8);
        let before = swarm.particle_position(0).unwrap();
        assert_eq!(
            swarm.sync_update(&[1.0, 2.0]),
            Err(PsoError::SizeMismatch {
                expected: 3,
                actual: 2
            })
        );
        assert_eq!(swarm.particle_position(0).unwrap(), before);
        assert_eq!(swarm.iterations(), 0);
    }

    #[test]
    fn sync_update_maximizing_picks_largest() {
        let mut swarm = vanilla(3, 2, 9);
        swarm.set_maximize(true);
        let winner = swarm.particle_position(2).unwrap();
        swarm.sync_update(&[1.0, 2.0, 3.0]).unwrap();
        assert_eq!(swarm.global_fitness(), 3.0);
        assert_eq!(swarm.global_position(), winner);
    }

    #[test]
    fn sync_update_ties_go_to_lowest_index() {
        let mut swarm = vanilla(3, 2, 10);
        let first = swarm.particle_position(1).unwrap();
        swarm.sync_update(&[4.0, 0.5, 0.5]).unwrap();
        assert_eq!(swarm.global_position(), first);
    }

    #[test]
    fn async_update_out_of_range() {
        let swarm = vanilla(2, 2, 11);
        assert_eq!(
            swarm.async_update(2, 0.0),
            Err(PsoError::IndexOutOfRange { index: 2, len: 2 })
        );
        assert_eq!(swarm.iterations(), 0);
    }

    #[test]
    fn async_update_records_and_moves() {
        let swarm = vanilla(2, 3, 12);
        let before = swarm.particle_position(1).unwrap();
        swarm.async_update(1, -4.0).unwrap();
        assert_eq!(swarm.global_fitness(), -4.0);
        assert_eq!(swarm.global_position(), before);
        assert_eq!(swarm.iterations(), 1);

        let particle = swarm.particle(1).unwrap();
        assert_eq!(particle.best_fitness(), -4.0);
        assert_eq!(particle.best_position(), before.as_slice());
        assert_ne!(particle.position(), before.as_slice());
    }

    #[test]
    fn partitioned_phases_match_sync_global_best() {
        let fitnesses = [2.0, -1.0, 0.5, 7.0];
        let mut sync = vanilla(4, 3, 13);
        let partitioned = vanilla(4, 3, 13);

        sync.sync_update(&fitnesses).unwrap();
        for (i, &f) in fitnesses.iter().enumerate() {
            partitioned.record_personal_best(i, f).unwrap();
        }
        partitioned.resolve_global_best(&fitnesses).unwrap();
        let mut snapshot = Vec::new();
        for i in 0..4 {
            partitioned.update_particle(i, &mut snapshot).unwrap();
        }

        assert_eq!(sync.global_position(), partitioned.global_position());
        assert_eq!(sync.global_fitness(), partitioned.global_fitness());
        assert_eq!(sync.iterations(), partitioned.iterations());
        for i in 0..4 {
            assert_eq!(
                sync.particle_position(i).unwrap(),
                partitioned.particle_position(i).unwrap()
            );
        }
    }

    #[test]
    fn partitioned_phases_check_bounds() {
        let swarm = vanilla(2, 2, 14);
        assert!(swarm.record_personal_best(5, 0.0).is_err());
        assert!(swarm.resolve_global_best(&[0.0]).is_err());
        assert!(swarm.update_particle(2, &mut Vec::new()).is_err());
        assert_eq!(swarm.iterations(), 0);
    }

    #[test]
    fn update_particle_uses_given_snapshot() {
        let swarm = vanilla(1, 2, 15);
        swarm.resolve_global_best(&[1.0]).unwrap();
        let mut snapshot = vec![100.0, 100.0];
        swarm.update_particle(0, &mut snapshot).unwrap();
        assert_eq!(snapshot, vec![100.0, 100.0]);

        let mut wrong = vec![0.0; 5];
        swarm.update_particle(0, &mut wrong).unwrap();
        assert_eq!(wrong, swarm.global_position());
    }

    #[test]
    fn reset_keeps_fitness_and_optionally_zeroes_global() {
        let mut swarm = vanilla(3, 2, 16);
        swarm.sync_update(&[3.0, 2.0, 1.0]).unwrap();
        let global = swarm.global_position();
        let before = swarm.particle_position(0).unwrap();

        swarm.reset(&[0], false).unwrap();
        assert_ne!(swarm.particle_position(0).unwrap(), before);
        assert_eq!(swarm.particle_fitness(0).unwrap().fitness, 3.0);
        assert_eq!(swarm.global_position(), global);

        swarm.reset(&[1, 2], true).unwrap();
        assert_eq!(swarm.global_position(), vec![0.0, 0.0]);
        assert_eq!(swarm.global_fitness(), 1.0);
    }

    #[test]
    fn reset_rejects_bad_indices() {
        let mut swarm = vanilla(2, 2, 17);
        let before = swarm.particle_position(0).unwrap();
        assert_eq!(
            swarm.reset(&[0, 1, 0], true),
            Err(PsoError::TooManyIndices { requested: 3, len: 2 })
        );
        assert_eq!(
            swarm.reset(&[0, 4], false),
            Err(PsoError::IndexOutOfRange { index: 4, len: 2 })
        );
        assert_eq!(swarm.particle_position(0).unwrap(), before);
    }

    #[test]
    fn all_fitnesses_sorted_raw_ascending() {
        let mut swarm = vanilla(4, 1, 18);
        swarm.set_maximize(true);
        swarm.sync_update(&[3.0, -1.0, 8.0, 3.0]).unwrap();
        let ranked = swarm.all_fitnesses();
        let order: Vec<usize> = ranked.iter().map(|f| f.particle).collect();
        assert_eq!(order, vec![1, 0, 3, 2]);

        let mut reused = Vec::with_capacity(16);
        swarm.all_fitnesses_into(&mut reused);
        assert_eq!(reused, ranked);
    }
}
