//! Per-particle velocity and position transforms.
//!
//! Every rule draws two fresh uniform scalars per dimension (cognitive first,
//! then social), computes a raw velocity, clamps it by magnitude and adds it to
//! the position.

use crate::float::SwarmFloat;
use crate::mode::Mode;
use rand::Rng;

/// Swarm-level coefficients handed to every particle update.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct UpdateCoefficients<T> {
    pub cognitive: T,
    pub social: T,
    /// Static velocity cap. Under DIMVR this is the gamma multiplier of the
    /// particle's position spread instead.
    pub vmax: T,
    pub constriction: T,
}

/// Sign-preserving clamp of `v` to `[-vmax, vmax]`.
pub fn clamp_magnitude<T: SwarmFloat>(v: T, vmax: T) -> T {
    if v < T::zero() {
        if vmax < -v {
            return -vmax;
        }
        return v;
    }
    if vmax < v {
        vmax
    } else {
        v
    }
}

/// `2 / |2 - psi - sqrt(psi^2 - 4 psi)|` with `psi = cognitive + social`.
///
/// Only real for `psi > 4`; smaller sums yield NaN, which is returned as-is.
pub fn constriction_coefficient<T: SwarmFloat>(cognitive: T, social: T) -> T {
    let psi = cognitive + social;
    let two = T::lit(2.0);
    two / (two - psi - (psi * psi - T::lit(4.0) * psi).sqrt()).abs()
}

/// Mutable view over one particle's state for the duration of an update.
pub struct Motion<'a, T, R: ?Sized> {
    pub position: &'a mut [T],
    pub velocity: &'a mut [T],
    pub best_position: &'a [T],
    pub inertia: &'a mut T,
    pub alpha: T,
    pub rng: &'a mut R,
}

impl<T: SwarmFloat, R: Rng + ?Sized> Motion<'_, T, R> {
    pub fn apply(&mut self, mode: Mode, c: &UpdateCoefficients<T>, global: &[T]) {
        match mode {
            Mode::Vanilla => self.vanilla(c, global),
            Mode::ConstantInertia => self.constant_inertia(c, global),
            Mode::LinearInertiaReduction => self.linear_inertia_reduction(c, global),
            Mode::Constriction => self.constriction(c, global),
            Mode::DynamicInertiaMaxVelocityReduction => self.dimvr(c, global),
        }
    }

    // cognitive + social attraction for dimension i
    fn pull(&mut self, i: usize, c: &UpdateCoefficients<T>, global: &[T]) -> T {
        let x = self.position[i];
        let cognitive = c.cognitive * T::unit(&mut *self.rng) * (self.best_position[i] - x);
        let social = c.social * T::unit(&mut *self.rng) * (global[i] - x);
        cognitive + social
    }

    fn step(&mut self, i: usize, raw: T, vmax: T) {
        let v = clamp_magnitude(raw, vmax);
        self.velocity[i] = v;
        self.position[i] = self.position[i] + v;
    }

    pub fn vanilla(&mut self, c: &UpdateCoefficients<T>, global: &[T]) {
        for i in 0..self.velocity.len() {
            let raw = self.velocity[i] + self.pull(i, c, global);
            self.step(i, raw, c.vmax);
        }
    }

    pub fn constant_inertia(&mut self, c: &UpdateCoefficients<T>, global: &[T]) {
        for i in 0..self.velocity.len() {
            let raw = *self.inertia * self.velocity[i] + self.pull(i, c, global);
            self.step(i, raw, c.vmax);
        }
    }

    /// Every dimension uses the same inertia; it decays by `alpha` once the
    /// whole particle has moved.
    pub fn linear_inertia_reduction(&mut self, c: &UpdateCoefficients<T>, global: &[T]) {
        for i in 0..self.velocity.len() {
            let raw = self.alpha * *self.inertia * self.velocity[i] + self.pull(i, c, global);
            self.step(i, raw, c.vmax);
        }
        *self.inertia = *self.inertia * self.alpha;
    }

    pub fn constriction(&mut self, c: &UpdateCoefficients<T>, global: &[T]) {
        for i in 0..self.velocity.len() {
            let raw = c.constriction * (self.velocity[i] + self.pull(i, c, global));
            self.step(i, raw, c.vmax);
        }
    }

    /// Velocities for every dimension are computed before any position moves;
    /// the cap is `c.vmax * (max(x) - min(x))` over the current position.
    pub fn dimvr(&mut self, c: &UpdateCoefficients<T>, global: &[T]) {
        let mut min = T::infinity();
        let mut max = T::neg_infinity();
        for i in 0..self.velocity.len() {
            self.velocity[i] = *self.inertia * self.velocity[i] + self.pull(i, c, global);
            let x = self.position[i];
            if x < min {
                min = x;
            }
            if x > max {
                max = x;
            }
        }
        let vmax = c.vmax * (max - min);
        for i in 0..self.velocity.len() {
            let raw = self.velocity[i];
            self.step(i, raw, vmax);
        }
    }
}
