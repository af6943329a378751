use num_traits::Float;
use rand::Rng;
use std::fmt::{Debug, Display};

/// Floating-point precision a swarm runs in. Implemented for `f32` and `f64`.
pub trait SwarmFloat: Float + Debug + Display + Default + Send + Sync + 'static {
    /// Uniform draw in `[0, 1)`.
    fn unit<R: Rng + ?Sized>(rng: &mut R) -> Self;

    /// Converts an `f64` constant into this precision.
    fn lit(value: f64) -> Self;

    /// Worst possible fitness for the given direction.
    fn worst(maximize: bool) -> Self {
        if maximize {
            Self::neg_infinity()
        } else {
            Self::infinity()
        }
    }

    /// Strict improvement of `candidate` over `incumbent`.
    fn improves(candidate: Self, incumbent: Self, maximize: bool) -> bool {
        if maximize {
            candidate > incumbent
        } else {
            candidate < incumbent
        }
    }
}

macro_rules! impl_swarm_float {
    ($t:ty) => {
        impl SwarmFloat for $t {
            fn unit<R: Rng + ?Sized>(rng: &mut R) -> Self {
                rng.gen::<$t>()
            }

            fn lit(value: f64) -> Self {
                value as $t
            }
        }
    };
}

impl_swarm_float!(f32);
impl_swarm_float!(f64);
