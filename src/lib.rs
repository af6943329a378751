//! Particle swarm optimization engine.
//!
//! The engine never evaluates an objective. Callers read particle positions,
//! evaluate them, and hand the fitness values back through one of the update
//! protocols on [`Swarm`]. Five velocity rules are available through [`Mode`];
//! the whole engine is generic over [`SwarmFloat`] and instantiated as
//! [`Swarm32`] and [`Swarm64`].
//!
//! ```
//! use pso_swarm::{Mode, Swarm64, SwarmConfig};
//!
//! let mut swarm = Swarm64::new(Some(7));
//! swarm.configure(Mode::Constriction, SwarmConfig::new(20, 3));
//! for _ in 0..50 {
//!     let fitnesses: Vec<f64> = (0..swarm.len())
//!         .map(|i| swarm.particle_position(i).unwrap().iter().map(|x| x * x).sum::<f64>())
//!         .collect();
//!     swarm.sync_update(&fitnesses).unwrap();
//! }
//! assert!(swarm.global_fitness() < 3.0);
//! ```

pub mod config;
pub mod error;
pub mod float;
pub mod mode;
pub mod particle;
pub mod search_result;
pub mod swarm;
pub mod update_rule;

pub use config::SwarmConfig;
pub use error::{PsoError, PsoResult};
pub use float::SwarmFloat;
pub use mode::Mode;
pub use particle::Particle;
pub use search_result::SearchResult;
pub use swarm::{FitnessIndex, Swarm, Swarm32, Swarm64};
pub use update_rule::{clamp_magnitude, constriction_coefficient, UpdateCoefficients};
