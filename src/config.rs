use crate::float::SwarmFloat;
use serde::{Deserialize, Serialize};

/// Shared control parameters of a swarm.
///
/// Missing fields in a deserialized document fall back to [`Default`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, bound(deserialize = "T: SwarmFloat + Deserialize<'de>"))]
pub struct SwarmConfig<T> {
    /// Number of particles created by a configuration call.
    pub swarm_size: usize,
    pub dims: usize,
    pub cognitive: T,
    pub social: T,
    /// Velocity cap, or the spread multiplier under DIMVR.
    pub vmax: T,
    /// Lower bound of the uniform start range for new or reset particles.
    pub position_min: T,
    /// Upper bound (exclusive) of the start range.
    pub position_max: T,
    pub alpha_max: T,
    pub inertia_max: T,
}

impl<T: SwarmFloat> Default for SwarmConfig<T> {
    fn default() -> Self {
        SwarmConfig {
            swarm_size: 0,
            dims: 0,
            cognitive: T::lit(2.05),
            social: T::lit(2.05),
            vmax: T::one(),
            position_min: -T::one(),
            position_max: T::one(),
            alpha_max: T::lit(0.5),
            inertia_max: T::lit(0.5),
        }
    }
}

impl<T: SwarmFloat> SwarmConfig<T> {
    pub fn new(swarm_size: usize, dims: usize) -> Self {
        SwarmConfig {
            swarm_size,
            dims,
            ..Self::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_document_fills_defaults() {
        let config: SwarmConfig<f64> =
            serde_json::from_str(r#"{ "swarm_size": 12, "dims": 3, "vmax": 0.25 }"#).unwrap();
        assert_eq!(config.swarm_size, 12);
        assert_eq!(config.dims, 3);
        assert_eq!(config.vmax, 0.25);
        assert_eq!(config.cognitive, 2.05);
        assert_eq!(config.position_min, -1.0);
        assert_eq!(config.inertia_max, 0.5);
    }

    #[test]
    fn single_precision_document() {
        let config: SwarmConfig<f32> = serde_json::from_str(
            r#"{ "swarm_size": 4, "dims": 2, "position_min": -5.0, "position_max": 5.0 }"#,
        )
        .unwrap();
        assert_eq!(
            config,
            SwarmConfig {
                position_min: -5.0,
                position_max: 5.0,
                ..SwarmConfig::new(4, 2)
            }
        );
    }
}
