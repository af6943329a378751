use serde::{Deserialize, Serialize};
use std::fmt;

/// Velocity update rule applied to every particle of a swarm.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Mode {
    #[default]
    Vanilla,
    ConstantInertia,
    LinearInertiaReduction,
    Constriction,
    DynamicInertiaMaxVelocityReduction,
}

impl Mode {
    pub const ALL: [Mode; 5] = [
        Mode::Vanilla,
        Mode::ConstantInertia,
        Mode::LinearInertiaReduction,
        Mode::Constriction,
        Mode::DynamicInertiaMaxVelocityReduction,
    ];
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Mode::Vanilla => "vanilla",
            Mode::ConstantInertia => "constant-inertia",
            Mode::LinearInertiaReduction => "linear-inertia-reduction",
            Mode::Constriction => "constriction",
            Mode::DynamicInertiaMaxVelocityReduction => "dimvr",
        };
        f.write_str(name)
    }
}
