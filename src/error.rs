use thiserror::Error;

pub type PsoResult<T> = Result<T, PsoError>;

/// Failures reported by swarm operations. Every variant is raised before the
/// swarm is touched, so an `Err` leaves the swarm exactly as it was.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PsoError {
    #[error("fitness count {actual} does not match particle count {expected}")]
    SizeMismatch { expected: usize, actual: usize },

    #[error("particle index {index} out of range for swarm of {len}")]
    IndexOutOfRange { index: usize, len: usize },

    #[error("{requested} indices given for swarm of {len}")]
    TooManyIndices { requested: usize, len: usize },
}
