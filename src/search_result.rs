use crate::float::SwarmFloat;

/// Best solution known to the whole swarm, plus the completed cycle count.
///
/// `value` is always an owned copy of the winning particle's position at the
/// time it was recorded.
#[derive(Debug, Clone, PartialEq)]
pub struct SearchResult<T> {
    pub value: Vec<T>,
    pub fitness: T,
    pub iter: u64,
}

impl<T: SwarmFloat> SearchResult<T> {
    pub fn new(dims: usize, maximize: bool) -> Self {
        SearchResult {
            value: vec![T::zero(); dims],
            fitness: T::worst(maximize),
            iter: 0,
        }
    }

    /// Copies `candidate` in when `fitness` strictly improves on the stored
    /// fitness. Returns whether it did.
    pub fn compare_and_maybe_update(
        &mut self,
        candidate: &[T],
        fitness: T,
        maximize: bool,
    ) -> bool {
        if !T::improves(fitness, self.fitness, maximize) {
            return false;
        }
        self.fitness = fitness;
        self.value.clear();
        self.value.extend_from_slice(candidate);
        true
    }
}
