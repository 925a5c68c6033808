use derive_new::new;
use serde::{Deserialize, Serialize};

/// Tuning knobs of a single solve.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, new)]
#[serde(default)]
pub struct SolverOptions {
    /// Absolute/relative tolerance used for every floating point comparison.
    pub tolerance: f64,
    /// Upper bound on the number of pivots.
    pub max_iterations: usize,
}

impl SolverOptions {
    pub const DEFAULT_TOLERANCE: f64 = 1e-9;
    pub const DEFAULT_MAX_ITERATIONS: usize = 1000;
}

impl Default for SolverOptions {
    fn default() -> Self {
        Self {
            tolerance: Self::DEFAULT_TOLERANCE,
            max_iterations: Self::DEFAULT_MAX_ITERATIONS,
        }
    }
}
