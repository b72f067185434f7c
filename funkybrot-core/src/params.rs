use serde::{Deserialize, Serialize};
use thiserror::Error;

pub const DEFAULT_ITERATION_LIMIT: u32 = 1000;
pub const DEFAULT_DIVERGENCE_THRESHOLD: f64 = 2.0;

/// Rejected engine parameters.
#[derive(Debug, Error, PartialEq)]
pub enum ParamsError {
    #[error("iteration limit must be positive, got {0}")]
    IterationLimit(u32),

    #[error("divergence threshold must be positive and finite, got {0}")]
    DivergenceThreshold(f64),
}

/// Iteration parameters fixed at engine construction.
///
/// The iteration limit bounds how long a non-divergent point is chased; the
/// divergence threshold is the |z| radius beyond which a point counts as
/// escaped.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct EngineParams {
    pub iteration_limit: u32,
    pub divergence_threshold: f64,
}

impl EngineParams {
    /// Validate and build engine parameters.
    ///
    /// Fails fast on a zero iteration limit or a non-positive/non-finite
    /// threshold rather than clamping.
    pub fn new(iteration_limit: u32, divergence_threshold: f64) -> Result<Self, ParamsError> {
        if iteration_limit == 0 {
            return Err(ParamsError::IterationLimit(iteration_limit));
        }
        if !(divergence_threshold > 0.0) || !divergence_threshold.is_finite() {
            return Err(ParamsError::DivergenceThreshold(divergence_threshold));
        }
        Ok(Self {
            iteration_limit,
            divergence_threshold,
        })
    }

    /// Threshold squared, the quantity the iteration loop actually compares
    /// against |z|².
    pub fn max_absolute(&self) -> f64 {
        self.divergence_threshold * self.divergence_threshold
    }
}

impl Default for EngineParams {
    fn default() -> Self {
        Self {
            iteration_limit: DEFAULT_ITERATION_LIMIT,
            divergence_threshold: DEFAULT_DIVERGENCE_THRESHOLD,
        }
    }
}
