//! Engine error types.

use funkybrot_core::ParamsError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum EngineError {
    /// The engine was shut down; no new work is accepted.
    #[error("engine stopped")]
    Stopped,

    #[error("invalid engine parameters: {0}")]
    Params(#[from] ParamsError),

    #[error("failed to build worker pool: {0}")]
    Pool(#[from] rayon::ThreadPoolBuildError),
}
