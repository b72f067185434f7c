use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

/// Advisory cancellation signal shared between the engine and one worker.
///
/// Cancellation is cooperative: the worker polls the flag and stops at the
/// next check, so a few extra pixels may be computed after `cancel()`. The
/// engine never waits for a cancelled worker to actually stop.
#[derive(Clone, Debug, Default)]
pub struct CancellationToken {
    flag: Arc<AtomicBool>,
}

impl CancellationToken {
    pub fn new() -> Self {
        Self::default()
    }

    /// Signal the owning worker to stop at its next poll.
    pub fn cancel(&self) {
        self.flag.store(true, Ordering::Relaxed);
    }

    pub fn is_cancelled(&self) -> bool {
        self.flag.load(Ordering::Relaxed)
    }
}
