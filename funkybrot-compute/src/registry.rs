//! Registry of in-flight calculation workers.

use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Condvar, Mutex};
use std::time::{Duration, Instant};

use crate::CancellationToken;

/// Handle identifying one registered worker.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct WorkerId(u64);

/// Tracks the cancellation token of every running worker behind one coarse
/// lock, so a resize can signal all of them without waiting for any to stop.
///
/// Deregistration wakes waiters on an internal condvar when the set becomes
/// empty; [`WorkerRegistry::wait_idle`] builds on that to let callers drain
/// dispatched work (tests, orderly teardown).
#[derive(Default)]
pub struct WorkerRegistry {
    next_id: AtomicU64,
    running: Mutex<HashMap<WorkerId, CancellationToken>>,
    idle: Condvar,
}

impl WorkerRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a worker's token before dispatch. The returned id must be
    /// passed to [`WorkerRegistry::deregister`] on every exit path.
    pub fn register(&self, token: CancellationToken) -> WorkerId {
        let id = WorkerId(self.next_id.fetch_add(1, Ordering::Relaxed));
        self.running
            .lock()
            .expect("worker registry poisoned")
            .insert(id, token);
        id
    }

    pub fn deregister(&self, id: WorkerId) {
        let mut running = self.running.lock().expect("worker registry poisoned");
        running.remove(&id);
        if running.is_empty() {
            self.idle.notify_all();
        }
    }

    /// Signal every registered worker to stop. Fire-and-forget: tokens are
    /// flipped under the lock but nobody waits for the workers to observe
    /// them.
    pub fn cancel_all(&self) {
        let running = self.running.lock().expect("worker registry poisoned");
        for token in running.values() {
            token.cancel();
        }
    }

    /// Number of workers currently registered.
    pub fn active(&self) -> usize {
        self.running.lock().expect("worker registry poisoned").len()
    }

    /// Block until the running set is empty or `timeout` elapses. Returns
    /// true when the set drained.
    pub fn wait_idle(&self, timeout: Duration) -> bool {
        let deadline = Instant::now() + timeout;
        let mut running = self.running.lock().expect("worker registry poisoned");
        while !running.is_empty() {
            let Some(remaining) = deadline.checked_duration_since(Instant::now()) else {
                return false;
            };
            let (guard, result) = self
                .idle
                .wait_timeout(running, remaining)
                .expect("worker registry poisoned");
            running = guard;
            if result.timed_out() && !running.is_empty() {
                return false;
            }
        }
        true
    }
}
