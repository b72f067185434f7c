//! The engine aggregate: buffer lifecycle, worker dispatch, listeners.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use funkybrot_core::{plan_resize, EngineParams, PixelRect, PlaneWindow, ValueBuffer};

use crate::error::EngineError;
use crate::listener::{ListenerId, ListenerRegistry};
use crate::registry::WorkerRegistry;
use crate::worker::CalculationWorker;
use crate::CancellationToken;

struct EngineState {
    buffer: Arc<ValueBuffer>,
    window: PlaneWindow,
}

/// Incremental concurrent Mandelbrot calculation engine.
///
/// Owns the current value buffer, the running-worker set, and the listener
/// set. All engine-facing operations are synchronous and return immediately;
/// only the per-pixel computation runs on the worker pool.
///
/// Starts with a 0×0 buffer; the first [`MandelbrotEngine::resize`] sizes the
/// grid and computes it in full. Later resizes migrate the centered overlap,
/// cancel all in-flight workers, and recompute only the newly exposed
/// margins. Cancellation is cooperative and fire-and-forget; a cancelled
/// rectangle is never recomputed automatically.
pub struct MandelbrotEngine {
    params: EngineParams,
    pool: rayon::ThreadPool,
    listeners: Arc<ListenerRegistry>,
    workers: Arc<WorkerRegistry>,
    stopped: AtomicBool,
    state: Mutex<EngineState>,
}

impl MandelbrotEngine {
    pub fn new(params: EngineParams) -> Result<Self, EngineError> {
        let pool = rayon::ThreadPoolBuilder::new()
            .thread_name(|index| format!("funkybrot-worker-{index}"))
            .build()?;
        Ok(Self {
            params,
            pool,
            listeners: Arc::new(ListenerRegistry::new()),
            workers: Arc::new(WorkerRegistry::new()),
            stopped: AtomicBool::new(false),
            state: Mutex::new(EngineState {
                buffer: Arc::new(ValueBuffer::new(0, 0)),
                window: PlaneWindow::default(),
            }),
        })
    }

    /// Engine with the default iteration limit (1000) and divergence
    /// threshold (2.0).
    pub fn with_defaults() -> Result<Self, EngineError> {
        Self::new(EngineParams::default())
    }

    pub fn params(&self) -> EngineParams {
        self.params
    }

    /// Current buffer reference. Callers must tolerate concurrent mutation:
    /// in-flight workers keep writing into it until they finish or observe
    /// cancellation.
    pub fn buffer(&self) -> Arc<ValueBuffer> {
        Arc::clone(&self.state.lock().expect("engine state poisoned").buffer)
    }

    /// Current plane window (rescaled on every resize).
    pub fn window(&self) -> PlaneWindow {
        self.state.lock().expect("engine state poisoned").window
    }

    /// Register a callback for partial and full rectangle completions. The
    /// callback runs on worker threads and receives the completed area plus
    /// the buffer it belongs to (which may already be superseded by a later
    /// resize).
    pub fn add_listener(
        &self,
        listener: impl Fn(PixelRect, &Arc<ValueBuffer>) + Send + Sync + 'static,
    ) -> ListenerId {
        self.listeners.add(Arc::new(listener))
    }

    /// Remove a previously registered listener. Returns false for an unknown
    /// or already removed id.
    pub fn remove_listener(&self, id: ListenerId) -> bool {
        self.listeners.remove(id)
    }

    /// Resize the pixel grid, migrating the centered overlap of the current
    /// content and recomputing only the newly exposed margins.
    ///
    /// Unchanged dimensions are a no-op. Otherwise a brand-new buffer
    /// atomically replaces the old one, window extents rescale proportionally
    /// per axis, every in-flight worker is cancelled, and one worker per
    /// exposed rectangle is dispatched. Shrinking dispatches nothing.
    pub fn resize(&self, new_width: u32, new_height: u32) -> Result<(), EngineError> {
        if self.stopped.load(Ordering::SeqCst) {
            return Err(EngineError::Stopped);
        }

        let mut state = self.state.lock().expect("engine state poisoned");
        let old_dims = state.buffer.dimensions();
        let Some(plan) = plan_resize(old_dims, (new_width, new_height)) else {
            return Ok(());
        };
        log::debug!(
            "resize {}x{} -> {}x{}: {} exposed rectangle(s)",
            old_dims.0,
            old_dims.1,
            new_width,
            new_height,
            plan.exposed.len()
        );

        let new_buffer = Arc::new(ValueBuffer::new(new_width, new_height));
        new_buffer.copy_block(
            &state.buffer,
            plan.src_offset,
            plan.dst_offset,
            plan.copy_width,
            plan.copy_height,
        );
        state.window = state.window.rescaled(old_dims, plan.new_dims);
        state.buffer = Arc::clone(&new_buffer);

        // Everything still running computes stale geometry into an orphaned
        // buffer. Signal and move on; the disjointness of the new rectangles
        // does not depend on when they actually stop.
        self.workers.cancel_all();

        for area in plan.exposed {
            self.submit(Arc::clone(&new_buffer), state.window, area);
        }
        Ok(())
    }

    fn submit(&self, buffer: Arc<ValueBuffer>, window: PlaneWindow, area: PixelRect) {
        let token = CancellationToken::new();
        let id = self.workers.register(token.clone());
        let worker = CalculationWorker {
            buffer,
            window,
            area,
            params: self.params,
            token,
            id,
            registry: Arc::clone(&self.workers),
            listeners: Arc::clone(&self.listeners),
        };
        self.pool.spawn(move || worker.run());
    }

    /// Number of workers currently in the running set.
    pub fn active_workers(&self) -> usize {
        self.workers.active()
    }

    /// Block until all dispatched workers have deregistered or `timeout`
    /// elapses. Returns true when the engine drained.
    pub fn wait_idle(&self, timeout: Duration) -> bool {
        self.workers.wait_idle(timeout)
    }

    /// Stop accepting new work and cancel everything in flight. Subsequent
    /// `resize` calls fail with [`EngineError::Stopped`]. The pool itself is
    /// torn down when the engine is dropped.
    pub fn shutdown(&self) {
        self.stopped.store(true, Ordering::SeqCst);
        self.workers.cancel_all();
        log::debug!("engine stopped");
    }

    pub fn is_stopped(&self) -> bool {
        self.stopped.load(Ordering::SeqCst)
    }
}
