//! Per-rectangle calculation worker.

use std::sync::Arc;
use std::time::{Duration, Instant};

use funkybrot_core::{EngineParams, PixelRect, PlaneWindow, ValueBuffer};

use crate::escape::escape_value;
use crate::listener::ListenerRegistry;
use crate::registry::{WorkerId, WorkerRegistry};
use crate::CancellationToken;

/// Minimum wall-clock interval between a worker's successive progress
/// notifications. Decouples the observer update rate from raw compute
/// throughput.
pub const REPORT_PERIOD: Duration = Duration::from_millis(40);

/// One unit of concurrent execution: computes a single rectangle of the
/// buffer it was bound to at submission time.
///
/// The worker sweeps columns left to right, pixels top to bottom, polling its
/// cancellation token once per pixel. Progress is reported per batch of
/// completed columns every [`REPORT_PERIOD`], plus one final report for the
/// remainder. Deregistration from the running set is guaranteed on every exit
/// path, including cancellation and panic.
pub(crate) struct CalculationWorker {
    pub buffer: Arc<ValueBuffer>,
    pub window: PlaneWindow,
    pub area: PixelRect,
    pub params: EngineParams,
    pub token: CancellationToken,
    pub id: WorkerId,
    pub registry: Arc<WorkerRegistry>,
    pub listeners: Arc<ListenerRegistry>,
}

struct DeregisterGuard<'a> {
    registry: &'a WorkerRegistry,
    id: WorkerId,
}

impl Drop for DeregisterGuard<'_> {
    fn drop(&mut self) {
        self.registry.deregister(self.id);
    }
}

impl CalculationWorker {
    pub fn run(self) {
        let _guard = DeregisterGuard {
            registry: &self.registry,
            id: self.id,
        };

        let (pixel_width, pixel_height) = self.buffer.dimensions();
        let mut report_start = self.area.x;
        let mut last_report = Instant::now();

        for x in self.area.x..self.area.right() {
            for y in self.area.y..self.area.bottom() {
                let value = escape_value(
                    x,
                    y,
                    pixel_width,
                    pixel_height,
                    &self.window,
                    &self.params,
                    &self.token,
                );

                if self.token.is_cancelled() {
                    // Superseded by a later resize: the remaining pixels stay
                    // at the sentinel; already written columns keep their
                    // values.
                    log::trace!(
                        "worker cancelled at column {x} of area ({}, {}, {}x{})",
                        self.area.x,
                        self.area.y,
                        self.area.width,
                        self.area.height
                    );
                    return;
                }

                self.buffer.set(x, y, value);
            }

            if last_report.elapsed() >= REPORT_PERIOD {
                let report = PixelRect::new(
                    report_start,
                    self.area.y,
                    x - report_start + 1,
                    self.area.height,
                );
                self.listeners.notify(report, &self.buffer);
                report_start = x + 1;
                last_report = Instant::now();
            }
        }

        if report_start < self.area.right() {
            let report = PixelRect::new(
                report_start,
                self.area.y,
                self.area.right() - report_start,
                self.area.height,
            );
            self.listeners.notify(report, &self.buffer);
        }
    }
}
