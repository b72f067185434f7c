//! Incremental concurrent Mandelbrot calculation engine.
//!
//! Computes a smoothly-shaded escape-time fractal over a resizable pixel
//! grid, tile by tile on a worker pool, with cooperative cancellation and
//! throttled progress notifications. Rendering, input handling, and color
//! mapping are deliberately outside this crate: an external renderer calls
//! [`MandelbrotEngine::resize`] on size changes, registers a listener for
//! incremental updates, and reads buffer scalars in `(-1, 1)` for its own
//! color mapping (treating the sentinel `0.0` as "not yet valid").

pub mod cancellation;
pub mod engine;
pub mod error;
pub mod escape;
pub mod listener;
pub mod registry;
pub mod worker;

pub use cancellation::CancellationToken;
pub use engine::MandelbrotEngine;
pub use error::EngineError;
pub use escape::escape_value;
pub use listener::{CalculationListener, ListenerId, ListenerRegistry};
pub use registry::{WorkerId, WorkerRegistry};
pub use worker::REPORT_PERIOD;

pub use funkybrot_core::{
    plan_resize, EngineParams, ParamsError, PixelRect, PlaneWindow, ResizePlan, ValueBuffer,
    SENTINEL,
};
