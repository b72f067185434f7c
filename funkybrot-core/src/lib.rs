pub mod buffer;
pub mod params;
pub mod pixel_rect;
pub mod resize;
pub mod window;

pub use buffer::{ValueBuffer, SENTINEL};
pub use params::{
    EngineParams, ParamsError, DEFAULT_DIVERGENCE_THRESHOLD, DEFAULT_ITERATION_LIMIT,
};
pub use pixel_rect::PixelRect;
pub use resize::{plan_resize, ResizePlan};
pub use window::PlaneWindow;
