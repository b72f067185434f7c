use serde::{Deserialize, Serialize};

/// Visible window in the complex plane.
///
/// Defines the rectangular region the pixel grid is mapped onto:
/// - `center_re` / `center_im`: center point in plane coordinates
/// - `real_width`: extent along the real axis
/// - `imaginary_height`: extent along the imaginary axis
///
/// The window is a plain value; the engine snapshots it per worker task so a
/// resize never changes the geometry a running worker computes with.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct PlaneWindow {
    pub center_re: f64,
    pub center_im: f64,
    pub real_width: f64,
    pub imaginary_height: f64,
}

impl PlaneWindow {
    pub fn new(center_re: f64, center_im: f64, real_width: f64, imaginary_height: f64) -> Self {
        Self {
            center_re,
            center_im,
            real_width,
            imaginary_height,
        }
    }

    /// Map a pixel to its plane coordinate using pixel-center sampling:
    /// pixel (x, y) samples the plane at the center of its cell, so a
    /// `width × height` grid covers the window without half-pixel bias.
    pub fn pixel_to_plane(&self, x: u32, y: u32, pixel_width: u32, pixel_height: u32) -> (f64, f64) {
        let re =
            self.center_re + ((x as f64 + 0.5) / pixel_width as f64 - 0.5) * self.real_width;
        let im =
            self.center_im + ((y as f64 + 0.5) / pixel_height as f64 - 0.5) * self.imaginary_height;
        (re, im)
    }

    /// Rescale window extents proportionally to a pixel-grid size change.
    ///
    /// Each axis with a nonzero prior pixel size keeps its per-pixel plane
    /// scale constant (`extent *= new/old`), so grown or cropped content is
    /// preserved rather than stretched. An axis sized from zero keeps its
    /// current extent.
    pub fn rescaled(&self, old_dims: (u32, u32), new_dims: (u32, u32)) -> Self {
        let mut window = *self;
        if old_dims.0 != 0 {
            window.real_width = window.real_width * new_dims.0 as f64 / old_dims.0 as f64;
        }
        if old_dims.1 != 0 {
            window.imaginary_height =
                window.imaginary_height * new_dims.1 as f64 / old_dims.1 as f64;
        }
        window
    }
}

impl Default for PlaneWindow {
    /// The classic full view: centered on the origin, 4×4 plane units.
    fn default() -> Self {
        Self::new(0.0, 0.0, 4.0, 4.0)
    }
}
