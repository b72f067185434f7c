//! The escape-time function: one pixel in, one smoothly-shaded scalar out.

use crate::CancellationToken;
use funkybrot_core::{EngineParams, PlaneWindow, SENTINEL};

/// Shapes the arctangent curve for diverged points (value from the iteration
/// count at escape).
const DIVERGE_FACTOR: f64 = 0.4;
/// Shapes the arctangent curve for non-divergent points (value from |z|² at
/// the iteration limit).
const NON_DIVERGE_FACTOR: f64 = 3.0;

/// Compute the escape-time value for pixel (x, y) on a
/// `pixel_width × pixel_height` grid mapped through `window`.
///
/// The pixel center is mapped to a plane coordinate `c` and `z ← z² + c` is
/// iterated from zero while `|z|² ≤ threshold²`, the iteration limit is not
/// reached, and `token` is not cancelled.
///
/// The result is a continuous scalar in `(-1, 1)`:
/// - diverged at iteration `i`: `2·atan(0.4·i)/π`, in `[0, 1)`; larger means
///   faster escape;
/// - iteration limit reached: `-2·atan(3·|z|²)/π`, in `(-1, 0]`; more
///   negative means |z| stayed larger;
/// - cancelled mid-iteration: the sentinel `0.0`, which consumers must treat
///   as "not yet valid".
///
/// The arctangent transforms give banding-free shading from both escape speed
/// and interior proximity, unlike a raw iteration count.
pub fn escape_value(
    x: u32,
    y: u32,
    pixel_width: u32,
    pixel_height: u32,
    window: &PlaneWindow,
    params: &EngineParams,
    token: &CancellationToken,
) -> f64 {
    let max_absolute = params.max_absolute();
    let (cre, cim) = window.pixel_to_plane(x, y, pixel_width, pixel_height);

    let mut re = 0.0_f64;
    let mut im = 0.0_f64;
    let mut i: u32 = 0;
    let mut absolute;
    loop {
        let next_re = re * re - im * im + cre;
        let next_im = 2.0 * re * im + cim;
        re = next_re;
        im = next_im;
        i += 1;
        absolute = re * re + im * im;

        if token.is_cancelled() || absolute > max_absolute || i >= params.iteration_limit {
            break;
        }
    }

    if token.is_cancelled() {
        SENTINEL
    } else if i < params.iteration_limit {
        2.0 * (DIVERGE_FACTOR * i as f64).atan() / std::f64::consts::PI
    } else {
        -2.0 * (NON_DIVERGE_FACTOR * absolute).atan() / std::f64::consts::PI
    }
}
