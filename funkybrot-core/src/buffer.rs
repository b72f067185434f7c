use std::sync::atomic::{AtomicU64, Ordering};

/// Sentinel stored in cells that have not received a valid escape-time value.
/// Consumers must not interpret it as a divergence/interior measurement.
pub const SENTINEL: f64 = 0.0;

/// Row-major grid of escape-time scalars.
///
/// Cells are `f64` bit patterns in relaxed atomics so concurrent workers can
/// write and renderers can read without a lock. There is no synchronization
/// per cell: write safety comes from the engine invariant that live work
/// rectangles never overlap. A freshly allocated buffer reads `SENTINEL`
/// everywhere (the all-zero bit pattern is `0.0`).
#[derive(Debug)]
pub struct ValueBuffer {
    width: u32,
    height: u32,
    cells: Vec<AtomicU64>,
}

impl ValueBuffer {
    pub fn new(width: u32, height: u32) -> Self {
        let len = width as usize * height as usize;
        let mut cells = Vec::with_capacity(len);
        cells.resize_with(len, || AtomicU64::new(0));
        Self {
            width,
            height,
            cells,
        }
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn dimensions(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    /// Number of cells in the grid
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    fn index(&self, x: u32, y: u32) -> usize {
        debug_assert!(x < self.width && y < self.height);
        y as usize * self.width as usize + x as usize
    }

    /// Read the scalar at (x, y). Callers must tolerate concurrent mutation:
    /// a cell may hold `SENTINEL` until its worker reaches it.
    pub fn get(&self, x: u32, y: u32) -> f64 {
        f64::from_bits(self.cells[self.index(x, y)].load(Ordering::Relaxed))
    }

    /// Write the scalar at (x, y).
    pub fn set(&self, x: u32, y: u32, value: f64) {
        self.cells[self.index(x, y)].store(value.to_bits(), Ordering::Relaxed);
    }

    /// Copy a `copy_width × copy_height` block from `src` at `(src_x, src_y)`
    /// into this buffer at `(dst_x, dst_y)`. Bit patterns are preserved
    /// exactly; the block must fit in both buffers.
    pub fn copy_block(
        &self,
        src: &ValueBuffer,
        (src_x, src_y): (u32, u32),
        (dst_x, dst_y): (u32, u32),
        copy_width: u32,
        copy_height: u32,
    ) {
        debug_assert!(src_x + copy_width <= src.width && src_y + copy_height <= src.height);
        debug_assert!(dst_x + copy_width <= self.width && dst_y + copy_height <= self.height);

        for y in 0..copy_height {
            for x in 0..copy_width {
                let bits = src.cells[src.index(src_x + x, src_y + y)].load(Ordering::Relaxed);
                self.cells[self.index(dst_x + x, dst_y + y)].store(bits, Ordering::Relaxed);
            }
        }
    }
}
