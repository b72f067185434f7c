//! Resize planning: offsets for the centered content migration and the list
//! of newly exposed rectangles that need recomputation.
//!
//! Planning is pure so every geometry case is unit-testable without touching
//! buffers or workers. The engine executes a plan by allocating the new
//! buffer, copying the overlap block, and submitting one worker per exposed
//! rectangle.

use crate::PixelRect;

/// How to migrate buffer content for one resize.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ResizePlan {
    pub new_dims: (u32, u32),
    /// Per-axis overlap between old and new grid (`min(old, new)`).
    pub copy_width: u32,
    pub copy_height: u32,
    /// Top-left of the copied block in the old buffer (nonzero when shrinking
    /// an axis: the crop is centered).
    pub src_offset: (u32, u32),
    /// Top-left of the copied block in the new buffer (nonzero when growing
    /// an axis: the old content is centered).
    pub dst_offset: (u32, u32),
    /// Rectangles of the new grid not covered by migrated content. These are
    /// the only regions that need recomputation; shrinking exposes nothing.
    pub exposed: Vec<PixelRect>,
}

/// Plan a resize from `old_dims` to `new_dims`. Returns `None` when the
/// dimensions are unchanged (resize is a no-op).
pub fn plan_resize(old_dims: (u32, u32), new_dims: (u32, u32)) -> Option<ResizePlan> {
    if old_dims == new_dims {
        return None;
    }

    let (old_width, old_height) = old_dims;
    let (new_width, new_height) = new_dims;

    let copy_width = old_width.min(new_width);
    let copy_height = old_height.min(new_height);

    let src_x = if old_width > new_width {
        (old_width - new_width) / 2
    } else {
        0
    };
    let src_y = if old_height > new_height {
        (old_height - new_height) / 2
    } else {
        0
    };
    let dst_x = if new_width > old_width {
        (new_width - old_width) / 2
    } else {
        0
    };
    let dst_y = if new_height > old_height {
        (new_height - old_height) / 2
    } else {
        0
    };

    let mut exposed = Vec::new();
    if old_width == 0 || old_height == 0 {
        // First sizing (or sizing from a degenerate grid): nothing migrates,
        // so the whole grid is exposed.
        if new_width > 0 && new_height > 0 {
            exposed.push(PixelRect::new(0, 0, new_width, new_height));
        }
    } else {
        if new_width > old_width {
            // Vertical strips at the left and right edges, full new height.
            // The right strip absorbs the rounding remainder of an odd
            // growth so the two strips plus the migrated block always cover
            // every column.
            let left = dst_x;
            push_nonempty(&mut exposed, PixelRect::new(0, 0, left, new_height));
            let right_start = left + old_width;
            push_nonempty(
                &mut exposed,
                PixelRect::new(right_start, 0, new_width - right_start, new_height),
            );
        }
        if new_height > old_height {
            // Horizontal strips above and below the migrated block, spanning
            // only the migrated x-range. Columns outside that range are
            // already covered by the vertical strips at full height.
            let top = dst_y;
            push_nonempty(&mut exposed, PixelRect::new(dst_x, 0, copy_width, top));
            let bottom_start = top + old_height;
            push_nonempty(
                &mut exposed,
                PixelRect::new(dst_x, bottom_start, copy_width, new_height - bottom_start),
            );
        }
    }

    Some(ResizePlan {
        new_dims,
        copy_width,
        copy_height,
        src_offset: (src_x, src_y),
        dst_offset: (dst_x, dst_y),
        exposed,
    })
}

fn push_nonempty(rects: &mut Vec<PixelRect>, rect: PixelRect) {
    if !rect.is_empty() {
        rects.push(rect);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn exposed_area(plan: &ResizePlan) -> u64 {
        plan.exposed.iter().map(|r| r.area()).sum()
    }

    fn assert_exposed_tiles_complement(plan: &ResizePlan) {
        // Every cell of the new grid is either migrated content or covered by
        // exactly one exposed rectangle.
        let (width, height) = plan.new_dims;
        let (dst_x, dst_y) = plan.dst_offset;
        for y in 0..height {
            for x in 0..width {
                let migrated = x >= dst_x
                    && x < dst_x + plan.copy_width
                    && y >= dst_y
                    && y < dst_y + plan.copy_height;
                let covering = plan.exposed.iter().filter(|r| r.contains(x, y)).count();
                if migrated {
                    assert_eq!(covering, 0, "migrated cell ({x},{y}) also exposed");
                } else {
                    assert_eq!(covering, 1, "cell ({x},{y}) covered {covering} times");
                }
            }
        }
    }

    #[test]
    fn unchanged_dimensions_are_a_noop() {
        assert_eq!(plan_resize((640, 480), (640, 480)), None);
        assert_eq!(plan_resize((0, 0), (0, 0)), None);
    }

    #[test]
    fn first_resize_exposes_the_full_grid() {
        let plan = plan_resize((0, 0), (8, 6)).unwrap();
        assert_eq!(plan.copy_width, 0);
        assert_eq!(plan.copy_height, 0);
        assert_eq!(plan.exposed, vec![PixelRect::new(0, 0, 8, 6)]);
    }

    #[test]
    fn resize_to_zero_exposes_nothing() {
        let plan = plan_resize((8, 6), (0, 0)).unwrap();
        assert!(plan.exposed.is_empty());
        assert_eq!(plan.copy_width, 0);
    }

    #[test]
    fn growing_width_exposes_two_vertical_strips() {
        let plan = plan_resize((4, 4), (8, 4)).unwrap();
        assert_eq!(plan.dst_offset, (2, 0));
        assert_eq!(plan.src_offset, (0, 0));
        assert_eq!(
            plan.exposed,
            vec![PixelRect::new(0, 0, 2, 4), PixelRect::new(6, 0, 2, 4)]
        );
        assert_exposed_tiles_complement(&plan);
    }

    #[test]
    fn growing_height_exposes_strips_over_migrated_columns_only() {
        let plan = plan_resize((4, 4), (4, 8)).unwrap();
        assert_eq!(plan.dst_offset, (0, 2));
        assert_eq!(
            plan.exposed,
            vec![PixelRect::new(0, 0, 4, 2), PixelRect::new(0, 6, 4, 2)]
        );
        assert_exposed_tiles_complement(&plan);
    }

    #[test]
    fn growing_both_axes_recomputes_only_the_margins() {
        let plan = plan_resize((4, 4), (10, 8)).unwrap();
        assert_eq!(plan.dst_offset, (3, 2));
        // O(new − old) recompute, not O(new)
        assert_eq!(exposed_area(&plan), 10 * 8 - 4 * 4);
        assert_exposed_tiles_complement(&plan);
    }

    #[test]
    fn odd_growth_leaves_no_uncovered_column_or_row() {
        let plan = plan_resize((4, 4), (7, 9)).unwrap();
        assert_eq!(plan.dst_offset, (1, 2));
        assert_eq!(exposed_area(&plan), 7 * 9 - 4 * 4);
        assert_exposed_tiles_complement(&plan);
    }

    #[test]
    fn shrinking_exposes_nothing_and_centers_the_crop() {
        let plan = plan_resize((10, 8), (4, 4)).unwrap();
        assert!(plan.exposed.is_empty());
        assert_eq!(plan.src_offset, (3, 2));
        assert_eq!(plan.dst_offset, (0, 0));
        assert_eq!(plan.copy_width, 4);
        assert_eq!(plan.copy_height, 4);
    }

    #[test]
    fn mixed_shrink_width_grow_height_spans_surviving_columns() {
        let plan = plan_resize((8, 4), (4, 8)).unwrap();
        assert_eq!(plan.copy_width, 4);
        assert_eq!(plan.src_offset, (2, 0));
        assert_eq!(plan.dst_offset, (0, 2));
        // Only horizontal strips, spanning the cropped width.
        assert_eq!(
            plan.exposed,
            vec![PixelRect::new(0, 0, 4, 2), PixelRect::new(0, 6, 4, 2)]
        );
        assert_exposed_tiles_complement(&plan);
    }

    #[test]
    fn growth_by_one_pixel_exposes_a_single_edge_strip() {
        let plan = plan_resize((4, 4), (5, 4)).unwrap();
        assert_eq!(plan.dst_offset, (0, 0));
        assert_eq!(plan.exposed, vec![PixelRect::new(4, 0, 1, 4)]);
        assert_exposed_tiles_complement(&plan);
    }

    #[test]
    fn every_exposed_rect_fits_in_the_new_grid() {
        for &(old, new) in &[
            ((0, 0), (16, 16)),
            ((3, 5), (9, 2)),
            ((7, 7), (13, 21)),
            ((20, 10), (10, 20)),
            ((1, 1), (2, 2)),
        ] {
            let plan = plan_resize(old, new).unwrap();
            for rect in &plan.exposed {
                assert!(
                    rect.fits_within(new.0, new.1),
                    "{rect:?} out of bounds for {new:?}"
                );
            }
        }
    }
}
